#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BondOrder {
    Single,
    Double,
    Triple,
}

impl BondOrder {
    /// Maps the molfile bond numbering (1, 2, 3) onto an order.
    pub fn from_number(n: u8) -> Option<BondOrder> {
        match n {
            1 => Some(BondOrder::Single),
            2 => Some(BondOrder::Double),
            3 => Some(BondOrder::Triple),
            _ => None,
        }
    }

    /// The symbol spliced into path tokens. Single bonds are implicit.
    pub fn symbol(self) -> &'static str {
        match self {
            BondOrder::Single => "",
            BondOrder::Double => "=",
            BondOrder::Triple => "#",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    pub order: BondOrder,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_number_maps_valid_orders() {
        assert_eq!(BondOrder::from_number(1), Some(BondOrder::Single));
        assert_eq!(BondOrder::from_number(2), Some(BondOrder::Double));
        assert_eq!(BondOrder::from_number(3), Some(BondOrder::Triple));
    }

    #[test]
    fn from_number_rejects_everything_else() {
        assert_eq!(BondOrder::from_number(0), None);
        assert_eq!(BondOrder::from_number(4), None);
        assert_eq!(BondOrder::from_number(255), None);
    }

    #[test]
    fn token_symbols() {
        assert_eq!(BondOrder::Single.symbol(), "");
        assert_eq!(BondOrder::Double.symbol(), "=");
        assert_eq!(BondOrder::Triple.symbol(), "#");
    }
}
