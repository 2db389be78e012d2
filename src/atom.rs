use crate::element::Element;

/// A named atom node in a molecular graph.
///
/// The name is the atom's identity ("C3", "O1", ...) and must be unique
/// within a molecule; the element is what fingerprint tokens are built
/// from. Atoms carry nothing else: charges, isotopes, and coordinates
/// play no role in path fingerprints.
///
/// # Examples
///
/// ```
/// use molprint::{Atom, Element};
///
/// let atom = Atom {
///     name: "C3".to_string(),
///     element: Element::C,
/// };
/// assert_eq!(atom.element.symbol(), "C");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Atom {
    /// Unique name within the owning molecule.
    pub name: String,
    /// The atom's element.
    pub element: Element,
}
