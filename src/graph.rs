use std::collections::HashMap;
use std::fmt;

use petgraph::graph::{NodeIndex, UnGraph};

use crate::atom::Atom;
use crate::bond::{Bond, BondOrder};
use crate::element::Element;

/// Errors raised when molecular graph construction rejects its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// Two atoms were declared with the same name.
    DuplicateAtom { name: String },
    /// A bond references an atom name that was never declared.
    UnknownAtom { name: String },
    /// A bond connects an atom to itself.
    SelfLoop { name: String },
    /// A second bond was declared for an already bonded atom pair.
    DuplicateBond { a: String, b: String },
    /// A bond order outside 1..=3.
    InvalidBondOrder { order: u8 },
    /// An element symbol that is not in the periodic table.
    UnknownElement { symbol: String },
}

impl fmt::Display for GraphError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateAtom { name } => write!(f, "duplicate atom name '{}'", name),
            Self::UnknownAtom { name } => write!(f, "bond references unknown atom '{}'", name),
            Self::SelfLoop { name } => write!(f, "bond connects atom '{}' to itself", name),
            Self::DuplicateBond { a, b } => {
                write!(f, "duplicate bond between '{}' and '{}'", a, b)
            }
            Self::InvalidBondOrder { order } => {
                write!(f, "invalid bond order {} (expected 1, 2, or 3)", order)
            }
            Self::UnknownElement { symbol } => {
                write!(f, "unknown element symbol '{}'", symbol)
            }
        }
    }
}

impl std::error::Error for GraphError {}

/// An undirected, bond-weighted graph of named atoms.
///
/// Built once from parsed atom/bond data and read-only afterwards. All
/// structural invariants are enforced at construction: bonds may only
/// reference declared atoms, self-loops and duplicate bonds are rejected,
/// and every bond order is one of single, double, or triple.
#[derive(Clone)]
pub struct MolGraph {
    graph: UnGraph<Atom, Bond>,
    index: HashMap<String, NodeIndex>,
}

impl MolGraph {
    /// Builds a graph from (name, element) pairs and (name, name, order)
    /// bond triples. Atom order is preserved: [`atoms`](Self::atoms) yields
    /// nodes in declaration order.
    pub fn new(
        atoms: Vec<(String, Element)>,
        bonds: Vec<(String, String, u8)>,
    ) -> Result<MolGraph, GraphError> {
        let mut graph = UnGraph::default();
        let mut index = HashMap::with_capacity(atoms.len());
        for (name, element) in atoms {
            if index.contains_key(&name) {
                return Err(GraphError::DuplicateAtom { name });
            }
            let idx = graph.add_node(Atom {
                name: name.clone(),
                element,
            });
            index.insert(name, idx);
        }
        for (a, b, order) in bonds {
            let ai = *index
                .get(&a)
                .ok_or_else(|| GraphError::UnknownAtom { name: a.clone() })?;
            let bi = *index
                .get(&b)
                .ok_or_else(|| GraphError::UnknownAtom { name: b.clone() })?;
            if ai == bi {
                return Err(GraphError::SelfLoop { name: a });
            }
            let order =
                BondOrder::from_number(order).ok_or(GraphError::InvalidBondOrder { order })?;
            if graph.find_edge(ai, bi).is_some() {
                return Err(GraphError::DuplicateBond { a, b });
            }
            graph.add_edge(ai, bi, Bond { order });
        }
        Ok(MolGraph { graph, index })
    }

    pub fn graph(&self) -> &UnGraph<Atom, Bond> {
        &self.graph
    }

    pub fn atom(&self, idx: NodeIndex) -> &Atom {
        &self.graph[idx]
    }

    pub fn atom_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn bond_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes in declaration order.
    pub fn atoms(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    pub fn neighbors(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors(idx)
    }

    /// Bond order between two atoms, or `None` if they are not adjacent.
    pub fn bond_order(&self, a: NodeIndex, b: NodeIndex) -> Option<BondOrder> {
        self.graph.find_edge(a, b).map(|e| self.graph[e].order)
    }

    pub fn atom_by_name(&self, name: &str) -> Option<NodeIndex> {
        self.index.get(name).copied()
    }
}

impl fmt::Debug for MolGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MolGraph")
            .field("atom_count", &self.atom_count())
            .field("bond_count", &self.bond_count())
            .finish()
    }
}
