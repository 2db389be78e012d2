use std::fmt;
use std::sync::OnceLock;

use crate::element::Element;
use crate::fingerprint::Fingerprint;
use crate::graph::{GraphError, MolGraph};

/// A molecule: an immutable molecular graph plus its structural
/// fingerprint, computed on first use and cached.
///
/// Equality and substructure tests compare fingerprints, not graphs, so
/// two molecules with the same path-token structure are equal even when
/// their atom names differ.
///
/// # Examples
///
/// ```
/// use molprint::Molecule;
///
/// let ethylene = Molecule::new(
///     vec![("C1".into(), "C".into()), ("C2".into(), "C".into())],
///     vec![("C1".into(), "C2".into(), 2)],
/// )?;
/// assert!(ethylene.contains_substructure_token("C=C"));
/// assert!(!ethylene.contains_substructure_token("C#C"));
/// # Ok::<(), molprint::GraphError>(())
/// ```
pub struct Molecule {
    graph: MolGraph,
    fingerprint: OnceLock<Fingerprint>,
}

impl Molecule {
    /// Builds a molecule from (atom name, element symbol) pairs and
    /// (name, name, bond order) triples, the shape file parsers produce.
    pub fn new(
        atoms: Vec<(String, String)>,
        bonds: Vec<(String, String, u8)>,
    ) -> Result<Molecule, GraphError> {
        let mut typed = Vec::with_capacity(atoms.len());
        for (name, symbol) in atoms {
            let element =
                Element::from_symbol(&symbol).ok_or(GraphError::UnknownElement { symbol })?;
            typed.push((name, element));
        }
        Ok(Molecule::from_graph(MolGraph::new(typed, bonds)?))
    }

    pub fn from_graph(graph: MolGraph) -> Molecule {
        Molecule {
            graph,
            fingerprint: OnceLock::new(),
        }
    }

    pub fn graph(&self) -> &MolGraph {
        &self.graph
    }

    /// The molecule's fingerprint. The first call computes it; later
    /// calls return the cached vector.
    pub fn fingerprint(&self) -> &Fingerprint {
        self.fingerprint
            .get_or_init(|| Fingerprint::for_graph(&self.graph))
    }

    /// Whether `other`'s fingerprint bits are a subset of this
    /// molecule's, i.e. whether `other` is a substructure of `self`.
    pub fn contains_substructure(&self, other: &Molecule) -> bool {
        self.fingerprint().contains(other.fingerprint())
    }

    /// Substructure test against a bare structural token such as
    /// `"ON=O"`, without building the query as a molecule.
    pub fn contains_substructure_token(&self, token: &str) -> bool {
        self.fingerprint().contains(&Fingerprint::for_token(token))
    }
}

impl Clone for Molecule {
    fn clone(&self) -> Molecule {
        Molecule {
            graph: self.graph.clone(),
            fingerprint: self.fingerprint.clone(),
        }
    }
}

impl PartialEq for Molecule {
    fn eq(&self, other: &Molecule) -> bool {
        self.fingerprint() == other.fingerprint()
    }
}

impl Eq for Molecule {}

impl fmt::Debug for Molecule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Molecule")
            .field("atom_count", &self.graph.atom_count())
            .field("bond_count", &self.graph.bond_count())
            .finish()
    }
}
