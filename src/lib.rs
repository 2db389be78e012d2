pub mod atom;
pub mod bond;
pub mod element;
pub mod fingerprint;
pub mod graph;
pub mod molecule;
pub mod paths;
pub mod sdf;
pub mod token;

pub use atom::Atom;
pub use bond::{Bond, BondOrder};
pub use element::Element;
pub use fingerprint::{Fingerprint, FINGERPRINT_BITS, MAX_PATH_EDGES};
pub use graph::{GraphError, MolGraph};
pub use molecule::Molecule;
pub use paths::{simple_paths, simple_paths_from};
pub use sdf::{read_molecule, read_molecule_file, read_molecule_with_hydrogens, SdfError};
pub use token::path_token;
