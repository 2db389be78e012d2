//! Reading molecules from SDF / MDL molfile input.
//!
//! Only the connection table of the first structure block is consumed:
//! three header lines, a counts line, `n` atom lines (element symbol in
//! the fourth whitespace-separated field), and `m` bond lines (two 1-based
//! atom indices and a bond order). Everything after the bond block up to
//! `$$$$` or end of input is ignored.
//!
//! Atoms are named from their element and a per-element counter in file
//! order ("C1", "C2", "O1", ...). By default hydrogens and their bonds
//! are dropped before the molecule is built; use
//! [`read_molecule_with_hydrogens`] to keep them.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::graph::GraphError;
use crate::molecule::Molecule;

// 1-based position of the counts line in a molfile
const COUNTS_LINE: usize = 4;

/// Errors produced while reading an SDF structure block.
#[derive(Debug)]
pub enum SdfError {
    Io(std::io::Error),
    /// Malformed file content, with the 1-based line it was found on.
    Parse { line: usize, details: String },
    /// The parsed atoms and bonds were rejected by molecule construction.
    Graph(GraphError),
}

impl fmt::Display for SdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "read failed: {}", e),
            Self::Parse { line, details } => {
                write!(f, "parse error at line {}: {}", line, details)
            }
            Self::Graph(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SdfError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Graph(e) => Some(e),
            Self::Parse { .. } => None,
        }
    }
}

impl From<std::io::Error> for SdfError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<GraphError> for SdfError {
    fn from(e: GraphError) -> Self {
        Self::Graph(e)
    }
}

/// Reads the first structure block, dropping hydrogens and their bonds.
pub fn read_molecule<R: BufRead>(reader: R) -> Result<Molecule, SdfError> {
    read(reader, false)
}

/// Reads the first structure block with hydrogens kept.
pub fn read_molecule_with_hydrogens<R: BufRead>(reader: R) -> Result<Molecule, SdfError> {
    read(reader, true)
}

/// Opens a file and reads its first structure block, dropping hydrogens.
pub fn read_molecule_file<P: AsRef<Path>>(path: P) -> Result<Molecule, SdfError> {
    read_molecule(BufReader::new(File::open(path)?))
}

fn read<R: BufRead>(reader: R, include_hydrogen: bool) -> Result<Molecule, SdfError> {
    let lines = collect_block(reader)?;
    if lines.len() < COUNTS_LINE {
        return Err(SdfError::Parse {
            line: lines.len(),
            details: "missing counts line".into(),
        });
    }
    let (num_atoms, num_bonds) = parse_counts(&lines[COUNTS_LINE - 1])?;
    // counts are file input; the block bounds must not wrap
    let block_end = COUNTS_LINE
        .checked_add(num_atoms)
        .and_then(|end| end.checked_add(num_bonds));
    let bond_end = match block_end {
        Some(end) if end <= lines.len() => end,
        _ => {
            return Err(SdfError::Parse {
                line: lines.len(),
                details: format!(
                    "structure block truncated: counts line declares {} atoms and {} bonds",
                    num_atoms, num_bonds
                ),
            })
        }
    };
    let atom_end = COUNTS_LINE + num_atoms;

    let mut symbols = Vec::with_capacity(num_atoms);
    for (offset, line) in lines[COUNTS_LINE..atom_end].iter().enumerate() {
        symbols.push(parse_atom(line, COUNTS_LINE + 1 + offset)?);
    }
    let names = assign_names(&symbols);

    let mut bonds = Vec::with_capacity(num_bonds);
    for (offset, line) in lines[atom_end..bond_end].iter().enumerate() {
        let (a, b, order) = parse_bond(line, atom_end + 1 + offset, num_atoms)?;
        bonds.push((names[a - 1].clone(), names[b - 1].clone(), order));
    }

    let mut atoms: Vec<(String, String)> = names.into_iter().zip(symbols).collect();
    if !include_hydrogen {
        let hydrogens: HashSet<String> = atoms
            .iter()
            .filter(|(_, symbol)| symbol == "H")
            .map(|(name, _)| name.clone())
            .collect();
        bonds.retain(|(a, b, _)| !hydrogens.contains(a) && !hydrogens.contains(b));
        atoms.retain(|(_, symbol)| symbol != "H");
    }
    Ok(Molecule::new(atoms, bonds)?)
}

fn collect_block<R: BufRead>(reader: R) -> Result<Vec<String>, SdfError> {
    let mut lines = Vec::new();
    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line == "$$$$" {
            break;
        }
        lines.push(line.to_string());
    }
    Ok(lines)
}

fn parse_counts(line: &str) -> Result<(usize, usize), SdfError> {
    let mut fields = line.split_whitespace();
    let atoms = parse_field(fields.next(), COUNTS_LINE, "atom count")?;
    let bonds = parse_field(fields.next(), COUNTS_LINE, "bond count")?;
    Ok((atoms, bonds))
}

fn parse_atom(line: &str, line_no: usize) -> Result<String, SdfError> {
    line.split_whitespace()
        .nth(3)
        .map(str::to_string)
        .ok_or_else(|| SdfError::Parse {
            line: line_no,
            details: "atom line has no element field".into(),
        })
}

fn parse_bond(line: &str, line_no: usize, num_atoms: usize) -> Result<(usize, usize, u8), SdfError> {
    let mut fields = line.split_whitespace();
    let a: usize = parse_field(fields.next(), line_no, "bond atom index")?;
    let b: usize = parse_field(fields.next(), line_no, "bond atom index")?;
    let order: u8 = parse_field(fields.next(), line_no, "bond order")?;
    for idx in [a, b] {
        if idx == 0 || idx > num_atoms {
            return Err(SdfError::Parse {
                line: line_no,
                details: format!(
                    "bond references atom {} outside the declared range 1..={}",
                    idx, num_atoms
                ),
            });
        }
    }
    Ok((a, b, order))
}

fn parse_field<T: std::str::FromStr>(
    field: Option<&str>,
    line: usize,
    what: &str,
) -> Result<T, SdfError> {
    let text = field.ok_or_else(|| SdfError::Parse {
        line,
        details: format!("missing {}", what),
    })?;
    text.parse().map_err(|_| SdfError::Parse {
        line,
        details: format!("invalid {} '{}'", what, text),
    })
}

// element symbol + 1-based per-element counter, in file order
fn assign_names(symbols: &[String]) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    symbols
        .iter()
        .map(|symbol| {
            let n = counts.entry(symbol).or_insert(0);
            *n += 1;
            format!("{}{}", symbol, n)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bond::BondOrder;

    const ETHYLENE: &str = r#"ethylene
  molprint          2D

  6  5  0  0  0  0  0  0  0  0999 V2000
   -0.6700    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
    0.6700    0.0000    0.0000 C   0  0  0  0  0  0  0  0  0  0  0  0
   -1.2400    0.9300    0.0000 H   0  0  0  0  0  0  0  0  0  0  0  0
   -1.2400   -0.9300    0.0000 H   0  0  0  0  0  0  0  0  0  0  0  0
    1.2400    0.9300    0.0000 H   0  0  0  0  0  0  0  0  0  0  0  0
    1.2400   -0.9300    0.0000 H   0  0  0  0  0  0  0  0  0  0  0  0
  1  2  2  0
  1  3  1  0
  1  4  1  0
  2  5  1  0
  2  6  1  0
M  END
"#;

    #[test]
    fn hydrogens_are_dropped_by_default() {
        let mol = read_molecule(ETHYLENE.as_bytes()).unwrap();
        let g = mol.graph();
        assert_eq!(g.atom_count(), 2);
        assert_eq!(g.bond_count(), 1);
        let c1 = g.atom_by_name("C1").unwrap();
        let c2 = g.atom_by_name("C2").unwrap();
        assert_eq!(g.bond_order(c1, c2), Some(BondOrder::Double));
        assert!(g.atom_by_name("H1").is_none());
    }

    #[test]
    fn hydrogens_can_be_kept() {
        let mol = read_molecule_with_hydrogens(ETHYLENE.as_bytes()).unwrap();
        let g = mol.graph();
        assert_eq!(g.atom_count(), 6);
        assert_eq!(g.bond_count(), 5);
        // per-element counters: C1, C2, H1..H4
        assert!(g.atom_by_name("H4").is_some());
        assert!(g.atom_by_name("H5").is_none());
    }

    #[test]
    fn only_the_first_block_of_an_sd_file_is_read() {
        let two_records = format!("{}$$$$\n{}", ETHYLENE, ETHYLENE);
        let mol = read_molecule(two_records.as_bytes()).unwrap();
        assert_eq!(mol.graph().atom_count(), 2);
    }

    #[test]
    fn missing_counts_line() {
        let err = read_molecule("name\ncomment\n".as_bytes()).unwrap_err();
        assert!(matches!(err, SdfError::Parse { .. }));
    }

    #[test]
    fn unreadable_counts() {
        let input = "name\n\n\n  x  3  0  0999 V2000\n";
        let err = read_molecule(input.as_bytes()).unwrap_err();
        match err {
            SdfError::Parse { line, details } => {
                assert_eq!(line, 4);
                assert!(details.contains("atom count"), "{}", details);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn truncated_atom_block() {
        let input = "name\n\n\n  3  0  0  0999 V2000\n    0.0 0.0 0.0 C 0\n";
        let err = read_molecule(input.as_bytes()).unwrap_err();
        match err {
            SdfError::Parse { details, .. } => {
                assert!(details.contains("truncated"), "{}", details)
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn overflowing_counts_are_a_parse_error() {
        // counts near usize::MAX must not wrap the block bounds
        let input = format!(
            "name\n\n\n  {}  {}  0  0999 V2000\n",
            usize::MAX,
            usize::MAX
        );
        let err = read_molecule(input.as_bytes()).unwrap_err();
        match err {
            SdfError::Parse { details, .. } => {
                assert!(details.contains("truncated"), "{}", details)
            }
            other => panic!("expected parse error, got {:?}", other),
        }

        let input = format!("name\n\n\n  0  {}  0  0999 V2000\n", usize::MAX);
        let err = read_molecule(input.as_bytes()).unwrap_err();
        assert!(matches!(err, SdfError::Parse { .. }));
    }

    #[test]
    fn atom_line_without_element_field() {
        let input = "name\n\n\n  1  0  0  0999 V2000\n    0.0 0.0 0.0\n";
        let err = read_molecule(input.as_bytes()).unwrap_err();
        match err {
            SdfError::Parse { line, details } => {
                assert_eq!(line, 5);
                assert!(details.contains("element"), "{}", details);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn bond_index_out_of_range() {
        let input = "name\n\n\n  1  1  0  0999 V2000\n    0.0 0.0 0.0 C 0\n  1  2  1  0\n";
        let err = read_molecule(input.as_bytes()).unwrap_err();
        match err {
            SdfError::Parse { line, details } => {
                assert_eq!(line, 6);
                assert!(details.contains("outside the declared range"), "{}", details);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn bond_index_zero_is_rejected() {
        let input = "name\n\n\n  2  1  0  0999 V2000\n    0.0 0.0 0.0 C 0\n    1.0 0.0 0.0 C 0\n  0  2  1  0\n";
        let err = read_molecule(input.as_bytes()).unwrap_err();
        assert!(matches!(err, SdfError::Parse { line: 7, .. }));
    }

    #[test]
    fn unknown_element_symbol_surfaces_as_graph_error() {
        let input = "name\n\n\n  1  0  0  0999 V2000\n    0.0 0.0 0.0 Xx 0\n";
        let err = read_molecule(input.as_bytes()).unwrap_err();
        match err {
            SdfError::Graph(GraphError::UnknownElement { symbol }) => assert_eq!(symbol, "Xx"),
            other => panic!("expected unknown element, got {:?}", other),
        }
    }

    #[test]
    fn out_of_range_bond_order_surfaces_as_graph_error() {
        let input = "name\n\n\n  2  1  0  0999 V2000\n    0.0 0.0 0.0 C 0\n    1.0 0.0 0.0 C 0\n  1  2  4  0\n";
        let err = read_molecule(input.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            SdfError::Graph(GraphError::InvalidBondOrder { order: 4 })
        ));
    }

    #[test]
    fn missing_file_reports_io_error() {
        let err = read_molecule_file("/no/such/file.sdf").unwrap_err();
        assert!(matches!(err, SdfError::Io(_)));
    }

    #[test]
    fn assign_names_counts_per_element() {
        let symbols: Vec<String> = ["C", "O", "C", "H", "O", "C"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            assign_names(&symbols),
            ["C1", "O1", "C2", "H1", "O2", "C3"]
        );
    }
}
