use std::collections::HashSet;
use std::fmt;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::graph::MolGraph;
use crate::paths::simple_paths_from;
use crate::token::path_token;

/// Width of every fingerprint, in bits.
pub const FINGERPRINT_BITS: usize = 1024;

/// Longest path fed into the fingerprint, in bonds (7 atoms).
pub const MAX_PATH_EDGES: usize = 6;

const WORDS: usize = FINGERPRINT_BITS / 64;

const FNV_OFFSET: u64 = 0xcbf29ce484222325;
const FNV_PRIME: u64 = 0x100000001b3;

/// A 1024-bit structural fingerprint.
///
/// Every distinct path token of a molecule deterministically sets exactly
/// two bit positions (see [`for_graph`](Self::for_graph)), so fingerprints
/// of identical structures are identical and a substructure's bits are a
/// subset of its parent's. Bits only ever accumulate; a fingerprint is
/// never mutated after it is built.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    words: [u64; WORDS],
}

impl Fingerprint {
    /// The all-zero fingerprint. This is also the fingerprint of the empty
    /// molecule, which makes it a substructure of everything.
    pub fn zero() -> Fingerprint {
        Fingerprint { words: [0; WORDS] }
    }

    /// Fingerprints a whole molecular graph.
    ///
    /// Enumerates every simple path of at most [`MAX_PATH_EDGES`] bonds
    /// between every ordered atom pair (including the trivial single-atom
    /// paths, so each element present contributes its bare-element token),
    /// collapses the paths to their distinct tokens, and sets two seeded
    /// bit positions per token. The result depends only on the token set:
    /// discovery order cannot matter because each token's contribution is
    /// a pure function of the token string, OR-ed into the vector.
    pub fn for_graph(graph: &MolGraph) -> Fingerprint {
        let mut tokens = HashSet::new();
        for start in graph.atoms() {
            for path in simple_paths_from(graph, start, MAX_PATH_EDGES) {
                tokens.insert(path_token(graph, &path));
            }
        }
        let mut fp = Fingerprint::zero();
        for token in &tokens {
            fp.insert_token(token);
        }
        fp
    }

    /// Fingerprints a bare structural token such as `"ON=O"` or `"C#C"`,
    /// setting the same two bits the token would set inside a full
    /// molecule fingerprint.
    pub fn for_token(token: &str) -> Fingerprint {
        let mut fp = Fingerprint::zero();
        fp.insert_token(token);
        fp
    }

    fn insert_token(&mut self, token: &str) {
        let (a, b) = token_bits(token);
        self.set(a);
        self.set(b);
    }

    fn set(&mut self, pos: usize) {
        self.words[pos / 64] |= 1u64 << (pos % 64);
    }

    /// Whether bit `pos` is set. Panics if `pos` is not below
    /// [`FINGERPRINT_BITS`].
    pub fn get(&self, pos: usize) -> bool {
        self.words[pos / 64] >> (pos % 64) & 1 == 1
    }

    pub fn count_ones(&self) -> u32 {
        self.words.iter().map(|w| w.count_ones()).sum()
    }

    /// Positions of the set bits, ascending.
    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        (0..FINGERPRINT_BITS).filter(|&pos| self.get(pos))
    }

    /// Whether every bit set in `other` is also set in `self`.
    ///
    /// This is the substructure test: a fragment's tokens are a subset of
    /// its parent's tokens, so its bits are a subset of the parent's bits.
    /// The converse does not strictly hold: with two bits per token, a
    /// dense fingerprint can cover an unrelated token's bits by collision,
    /// so containment has a small false-positive rate on large molecules
    /// and never a false negative.
    pub fn contains(&self, other: &Fingerprint) -> bool {
        self.words
            .iter()
            .zip(other.words.iter())
            .all(|(s, o)| o & !s == 0)
    }
}

impl Default for Fingerprint {
    fn default() -> Fingerprint {
        Fingerprint::zero()
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fingerprint")
            .field("bits_set", &self.count_ones())
            .finish()
    }
}

/// The two bit positions a token sets.
///
/// The token string is hashed with FNV-1a, the hash seeds a fresh ChaCha
/// generator, and positions are drawn as `next_u64() % 1024` (1024 divides
/// 2^64, so the draw is exactly uniform). The second position is redrawn
/// until it differs from the first. A content hash plus an explicitly
/// seeded local generator keeps the mapping stable across runs, processes,
/// and platforms, and safe under concurrent fingerprinting.
fn token_bits(token: &str) -> (usize, usize) {
    let mut rng = ChaCha8Rng::seed_from_u64(fnv1a(token.as_bytes()));
    let first = (rng.next_u64() % FINGERPRINT_BITS as u64) as usize;
    let mut second = first;
    while second == first {
        second = (rng.next_u64() % FINGERPRINT_BITS as u64) as usize;
    }
    (first, second)
}

fn fnv1a(bytes: &[u8]) -> u64 {
    let mut hash = FNV_OFFSET;
    for &byte in bytes {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}
