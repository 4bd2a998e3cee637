//! Pair-generation engine
//!
//! Produces the unordered pair list for a tick under a given interaction
//! topology:
//! - **All-pairs**: every unordered pair of distinct agents, lexicographic
//! - **Random k-matching**: up to `k` candidate partners per agent, drawn
//!   from a per-tick derived stream and deduplicated
//!
//! # Determinism
//!
//! The pair list is a pure function of `(topology, n, seed, tick)`. The
//! k-matching stream is seeded from a SHA-256 fingerprint of the run seed
//! and the tick, so it never touches (or perturbs) the shared RNG stream
//! used for initialization and voting. The fingerprint layout is stable
//! within this implementation but deliberately not a cross-language
//! contract.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::rng::Lcg;

/// Domain label mixed into the per-tick matching seed
const MATCHING_TAG: &[u8] = b"pair-matching";

/// Interaction topology selecting which pairs talk each tick
///
/// # Example
/// ```
/// use opinion_simulator_core_rs::Topology;
///
/// let dense = Topology::AllPairs;
/// let sparse = Topology::RandomMatch { k: 2 };
/// assert_ne!(dense, sparse);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Topology {
    /// Every unordered pair of distinct agents, every tick
    AllPairs,

    /// Up to `k` random partners per agent per tick, deduplicated
    RandomMatch {
        /// Candidate partners drawn per agent; valid range is `[1, n-1]`
        k: usize,
    },
}

/// Unordered agent pair, stored with `i < j`
///
/// # Example
/// ```
/// use opinion_simulator_core_rs::Pair;
///
/// assert_eq!(Pair::new(4, 1), Pair::new(1, 4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pair {
    /// Lower agent index
    pub i: usize,
    /// Higher agent index
    pub j: usize,
}

impl Pair {
    /// Create a pair, normalizing the index order
    ///
    /// # Panics
    /// Panics on a self-pair; the generators never produce one.
    pub fn new(a: usize, b: usize) -> Self {
        assert!(a != b, "self-pairs are not valid");
        if a < b {
            Self { i: a, j: b }
        } else {
            Self { i: b, j: a }
        }
    }
}

/// Generate the pair list for one tick
///
/// The caller is responsible for having validated the topology against the
/// population size (`RandomMatch` requires `1 <= k <= n - 1`).
///
/// # Example
/// ```
/// use opinion_simulator_core_rs::{generate_pairs, Topology};
///
/// let pairs = generate_pairs(Topology::AllPairs, 4, 42, 0);
/// assert_eq!(pairs.len(), 6); // n * (n - 1) / 2
/// ```
pub fn generate_pairs(topology: Topology, n: usize, seed: i64, tick: usize) -> Vec<Pair> {
    match topology {
        Topology::AllPairs => all_pairs(n),
        Topology::RandomMatch { k } => random_matching(n, k, seed, tick),
    }
}

/// All unordered pairs `(i, j)` with `i < j < n`, in lexicographic order
fn all_pairs(n: usize) -> Vec<Pair> {
    let mut pairs = Vec::with_capacity(n * n.saturating_sub(1) / 2);
    for i in 0..n {
        for j in (i + 1)..n {
            pairs.push(Pair { i, j });
        }
    }
    pairs
}

/// Random k-matching: `k` candidate partners per agent, dedup in draw order
///
/// For each agent `i` in index order, `k` uniforms are drawn from the
/// per-tick stream. A draw `u` maps to a partner via
/// `j_raw = floor(u * (n - 1))`, shifted past `i` itself so that every
/// other agent is equally likely. Candidate pairs are normalized to
/// `(min, max)` and deduplicated preserving first occurrence. The draw
/// count and order are fixed; consuming more, fewer, or reordered uniforms
/// changes the pair list.
fn random_matching(n: usize, k: usize, seed: i64, tick: usize) -> Vec<Pair> {
    let mut rng = Lcg::from_raw(matching_seed(seed, tick));
    let mut seen = HashSet::with_capacity(n * k);
    let mut pairs = Vec::with_capacity(n * k);
    for i in 0..n {
        for _ in 0..k {
            let (u, next) = rng.uniform();
            rng = next;
            let j_raw = (u * (n - 1) as f64) as usize;
            let j = if j_raw >= i { j_raw + 1 } else { j_raw };
            debug_assert!(j < n, "partner index out of range");
            let pair = Pair::new(i, j);
            if seen.insert(pair) {
                pairs.push(pair);
            }
        }
    }
    pairs
}

/// Per-tick seed fingerprint `H(seed, tick, TAG)`
///
/// SHA-256 over a fixed little-endian byte layout, truncated to the first
/// eight digest bytes. Stable across runs and platforms.
fn matching_seed(seed: i64, tick: usize) -> u64 {
    let mut hasher = Sha256::new();
    hasher.update(MATCHING_TAG);
    hasher.update(seed.to_le_bytes());
    hasher.update((tick as u64).to_le_bytes());
    let digest = hasher.finalize();
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(bytes)
}
