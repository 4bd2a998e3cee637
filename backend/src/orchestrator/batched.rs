//! Batched scheduler
//!
//! Partitions a tick's pair list into contiguous chunks and evaluates the
//! dialogue kernel over the chunks on a worker pool. Workers receive a
//! read-only snapshot of the population and never touch the shared RNG.
//!
//! Chunk results are collected in chunk order and flattened, so the
//! outcome sequence is exactly the pair-list sequence no matter how many
//! workers ran or which finished first. Downstream reduction therefore
//! performs its floating-point additions in one total order, which is what
//! makes the output independent of the chunk size.

use rayon::prelude::*;

use crate::dialogue::dialogue;
use crate::models::agent::AgentState;
use crate::topology::Pair;

use super::engine::PairOutcome;

/// Evaluate every pair against the snapshot, `chunk` pairs per work item
///
/// Returns one outcome per pair, in pair-list order.
pub(crate) fn evaluate_pairs(
    pairs: &[Pair],
    snapshot: &[AgentState],
    chunk: usize,
) -> Vec<PairOutcome> {
    debug_assert!(chunk > 0, "chunk size must be positive");
    pairs
        .par_chunks(chunk)
        .map(|slice| {
            slice
                .iter()
                .map(|&pair| PairOutcome::evaluate(pair, snapshot))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .into_iter()
        .flatten()
        .collect()
}

impl PairOutcome {
    /// Run the dialogue kernel for one pair against a snapshot
    pub(crate) fn evaluate(pair: Pair, snapshot: &[AgentState]) -> Self {
        let (left, right) = dialogue(&snapshot[pair.i], &snapshot[pair.j]);
        Self { pair, left, right }
    }
}
