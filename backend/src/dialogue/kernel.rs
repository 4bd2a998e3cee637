//! Dialogue kernel
//!
//! The pure per-pair update: the outer product of the two preference
//! distributions is pushed through the pair's transition matrix, the result
//! is split back into two marginals, and each marginal is rounded to 4
//! decimal places and renormalized.
//!
//! # Critical Invariants
//!
//! 1. The kernel is a pure function of the two agent states
//! 2. Rounding happens BEFORE normalization; the order is contractual
//! 3. The kernel never touches the shared RNG

use crate::core::round::round4;
use crate::models::agent::AgentState;

use super::transition::TransitionMatrix;

/// Run one dialogue between two agents
///
/// Returns the pair's next preference distributions `(alice, bob)`, each a
/// normalized three-element distribution. Contributions from multiple
/// dialogues in one tick are averaged by the caller.
///
/// # Example
/// ```
/// use opinion_simulator_core_rs::{AgentState, dialogue::dialogue};
///
/// // Two agents already in full agreement do not move.
/// let alice = AgentState::new(0.5, 0.5, 1.0);
/// let bob = AgentState::new(0.5, 0.5, 1.0);
/// let (next_alice, next_bob) = dialogue(&alice, &bob);
/// assert_eq!(next_alice, [1.0, 0.0, 0.0]);
/// assert_eq!(next_bob, [1.0, 0.0, 0.0]);
/// ```
pub fn dialogue(alice: &AgentState, bob: &AgentState) -> ([f64; 3], [f64; 3]) {
    let matrix = TransitionMatrix::for_pair(alice, bob);
    let a = alice.prefs();
    let b = bob.prefs();

    // Joint distribution over ordered choice pairs: v[3i + j] = a_i * b_j.
    let mut joint = [0.0; 9];
    for i in 0..3 {
        for j in 0..3 {
            joint[3 * i + j] = a[i] * b[j];
        }
    }

    let projected = matrix.project(&joint);

    // Marginalize the projected joint back onto each participant.
    let mut alice_marg = [0.0; 3];
    let mut bob_marg = [0.0; 3];
    for i in 0..3 {
        for j in 0..3 {
            let mass = projected[3 * i + j];
            alice_marg[i] += mass;
            bob_marg[j] += mass;
        }
    }

    (round_and_normalize(alice_marg), round_and_normalize(bob_marg))
}

/// Round each component to 4 decimals, then normalize by the rounded sum
fn round_and_normalize(marginal: [f64; 3]) -> [f64; 3] {
    let rounded = [round4(marginal[0]), round4(marginal[1]), round4(marginal[2])];
    let total: f64 = rounded.iter().sum();
    [rounded[0] / total, rounded[1] / total, rounded[2] / total]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outputs_are_distributions() {
        let alice = AgentState::new(0.3, 0.8, 0.7);
        let bob = AgentState::new(0.9, 0.2, 0.4);
        let (next_alice, next_bob) = dialogue(&alice, &bob);
        for marg in [next_alice, next_bob] {
            assert!((marg.iter().sum::<f64>() - 1.0).abs() < 1e-12);
            assert!(marg.iter().all(|p| *p >= 0.0));
        }
    }

    #[test]
    fn test_disagreeing_pair_marginals_follow_choice_probs() {
        use crate::dialogue::transition::choice_probs;

        // Alice fully on alternative 1, bob fully on alternative 2: the
        // joint mass sits entirely in the (1,2) disagreement row, so the
        // marginals collapse to the two (keep, change, alt) triples with
        // bob's keep/change swapped (conceding means adopting 1).
        let alice = AgentState::new(0.3, 0.8, 1.0);
        let bob = AgentState::new(0.9, 0.2, 0.0);
        let (next_alice, next_bob) = dialogue(&alice, &bob);

        let pa = choice_probs(alice.rho(), bob.pi());
        let pb = choice_probs(bob.rho(), alice.pi());
        let expect = |triple: [f64; 3]| {
            let rounded = [round4(triple[0]), round4(triple[1]), round4(triple[2])];
            let total: f64 = rounded.iter().sum();
            [rounded[0] / total, rounded[1] / total, rounded[2] / total]
        };
        assert_eq!(next_alice, expect([pa[0], pa[1], pa[2]]));
        assert_eq!(next_bob, expect([pb[1], pb[0], pb[2]]));
    }

    #[test]
    fn test_pure_function_of_inputs() {
        let alice = AgentState::new(0.5, 0.6, 0.25);
        let bob = AgentState::new(0.4, 0.1, 0.75);
        assert_eq!(dialogue(&alice, &bob), dialogue(&alice, &bob));
    }
}
