//! Property-based invariants over the run surface
//!
//! Quantified checks: outputs are distributions, votes account for every
//! agent, chunk size never changes the result, and random k-matching
//! holds for every valid degree.

use proptest::prelude::*;

use opinion_simulator_core_rs::orchestrator::run;
use opinion_simulator_core_rs::Topology;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn prop_preferences_stay_distributions(
        n in 2usize..12,
        ticks in 0usize..4,
        seed in any::<i64>(),
        chunk in 1usize..64,
    ) {
        let stats = run(n, ticks, seed, chunk, Topology::AllPairs).unwrap();
        prop_assert_eq!(stats.agent_preferences.len(), n);
        for prefs in &stats.agent_preferences {
            let total: f64 = prefs.iter().sum();
            // Each reported component carries up to 5e-4 of rounding.
            prop_assert!((total - 1.0).abs() <= 3e-3, "row sums to {}", total);
            for component in prefs {
                prop_assert!(*component >= 0.0);
            }
        }
    }

    #[test]
    fn prop_votes_sum_to_population(
        n in 1usize..15,
        ticks in 0usize..4,
        seed in any::<i64>(),
    ) {
        let stats = run(n, ticks, seed, 32, Topology::AllPairs).unwrap();
        prop_assert_eq!(stats.vote_results.iter().sum::<u64>(), n as u64);
    }

    #[test]
    fn prop_chunk_size_is_irrelevant(
        n in 2usize..10,
        ticks in 1usize..4,
        seed in any::<i64>(),
        chunk_a in 1usize..128,
        chunk_b in 1usize..128,
    ) {
        let a = run(n, ticks, seed, chunk_a, Topology::AllPairs).unwrap();
        let b = run(n, ticks, seed, chunk_b, Topology::AllPairs).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn prop_random_matching_valid_for_every_degree(
        n in 2usize..10,
        seed in any::<i64>(),
    ) {
        for k in 1..n {
            let stats = run(n, 2, seed, 16, Topology::RandomMatch { k }).unwrap();
            prop_assert_eq!(stats.vote_results.iter().sum::<u64>(), n as u64);
            for prefs in &stats.agent_preferences {
                let total: f64 = prefs.iter().sum();
                prop_assert!((total - 1.0).abs() <= 3e-3);
            }
        }
    }

    #[test]
    fn prop_runs_are_idempotent(
        n in 2usize..10,
        ticks in 0usize..3,
        seed in any::<i64>(),
    ) {
        let first = run(n, ticks, seed, 64, Topology::AllPairs).unwrap();
        let second = run(n, ticks, seed, 64, Topology::AllPairs).unwrap();
        prop_assert_eq!(first, second);
    }
}
