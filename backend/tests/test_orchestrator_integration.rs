//! Integration tests for the simulation run surface
//!
//! These exercise the documented end-to-end scenarios: statistics shape,
//! determinism, zero-tick runs, sparse topologies, and argument rejection.

use opinion_simulator_core_rs::orchestrator::{run, sweep, SimulationError};
use opinion_simulator_core_rs::Topology;

#[test]
fn test_single_tick_stats_shape() {
    let stats = run(10, 1, 12345, 256, Topology::AllPairs).unwrap();
    assert_eq!(stats.total_agents, 10);
    assert_eq!(stats.agent_preferences.len(), 10);
    let average_total: f64 = stats.average_preferences.iter().sum();
    assert!(
        (average_total - 1.0).abs() <= 0.003,
        "average preferences sum to {}",
        average_total
    );
}

#[test]
fn test_votes_account_for_every_agent() {
    for ticks in [0, 1, 5] {
        let stats = run(9, ticks, 7, 64, Topology::AllPairs).unwrap();
        assert_eq!(stats.vote_results.iter().sum::<u64>(), 9, "ticks = {}", ticks);
    }
}

#[test]
fn test_repeat_runs_are_identical() {
    let first = run(10, 2, 42, 256, Topology::AllPairs).unwrap();
    let second = run(10, 2, 42, 256, Topology::AllPairs).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_zero_ticks_leaves_third_alternative_empty() {
    let stats = run(10, 0, 42, 256, Topology::AllPairs).unwrap();
    assert_eq!(stats.total_agents, 10);
    for prefs in &stats.agent_preferences {
        assert_eq!(prefs[2], 0.0, "dialogue has not occurred yet");
        assert!((prefs[0] + prefs[1] - 1.0).abs() <= 0.0015);
    }
}

#[test]
fn test_dense_multi_tick_run_stays_a_distribution() {
    let stats = run(50, 3, 99, 256, Topology::AllPairs).unwrap();
    for prefs in &stats.agent_preferences {
        let total: f64 = prefs.iter().sum();
        assert!((total - 1.0).abs() <= 0.003, "row sums to {}", total);
        assert!(prefs.iter().all(|p| *p >= 0.0), "negative mass in {:?}", prefs);
    }
}

#[test]
fn test_sparse_matching_run() {
    let stats = run(10, 5, 42, 256, Topology::RandomMatch { k: 1 }).unwrap();
    assert_eq!(stats.total_agents, 10);
    assert_eq!(stats.vote_results.iter().sum::<u64>(), 10);
    for prefs in &stats.agent_preferences {
        let total: f64 = prefs.iter().sum();
        assert!((total - 1.0).abs() <= 0.003);
    }
}

#[test]
fn test_rejects_oversized_matching_degree() {
    let error = run(10, 5, 42, 256, Topology::RandomMatch { k: 10 }).unwrap_err();
    assert_eq!(error, SimulationError::InvalidTopology { k: 10, n: 10 });
}

#[test]
fn test_rejects_zero_matching_degree() {
    let error = run(10, 5, 42, 256, Topology::RandomMatch { k: 0 }).unwrap_err();
    assert_eq!(error, SimulationError::InvalidTopology { k: 0, n: 10 });
}

#[test]
fn test_seed_changes_output() {
    let a = run(10, 2, 1, 64, Topology::AllPairs).unwrap();
    let b = run(10, 2, 2, 64, Topology::AllPairs).unwrap();
    assert_ne!(a, b, "different seeds produced identical stats");
}

#[test]
fn test_negative_seed_is_usable() {
    let stats = run(8, 1, -12345, 64, Topology::AllPairs).unwrap();
    assert_eq!(stats.total_agents, 8);
    assert_eq!(run(8, 1, -12345, 64, Topology::AllPairs).unwrap(), stats);
}

#[test]
fn test_sweep_returns_one_result_per_population() {
    let results = sweep(2, 5, 1, 42, 64, Topology::AllPairs).unwrap();
    assert_eq!(results.len(), 4);
    for (offset, stats) in results.iter().enumerate() {
        assert_eq!(stats.total_agents, 2 + offset);
    }
}

#[test]
fn test_sweep_rejects_population_below_two() {
    assert_eq!(
        sweep(1, 3, 1, 42, 64, Topology::AllPairs).unwrap_err(),
        SimulationError::InvalidRange { min_n: 1, max_n: 3 }
    );
}

#[test]
fn test_sweep_rejects_inverted_range() {
    assert_eq!(
        sweep(6, 2, 1, 42, 64, Topology::AllPairs).unwrap_err(),
        SimulationError::InvalidRange { min_n: 6, max_n: 2 }
    );
}
