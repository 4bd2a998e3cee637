//! Run statistics and vote sampling
//!
//! After the last tick each agent casts one categorical vote sampled from
//! its final preference distribution; the run returns the vote histogram
//! together with averaged and per-agent preferences, rounded to 3 decimal
//! places for reporting.

use serde::{Deserialize, Serialize};

use crate::core::round::round3;
use crate::models::agent::AgentState;

/// Aggregate result of one simulation run
///
/// `vote_results[c]` is the number of agents that voted for alternative
/// `c`; the counts always sum to the population size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunStats {
    /// Population size
    pub total_agents: usize,

    /// Vote histogram over the three alternatives
    pub vote_results: [u64; 3],

    /// Population-averaged preferences, rounded to 3 decimals per component
    pub average_preferences: [f64; 3],

    /// Per-agent final preferences, rounded to 3 decimals per component
    pub agent_preferences: Vec<[f64; 3]>,
}

impl RunStats {
    /// Assemble run statistics from final agent states and a vote histogram
    ///
    /// The average is taken over the unrounded preferences in agent-index
    /// order, then rounded; per-agent rows are rounded independently.
    pub fn from_agents(agents: &[AgentState], vote_results: [u64; 3]) -> Self {
        let n = agents.len();
        let mut sums = [0.0f64; 3];
        for agent in agents {
            let prefs = agent.prefs();
            for c in 0..3 {
                sums[c] += prefs[c];
            }
        }
        let average_preferences = [
            round3(sums[0] / n as f64),
            round3(sums[1] / n as f64),
            round3(sums[2] / n as f64),
        ];
        let agent_preferences = agents
            .iter()
            .map(|agent| {
                let prefs = agent.prefs();
                [round3(prefs[0]), round3(prefs[1]), round3(prefs[2])]
            })
            .collect();
        Self {
            total_agents: n,
            vote_results,
            average_preferences,
            agent_preferences,
        }
    }
}

/// Pick a vote index from a preference distribution by inverse CDF
///
/// Returns 0 if `u <= p0`, 1 if `u <= p0 + p1`, otherwise 2. The boundary
/// comparisons are inclusive; changing them would change which votes a
/// given RNG stream produces.
///
/// # Example
/// ```
/// use opinion_simulator_core_rs::models::stats::sample_vote;
///
/// assert_eq!(sample_vote([0.5, 0.3, 0.2], 0.5), 0);
/// assert_eq!(sample_vote([0.5, 0.3, 0.2], 0.75), 1);
/// assert_eq!(sample_vote([0.5, 0.3, 0.2], 0.9), 2);
/// ```
pub fn sample_vote(prefs: [f64; 3], u: f64) -> usize {
    if u <= prefs[0] {
        0
    } else if u <= prefs[0] + prefs[1] {
        1
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_vote_boundaries_inclusive() {
        assert_eq!(sample_vote([0.2, 0.3, 0.5], 0.2), 0);
        assert_eq!(sample_vote([0.2, 0.3, 0.5], 0.5), 1);
        assert_eq!(sample_vote([0.2, 0.3, 0.5], 0.500001), 2);
    }

    #[test]
    fn test_sample_vote_degenerate_distribution() {
        assert_eq!(sample_vote([1.0, 0.0, 0.0], 0.999), 0);
        assert_eq!(sample_vote([0.0, 0.0, 1.0], 0.001), 2);
    }

    #[test]
    fn test_from_agents_rounds_and_averages() {
        let agents = vec![
            AgentState::new(0.5, 0.5, 1.0),
            AgentState::new(0.5, 0.5, 0.0),
        ];
        let stats = RunStats::from_agents(&agents, [1, 1, 0]);
        assert_eq!(stats.total_agents, 2);
        assert_eq!(stats.average_preferences, [0.5, 0.5, 0.0]);
        assert_eq!(stats.agent_preferences.len(), 2);
        assert_eq!(stats.agent_preferences[0], [1.0, 0.0, 0.0]);
    }
}
