//! Orchestrator Engine
//!
//! Main simulation loop integrating all components:
//! - Agent initialization (deterministic RNG draws in index order)
//! - Pair generation (all-pairs or random k-matching)
//! - Dialogue scheduling (batched chunks or per-agent actors)
//! - Tick reduction (per-agent averaging of dialogue contributions)
//! - Vote sampling and final statistics
//!
//! # Architecture
//!
//! ```text
//! For each tick t:
//! 1. Generate the pair list for (topology, n, seed, t)
//! 2. Snapshot agents (read-only for workers)
//! 3. Evaluate dialogue over all pairs (batched or actor scheduler)
//! 4. Reduce: average contributions per agent, carry forward loners
//! 5. Cast one vote per agent (only the last tick's histogram is kept)
//! ```
//!
//! # Determinism
//!
//! All randomness flows through one seeded LCG consumed on the main task:
//! three draws per agent at initialization, one per agent for the initial
//! vote, and one per agent after every tick. Workers never touch it. The
//! same `(n, ticks, seed, topology)` therefore produces bit-identical
//! output from both schedulers and from any chunk size.
//!
//! # Example
//!
//! ```rust
//! use opinion_simulator_core_rs::orchestrator::{run, Topology};
//!
//! let stats = run(10, 2, 42, 256, Topology::AllPairs).unwrap();
//! assert_eq!(stats.total_agents, 10);
//! assert_eq!(stats.vote_results.iter().sum::<u64>(), 10);
//! ```

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info};
use thiserror::Error;

use crate::core::time::TickClock;
use crate::models::agent::AgentState;
use crate::models::stats::{sample_vote, RunStats};
use crate::rng::Lcg;
use crate::topology::{generate_pairs, Pair, Topology};

use super::{actor::ActorPool, batched};

// ============================================================================
// Configuration Types
// ============================================================================

/// Scheduler variant executing a tick's pair list
///
/// Both variants produce identical output for identical input; the actor
/// variant exists to exercise barrier synchronization and per-worker
/// partial reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerKind {
    /// Worker pool over contiguous pair chunks
    #[default]
    Batched,

    /// One worker per agent, barrier-synchronized ticks
    Actor,
}

/// Complete simulation configuration
///
/// # Fields
///
/// * `n` - Population size (at least 1)
/// * `ticks` - Number of simulation ticks (zero is a valid run)
/// * `seed` - Seed for deterministic random number generation
/// * `chunk` - Pairs per work item in the batched scheduler (positive)
/// * `topology` - Interaction topology for pair selection
/// * `scheduler` - Scheduler variant (batched unless stated otherwise)
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Population size
    pub n: usize,

    /// Ticks to simulate
    pub ticks: usize,

    /// RNG seed for deterministic simulation
    pub seed: i64,

    /// Batched-scheduler chunk size
    pub chunk: usize,

    /// Interaction topology
    pub topology: Topology,

    /// Scheduler variant
    pub scheduler: SchedulerKind,
}

impl SimConfig {
    /// Create a configuration with the default (batched) scheduler
    pub fn new(n: usize, ticks: usize, seed: i64, chunk: usize, topology: Topology) -> Self {
        Self {
            n,
            ticks,
            seed,
            chunk,
            topology,
            scheduler: SchedulerKind::default(),
        }
    }

    /// Validate raw integer arguments from an external front-end
    ///
    /// The typed API cannot express a negative tick or chunk count, so the
    /// CLI and FFI layers funnel their raw `i64` inputs through here to get
    /// the full error taxonomy before any work begins. `k` selects random
    /// k-matching; `None` selects all-pairs.
    ///
    /// # Example
    /// ```
    /// use opinion_simulator_core_rs::orchestrator::{SimConfig, SimulationError};
    ///
    /// let err = SimConfig::from_raw(10, -1, 42, 256, None).unwrap_err();
    /// assert_eq!(err, SimulationError::NegativeTicks(-1));
    /// ```
    pub fn from_raw(
        n: i64,
        ticks: i64,
        seed: i64,
        chunk: i64,
        k: Option<i64>,
    ) -> Result<Self, SimulationError> {
        if n < 1 {
            return Err(SimulationError::InvalidConfig(format!(
                "population must hold at least one agent, got {}",
                n
            )));
        }
        if ticks < 0 {
            return Err(SimulationError::NegativeTicks(ticks));
        }
        if chunk < 1 {
            return Err(SimulationError::NonPositiveChunk(chunk));
        }
        let topology = match k {
            None => Topology::AllPairs,
            Some(k) => {
                if k < 1 || k >= n {
                    return Err(SimulationError::InvalidTopology {
                        k: k as isize,
                        n: n as usize,
                    });
                }
                Topology::RandomMatch { k: k as usize }
            }
        };
        Ok(Self::new(
            n as usize,
            ticks as usize,
            seed,
            chunk as usize,
            topology,
        ))
    }
}

// ============================================================================
// Errors
// ============================================================================

/// Simulation error types
///
/// Argument errors are raised before any work begins; invariant and worker
/// errors abort the run and surface unmodified. There is no retry policy:
/// the simulation is deterministic and retrying would only reproduce the
/// same error.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimulationError {
    /// Configuration validation error outside the named sub-cases
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Random k-matching requires `1 <= k <= n - 1`
    #[error("invalid topology: k-matching requires 1 <= k <= n - 1, got k = {k} for n = {n}")]
    InvalidTopology { k: isize, n: usize },

    /// Sweep bounds must satisfy `2 <= min_n <= max_n`
    #[error("invalid range: sweep requires 2 <= min_n <= max_n, got [{min_n}, {max_n}]")]
    InvalidRange { min_n: i64, max_n: i64 },

    /// Chunk size must be positive
    #[error("chunk size must be positive, got {0}")]
    NonPositiveChunk(i64),

    /// Tick count must be non-negative
    #[error("tick count must be non-negative, got {0}")]
    NegativeTicks(i64),

    /// A bug: an internal invariant did not hold
    #[error("internal invariant violated: {0}")]
    InternalInvariant(String),

    /// A worker failed; partial state was discarded
    #[error("worker failure: {0}")]
    WorkerFailure(String),
}

// ============================================================================
// Per-pair outcome
// ============================================================================

/// One pair's dialogue output within a tick
///
/// `left` is the contribution to agent `pair.i`, `right` to agent `pair.j`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct PairOutcome {
    pub pair: Pair,
    pub left: [f64; 3],
    pub right: [f64; 3],
}

// ============================================================================
// Simulation
// ============================================================================

/// Main simulation owning agents, clock, and the RNG stream
///
/// Construction performs the deterministic initialization draws (three per
/// agent, then one initial vote per agent); `run` consumes the simulation
/// and returns the final statistics.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    agents: Vec<AgentState>,
    rng: Lcg,
    clock: TickClock,
    last_votes: [u64; 3],
}

impl Simulation {
    /// Create a new simulation from configuration
    ///
    /// Validates the configuration, then consumes `3n` uniforms to build
    /// the agents (`rho_i, pi_i, u_i` for each `i` in index order) and `n`
    /// more for the initial vote histogram. For a zero-tick run that
    /// histogram is the one reported.
    ///
    /// # Example
    ///
    /// ```rust
    /// use opinion_simulator_core_rs::orchestrator::{SimConfig, Simulation, Topology};
    ///
    /// let config = SimConfig::new(10, 0, 42, 256, Topology::AllPairs);
    /// let stats = Simulation::new(config).unwrap().run().unwrap();
    /// // No dialogue has occurred: the third alternative has no mass yet.
    /// assert!(stats.agent_preferences.iter().all(|p| p[2] == 0.0));
    /// ```
    pub fn new(config: SimConfig) -> Result<Self, SimulationError> {
        Self::validate_config(&config)?;

        let mut rng = Lcg::new(config.seed);
        let mut agents = Vec::with_capacity(config.n);
        for _ in 0..config.n {
            let (rho, next) = rng.uniform();
            rng = next;
            let (pi, next) = rng.uniform();
            rng = next;
            let (u, next) = rng.uniform();
            rng = next;
            agents.push(AgentState::new(rho, pi, u));
        }

        let clock = TickClock::new(config.ticks);
        let mut simulation = Self {
            config,
            agents,
            rng,
            clock,
            last_votes: [0; 3],
        };
        // Initial vote phase: the draws are consumed even when a longer run
        // will overwrite the histogram.
        simulation.cast_votes();
        Ok(simulation)
    }

    /// Validate configuration
    fn validate_config(config: &SimConfig) -> Result<(), SimulationError> {
        if config.n < 1 {
            return Err(SimulationError::InvalidConfig(
                "population must hold at least one agent".to_string(),
            ));
        }
        if config.chunk < 1 {
            return Err(SimulationError::NonPositiveChunk(config.chunk as i64));
        }
        if let Topology::RandomMatch { k } = config.topology {
            if k < 1 || k >= config.n {
                return Err(SimulationError::InvalidTopology {
                    k: k as isize,
                    n: config.n,
                });
            }
        }
        Ok(())
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get current tick number
    pub fn current_tick(&self) -> usize {
        self.clock.current_tick()
    }

    /// Get the configuration
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Get the agent population
    pub fn agents(&self) -> &[AgentState] {
        &self.agents
    }

    // ========================================================================
    // Tick Loop Implementation
    // ========================================================================

    /// Run the simulation to completion and return final statistics
    pub fn run(mut self) -> Result<RunStats, SimulationError> {
        info!(
            "run start: n = {}, ticks = {}, seed = {}, topology = {:?}, scheduler = {:?}",
            self.config.n,
            self.config.ticks,
            self.config.seed,
            self.config.topology,
            self.config.scheduler
        );
        match self.config.scheduler {
            SchedulerKind::Batched => self.run_batched(),
            SchedulerKind::Actor => self.run_actor(),
        }
    }

    fn run_batched(&mut self) -> Result<RunStats, SimulationError> {
        while !self.clock.is_complete() {
            let pairs = self.tick_pairs();
            let outcomes = batched::evaluate_pairs(&pairs, &self.agents, self.config.chunk);
            self.reduce_tick(&pairs, outcomes)?;
            self.cast_votes();
            self.clock.advance_tick();
        }
        Ok(self.final_stats())
    }

    fn run_actor(&mut self) -> Result<RunStats, SimulationError> {
        if self.config.ticks == 0 {
            return Ok(self.final_stats());
        }
        let pool = ActorPool::spawn(&self.agents);
        while !self.clock.is_complete() {
            let pairs = self.tick_pairs();
            let snapshot = Arc::new(self.agents.clone());
            let outcomes = pool.run_tick(snapshot, &pairs)?;
            self.reduce_tick(&pairs, outcomes)?;
            pool.broadcast_update(&self.agents)?;
            self.cast_votes();
            self.clock.advance_tick();
        }
        Ok(self.final_stats())
    }

    /// Generate the current tick's pair list
    fn tick_pairs(&self) -> Vec<Pair> {
        let tick = self.clock.current_tick();
        let pairs = generate_pairs(self.config.topology, self.config.n, self.config.seed, tick);
        debug!("tick {}: {} pairs", tick, pairs.len());
        pairs
    }

    /// Average each agent's dialogue contributions into its next preferences
    ///
    /// Agents with no partner this tick carry their preferences forward.
    /// The division uses the actual partner count; a fixed `n - 1` would be
    /// correct only for the all-pairs topology.
    fn reduce_tick(
        &mut self,
        pairs: &[Pair],
        outcomes: Vec<PairOutcome>,
    ) -> Result<(), SimulationError> {
        if outcomes.len() != pairs.len() {
            return Err(SimulationError::InternalInvariant(format!(
                "expected {} outcomes, got {}",
                pairs.len(),
                outcomes.len()
            )));
        }

        let mut sums = vec![[0.0f64; 3]; self.config.n];
        let mut counts = vec![0usize; self.config.n];
        for (outcome, pair) in outcomes.iter().zip(pairs) {
            if outcome.pair != *pair {
                return Err(SimulationError::InternalInvariant(format!(
                    "outcome for pair ({}, {}) arrived out of order",
                    outcome.pair.i, outcome.pair.j
                )));
            }
            for c in 0..3 {
                sums[pair.i][c] += outcome.left[c];
                sums[pair.j][c] += outcome.right[c];
            }
            counts[pair.i] += 1;
            counts[pair.j] += 1;
        }

        for (index, agent) in self.agents.iter_mut().enumerate() {
            if counts[index] > 0 {
                let count = counts[index] as f64;
                agent.replace_prefs([
                    sums[index][0] / count,
                    sums[index][1] / count,
                    sums[index][2] / count,
                ]);
            }
        }
        Ok(())
    }

    /// Cast one vote per agent, in agent-index order
    ///
    /// Consumes exactly `n` uniforms from the shared stream. The histogram
    /// replaces the previous tick's; only the last one is reported.
    fn cast_votes(&mut self) {
        let mut votes = [0u64; 3];
        for agent in &self.agents {
            let (u, next) = self.rng.uniform();
            self.rng = next;
            votes[sample_vote(agent.prefs(), u)] += 1;
        }
        self.last_votes = votes;
    }

    fn final_stats(&self) -> RunStats {
        RunStats::from_agents(&self.agents, self.last_votes)
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Run one simulation with the batched scheduler
///
/// # Example
///
/// ```rust
/// use opinion_simulator_core_rs::orchestrator::{run, Topology};
///
/// let stats = run(10, 1, 12345, 256, Topology::AllPairs).unwrap();
/// assert_eq!(stats.agent_preferences.len(), 10);
/// ```
pub fn run(
    n: usize,
    ticks: usize,
    seed: i64,
    chunk: usize,
    topology: Topology,
) -> Result<RunStats, SimulationError> {
    Simulation::new(SimConfig::new(n, ticks, seed, chunk, topology))?.run()
}

/// Run a population sweep, printing elapsed milliseconds per run
///
/// Invokes `run` for each `n` from `min_n` through `max_n` inclusive and
/// emits one integer of wall-clock milliseconds per line on standard
/// output, which is the interface benchmark drivers scrape.
pub fn sweep(
    min_n: usize,
    max_n: usize,
    ticks: usize,
    seed: i64,
    chunk: usize,
    topology: Topology,
) -> Result<Vec<RunStats>, SimulationError> {
    if min_n < 2 || max_n < min_n {
        return Err(SimulationError::InvalidRange {
            min_n: min_n as i64,
            max_n: max_n as i64,
        });
    }
    let mut results = Vec::with_capacity(max_n - min_n + 1);
    for n in min_n..=max_n {
        let started = Instant::now();
        let stats = run(n, ticks, seed, chunk, topology)?;
        println!("{}", started.elapsed().as_millis());
        results.push(stats);
    }
    Ok(results)
}

// ============================================================================
// Tests
// ============================================================================
