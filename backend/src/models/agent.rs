//! Agent model
//!
//! Represents one member of the simulated population. Each agent has:
//! - Resistance `rho` (how strongly it keeps its own choice)
//! - Persuasion `pi` (how strongly it sways a counterpart)
//! - A probability distribution `prefs` over the three alternatives
//!
//! CRITICAL: `rho` and `pi` are immutable after creation; `prefs` is
//! replaced wholesale at the end of each tick and at no other time.

use serde::{Deserialize, Serialize};

/// One agent's state: two fixed traits and a preference distribution
///
/// # Example
/// ```
/// use opinion_simulator_core_rs::AgentState;
///
/// let agent = AgentState::new(0.4, 0.7, 0.25);
/// assert_eq!(agent.prefs(), [0.25, 0.75, 0.0]);
/// assert_eq!(agent.rho(), 0.4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// Resistance to changing the current choice, in [0, 1]
    rho: f64,

    /// Persuasive pressure exerted on dialogue counterparts, in [0, 1]
    pi: f64,

    /// Probability distribution over the three alternatives
    prefs: [f64; 3],
}

impl AgentState {
    /// Create a new agent
    ///
    /// The initial distribution is `[u, 1 - u, 0]`: all probability mass
    /// sits on the first two alternatives, split by the draw `u`. The third
    /// alternative only ever gains mass through dialogue.
    ///
    /// # Arguments
    /// * `rho` - Resistance in [0, 1]
    /// * `pi` - Persuasion in [0, 1]
    /// * `u` - Uniform draw in [0, 1) splitting the initial mass
    ///
    /// # Example
    /// ```
    /// use opinion_simulator_core_rs::AgentState;
    ///
    /// let agent = AgentState::new(0.5, 0.5, 0.0);
    /// assert_eq!(agent.prefs(), [0.0, 1.0, 0.0]);
    /// ```
    pub fn new(rho: f64, pi: f64, u: f64) -> Self {
        assert!((0.0..=1.0).contains(&rho), "rho must be in [0, 1]");
        assert!((0.0..=1.0).contains(&pi), "pi must be in [0, 1]");
        assert!((0.0..=1.0).contains(&u), "u must be in [0, 1]");
        Self {
            rho,
            pi,
            prefs: [u, 1.0 - u, 0.0],
        }
    }

    /// Get resistance
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// Get persuasion
    pub fn pi(&self) -> f64 {
        self.pi
    }

    /// Get the current preference distribution
    pub fn prefs(&self) -> [f64; 3] {
        self.prefs
    }

    /// Replace the preference distribution wholesale
    ///
    /// Called exactly once per agent per tick, after all of the tick's
    /// dialogue contributions have been averaged. `rho` and `pi` are
    /// untouched.
    ///
    /// # Example
    /// ```
    /// use opinion_simulator_core_rs::AgentState;
    ///
    /// let mut agent = AgentState::new(0.5, 0.5, 1.0);
    /// agent.replace_prefs([0.2, 0.3, 0.5]);
    /// assert_eq!(agent.prefs(), [0.2, 0.3, 0.5]);
    /// ```
    pub fn replace_prefs(&mut self, prefs: [f64; 3]) {
        debug_assert!(
            prefs.iter().all(|p| *p >= 0.0),
            "preference components must be non-negative"
        );
        self.prefs = prefs;
    }
}
