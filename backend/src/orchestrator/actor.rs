//! Actor scheduler
//!
//! One worker thread per agent plus the coordinator (the simulation's main
//! task). Each tick the coordinator snapshots the population into a shared
//! read-only store, hands every worker the pairs it owns, and blocks until
//! all workers have reported. Reports may arrive in any order; the
//! coordinator reassembles them into pair-list order before reducing, so
//! the result is identical to the batched scheduler's.
//!
//! Worker state machine: Idle → Computing → Reported → Updating → Idle.
//! Coordinator: Dispatching → AwaitingReports → Reducing → Broadcasting.
//! The per-tick barrier is the coordinator's wait for all reports: no
//! worker sees tick `t + 1` before every contribution of tick `t` has been
//! merged.

use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::debug;

use crate::models::agent::AgentState;
use crate::topology::Pair;

use super::engine::{PairOutcome, SimulationError};

/// Coordinator-to-worker messages
enum WorkerMsg {
    /// Begin a tick: read the snapshot, evaluate the owned pairs, report
    TickStart {
        snapshot: Arc<Vec<AgentState>>,
        pairs: Vec<Pair>,
    },
    /// Adopt the reduced preferences for the tick just merged
    Update { prefs: [f64; 3] },
    /// Run is over; exit the worker loop
    Finish,
}

/// One worker's per-tick report
struct WorkerReport {
    worker: usize,
    outcomes: Vec<PairOutcome>,
}

/// Worker pool handle owned by the coordinator
pub(crate) struct ActorPool {
    inboxes: Vec<Sender<WorkerMsg>>,
    reports: Receiver<WorkerReport>,
    handles: Vec<JoinHandle<()>>,
}

impl ActorPool {
    /// Spawn one worker per agent
    pub(crate) fn spawn(agents: &[AgentState]) -> Self {
        let (report_tx, report_rx) = channel();
        let mut inboxes = Vec::with_capacity(agents.len());
        let mut handles = Vec::with_capacity(agents.len());
        for (index, agent) in agents.iter().enumerate() {
            let (inbox_tx, inbox_rx) = channel();
            let reports = report_tx.clone();
            let state = *agent;
            inboxes.push(inbox_tx);
            handles.push(thread::spawn(move || {
                worker_loop(index, state, inbox_rx, reports)
            }));
        }
        debug!("actor pool started with {} workers", agents.len());
        Self {
            inboxes,
            reports: report_rx,
            handles,
        }
    }

    /// Run one tick: dispatch, await all reports, reassemble in pair order
    ///
    /// A worker that died mid-tick surfaces as `WorkerFailure`; a report
    /// that does not cover exactly the dispatched pairs surfaces as
    /// `InternalInvariant`.
    pub(crate) fn run_tick(
        &self,
        snapshot: Arc<Vec<AgentState>>,
        pairs: &[Pair],
    ) -> Result<Vec<PairOutcome>, SimulationError> {
        let workers = self.inboxes.len();

        // Dispatching: each worker owns the pairs whose lower index is its own.
        let mut owned: Vec<Vec<Pair>> = vec![Vec::new(); workers];
        for &pair in pairs {
            owned[pair.i].push(pair);
        }
        for (inbox, pairs) in self.inboxes.iter().zip(owned) {
            inbox
                .send(WorkerMsg::TickStart {
                    snapshot: Arc::clone(&snapshot),
                    pairs,
                })
                .map_err(|_| SimulationError::WorkerFailure("worker hung up".to_string()))?;
        }

        // AwaitingReports: the barrier. All workers report before reducing.
        let mut by_pair: HashMap<Pair, PairOutcome> = HashMap::with_capacity(pairs.len());
        for _ in 0..workers {
            let report = self.reports.recv().map_err(|_| {
                SimulationError::WorkerFailure("worker died before reporting".to_string())
            })?;
            debug!(
                "worker {} reported {} outcomes",
                report.worker,
                report.outcomes.len()
            );
            for outcome in report.outcomes {
                by_pair.insert(outcome.pair, outcome);
            }
        }

        // Reassemble into pair-list order so the reduction adds in the same
        // total order as the batched scheduler.
        pairs
            .iter()
            .map(|pair| {
                by_pair.remove(pair).ok_or_else(|| {
                    SimulationError::InternalInvariant(format!(
                        "missing outcome for pair ({}, {})",
                        pair.i, pair.j
                    ))
                })
            })
            .collect()
    }

    /// Broadcast the reduced preferences of the tick to every worker
    pub(crate) fn broadcast_update(&self, agents: &[AgentState]) -> Result<(), SimulationError> {
        for (inbox, agent) in self.inboxes.iter().zip(agents) {
            inbox
                .send(WorkerMsg::Update {
                    prefs: agent.prefs(),
                })
                .map_err(|_| SimulationError::WorkerFailure("worker hung up".to_string()))?;
        }
        Ok(())
    }
}

impl Drop for ActorPool {
    fn drop(&mut self) {
        for inbox in &self.inboxes {
            // A dead worker already disconnected; nothing to tell it.
            let _ = inbox.send(WorkerMsg::Finish);
        }
        self.inboxes.clear();
        for handle in self.handles.drain(..) {
            let _ = handle.join();
        }
    }
}

/// Worker loop: evaluate owned pairs against each tick's snapshot
///
/// The worker keeps its own agent state current via `Update` messages and
/// uses it for its side of every dialogue; partners are read from the
/// snapshot. The two sources agree by construction, the coordinator pushes
/// exactly the values it snapshots.
fn worker_loop(
    index: usize,
    mut state: AgentState,
    inbox: Receiver<WorkerMsg>,
    reports: Sender<WorkerReport>,
) {
    while let Ok(msg) = inbox.recv() {
        match msg {
            WorkerMsg::TickStart { snapshot, pairs } => {
                let outcomes = pairs
                    .iter()
                    .map(|&pair| {
                        debug_assert_eq!(pair.i, index, "worker received a pair it does not own");
                        let (left, right) = crate::dialogue::dialogue(&state, &snapshot[pair.j]);
                        PairOutcome {
                            pair,
                            left,
                            right,
                        }
                    })
                    .collect();
                if reports
                    .send(WorkerReport {
                        worker: index,
                        outcomes,
                    })
                    .is_err()
                {
                    break; // coordinator is gone
                }
            }
            WorkerMsg::Update { prefs } => state.replace_prefs(prefs),
            WorkerMsg::Finish => break,
        }
    }
}
