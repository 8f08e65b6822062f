//! # Batch Scheduler
//!
//! Drives one end-to-end reputation run: extract candidates, process them
//! in fixed-size groups with bounded concurrency, and publish a state
//! snapshot after every group boundary.
//!
//! A single control task owns the [`RunState`] for the whole run; worker
//! tasks only ever return their own [`Outcome`], so no locking is needed.
//! Nothing that happens to an individual item can abort the run: invalid
//! tokens, provider failures and even panicked worker tasks all collapse
//! into `Outcome::Failure` entries plus aggregate error strings.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use ipvet_common::config::Config;
use ipvet_common::reputation::Outcome;

use crate::extract;
use crate::lookup::ReputationProvider;

/// Reason attached to tokens that fail strict validation.
pub const INVALID_FORMAT_REASON: &str = "Invalid IP Format";

/// Message reported when extraction finds nothing to look up.
pub const NO_CANDIDATES_MSG: &str = "No valid IP addresses found in the input";

/// Read-only view of a run, published once per group boundary and once for
/// an empty run. The render side never sees a partially-processed group.
#[derive(Clone, Debug)]
pub struct RunSnapshot {
    pub total: usize,
    pub completed: usize,
    /// Percentage in 0..=100, unrounded. Monotonically non-decreasing
    /// within a run and exactly 100.0 once the run is done.
    pub progress: f64,
    pub outcomes: Vec<Outcome>,
    pub errors: Vec<String>,
}

/// Per-run accumulator, confined to the scheduler's control task.
#[derive(Debug)]
struct RunState {
    total: usize,
    outcomes: Vec<Outcome>,
    errors: Vec<String>,
    progress: f64,
}

impl RunState {
    fn new(total: usize) -> Self {
        Self {
            total,
            outcomes: Vec::with_capacity(total),
            errors: Vec::new(),
            progress: 0.0,
        }
    }

    /// Appends one finished group, index-aligned with its input slice, and
    /// derives the per-item error strings and the new progress value.
    fn absorb_group(&mut self, group: Vec<Outcome>) {
        for outcome in group {
            if let Outcome::Failure { ip, reason } = &outcome {
                self.errors.push(format!("Error processing {ip}: {reason}"));
            }
            self.outcomes.push(outcome);
        }
        debug_assert!(self.outcomes.len() <= self.total);

        let completed = self.outcomes.len() as f64;
        self.progress = (completed / self.total as f64 * 100.0).min(100.0);
    }

    /// Pins progress to exactly 100, regardless of rounding.
    fn finish(&mut self) {
        self.progress = 100.0;
    }

    fn snapshot(&self) -> RunSnapshot {
        RunSnapshot {
            total: self.total,
            completed: self.outcomes.len(),
            progress: self.progress,
            outcomes: self.outcomes.clone(),
            errors: self.errors.clone(),
        }
    }
}

/// Orchestrates reputation runs against a [`ReputationProvider`].
///
/// Group size and inter-group delay come from [`Config`]; a zero delay
/// disables pacing entirely, which is how tests run.
pub struct BatchScheduler {
    provider: Arc<dyn ReputationProvider>,
    batch_size: usize,
    batch_delay: Duration,
}

impl BatchScheduler {
    pub fn new(provider: Arc<dyn ReputationProvider>, config: &Config) -> Self {
        Self {
            provider,
            batch_size: config.batch_size.max(1),
            batch_delay: config.batch_delay,
        }
    }

    /// Executes one run over `input` and returns the final snapshot.
    ///
    /// Intermediate snapshots are sent on `events` after each group; a
    /// dropped receiver is tolerated and the run completes regardless.
    pub async fn run(&self, input: &str, events: &UnboundedSender<RunSnapshot>) -> RunSnapshot {
        let candidates = extract::extract_candidates(input);

        if candidates.is_empty() {
            let mut state = RunState::new(0);
            state.errors.push(NO_CANDIDATES_MSG.to_string());
            state.finish();
            let snapshot = state.snapshot();
            let _ = events.send(snapshot.clone());
            return snapshot;
        }

        debug!(
            "processing {} candidates in groups of {}",
            candidates.len(),
            self.batch_size
        );

        let mut state = RunState::new(candidates.len());
        let group_count = candidates.len().div_ceil(self.batch_size);

        for (index, group) in candidates.chunks(self.batch_size).enumerate() {
            let (outcomes, batch_errors) = self.run_group(group).await;
            state.absorb_group(outcomes);
            state.errors.extend(batch_errors);

            let last = index + 1 == group_count;
            if last {
                state.finish();
            }
            let _ = events.send(state.snapshot());

            if !last && !self.batch_delay.is_zero() {
                tokio::time::sleep(self.batch_delay).await;
            }
        }

        state.snapshot()
    }

    /// Runs every item of one group concurrently and reassembles the
    /// results back into the group's input order.
    ///
    /// A worker that fails to complete (a panic, in practice) still yields
    /// a `Failure` for its slot so the 1:1 token/outcome pairing holds,
    /// plus one aggregate batch error string.
    async fn run_group(&self, group: &[String]) -> (Vec<Outcome>, Vec<String>) {
        let handles: Vec<JoinHandle<Outcome>> = group
            .iter()
            .map(|ip| {
                let provider = Arc::clone(&self.provider);
                let ip = ip.clone();
                tokio::spawn(async move { check_one(provider, ip).await })
            })
            .collect();

        let mut outcomes = Vec::with_capacity(group.len());
        let mut batch_errors = Vec::new();

        for (ip, handle) in group.iter().zip(handles) {
            match handle.await {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    warn!("lookup task for {ip} did not complete: {e}");
                    batch_errors.push(format!("Batch processing error: {e}"));
                    outcomes.push(Outcome::Failure {
                        ip: ip.clone(),
                        reason: format!("task failed: {e}"),
                    });
                }
            }
        }

        (outcomes, batch_errors)
    }
}

/// Validates one token and, if it passes, performs the single lookup
/// attempt. Always produces an `Outcome`, never an error.
async fn check_one(provider: Arc<dyn ReputationProvider>, ip: String) -> Outcome {
    if !extract::is_strict_ipv4(&ip) {
        return Outcome::Failure {
            ip,
            reason: INVALID_FORMAT_REASON.to_string(),
        };
    }

    match provider.check(&ip).await {
        Ok(record) => Outcome::Success(record),
        Err(e) => Outcome::Failure {
            ip,
            reason: e.to_string(),
        },
    }
}
