//! Engine states and results.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::models::Route;

/// Lifecycle of a [`LocalSearch`](super::LocalSearch). `Converged` and
/// `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchState {
    Initialized,
    Searching,
    Converged,
    Failed,
}

impl SearchState {
    /// Returns `true` for `Converged` and `Failed`.
    pub fn is_terminal(self) -> bool {
        matches!(self, SearchState::Converged | SearchState::Failed)
    }
}

/// Why a search converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// `max_iterations` candidates were evaluated.
    IterationBudget,
    /// `no_improvement_limit` consecutive iterations without a new best.
    NoImprovement,
    /// The wall-clock limit elapsed.
    TimeLimit,
    /// The cancellation flag was raised.
    Cancelled,
    /// Fewer than two interior stops; every ordering is the same.
    NothingToPermute,
}

/// Outcome of an optimization run.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best route observed during the run (the input route on early failure).
    pub route: Route,

    /// Length of `route` in meters.
    pub length: f64,

    /// Length of the input route in meters.
    pub initial_length: f64,

    /// Number of candidates evaluated.
    pub iterations_run: usize,

    /// Terminal state reached.
    pub final_state: SearchState,

    /// Set when `final_state` is `Converged`.
    pub stop_reason: Option<StopReason>,

    /// Set when `final_state` is `Failed`.
    pub failure: Option<Error>,

    /// Number of accepted candidates (including improvements).
    pub accepted_moves: usize,

    /// Number of candidates strictly shorter than the route they replaced.
    pub improving_moves: usize,

    /// Best length sampled at regular intervals.
    pub length_history: Vec<f64>,
}

impl OptimizationResult {
    /// Relative improvement over the input, in [0, 1].
    pub fn improvement(&self) -> f64 {
        if self.initial_length > 0.0 {
            (self.initial_length - self.length) / self.initial_length
        } else {
            0.0
        }
    }
}
