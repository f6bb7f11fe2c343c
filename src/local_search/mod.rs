//! Stochastic local search over open-path routes.
//!
//! - [`optimize`] — one-call entry point
//! - [`LocalSearch`] — the underlying state machine
//! - [`SearchConfig`] — stopping bounds and acceptance policy

mod config;
mod engine;
mod types;

pub use config::SearchConfig;
pub use engine::{optimize, LocalSearch};
pub use types::{OptimizationResult, SearchState, StopReason};
