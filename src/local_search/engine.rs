//! Local search execution loop.
//!
//! # Algorithm
//!
//! Each iteration clones the current route, perturbs the clone, and scores
//! it. A strictly shorter candidate always replaces the current route. With
//! an acceptance temperature `T`, a candidate that is longer by `delta` is
//! accepted with probability `exp(-delta / T)` (Metropolis criterion) and
//! `T` decays geometrically. The best route seen so far is tracked
//! separately, so exploration never loses it.
//!
//! # Reference
//!
//! Kirkpatrick, S., Gelatt, C.D., Vecchi, M.P. (1983). "Optimization by
//! Simulated Annealing", *Science* 220(4598), 671-680.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::config::SearchConfig;
use super::types::{OptimizationResult, SearchState, StopReason};
use crate::distance::{Metric, Vincenty};
use crate::error::{Error, Result};
use crate::models::Route;
use crate::random::RandomSource;

const HISTORY_INTERVAL: usize = 100;

/// Optimizes a route with the default WGS84 metric.
///
/// Runs to completion on the caller's thread and returns the best route
/// observed. Never returns an error: failures are reported through
/// [`OptimizationResult::final_state`] and [`OptimizationResult::failure`],
/// with `route` holding the input (or the best valid route found before
/// the failure).
///
/// # Examples
///
/// ```
/// use u_openpath::local_search::{optimize, SearchConfig, SearchState};
/// use u_openpath::models::{Route, Stop};
/// use u_openpath::random::RngSource;
///
/// // Interior visited out of order along a line.
/// let route = Route::new(vec![
///     Stop::at("A", 0.0, 0.00).unwrap(),
///     Stop::at("C", 0.0, 0.02).unwrap(),
///     Stop::at("B", 0.0, 0.01).unwrap(),
///     Stop::at("D", 0.0, 0.03).unwrap(),
/// ]);
/// let result = optimize(route, &SearchConfig::default(), RngSource::seeded(42));
/// assert_eq!(result.final_state, SearchState::Converged);
/// assert_eq!(result.route.labels(), vec!["A", "B", "C", "D"]);
/// assert!(result.length < result.initial_length);
/// ```
pub fn optimize<R: RandomSource>(
    route: Route,
    config: &SearchConfig,
    rng: R,
) -> OptimizationResult {
    LocalSearch::new(route, config.clone(), rng).run()
}

/// Local search state machine over one route.
///
/// Owns the route for the whole run. Drive it with [`run`](Self::run), or
/// with [`start`](Self::start) and repeated [`step`](Self::step) calls when
/// the caller wants to interleave its own checks.
pub struct LocalSearch<R, M = Vincenty> {
    config: SearchConfig,
    metric: M,
    rng: R,
    state: SearchState,

    current: Route,
    current_length: f64,
    best: Route,
    best_length: f64,
    initial_length: f64,

    temperature: Option<f64>,
    iterations: usize,
    accepted_moves: usize,
    improving_moves: usize,
    no_improvement_streak: usize,
    length_history: Vec<f64>,

    stop_reason: Option<StopReason>,
    failure: Option<Error>,
    cancel: Option<Arc<AtomicBool>>,
    started_at: Option<Instant>,
}

impl<R: RandomSource> LocalSearch<R, Vincenty> {
    /// Creates an engine in the `Initialized` state using the WGS84 metric.
    pub fn new(route: Route, config: SearchConfig, rng: R) -> Self {
        Self::with_metric(route, config, rng, Vincenty)
    }
}

impl<R: RandomSource, M: Metric> LocalSearch<R, M> {
    /// Creates an engine that scores routes with `metric`.
    pub fn with_metric(route: Route, config: SearchConfig, rng: R, metric: M) -> Self {
        let initial_length = route.total_length_with(&metric);
        let temperature = config.acceptance_temperature;
        Self {
            config,
            metric,
            rng,
            state: SearchState::Initialized,
            best: route.clone(),
            current: route,
            current_length: initial_length,
            best_length: initial_length,
            initial_length,
            temperature,
            iterations: 0,
            accepted_moves: 0,
            improving_moves: 0,
            no_improvement_streak: 0,
            length_history: Vec::new(),
            stop_reason: None,
            failure: None,
            cancel: None,
            started_at: None,
        }
    }

    /// Attaches a cancellation flag, polled between iterations.
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    pub fn state(&self) -> SearchState {
        self.state
    }

    /// Best route observed so far.
    pub fn best(&self) -> &Route {
        &self.best
    }

    pub fn best_length(&self) -> f64 {
        self.best_length
    }

    /// Route the search is currently exploring from.
    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn current_length(&self) -> f64 {
        self.current_length
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Current acceptance temperature, `None` for greedy search.
    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn failure(&self) -> Option<&Error> {
        self.failure.as_ref()
    }

    /// Moves `Initialized` to `Searching`.
    ///
    /// Fails (and enters `Failed`) on an invalid configuration, a route with
    /// fewer than two stops, or a non-finite initial length. Routes with
    /// fewer than two interior stops converge immediately. Calling this in
    /// any other state does nothing except repeat a recorded failure.
    pub fn start(&mut self) -> Result<()> {
        if self.state != SearchState::Initialized {
            return match &self.failure {
                Some(e) => Err(e.clone()),
                None => Ok(()),
            };
        }

        if let Err(e) = self.check_startable() {
            self.fail(e.clone());
            return Err(e);
        }

        log::info!(
            "local_search.start: stops={} length_m={:.1} perturbation={:?} temperature={:?}",
            self.current.len(),
            self.initial_length,
            self.config.perturbation,
            self.temperature
        );

        self.state = SearchState::Searching;
        self.started_at = Some(Instant::now());
        self.length_history.push(self.best_length);

        if self.current.interior_len() < 2 {
            self.converge(StopReason::NothingToPermute);
        }
        Ok(())
    }

    fn check_startable(&self) -> Result<()> {
        self.config.validate()?;
        let count = self.current.len();
        if count < 2 {
            return Err(Error::InsufficientStops { count });
        }
        if !self.initial_length.is_finite() {
            return Err(Error::NonFiniteLength {
                length: self.initial_length,
            });
        }
        Ok(())
    }

    /// Evaluates one candidate, starting the search first if needed.
    ///
    /// Returns the state after the step. Terminal states are returned
    /// unchanged without doing any work.
    pub fn step(&mut self) -> Result<SearchState> {
        match self.state {
            SearchState::Initialized => self.start()?,
            SearchState::Searching => {}
            terminal => return Ok(terminal),
        }
        if self.state != SearchState::Searching {
            return Ok(self.state);
        }

        if let Some(reason) = self.stop_condition() {
            self.converge(reason);
            return Ok(self.state);
        }

        if let Err(e) = self.iterate() {
            self.fail(e.clone());
            return Err(e);
        }

        if let Some(reason) = self.stop_condition() {
            self.converge(reason);
        }
        Ok(self.state)
    }

    /// Runs until a terminal state and returns the result.
    pub fn run(mut self) -> OptimizationResult {
        while !self.state.is_terminal() {
            if self.step().is_err() {
                break;
            }
        }
        self.into_result()
    }

    /// Snapshot of the run so far as a result value.
    pub fn into_result(self) -> OptimizationResult {
        OptimizationResult {
            route: self.best,
            length: self.best_length,
            initial_length: self.initial_length,
            iterations_run: self.iterations,
            final_state: self.state,
            stop_reason: self.stop_reason,
            failure: self.failure,
            accepted_moves: self.accepted_moves,
            improving_moves: self.improving_moves,
            length_history: self.length_history,
        }
    }

    fn iterate(&mut self) -> Result<()> {
        let mut candidate = self.current.clone();
        self.config.perturbation.apply(&mut candidate, &mut self.rng)?;
        let candidate_length = self.measure(&candidate)?;
        self.iterations += 1;

        let delta = candidate_length - self.current_length;
        let accept = if delta < 0.0 {
            self.improving_moves += 1;
            true
        } else if let Some(t) = self.temperature {
            self.rng.unit_f64() < (-delta / t).exp()
        } else {
            false
        };

        if accept {
            self.current = candidate;
            self.current_length = candidate_length;
            self.accepted_moves += 1;
        }

        if self.current_length < self.best_length {
            log::debug!(
                "local_search.best: iter={} length_m={:.1}",
                self.iterations,
                self.current_length
            );
            self.best = self.current.clone();
            self.best_length = self.current_length;
            self.no_improvement_streak = 0;
        } else {
            self.no_improvement_streak += 1;
        }

        if let Some(t) = self.temperature.as_mut() {
            *t *= self.config.cooling_rate;
        }

        if self.iterations.is_multiple_of(HISTORY_INTERVAL) {
            self.length_history.push(self.best_length);
        }
        Ok(())
    }

    fn measure(&self, route: &Route) -> Result<f64> {
        let length = route.total_length_with(&self.metric);
        if !length.is_finite() {
            return Err(Error::NonFiniteLength { length });
        }
        Ok(length)
    }

    fn stop_condition(&self) -> Option<StopReason> {
        if let Some(flag) = &self.cancel {
            if flag.load(Ordering::Relaxed) {
                return Some(StopReason::Cancelled);
            }
        }
        if let (Some(limit), Some(started)) = (self.config.time_limit, self.started_at) {
            if started.elapsed() >= limit {
                return Some(StopReason::TimeLimit);
            }
        }
        if self.config.max_iterations > 0 && self.iterations >= self.config.max_iterations {
            return Some(StopReason::IterationBudget);
        }
        if self.config.no_improvement_limit > 0
            && self.no_improvement_streak >= self.config.no_improvement_limit
        {
            return Some(StopReason::NoImprovement);
        }
        None
    }

    fn converge(&mut self, reason: StopReason) {
        self.state = SearchState::Converged;
        self.stop_reason = Some(reason);
        if self.length_history.last() != Some(&self.best_length) {
            self.length_history.push(self.best_length);
        }
        log::info!(
            "local_search.converged: reason={reason:?} iters={} accepted={} length_m={:.1} initial_m={:.1}",
            self.iterations,
            self.accepted_moves,
            self.best_length,
            self.initial_length
        );
    }

    fn fail(&mut self, error: Error) {
        log::warn!(
            "local_search.failed: iters={} error={error}",
            self.iterations
        );
        self.state = SearchState::Failed;
        self.failure = Some(error);
    }
}
