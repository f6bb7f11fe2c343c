//! Search configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::perturbation::Perturbation;

/// Configuration for the local search engine.
///
/// The run stops at the first bound reached: the iteration budget, the
/// no-improvement streak, or the wall-clock limit. A zero count disables
/// that bound, but at least one bound must be active.
///
/// Setting [`acceptance_temperature`](Self::acceptance_temperature) turns
/// on Metropolis acceptance of worse candidates; the temperature then decays
/// geometrically by [`cooling_rate`](Self::cooling_rate) every iteration.
///
/// # Examples
///
/// ```
/// use u_openpath::local_search::SearchConfig;
/// use u_openpath::perturbation::Perturbation;
///
/// let config = SearchConfig::default()
///     .with_max_iterations(5_000)
///     .with_no_improvement_limit(500)
///     .with_acceptance_temperature(250.0)
///     .with_perturbation(Perturbation::Mixed);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Maximum number of candidate evaluations. 0 = no limit.
    pub max_iterations: usize,

    /// Stop after this many consecutive iterations without a new best. 0 = no limit.
    pub no_improvement_limit: usize,

    /// Initial temperature (meters) for probabilistic acceptance of worse
    /// candidates. `None` = strictly greedy.
    pub acceptance_temperature: Option<f64>,

    /// Per-iteration geometric temperature decay in (0, 1]. 1.0 keeps the
    /// temperature constant.
    pub cooling_rate: f64,

    /// Neighborhood used to derive candidates.
    pub perturbation: Perturbation,

    /// Wall-clock budget, checked between iterations.
    pub time_limit: Option<Duration>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            no_improvement_limit: 1_000,
            acceptance_temperature: None,
            cooling_rate: 0.995,
            perturbation: Perturbation::Swap,
            time_limit: None,
        }
    }
}

impl SearchConfig {
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    pub fn with_no_improvement_limit(mut self, n: usize) -> Self {
        self.no_improvement_limit = n;
        self
    }

    pub fn with_acceptance_temperature(mut self, t: f64) -> Self {
        self.acceptance_temperature = Some(t);
        self
    }

    pub fn with_cooling_rate(mut self, rate: f64) -> Self {
        self.cooling_rate = rate;
        self
    }

    pub fn with_perturbation(mut self, perturbation: Perturbation) -> Self {
        self.perturbation = perturbation;
        self
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.max_iterations == 0 && self.no_improvement_limit == 0 && self.time_limit.is_none()
        {
            return Err(Error::invalid_config(
                "at least one of max_iterations, no_improvement_limit or time_limit must be set",
            ));
        }
        if let Some(t) = self.acceptance_temperature {
            if !t.is_finite() || t <= 0.0 {
                return Err(Error::invalid_config(format!(
                    "acceptance_temperature must be positive and finite, got {t}"
                )));
            }
        }
        if !(self.cooling_rate > 0.0 && self.cooling_rate <= 1.0) {
            return Err(Error::invalid_config(format!(
                "cooling_rate must be in (0, 1], got {}",
                self.cooling_rate
            )));
        }
        Ok(())
    }
}
