//! Error types.

use thiserror::Error as ThisError;

/// Errors raised by the optimization core.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// Latitude outside [-90, 90], longitude outside [-180, 180], or non-finite.
    #[error("invalid coordinate: lat={latitude}, lng={longitude}")]
    InvalidCoordinate { latitude: f64, longitude: f64 },

    /// A route needs at least two stops to be optimized.
    #[error("insufficient stops: need at least 2, got {count}")]
    InsufficientStops { count: usize },

    /// A random source was asked for an integer in an empty range.
    #[error("invalid range: low={low} > high={high}")]
    InvalidRange { low: usize, high: usize },

    /// Search configuration rejected by [`SearchConfig::validate`](crate::local_search::SearchConfig::validate).
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// A metric produced a NaN or infinite leg length during search.
    #[error("non-finite route length: {length}")]
    NonFiniteLength { length: f64 },
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }
}
