//! Geodesic distance between coordinates.
//!
//! Provides the default WGS84 [`distance`] function and the [`Metric`] trait
//! used to plug alternative distance functions into route scoring.

mod geodesic;

pub use geodesic::{distance, Haversine, Metric, Vincenty};
