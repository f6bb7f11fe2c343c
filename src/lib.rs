//! # u-openpath
//!
//! Open-path traveling salesman optimization: given waypoints with a fixed
//! first and last stop, reorder the intermediate stops to minimize total
//! geodesic travel distance.
//!
//! ## Modules
//!
//! - [`models`] — Domain model types (Coordinate, Stop, Route)
//! - [`distance`] — WGS84 geodesic distance and the pluggable `Metric` trait
//! - [`random`] — Injectable uniform random source
//! - [`perturbation`] — Interior swap and shuffle operators
//! - [`local_search`] — Local search engine with optional annealing acceptance
//! - [`geocode`] — Fail-fast address resolution boundary
//! - [`error`] — Error taxonomy

pub mod distance;
pub mod error;
pub mod geocode;
pub mod local_search;
pub mod models;
pub mod perturbation;
pub mod random;

pub use error::{Error, Result};
