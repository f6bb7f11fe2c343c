//! Address resolution boundary.
//!
//! Geocoding itself is an external service; this module only defines the
//! [`Geocoder`] capability and the all-or-nothing batch semantics used to
//! build a [`Route`](crate::models::Route) from addresses.

mod batch;

pub use batch::{resolve, resolve_all, Geocoder, ResolutionError};
