//! Address resolution boundary.

use thiserror::Error as ThisError;

use crate::error::Error;
use crate::models::{Coordinate, Route, Stop};

/// Why an address could not be turned into a stop.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum ResolutionError {
    /// The geocoder returned no match.
    #[error("no location found for {address:?}")]
    NotFound { address: String },

    /// The geocoder could not be reached or errored.
    #[error("geocoder unavailable for {address:?}: {reason}")]
    Unavailable { address: String, reason: String },

    /// The geocoder answered with an out-of-range coordinate.
    #[error("geocoder returned an invalid coordinate for {address:?}: {source}")]
    InvalidCoordinate { address: String, source: Error },
}

impl ResolutionError {
    pub fn not_found(address: impl Into<String>) -> Self {
        Self::NotFound {
            address: address.into(),
        }
    }

    pub fn unavailable(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// The address that failed.
    pub fn address(&self) -> &str {
        match self {
            Self::NotFound { address }
            | Self::Unavailable { address, .. }
            | Self::InvalidCoordinate { address, .. } => address,
        }
    }
}

/// Maps free-text addresses to coordinates.
///
/// Closures `Fn(&str) -> Result<(f64, f64), ResolutionError>` returning
/// `(latitude, longitude)` implement this trait.
pub trait Geocoder {
    /// Returns the best match for `address` as `(latitude, longitude)` degrees.
    fn locate(&self, address: &str) -> Result<(f64, f64), ResolutionError>;
}

impl<F> Geocoder for F
where
    F: Fn(&str) -> Result<(f64, f64), ResolutionError>,
{
    fn locate(&self, address: &str) -> Result<(f64, f64), ResolutionError> {
        self(address)
    }
}

/// Resolves one address into a stop labelled with the address text.
pub fn resolve<G: Geocoder + ?Sized>(
    geocoder: &G,
    address: &str,
) -> Result<Stop, ResolutionError> {
    let (latitude, longitude) = geocoder.locate(address)?;
    let coordinate =
        Coordinate::new(latitude, longitude).map_err(|source| ResolutionError::InvalidCoordinate {
            address: address.to_string(),
            source,
        })?;
    Ok(Stop::new(address, coordinate))
}

/// Resolves every address, in order, into a route.
///
/// All or nothing: the first failure aborts the batch and is returned, so a
/// caller never sees a partially populated route. An empty input yields an
/// empty route, which is distinct from a failure.
///
/// # Examples
///
/// ```
/// use u_openpath::geocode::{resolve_all, ResolutionError};
///
/// let geocoder = |address: &str| match address {
///     "Home" => Ok((52.52, 13.40)),
///     "Office" => Ok((52.50, 13.45)),
///     other => Err(ResolutionError::not_found(other)),
/// };
///
/// let route = resolve_all(&geocoder, &["Home", "Office"]).unwrap();
/// assert_eq!(route.labels(), vec!["Home", "Office"]);
///
/// let err = resolve_all(&geocoder, &["Home", "Atlantis"]).unwrap_err();
/// assert_eq!(err.address(), "Atlantis");
///
/// assert!(resolve_all(&geocoder, &[] as &[&str]).unwrap().is_empty());
/// ```
pub fn resolve_all<G, S>(geocoder: &G, addresses: &[S]) -> Result<Route, ResolutionError>
where
    G: Geocoder + ?Sized,
    S: AsRef<str>,
{
    let mut stops = Vec::with_capacity(addresses.len());
    for address in addresses {
        let address = address.as_ref();
        match resolve(geocoder, address) {
            Ok(stop) => {
                log::debug!(
                    "geocode.resolved: address={address:?} lat={} lng={}",
                    stop.coordinate().latitude(),
                    stop.coordinate().longitude()
                );
                stops.push(stop);
            }
            Err(e) => {
                log::warn!(
                    "geocode.batch_failed: resolved={}/{} error={e}",
                    stops.len(),
                    addresses.len()
                );
                return Err(e);
            }
        }
    }
    Ok(Route::new(stops))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn lookup(address: &str) -> Result<(f64, f64), ResolutionError> {
        match address {
            "A" => Ok((1.0, 1.0)),
            "B" => Ok((2.0, 2.0)),
            "C" => Ok((3.0, 3.0)),
            "broken" => Ok((123.0, 0.0)),
            "offline" => Err(ResolutionError::unavailable(address, "timeout")),
            other => Err(ResolutionError::not_found(other)),
        }
    }

    #[test]
    fn test_resolve_all_in_order() {
        let route = resolve_all(&lookup, &["C", "A", "B"]).expect("resolves");
        assert_eq!(route.labels(), vec!["C", "A", "B"]);
        assert_eq!(route.stops()[1].coordinate().latitude(), 1.0);
    }

    #[test]
    fn test_resolve_all_empty_is_ok() {
        let none: [String; 0] = [];
        let route = resolve_all(&lookup, &none).expect("empty batch");
        assert!(route.is_empty());
    }

    #[test]
    fn test_resolve_all_fails_fast() {
        let calls = RefCell::new(Vec::new());
        let tracking = |address: &str| {
            calls.borrow_mut().push(address.to_string());
            lookup(address)
        };
        let err = resolve_all(&tracking, &["A", "missing", "B"]).expect_err("must fail");
        assert_eq!(err, ResolutionError::not_found("missing"));
        assert_eq!(*calls.borrow(), vec!["A", "missing"]);
    }

    #[test]
    fn test_unavailable_propagates() {
        let err = resolve_all(&lookup, &["A", "offline"]).expect_err("must fail");
        assert!(matches!(err, ResolutionError::Unavailable { .. }));
        assert_eq!(err.address(), "offline");
    }

    #[test]
    fn test_invalid_coordinate_from_geocoder() {
        let err = resolve(&lookup, "broken").expect_err("out of range");
        assert!(matches!(
            err,
            ResolutionError::InvalidCoordinate {
                source: Error::InvalidCoordinate { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_owned_strings() {
        let addresses = vec!["A".to_string(), "B".to_string()];
        let route = resolve_all(&lookup, &addresses).expect("resolves");
        assert_eq!(route.len(), 2);
    }
}
