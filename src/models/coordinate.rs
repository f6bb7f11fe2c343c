//! Geographic coordinate type.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

const MAX_LATITUDE: f64 = 90.0;
const MAX_LONGITUDE: f64 = MAX_LATITUDE * 2.0;

/// A latitude/longitude pair in degrees.
///
/// Construction validates ranges, so every `Coordinate` in circulation is
/// finite with latitude in [-90, 90] and longitude in [-180, 180].
///
/// # Examples
///
/// ```
/// use u_openpath::models::Coordinate;
///
/// let berlin = Coordinate::new(52.5200, 13.4050).unwrap();
/// assert_eq!(berlin.latitude(), 52.5200);
/// assert!(Coordinate::new(91.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Creates a coordinate, failing with [`Error::InvalidCoordinate`] on
    /// out-of-range or non-finite input.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-MAX_LATITUDE..=MAX_LATITUDE).contains(&latitude)
            && (-MAX_LONGITUDE..=MAX_LONGITUDE).contains(&longitude);
        if !valid {
            return Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Latitude in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Longitude in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

#[derive(Deserialize)]
struct RawCoordinate {
    latitude: f64,
    longitude: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = Error;

    fn try_from(raw: RawCoordinate) -> Result<Self> {
        Coordinate::new(raw.latitude, raw.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_bounds() {
        assert!(Coordinate::new(-90.0, -180.0).is_ok());
        assert!(Coordinate::new(90.0, 180.0).is_ok());
        assert!(Coordinate::new(0.0, 0.0).is_ok());
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(
            Coordinate::new(90.5, 0.0),
            Err(Error::InvalidCoordinate {
                latitude: 90.5,
                longitude: 0.0
            })
        );
        assert!(Coordinate::new(0.0, -180.1).is_err());
    }

    #[test]
    fn test_non_finite() {
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(Coordinate::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_deserialize_validates() {
        let ok: Coordinate =
            serde_json::from_str(r#"{"latitude": 48.1, "longitude": 11.5}"#).expect("valid");
        assert_eq!(ok.longitude(), 11.5);

        let bad = serde_json::from_str::<Coordinate>(r#"{"latitude": 123.0, "longitude": 0.0}"#);
        assert!(bad.is_err());
    }
}
