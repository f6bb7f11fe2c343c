//! Labelled waypoint.

use serde::{Deserialize, Serialize};

use super::Coordinate;
use crate::error::Result;

/// A named, geolocated point that must appear in a route.
///
/// Stops are immutable: optimization moves them around, never edits them.
///
/// # Examples
///
/// ```
/// use u_openpath::models::Stop;
///
/// let stop = Stop::at("Alexanderplatz", 52.5219, 13.4132).unwrap();
/// assert_eq!(stop.label(), "Alexanderplatz");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    label: String,
    coordinate: Coordinate,
}

impl Stop {
    /// Creates a stop from an already validated coordinate.
    pub fn new(label: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            label: label.into(),
            coordinate,
        }
    }

    /// Creates a stop from raw degrees, validating them first.
    pub fn at(label: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self::new(label, Coordinate::new(latitude, longitude)?))
    }

    /// Display text.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Location of this stop.
    pub fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}
