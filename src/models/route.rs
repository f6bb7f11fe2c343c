//! Open-path route type.

use serde::{Deserialize, Serialize};

use super::Stop;
use crate::distance::{Metric, Vincenty};

/// An ordered sequence of stops with fixed first and last entries.
///
/// Only the interior (indices `1..=n-2`) may be reordered, and only through
/// [`Route::interior_mut`], which never exposes the endpoints. Lengths are
/// always recomputed from the current ordering; nothing is cached.
///
/// # Examples
///
/// ```
/// use u_openpath::models::{Route, Stop};
///
/// let route = Route::new(vec![
///     Stop::at("A", 0.0, 0.0).unwrap(),
///     Stop::at("B", 0.0, 1.0).unwrap(),
///     Stop::at("C", 0.0, 2.0).unwrap(),
/// ]);
/// assert_eq!(route.len(), 3);
/// assert_eq!(route.interior_len(), 1);
/// assert_eq!(route.inverse_length(), -route.total_length());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Route {
    stops: Vec<Stop>,
}

impl Route {
    /// Creates a route visiting `stops` in the given order.
    pub fn new(stops: Vec<Stop>) -> Self {
        Self { stops }
    }

    /// Returns the ordered stops.
    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    /// Number of stops, endpoints included.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Returns `true` if the route has no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Fixed start of the route.
    pub fn first(&self) -> Option<&Stop> {
        self.stops.first()
    }

    /// Fixed end of the route.
    pub fn last(&self) -> Option<&Stop> {
        self.stops.last()
    }

    /// Number of reorderable stops (all but the first and last).
    pub fn interior_len(&self) -> usize {
        self.stops.len().saturating_sub(2)
    }

    /// Mutable view of the interior stops. Empty when `len() < 3`.
    pub(crate) fn interior_mut(&mut self) -> &mut [Stop] {
        let n = self.stops.len();
        if n < 3 {
            return &mut [];
        }
        &mut self.stops[1..n - 1]
    }

    /// Stop labels in visit order.
    pub fn labels(&self) -> Vec<&str> {
        self.stops.iter().map(Stop::label).collect()
    }

    /// Per-leg distances in meters; `len() - 1` entries.
    pub fn legs_with<M: Metric>(&self, metric: &M) -> Vec<f64> {
        self.stops
            .windows(2)
            .map(|w| metric.distance(w[0].coordinate(), w[1].coordinate()))
            .collect()
    }

    /// Total length in meters under `metric`: the sum of all `n - 1`
    /// consecutive legs. Zero for routes with fewer than two stops.
    pub fn total_length_with<M: Metric>(&self, metric: &M) -> f64 {
        self.stops
            .windows(2)
            .map(|w| metric.distance(w[0].coordinate(), w[1].coordinate()))
            .sum()
    }

    /// Total geodesic length in meters (WGS84).
    pub fn total_length(&self) -> f64 {
        self.total_length_with(&Vincenty)
    }

    /// Sign-flipped alias of [`total_length`](Self::total_length) for
    /// maximizing searches. Not a separate metric.
    pub fn inverse_length(&self) -> f64 {
        -self.total_length()
    }

    /// Consumes the route, returning its stops.
    pub fn into_stops(self) -> Vec<Stop> {
        self.stops
    }
}

impl FromIterator<Stop> for Route {
    fn from_iter<I: IntoIterator<Item = Stop>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::distance;

    fn line(n: usize) -> Route {
        (0..n)
            .map(|i| Stop::at(format!("S{i}"), 0.0, i as f64 * 0.01).expect("valid"))
            .collect()
    }

    #[test]
    fn test_route_empty() {
        let r = Route::default();
        assert!(r.is_empty());
        assert_eq!(r.len(), 0);
        assert_eq!(r.interior_len(), 0);
        assert_eq!(r.total_length(), 0.0);
        assert!(r.first().is_none());
    }

    #[test]
    fn test_single_stop_has_zero_length() {
        assert_eq!(line(1).total_length(), 0.0);
    }

    #[test]
    fn test_total_length_covers_every_leg() {
        // Regression: the last leg must be included (n - 1 legs, not n - 2).
        let r = line(4);
        let s = r.stops();
        let expected = distance(s[0].coordinate(), s[1].coordinate())
            + distance(s[1].coordinate(), s[2].coordinate())
            + distance(s[2].coordinate(), s[3].coordinate());
        assert!((r.total_length() - expected).abs() < 1e-9);

        let truncated = expected - distance(s[2].coordinate(), s[3].coordinate());
        assert!(r.total_length() > truncated + 1.0);
    }

    #[test]
    fn test_two_stops_single_leg() {
        let r = line(2);
        let s = r.stops();
        assert_eq!(r.total_length(), distance(s[0].coordinate(), s[1].coordinate()));
    }

    #[test]
    fn test_legs() {
        let r = line(5);
        let legs = r.legs_with(&Vincenty);
        assert_eq!(legs.len(), 4);
        assert!((legs.iter().sum::<f64>() - r.total_length()).abs() < 1e-9);
    }

    #[test]
    fn test_inverse_length() {
        let r = line(6);
        assert_eq!(r.inverse_length(), -r.total_length());
    }

    #[test]
    fn test_interior_excludes_endpoints() {
        let mut r = line(5);
        let interior: Vec<String> = r
            .interior_mut()
            .iter()
            .map(|s| s.label().to_string())
            .collect();
        assert_eq!(interior, vec!["S1", "S2", "S3"]);
        assert!(line(2).interior_mut().is_empty());
        assert!(line(0).interior_mut().is_empty());
    }

    #[test]
    fn test_into_stops_keeps_order() {
        let r = line(4);
        let expected = r.stops().to_vec();
        let stops = r.into_stops();
        assert_eq!(stops, expected);
        assert_eq!(Route::new(stops).labels(), vec!["S0", "S1", "S2", "S3"]);
    }

    #[test]
    fn test_labels_and_endpoints() {
        let r = line(3);
        assert_eq!(r.labels(), vec!["S0", "S1", "S2"]);
        assert_eq!(r.first().map(Stop::label), Some("S0"));
        assert_eq!(r.last().map(Stop::label), Some("S2"));
    }
}
