//! Geodesic distance between coordinates.
//!
//! # Algorithm
//!
//! The default metric is Vincenty's inverse formula on the WGS84 ellipsoid,
//! iterated until the longitude on the auxiliary sphere changes by less than
//! 1e-12 rad (at most 20 iterations). Vincenty does not converge for nearly
//! antipodal points; those pairs are measured with Karney's algorithm from the
//! `geo` crate instead, which converges everywhere. Both agree with reference
//! geodesic implementations to well under a meter.
//!
//! A spherical Haversine metric is provided for callers that prefer speed
//! over ellipsoidal accuracy.
//!
//! # Reference
//!
//! Vincenty, T. (1975). "Direct and inverse solutions of geodesics on the
//! ellipsoid with application of nested equations", *Survey Review* 23(176), 88-93.
//!
//! Karney, C.F.F. (2013). "Algorithms for geodesics", *Journal of Geodesy*
//! 87(1), 43-55.

use std::cmp::Ordering;
use std::f64::consts::PI;

use geo::{GeodesicDistance, Point};

use crate::models::Coordinate;

/// WGS84 semi-major axis in meters.
const WGS84_A: f64 = 6_378_137.0;
/// WGS84 semi-minor axis in meters.
const WGS84_B: f64 = 6_356_752.314_2;
const WGS84_F: f64 = (WGS84_A - WGS84_B) / WGS84_A;
const MAX_ITERATIONS: usize = 20;
const CONVERGENCE: f64 = 1e-12;

/// Mean Earth radius used by [`Haversine`].
const EARTH_RADIUS: f64 = 6_371_000.0;

/// A distance function over coordinates, in meters.
///
/// Implementations must be non-negative and return zero for identical
/// points. Closures `Fn(Coordinate, Coordinate) -> f64` implement this trait,
/// which makes it easy to plug a custom metric into the search engine.
pub trait Metric {
    /// Distance from `a` to `b` in meters.
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64;
}

impl<F> Metric for F
where
    F: Fn(Coordinate, Coordinate) -> f64,
{
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        self(a, b)
    }
}

/// Vincenty inverse distance on the WGS84 ellipsoid.
#[derive(Debug, Clone, Copy, Default)]
pub struct Vincenty;

/// Great-circle distance on a sphere of radius 6 371 km.
#[derive(Debug, Clone, Copy, Default)]
pub struct Haversine;

/// Geodesic distance in meters between two coordinates using [`Vincenty`].
///
/// Symmetric, non-negative, and exactly zero when `a == b`.
///
/// # Examples
///
/// ```
/// use u_openpath::models::Coordinate;
/// use u_openpath::distance::distance;
///
/// let a = Coordinate::new(0.0, 0.0).unwrap();
/// let b = Coordinate::new(0.0, 1.0).unwrap();
/// // One degree of longitude along the equator.
/// assert!((distance(a, b) - 111_319.49).abs() < 0.01);
/// assert_eq!(distance(a, b), distance(b, a));
/// ```
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    Vincenty.distance(a, b)
}

impl Metric for Vincenty {
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        if a == b {
            return 0.0;
        }
        let (a, b) = canonical(a, b);
        vincenty_inverse(a, b).unwrap_or_else(|| {
            log::trace!("geodesic.fallback: vincenty did not converge, using karney");
            karney_inverse(a, b)
        })
    }
}

impl Metric for Haversine {
    fn distance(&self, a: Coordinate, b: Coordinate) -> f64 {
        if a == b {
            return 0.0;
        }
        let (a, b) = canonical(a, b);
        let lat1 = a.latitude().to_radians();
        let lat2 = b.latitude().to_radians();
        let s1 = ((b.latitude() - a.latitude()).to_radians() / 2.0).sin();
        let s2 = ((b.longitude() - a.longitude()).to_radians() / 2.0).sin();
        let h = s1 * s1 + lat1.cos() * lat2.cos() * s2 * s2;
        2.0 * EARTH_RADIUS * h.sqrt().min(1.0).asin()
    }
}

/// Orders the pair so that `distance(a, b)` and `distance(b, a)` evaluate
/// the exact same floating-point expression.
fn canonical(a: Coordinate, b: Coordinate) -> (Coordinate, Coordinate) {
    let order = a
        .latitude()
        .total_cmp(&b.latitude())
        .then_with(|| a.longitude().total_cmp(&b.longitude()));
    match order {
        Ordering::Greater => (b, a),
        _ => (a, b),
    }
}

/// Karney inverse on WGS84.
fn karney_inverse(a: Coordinate, b: Coordinate) -> f64 {
    let p1 = Point::new(a.longitude(), a.latitude());
    let p2 = Point::new(b.longitude(), b.latitude());
    p1.geodesic_distance(&p2)
}

/// Vincenty inverse on WGS84. `None` when the iteration fails to converge.
fn vincenty_inverse(a: Coordinate, b: Coordinate) -> Option<f64> {
    let a_sq_minus_b_sq_over_b_sq = (WGS84_A * WGS84_A - WGS84_B * WGS84_B) / (WGS84_B * WGS84_B);

    let mut l = (b.longitude() - a.longitude()).to_radians();
    if l > PI {
        l -= 2.0 * PI;
    } else if l < -PI {
        l += 2.0 * PI;
    }
    let u1 = ((1.0 - WGS84_F) * a.latitude().to_radians().tan()).atan();
    let u2 = ((1.0 - WGS84_F) * b.latitude().to_radians().tan()).atan();

    let (sin_u1, cos_u1) = u1.sin_cos();
    let (sin_u2, cos_u2) = u2.sin_cos();
    let cos_u1_cos_u2 = cos_u1 * cos_u2;
    let sin_u1_sin_u2 = sin_u1 * sin_u2;

    let mut lambda = l;
    let mut sigma = 0.0;
    let mut delta_sigma = 0.0;
    let mut big_a = 1.0;
    let mut converged = false;

    for _ in 0..MAX_ITERATIONS {
        let previous = lambda;
        let (sin_lambda, cos_lambda) = lambda.sin_cos();

        let t1 = cos_u2 * sin_lambda;
        let t2 = cos_u1 * sin_u2 - sin_u1 * cos_u2 * cos_lambda;
        let sin_sigma = (t1 * t1 + t2 * t2).sqrt();
        let cos_sigma = sin_u1_sin_u2 + cos_u1_cos_u2 * cos_lambda;
        sigma = sin_sigma.atan2(cos_sigma);

        let sin_alpha = if sin_sigma == 0.0 {
            0.0
        } else {
            cos_u1_cos_u2 * sin_lambda / sin_sigma
        };
        let cos_sq_alpha = 1.0 - sin_alpha * sin_alpha;
        // Equatorial lines have cos²α = 0.
        let cos_2sm = if cos_sq_alpha == 0.0 {
            0.0
        } else {
            cos_sigma - 2.0 * sin_u1_sin_u2 / cos_sq_alpha
        };

        let u_sq = cos_sq_alpha * a_sq_minus_b_sq_over_b_sq;
        big_a = 1.0 + (u_sq / 16384.0) * (4096.0 + u_sq * (-768.0 + u_sq * (320.0 - 175.0 * u_sq)));
        let big_b = (u_sq / 1024.0) * (256.0 + u_sq * (-128.0 + u_sq * (74.0 - 47.0 * u_sq)));
        let c = (WGS84_F / 16.0) * cos_sq_alpha * (4.0 + WGS84_F * (4.0 - 3.0 * cos_sq_alpha));

        let cos_2sm_sq = cos_2sm * cos_2sm;
        delta_sigma = big_b
            * sin_sigma
            * (cos_2sm
                + (big_b / 4.0)
                    * (cos_sigma * (-1.0 + 2.0 * cos_2sm_sq)
                        - (big_b / 6.0)
                            * cos_2sm
                            * (-3.0 + 4.0 * sin_sigma * sin_sigma)
                            * (-3.0 + 4.0 * cos_2sm_sq)));

        lambda = l
            + (1.0 - c)
                * WGS84_F
                * sin_alpha
                * (sigma + c * sin_sigma * (cos_2sm + c * cos_sigma * (-1.0 + 2.0 * cos_2sm_sq)));

        if lambda.abs() > PI {
            return None;
        }
        if (lambda - previous).abs() < CONVERGENCE {
            converged = true;
            break;
        }
    }

    if !converged {
        return None;
    }
    Some((WGS84_B * big_a * (sigma - delta_sigma)).max(0.0))
}
