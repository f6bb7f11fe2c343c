//! Interior two-stop swap.

use crate::error::Result;
use crate::models::Route;
use crate::random::RandomSource;

/// Exchanges two distinct interior stops, chosen uniformly.
///
/// Both indices are drawn from `1..=n-2`; the second draw is repeated until
/// it differs from the first. Routes with fewer than two interior stops
/// (`n < 4`) are left untouched and no randomness is consumed.
///
/// # Examples
///
/// ```
/// use u_openpath::models::{Route, Stop};
/// use u_openpath::perturbation::swap_two_interior_stops;
/// use u_openpath::random::RngSource;
///
/// let mut route: Route = (0..5)
///     .map(|i| Stop::at(format!("S{i}"), 0.0, i as f64).unwrap())
///     .collect();
/// swap_two_interior_stops(&mut route, &mut RngSource::seeded(1)).unwrap();
/// assert_eq!(route.labels()[0], "S0");
/// assert_eq!(route.labels()[4], "S4");
/// ```
pub fn swap_two_interior_stops<R: RandomSource>(route: &mut Route, rng: &mut R) -> Result<()> {
    let n = route.len();
    if n < 4 {
        return Ok(());
    }

    let a = rng.uniform_int(1, n - 2)?;
    let mut b = rng.uniform_int(1, n - 2)?;
    while a == b {
        b = rng.uniform_int(1, n - 2)?;
    }

    // interior_mut() is offset by one from route indices
    route.interior_mut().swap(a - 1, b - 1);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stop;
    use crate::random::scripted::ScriptedSource;

    fn route(n: usize) -> Route {
        (0..n)
            .map(|i| Stop::at(format!("S{i}"), 1.0, i as f64).expect("valid"))
            .collect()
    }

    #[test]
    fn test_swap_exact_positions() {
        let mut r = route(6);
        let mut rng = ScriptedSource::ints(&[2, 4]);
        swap_two_interior_stops(&mut r, &mut rng).expect("swap");
        assert_eq!(r.labels(), vec!["S0", "S1", "S4", "S3", "S2", "S5"]);
        assert_eq!(rng.int_calls, vec![(1, 4), (1, 4)]);
    }

    #[test]
    fn test_swap_resamples_equal_indices() {
        let mut r = route(5);
        let mut rng = ScriptedSource::ints(&[3, 3, 3, 1]);
        swap_two_interior_stops(&mut r, &mut rng).expect("swap");
        assert_eq!(r.labels(), vec!["S0", "S3", "S2", "S1", "S4"]);
        assert_eq!(rng.int_calls.len(), 4);
    }

    #[test]
    fn test_swap_noop_below_four() {
        for n in 0..4 {
            let original = route(n);
            let mut r = original.clone();
            // Any draw would panic on the empty script.
            let mut rng = ScriptedSource::ints(&[]);
            swap_two_interior_stops(&mut r, &mut rng).expect("noop");
            assert_eq!(r, original);
            assert!(rng.int_calls.is_empty());
        }
    }

    #[test]
    fn test_swap_four_stops_swaps_middle() {
        let mut r = route(4);
        let mut rng = ScriptedSource::ints(&[1, 2]);
        swap_two_interior_stops(&mut r, &mut rng).expect("swap");
        assert_eq!(r.labels(), vec!["S0", "S2", "S1", "S3"]);
    }
}
