//! Interior Fisher-Yates shuffle.

use crate::error::Result;
use crate::models::Route;
use crate::random::RandomSource;

/// Uniformly permutes every interior stop, leaving both endpoints in place.
///
/// Interiors of size 0 or 1 are returned unchanged without drawing.
///
/// # Examples
///
/// ```
/// use u_openpath::models::{Route, Stop};
/// use u_openpath::perturbation::shuffle_interior;
/// use u_openpath::random::RngSource;
///
/// let mut route: Route = (0..8)
///     .map(|i| Stop::at(format!("S{i}"), 0.0, i as f64).unwrap())
///     .collect();
/// shuffle_interior(&mut route, &mut RngSource::seeded(3)).unwrap();
/// assert_eq!(route.first().unwrap().label(), "S0");
/// assert_eq!(route.last().unwrap().label(), "S7");
/// ```
pub fn shuffle_interior<R: RandomSource>(route: &mut Route, rng: &mut R) -> Result<()> {
    let interior = route.interior_mut();
    for i in (1..interior.len()).rev() {
        let j = rng.uniform_int(0, i)?;
        interior.swap(i, j);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Stop;
    use crate::random::scripted::ScriptedSource;
    use crate::random::RngSource;
    use std::collections::HashMap;

    fn route(n: usize) -> Route {
        (0..n)
            .map(|i| Stop::at(format!("S{i}"), 2.0, i as f64).expect("valid"))
            .collect()
    }

    #[test]
    fn test_shuffle_scripted() {
        // Interior [S1, S2, S3]: i=2 swaps with 0, i=1 swaps with 1.
        let mut r = route(5);
        let mut rng = ScriptedSource::ints(&[0, 1]);
        shuffle_interior(&mut r, &mut rng).expect("shuffle");
        assert_eq!(r.labels(), vec!["S0", "S3", "S2", "S1", "S4"]);
        assert_eq!(rng.int_calls, vec![(0, 2), (0, 1)]);
    }

    #[test]
    fn test_shuffle_reaches_last_interior() {
        // The stop just before the end must be movable too.
        let mut r = route(4);
        let mut rng = ScriptedSource::ints(&[0]);
        shuffle_interior(&mut r, &mut rng).expect("shuffle");
        assert_eq!(r.labels(), vec!["S0", "S2", "S1", "S3"]);
    }

    #[test]
    fn test_shuffle_identity_for_small_interior() {
        for n in 0..4 {
            let original = route(n);
            let mut r = original.clone();
            let mut rng = ScriptedSource::ints(&[]);
            shuffle_interior(&mut r, &mut rng).expect("identity");
            assert_eq!(r, original);
            assert!(rng.int_calls.is_empty());
        }
    }

    #[test]
    fn test_shuffle_roughly_uniform() {
        // 3 interior stops -> 6 permutations, each ~1/6 of draws.
        let mut rng = RngSource::seeded(11);
        let mut counts: HashMap<Vec<String>, usize> = HashMap::new();
        let trials = 6_000;
        for _ in 0..trials {
            let mut r = route(5);
            shuffle_interior(&mut r, &mut rng).expect("shuffle");
            let key = r.labels()[1..4].iter().map(|s| s.to_string()).collect();
            *counts.entry(key).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        for (perm, count) in counts {
            assert!((800..=1200).contains(&count), "{perm:?}: {count}");
        }
    }
}
