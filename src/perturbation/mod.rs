//! Perturbation operators producing neighbor routes.
//!
//! - [`swap_two_interior_stops`] — exchange two interior stops
//! - [`shuffle_interior`] — uniform permutation of the whole interior
//!
//! Both reorder interior stops in place and never touch the endpoints.

mod shuffle;
mod swap;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Route;
use crate::random::RandomSource;

pub use shuffle::shuffle_interior;
pub use swap::swap_two_interior_stops;

/// One draw in this many turns into a full shuffle under [`Perturbation::Mixed`].
const MIXED_SHUFFLE_ODDS: usize = 20;

/// Neighborhood used by the search engine to derive candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Perturbation {
    /// Swap two interior stops.
    #[default]
    Swap,
    /// Shuffle the entire interior (random restart).
    Shuffle,
    /// Swap, with an occasional full shuffle to escape plateaus.
    Mixed,
}

impl Perturbation {
    /// Applies this perturbation to `route` in place.
    pub fn apply<R: RandomSource>(self, route: &mut Route, rng: &mut R) -> Result<()> {
        match self {
            Perturbation::Swap => swap_two_interior_stops(route, rng),
            Perturbation::Shuffle => shuffle_interior(route, rng),
            Perturbation::Mixed => {
                if rng.uniform_int(1, MIXED_SHUFFLE_ODDS)? == 1 {
                    shuffle_interior(route, rng)
                } else {
                    swap_two_interior_stops(route, rng)
                }
            }
        }
    }
}
