//! Domain model types for open-path routing.
//!
//! A [`Route`] is an ordered sequence of [`Stop`]s whose first and last
//! entries are fixed; each stop carries a validated [`Coordinate`].

mod coordinate;
mod route;
mod stop;

pub use coordinate::Coordinate;
pub use route::Route;
pub use stop::Stop;
