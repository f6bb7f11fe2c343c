//! Random number sources.
//!
//! All stochastic code in this crate draws from a [`RandomSource`] supplied
//! by the caller; nothing constructs its own generator.

mod source;

#[cfg(test)]
pub(crate) mod scripted;

pub use source::{RandomSource, RngSource};
