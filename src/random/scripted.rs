//! Replays a fixed sequence of draws, for exact operator tests.

use std::collections::VecDeque;

use super::RandomSource;
use crate::error::{Error, Result};

/// Returns queued integers (clamped into the requested range) and floats in
/// order. Panics when a queue runs dry so that tests notice extra draws.
#[derive(Debug, Default)]
pub(crate) struct ScriptedSource {
    ints: VecDeque<usize>,
    floats: VecDeque<f64>,
    pub(crate) int_calls: Vec<(usize, usize)>,
}

impl ScriptedSource {
    pub(crate) fn ints(values: &[usize]) -> Self {
        Self {
            ints: values.iter().copied().collect(),
            ..Self::default()
        }
    }

    pub(crate) fn with_floats(mut self, values: &[f64]) -> Self {
        self.floats = values.iter().copied().collect();
        self
    }
}

impl RandomSource for ScriptedSource {
    fn uniform_int(&mut self, low: usize, high: usize) -> Result<usize> {
        if low > high {
            return Err(Error::InvalidRange { low, high });
        }
        self.int_calls.push((low, high));
        let v = self.ints.pop_front().expect("scripted ints exhausted");
        Ok(v.clamp(low, high))
    }

    fn unit_f64(&mut self) -> f64 {
        self.floats.pop_front().expect("scripted floats exhausted")
    }
}
