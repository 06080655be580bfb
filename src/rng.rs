use rand::{Rng, RngCore};
use std::collections::VecDeque;

/// Source of uniform integer draws for start selection and stepping.
pub trait Draws {
    /// Uniform integer in `[0, bound)`. `bound` is always positive.
    fn below(&mut self, bound: usize) -> usize;
}

impl<R: RngCore> Draws for R {
    fn below(&mut self, bound: usize) -> usize {
        self.random_range(0..bound)
    }
}

/// Replays a fixed list of draws.
///
/// Each value is reduced modulo the requested bound; once the list is used
/// up every draw returns 0. Lets tests force a start cell and a sequence of
/// directions.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDraws {
    values: VecDeque<usize>,
    consumed: usize,
}

impl ScriptedDraws {
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        ScriptedDraws {
            values: values.into_iter().collect(),
            consumed: 0,
        }
    }

    /// Number of draws taken so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl Draws for ScriptedDraws {
    fn below(&mut self, bound: usize) -> usize {
        self.consumed += 1;
        self.values.pop_front().map(|v| v % bound).unwrap_or(0)
    }
}
