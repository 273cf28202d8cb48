//! Pluggable randomness.
//!
//! Everything random in a round (role shuffle, category pick, word picks)
//! goes through [`RandomSource`], so a test can replay an exact sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::collections::VecDeque;
use tracing::instrument;

/// A source of uniformly distributed indices.
pub trait RandomSource {
    /// Returns an index uniformly distributed in `0..bound`.
    ///
    /// `bound` is always at least 1.
    fn below(&mut self, bound: usize) -> usize;

    /// Shuffles `items` in place (Fisher–Yates).
    fn shuffle<T>(&mut self, items: &mut [T])
    where
        Self: Sized,
    {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

/// Seeded ChaCha8 random source.
///
/// Same seed, same game.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Creates a source with the given seed.
    #[must_use]
    #[instrument]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Creates a source seeded from the operating system.
    #[must_use]
    #[instrument]
    pub fn from_entropy() -> Self {
        Self::new(rand::thread_rng().r#gen())
    }

    /// Returns the seed this source was created with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for GameRng {
    fn below(&mut self, bound: usize) -> usize {
        self.inner.gen_range(0..bound)
    }
}

/// Random source that replays a fixed sequence of values.
///
/// Each call to [`RandomSource::below`] takes the next value and reduces it
/// modulo `bound`. The sequence wraps around when exhausted; an empty
/// sequence always yields 0.
#[derive(Clone, Debug, Default)]
pub struct ScriptedRng {
    values: VecDeque<usize>,
}

impl ScriptedRng {
    /// Creates a source that yields `values` in order.
    pub fn new(values: impl IntoIterator<Item = usize>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }
}

impl RandomSource for ScriptedRng {
    fn below(&mut self, bound: usize) -> usize {
        match self.values.pop_front() {
            Some(value) => {
                self.values.push_back(value);
                value % bound
            }
            None => 0,
        }
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn below(&mut self, bound: usize) -> usize {
        (**self).below(bound)
    }
}
