//! Randomness used for request jitter and user-agent rotation.
//!
//! Injected into [`crate::FetchClient`] so tests can pin the values.

use std::fmt::Debug;

use rand::Rng;

pub trait RandomSource: Debug + Send + Sync {
    /// Uniform integer in `low..=high`. Callers guarantee `low <= high`.
    fn uniform_inclusive(&self, low: u64, high: u64) -> u64;

    /// Uniform index in `0..len`. Callers guarantee `len > 0`.
    fn index(&self, len: usize) -> usize;
}

/// Thread-local RNG from `rand`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn uniform_inclusive(&self, low: u64, high: u64) -> u64 {
        rand::rng().random_range(low..=high)
    }

    fn index(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Deterministic source returning the same draw every time.
///
/// `value` is clamped into the requested range and `index` is reduced
/// modulo the pool length.
#[derive(Debug, Clone, Copy)]
pub struct FixedRandom {
    pub value: u64,
    pub index: usize,
}

impl FixedRandom {
    #[must_use]
    pub fn new(value: u64, index: usize) -> Self {
        Self { value, index }
    }
}

impl RandomSource for FixedRandom {
    fn uniform_inclusive(&self, low: u64, high: u64) -> u64 {
        self.value.clamp(low, high)
    }

    fn index(&self, len: usize) -> usize {
        self.index % len
    }
}
