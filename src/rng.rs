//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct is the single source of randomness threaded
//! through every operator of a search run. It wraps the `rand` crate's `StdRng` so a
//! run can be reproduced by passing a seed in the search configuration.
//!
//! ## Example
//!
//! ```rust
//! use featsel::rng::RandomNumberGenerator;
//!
//! let mut a = RandomNumberGenerator::from_seed(7);
//! let mut b = RandomNumberGenerator::from_seed(7);
//!
//! assert_eq!(a.uniform(), b.uniform());
//! assert!(a.gen_index(10) < 10);
//! ```

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

/// A wrapper around the `rand` crate's `StdRng` that provides the draws used by the
/// search operators.
#[derive(Debug, Clone)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible runs, tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeds from `seed` when present, from entropy otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::new(),
        }
    }

    /// Draws a uniform value in `[0, 1)`.
    pub fn uniform(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Draws a uniform value in `[from, to)`. Returns `from` for an empty range.
    pub fn uniform_range(&mut self, from: f64, to: f64) -> f64 {
        if to <= from {
            return from;
        }
        self.rng.gen_range(from..to)
    }

    /// Returns `true` with probability `p`. Values outside `[0, 1]` saturate.
    pub fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }

    /// Draws an index in `[0, upper)`.
    ///
    /// # Panics
    ///
    /// Panics if `upper` is zero.
    pub fn gen_index(&mut self, upper: usize) -> usize {
        self.rng.gen_range(0..upper)
    }

    /// Draws an integer in `[low, high]`.
    pub fn gen_inclusive(&mut self, low: usize, high: usize) -> usize {
        self.rng.gen_range(low..=high)
    }

    /// Shuffles `values` in place.
    pub fn shuffle<T>(&mut self, values: &mut [T]) {
        values.shuffle(&mut self.rng);
    }

    /// Returns `amount` distinct indices drawn from `[0, length)`.
    ///
    /// `amount` is clamped to `length`.
    pub fn sample_indices(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, length, amount.min(length)).into_vec()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_in_unit_interval() {
        let mut rng = RandomNumberGenerator::new();
        for _ in 0..100 {
            let value = rng.uniform();
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn test_uniform_range_with_negative_bounds() {
        let mut rng = RandomNumberGenerator::from_seed(1);
        for _ in 0..100 {
            let value = rng.uniform_range(-4.0, 4.0);
            assert!((-4.0..4.0).contains(&value));
        }
        assert_eq!(rng.uniform_range(2.0, 2.0), 2.0);
    }

    #[test]
    fn test_chance_extremes() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        assert!((0..50).all(|_| !rng.chance(0.0)));
        assert!((0..50).all(|_| rng.chance(1.0)));
    }

    #[test]
    fn test_sample_indices_are_distinct() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        let mut sample = rng.sample_indices(20, 8);
        assert_eq!(sample.len(), 8);
        sample.sort_unstable();
        sample.dedup();
        assert_eq!(sample.len(), 8);
        assert!(sample.iter().all(|&i| i < 20));

        assert_eq!(rng.sample_indices(3, 10).len(), 3);
    }

    #[test]
    fn test_clone() {
        let mut rng1 = RandomNumberGenerator::from_seed(42);
        let mut rng2 = rng1.clone();

        let nums1: Vec<f64> = (0..5).map(|_| rng1.uniform()).collect();
        let nums2: Vec<f64> = (0..5).map(|_| rng2.uniform()).collect();

        assert_eq!(nums1, nums2);
    }
}
