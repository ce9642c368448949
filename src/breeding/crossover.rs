//! # Crossover
//!
//! Crossover operators recombine two boolean genomes in place. They work on plain
//! `&mut [bool]` slices so any mask type that exposes its genes can be bred.
//!
//! ## Example
//!
//! ```rust
//! use featsel::breeding::{CrossoverOperator, OnePointCrossover};
//! use featsel::rng::RandomNumberGenerator;
//!
//! let mut first = vec![true; 8];
//! let mut second = vec![false; 8];
//! let mut rng = RandomNumberGenerator::from_seed(11);
//!
//! OnePointCrossover.crossover(&mut first, &mut second, 1.0, &mut rng);
//!
//! // Genes are exchanged, never created or lost.
//! let ones = first.iter().chain(second.iter()).filter(|&&g| g).count();
//! assert_eq!(ones, 8);
//! ```

use std::fmt::Debug;

use crate::rng::RandomNumberGenerator;

/// Recombines two parent genomes into two offspring, in place.
pub trait CrossoverOperator: Debug + Send + Sync {
    /// Crosses `first` and `second` with the given crossover rate.
    ///
    /// Both slices are expected to have the same length. Only the common prefix is
    /// touched otherwise.
    fn crossover(
        &self,
        first: &mut [bool],
        second: &mut [bool],
        rate: f64,
        rng: &mut RandomNumberGenerator,
    );
}

/// Swaps the suffixes of both parents after a random cut point.
///
/// The pair recombines with probability `rate`. The cut is drawn from `[1, len)` so
/// both offspring keep at least one gene from each parent.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct OnePointCrossover;

impl CrossoverOperator for OnePointCrossover {
    fn crossover(
        &self,
        first: &mut [bool],
        second: &mut [bool],
        rate: f64,
        rng: &mut RandomNumberGenerator,
    ) {
        let len = first.len().min(second.len());
        if len < 2 || !rng.chance(rate) {
            return;
        }

        let cut = rng.gen_inclusive(1, len - 1);
        first[cut..len].swap_with_slice(&mut second[cut..len]);
    }
}

/// Swaps the segment between two random cut points.
///
/// Cut points are ordered automatically, so `(7, 2)` swaps the same segment as
/// `(2, 7)`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct TwoPointCrossover;

impl TwoPointCrossover {
    /// Swaps `[min(a, b), max(a, b))` between both genomes.
    pub fn swap_segment(first: &mut [bool], second: &mut [bool], a: usize, b: usize) {
        let len = first.len().min(second.len());
        let (start, end) = if a <= b { (a, b) } else { (b, a) };
        let end = end.min(len);
        if start >= end {
            return;
        }
        first[start..end].swap_with_slice(&mut second[start..end]);
    }
}

impl CrossoverOperator for TwoPointCrossover {
    fn crossover(
        &self,
        first: &mut [bool],
        second: &mut [bool],
        rate: f64,
        rng: &mut RandomNumberGenerator,
    ) {
        let len = first.len().min(second.len());
        if len < 2 || !rng.chance(rate) {
            return;
        }

        let a = rng.gen_index(len);
        let b = rng.gen_inclusive(0, len);
        Self::swap_segment(first, second, a, b);
    }
}

/// Swaps every gene independently with probability `rate`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformCrossover;

impl CrossoverOperator for UniformCrossover {
    fn crossover(
        &self,
        first: &mut [bool],
        second: &mut [bool],
        rate: f64,
        rng: &mut RandomNumberGenerator,
    ) {
        for (a, b) in first.iter_mut().zip(second.iter_mut()) {
            if rng.chance(rate) {
                std::mem::swap(a, b);
            }
        }
    }
}

/// Applies `operator` to consecutive pairs of the mating pool.
///
/// Genomes `0` and `1` are crossed, then `2` and `3`, and so on. An odd genome out
/// is left untouched.
pub fn crossover_pairs<G: AsMut<[bool]>>(
    operator: &dyn CrossoverOperator,
    pool: &mut [G],
    rate: f64,
    rng: &mut RandomNumberGenerator,
) {
    for pair in pool.chunks_exact_mut(2) {
        let (left, right) = pair.split_at_mut(1);
        operator.crossover(left[0].as_mut(), right[0].as_mut(), rate, rng);
    }
}
