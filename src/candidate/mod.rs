//! # Candidates
//!
//! A candidate is one point of the search space: a feature subset together with
//! the fitness last measured for it. Each engine family has its own candidate type
//! ([`Individual`], [`Particle`], [`Ant`]); the shared [`Candidate`] trait is what
//! the evaluation loop in [`crate::search`] works with.
//!
//! Fitness is stale from the moment an operator touches a candidate until the
//! next evaluation writes it back with [`Candidate::set_fitness`].

pub mod ant;
pub mod individual;
pub mod mask;
pub mod particle;

use std::fmt::Debug;

pub use ant::Ant;
pub use individual::Individual;
pub use mask::FeatureMask;
pub use particle::{BestPosition, GlobalBest, Particle, PersonalBest};

/// The interface the evaluation loop needs from every candidate type.
pub trait Candidate: Clone + Debug + Send + Sync {
    /// Selected feature indices, strictly increasing.
    fn selected_features(&self) -> Vec<usize>;

    /// Number of selected features.
    fn num_selected(&self) -> usize;

    fn fitness(&self) -> f64;

    fn set_fitness(&mut self, fitness: f64);
}

/// Orders two scored subsets: higher fitness wins, equal fitness prefers the smaller
/// subset. Returns `true` if `(fitness, size)` beats `(best_fitness, best_size)`.
pub fn is_better(fitness: f64, size: usize, best_fitness: f64, best_size: usize) -> bool {
    fitness > best_fitness || (fitness == best_fitness && size < best_size)
}
