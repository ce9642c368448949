//! # Local Search
//!
//! Local search operators used by the hybrid GA and PSO variants. Unlike the
//! evaluation-driven searches of classic memetic algorithms, these operators never
//! call the fitness evaluator: they reshape a feature mask toward a target
//! composition derived from feature correlation, and the engine scores the result
//! with the rest of the population.

pub mod correlation;
pub mod hybrid;
pub mod subset_size;

pub use correlation::CorrelationLocalSearch;
pub use hybrid::HybridLocalSearch;
pub use subset_size::SubsetSizeDistribution;
