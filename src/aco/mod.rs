//! # Ant Colony Optimization
//!
//! Feature selection with ant colonies. Graph-based colonies (classic and
//! relevance-redundancy) keep pheromone on feature pairs and build fixed-size
//! subsets; the vector-based Optimal ACO keeps pheromone on features and lets each
//! ant grow its subset until it stops improving.

pub mod config;
pub mod engine;
pub mod pheromone;
pub mod transition;

pub use config::{AcoConfig, AcoConfigBuilder, AcoVariant};
pub use engine::{AntColonySearch, ColonySnapshot};
pub use pheromone::{FeaturePheromone, PairPheromone, PheromoneMatrix};
