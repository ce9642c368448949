//! # Genetic Algorithm
//!
//! Feature selection with a genetic algorithm over boolean masks, in a simple
//! variant and a hybrid variant (HGAFS) that adds correlation-based local search.

pub mod config;
pub mod engine;

pub use config::{GaConfig, GaConfigBuilder, GaVariant};
pub use engine::{GeneticSearch, PopulationSnapshot};
