//! Feature subset selection for classification with population-based
//! metaheuristics: genetic algorithms, particle swarm optimization and ant colony
//! optimization, plus recursive feature elimination as a baseline.
//!
//! Every engine scores candidate subsets through a caller-supplied
//! [`evaluation::FitnessEvaluator`] and returns a [`search::SearchOutcome`].

pub mod aco;
pub mod breeding;
pub mod candidate;
pub mod dataset;
pub mod error;
pub mod evaluation;
pub mod ga;
pub mod local_search;
pub mod matrix;
pub mod pso;
pub mod relevance;
pub mod rfe;
pub mod rng;
pub mod search;
pub mod selection;

// Re-export commonly used types for convenience
pub use aco::{AcoConfig, AntColonySearch};
pub use dataset::Dataset;
pub use error::{OptionExt, Result, ResultExt, SearchError};
pub use evaluation::{Criteria, EvaluationContext, FitnessEvaluator};
pub use ga::{GaConfig, GeneticSearch};
pub use pso::{ParticleSwarmSearch, PsoConfig};
pub use search::{CancellationToken, SearchConfig, SearchOutcome};
