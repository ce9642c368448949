//! # Search
//!
//! The generation loop shared by every engine family, the configuration values it
//! reads, and the result it produces. Engines implement [`Metaheuristic`] and hand
//! themselves to [`run_search`].

pub mod cancellation;
pub mod launcher;
pub mod options;
pub mod outcome;
pub mod population;

pub use cancellation::CancellationToken;
pub use launcher::{run_search, EvaluationScope, Metaheuristic};
pub use options::{SearchConfig, SearchConfigBuilder};
pub use outcome::{GenerationStats, SearchOutcome};
pub use population::Population;
