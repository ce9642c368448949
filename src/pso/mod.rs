//! # Particle Swarm Optimization
//!
//! Feature selection with particle swarms: binary PSO, continuous PSO, PSO(4-2)
//! and the hybrid HPSO-LS. All variants share one engine; the variant picks the
//! initialization, the position rule and the tie-breaking of bests.

pub mod config;
pub mod engine;
pub mod update;

pub use config::{PsoConfig, PsoConfigBuilder, PsoVariant};
pub use engine::{ParticleSwarmSearch, SwarmSnapshot};
