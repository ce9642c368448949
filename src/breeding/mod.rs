pub mod crossover;
pub mod mutation;

pub use crossover::{
    crossover_pairs, CrossoverOperator, OnePointCrossover, TwoPointCrossover, UniformCrossover,
};
pub use mutation::{BitwiseMutation, MutationOperator};

/// Crossover operators that can be named in a search configuration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrossoverKind {
    #[default]
    OnePoint,
    TwoPoint,
    Uniform,
}

impl CrossoverKind {
    pub fn build(self) -> Box<dyn CrossoverOperator> {
        match self {
            CrossoverKind::OnePoint => Box::new(OnePointCrossover),
            CrossoverKind::TwoPoint => Box::new(TwoPointCrossover),
            CrossoverKind::Uniform => Box::new(UniformCrossover),
        }
    }
}
