pub mod rank;
pub mod roulette;
pub mod selection_strategy;

pub use rank::RankBasedSelection;
pub use roulette::{roulette_wheel, FitnessProportionalSelection};
pub use selection_strategy::SelectionStrategy;

/// Selection strategies that can be named in a search configuration.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionKind {
    #[default]
    FitnessProportional,
    RankBased,
}

impl SelectionKind {
    pub fn build(self) -> Box<dyn SelectionStrategy> {
        match self {
            SelectionKind::FitnessProportional => Box::new(FitnessProportionalSelection),
            SelectionKind::RankBased => Box::new(RankBasedSelection),
        }
    }
}
