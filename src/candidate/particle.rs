use super::{is_better, Candidate, FeatureMask};

/// The best position a particle, or the whole swarm, has visited.
///
/// Updates go through [`BestPosition::offer`], which never lowers the recorded
/// fitness.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct BestPosition {
    pub position: Vec<f64>,
    pub mask: FeatureMask,
    pub fitness: f64,
}

/// A particle's own best position.
pub type PersonalBest = BestPosition;

/// The best position of the whole swarm.
pub type GlobalBest = BestPosition;

impl BestPosition {
    /// A best position that any evaluated candidate improves on.
    pub fn unset(num_features: usize) -> Self {
        Self {
            position: vec![0.0; num_features],
            mask: FeatureMask::new(num_features),
            fitness: f64::NEG_INFINITY,
        }
    }

    pub fn is_set(&self) -> bool {
        self.fitness.is_finite()
    }

    /// Replaces the best position if `fitness` is strictly higher, or equal with a
    /// smaller subset when `prefer_smaller` is set. Returns `true` on replacement.
    pub fn offer(&mut self, position: &[f64], mask: &FeatureMask, fitness: f64, prefer_smaller: bool) -> bool {
        let improved = if prefer_smaller {
            is_better(fitness, mask.count(), self.fitness, self.mask.count())
        } else {
            fitness > self.fitness
        };

        if improved {
            self.position.clear();
            self.position.extend_from_slice(position);
            self.mask = mask.clone();
            self.fitness = fitness;
        }
        improved
    }
}

/// A PSO particle.
///
/// `position` is the real-valued location in the search space. For binary PSO it
/// mirrors `mask` as 0/1 values; for continuous PSO `mask` is derived from it by a
/// threshold.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub mask: FeatureMask,
    pub fitness: f64,
    pub best: PersonalBest,
}

impl Particle {
    /// Creates a particle at `position` with a zero velocity.
    pub fn new(position: Vec<f64>, mask: FeatureMask) -> Self {
        let num_features = position.len();
        Self {
            position,
            velocity: vec![0.0; num_features],
            mask,
            fitness: 0.0,
            best: PersonalBest::unset(num_features),
        }
    }

    /// Creates a binary particle whose position mirrors `mask`.
    pub fn from_mask(mask: FeatureMask) -> Self {
        let position = mask.genes().iter().map(|&g| if g { 1.0 } else { 0.0 }).collect();
        Self::new(position, mask)
    }

    /// Offers the current state as a new personal best.
    pub fn offer_personal_best(&mut self, prefer_smaller: bool) -> bool {
        self.best
            .offer(&self.position, &self.mask, self.fitness, prefer_smaller)
    }
}

impl Candidate for Particle {
    fn selected_features(&self) -> Vec<usize> {
        self.mask.selected()
    }

    fn num_selected(&self) -> usize {
        self.mask.count()
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
