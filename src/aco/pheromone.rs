//! # Pheromone
//!
//! Two pheromone models share the [`PheromoneMatrix`] contract. Vector-based
//! colonies keep one value per feature ([`FeaturePheromone`]); graph-based colonies
//! keep one value per unordered feature pair ([`PairPheromone`]), stored packed.

use std::fmt::Debug;

use crate::matrix::SymmetricMatrix;

/// Storage for pheromone intensities.
pub trait PheromoneMatrix: Debug + Send + Sync {
    /// Number of features the pheromone is laid over.
    fn num_features(&self) -> usize;

    fn values(&self) -> &[f64];

    fn values_mut(&mut self) -> &mut [f64];

    fn fill(&mut self, value: f64) {
        self.values_mut().iter_mut().for_each(|v| *v = value);
    }

    /// Multiplies every entry by `1 - rho`.
    fn evaporate(&mut self, rho: f64) {
        let keep = 1.0 - rho;
        self.values_mut().iter_mut().for_each(|v| *v *= keep);
    }
}

/// One pheromone value per feature, independent of the path an ant walked.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct FeaturePheromone {
    values: Vec<f64>,
}

impl FeaturePheromone {
    pub fn new(num_features: usize, initial: f64) -> Self {
        Self {
            values: vec![initial; num_features],
        }
    }

    #[inline]
    pub fn get(&self, feature: usize) -> f64 {
        self.values[feature]
    }

    /// Adds `amount` to every feature in `features`.
    pub fn deposit(&mut self, features: &[usize], amount: f64) {
        for &feature in features {
            self.values[feature] += amount;
        }
    }
}

impl PheromoneMatrix for FeaturePheromone {
    fn num_features(&self) -> usize {
        self.values.len()
    }

    fn values(&self) -> &[f64] {
        &self.values
    }

    fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }
}

/// One pheromone value per unordered feature pair.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct PairPheromone {
    matrix: SymmetricMatrix,
}

impl PairPheromone {
    pub fn new(num_features: usize, initial: f64) -> Self {
        Self {
            matrix: SymmetricMatrix::new(num_features, initial),
        }
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.matrix.get(i, j)
    }

    pub fn deposit(&mut self, i: usize, j: usize, amount: f64) {
        self.matrix.add(i, j, amount);
    }

    /// Evaporates, then deposits `edge_counter / (num_ants * (subset_size - 1))` on
    /// every pair. Subsets of one feature walk no edges, so nothing is deposited.
    pub fn update_from_edges(
        &mut self,
        rho: f64,
        edge_counter: &SymmetricMatrix,
        num_ants: usize,
        subset_size: usize,
    ) {
        self.evaporate(rho);
        if subset_size <= 1 || num_ants == 0 {
            return;
        }

        let scale = (num_ants * (subset_size - 1)) as f64;
        for (tau, &count) in self.matrix.values_mut().iter_mut().zip(edge_counter.values()) {
            *tau += count / scale;
        }
    }
}

impl PheromoneMatrix for PairPheromone {
    fn num_features(&self) -> usize {
        self.matrix.dimension()
    }

    fn values(&self) -> &[f64] {
        self.matrix.values()
    }

    fn values_mut(&mut self) -> &mut [f64] {
        self.matrix.values_mut()
    }
}

/// Pheromone an ant deposits in Optimal ACO:
/// `phi * (fitness / fitness_scale) + (1 - phi) * (n - |S|) / n`.
pub fn optimal_deposit(
    fitness: f64,
    subset_size: usize,
    num_features: usize,
    phi: f64,
    fitness_scale: f64,
) -> f64 {
    let n = num_features.max(1) as f64;
    phi * (fitness / fitness_scale) + (1.0 - phi) * (n - subset_size as f64) / n
}
