use super::{Candidate, FeatureMask};

/// A GA individual: a boolean genome over all features.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Individual {
    pub genome: FeatureMask,
    pub fitness: f64,
}

impl Individual {
    pub fn new(genome: FeatureMask) -> Self {
        Self {
            genome,
            fitness: 0.0,
        }
    }
}

impl From<FeatureMask> for Individual {
    fn from(genome: FeatureMask) -> Self {
        Self::new(genome)
    }
}

impl AsMut<[bool]> for Individual {
    fn as_mut(&mut self) -> &mut [bool] {
        self.genome.genes_mut()
    }
}

impl Candidate for Individual {
    fn selected_features(&self) -> Vec<usize> {
        self.genome.selected()
    }

    fn num_selected(&self) -> usize {
        self.genome.count()
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
