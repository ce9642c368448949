use std::ops::{Index, IndexMut};

use crate::candidate::{is_better, Candidate};

/// The candidates of one generation.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Population<C> {
    candidates: Vec<C>,
}

impl<C: Candidate> Population<C> {
    pub fn new(candidates: Vec<C>) -> Self {
        Self { candidates }
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, C> {
        self.candidates.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, C> {
        self.candidates.iter_mut()
    }

    pub fn as_slice(&self) -> &[C] {
        &self.candidates
    }

    pub fn as_mut_slice(&mut self) -> &mut [C] {
        &mut self.candidates
    }

    /// Replaces every candidate, as GA replacement does each generation.
    pub fn replace(&mut self, candidates: Vec<C>) {
        self.candidates = candidates;
    }

    pub fn into_inner(self) -> Vec<C> {
        self.candidates
    }

    pub fn fitness(&self) -> Vec<f64> {
        self.candidates.iter().map(Candidate::fitness).collect()
    }

    pub fn mean_fitness(&self) -> f64 {
        if self.candidates.is_empty() {
            return 0.0;
        }
        self.candidates.iter().map(Candidate::fitness).sum::<f64>() / self.candidates.len() as f64
    }

    /// Index of the best candidate: highest fitness, then the smallest subset, then
    /// the lowest index.
    pub fn best_index(&self) -> Option<usize> {
        let mut best: Option<(usize, f64, usize)> = None;
        for (i, candidate) in self.candidates.iter().enumerate() {
            let (fitness, size) = (candidate.fitness(), candidate.num_selected());
            match best {
                Some((_, best_fitness, best_size)) if !is_better(fitness, size, best_fitness, best_size) => {}
                _ => best = Some((i, fitness, size)),
            }
        }
        best.map(|(i, _, _)| i)
    }

    pub fn best(&self) -> Option<&C> {
        self.best_index().map(|i| &self.candidates[i])
    }

    /// Indices sorted from best to worst with the same ordering as `best_index`.
    pub fn ranked_indices(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.candidates.len()).collect();
        order.sort_by(|&a, &b| {
            let (ca, cb) = (&self.candidates[a], &self.candidates[b]);
            cb.fitness()
                .total_cmp(&ca.fitness())
                .then(ca.num_selected().cmp(&cb.num_selected()))
                .then(a.cmp(&b))
        });
        order
    }
}

impl<C> Default for Population<C> {
    fn default() -> Self {
        Self {
            candidates: Vec::new(),
        }
    }
}

impl<C> Index<usize> for Population<C> {
    type Output = C;

    fn index(&self, index: usize) -> &C {
        &self.candidates[index]
    }
}

impl<C> IndexMut<usize> for Population<C> {
    fn index_mut(&mut self, index: usize) -> &mut C {
        &mut self.candidates[index]
    }
}

impl<C: Candidate> From<Vec<C>> for Population<C> {
    fn from(candidates: Vec<C>) -> Self {
        Self::new(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{FeatureMask, Individual};

    fn individual(indices: &[usize], fitness: f64) -> Individual {
        let mut individual = Individual::new(FeatureMask::from_indices(6, indices));
        individual.fitness = fitness;
        individual
    }

    #[test]
    fn test_best_prefers_fitness_then_size() {
        let population = Population::new(vec![
            individual(&[0, 1, 2], 80.0),
            individual(&[3], 80.0),
            individual(&[4, 5], 70.0),
        ]);
        assert_eq!(population.best_index(), Some(1));
        assert_eq!(population.ranked_indices(), vec![1, 0, 2]);
        assert!((population.mean_fitness() - 230.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_population() {
        let population: Population<Individual> = Population::default();
        assert_eq!(population.best_index(), None);
        assert_eq!(population.mean_fitness(), 0.0);
    }
}
