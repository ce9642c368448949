use super::Candidate;

/// An ACO ant: a feature list grown one feature per step.
///
/// Vector-based colonies score every prefix while the ant walks. The ant remembers
/// the length of its best-scoring prefix and counts consecutive steps that did not
/// improve on it; [`Ant::truncate_to_best`] cuts the walk back to that prefix.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Ant {
    pub features: Vec<usize>,
    pub visited: Vec<bool>,
    pub fitness: f64,
    pub count_steps: usize,
    pub best_len: usize,
}

impl Ant {
    pub fn new(num_features: usize) -> Self {
        Self {
            features: Vec::new(),
            visited: vec![false; num_features],
            fitness: 0.0,
            count_steps: 0,
            best_len: 0,
        }
    }

    /// Clears the walk for a new generation.
    pub fn reset(&mut self) {
        self.features.clear();
        self.visited.iter_mut().for_each(|v| *v = false);
        self.fitness = 0.0;
        self.count_steps = 0;
        self.best_len = 0;
    }

    pub fn num_features(&self) -> usize {
        self.visited.len()
    }

    /// Last feature added, if any.
    pub fn current(&self) -> Option<usize> {
        self.features.last().copied()
    }

    pub fn is_visited(&self, feature: usize) -> bool {
        self.visited.get(feature).copied().unwrap_or(true)
    }

    /// Features the ant may still move to.
    pub fn unvisited(&self) -> impl Iterator<Item = usize> + '_ {
        self.visited
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| (!v).then_some(i))
    }

    /// Appends `feature` to the walk. Visited or out-of-range features are ignored.
    pub fn visit(&mut self, feature: usize) -> bool {
        match self.visited.get_mut(feature) {
            Some(visited) if !*visited => {
                *visited = true;
                self.features.push(feature);
                true
            }
            _ => false,
        }
    }

    /// Records the fitness of the current walk. An improvement marks the walk as the
    /// best prefix and resets the stagnation counter.
    pub fn record_step(&mut self, fitness: f64) -> bool {
        if self.best_len == 0 || fitness > self.fitness {
            self.fitness = fitness;
            self.best_len = self.features.len();
            self.count_steps = 0;
            true
        } else {
            self.count_steps += 1;
            false
        }
    }

    /// Whether the walk is over: every feature visited, or `stagnation_limit`
    /// consecutive steps without improvement.
    pub fn is_complete(&self, stagnation_limit: usize) -> bool {
        self.features.len() == self.num_features() || self.count_steps >= stagnation_limit
    }

    /// Drops the features added after the best-scoring prefix.
    pub fn truncate_to_best(&mut self) {
        for &feature in &self.features[self.best_len..] {
            self.visited[feature] = false;
        }
        self.features.truncate(self.best_len);
        self.count_steps = 0;
    }
}

impl Candidate for Ant {
    fn selected_features(&self) -> Vec<usize> {
        let mut features = self.features.clone();
        features.sort_unstable();
        features
    }

    fn num_selected(&self) -> usize {
        self.features.len()
    }

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}
