//! State-transition rule and heuristic scores.

use crate::relevance::NUMERIC_EPSILON;
use crate::rng::RandomNumberGenerator;

/// Score of moving from feature `i` to `j` in classic graph ACO:
/// `τ(i,j)^α · (1 / (sim(i,j) + ε))^β`.
pub fn classic_score(pheromone: f64, similarity: f64, alpha: f64, beta: f64) -> f64 {
    pheromone.powf(alpha) * (1.0 / (similarity + NUMERIC_EPSILON)).powf(beta)
}

/// Relevance-redundancy score: `τ(i,j)^α · (rel_j / (sim(i,j) + ε))^β`.
pub fn relevance_redundancy_score(
    pheromone: f64,
    relevance: f64,
    similarity: f64,
    alpha: f64,
    beta: f64,
) -> f64 {
    pheromone.powf(alpha) * (relevance / (similarity + NUMERIC_EPSILON)).powf(beta)
}

/// Optimal ACO score of feature `j`: `τ_j^α · rel_j^β`.
pub fn optimal_score(pheromone: f64, relevance: f64, alpha: f64, beta: f64) -> f64 {
    pheromone.powf(alpha) * relevance.powf(beta)
}

/// Picks the next feature from `(feature, score)` candidates.
///
/// Draws `q ~ U(0, 1)`. When `q <= q0` the highest-scoring candidate wins (the
/// first one on ties). Otherwise a candidate is sampled with probability
/// proportional to its score, and zero-score candidates are never sampled; when
/// the scores carry no usable mass, a candidate is picked uniformly. Non-finite or
/// negative scores count as zero. Returns `None` only for an empty candidate list.
///
/// # Examples
///
/// ```
/// use featsel::aco::transition::choose_next;
/// use featsel::rng::RandomNumberGenerator;
///
/// let mut rng = RandomNumberGenerator::from_seed(0);
/// // With q0 = 1 the rule is always greedy.
/// assert_eq!(choose_next(&[(4, 0.2), (7, 0.9), (1, 0.5)], 1.0, &mut rng), Some(7));
/// assert_eq!(choose_next(&[], 1.0, &mut rng), None);
/// ```
pub fn choose_next(
    candidates: &[(usize, f64)],
    q0: f64,
    rng: &mut RandomNumberGenerator,
) -> Option<usize> {
    if candidates.is_empty() {
        return None;
    }

    let q = rng.uniform();
    if q <= q0 {
        let mut best = candidates[0];
        for &(feature, score) in &candidates[1..] {
            if usable(score) > usable(best.1) {
                best = (feature, score);
            }
        }
        return Some(best.0);
    }

    let total: f64 = candidates.iter().map(|&(_, s)| usable(s)).sum();
    if total > 0.0 && total.is_finite() {
        return Some(sample_at(candidates, total, rng.uniform()));
    }

    tracing::trace!(candidates = candidates.len(), "transition fell back to a uniform pick");
    Some(candidates[rng.gen_index(candidates.len())].0)
}

fn usable(score: f64) -> f64 {
    if score.is_finite() && score > 0.0 {
        score
    } else {
        0.0
    }
}

/// Proportional pick for a draw `r` in `[0, 1)` against the usable mass `total`.
/// Zero-score candidates are never returned; a rounding shortfall lands on the
/// last candidate with a usable score.
fn sample_at(candidates: &[(usize, f64)], total: f64, r: f64) -> usize {
    let mut cumulative = 0.0;
    let mut last = candidates[0].0;
    for &(feature, score) in candidates {
        let mass = usable(score);
        if mass == 0.0 {
            continue;
        }
        last = feature;
        cumulative += mass / total;
        if cumulative > r {
            return feature;
        }
    }
    last
}
