//! # Symmetric Matrices
//!
//! Pairwise quantities over features (pheromone on a feature pair, similarity of two
//! features) are symmetric and undefined on the diagonal. They are stored packed in a
//! vector of `n * (n - 1) / 2` values addressed through [`packed_index`].
//!
//! ```rust
//! use featsel::matrix::{packed_index, SymmetricMatrix};
//!
//! assert_eq!(packed_index(3, 1), packed_index(1, 3));
//!
//! let mut m = SymmetricMatrix::new(4, 0.0);
//! m.set(0, 3, 0.5);
//! assert_eq!(m.get(3, 0), 0.5);
//! ```

/// Maps the unordered pair `{i, j}` (with `i != j`) to its slot in a packed vector.
///
/// The mapping is commutative and injective over unordered pairs, and the slots for
/// `n` features cover exactly `0..n * (n - 1) / 2`.
///
/// # Panics
///
/// Debug builds panic when `i == j`.
#[inline]
pub fn packed_index(i: usize, j: usize) -> usize {
    debug_assert_ne!(i, j, "packed_index is undefined on the diagonal");
    if i > j {
        i * (i - 1) / 2 + j
    } else {
        j * (j - 1) / 2 + i
    }
}

/// Number of packed slots needed for `n` features.
#[inline]
pub fn packed_len(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// A symmetric, hollow `n x n` matrix stored as a packed vector.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricMatrix {
    dimension: usize,
    values: Vec<f64>,
}

impl SymmetricMatrix {
    /// Creates an `n x n` matrix with every off-diagonal entry set to `initial`.
    pub fn new(dimension: usize, initial: f64) -> Self {
        Self {
            dimension,
            values: vec![initial; packed_len(dimension)],
        }
    }

    /// Builds a matrix by evaluating `value(i, j)` once per unordered pair.
    pub fn from_fn<F>(dimension: usize, mut value: F) -> Self
    where
        F: FnMut(usize, usize) -> f64,
    {
        let mut values = Vec::with_capacity(packed_len(dimension));
        // Row-major over the lower triangle matches packed_index ordering.
        for i in 1..dimension {
            for j in 0..i {
                values.push(value(i, j));
            }
        }
        Self { dimension, values }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[packed_index(i, j)]
    }

    #[inline]
    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        self.values[packed_index(i, j)] = value;
    }

    /// Adds `delta` to the entry for `{i, j}`.
    #[inline]
    pub fn add(&mut self, i: usize, j: usize, delta: f64) {
        self.values[packed_index(i, j)] += delta;
    }

    pub fn fill(&mut self, value: f64) {
        self.values.iter_mut().for_each(|v| *v = value);
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Mean of the entries in row `i`, excluding the diagonal. Zero for a 1x1 matrix.
    pub fn row_mean(&self, i: usize) -> f64 {
        if self.dimension < 2 {
            return 0.0;
        }
        let sum: f64 = (0..self.dimension)
            .filter(|&j| j != i)
            .map(|j| self.get(i, j))
            .sum();
        sum / (self.dimension - 1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_packed_index_is_commutative_and_injective() {
        let n = 12;
        let mut seen = HashSet::new();
        for i in 0..n {
            for j in 0..n {
                if i == j {
                    continue;
                }
                assert_eq!(packed_index(i, j), packed_index(j, i));
                if i < j {
                    assert!(seen.insert(packed_index(i, j)), "collision at ({i}, {j})");
                }
            }
        }
        assert_eq!(seen.len(), packed_len(n));
        assert!(seen.iter().all(|&slot| slot < packed_len(n)));
    }

    #[test]
    fn test_from_fn_matches_packed_order() {
        let m = SymmetricMatrix::from_fn(5, |i, j| (i * 10 + j) as f64);
        for i in 0..5 {
            for j in 0..i {
                assert_eq!(m.get(i, j), (i * 10 + j) as f64);
                assert_eq!(m.get(j, i), (i * 10 + j) as f64);
            }
        }
    }

    #[test]
    fn test_fill_and_add() {
        let mut m = SymmetricMatrix::new(4, 1.0);
        m.add(1, 2, 0.5);
        assert_eq!(m.get(2, 1), 1.5);
        m.fill(0.0);
        assert!(m.values().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_row_mean() {
        let m = SymmetricMatrix::from_fn(3, |i, j| (i + j) as f64);
        // Row 0: (0,1)=1, (0,2)=2
        assert!((m.row_mean(0) - 1.5).abs() < 1e-12);
        assert_eq!(SymmetricMatrix::new(1, 3.0).row_mean(0), 0.0);
        assert_eq!(packed_len(1), 0);
        assert_eq!(packed_len(0), 0);
    }
}
