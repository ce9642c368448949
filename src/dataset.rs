//! # Dataset
//!
//! An in-memory training matrix handed to the crate by whatever loads the data.
//! Rows are samples, columns are features, and every row carries an integer class
//! label. File formats are the caller's concern.

use std::collections::BTreeSet;

use crate::error::{Result, SearchError};

/// A rectangular matrix of feature values with one class label per row.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    samples: Vec<Vec<f64>>,
    labels: Vec<usize>,
    num_features: usize,
    num_classes: usize,
}

impl Dataset {
    /// Creates a dataset from row-major samples and their class labels.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidDataset` if there are no samples, no features,
    /// rows of different lengths, a label count that differs from the row count, or
    /// any non-finite value.
    pub fn new(samples: Vec<Vec<f64>>, labels: Vec<usize>) -> Result<Self> {
        let num_features = samples.first().map(Vec::len).unwrap_or(0);

        if samples.is_empty() || num_features == 0 {
            return Err(SearchError::InvalidDataset(
                "Dataset must contain at least one sample and one feature".to_string(),
            ));
        }

        if labels.len() != samples.len() {
            return Err(SearchError::InvalidDataset(format!(
                "Label count ({}) doesn't match sample count ({})",
                labels.len(),
                samples.len()
            )));
        }

        if let Some(row) = samples.iter().position(|row| row.len() != num_features) {
            return Err(SearchError::InvalidDataset(format!(
                "Sample {} has {} values, expected {}",
                row,
                samples[row].len(),
                num_features
            )));
        }

        if samples.iter().flatten().any(|value| !value.is_finite()) {
            return Err(SearchError::InvalidDataset(
                "Dataset contains NaN or infinite values".to_string(),
            ));
        }

        let num_classes = labels.iter().collect::<BTreeSet<_>>().len();

        Ok(Self {
            samples,
            labels,
            num_features,
            num_classes,
        })
    }

    pub fn num_samples(&self) -> usize {
        self.samples.len()
    }

    pub fn num_features(&self) -> usize {
        self.num_features
    }

    /// Number of distinct class labels.
    pub fn num_classes(&self) -> usize {
        self.num_classes
    }

    pub fn samples(&self) -> &[Vec<f64>] {
        &self.samples
    }

    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Returns the values of one feature across all samples.
    ///
    /// # Panics
    ///
    /// Panics if `feature` is out of range.
    pub fn column(&self, feature: usize) -> Vec<f64> {
        self.samples.iter().map(|row| row[feature]).collect()
    }

    /// Returns every feature column, in feature order.
    pub fn columns(&self) -> Vec<Vec<f64>> {
        (0..self.num_features).map(|j| self.column(j)).collect()
    }

    /// Returns a copy of the dataset restricted to the given features, in the given order.
    pub fn project(&self, features: &[usize]) -> Result<Self> {
        if let Some(&bad) = features.iter().find(|&&f| f >= self.num_features) {
            return Err(SearchError::InvalidDataset(format!(
                "Feature index {} is out of range for {} features",
                bad, self.num_features
            )));
        }
        let samples = self
            .samples
            .iter()
            .map(|row| features.iter().map(|&f| row[f]).collect())
            .collect();
        Self::new(samples, self.labels.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small() -> Dataset {
        Dataset::new(
            vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]],
            vec![0, 1],
        )
        .unwrap()
    }

    #[test]
    fn test_dimensions() {
        let data = small();
        assert_eq!(data.num_samples(), 2);
        assert_eq!(data.num_features(), 3);
        assert_eq!(data.num_classes(), 2);
        assert_eq!(data.column(1), vec![2.0, 5.0]);
    }

    #[test]
    fn test_ragged_rows_rejected() {
        let result = Dataset::new(vec![vec![1.0, 2.0], vec![1.0]], vec![0, 1]);
        assert!(matches!(result, Err(SearchError::InvalidDataset(_))));
    }

    #[test]
    fn test_label_mismatch_rejected() {
        let result = Dataset::new(vec![vec![1.0]], vec![0, 1]);
        assert!(result.is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let result = Dataset::new(vec![vec![f64::NAN]], vec![0]);
        assert!(result.is_err());
    }

    #[test]
    fn test_project() {
        let projected = small().project(&[2, 0]).unwrap();
        assert_eq!(projected.samples()[1], vec![6.0, 4.0]);
        assert!(small().project(&[5]).is_err());
    }
}
