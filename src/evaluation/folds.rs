//! Deterministic k-fold assignment for evaluator implementations.
//!
//! Evaluators must produce the same accuracy for the same subset within a run, so
//! fold membership is computed once from the dataset and reused for every subset.

use crate::error::{Result, SearchError};

/// One train/test split of the sample indices.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    pub train: Vec<usize>,
    pub test: Vec<usize>,
}

fn check_fold_count(num_samples: usize, k_folds: usize) -> Result<()> {
    if k_folds < 2 {
        return Err(SearchError::Configuration(format!(
            "Fold count must be at least 2, got {}",
            k_folds
        )));
    }
    if k_folds > num_samples {
        return Err(SearchError::Configuration(format!(
            "Fold count ({}) exceeds the number of samples ({})",
            k_folds, num_samples
        )));
    }
    Ok(())
}

/// Assigns sample `i` to fold `i % k_folds`.
pub fn assign_folds(num_samples: usize, k_folds: usize) -> Result<Vec<usize>> {
    check_fold_count(num_samples, k_folds)?;
    Ok((0..num_samples).map(|i| i % k_folds).collect())
}

/// Assigns folds round-robin within each class, so every fold sees the class
/// proportions of the whole dataset as closely as possible.
pub fn stratified_folds(labels: &[usize], k_folds: usize) -> Result<Vec<usize>> {
    check_fold_count(labels.len(), k_folds)?;

    let mut order: Vec<usize> = (0..labels.len()).collect();
    order.sort_by_key(|&i| (labels[i], i));

    let mut assignment = vec![0; labels.len()];
    for (position, &sample) in order.iter().enumerate() {
        assignment[sample] = position % k_folds;
    }
    Ok(assignment)
}

/// Expands a fold assignment into one train/test split per fold.
pub fn folds_from_assignment(assignment: &[usize], k_folds: usize) -> Vec<Fold> {
    (0..k_folds)
        .map(|fold| {
            let (test, train): (Vec<usize>, Vec<usize>) =
                (0..assignment.len()).partition(|&i| assignment[i] == fold);
            Fold { train, test }
        })
        .collect()
}
