//! # Error Types
//!
//! This module defines the error type shared by every search engine in the crate.
//! Configuration problems are reported before a search starts, evaluator failures
//! abort the running search, and degenerate numerics never reach this type because
//! they are substituted locally.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use featsel::error::{Result, SearchError};
//!
//! fn check_folds(k_folds: usize, samples: usize) -> Result<()> {
//!     if k_folds > samples {
//!         return Err(SearchError::Configuration(format!(
//!             "Fold count ({}) exceeds the number of samples ({})",
//!             k_folds, samples
//!         )));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_folds(10, 5).is_err());
//! ```
//!
//! Using the `ResultExt` trait to add context to errors:
//!
//! ```rust
//! use featsel::error::{Result, ResultExt};
//! use std::fs::File;
//!
//! fn open_fold_file(path: &str) -> Result<()> {
//!     File::open(path).context("Failed to open fold file")?;
//!     Ok(())
//! }
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use featsel::error::{OptionExt, SearchError};
//!
//! fn best_fitness(fitness: &[f64]) -> featsel::error::Result<f64> {
//!     fitness
//!         .iter()
//!         .cloned()
//!         .fold(None, |best: Option<f64>, f| Some(best.map_or(f, |b| b.max(f))))
//!         .ok_or_else_search(|| SearchError::EmptyPopulation)
//! }
//!
//! assert_eq!(best_fitness(&[1.0, 3.0, 2.0]).unwrap(), 3.0);
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while configuring or running a feature search.
#[derive(Error, Debug)]
pub enum SearchError {
    /// An invalid configuration was provided. Raised before any iteration runs.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The dataset handed to the crate is malformed.
    #[error("Invalid dataset: {0}")]
    InvalidDataset(String),

    /// An operation required at least one candidate.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// The fitness evaluator reported a failure.
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// The fitness evaluator produced an unusable value.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// The search was cancelled at a generation boundary.
    #[error("Search cancelled before generation {generation}")]
    Cancelled {
        /// The generation that was about to start.
        generation: usize,
    },

    /// Error that occurs when an I/O operation on the evaluation workspace fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for feature search operations.
pub type Result<T> = std::result::Result<T, SearchError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use featsel::error::ResultExt;
/// use std::fs::File;
///
/// fn read_file(path: &str) -> featsel::error::Result<()> {
///     File::open(path).context("Failed to open file")?;
///     Ok(())
/// }
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `SearchError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| SearchError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, SearchError>` using a closure to
    /// generate the error.
    fn ok_or_else_search<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SearchError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_search<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> SearchError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_wraps_message() {
        let io: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = io.context("Failed to create workspace").unwrap_err();
        assert_eq!(err.to_string(), "Failed to create workspace: missing");
    }

    #[test]
    fn test_io_conversion() {
        fn fails() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk"))?;
            Ok(())
        }
        assert!(matches!(fails(), Err(SearchError::Io(_))));
    }

    #[test]
    fn test_cancelled_display() {
        let err = SearchError::Cancelled { generation: 3 };
        assert_eq!(err.to_string(), "Search cancelled before generation 3");
    }
}
