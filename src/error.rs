//! # Error Types
//!
//! This module defines the error type shared by every part of the optimizer.
//! Configuration problems are reported before a run starts, evaluator failures
//! abort the run that triggered them.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use genpool::error::{GeneticError, Result};
//!
//! fn check_threads(threads: usize) -> Result<usize> {
//!     if threads == 0 {
//!         return Err(GeneticError::Configuration("no threads".to_string()));
//!     }
//!     Ok(threads)
//! }
//!
//! assert!(check_threads(0).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genpool::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[i64]) -> genpool::error::Result<i64> {
//!     scores.iter().max().cloned().ok_or_else_genetic(||
//!         GeneticError::EmptyPopulation
//!     )
//! }
//!
//! assert_eq!(best_score(&[3, 9, 1]).unwrap(), 9);
//! ```

use thiserror::Error;

/// Represents errors that can occur while configuring or running an evolution.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Error that occurs when a breeding operation cannot proceed.
    #[error("Breeding error: {0}")]
    Breeding(String),

    /// Error that occurs when an evolution process fails.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// Error that occurs when an invalid gene space or option set is provided.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// Error that occurs when the injected evaluator fails to score a genome.
    #[error("Fitness calculation error: {0}")]
    FitnessCalculation(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for optimizer operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, GeneticError>` using `err_fn`
    /// to build the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}
