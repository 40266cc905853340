//! # Evaluator
//!
//! The `Evaluator` trait is the seam between the optimizer and the problem
//! being solved. It turns a genome into an integer score, higher is better.
//!
//! Evaluators are called concurrently from every breeding worker, so they
//! must be `Send + Sync` and must not rely on state shared between calls.
//!
//! ## Example
//!
//! Any `Fn(&[i64]) -> i64` closure is an evaluator:
//!
//! ```rust
//! use genpool::evolution::Evaluator;
//!
//! let evaluator = |genome: &[i64]| genome.iter().map(|g| 10 - (5 - g).abs()).sum::<i64>();
//! assert_eq!(evaluator.score(&[5, 5]).unwrap(), 20);
//! ```
//!
//! Evaluators that can fail are wrapped with [`FallibleEvaluator`]; a failure
//! aborts the run that triggered it:
//!
//! ```rust
//! use genpool::error::GeneticError;
//! use genpool::evolution::{Evaluator, FallibleEvaluator};
//!
//! let evaluator = FallibleEvaluator::new(|genome: &[i64]| {
//!     genome
//!         .first()
//!         .copied()
//!         .ok_or_else(|| GeneticError::FitnessCalculation("empty genome".to_string()))
//! });
//! assert!(evaluator.score(&[]).is_err());
//! ```

use crate::{
    error::Result,
    population::{Genome, Individual},
};

/// Scores genomes for the optimizer.
pub trait Evaluator: Send + Sync {
    /// Scores `genome`. Any error aborts the current generation and the run.
    fn score(&self, genome: &[i64]) -> Result<i64>;
}

impl<F> Evaluator for F
where
    F: Fn(&[i64]) -> i64 + Send + Sync,
{
    fn score(&self, genome: &[i64]) -> Result<i64> {
        Ok(self(genome))
    }
}

/// Adapts a closure returning `Result<i64>` into an [`Evaluator`].
#[derive(Debug, Clone)]
pub struct FallibleEvaluator<F> {
    func: F,
}

impl<F> FallibleEvaluator<F>
where
    F: Fn(&[i64]) -> Result<i64> + Send + Sync,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<F> Evaluator for FallibleEvaluator<F>
where
    F: Fn(&[i64]) -> Result<i64> + Send + Sync,
{
    fn score(&self, genome: &[i64]) -> Result<i64> {
        (self.func)(genome)
    }
}

/// Scores `genome` and wraps it into an [`Individual`].
pub fn evaluate<E>(evaluator: &E, genome: Genome) -> Result<Individual>
where
    E: Evaluator + ?Sized,
{
    let score = evaluator.score(&genome)?;
    Ok(Individual::new(genome, score))
}
