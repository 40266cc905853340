//! # WorkerPool
//!
//! The `WorkerPool` runs one generation of breeding: it fans a fixed number of
//! [`BreedingWorker`]s out over a dedicated `rayon` thread pool, waits for all
//! of them, and concatenates their batches in worker order.
//!
//! Every worker receives the same read-only elite view and its own
//! [`RandomNumberGenerator`] derived from the generation seed and the worker
//! index. The call returns only after every worker finished, so no breeding
//! from one generation can overlap the next.
//!
//! ## Example
//!
//! ```rust
//! use genpool::breeding::{BreedPlan, WorkerPool};
//! use genpool::gene_space::GeneSpace;
//! use genpool::population::Individual;
//!
//! let space = GeneSpace::uniform(3, 0, 10).unwrap();
//! let elite = vec![
//!     Individual::new(vec![1, 2, 3], 6),
//!     Individual::new(vec![3, 2, 1], 6),
//! ];
//! let plan = BreedPlan { quota: 10, batch_cap: 5, refill_bound: 20, mutation_prob: 3, offset_multiplier: 1 };
//! let evaluator = |genome: &[i64]| genome.iter().sum::<i64>();
//!
//! let pool = WorkerPool::new(4).unwrap();
//! let next = pool.breed(&space, &elite, &evaluator, &plan, 42).unwrap();
//! assert_eq!(next.len(), 4 * 5);
//! ```

use rayon::prelude::*;
use tracing::trace;

use super::worker::{BreedPlan, BreedingWorker};
use crate::{
    error::{GeneticError, Result},
    evolution::Evaluator,
    gene_space::GeneSpace,
    population::Individual,
    rng::RandomNumberGenerator,
};

/// Fans breeding workers out per generation and joins their batches.
#[derive(Debug)]
pub struct WorkerPool {
    threads: usize,
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    /// Creates a pool running `threads` workers per generation.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `threads` is zero or the
    /// underlying thread pool cannot be built.
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(GeneticError::Configuration(
                "Thread count cannot be zero".to_string(),
            ));
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|idx| format!("genpool-worker-{}", idx))
            .build()
            .map_err(|e| {
                GeneticError::Configuration(format!("Failed to build worker pool: {}", e))
            })?;

        Ok(Self { threads, pool })
    }

    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Breeds one generation from `elite`.
    ///
    /// The returned individuals are the workers' batches concatenated in
    /// worker order, without deduplication or re-sorting.
    ///
    /// # Errors
    ///
    /// Fails with the first error any worker reports. The partial batches of
    /// the other workers are discarded.
    pub fn breed<E>(
        &self,
        space: &GeneSpace,
        elite: &[Individual],
        evaluator: &E,
        plan: &BreedPlan,
        generation_seed: u64,
    ) -> Result<Vec<Individual>>
    where
        E: Evaluator + ?Sized,
    {
        let batches: Vec<Vec<Individual>> = self.pool.install(|| {
            (0..self.threads)
                .into_par_iter()
                .map(|index| -> Result<Vec<Individual>> {
                    let mut rng = RandomNumberGenerator::for_stream(generation_seed, index);
                    let batch =
                        BreedingWorker::new(index, *plan).breed(space, elite, evaluator, &mut rng)?;
                    trace!(
                        worker = index,
                        size = batch.len(),
                        best = batch.first().map(Individual::score),
                        "worker batch ready"
                    );
                    Ok(batch)
                })
                .collect::<Result<Vec<_>>>()
        })?;

        Ok(batches.into_iter().flatten().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::mutate;

    fn plan() -> BreedPlan {
        BreedPlan {
            quota: 40,
            batch_cap: 25,
            refill_bound: 20,
            mutation_prob: 3,
            offset_multiplier: 2,
        }
    }

    #[test]
    fn test_zero_threads_rejected() {
        assert!(matches!(
            WorkerPool::new(0),
            Err(GeneticError::Configuration(_))
        ));
    }

    #[test]
    fn test_merges_every_worker_batch() {
        let space = GeneSpace::uniform(5, 0, 10).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(9);
        let elite: Vec<Individual> = (0..6)
            .map(|_| Individual::new(mutate(&space, &mut rng), 0))
            .collect();
        let evaluator = |genome: &[i64]| genome.iter().sum::<i64>();

        for threads in [1, 3, 8] {
            let pool = WorkerPool::new(threads).unwrap();
            assert_eq!(pool.threads(), threads);
            let next = pool.breed(&space, &elite, &evaluator, &plan(), 1).unwrap();
            assert_eq!(next.len(), threads * 25);
        }
    }

    #[test]
    fn test_pool_is_reusable_across_generations() {
        let space = GeneSpace::uniform(4, 0, 10).unwrap();
        let elite = vec![
            Individual::new(vec![1, 1, 1, 1], 4),
            Individual::new(vec![2, 2, 2, 2], 8),
        ];
        let evaluator = |genome: &[i64]| genome.iter().sum::<i64>();
        let pool = WorkerPool::new(2).unwrap();

        for generation_seed in 0..5 {
            let next = pool
                .breed(&space, &elite, &evaluator, &plan(), generation_seed)
                .unwrap();
            assert_eq!(next.len(), 50);
        }
    }

    #[test]
    fn test_worker_failure_fails_generation() {
        let space = GeneSpace::uniform(4, 0, 10).unwrap();
        let elite = vec![
            Individual::new(vec![1, 1, 1, 1], 4),
            Individual::new(vec![2, 2, 2, 2], 8),
        ];
        let evaluator = crate::evolution::FallibleEvaluator::new(|genome: &[i64]| {
            if genome.iter().sum::<i64>() > 6 {
                Err(GeneticError::FitnessCalculation("score overflow".to_string()))
            } else {
                Ok(0)
            }
        });
        let pool = WorkerPool::new(4).unwrap();

        let result = pool.breed(&space, &elite, &evaluator, &plan(), 3);
        assert!(matches!(result, Err(GeneticError::FitnessCalculation(_))));
    }
}
