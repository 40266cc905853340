//! # BreedingWorker
//!
//! A breeding worker sweeps every ordered pair `(i, j)` with `i != j` of the
//! elite view, crosses `elite[i]` with `elite[j]` and scores the child. Sweeps
//! repeat until the worker's quota is filled; after the first sweep only the
//! top `refill_bound` elites are used. The finished batch is sorted by
//! descending score and capped.
//!
//! Workers only read the elite view. Everything they accumulate is private
//! until the batch is returned.

use crate::{
    error::{GeneticError, Result},
    evolution::{evaluator::evaluate, options::EvolutionOptions, Evaluator},
    gene_space::GeneSpace,
    operators::crossover,
    population::{sort_descending, Individual},
    rng::RandomNumberGenerator,
};

/// Per-generation breeding parameters, identical for every worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreedPlan {
    /// Offspring to breed before stopping.
    pub quota: usize,
    /// Offspring kept after sorting.
    pub batch_cap: usize,
    pub refill_bound: usize,
    pub mutation_prob: i64,
    pub offset_multiplier: i64,
}

impl BreedPlan {
    /// Derives the plan for one generation from the run options.
    pub fn from_options(options: &EvolutionOptions, offset_multiplier: i64) -> Self {
        Self {
            quota: options.worker_quota(),
            batch_cap: options.get_batch_cap(),
            refill_bound: options.get_refill_bound(),
            mutation_prob: options.get_mutation_prob(),
            offset_multiplier,
        }
    }
}

/// A single-threaded unit producing one sorted batch of offspring.
#[derive(Debug, Clone)]
pub struct BreedingWorker {
    index: usize,
    plan: BreedPlan,
}

impl BreedingWorker {
    /// Creates a worker. `index` doubles as the crossover phase shift.
    pub fn new(index: usize, plan: BreedPlan) -> Self {
        Self { index, plan }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Breeds offspring from `elite` until the quota is met.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Breeding` if `elite` holds fewer than two
    /// individuals, and forwards the first evaluator error unchanged.
    pub fn breed<E>(
        &self,
        space: &GeneSpace,
        elite: &[Individual],
        evaluator: &E,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>>
    where
        E: Evaluator + ?Sized,
    {
        if elite.len() < 2 {
            return Err(GeneticError::Breeding(format!(
                "Worker {} needs at least 2 parents, got {}",
                self.index,
                elite.len()
            )));
        }

        let mut offspring = Vec::with_capacity(self.plan.quota);
        let mut parents = elite;

        'sweeps: loop {
            for (idx_a, parent_a) in parents.iter().enumerate() {
                for (idx_b, parent_b) in parents.iter().enumerate() {
                    if offspring.len() >= self.plan.quota {
                        break 'sweeps;
                    }
                    if idx_a == idx_b {
                        continue;
                    }

                    let genome = crossover(
                        space,
                        parent_a.genome(),
                        parent_b.genome(),
                        self.plan.mutation_prob,
                        self.plan.offset_multiplier,
                        self.index,
                        rng,
                    );
                    offspring.push(evaluate(evaluator, genome)?);
                }
            }

            let refill = self.plan.refill_bound.clamp(2, elite.len());
            parents = &elite[..refill];
        }

        sort_descending(&mut offspring);
        offspring.truncate(self.plan.batch_cap);
        Ok(offspring)
    }
}
