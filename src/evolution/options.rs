//! # EvolutionOptions
//!
//! The `EvolutionOptions` struct collects every tunable of a run: population
//! size, number of breeding workers, elite sizes, crossover parameters, the
//! offset schedule, logging and the master seed.
//!
//! ## Example
//!
//! ```rust
//! use genpool::evolution::options::{EvolutionOptions, LogLevel, OffsetSchedule};
//!
//! // Create a new EvolutionOptions instance with custom parameters
//! let custom_options = EvolutionOptions::new(2_000, 4, 30, LogLevel::Minimal);
//! assert!(custom_options.validate().is_ok());
//!
//! // Or use the builder for finer control
//! let options = EvolutionOptions::builder()
//!     .max_population(500)
//!     .threads(2)
//!     .offset_schedule(OffsetSchedule::Fixed(2))
//!     .seed(7)
//!     .build();
//! assert_eq!(options.get_threads(), 2);
//! ```
//!
//! ## Defaults
//!
//! | option            | default      |
//! |-------------------|--------------|
//! | `max_population`  | 10000        |
//! | `threads`         | 12           |
//! | `elite_bound`     | 50           |
//! | `refill_bound`    | 20           |
//! | `batch_cap`       | 250          |
//! | `mutation_prob`   | 3            |
//! | `elitism`         | 1            |
//! | `inject_novelty`  | true         |
//! | `offset_schedule` | `Adaptive`   |
//! | `report_interval` | 20           |
//! | `log_level`       | `None`       |
//! | `seed`            | entropy      |

use crate::error::{GeneticError, Result};

const DEFAULT_MAX_POPULATION: usize = 10_000;
const DEFAULT_THREADS: usize = 12;
const DEFAULT_ELITE_BOUND: usize = 50;
const DEFAULT_REFILL_BOUND: usize = 20;
const DEFAULT_BATCH_CAP: usize = 250;
const DEFAULT_MUTATION_PROB: i64 = 3;
const DEFAULT_ELITISM: usize = 1;
const DEFAULT_REPORT_INTERVAL: usize = 20;

/// Controls which progress events the evolution loop emits through `tracing`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Per-generation and per-worker details.
    Verbose,
    /// Start, finish and a progress line every `report_interval` steps.
    Minimal,
    None,
}

/// How the crossover offset multiplier evolves over a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetSchedule {
    /// Coarse steps early, fine steps late: 5 up to 20% progress, 3 up to
    /// 30%, 2 up to 40%, then 1.
    Adaptive,
    /// The same multiplier for the whole run.
    Fixed(i64),
}

impl OffsetSchedule {
    /// Returns the offset multiplier for `progress` (step / max steps).
    pub fn multiplier(&self, progress: f64) -> i64 {
        match *self {
            OffsetSchedule::Fixed(multiplier) => multiplier,
            OffsetSchedule::Adaptive if progress <= 0.2 => 5,
            OffsetSchedule::Adaptive if progress <= 0.3 => 3,
            OffsetSchedule::Adaptive if progress <= 0.4 => 2,
            OffsetSchedule::Adaptive => 1,
        }
    }
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOptions {
    max_population: usize,
    threads: usize,
    elite_bound: usize,
    /// Elite prefix used by a worker once its first sweep fell short
    refill_bound: usize,
    batch_cap: usize,
    mutation_prob: i64,
    elitism: usize,
    inject_novelty: bool,
    offset_schedule: OffsetSchedule,
    report_interval: usize,
    log_level: LogLevel,
    seed: Option<u64>,
}

impl EvolutionOptions {
    /// Creates options with the given population size, worker count and elite
    /// bound. Everything else uses its default.
    pub fn new(
        max_population: usize,
        threads: usize,
        elite_bound: usize,
        log_level: LogLevel,
    ) -> Self {
        Self {
            max_population,
            threads,
            elite_bound,
            log_level,
            ..Self::default()
        }
    }

    /// Checks the options for values the evolution loop cannot work with.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if the population size, thread
    /// count, batch cap or refill bound is zero, or if the elite bound is
    /// below two.
    pub fn validate(&self) -> Result<()> {
        if self.max_population == 0 {
            return Err(GeneticError::Configuration(
                "Population size cannot be zero".to_string(),
            ));
        }
        if self.threads == 0 {
            return Err(GeneticError::Configuration(
                "Thread count cannot be zero".to_string(),
            ));
        }
        if self.elite_bound < 2 {
            return Err(GeneticError::Configuration(format!(
                "Elite bound must be at least 2 to form parent pairs, got {}",
                self.elite_bound
            )));
        }
        if self.refill_bound == 0 {
            return Err(GeneticError::Configuration(
                "Refill bound cannot be zero".to_string(),
            ));
        }
        if self.batch_cap == 0 {
            return Err(GeneticError::Configuration(
                "Worker batch cap cannot be zero".to_string(),
            ));
        }
        Ok(())
    }

    pub fn get_max_population(&self) -> usize {
        self.max_population
    }

    pub fn get_threads(&self) -> usize {
        self.threads
    }

    pub fn get_elite_bound(&self) -> usize {
        self.elite_bound
    }

    pub fn get_refill_bound(&self) -> usize {
        self.refill_bound
    }

    pub fn get_batch_cap(&self) -> usize {
        self.batch_cap
    }

    pub fn get_mutation_prob(&self) -> i64 {
        self.mutation_prob
    }

    pub fn get_elitism(&self) -> usize {
        self.elitism
    }

    pub fn get_inject_novelty(&self) -> bool {
        self.inject_novelty
    }

    pub fn get_offset_schedule(&self) -> OffsetSchedule {
        self.offset_schedule
    }

    pub fn get_report_interval(&self) -> usize {
        self.report_interval
    }

    pub fn get_log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    /// Number of offspring each worker must breed: the population size split
    /// across workers, rounded up.
    pub fn worker_quota(&self) -> usize {
        self.max_population.div_ceil(self.threads.max(1))
    }

    pub fn set_max_population(&mut self, max_population: usize) {
        self.max_population = max_population;
    }

    pub fn set_threads(&mut self, threads: usize) {
        self.threads = threads;
    }

    pub fn set_elite_bound(&mut self, elite_bound: usize) {
        self.elite_bound = elite_bound;
    }

    pub fn set_log_level(&mut self, log_level: LogLevel) {
        self.log_level = log_level;
    }

    pub fn set_seed(&mut self, seed: Option<u64>) {
        self.seed = seed;
    }

    /// Returns a builder for creating an `EvolutionOptions` instance.
    pub fn builder() -> EvolutionOptionsBuilder {
        EvolutionOptionsBuilder::default()
    }
}

impl Default for EvolutionOptions {
    fn default() -> Self {
        Self {
            max_population: DEFAULT_MAX_POPULATION,
            threads: DEFAULT_THREADS,
            elite_bound: DEFAULT_ELITE_BOUND,
            refill_bound: DEFAULT_REFILL_BOUND,
            batch_cap: DEFAULT_BATCH_CAP,
            mutation_prob: DEFAULT_MUTATION_PROB,
            elitism: DEFAULT_ELITISM,
            inject_novelty: true,
            offset_schedule: OffsetSchedule::Adaptive,
            report_interval: DEFAULT_REPORT_INTERVAL,
            log_level: LogLevel::None,
            seed: None,
        }
    }
}

/// Builder for `EvolutionOptions`.
///
/// Provides a fluent interface for constructing `EvolutionOptions` instances.
/// Unset fields fall back to the defaults.
#[derive(Debug, Clone, Default)]
pub struct EvolutionOptionsBuilder {
    max_population: Option<usize>,
    threads: Option<usize>,
    elite_bound: Option<usize>,
    refill_bound: Option<usize>,
    batch_cap: Option<usize>,
    mutation_prob: Option<i64>,
    elitism: Option<usize>,
    inject_novelty: Option<bool>,
    offset_schedule: Option<OffsetSchedule>,
    report_interval: Option<usize>,
    log_level: Option<LogLevel>,
    seed: Option<u64>,
}

impl EvolutionOptionsBuilder {
    pub fn max_population(mut self, value: usize) -> Self {
        self.max_population = Some(value);
        self
    }

    /// Sets the number of breeding workers per generation.
    pub fn threads(mut self, value: usize) -> Self {
        self.threads = Some(value);
        self
    }

    pub fn elite_bound(mut self, value: usize) -> Self {
        self.elite_bound = Some(value);
        self
    }

    pub fn refill_bound(mut self, value: usize) -> Self {
        self.refill_bound = Some(value);
        self
    }

    /// Sets how many offspring each worker keeps after sorting its batch.
    pub fn batch_cap(mut self, value: usize) -> Self {
        self.batch_cap = Some(value);
        self
    }

    /// Sets the crossover mutation probability. Clamped to `[0, 10]` when used.
    pub fn mutation_prob(mut self, value: i64) -> Self {
        self.mutation_prob = Some(value);
        self
    }

    /// Sets how many of the best individuals survive into the next generation
    /// unchanged.
    pub fn elitism(mut self, value: usize) -> Self {
        self.elitism = Some(value);
        self
    }

    pub fn inject_novelty(mut self, value: bool) -> Self {
        self.inject_novelty = Some(value);
        self
    }

    pub fn offset_schedule(mut self, value: OffsetSchedule) -> Self {
        self.offset_schedule = Some(value);
        self
    }

    pub fn report_interval(mut self, value: usize) -> Self {
        self.report_interval = Some(value);
        self
    }

    pub fn log_level(mut self, value: LogLevel) -> Self {
        self.log_level = Some(value);
        self
    }

    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    /// Builds the `EvolutionOptions` instance.
    pub fn build(self) -> EvolutionOptions {
        let defaults = EvolutionOptions::default();
        EvolutionOptions {
            max_population: self.max_population.unwrap_or(defaults.max_population),
            threads: self.threads.unwrap_or(defaults.threads),
            elite_bound: self.elite_bound.unwrap_or(defaults.elite_bound),
            refill_bound: self.refill_bound.unwrap_or(defaults.refill_bound),
            batch_cap: self.batch_cap.unwrap_or(defaults.batch_cap),
            mutation_prob: self.mutation_prob.unwrap_or(defaults.mutation_prob),
            elitism: self.elitism.unwrap_or(defaults.elitism),
            inject_novelty: self.inject_novelty.unwrap_or(defaults.inject_novelty),
            offset_schedule: self.offset_schedule.unwrap_or(defaults.offset_schedule),
            report_interval: self.report_interval.unwrap_or(defaults.report_interval),
            log_level: self.log_level.unwrap_or(defaults.log_level),
            seed: self.seed.or(defaults.seed),
        }
    }
}
