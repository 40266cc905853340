use tracing::{debug, info};

use super::{
    evaluator::{evaluate, Evaluator},
    options::{EvolutionOptions, LogLevel},
};
use crate::{
    breeding::{BreedPlan, WorkerPool},
    error::{GeneticError, Result},
    gene_space::GeneSpace,
    operators::mutate,
    population::{Genome, Individual, Population},
    rng::RandomNumberGenerator,
};

/// Number of individuals reported back by a finished run.
pub const REPORTED_BEST: usize = 5;

/// Lifecycle of a single run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Initializing,
    Evolving,
    /// The best score reached the target.
    Converged,
    /// The step budget ran out first.
    Exhausted,
}

/// Snapshot handed to the observer after every generation.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    /// One-based generation number.
    pub step: usize,
    pub max_steps: usize,
    pub best_score: i64,
    pub mean_score: f64,
    pub population_size: usize,
    pub offset_multiplier: i64,
}

/// Represents the result of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionOutcome {
    /// Whether the target score was reached within the step budget.
    pub success: bool,
    pub state: RunState,
    /// Generations bred before stopping.
    pub steps: usize,
    /// Up to five best individuals, best first.
    pub best: Vec<Individual>,
}

/// Run-scoped state: the run RNG, the current population and the state machine.
struct RunContext {
    rng: RandomNumberGenerator,
    population: Population,
    state: RunState,
}

/// Drives a run over a gene space with a given evaluator.
///
/// # Example
///
/// ```rust
/// use genpool::evolution::{EvolutionLauncher, EvolutionOptions};
/// use genpool::gene_space::GeneSpace;
///
/// let space = GeneSpace::uniform(4, 0, 10).unwrap();
/// let evaluator = |genome: &[i64]| genome.iter().map(|g| 10 - (5 - g).abs()).sum::<i64>();
/// let options = EvolutionOptions::builder()
///     .max_population(500)
///     .threads(2)
///     .elite_bound(20)
///     .seed(3)
///     .build();
///
/// let outcome = EvolutionLauncher::new(space, evaluator)
///     .with_options(options)
///     .run(38.0, 200)
///     .unwrap();
///
/// assert!(outcome.best.len() <= 5);
/// ```
#[derive(Debug, Clone)]
pub struct EvolutionLauncher<E>
where
    E: Evaluator,
{
    space: GeneSpace,
    evaluator: E,
    options: EvolutionOptions,
    seed_genomes: Vec<Genome>,
}

impl<E> EvolutionLauncher<E>
where
    E: Evaluator,
{
    /// Creates a launcher with default options.
    pub fn new(space: GeneSpace, evaluator: E) -> Self {
        Self {
            space,
            evaluator,
            options: EvolutionOptions::default(),
            seed_genomes: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: EvolutionOptions) -> Self {
        self.options = options;
        self
    }

    /// Adds genomes placed into the initial population next to the random ones.
    pub fn with_seed_genomes(mut self, genomes: Vec<Genome>) -> Self {
        self.seed_genomes = genomes;
        self
    }

    pub fn options(&self) -> &EvolutionOptions {
        &self.options
    }

    pub fn space(&self) -> &GeneSpace {
        &self.space
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Evolves until the best score reaches `target_score` or `max_steps`
    /// generations have been bred.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` for invalid options or seed
    /// genomes of the wrong length, and aborts with the evaluator's error if
    /// any scoring fails.
    pub fn run(&self, target_score: f64, max_steps: usize) -> Result<EvolutionOutcome> {
        self.run_with_observer(target_score, max_steps, |_| {})
    }

    /// Same as [`EvolutionLauncher::run`], calling `observer` after every
    /// generation.
    pub fn run_with_observer<F>(
        &self,
        target_score: f64,
        max_steps: usize,
        mut observer: F,
    ) -> Result<EvolutionOutcome>
    where
        F: FnMut(&GenerationReport),
    {
        self.options.validate()?;
        self.validate_seed_genomes()?;

        let pool = WorkerPool::new(self.options.get_threads())?;
        let rng = match self.options.get_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };
        let mut ctx = RunContext {
            rng,
            population: Population::default(),
            state: RunState::Initializing,
        };

        if self.logs(LogLevel::Minimal) {
            info!(
                genes = self.space.len(),
                max_population = self.options.get_max_population(),
                threads = pool.threads(),
                target_score,
                max_steps,
                "starting evolution"
            );
        }

        ctx.population = self.initial_population(&mut ctx.rng)?;
        ctx.state = RunState::Evolving;

        let mut steps = 0;
        while ctx.state == RunState::Evolving {
            if steps == max_steps {
                ctx.state = RunState::Exhausted;
                break;
            }
            steps += 1;

            let report = self.breed_generation(&pool, &mut ctx, steps, max_steps)?;
            observer(&report);

            if self.logs(LogLevel::Verbose) {
                debug!(
                    step = report.step,
                    best_score = report.best_score,
                    mean_score = report.mean_score,
                    population = report.population_size,
                    offset_multiplier = report.offset_multiplier,
                    "generation bred"
                );
            }
            let interval = self.options.get_report_interval();
            if self.logs(LogLevel::Minimal) && interval > 0 && steps % interval == 0 {
                info!(
                    step = steps,
                    best_score = report.best_score,
                    target_score,
                    "evolution progress"
                );
            }

            if report.best_score as f64 >= target_score {
                ctx.state = RunState::Converged;
            }
        }

        let success = ctx.state == RunState::Converged;
        let best = ctx.population.top(REPORTED_BEST).to_vec();

        if self.logs(LogLevel::Minimal) {
            info!(
                success,
                steps,
                best_score = best.first().map(Individual::score),
                "evolution finished"
            );
        }

        Ok(EvolutionOutcome {
            success,
            state: ctx.state,
            steps,
            best,
        })
    }

    fn initial_population(&self, rng: &mut RandomNumberGenerator) -> Result<Population> {
        let max_population = self.options.get_max_population();
        let mut individuals = Vec::with_capacity(max_population.max(self.seed_genomes.len()));

        for genome in &self.seed_genomes {
            individuals.push(evaluate(&self.evaluator, genome.clone())?);
        }
        while individuals.len() < max_population {
            individuals.push(evaluate(&self.evaluator, mutate(&self.space, rng))?);
        }

        let mut population = Population::from_unsorted(individuals);
        population.truncate(max_population);
        Ok(population)
    }

    fn breed_generation(
        &self,
        pool: &WorkerPool,
        ctx: &mut RunContext,
        step: usize,
        max_steps: usize,
    ) -> Result<GenerationReport> {
        let progress = step as f64 / max_steps as f64;
        let offset_multiplier = self.options.get_offset_schedule().multiplier(progress);

        let mut elite = ctx.population.top(self.options.get_elite_bound()).to_vec();
        if self.options.get_inject_novelty() {
            elite.push(evaluate(&self.evaluator, mutate(&self.space, &mut ctx.rng))?);
        }

        let plan = BreedPlan::from_options(&self.options, offset_multiplier);
        let mut next = pool.breed(
            &self.space,
            &elite,
            &self.evaluator,
            &plan,
            ctx.rng.next_seed(),
        )?;
        next.extend_from_slice(ctx.population.top(self.options.get_elitism()));

        let mut population = Population::from_unsorted(next);
        population.truncate(self.options.get_max_population());
        debug_assert!(population.is_sorted());

        let best_score = population
            .best()
            .map_err(|_| {
                GeneticError::Evolution(format!("No offspring produced in generation {}", step))
            })?
            .score();
        let report = GenerationReport {
            step,
            max_steps,
            best_score,
            mean_score: population.mean_score().unwrap_or_default(),
            population_size: population.len(),
            offset_multiplier,
        };

        ctx.population = population;
        Ok(report)
    }

    fn validate_seed_genomes(&self) -> Result<()> {
        match self
            .seed_genomes
            .iter()
            .position(|genome| genome.len() != self.space.len())
        {
            Some(idx) => Err(GeneticError::Configuration(format!(
                "Seed genome {} has {} genes, expected {}",
                idx,
                self.seed_genomes[idx].len(),
                self.space.len()
            ))),
            None => Ok(()),
        }
    }

    fn logs(&self, level: LogLevel) -> bool {
        match (self.options.get_log_level(), level) {
            (LogLevel::None, _) => false,
            (LogLevel::Verbose, _) => true,
            (LogLevel::Minimal, LogLevel::Minimal) => true,
            (LogLevel::Minimal, _) => false,
        }
    }
}
