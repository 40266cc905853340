pub mod evaluator;
pub mod launcher;
pub mod options;

pub use evaluator::{Evaluator, FallibleEvaluator};
pub use launcher::{EvolutionLauncher, EvolutionOutcome, GenerationReport, RunState};
pub use options::{EvolutionOptions, LogLevel, OffsetSchedule};

use crate::{error::Result, gene_space::GeneSpace};

/// Runs an evolution with default options.
///
/// Returns once the best score reaches `target_score` or after `max_steps`
/// generations, whichever comes first. `outcome.success` tells which.
///
/// # Example
///
/// ```rust,no_run
/// use genpool::evolution;
/// use genpool::gene_space::GeneSpace;
///
/// let space = GeneSpace::uniform(50, 0, 10_000).unwrap();
/// let outcome = evolution::run(space, |genome: &[i64]| genome.iter().sum::<i64>(), 1e6, 5_000).unwrap();
/// for individual in &outcome.best {
///     println!("{} {:?}", individual.score(), individual.genome());
/// }
/// ```
pub fn run<E>(
    space: GeneSpace,
    evaluator: E,
    target_score: f64,
    max_steps: usize,
) -> Result<EvolutionOutcome>
where
    E: Evaluator,
{
    EvolutionLauncher::new(space, evaluator).run(target_score, max_steps)
}
