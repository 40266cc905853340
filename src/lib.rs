pub mod breeding;
pub mod caching;
pub mod error;
pub mod evolution;
pub mod gene_space;
pub mod operators;
pub mod population;
pub mod rng;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result};
pub use evolution::{run, Evaluator, EvolutionLauncher, EvolutionOptions, EvolutionOutcome};
pub use gene_space::{GeneRange, GeneSpace};
pub use population::{Genome, Individual, Population};
