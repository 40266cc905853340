//! # Breeding
//!
//! Parallel offspring production. A [`BreedingWorker`] crosses all ordered
//! pairs of a shared elite view on one thread; the [`WorkerPool`] fans a fixed
//! number of workers out per generation and joins their batches.
pub mod pool;
pub mod worker;

pub use pool::WorkerPool;
pub use worker::{BreedPlan, BreedingWorker};
