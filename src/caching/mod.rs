//! # Caching Module
//!
//! Evaluator wrappers that memoize scores by genome. Crossover frequently
//! reproduces a parent exactly, so populations carry many duplicate genomes
//! and an expensive evaluator benefits from remembering them.
//!
//! Two flavours are provided:
//!
//! - [`CachedEvaluator`] shares one map between every worker thread behind a
//!   mutex;
//! - [`ThreadLocalCachedEvaluator`] keeps one map per worker thread and never
//!   contends.
//!
//! Failed evaluations are never cached.
//!
//! Both caches grow with every distinct genome scored, which over a long run
//! with a large population can reach millions of entries. Use
//! [`CachedEvaluator::with_max_entries`] to bound the shared cache, or call
//! `clear_cache` between runs.
//!
//! ## Example
//!
//! ```rust
//! use genpool::caching::CachedEvaluator;
//! use genpool::evolution::Evaluator;
//!
//! let cached = CachedEvaluator::new(|genome: &[i64]| genome.iter().sum::<i64>());
//! assert_eq!(cached.score(&[1, 2, 3]).unwrap(), 6);
//! assert_eq!(cached.score(&[1, 2, 3]).unwrap(), 6);
//! assert_eq!(cached.cache_size(), 1);
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::Result;
use crate::evolution::Evaluator;
use crate::population::Genome;

/// An evaluator wrapper sharing one score cache across all threads.
#[derive(Debug, Clone)]
pub struct CachedEvaluator<E>
where
    E: Evaluator,
{
    evaluator: E,
    cache: Arc<Mutex<HashMap<Genome, i64>>>,
    max_entries: Option<usize>,
}

impl<E> CachedEvaluator<E>
where
    E: Evaluator,
{
    /// Creates a new cached evaluator wrapping `evaluator`.
    pub fn new(evaluator: E) -> Self {
        Self::with_cache(evaluator, HashMap::new())
    }

    /// Creates a new cached evaluator with a pre-populated cache.
    pub fn with_cache(evaluator: E, cache: HashMap<Genome, i64>) -> Self {
        Self {
            evaluator,
            cache: Arc::new(Mutex::new(cache)),
            max_entries: None,
        }
    }

    /// Stops caching new scores once `max_entries` genomes are stored.
    ///
    /// Cached scores are still served; genomes that do not fit are scored by
    /// the wrapped evaluator every time.
    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = Some(max_entries);
        self
    }

    /// Returns a reference to the wrapped evaluator.
    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Returns the number of cached scores.
    pub fn cache_size(&self) -> usize {
        self.lock().len()
    }

    pub fn clear_cache(&self) {
        self.lock().clear();
    }

    /// Returns a copy of the cache.
    pub fn get_cache(&self) -> HashMap<Genome, i64> {
        self.lock().clone()
    }

    // A panic inside another scorer cannot leave the map half-written, so a
    // poisoned lock is still safe to use.
    fn lock(&self) -> MutexGuard<'_, HashMap<Genome, i64>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<E> Evaluator for CachedEvaluator<E>
where
    E: Evaluator,
{
    fn score(&self, genome: &[i64]) -> Result<i64> {
        if let Some(score) = self.lock().get(genome) {
            return Ok(*score);
        }

        // The lock is not held while scoring, two threads may score the same
        // genome once each.
        let score = self.evaluator.score(genome)?;
        let mut cache = self.lock();
        if self.max_entries.map_or(true, |max| cache.len() < max) {
            cache.insert(genome.to_vec(), score);
        }
        Ok(score)
    }
}

/// An evaluator wrapper keeping a separate score cache per thread.
#[derive(Debug, Clone)]
pub struct ThreadLocalCachedEvaluator<E>
where
    E: Evaluator,
{
    evaluator: E,
    cache: Arc<thread_local::ThreadLocal<RefCell<HashMap<Genome, i64>>>>,
}

impl<E> ThreadLocalCachedEvaluator<E>
where
    E: Evaluator,
{
    pub fn new(evaluator: E) -> Self {
        Self {
            evaluator,
            cache: Arc::new(thread_local::ThreadLocal::new()),
        }
    }

    /// Returns a reference to the wrapped evaluator.
    pub fn inner(&self) -> &E {
        &self.evaluator
    }

    /// Clears the cache of the calling thread.
    pub fn clear_cache(&self) {
        if let Some(cell) = self.cache.get() {
            cell.borrow_mut().clear();
        }
    }

    /// Returns the number of scores cached by the calling thread.
    pub fn cache_size(&self) -> usize {
        self.cache.get().map_or(0, |cell| cell.borrow().len())
    }
}

impl<E> Evaluator for ThreadLocalCachedEvaluator<E>
where
    E: Evaluator,
{
    fn score(&self, genome: &[i64]) -> Result<i64> {
        let cell = self.cache.get_or_default();

        if let Some(score) = cell.borrow().get(genome) {
            return Ok(*score);
        }

        let score = self.evaluator.score(genome)?;
        cell.borrow_mut().insert(genome.to_vec(), score);
        Ok(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GeneticError;
    use crate::evolution::FallibleEvaluator;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, Clone)]
    struct CountingEvaluator {
        evaluations: Arc<AtomicUsize>,
    }

    impl CountingEvaluator {
        fn new() -> Self {
            Self {
                evaluations: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn get_evaluations(&self) -> usize {
            self.evaluations.load(Ordering::SeqCst)
        }
    }

    impl Evaluator for CountingEvaluator {
        fn score(&self, genome: &[i64]) -> Result<i64> {
            self.evaluations.fetch_add(1, Ordering::SeqCst);
            Ok(genome.iter().map(|g| -(g - 50).abs()).sum())
        }
    }

    #[test]
    fn test_cached_evaluator() {
        let evaluator = CountingEvaluator::new();
        let cached = CachedEvaluator::new(evaluator.clone());

        let score1 = cached.score(&[10]).unwrap();
        assert_eq!(evaluator.get_evaluations(), 1);

        let score2 = cached.score(&[10]).unwrap();
        assert_eq!(evaluator.get_evaluations(), 1);
        assert_eq!(score1, score2);

        let score3 = cached.score(&[20]).unwrap();
        assert_eq!(evaluator.get_evaluations(), 2);
        assert_ne!(score1, score3);

        assert_eq!(cached.cache_size(), 2);

        cached.clear_cache();
        assert_eq!(cached.cache_size(), 0);

        cached.score(&[10]).unwrap();
        assert_eq!(evaluator.get_evaluations(), 3);
    }

    #[test]
    fn test_thread_local_cached_evaluator() {
        let evaluator = CountingEvaluator::new();
        let cached = ThreadLocalCachedEvaluator::new(evaluator.clone());

        let score1 = cached.score(&[10, 10]).unwrap();
        let score2 = cached.score(&[10, 10]).unwrap();
        assert_eq!(score1, score2);
        assert_eq!(evaluator.get_evaluations(), 1);

        cached.score(&[20, 20]).unwrap();
        assert_eq!(evaluator.get_evaluations(), 2);
        assert_eq!(cached.cache_size(), 2);

        cached.clear_cache();
        assert_eq!(cached.cache_size(), 0);
    }

    #[test]
    fn test_with_cache() {
        let evaluator = CountingEvaluator::new();
        let mut cache = HashMap::new();
        cache.insert(vec![10], 99);

        let cached = CachedEvaluator::with_cache(evaluator.clone(), cache);
        assert_eq!(cached.score(&[10]).unwrap(), 99);
        assert_eq!(evaluator.get_evaluations(), 0);

        let cache = cached.get_cache();
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&vec![10]), Some(&99));
    }

    #[test]
    fn test_max_entries_bounds_cache() {
        let evaluator = CountingEvaluator::new();
        let cached = CachedEvaluator::new(evaluator.clone()).with_max_entries(2);

        for gene in 0..10 {
            cached.score(&[gene]).unwrap();
        }
        assert_eq!(cached.cache_size(), 2);
        assert_eq!(evaluator.get_evaluations(), 10);

        // Stored genomes are still served from the cache.
        cached.score(&[0]).unwrap();
        cached.score(&[1]).unwrap();
        assert_eq!(evaluator.get_evaluations(), 10);

        // Genomes that did not fit are scored again.
        assert_eq!(cached.score(&[9]).unwrap(), evaluator.score(&[9]).unwrap());
        assert_eq!(evaluator.get_evaluations(), 12);
    }

    #[test]
    fn test_failures_are_not_cached() {
        let cached = CachedEvaluator::new(FallibleEvaluator::new(|_genome: &[i64]| {
            Err(GeneticError::FitnessCalculation("unavailable".to_string()))
        }));

        assert!(cached.score(&[1]).is_err());
        assert_eq!(cached.cache_size(), 0);
    }
}
