//! # Population
//!
//! A `Population` is the scored set of individuals of one generation. It is
//! always kept sorted by descending score, so the elite subset is simply a
//! prefix of it.

use std::cmp::Reverse;

use crate::error::{GeneticError, OptionExt, Result};

/// A fixed-length integer vector representing one candidate solution.
pub type Genome = Vec<i64>;

/// A genome paired with the score the evaluator assigned to it.
///
/// The score is written once, when the individual is created, and cannot be
/// changed afterwards.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Individual {
    genome: Genome,
    score: i64,
}

impl Individual {
    pub fn new(genome: Genome, score: i64) -> Self {
        Self { genome, score }
    }

    pub fn genome(&self) -> &[i64] {
        &self.genome
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn into_genome(self) -> Genome {
        self.genome
    }
}

/// Sorts individuals by descending score. Ties keep their relative order.
pub fn sort_descending(individuals: &mut [Individual]) {
    individuals.sort_by_key(|individual| Reverse(individual.score));
}

/// An ordered collection of individuals, sorted by descending score.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    individuals: Vec<Individual>,
}

impl Population {
    /// Builds a population from individuals in any order.
    pub fn from_unsorted(mut individuals: Vec<Individual>) -> Self {
        sort_descending(&mut individuals);
        Self { individuals }
    }

    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    /// Returns the highest scoring individual.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if the population is empty.
    pub fn best(&self) -> Result<&Individual> {
        self.individuals
            .first()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// Returns the top `k` individuals, or all of them if fewer exist.
    pub fn top(&self, k: usize) -> &[Individual] {
        &self.individuals[..k.min(self.individuals.len())]
    }

    /// Drops everything past the first `max_len` individuals.
    pub fn truncate(&mut self, max_len: usize) {
        self.individuals.truncate(max_len);
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Individual> {
        self.individuals.iter()
    }

    pub fn into_vec(self) -> Vec<Individual> {
        self.individuals
    }

    /// Mean score, or `None` for an empty population.
    pub fn mean_score(&self) -> Option<f64> {
        if self.individuals.is_empty() {
            return None;
        }
        // Summed in i128 so scores near the i64 limits cannot overflow.
        let total: i128 = self
            .individuals
            .iter()
            .map(|individual| i128::from(individual.score))
            .sum();
        Some(total as f64 / self.individuals.len() as f64)
    }

    /// Checks that adjacent scores never increase.
    pub fn is_sorted(&self) -> bool {
        self.individuals
            .windows(2)
            .all(|pair| pair[0].score >= pair[1].score)
    }
}

impl<'a> IntoIterator for &'a Population {
    type Item = &'a Individual;
    type IntoIter = std::slice::Iter<'a, Individual>;

    fn into_iter(self) -> Self::IntoIter {
        self.individuals.iter()
    }
}
