//! # Genome Operators
//!
//! `mutate` draws a genome from scratch and `crossover` combines two parents
//! into a single child.
//!
//! Neither operator clamps its output to the gene bounds. `mutate` centres each
//! draw around zero using the gene's span only, and crossover offsets may walk
//! a value past either end of its range. Both behaviours are part of the search
//! dynamics and must stay as they are.
//!
//! ## Example
//!
//! ```rust
//! use genpool::gene_space::GeneSpace;
//! use genpool::operators::{crossover, mutate};
//! use genpool::rng::RandomNumberGenerator;
//!
//! let space = GeneSpace::uniform(8, 0, 10).unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(1);
//!
//! let a = mutate(&space, &mut rng);
//! let b = mutate(&space, &mut rng);
//! let child = crossover(&space, &a, &b, 3, 1, 0, &mut rng);
//! assert_eq!(child.len(), 8);
//! ```

use crate::{
    gene_space::{GeneRange, GeneSpace},
    population::Genome,
    rng::RandomNumberGenerator,
};

/// Genes between re-rolls of the parent-choice probability.
pub const PARENT_PROB_INTERVAL: usize = 10;
/// Genes between re-rolls of the offset probability.
pub const OFFSET_PROB_INTERVAL: usize = 3;
/// An offset is applied while the offset probability is below this value.
pub const OFFSET_THRESHOLD: i64 = 7;

pub const MAX_MUTATION_PROB: i64 = 10;
pub const MIN_OFFSET_MULTIPLIER: i64 = 1;
pub const MAX_OFFSET_MULTIPLIER: i64 = 10;

/// Draws one gene value: uniform in `[0, span]`, shifted down by `span / 2`.
#[inline]
pub fn mutate_gene(range: GeneRange, rng: &mut RandomNumberGenerator) -> i64 {
    let span = range.span();
    rng.gen_range(0..=span) - span / 2
}

/// Generates a completely random genome for `space`.
pub fn mutate(space: &GeneSpace, rng: &mut RandomNumberGenerator) -> Genome {
    space
        .ranges()
        .iter()
        .map(|&range| mutate_gene(range, rng))
        .collect()
}

/// Produces one child from `parent_a` and `parent_b`.
///
/// Two adaptive probabilities drive the gene-by-gene choice:
///
/// - the parent probability (0 to 110) is re-rolled every
///   [`PARENT_PROB_INTERVAL`] genes. At 100 or above the gene is mutated from
///   scratch, below 50 it comes from `parent_a`, otherwise from `parent_b`;
/// - the offset probability (0 to 100) is re-rolled every
///   [`OFFSET_PROB_INTERVAL`] genes. Below [`OFFSET_THRESHOLD`] the inherited
///   gene is nudged by `-1`, `0` or `+1` times `offset_multiplier`.
///
/// Each re-roll draws from a window widened by the previous value, so the
/// probabilities drift rather than being independent per gene.
///
/// `mutation_prob` is clamped to `[0, 10]` and `offset_multiplier` to
/// `[1, 10]`. `idx_shifter` phase-shifts both re-roll schedules so workers
/// breeding concurrently do not re-roll at the same gene positions.
pub fn crossover(
    space: &GeneSpace,
    parent_a: &[i64],
    parent_b: &[i64],
    mutation_prob: i64,
    offset_multiplier: i64,
    idx_shifter: usize,
    rng: &mut RandomNumberGenerator,
) -> Genome {
    debug_assert_eq!(parent_a.len(), space.len());
    debug_assert_eq!(parent_b.len(), space.len());

    let mutation_prob = mutation_prob.clamp(0, MAX_MUTATION_PROB);
    let offset_multiplier = offset_multiplier.clamp(MIN_OFFSET_MULTIPLIER, MAX_OFFSET_MULTIPLIER);

    let mut parent_prob = rng.gen_range(0..100_i64) + mutation_prob;
    let mut offset_prob = rng.gen_range(0..100_i64);

    space
        .ranges()
        .iter()
        .zip(parent_a.iter().zip(parent_b))
        .enumerate()
        .map(|(idx, (&range, (&gene_a, &gene_b)))| {
            let phase = idx_shifter.wrapping_add(idx);
            if phase % PARENT_PROB_INTERVAL == 0 {
                parent_prob = rng.gen_range(0..100 + parent_prob) % 100 + mutation_prob;
            }
            if phase % OFFSET_PROB_INTERVAL == 0 {
                offset_prob = rng.gen_range(0..100 + offset_prob) % 100;
            }

            if parent_prob >= 100 {
                return mutate_gene(range, rng);
            }

            let offset = if offset_prob < OFFSET_THRESHOLD {
                (rng.gen_range(0..3_i64) - 1) * offset_multiplier
            } else {
                0
            };

            if parent_prob < 50 {
                gene_a.saturating_add(offset)
            } else {
                gene_b.saturating_add(offset)
            }
        })
        .collect()
}
