//! # GeneSpace
//!
//! The `GeneSpace` describes the search space: one inclusive `(min, max)`
//! integer bound per gene position. It is validated once at construction and
//! then shared read-only by every breeding worker.
//!
//! ## Example
//!
//! ```rust
//! use genpool::gene_space::{GeneRange, GeneSpace};
//!
//! let space = GeneSpace::uniform(4, 0, 10).unwrap();
//! assert_eq!(space.len(), 4);
//! assert_eq!(space.range(0), Some(GeneRange::new(0, 10)));
//!
//! // Inverted bounds are rejected before any evolution starts.
//! assert!(GeneSpace::new(vec![GeneRange::new(5, 1)]).is_err());
//! ```

use crate::error::{GeneticError, Result};

/// Inclusive bounds of a single gene.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneRange {
    pub min: i64,
    pub max: i64,
}

impl GeneRange {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// Returns `max - min`.
    ///
    /// Ranges accepted by [`GeneSpace::new`] always have a span that fits in
    /// an `i64`.
    pub fn span(&self) -> i64 {
        self.max - self.min
    }
}

impl From<(i64, i64)> for GeneRange {
    fn from((min, max): (i64, i64)) -> Self {
        Self::new(min, max)
    }
}

/// Ordered per-gene bounds defining the genome length.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneSpace {
    ranges: Vec<GeneRange>,
}

impl GeneSpace {
    /// Creates a gene space from explicit bounds.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if `ranges` is empty, if any
    /// bound has `min > max`, or if `max - min` does not fit in an `i64`.
    pub fn new(ranges: Vec<GeneRange>) -> Result<Self> {
        if ranges.is_empty() {
            return Err(GeneticError::Configuration(
                "Gene space must contain at least one gene".to_string(),
            ));
        }

        if let Some((idx, range)) = ranges.iter().enumerate().find(|(_, r)| r.min > r.max) {
            return Err(GeneticError::Configuration(format!(
                "Gene {} has min ({}) greater than max ({})",
                idx, range.min, range.max
            )));
        }

        if let Some((idx, range)) = ranges
            .iter()
            .enumerate()
            .find(|(_, r)| r.max.checked_sub(r.min).is_none())
        {
            return Err(GeneticError::Configuration(format!(
                "Gene {} range [{}, {}] is too wide",
                idx, range.min, range.max
            )));
        }

        Ok(Self { ranges })
    }

    /// Creates a gene space from parallel `mins` and `maxs` slices.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` when the slices differ in length,
    /// in addition to the checks performed by [`GeneSpace::new`].
    pub fn from_bounds(mins: &[i64], maxs: &[i64]) -> Result<Self> {
        if mins.len() != maxs.len() {
            return Err(GeneticError::Configuration(format!(
                "Bounds length mismatch: {} minimums but {} maximums",
                mins.len(),
                maxs.len()
            )));
        }

        Self::new(
            mins.iter()
                .zip(maxs)
                .map(|(&min, &max)| GeneRange::new(min, max))
                .collect(),
        )
    }

    /// Creates a gene space of `length` genes sharing the same bounds.
    pub fn uniform(length: usize, min: i64, max: i64) -> Result<Self> {
        Self::new(vec![GeneRange::new(min, max); length])
    }

    /// Number of genes in every genome of this space.
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn range(&self, idx: usize) -> Option<GeneRange> {
        self.ranges.get(idx).copied()
    }

    pub fn ranges(&self) -> &[GeneRange] {
        &self.ranges
    }
}
