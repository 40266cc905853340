//! # RandomNumberGenerator
//!
//! The `RandomNumberGenerator` struct wraps the `rand` crate's `StdRng` and
//! provides the integer draws the genome operators need.
//!
//! ## Example
//!
//! ```rust
//! use genpool::rng::RandomNumberGenerator;
//!
//! let mut rng = RandomNumberGenerator::from_seed(7);
//! let value: i64 = rng.gen_range(0..=10);
//! assert!((0..=10).contains(&value));
//! ```
//!
//! ## Per-worker generators
//!
//! Breeding workers never share a generator. Each one gets its own instance
//! derived from a generation seed and the worker index:
//!
//! ```rust
//! use genpool::rng::RandomNumberGenerator;
//!
//! let mut run_rng = RandomNumberGenerator::from_seed(42);
//! let generation_seed = run_rng.next_seed();
//! let workers: Vec<_> = (0..4)
//!     .map(|idx| RandomNumberGenerator::for_stream(generation_seed, idx))
//!     .collect();
//! assert_eq!(workers.len(), 4);
//! ```

use rand::{
    distributions::uniform::{SampleRange, SampleUniform},
    rngs::StdRng,
    Rng, RngCore, SeedableRng,
};

/// A wrapper around the `rand` crate's `StdRng`.
#[derive(Clone, Debug)]
pub struct RandomNumberGenerator {
    pub rng: StdRng,
}

impl RandomNumberGenerator {
    /// Creates a new `RandomNumberGenerator` instance seeded from the system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a new `RandomNumberGenerator` instance with a specific seed.
    ///
    /// This is useful for reproducible tests and benchmarks.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Creates a generator for one independent stream of a shared base seed.
    ///
    /// Streams with different indices are decorrelated by passing the
    /// combination through a splitmix64 finalizer before seeding.
    pub fn for_stream(base_seed: u64, stream: usize) -> Self {
        Self::from_seed(splitmix64(
            base_seed ^ (stream as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15),
        ))
    }

    /// Draws a value uniformly from `range`.
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: SampleUniform,
        R: SampleRange<T>,
    {
        self.rng.gen_range(range)
    }

    /// Draws a fresh 64-bit seed, used to spawn per-generation worker streams.
    pub fn next_seed(&mut self) -> u64 {
        self.rng.next_u64()
    }
}

impl Default for RandomNumberGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn splitmix64(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
