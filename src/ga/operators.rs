//! Offspring generation for the (μ + λ) loop.
//!
//! Each offspring is produced by exactly one of three mutually exclusive
//! operations, chosen by a single uniform draw:
//!
//! | Draw | Operation |
//! |------|-----------|
//! | `< p_c` | Ordered crossover of two distinct random parents; first child kept |
//! | `< p_c + p_m` | Shuffle mutation of a clone of one random parent |
//! | otherwise | Reproduction: unchanged clone, fitness kept |
//!
//! # Usage
//!
//! ```
//! use u_timetable::config::EvolutionConfig;
//! use u_timetable::ga::operators::Variation;
//!
//! let v = Variation::from_config(&EvolutionConfig::default());
//! assert!((v.crossover_probability - 0.7).abs() < 1e-10);
//! ```

use rand::Rng;

use super::chromosome::{ordered_crossover, shuffle_mutation, LessonChromosome};
use crate::config::EvolutionConfig;

/// Variation probabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Variation {
    /// Probability that an offspring comes from crossover.
    pub crossover_probability: f64,
    /// Probability that an offspring comes from mutation.
    pub mutation_probability: f64,
    /// Per-gene swap probability inside a mutation.
    pub gene_mutation_probability: f64,
}

impl Default for Variation {
    fn default() -> Self {
        Self::from_config(&EvolutionConfig::default())
    }
}

impl Variation {
    /// Takes the probabilities of an evolution config.
    pub fn from_config(config: &EvolutionConfig) -> Self {
        Self {
            crossover_probability: config.crossover_probability,
            mutation_probability: config.mutation_probability,
            gene_mutation_probability: config.gene_mutation_probability,
        }
    }

    /// Produces `count` offspring from `parents`.
    ///
    /// Returns an empty vector when `parents` is empty. Crossover with a
    /// single parent recombines it with itself.
    pub fn offspring<R: Rng>(
        &self,
        parents: &[LessonChromosome],
        count: usize,
        rng: &mut R,
    ) -> Vec<LessonChromosome> {
        if parents.is_empty() {
            return Vec::new();
        }
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let draw: f64 = rng.random();
            let child = if draw < self.crossover_probability {
                let (i, j) = distinct_pair(parents.len(), rng);
                ordered_crossover(&parents[i], &parents[j], rng).0
            } else if draw < self.crossover_probability + self.mutation_probability {
                let mut child = parents[rng.random_range(0..parents.len())].clone();
                shuffle_mutation(&mut child, self.gene_mutation_probability, rng);
                child
            } else {
                parents[rng.random_range(0..parents.len())].clone()
            };
            out.push(child);
        }
        out
    }
}

/// Two distinct indices below `n`, or `(0, 0)` when `n < 2`.
fn distinct_pair<R: Rng>(n: usize, rng: &mut R) -> (usize, usize) {
    if n < 2 {
        return (0, 0);
    }
    let i = rng.random_range(0..n);
    let mut j = rng.random_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}
