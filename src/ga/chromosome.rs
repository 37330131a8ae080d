//! Permutation chromosome over lesson identifiers.
//!
//! # Encoding
//!
//! A chromosome is an ordering of every lesson id of the problem. The
//! [`TimetableBuilder`](crate::scheduler::TimetableBuilder) decodes it by
//! placing lessons first-fit in that order, so the ordering alone
//! determines the timetable.
//!
//! # Reference
//! Davis (1985), "Applying Adaptive Algorithms to Epistatic Domains"
//! (order crossover)

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::{LessonId, Objectives};

/// Cached fitness of an evaluated chromosome.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Fitness tuple of the decoded timetable.
    pub objectives: Objectives,
    /// Number of lessons the decoder could not place.
    pub unplaced: usize,
}

/// Lesson ordering with an optional cached fitness.
///
/// `fitness` is `None` until the chromosome is evaluated and is cleared by
/// every operator that changes the genes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonChromosome {
    /// Lesson ids in placement order.
    pub genes: Vec<LessonId>,
    /// Cached fitness.
    pub fitness: Option<Evaluation>,
}

impl LessonChromosome {
    /// Creates an unevaluated chromosome.
    pub fn new(genes: Vec<LessonId>) -> Self {
        Self {
            genes,
            fitness: None,
        }
    }

    /// Creates a uniformly random ordering of `universe`.
    pub fn random<R: Rng>(universe: &[LessonId], rng: &mut R) -> Self {
        let mut genes = universe.to_vec();
        genes.shuffle(rng);
        Self::new(genes)
    }

    /// Fitness tuple, if evaluated.
    #[inline]
    pub fn objectives(&self) -> Option<Objectives> {
        self.fitness.map(|e| e.objectives)
    }

    /// Whether a cached fitness is present.
    #[inline]
    pub fn is_evaluated(&self) -> bool {
        self.fitness.is_some()
    }

    /// Drops the cached fitness.
    pub fn invalidate(&mut self) {
        self.fitness = None;
    }

    /// Whether both chromosomes are evaluated and `self` Pareto-dominates `other`.
    pub fn dominates(&self, other: &LessonChromosome) -> bool {
        match (self.objectives(), other.objectives()) {
            (Some(a), Some(b)) => a.dominates(&b),
            _ => false,
        }
    }

    /// Whether the genes are a permutation of `universe`.
    pub fn is_permutation_of(&self, universe: &[LessonId]) -> bool {
        if self.genes.len() != universe.len() {
            return false;
        }
        let mut a = self.genes.clone();
        let mut b = universe.to_vec();
        a.sort_unstable();
        b.sort_unstable();
        a == b
    }
}

// ======================== Crossover ========================

/// Ordered crossover (OX) on two permutations.
///
/// Picks a random segment `[lo, hi]`. Child 1 keeps parent 1's genes inside
/// the segment at the same positions; the remaining positions are filled
/// left to right with parent 2's genes in parent 2's order, skipping those
/// already in the segment. Child 2 is built symmetrically. Both children
/// are permutations of the parents' gene set and carry no fitness.
///
/// Parents shorter than two genes, or of different lengths, are returned
/// as unevaluated copies.
pub fn ordered_crossover<R: Rng>(
    p1: &LessonChromosome,
    p2: &LessonChromosome,
    rng: &mut R,
) -> (LessonChromosome, LessonChromosome) {
    let n = p1.genes.len();
    if n < 2 || p2.genes.len() != n {
        return (
            LessonChromosome::new(p1.genes.clone()),
            LessonChromosome::new(p2.genes.clone()),
        );
    }

    let a = rng.random_range(0..n);
    let b = rng.random_range(0..n);
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };

    let child1 = ox_build_child(&p1.genes, &p2.genes, lo, hi);
    let child2 = ox_build_child(&p2.genes, &p1.genes, lo, hi);
    (LessonChromosome::new(child1), LessonChromosome::new(child2))
}

fn ox_build_child(template: &[LessonId], donor: &[LessonId], lo: usize, hi: usize) -> Vec<LessonId> {
    let segment: HashSet<LessonId> = template[lo..=hi].iter().copied().collect();
    let mut donor_iter = donor.iter().filter(|g| !segment.contains(*g));

    let mut child = Vec::with_capacity(template.len());
    for (i, gene) in template.iter().enumerate() {
        if (lo..=hi).contains(&i) {
            child.push(*gene);
        } else if let Some(g) = donor_iter.next() {
            child.push(*g);
        }
    }
    child
}

// ======================== Mutation ========================

/// Per-gene shuffle mutation.
///
/// Each position is, with probability `gene_probability`, swapped with a
/// different uniformly chosen position. The fitness is always cleared.
pub fn shuffle_mutation<R: Rng>(
    chromosome: &mut LessonChromosome,
    gene_probability: f64,
    rng: &mut R,
) {
    chromosome.invalidate();
    let n = chromosome.genes.len();
    if n < 2 {
        return;
    }
    let p = gene_probability.clamp(0.0, 1.0);
    for i in 0..n {
        if rng.random_bool(p) {
            let mut j = rng.random_range(0..n - 1);
            if j >= i {
                j += 1;
            }
            chromosome.genes.swap(i, j);
        }
    }
}
