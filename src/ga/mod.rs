//! Multi-objective evolutionary search over lesson orderings.
//!
//! Implements a (μ + λ) NSGA-II loop whose individuals are permutations of
//! lesson ids. Each ordering is decoded by the greedy placement engine in
//! [`scheduler`](crate::scheduler) and scored on three objectives.
//!
//! # Encoding
//!
//! - **Genes**: every lesson id exactly once. Order = placement priority.
//! - **Fitness**: `(f1, f2, f3)` of the decoded timetable, all minimized.
//!
//! # Submodules
//!
//! - [`operators`]: offspring generation (crossover / mutation / reproduction)
//! - [`pareto`]: non-dominated sorting, crowding distance, archive
//!
//! # Reference
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic
//!   Algorithm: NSGA-II"
//! - Davis (1985), order crossover

mod chromosome;
pub mod operators;
pub mod pareto;
mod problem;
mod runner;

pub use chromosome::{ordered_crossover, shuffle_mutation, Evaluation, LessonChromosome};
pub use pareto::ParetoArchive;
pub use problem::TimetableProblem;
pub use runner::{EvolutionResult, GenerationStats, Nsga2Runner};
