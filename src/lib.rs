//! School timetabling with multi-objective evolutionary search.
//!
//! Builds weekly class timetables under hard placement rules (slot
//! availability, on-site capability, travel time between school and home)
//! and optimizes three competing penalties: student hardship, didactic
//! quality and teacher comfort.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Teacher`, `Subject`, `SchoolClass`,
//!   `Lesson`, `Registry`, `SlotTemplate`, `Timetable`, `Objectives`
//! - **`scheduler`**: Greedy placement of a lesson ordering and its scoring
//! - **`ga`**: NSGA-II over lesson orderings, Pareto archive
//! - **`config`**: Penalty weights and evolution parameters
//! - **`input`**: Serializable problem definition (hour loads, day patterns)
//! - **`validation`**: Input integrity checks (duplicate names, references, templates)
//!
//! # Architecture
//!
//! The registry and slot template are built once and shared read-only.
//! Each fitness evaluation runs its own `TimetableBuilder` over private
//! buffers, so evaluations are independent and run in parallel.
//!
//! # References
//!
//! - Deb et al. (2002), "A Fast and Elitist Multiobjective Genetic
//!   Algorithm: NSGA-II"
//! - Schaerf (1999), "A Survey of Automated Timetabling"

pub mod config;
pub mod error;
pub mod ga;
pub mod input;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::TimetableError;
