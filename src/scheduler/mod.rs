//! Greedy timetable placement and scoring.
//!
//! Decodes a lesson ordering into a concrete timetable under hard
//! placement constraints and computes its three-objective fitness.
//!
//! # Algorithm
//!
//! `TimetableBuilder` places lessons first-fit in ordering order. It is not
//! optimal on its own; the ordering is the decision variable explored by
//! the [`ga`](crate::ga) module.
//!
//! # Objectives
//!
//! | Objective | Meaning |
//! |-----------|---------|
//! | f1 | Student hardship |
//! | f2 | Didactic quality penalty |
//! | f3 | Teacher discomfort |

mod builder;
pub mod scoring;
pub mod travel;

pub use builder::TimetableBuilder;
pub use scoring::count_gaps;
