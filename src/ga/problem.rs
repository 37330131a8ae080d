//! Timetabling problem definition for the evolutionary search.
//!
//! Bridges the domain models (registry, slot template, penalty weights)
//! to the GA: creates random orderings, decodes them into timetables and
//! reports their fitness.
//!
//! # Example
//! ```
//! use u_timetable::config::PenaltyWeights;
//! use u_timetable::ga::TimetableProblem;
//! use u_timetable::models::{Lesson, Registry, SchoolClass, SlotTemplate, Subject, Teacher};
//!
//! let mut registry = Registry::new();
//! let t = registry.add_teacher(Teacher::new("Ivanova I.I."));
//! let s = registry.add_subject(Subject::new("Math"));
//! let c = registry.add_class(SchoolClass::new("5-A"));
//! registry.add_lesson(Lesson::new(c, s, t));
//!
//! let mut template = SlotTemplate::new(2);
//! template.insert_codes(c, &["oo", "oo", "oo", "oo", "oo", "", ""]).unwrap();
//!
//! let problem = TimetableProblem::new(registry, template, PenaltyWeights::default()).unwrap();
//! let eval = problem.evaluate(problem.universe()).unwrap();
//! assert_eq!(eval.unplaced, 0);
//! ```

use rand::Rng;

use super::chromosome::{Evaluation, LessonChromosome};
use crate::config::PenaltyWeights;
use crate::error::TimetableError;
use crate::models::{LessonId, Registry, SlotTemplate, Timetable};
use crate::scheduler::TimetableBuilder;
use crate::validation::validate_problem;

/// A validated timetabling problem.
///
/// Owns its inputs so it can be shared read-only across evaluation
/// threads.
#[derive(Debug, Clone)]
pub struct TimetableProblem {
    registry: Registry,
    template: SlotTemplate,
    weights: PenaltyWeights,
    universe: Vec<LessonId>,
}

impl TimetableProblem {
    /// Validates the inputs and creates the problem.
    ///
    /// # Errors
    /// [`TimetableError::Validation`] with every structural problem found,
    /// or [`TimetableError::InvalidConfig`] for unusable weights.
    pub fn new(
        registry: Registry,
        template: SlotTemplate,
        weights: PenaltyWeights,
    ) -> Result<Self, TimetableError> {
        validate_problem(&registry, &template).map_err(TimetableError::Validation)?;
        weights.validate()?;
        let universe = registry.lesson_ids();
        Ok(Self {
            registry,
            template,
            weights,
            universe,
        })
    }

    /// Entity registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Per-class slot template.
    pub fn template(&self) -> &SlotTemplate {
        &self.template
    }

    /// Penalty weights.
    pub fn weights(&self) -> &PenaltyWeights {
        &self.weights
    }

    /// Every lesson id, in registry order.
    pub fn universe(&self) -> &[LessonId] {
        &self.universe
    }

    /// Creates a random, unevaluated individual.
    pub fn create_individual<R: Rng>(&self, rng: &mut R) -> LessonChromosome {
        LessonChromosome::random(&self.universe, rng)
    }

    /// Decodes an ordering into a timetable.
    pub fn decode(&self, genes: &[LessonId]) -> Result<Timetable, TimetableError> {
        TimetableBuilder::new(&self.registry, &self.template, &self.weights).build(genes)
    }

    /// Fitness of an ordering.
    pub fn evaluate(&self, genes: &[LessonId]) -> Result<Evaluation, TimetableError> {
        let timetable = self.decode(genes)?;
        Ok(Evaluation {
            objectives: timetable.objectives,
            unplaced: timetable.unplaced_count(),
        })
    }
}
