//! Crate error type.
//!
//! Placement failures are not errors: a lesson that fits nowhere is
//! penalized and reported in [`Timetable::unplaced`](crate::models::Timetable).
//! The variants here are fatal: broken references between entities,
//! malformed templates, and invalid configuration.

use thiserror::Error;

use crate::models::{ClassId, LessonId, SubjectId, TeacherId};
use crate::validation::ValidationError;

/// Fatal errors of the timetabling core.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// An ordering refers to a lesson absent from the registry.
    #[error("lesson {0} is not in the registry")]
    UnknownLesson(LessonId),

    /// A lesson refers to a teacher absent from the registry.
    #[error("lesson {lesson} references unknown teacher {teacher}")]
    UnknownTeacher { lesson: LessonId, teacher: TeacherId },

    /// A lesson refers to a subject absent from the registry.
    #[error("lesson {lesson} references unknown subject {subject}")]
    UnknownSubject { lesson: LessonId, subject: SubjectId },

    /// A lesson refers to a class absent from the registry.
    #[error("lesson {lesson} references unknown class {class}")]
    UnknownClass { lesson: LessonId, class: ClassId },

    /// An ordering lists the same lesson twice.
    #[error("lesson {0} appears more than once in the ordering")]
    DuplicateLesson(LessonId),

    /// A class has no slot template.
    #[error("no slot template for class {0}")]
    MissingTemplate(ClassId),

    /// A slot template is not 7 days of K slots.
    #[error("slot template for class {class} is {days} days x {slots} slots, expected 7 x {expected}")]
    TemplateShape {
        class: ClassId,
        days: usize,
        slots: usize,
        expected: usize,
    },

    /// A name in an input definition does not match any entity.
    #[error("unknown {kind} '{name}'")]
    UnknownName { kind: &'static str, name: String },

    /// Configuration rejected before the search starts.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Structural validation of registry and template failed.
    #[error("problem validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
