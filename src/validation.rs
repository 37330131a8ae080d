//! Input validation for timetabling problems.
//!
//! Checks structural integrity of the registry and the slot template
//! before the search starts. Detects:
//! - Duplicate entity names
//! - Entity ids that do not match their registry position
//! - Lessons referencing missing teachers, subjects or classes
//! - Classes without a slot template, templates for unknown classes
//! - Class templates whose day width differs from the shared K
//! - An empty lesson set or a zero-width day
//! - Out-of-range subject difficulty
//!
//! All problems are collected; validation does not stop at the first one.

use std::collections::HashSet;
use std::fmt;

use crate::models::{Registry, SlotTemplate};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share a name.
    DuplicateName,
    /// A lesson or template references an entity that doesn't exist.
    InvalidReference,
    /// A class has no slot template.
    MissingTemplate,
    /// The template has no slots per day, or a class grid has the wrong K.
    TemplateShape,
    /// An entity's id does not match its position in the registry.
    IdMismatch,
    /// There are no lessons to schedule.
    EmptyLessonSet,
    /// A numeric field is outside its allowed range.
    InvalidRange,
}

impl ValidationError {
    /// Creates a validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

/// Validates a registry and its slot template.
///
/// Checks:
/// 1. No duplicate teacher, subject or class names
/// 2. Every entity id equals its position in the registry
/// 3. Subject difficulty within 0-10
/// 4. At least one lesson
/// 5. All lesson references point to existing entities
/// 6. K (lessons per day) is positive
/// 7. Every class has a template, and every template belongs to a class
/// 8. Every class template is K slots wide
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(registry: &Registry, template: &SlotTemplate) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique(
        "teacher",
        registry.teachers().iter().map(|t| t.name.as_str()),
        &mut errors,
    );
    check_unique(
        "subject",
        registry.subjects().iter().map(|s| s.name.as_str()),
        &mut errors,
    );
    check_unique(
        "class",
        registry.classes().iter().map(|c| c.name.as_str()),
        &mut errors,
    );

    check_ids(
        "teacher",
        registry.teachers().iter().map(|t| t.id.index()),
        &mut errors,
    );
    check_ids(
        "subject",
        registry.subjects().iter().map(|s| s.id.index()),
        &mut errors,
    );
    check_ids(
        "class",
        registry.classes().iter().map(|c| c.id.index()),
        &mut errors,
    );
    check_ids(
        "lesson",
        registry.lessons().iter().map(|l| l.id.index()),
        &mut errors,
    );

    for subject in registry.subjects() {
        if subject.difficulty > 10 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidRange,
                format!(
                    "Subject '{}' has difficulty {} (allowed 0-10)",
                    subject.name, subject.difficulty
                ),
            ));
        }
    }

    if registry.lessons().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyLessonSet,
            "Registry contains no lessons",
        ));
    }

    // Check lesson references
    for lesson in registry.lessons() {
        if registry.teacher(lesson.teacher_id).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!(
                    "Lesson {} references unknown teacher {}",
                    lesson.id, lesson.teacher_id
                ),
            ));
        }
        if registry.subject(lesson.subject_id).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!(
                    "Lesson {} references unknown subject {}",
                    lesson.id, lesson.subject_id
                ),
            ));
        }
        if registry.class(lesson.class_id).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!(
                    "Lesson {} references unknown class {}",
                    lesson.id, lesson.class_id
                ),
            ));
        }
    }

    // Check template coverage
    if template.lessons_per_day() == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::TemplateShape,
            "Slot template has zero lessons per day",
        ));
    }
    for class in registry.classes() {
        if !template.contains(class.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::MissingTemplate,
                format!("Class '{}' has no slot template", class.name),
            ));
        }
    }
    for class_id in template.class_ids() {
        if registry.class(class_id).is_none() {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidReference,
                format!("Slot template given for unknown class {class_id}"),
            ));
        }
        if let Some(grid) = template.get(class_id) {
            if grid.lessons_per_day() != template.lessons_per_day() {
                errors.push(ValidationError::new(
                    ValidationErrorKind::TemplateShape,
                    format!(
                        "Slot template of class {class_id} has {} lessons per day, expected {}",
                        grid.lessons_per_day(),
                        template.lessons_per_day()
                    ),
                ));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_ids(kind: &str, ids: impl Iterator<Item = usize>, errors: &mut Vec<ValidationError>) {
    for (position, id) in ids.enumerate() {
        if id != position {
            errors.push(ValidationError::new(
                ValidationErrorKind::IdMismatch,
                format!("{kind} at position {position} carries id {id}"),
            ));
        }
    }
}

fn check_unique<'a>(
    kind: &str,
    names: impl Iterator<Item = &'a str>,
    errors: &mut Vec<ValidationError>,
) {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateName,
                format!("Duplicate {kind} name: {name}"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ClassId, Lesson, SchoolClass, SlotType, Subject, SubjectId, Teacher, TeacherId,
    };

    fn sample_problem() -> (Registry, SlotTemplate) {
        let mut r = Registry::new();
        let t = r.add_teacher(Teacher::new("Shevchenko T.H."));
        let s = r.add_subject(Subject::new("History"));
        let c = r.add_class(SchoolClass::new("7-B"));
        r.add_lesson(Lesson::new(c, s, t));

        let mut template = SlotTemplate::new(4);
        template
            .insert_rows(c, vec![vec![SlotType::Online; 4]; 7])
            .unwrap();
        (r, template)
    }

    #[test]
    fn test_valid_problem() {
        let (r, t) = sample_problem();
        assert!(validate_problem(&r, &t).is_ok());
    }

    #[test]
    fn test_duplicate_teacher_name() {
        let (mut r, t) = sample_problem();
        r.add_teacher(Teacher::new("Shevchenko T.H."));

        let errors = validate_problem(&r, &t).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateName && e.message.contains("teacher")));
    }

    #[test]
    fn test_missing_template() {
        let (mut r, t) = sample_problem();
        r.add_class(SchoolClass::new("8-A"));

        let errors = validate_problem(&r, &t).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::MissingTemplate && e.message.contains("8-A")));
    }

    #[test]
    fn test_template_for_unknown_class() {
        let (r, mut t) = sample_problem();
        t.insert_rows(ClassId(5), vec![vec![SlotType::Online; 4]; 7])
            .unwrap();

        let errors = validate_problem(&r, &t).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidReference));
    }

    #[test]
    fn test_dangling_lesson_references() {
        let (mut r, t) = sample_problem();
        r.add_lesson(Lesson::new(ClassId(0), SubjectId(7), TeacherId(8)));

        let errors = validate_problem(&r, &t).unwrap_err();
        let refs = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::InvalidReference)
            .count();
        assert_eq!(refs, 2);
    }

    #[test]
    fn test_empty_lessons_and_zero_width() {
        let r = Registry::new();
        let t = SlotTemplate::new(0);

        let errors = validate_problem(&r, &t).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::EmptyLessonSet));
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::TemplateShape));
    }

    #[test]
    fn test_difficulty_out_of_range() {
        let (mut r, t) = sample_problem();
        r.add_subject(Subject::new("Chemistry").with_difficulty(11));

        let errors = validate_problem(&r, &t).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::InvalidRange));
    }

    #[test]
    fn test_template_width_mismatch() {
        let (r, _) = sample_problem();
        let json = r#"{
            "lessons_per_day": 2,
            "classes": {
                "0": {"lessons_per_day": 3, "cells": [
                    "ONLINE", "ONLINE", "ONLINE", "ONLINE", "ONLINE", "ONLINE", "ONLINE",
                    "ONLINE", "ONLINE", "ONLINE", "ONLINE", "ONLINE", "ONLINE", "ONLINE",
                    "ONLINE", "ONLINE", "ONLINE", "ONLINE", "ONLINE", "ONLINE", "ONLINE"
                ]}
            }
        }"#;
        let t: SlotTemplate = serde_json::from_str(json).unwrap();

        let errors = validate_problem(&r, &t).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::TemplateShape && e.message.contains("expected 2")));
    }

    #[test]
    fn test_registry_id_mismatch() {
        let (r, t) = sample_problem();
        let mut value = serde_json::to_value(&r).unwrap();
        value["teachers"][0]["id"] = serde_json::json!(3);
        value["lessons"][0]["id"] = serde_json::json!(9);
        let tampered: Registry = serde_json::from_value(value).unwrap();

        let errors = validate_problem(&tampered, &t).unwrap_err();
        let mismatches: Vec<_> = errors
            .iter()
            .filter(|e| e.kind == ValidationErrorKind::IdMismatch)
            .collect();
        assert_eq!(mismatches.len(), 2);
        assert!(mismatches[0].message.starts_with("teacher"));
        assert!(mismatches[1].message.starts_with("lesson"));
    }
}
