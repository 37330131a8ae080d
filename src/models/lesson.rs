//! Lesson model.
//!
//! A lesson is one weekly teaching period of a subject, for a class, by a
//! teacher. The full set of lessons is fixed before optimization; the
//! search only decides the order in which they are placed.

use serde::{Deserialize, Serialize};

use super::{ClassId, LessonId, SubjectId, TeacherId};

/// One schedulable lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
    /// Arena identifier (assigned by the registry).
    pub id: LessonId,
    /// Attending class.
    pub class_id: ClassId,
    /// Taught subject.
    pub subject_id: SubjectId,
    /// Delivering teacher.
    pub teacher_id: TeacherId,
    /// Fortnightly lesson, counted as half a period of load.
    pub is_blinking: bool,
}

impl Lesson {
    /// Creates a regular (weekly) lesson.
    pub fn new(class_id: ClassId, subject_id: SubjectId, teacher_id: TeacherId) -> Self {
        Self {
            id: LessonId(0),
            class_id,
            subject_id,
            teacher_id,
            is_blinking: false,
        }
    }

    /// Marks the lesson as blinking (fortnightly).
    pub fn with_blinking(mut self, is_blinking: bool) -> Self {
        self.is_blinking = is_blinking;
        self
    }

    /// Weekly load contributed by this lesson: 1.0, or 0.5 when blinking.
    #[inline]
    pub fn load(&self) -> f64 {
        if self.is_blinking {
            0.5
        } else {
            1.0
        }
    }
}
