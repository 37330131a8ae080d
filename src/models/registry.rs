//! Domain registry: an arena of all entities of one run.
//!
//! Ids are allocated sequentially on insertion, so a fresh registry is
//! built per run and independent runs never share id state. Entities hold
//! ids only; lookups go through the registry.

use serde::{Deserialize, Serialize};

use super::{ClassId, Lesson, LessonId, SchoolClass, Subject, SubjectId, Teacher, TeacherId};
use crate::error::TimetableError;

/// Immutable-after-load container of teachers, subjects, classes and lessons.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Registry {
    teachers: Vec<Teacher>,
    subjects: Vec<Subject>,
    classes: Vec<SchoolClass>,
    lessons: Vec<Lesson>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    // ======================== Insertion ========================

    /// Adds a teacher and returns its newly allocated id.
    pub fn add_teacher(&mut self, mut teacher: Teacher) -> TeacherId {
        let id = TeacherId(self.teachers.len());
        teacher.id = id;
        self.teachers.push(teacher);
        id
    }

    /// Adds a subject and returns its newly allocated id.
    pub fn add_subject(&mut self, mut subject: Subject) -> SubjectId {
        let id = SubjectId(self.subjects.len());
        subject.id = id;
        self.subjects.push(subject);
        id
    }

    /// Adds a class and returns its newly allocated id.
    pub fn add_class(&mut self, mut class: SchoolClass) -> ClassId {
        let id = ClassId(self.classes.len());
        class.id = id;
        self.classes.push(class);
        id
    }

    /// Adds a lesson and returns its newly allocated id.
    ///
    /// References are not checked here; see
    /// [`validate_problem`](crate::validation::validate_problem).
    pub fn add_lesson(&mut self, mut lesson: Lesson) -> LessonId {
        let id = LessonId(self.lessons.len());
        lesson.id = id;
        self.lessons.push(lesson);
        id
    }

    // ======================== Lookup ========================

    /// Looks up a lesson.
    pub fn lesson(&self, id: LessonId) -> Result<&Lesson, TimetableError> {
        self.lessons
            .get(id.index())
            .ok_or(TimetableError::UnknownLesson(id))
    }

    /// Looks up a teacher.
    pub fn teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teachers.get(id.index())
    }

    /// Looks up a subject.
    pub fn subject(&self, id: SubjectId) -> Option<&Subject> {
        self.subjects.get(id.index())
    }

    /// Looks up a class.
    pub fn class(&self, id: ClassId) -> Option<&SchoolClass> {
        self.classes.get(id.index())
    }

    /// Finds a teacher by display name.
    pub fn teacher_by_name(&self, name: &str) -> Option<&Teacher> {
        self.teachers.iter().find(|t| t.name == name)
    }

    /// Finds a subject by name.
    pub fn subject_by_name(&self, name: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Finds a class by name.
    pub fn class_by_name(&self, name: &str) -> Option<&SchoolClass> {
        self.classes.iter().find(|c| c.name == name)
    }

    /// Resolves the teacher, subject and class of a lesson.
    ///
    /// # Errors
    /// The first dangling reference found, as an integrity error.
    pub fn resolve(
        &self,
        id: LessonId,
    ) -> Result<(&Lesson, &Teacher, &Subject, &SchoolClass), TimetableError> {
        let lesson = self.lesson(id)?;
        let teacher = self
            .teacher(lesson.teacher_id)
            .ok_or(TimetableError::UnknownTeacher {
                lesson: id,
                teacher: lesson.teacher_id,
            })?;
        let subject = self
            .subject(lesson.subject_id)
            .ok_or(TimetableError::UnknownSubject {
                lesson: id,
                subject: lesson.subject_id,
            })?;
        let class = self
            .class(lesson.class_id)
            .ok_or(TimetableError::UnknownClass {
                lesson: id,
                class: lesson.class_id,
            })?;
        Ok((lesson, teacher, subject, class))
    }

    // ======================== Views ========================

    /// All teachers, in id order.
    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }

    /// All subjects, in id order.
    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    /// All classes, in id order.
    pub fn classes(&self) -> &[SchoolClass] {
        &self.classes
    }

    /// All lessons, in id order.
    pub fn lessons(&self) -> &[Lesson] {
        &self.lessons
    }

    /// The lesson-id universe explored by the search.
    pub fn lesson_ids(&self) -> Vec<LessonId> {
        self.lessons.iter().map(|l| l.id).collect()
    }

    /// Weekly load of a class: one per lesson, one half per blinking lesson.
    pub fn class_load(&self, class_id: ClassId) -> f64 {
        self.lessons
            .iter()
            .filter(|l| l.class_id == class_id)
            .map(Lesson::load)
            .sum()
    }
}
