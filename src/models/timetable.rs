//! Decoded timetable (solution) model.
//!
//! Produced by [`TimetableBuilder`](crate::scheduler::TimetableBuilder) for
//! one lesson ordering: per-class lesson grids, per-teacher booking grids,
//! the fitness tuple and the lessons that could not be placed.

use serde::{Deserialize, Serialize};

use super::{ClassId, LessonId, Objectives, TeacherId, WeekGrid};

/// Where a teacher physically is while delivering a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Location {
    /// On-site at school.
    School,
    /// Remote, at home.
    Home,
}

/// One entry of a teacher timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// Physical location of the teacher.
    pub location: Location,
    /// Lesson delivered in this slot.
    pub lesson_id: LessonId,
}

/// Class lesson grid: `None` marks a free slot.
pub type ClassSchedule = WeekGrid<Option<LessonId>>;

/// Teacher booking grid: `None` marks a free slot.
pub type TeacherTimeline = WeekGrid<Option<Booking>>;

/// A fully decoded timetable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Timetable {
    /// Fitness tuple.
    pub objectives: Objectives,
    /// Lesson grids, indexed by class id.
    pub class_schedules: Vec<ClassSchedule>,
    /// Booking grids, indexed by teacher id.
    pub teacher_timelines: Vec<TeacherTimeline>,
    /// Lessons that fit nowhere, in the order they were attempted.
    pub unplaced: Vec<LessonId>,
}

impl Timetable {
    /// Lesson grid of a class.
    pub fn class_schedule(&self, class_id: ClassId) -> Option<&ClassSchedule> {
        self.class_schedules.get(class_id.index())
    }

    /// Booking grid of a teacher.
    pub fn teacher_timeline(&self, teacher_id: TeacherId) -> Option<&TeacherTimeline> {
        self.teacher_timelines.get(teacher_id.index())
    }

    /// Number of lessons that could not be placed.
    pub fn unplaced_count(&self) -> usize {
        self.unplaced.len()
    }

    /// Whether every lesson was placed.
    pub fn is_complete(&self) -> bool {
        self.unplaced.is_empty()
    }

    /// Number of placed lessons across all classes.
    pub fn placed_count(&self) -> usize {
        self.class_schedules
            .iter()
            .map(|g| g.iter().filter(|(_, _, cell)| cell.is_some()).count())
            .sum()
    }

    /// Class, day and slot where a lesson was placed.
    pub fn placement_of(&self, lesson_id: LessonId) -> Option<(ClassId, usize, usize)> {
        self.class_schedules
            .iter()
            .enumerate()
            .find_map(|(c, grid)| {
                grid.iter()
                    .find(|(_, _, cell)| **cell == Some(lesson_id))
                    .map(|(day, slot, _)| (ClassId(c), day, slot))
            })
    }
}
