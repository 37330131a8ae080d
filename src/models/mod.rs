//! Timetabling domain models.
//!
//! Provides the entities of a school timetabling problem, the registry that
//! owns them, slot templates, and the decoded timetable.
//!
//! # Domain Mappings
//!
//! | u-timetable | Generic scheduling |
//! |-------------|--------------------|
//! | Lesson | Activity |
//! | Teacher | Human resource with location |
//! | SchoolClass | Resource consuming a slot |
//! | SlotTemplate | Availability calendar |
//! | Timetable | Schedule |

mod grid;
mod ids;
mod lesson;
mod objectives;
mod registry;
mod school_class;
mod slot;
mod subject;
mod teacher;
mod timetable;

pub use grid::{WeekGrid, DAYS_PER_WEEK};
pub use ids::{ClassId, LessonId, SubjectId, TeacherId};
pub use lesson::Lesson;
pub use objectives::{Objective, Objectives, OBJECTIVE_COUNT};
pub use registry::Registry;
pub use school_class::SchoolClass;
pub use slot::{SlotTemplate, SlotType};
pub use subject::{Subject, HARD_SUBJECT_DIFFICULTY};
pub use teacher::Teacher;
pub use timetable::{Booking, ClassSchedule, Location, TeacherTimeline, Timetable};
