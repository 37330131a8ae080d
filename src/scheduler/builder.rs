//! Greedy timetable builder (placement engine).
//!
//! Decodes one lesson ordering into a concrete timetable and scores it.
//!
//! # Algorithm
//!
//! For each lesson, in ordering order:
//! 1. Pass 1 skips UNWANTED slots; pass 2 (compromise) allows them and runs
//!    only if pass 1 found nothing.
//! 2. Slots are scanned slot-major: for slot 0..K, for day 0..7. The first
//!    feasible slot wins; earlier placements are never revisited.
//! 3. Feasible = class slot free, slot type placeable, OFFLINE only for
//!    teachers who can work on-site, teacher slot free, travel time kept.
//! 4. A lesson that fits nowhere is recorded as unplaced and penalized.
//!
//! After all lessons, class and teacher weeks are scored (see
//! [`scoring`](super::scoring)).
//!
//! # Complexity
//! O(n * 7K * K) where n = lessons, K = lessons per day.

use log::trace;

use super::scoring::{score_class_week, score_teacher_week};
use super::travel::{inherited_location, is_travel_feasible, target_location};
use crate::config::PenaltyWeights;
use crate::error::TimetableError;
use crate::models::{
    Booking, ClassSchedule, Lesson, LessonId, Location, Objectives, Registry, SlotTemplate,
    SlotType, Subject, Teacher, TeacherTimeline, Timetable, WeekGrid, DAYS_PER_WEEK,
};

/// Single-use placement engine for one ordering.
///
/// Owns fresh schedule and timeline buffers; the registry, template and
/// weights are shared read-only, so many builders can run in parallel.
///
/// # Example
///
/// ```
/// use u_timetable::config::PenaltyWeights;
/// use u_timetable::models::{Lesson, Registry, SchoolClass, SlotTemplate, Subject, Teacher};
/// use u_timetable::scheduler::TimetableBuilder;
///
/// let mut registry = Registry::new();
/// let t = registry.add_teacher(Teacher::new("Melnyk M.M."));
/// let s = registry.add_subject(Subject::new("Biology"));
/// let c = registry.add_class(SchoolClass::new("6-A"));
/// let lesson = registry.add_lesson(Lesson::new(c, s, t));
///
/// let mut template = SlotTemplate::new(4);
/// template.insert_codes(c, &["OOOO", "OOOO", "OOOO", "OOOO", "OOOO", "", ""]).unwrap();
///
/// let weights = PenaltyWeights::default();
/// let timetable = TimetableBuilder::new(&registry, &template, &weights)
///     .build(&[lesson])
///     .unwrap();
/// assert!(timetable.is_complete());
/// ```
#[derive(Debug)]
pub struct TimetableBuilder<'a> {
    registry: &'a Registry,
    template: &'a SlotTemplate,
    weights: &'a PenaltyWeights,
    schedules: Vec<ClassSchedule>,
    timelines: Vec<TeacherTimeline>,
    online_from_school: Vec<u32>,
    objectives: Objectives,
    unplaced: Vec<LessonId>,
}

impl<'a> TimetableBuilder<'a> {
    /// Creates a builder with empty grids sized from the registry and K.
    pub fn new(
        registry: &'a Registry,
        template: &'a SlotTemplate,
        weights: &'a PenaltyWeights,
    ) -> Self {
        let k = template.lessons_per_day();
        Self {
            registry,
            template,
            weights,
            schedules: vec![WeekGrid::new(k); registry.classes().len()],
            timelines: vec![WeekGrid::new(k); registry.teachers().len()],
            online_from_school: vec![0; registry.teachers().len()],
            objectives: Objectives::default(),
            unplaced: Vec::new(),
        }
    }

    /// Places every lesson of `ordering` and scores the result.
    ///
    /// # Errors
    /// Integrity errors (unknown or repeated lesson, dangling reference,
    /// missing class template). No partial result is returned.
    pub fn build(mut self, ordering: &[LessonId]) -> Result<Timetable, TimetableError> {
        let registry = self.registry;
        let template = self.template;
        let mut seen = vec![false; registry.lessons().len()];

        for &lesson_id in ordering {
            let (lesson, teacher, subject, _) = registry.resolve(lesson_id)?;
            if std::mem::replace(&mut seen[lesson_id.index()], true) {
                return Err(TimetableError::DuplicateLesson(lesson_id));
            }
            let slots = template
                .get(lesson.class_id)
                .ok_or(TimetableError::MissingTemplate(lesson.class_id))?;

            if !self.try_place(lesson, teacher, subject, slots) {
                trace!("lesson {lesson_id} could not be placed");
                self.unplaced.push(lesson_id);
                self.objectives.student_hardship += self.weights.unplaced_lesson;
            }
        }

        self.score_weeks()?;

        Ok(Timetable {
            objectives: self.objectives,
            class_schedules: self.schedules,
            teacher_timelines: self.timelines,
            unplaced: self.unplaced,
        })
    }

    fn try_place(
        &mut self,
        lesson: &Lesson,
        teacher: &Teacher,
        subject: &Subject,
        slots: &WeekGrid<SlotType>,
    ) -> bool {
        for compromise in [false, true] {
            for slot in 0..slots.lessons_per_day() {
                for day in 0..DAYS_PER_WEEK {
                    let slot_type = *slots.get(day, slot);
                    if slot_type == SlotType::Unwanted && !compromise {
                        continue;
                    }
                    if self.can_place(lesson, teacher, slot_type, day, slot) {
                        self.commit(lesson, teacher, subject, slot_type, day, slot);
                        return true;
                    }
                }
            }
        }
        false
    }

    fn can_place(
        &self,
        lesson: &Lesson,
        teacher: &Teacher,
        slot_type: SlotType,
        day: usize,
        slot: usize,
    ) -> bool {
        if self.schedules[lesson.class_id.index()].get(day, slot).is_some() {
            return false;
        }
        if !slot_type.is_placeable() {
            return false;
        }
        if slot_type == SlotType::Offline && !teacher.can_offline {
            return false;
        }
        let row = self.timelines[teacher.id.index()].day(day);
        if row[slot].is_some() {
            return false;
        }
        is_travel_feasible(row, slot, target_location(slot_type), teacher.travel_time)
    }

    fn commit(
        &mut self,
        lesson: &Lesson,
        teacher: &Teacher,
        subject: &Subject,
        slot_type: SlotType,
        day: usize,
        slot: usize,
    ) {
        let t = teacher.id.index();
        let location = if slot_type == SlotType::Offline {
            Location::School
        } else {
            inherited_location(self.timelines[t].day(day), slot)
        };

        self.schedules[lesson.class_id.index()].set(day, slot, Some(lesson.id));
        self.timelines[t].set(
            day,
            slot,
            Some(Booking {
                location,
                lesson_id: lesson.id,
            }),
        );

        if slot_type == SlotType::Unwanted {
            self.objectives.student_hardship += self.weights.unwanted_slot;
        }
        if subject.priority_offline && slot_type != SlotType::Offline {
            self.objectives.didactic_quality += self.weights.subject_mismatch;
        }
        if location == Location::School && slot_type != SlotType::Offline {
            self.online_from_school[t] += 1;
            if self.online_from_school[t] > teacher.max_online_from_school {
                self.objectives.teacher_comfort += self.weights.excess_online_from_school;
            }
        }
    }

    fn score_weeks(&mut self) -> Result<(), TimetableError> {
        for schedule in &self.schedules {
            let (student, didactic) = score_class_week(schedule, self.registry, self.weights)?;
            self.objectives.student_hardship += student;
            self.objectives.didactic_quality += didactic;
        }
        for (timeline, teacher) in self.timelines.iter().zip(self.registry.teachers()) {
            self.objectives.teacher_comfort += score_teacher_week(timeline, teacher, self.weights);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassId, SchoolClass, SubjectId, TeacherId};

    fn zero_weights() -> PenaltyWeights {
        PenaltyWeights {
            unplaced_lesson: 1000.0,
            unwanted_slot: 0.0,
            subject_mismatch: 0.0,
            excess_online_from_school: 0.0,
            student_gap: 0.0,
            teacher_gap: 0.0,
            difficulty_distribution: 0.0,
            max_lessons_per_day: 0.0,
            stack_violation: 0.0,
            stack_non_preferred: 0.0,
        }
    }

    /// Every day of the week uses the same code row.
    fn uniform(template: &mut SlotTemplate, class: ClassId, codes: &str) {
        template.insert_codes(class, &[codes; DAYS_PER_WEEK]).unwrap();
    }

    /// One teacher, one subject, one class with `n` lessons.
    fn single_class(n: usize, teacher: Teacher, codes: &str) -> (Registry, SlotTemplate) {
        let mut r = Registry::new();
        let t = r.add_teacher(teacher);
        let s = r.add_subject(Subject::new("Math").with_stack(10, 1).with_max_per_day(10));
        let c = r.add_class(SchoolClass::new("5-A"));
        for _ in 0..n {
            r.add_lesson(Lesson::new(c, s, t));
        }
        let mut template = SlotTemplate::new(codes.len());
        uniform(&mut template, c, codes);
        (r, template)
    }

    #[test]
    fn test_slot_major_scan_order() {
        let (r, t) = single_class(3, Teacher::new("A"), "OOOO");
        let w = zero_weights();
        let tt = TimetableBuilder::new(&r, &t, &w).build(&r.lesson_ids()).unwrap();

        // Slot 0 of Monday, Tuesday, Wednesday before slot 1 of any day.
        assert_eq!(tt.placement_of(LessonId(0)), Some((ClassId(0), 0, 0)));
        assert_eq!(tt.placement_of(LessonId(1)), Some((ClassId(0), 1, 0)));
        assert_eq!(tt.placement_of(LessonId(2)), Some((ClassId(0), 2, 0)));
    }

    #[test]
    fn test_empty_and_travel_slots_never_used() {
        let (r, t) = single_class(7, Teacher::new("A"), "-TO");
        let w = zero_weights();
        let tt = TimetableBuilder::new(&r, &t, &w).build(&r.lesson_ids()).unwrap();

        assert!(tt.is_complete());
        for id in r.lesson_ids() {
            let (_, _, slot) = tt.placement_of(id).unwrap();
            assert_eq!(slot, 2);
        }
    }

    #[test]
    fn test_unwanted_used_only_as_compromise() {
        // One ONLINE slot per day, one UNWANTED slot before it.
        let (r, t) = single_class(8, Teacher::new("A"), "WO");
        let w = PenaltyWeights {
            unwanted_slot: 5.0,
            ..zero_weights()
        };
        let tt = TimetableBuilder::new(&r, &t, &w).build(&r.lesson_ids()).unwrap();

        assert!(tt.is_complete());
        // First 7 lessons fill slot 1 on every day; the 8th falls back to
        // the unwanted slot 0 on Monday.
        assert_eq!(tt.placement_of(LessonId(6)), Some((ClassId(0), 6, 1)));
        assert_eq!(tt.placement_of(LessonId(7)), Some((ClassId(0), 0, 0)));
        assert!((tt.objectives.student_hardship - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_offline_requires_capable_teacher() {
        let (r, t) = single_class(1, Teacher::new("A").with_can_offline(false), "U");
        let w = zero_weights();
        let tt = TimetableBuilder::new(&r, &t, &w).build(&r.lesson_ids()).unwrap();

        assert_eq!(tt.unplaced, vec![LessonId(0)]);
        assert!((tt.objectives.student_hardship - 1000.0).abs() < 1e-10);
        assert_eq!(tt.placed_count(), 0);
    }

    #[test]
    fn test_offline_slot_puts_teacher_at_school() {
        let (r, t) = single_class(1, Teacher::new("A"), "U");
        let w = zero_weights();
        let tt = TimetableBuilder::new(&r, &t, &w).build(&r.lesson_ids()).unwrap();

        let booking = tt.teacher_timeline(TeacherId(0)).unwrap().get(0, 0).unwrap();
        assert_eq!(booking.location, Location::School);
        assert_eq!(booking.lesson_id, LessonId(0));
    }

    #[test]
    fn test_online_after_school_inherits_school_and_counts() {
        // Monday: OFFLINE then ONLINE; other days empty.
        let mut r = Registry::new();
        let teacher = r.add_teacher(Teacher::new("A").with_max_online_from_school(0));
        let s = r.add_subject(Subject::new("Math").with_stack(10, 1).with_max_per_day(10));
        let c = r.add_class(SchoolClass::new("5-A"));
        r.add_lesson(Lesson::new(c, s, teacher));
        r.add_lesson(Lesson::new(c, s, teacher));
        let mut t = SlotTemplate::new(2);
        t.insert_codes(c, &["UO", "", "", "", "", "", ""]).unwrap();

        let w = PenaltyWeights {
            excess_online_from_school: 7.0,
            ..zero_weights()
        };
        let tt = TimetableBuilder::new(&r, &t, &w).build(&r.lesson_ids()).unwrap();

        let timeline = tt.teacher_timeline(teacher).unwrap();
        assert_eq!(timeline.get(0, 0).unwrap().location, Location::School);
        assert_eq!(timeline.get(0, 1).unwrap().location, Location::School);
        assert!((tt.objectives.teacher_comfort - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_travel_time_blocks_home_to_school() {
        // Teacher with travel time 1 teaches ONLINE at slot 0, then the
        // class only offers OFFLINE at slot 1 on the same day.
        let mut r = Registry::new();
        let teacher = r.add_teacher(Teacher::new("A").with_travel_time(1));
        let s = r.add_subject(Subject::new("Math").with_stack(10, 1).with_max_per_day(10));
        let a = r.add_class(SchoolClass::new("A"));
        let b = r.add_class(SchoolClass::new("B"));
        let first = r.add_lesson(Lesson::new(a, s, teacher));
        let second = r.add_lesson(Lesson::new(b, s, teacher));
        let mut t = SlotTemplate::new(3);
        t.insert_codes(a, &["O--", "", "", "", "", "", ""]).unwrap();
        t.insert_codes(b, &["-UU", "", "", "", "", "", ""]).unwrap();

        let w = zero_weights();
        let tt = TimetableBuilder::new(&r, &t, &w).build(&[first, second]).unwrap();

        // Slot 1 is adjacent to the home booking; slot 2 leaves one free slot.
        assert_eq!(tt.placement_of(second), Some((b, 0, 2)));
    }

    #[test]
    fn test_order_sensitivity() {
        // Two classes, one shared teacher, one usable slot each at the same time.
        let mut r = Registry::new();
        let teacher = r.add_teacher(Teacher::new("A"));
        let s = r.add_subject(Subject::new("Math"));
        let a = r.add_class(SchoolClass::new("A"));
        let b = r.add_class(SchoolClass::new("B"));
        let la = r.add_lesson(Lesson::new(a, s, teacher));
        let lb = r.add_lesson(Lesson::new(b, s, teacher));
        let mut t = SlotTemplate::new(1);
        t.insert_codes(a, &["O", "", "", "", "", "", ""]).unwrap();
        t.insert_codes(b, &["O", "", "", "", "", "", ""]).unwrap();
        let w = zero_weights();

        let first = TimetableBuilder::new(&r, &t, &w).build(&[la, lb]).unwrap();
        let second = TimetableBuilder::new(&r, &t, &w).build(&[lb, la]).unwrap();
        assert_eq!(first.unplaced, vec![lb]);
        assert_eq!(second.unplaced, vec![la]);
    }

    #[test]
    fn test_build_is_deterministic() {
        let (r, t) = single_class(9, Teacher::new("A").with_travel_time(1), "OUWO");
        let w = PenaltyWeights::default();
        let mut order = r.lesson_ids();
        order.reverse();

        let a = TimetableBuilder::new(&r, &t, &w).build(&order).unwrap();
        let b = TimetableBuilder::new(&r, &t, &w).build(&order).unwrap();
        assert_eq!(a.objectives.as_array(), b.objectives.as_array());
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_lesson_is_fatal() {
        let (r, t) = single_class(1, Teacher::new("A"), "O");
        let w = zero_weights();
        let err = TimetableBuilder::new(&r, &t, &w)
            .build(&[LessonId(0), LessonId(3)])
            .unwrap_err();
        assert!(matches!(err, TimetableError::UnknownLesson(LessonId(3))));
    }

    #[test]
    fn test_duplicate_lesson_is_fatal() {
        let (r, t) = single_class(2, Teacher::new("A"), "OO");
        let w = zero_weights();
        let err = TimetableBuilder::new(&r, &t, &w)
            .build(&[LessonId(1), LessonId(1)])
            .unwrap_err();
        assert!(matches!(err, TimetableError::DuplicateLesson(LessonId(1))));
    }

    #[test]
    fn test_dangling_subject_is_fatal() {
        let (mut r, t) = single_class(1, Teacher::new("A"), "O");
        let bad = r.add_lesson(Lesson::new(ClassId(0), SubjectId(4), TeacherId(0)));
        let w = zero_weights();
        let err = TimetableBuilder::new(&r, &t, &w).build(&[bad]).unwrap_err();
        assert!(matches!(err, TimetableError::UnknownSubject { .. }));
    }

    #[test]
    fn test_missing_template_is_fatal() {
        let (mut r, t) = single_class(1, Teacher::new("A"), "O");
        let c = r.add_class(SchoolClass::new("no-template"));
        let bad = r.add_lesson(Lesson::new(c, SubjectId(0), TeacherId(0)));
        let w = zero_weights();
        let err = TimetableBuilder::new(&r, &t, &w).build(&[bad]).unwrap_err();
        assert!(matches!(err, TimetableError::MissingTemplate(id) if id == c));
    }

    #[test]
    fn test_subject_mismatch_penalty() {
        let mut r = Registry::new();
        let teacher = r.add_teacher(Teacher::new("A"));
        let s = r.add_subject(Subject::new("Chemistry").with_priority_offline(true));
        let c = r.add_class(SchoolClass::new("10-A"));
        r.add_lesson(Lesson::new(c, s, teacher));
        let mut t = SlotTemplate::new(1);
        uniform(&mut t, c, "O");

        let w = PenaltyWeights {
            subject_mismatch: 4.0,
            ..zero_weights()
        };
        let tt = TimetableBuilder::new(&r, &t, &w).build(&r.lesson_ids()).unwrap();
        assert!((tt.objectives.didactic_quality - 4.0).abs() < 1e-10);
    }
}
