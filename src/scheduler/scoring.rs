//! Post-build timetable scoring.
//!
//! Runs after every lesson of an ordering has been attempted and adds the
//! day-level and stack-level terms of the fitness tuple.
//!
//! # Terms
//!
//! | Term | Objective | Scope |
//! |------|-----------|-------|
//! | Idle windows in a class day | f1 | per class-day |
//! | Stack too long / not preferred length | f2 | per stack |
//! | Hard subject in first or last slot | f2 | per lesson |
//! | Lessons over a subject's daily maximum | f2 | per class-day |
//! | Unbalanced Monday/Friday difficulty | f2 | per class-week |
//! | Idle windows in a teacher day | f3 | per teacher-day |

use std::collections::BTreeMap;

use crate::config::PenaltyWeights;
use crate::error::TimetableError;
use crate::models::{
    ClassSchedule, Registry, Subject, SubjectId, Teacher, TeacherTimeline, DAYS_PER_WEEK,
};

/// Relative excess over the mid-week average that marks an unbalanced edge day.
const EDGE_DAY_TOLERANCE: f64 = 1.15;

/// Counts idle windows in a day row.
///
/// # Algorithm
/// Only positions up to the last occupied slot are scanned. Each maximal
/// run of free slots lying strictly between two occupied slots counts as
/// one window, whatever its length. Leading and trailing free slots never
/// count.
pub fn count_gaps<T>(row: &[Option<T>]) -> usize {
    let Some(last) = row.iter().rposition(Option::is_some) else {
        return 0;
    };
    let mut started = false;
    let mut in_gap = false;
    let mut gaps = 0;
    for cell in &row[..=last] {
        if cell.is_some() {
            started = true;
            if in_gap {
                gaps += 1;
                in_gap = false;
            }
        } else if started {
            in_gap = true;
        }
    }
    gaps
}

/// Penalty of one closed stack of `count` consecutive lessons of `subject`.
pub fn stack_penalty(subject: &Subject, count: usize, weights: &PenaltyWeights) -> f64 {
    if count > subject.max_stack {
        (count - subject.max_stack) as f64 * weights.stack_violation
    } else if count != subject.preferred_stack {
        weights.stack_non_preferred
    } else {
        0.0
    }
}

/// Penalty for Monday (day 0) or Friday (day 4) being harder than mid-week.
///
/// Each edge day whose total difficulty exceeds the Tuesday-Thursday
/// average (1 when that average is zero) by more than 15% adds twice the
/// difficulty-distribution weight.
pub fn week_edge_penalty(daily_difficulty: &[u32; DAYS_PER_WEEK], weights: &PenaltyWeights) -> f64 {
    let mid: u32 = daily_difficulty[1..4].iter().sum();
    let average = if mid > 0 { f64::from(mid) / 3.0 } else { 1.0 };
    let threshold = average * EDGE_DAY_TOLERANCE;
    [daily_difficulty[0], daily_difficulty[4]]
        .iter()
        .filter(|&&d| f64::from(d) > threshold)
        .map(|_| weights.difficulty_distribution * 2.0)
        .sum()
}

/// Penalties of one class week as `(student_hardship, didactic_quality)`.
pub fn score_class_week(
    schedule: &ClassSchedule,
    registry: &Registry,
    weights: &PenaltyWeights,
) -> Result<(f64, f64), TimetableError> {
    let last_slot = schedule.lessons_per_day().saturating_sub(1);
    let mut student = 0.0;
    let mut didactic = 0.0;
    let mut daily_difficulty = [0u32; DAYS_PER_WEEK];

    for (day, row) in schedule.days().enumerate() {
        student += count_gaps(row) as f64 * weights.student_gap;

        let mut stack: Option<(&Subject, usize)> = None;
        let mut per_subject: BTreeMap<SubjectId, (&Subject, usize)> = BTreeMap::new();

        for (slot, cell) in row.iter().enumerate() {
            let Some(lesson_id) = cell else {
                if let Some((subject, count)) = stack.take() {
                    didactic += stack_penalty(subject, count, weights);
                }
                continue;
            };
            let (_, _, subject, _) = registry.resolve(*lesson_id)?;

            per_subject.entry(subject.id).or_insert((subject, 0)).1 += 1;
            daily_difficulty[day] += subject.difficulty;
            if subject.is_hard() && (slot == 0 || slot >= last_slot) {
                didactic += weights.difficulty_distribution;
            }

            stack = match stack {
                Some((current, count)) if current.id == subject.id => Some((current, count + 1)),
                Some((current, count)) => {
                    didactic += stack_penalty(current, count, weights);
                    Some((subject, 1))
                }
                None => Some((subject, 1)),
            };
        }
        if let Some((subject, count)) = stack {
            didactic += stack_penalty(subject, count, weights);
        }

        for (subject, count) in per_subject.values() {
            if *count > subject.max_per_day {
                didactic += (count - subject.max_per_day) as f64 * weights.max_lessons_per_day;
            }
        }
    }

    didactic += week_edge_penalty(&daily_difficulty, weights);
    Ok((student, didactic))
}

/// Teacher-comfort penalty of one teacher week (idle windows).
pub fn score_teacher_week(
    timeline: &TeacherTimeline,
    teacher: &Teacher,
    weights: &PenaltyWeights,
) -> f64 {
    if teacher.wants_windows {
        return 0.0;
    }
    timeline
        .days()
        .map(|row| count_gaps(row) as f64 * weights.teacher_gap)
        .sum()
}
