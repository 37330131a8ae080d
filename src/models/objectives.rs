//! Three-objective fitness of a decoded timetable.
//!
//! All objectives are penalties: lower is better, zero is ideal.

use serde::{Deserialize, Serialize};

/// Number of optimized objectives.
pub const OBJECTIVE_COUNT: usize = 3;

/// One axis of the fitness tuple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Objective {
    /// f1.
    StudentHardship,
    /// f2.
    DidacticQuality,
    /// f3.
    TeacherComfort,
}

impl Objective {
    /// All objectives, in tuple order.
    pub const ALL: [Objective; OBJECTIVE_COUNT] = [
        Objective::StudentHardship,
        Objective::DidacticQuality,
        Objective::TeacherComfort,
    ];
}

/// Fitness tuple `(f1, f2, f3)` of one timetable.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Objectives {
    /// f1: student hardship (unplaced lessons, unwanted slots, class gaps).
    pub student_hardship: f64,
    /// f2: didactic quality penalties (location mismatch, stacking,
    /// difficulty distribution, daily limits).
    pub didactic_quality: f64,
    /// f3: teacher discomfort (idle windows, remote lessons from school).
    pub teacher_comfort: f64,
}

impl Objectives {
    /// Creates a fitness tuple.
    pub fn new(student_hardship: f64, didactic_quality: f64, teacher_comfort: f64) -> Self {
        Self {
            student_hardship,
            didactic_quality,
            teacher_comfort,
        }
    }

    /// Objectives as `[f1, f2, f3]`.
    #[inline]
    pub fn as_array(&self) -> [f64; OBJECTIVE_COUNT] {
        [
            self.student_hardship,
            self.didactic_quality,
            self.teacher_comfort,
        ]
    }

    /// Builds a tuple from `[f1, f2, f3]`.
    #[inline]
    pub fn from_array(values: [f64; OBJECTIVE_COUNT]) -> Self {
        Self::new(values[0], values[1], values[2])
    }

    /// Value of a single objective.
    #[inline]
    pub fn get(&self, objective: Objective) -> f64 {
        match objective {
            Objective::StudentHardship => self.student_hardship,
            Objective::DidacticQuality => self.didactic_quality,
            Objective::TeacherComfort => self.teacher_comfort,
        }
    }

    /// Sum of all objectives (used to pick a compromise solution).
    #[inline]
    pub fn sum(&self) -> f64 {
        self.student_hardship + self.didactic_quality + self.teacher_comfort
    }

    /// Pareto dominance for minimization.
    ///
    /// `self` dominates `other` iff it is no worse in every objective and
    /// strictly better in at least one. Equal tuples do not dominate.
    pub fn dominates(&self, other: &Objectives) -> bool {
        let a = self.as_array();
        let b = other.as_array();
        let mut strictly_better = false;
        for (x, y) in a.iter().zip(b.iter()) {
            if x > y {
                return false;
            }
            if x < y {
                strictly_better = true;
            }
        }
        strictly_better
    }

    /// Whether every objective is finite and non-negative.
    pub fn is_well_formed(&self) -> bool {
        self.as_array().iter().all(|v| v.is_finite() && *v >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dominance() {
        let a = Objectives::new(1.0, 2.0, 3.0);
        let b = Objectives::new(1.0, 2.0, 4.0);
        let c = Objectives::new(0.0, 5.0, 3.0);
        assert!(a.dominates(&b));
        assert!(!b.dominates(&a));
        assert!(!a.dominates(&c));
        assert!(!c.dominates(&a));
    }

    #[test]
    fn test_equal_tuples_do_not_dominate() {
        let a = Objectives::new(1.0, 1.0, 1.0);
        assert!(!a.dominates(&a));
    }

    #[test]
    fn test_array_roundtrip_and_sum() {
        let a = Objectives::from_array([1.5, 2.0, 0.5]);
        assert_eq!(a.as_array(), [1.5, 2.0, 0.5]);
        assert!((a.sum() - 4.0).abs() < 1e-10);
        assert!((a.get(Objective::DidacticQuality) - 2.0).abs() < 1e-10);
        assert!(a.is_well_formed());
        assert!(!Objectives::new(f64::NAN, 0.0, 0.0).is_well_formed());
    }
}
