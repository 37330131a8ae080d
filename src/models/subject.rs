//! Subject model.

use serde::{Deserialize, Serialize};

use super::SubjectId;

/// Difficulty at or above which a subject should not open or close a day.
pub const HARD_SUBJECT_DIFFICULTY: u32 = 7;

/// A taught subject and its didactic preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subject {
    /// Arena identifier (assigned by the registry).
    pub id: SubjectId,
    /// Display name.
    pub name: String,
    /// Prefers being taught on-site.
    pub priority_offline: bool,
    /// Difficulty on a 0-10 scale.
    pub difficulty: u32,
    /// Longest acceptable run of consecutive lessons.
    pub max_stack: usize,
    /// Ideal run length of consecutive lessons.
    pub preferred_stack: usize,
    /// Maximum lessons of this subject per class-day.
    pub max_per_day: usize,
}

impl Subject {
    /// Creates a subject with default preferences.
    ///
    /// Defaults: no on-site priority, difficulty 5, single lessons
    /// (max and preferred stack 1), at most 3 per day.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: SubjectId(0),
            name: name.into(),
            priority_offline: false,
            difficulty: 5,
            max_stack: 1,
            preferred_stack: 1,
            max_per_day: 3,
        }
    }

    /// Sets the on-site priority flag.
    pub fn with_priority_offline(mut self, priority_offline: bool) -> Self {
        self.priority_offline = priority_offline;
        self
    }

    /// Sets the difficulty. Values above 10 are kept and reported by validation.
    pub fn with_difficulty(mut self, difficulty: u32) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Sets the maximum and preferred stack lengths.
    pub fn with_stack(mut self, max_stack: usize, preferred_stack: usize) -> Self {
        self.max_stack = max_stack;
        self.preferred_stack = preferred_stack;
        self
    }

    /// Sets the daily maximum.
    pub fn with_max_per_day(mut self, max_per_day: usize) -> Self {
        self.max_per_day = max_per_day;
        self
    }

    /// Whether the subject counts as hard for day-edge placement.
    #[inline]
    pub fn is_hard(&self) -> bool {
        self.difficulty >= HARD_SUBJECT_DIFFICULTY
    }
}
