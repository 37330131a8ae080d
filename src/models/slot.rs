//! Slot types and per-class slot templates.
//!
//! Each class has a fixed 7 × K template that tags every slot with what
//! may happen there. Templates are loaded once and never change during
//! a run.
//!
//! # Slot codes
//!
//! | Code | Slot type |
//! |------|-----------|
//! | `-` or space | `Empty` |
//! | `O` | `Online` |
//! | `U` | `Offline` |
//! | `T` | `Travel` |
//! | `W` | `Unwanted` |

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{ClassId, WeekGrid, DAYS_PER_WEEK};
use crate::error::TimetableError;

/// What a class slot can be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotType {
    /// No lesson may be placed.
    #[default]
    Empty,
    /// Remote lesson.
    Online,
    /// On-site lesson; the teacher must be at school.
    Offline,
    /// Reserved for travelling; no lesson may be placed.
    Travel,
    /// Usable only as a compromise, at a penalty.
    Unwanted,
}

impl SlotType {
    /// Parses a single slot code (case-insensitive). Unknown codes are `Empty`.
    pub fn from_code(code: char) -> Self {
        match code.to_ascii_uppercase() {
            'O' => SlotType::Online,
            'U' => SlotType::Offline,
            'T' => SlotType::Travel,
            'W' => SlotType::Unwanted,
            _ => SlotType::Empty,
        }
    }

    /// Parses a day row such as `"OOUU-W"` into exactly `lessons_per_day` slots.
    ///
    /// Short rows are padded with `Empty`; extra codes are ignored.
    pub fn parse_day(codes: &str, lessons_per_day: usize) -> Vec<SlotType> {
        let mut day: Vec<SlotType> = codes
            .chars()
            .take(lessons_per_day)
            .map(SlotType::from_code)
            .collect();
        day.resize(lessons_per_day, SlotType::Empty);
        day
    }

    /// Whether a lesson may ever occupy this slot.
    #[inline]
    pub fn is_placeable(self) -> bool {
        !matches!(self, SlotType::Empty | SlotType::Travel)
    }
}

/// Slot templates for all classes, sharing one K (lessons per day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotTemplate {
    lessons_per_day: usize,
    classes: BTreeMap<ClassId, WeekGrid<SlotType>>,
}

impl SlotTemplate {
    /// Creates an empty template set with K lessons per day.
    pub fn new(lessons_per_day: usize) -> Self {
        Self {
            lessons_per_day,
            classes: BTreeMap::new(),
        }
    }

    /// Lessons per day (K).
    #[inline]
    pub fn lessons_per_day(&self) -> usize {
        self.lessons_per_day
    }

    /// Sets the template of one class.
    ///
    /// # Errors
    /// `TemplateShape` if the grid's K differs from this template's K.
    pub fn insert(
        &mut self,
        class_id: ClassId,
        grid: WeekGrid<SlotType>,
    ) -> Result<(), TimetableError> {
        if grid.lessons_per_day() != self.lessons_per_day {
            return Err(TimetableError::TemplateShape {
                class: class_id,
                days: DAYS_PER_WEEK,
                slots: grid.lessons_per_day(),
                expected: self.lessons_per_day,
            });
        }
        self.classes.insert(class_id, grid);
        Ok(())
    }

    /// Sets the template of one class from 7 rows of slot types.
    ///
    /// # Errors
    /// `TemplateShape` if there are not 7 rows of exactly K slots.
    pub fn insert_rows(
        &mut self,
        class_id: ClassId,
        rows: Vec<Vec<SlotType>>,
    ) -> Result<(), TimetableError> {
        let days = rows.len();
        let slots = rows.iter().map(Vec::len).max().unwrap_or(0);
        let grid = WeekGrid::from_rows(rows).ok_or(TimetableError::TemplateShape {
            class: class_id,
            days,
            slots,
            expected: self.lessons_per_day,
        })?;
        self.insert(class_id, grid)
    }

    /// Sets the template of one class from 7 day code strings (see module docs).
    pub fn insert_codes(
        &mut self,
        class_id: ClassId,
        days: &[&str; DAYS_PER_WEEK],
    ) -> Result<(), TimetableError> {
        let rows = days
            .iter()
            .map(|codes| SlotType::parse_day(codes, self.lessons_per_day))
            .collect();
        self.insert_rows(class_id, rows)
    }

    /// Template of a class, if one was set.
    pub fn get(&self, class_id: ClassId) -> Option<&WeekGrid<SlotType>> {
        self.classes.get(&class_id)
    }

    /// Whether a template exists for the class.
    pub fn contains(&self, class_id: ClassId) -> bool {
        self.classes.contains_key(&class_id)
    }

    /// Classes with a template, in id order.
    pub fn class_ids(&self) -> impl Iterator<Item = ClassId> + '_ {
        self.classes.keys().copied()
    }

    /// Number of classes with a template.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class has a template.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}
