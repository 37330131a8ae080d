//! Fixed-size week grid (7 days × K lessons per day).
//!
//! Backing store for slot templates, class schedules and teacher
//! timelines. Cells are stored row-major by day in a single `Vec`.

use serde::{Deserialize, Serialize};

/// Number of days in a scheduling week.
pub const DAYS_PER_WEEK: usize = 7;

/// A 7 × K matrix of cells, addressed by `(day, slot)`.
///
/// Indexing out of range panics, like slice indexing. Callers iterate
/// over `0..DAYS_PER_WEEK` and `0..lessons_per_day()`.
///
/// Deserialization rejects a cell count other than `7 * lessons_per_day`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWeekGrid<T>")]
pub struct WeekGrid<T> {
    lessons_per_day: usize,
    cells: Vec<T>,
}

/// Unchecked serialized form of [`WeekGrid`].
#[derive(Deserialize)]
struct RawWeekGrid<T> {
    lessons_per_day: usize,
    cells: Vec<T>,
}

impl<T> TryFrom<RawWeekGrid<T>> for WeekGrid<T> {
    type Error = String;

    fn try_from(raw: RawWeekGrid<T>) -> Result<Self, Self::Error> {
        let expected = DAYS_PER_WEEK * raw.lessons_per_day;
        if raw.cells.len() != expected {
            return Err(format!(
                "week grid with {} lessons per day needs {expected} cells, got {}",
                raw.lessons_per_day,
                raw.cells.len()
            ));
        }
        Ok(Self {
            lessons_per_day: raw.lessons_per_day,
            cells: raw.cells,
        })
    }
}

impl<T: Clone> WeekGrid<T> {
    /// Creates a grid with every cell set to `value`.
    pub fn filled(lessons_per_day: usize, value: T) -> Self {
        Self {
            lessons_per_day,
            cells: vec![value; DAYS_PER_WEEK * lessons_per_day],
        }
    }
}

impl<T> WeekGrid<T> {
    /// Builds a grid from exactly 7 rows of equal length.
    ///
    /// Returns `None` if the row count is not 7 or rows differ in length.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Option<Self> {
        if rows.len() != DAYS_PER_WEEK {
            return None;
        }
        let lessons_per_day = rows[0].len();
        if rows.iter().any(|r| r.len() != lessons_per_day) {
            return None;
        }
        Some(Self {
            lessons_per_day,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Lessons per day (K).
    #[inline]
    pub fn lessons_per_day(&self) -> usize {
        self.lessons_per_day
    }

    /// Cell at `(day, slot)`.
    #[inline]
    pub fn get(&self, day: usize, slot: usize) -> &T {
        &self.cells[self.offset(day, slot)]
    }

    /// Overwrites the cell at `(day, slot)`.
    #[inline]
    pub fn set(&mut self, day: usize, slot: usize, value: T) {
        let idx = self.offset(day, slot);
        self.cells[idx] = value;
    }

    /// All slots of one day, in slot order.
    #[inline]
    pub fn day(&self, day: usize) -> &[T] {
        let start = day * self.lessons_per_day;
        &self.cells[start..start + self.lessons_per_day]
    }

    /// Iterates over the 7 day rows.
    pub fn days(&self) -> impl Iterator<Item = &[T]> {
        // chunks(0) panics; a zero-width grid still has 7 (empty) days.
        (0..DAYS_PER_WEEK).map(move |d| self.day(d))
    }

    /// Iterates over every cell with its `(day, slot)` coordinates.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &T)> {
        let k = self.lessons_per_day;
        self.cells
            .iter()
            .enumerate()
            .map(move |(i, cell)| (i / k, i % k, cell))
    }

    #[inline]
    fn offset(&self, day: usize, slot: usize) -> usize {
        debug_assert!(day < DAYS_PER_WEEK && slot < self.lessons_per_day);
        day * self.lessons_per_day + slot
    }
}

impl<T: Default + Clone> WeekGrid<T> {
    /// Creates a grid of default cells (e.g. all `None`).
    pub fn new(lessons_per_day: usize) -> Self {
        Self::filled(lessons_per_day, T::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_set_get() {
        let mut g: WeekGrid<Option<u32>> = WeekGrid::new(4);
        assert_eq!(g.lessons_per_day(), 4);
        g.set(6, 3, Some(9));
        assert_eq!(*g.get(6, 3), Some(9));
        assert_eq!(g.day(6), &[None, None, None, Some(9)]);
        assert_eq!(g.days().count(), DAYS_PER_WEEK);
    }

    #[test]
    fn test_grid_iter_coordinates() {
        let mut g = WeekGrid::filled(3, 0u8);
        g.set(2, 1, 5);
        let hit: Vec<_> = g.iter().filter(|(_, _, v)| **v == 5).map(|(d, s, _)| (d, s)).collect();
        assert_eq!(hit, vec![(2, 1)]);
    }

    #[test]
    fn test_from_rows_shape() {
        let rows = vec![vec![1, 2]; DAYS_PER_WEEK];
        let g = WeekGrid::from_rows(rows).unwrap();
        assert_eq!(g.lessons_per_day(), 2);
        assert_eq!(*g.get(3, 1), 2);

        assert!(WeekGrid::from_rows(vec![vec![1, 2]; 5]).is_none());
        let mut ragged = vec![vec![1, 2]; DAYS_PER_WEEK];
        ragged[4].push(3);
        assert!(WeekGrid::from_rows(ragged).is_none());
    }

    #[test]
    fn test_deserialize_checks_cell_count() {
        let g = WeekGrid::filled(2, 1u8);
        let json = serde_json::to_string(&g).unwrap();
        let back: WeekGrid<u8> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, g);

        let short = r#"{"lessons_per_day": 3, "cells": [0, 0, 0]}"#;
        let err = serde_json::from_str::<WeekGrid<u8>>(short).unwrap_err();
        assert!(err.to_string().contains("needs 21 cells"));
    }
}
