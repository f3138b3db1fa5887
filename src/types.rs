use crate::DateError;
use crate::prelude::*;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Zero-based week row. Negative values are rows before the list anchor,
/// which only exist when the list is unbounded in the past.
pub type RowIndex = i64;

/// First day of a week row, numbered like JavaScript's `Date#getDay`
/// (0 = Sunday, 6 = Saturday).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, Into)]
#[serde(try_from = "u8", into = "u8")]
#[display(fmt = "{_0}")]
pub struct WeekStart(u8);

impl WeekStart {
    pub const SUNDAY: Self = Self(0);
    pub const MONDAY: Self = Self(1);

    /// # Errors
    /// Returns `DateError::InvalidWeekday` if the value is greater than 6.
    pub const fn new(value: u8) -> Result<Self, DateError> {
        if value > 6 {
            return Err(DateError::InvalidWeekday(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// How many days `day` lies after the start of its week (0..=6).
    pub fn days_into_week(self, day: Weekday) -> i64 {
        let from_sunday = i64::from(day.num_days_from_sunday());
        (from_sunday - i64::from(self.0)).rem_euclid(7)
    }
}

impl TryFrom<u8> for WeekStart {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Where a scrolled-to row ends up inside the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Top,
    Center,
}

/// Inclusive row limits of the list; `None` is an infinite side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RowBounds {
    pub first: Option<RowIndex>,
    pub last:  Option<RowIndex>,
}

impl RowBounds {
    pub const fn unbounded() -> Self {
        Self { first: None, last: None }
    }

    pub fn contains(&self, index: RowIndex) -> bool {
        self.first.is_none_or(|first| index >= first) && self.last.is_none_or(|last| index <= last)
    }

    pub fn clamp(&self, index: RowIndex) -> RowIndex {
        let index = self.first.map_or(index, |first| index.max(first));
        self.last.map_or(index, |last| index.min(last))
    }

    /// Number of rows, or `None` when either side is infinite.
    pub fn len(&self) -> Option<u64> {
        match (self.first, self.last) {
            (Some(first), Some(last)) => Some(last.abs_diff(first) + 1),
            _ => None,
        }
    }
}

/// The rows currently mounted by the list and the offset of the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VisibleWindow {
    pub first_index: RowIndex,
    pub last_index:  RowIndex,
    pub offset_px:   i64,
}

impl VisibleWindow {
    pub const fn contains(&self, index: RowIndex) -> bool {
        self.first_index <= index && index <= self.last_index
    }

    pub const fn rows(&self) -> RangeInclusive<RowIndex> {
        self.first_index..=self.last_index
    }

    pub const fn len(&self) -> u64 {
        self.last_index.abs_diff(self.first_index) + 1
    }
}
