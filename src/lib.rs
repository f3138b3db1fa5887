//! Headless engine for an infinitely scrolling calendar.
//!
//! The crate maps calendar days onto an unbounded, windowed list of week rows
//! and keeps selection, highlighting and min/max bounding consistent while a
//! host UI scrolls, clicks and sends key events. Rendering is left to the host:
//! it feeds scroll offsets and input into a [`Calendar`] and draws the
//! [`DayCell`]s of the mounted rows.

mod calendar;
mod config;
mod consts;
mod disabled;
mod index;
mod keyboard;
mod locale;
pub mod math;
mod prelude;
mod range;
mod scroll;
mod selection;
mod types;
mod virtual_list;

#[cfg(test)]
mod test_utils;

pub use calendar::{Calendar, DayCell, Hooks, LunarLabeler};
pub use config::{CalendarConfig, ConfigError, Layout, SelectedDate};
pub use consts::*;
pub use disabled::DisabledSet;
pub use index::DateIndex;
pub use keyboard::{Key, KeyAction, KeyboardController};
pub use locale::{Locale, TodayLabel, format_date};
pub use range::{DateRange, RangeError};
pub use scroll::{ScrollCoordinator, ScrollHooks, ScrollSettled, ScrollTicket};
pub use selection::{SelectOutcome, SelectionController, SelectionError, SelectionHooks, SelectionState};
pub use types::{Align, RowBounds, RowIndex, VisibleWindow, WeekStart};
pub use virtual_list::VirtualList;

use crate::prelude::*;
use chrono::{Datelike, NaiveDate, Weekday};
use std::str::FromStr;

/// A timezone-naive calendar day in the Gregorian calendar.
///
/// Ordering and equality follow the `(year, month, day)` tuple. Years are
/// limited to `MIN_YEAR..=MAX_YEAR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "_0.year()", "_0.month()", "_0.day()")]
pub struct CalendarDate(NaiveDate);

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u32),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { year: i32, month: u32, day: u32 },
    #[display(fmt = "Invalid weekday: {_0} (must be 0-6, Sunday first)")]
    InvalidWeekday(u8),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

impl CalendarDate {
    /// Creates a date from its components, validating each of them.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear`, `InvalidMonth` or `InvalidDay` for
    /// out-of-range components (including Feb 29 outside leap years).
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(DateError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(DateError::InvalidMonth(month));
        }
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateError::InvalidDay { year, month, day })
    }

    /// Earliest representable date (`0001-01-01`).
    pub fn min_value() -> Self {
        Self(NaiveDate::from_ymd_opt(MIN_YEAR, 1, 1).unwrap_or(NaiveDate::MIN))
    }

    /// Latest representable date (`9999-12-31`).
    pub fn max_value() -> Self {
        Self(NaiveDate::from_ymd_opt(MAX_YEAR, MAX_MONTH, 31).unwrap_or(NaiveDate::MAX))
    }

    /// Converts a chrono date, clamping it into the representable years.
    pub fn saturating_from_naive(date: NaiveDate) -> Self {
        Self(date).max(Self::min_value()).min(Self::max_value())
    }

    /// The underlying chrono date
    #[inline]
    pub const fn naive(self) -> NaiveDate {
        self.0
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    /// Canonical sortable key, `YYYYMMDD`.
    pub fn key(self) -> String {
        format!("{:04}{:02}{:02}", self.year(), self.month(), self.day())
    }

    fn parse_component<T: FromStr>(s: &str) -> Result<T, DateError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::InvalidFormat(s.to_owned()));
        }
        s.parse::<T>()
            .map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }

    fn parse_iso(parts: &[&str]) -> Result<Self, DateError> {
        let [year, month, day] = parts else {
            return Err(DateError::InvalidFormat(parts.join("-")));
        };
        Self::from_ymd(
            Self::parse_component(year)?,
            Self::parse_component(month)?,
            Self::parse_component(day)?,
        )
    }

    fn parse_key(s: &str) -> Result<Self, DateError> {
        if s.len() != KEY_LEN || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::InvalidFormat(s.to_owned()));
        }
        Self::from_ymd(
            Self::parse_component(&s[..4])?,
            Self::parse_component(&s[4..6])?,
            Self::parse_component(&s[6..])?,
        )
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_ymd(date.year(), date.month(), date.day())
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl FromStr for CalendarDate {
    type Err = DateError;

    /// Accepts ISO `YYYY-MM-DD` or the canonical key `YYYYMMDD`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        if trimmed.contains(DATE_SEPARATOR) {
            let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
            if parts.len() != 3 {
                return Err(DateError::InvalidFormat(format!(
                    "Expected YYYY-MM-DD, found {} {} separators",
                    parts.len() - 1,
                    DATE_SEPARATOR
                )));
            }
            Self::parse_iso(&parts)
        } else {
            Self::parse_key(trimmed)
        }
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
