use std::fmt;

use crate::{CalendarDate, OPEN_BOUND, RANGE_SEPARATOR};

/// Inclusive bounds on the dates a calendar can show and select.
/// Either side may be open; when both are set, `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateRange {
    min: Option<CalendarDate>,
    max: Option<CalendarDate>,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// Min date is after max date.
    #[error("Invalid date range: min ({min}) is after max ({max})")]
    InvalidRange { min: CalendarDate, max: CalendarDate },
}

impl DateRange {
    /// Creates a range, rejecting `min > max`.
    ///
    /// # Errors
    /// Returns `RangeError::InvalidRange` if both bounds are set and min > max.
    pub fn new(min: Option<CalendarDate>, max: Option<CalendarDate>) -> Result<Self, RangeError> {
        match (min, max) {
            (Some(min), Some(max)) if min > max => Err(RangeError::InvalidRange { min, max }),
            _ => Ok(Self { min, max }),
        }
    }

    /// A range open on both sides
    pub const fn unbounded() -> Self {
        Self { min: None, max: None }
    }

    pub const fn min(&self) -> Option<CalendarDate> {
        self.min
    }

    pub const fn max(&self) -> Option<CalendarDate> {
        self.max
    }

    pub fn contains(&self, date: CalendarDate) -> bool {
        self.min.is_none_or(|min| date >= min) && self.max.is_none_or(|max| date <= max)
    }

    /// Returns `date` unchanged if it is inside the range, otherwise the nearest bound.
    pub fn clamp(&self, date: CalendarDate) -> CalendarDate {
        let date = self.min.map_or(date, |min| date.max(min));
        self.max.map_or(date, |max| date.min(max))
    }

    /// Number of days in the range, `None` if either side is open.
    pub fn len_days(&self) -> Option<u64> {
        let (min, max) = (self.min?, self.max?);
        u64::try_from(crate::math::diff_days(min, max) + 1).ok()
    }
}

struct Bound(Option<CalendarDate>);

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(date) => write!(f, "{date}"),
            None => f.write_str(OPEN_BOUND),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{RANGE_SEPARATOR}{}", Bound(self.min), Bound(self.max))
    }
}
