use crate::math::{add_days, diff_days, start_of_week};
use crate::prelude::*;
use crate::{CalendarDate, DAYS_PER_WEEK, DateRange, RowBounds, RowIndex, WeekStart};

/// Bidirectional mapping between calendar days and week rows.
///
/// Row 0 is the week containing the range's `min`, or the week containing
/// `epoch` when the past is unbounded. Any change of range or week start
/// needs a fresh index; row numbers from an old index are meaningless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateIndex {
    range:      DateRange,
    week_start: WeekStart,
    epoch:      CalendarDate,
    anchor:     CalendarDate,
}

impl DateIndex {
    pub fn new(range: DateRange, week_start: WeekStart, epoch: CalendarDate) -> Self {
        let base = range.min().unwrap_or(epoch);
        let anchor = start_of_week(base, week_start);
        debug!(%range, %week_start, %anchor, "built date index");
        Self {
            range,
            week_start,
            epoch,
            anchor,
        }
    }

    /// Same epoch, new range and week start.
    pub fn rebuild(&self, range: DateRange, week_start: WeekStart) -> Self {
        Self::new(range, week_start, self.epoch)
    }

    pub const fn range(&self) -> &DateRange {
        &self.range
    }

    pub const fn week_start(&self) -> WeekStart {
        self.week_start
    }

    pub const fn epoch(&self) -> CalendarDate {
        self.epoch
    }

    /// First day of row 0
    pub const fn anchor(&self) -> CalendarDate {
        self.anchor
    }

    pub fn index_of(&self, date: CalendarDate) -> RowIndex {
        diff_days(self.anchor, date).div_euclid(DAYS_PER_WEEK)
    }

    /// Column of `date` within its row (0..=6).
    pub fn offset_within_row(&self, date: CalendarDate) -> i64 {
        diff_days(self.anchor, date).rem_euclid(DAYS_PER_WEEK)
    }

    /// The day in column `day_offset` (0..=6) of row `index`.
    pub fn date_at_index(&self, index: RowIndex, day_offset: i64) -> CalendarDate {
        debug_assert!((0..DAYS_PER_WEEK).contains(&day_offset));
        let days = index.saturating_mul(DAYS_PER_WEEK).saturating_add(day_offset);
        add_days(self.anchor, days)
    }

    /// All seven days of row `index`, in column order.
    pub fn row_dates(&self, index: RowIndex) -> impl Iterator<Item = CalendarDate> + '_ {
        (0..DAYS_PER_WEEK).map(move |offset| self.date_at_index(index, offset))
    }

    /// Row limits implied by the range; open sides stay `None`.
    pub fn row_bounds(&self) -> RowBounds {
        RowBounds {
            first: self.range.min().map(|min| self.index_of(min)),
            last:  self.range.max().map(|max| self.index_of(max)),
        }
    }
}
