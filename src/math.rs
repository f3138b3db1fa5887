//! Pure day arithmetic over [`CalendarDate`].
//!
//! Every function is total: results that would leave the representable years
//! saturate at [`CalendarDate::min_value`] / [`CalendarDate::max_value`].

use crate::{CalendarDate, DateRange, WeekStart};
use chrono::Days;

/// Signed number of days from `a` to `b`.
pub fn diff_days(a: CalendarDate, b: CalendarDate) -> i64 {
    b.naive().signed_duration_since(a.naive()).num_days()
}

/// `date` shifted by `n` days, saturating at the representable limits.
pub fn add_days(date: CalendarDate, n: i64) -> CalendarDate {
    let days = Days::new(n.unsigned_abs());
    let shifted = if n >= 0 {
        date.naive().checked_add_days(days)
    } else {
        date.naive().checked_sub_days(days)
    };
    match shifted {
        Some(naive) => CalendarDate::saturating_from_naive(naive),
        None if n >= 0 => CalendarDate::max_value(),
        None => CalendarDate::min_value(),
    }
}

/// `date` if it lies within `range`, otherwise the nearest bound.
pub fn clamp(date: CalendarDate, range: &DateRange) -> CalendarDate {
    range.clamp(date)
}

/// The current local day.
pub fn today() -> CalendarDate {
    CalendarDate::saturating_from_naive(chrono::Local::now().date_naive())
}

/// First day of the week containing `date`.
pub fn start_of_week(date: CalendarDate, week_start: WeekStart) -> CalendarDate {
    add_days(date, -week_start.days_into_week(date.weekday()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    #[test]
    fn test_diff_days() {
        struct TestCase {
            a:        CalendarDate,
            b:        CalendarDate,
            expected: i64,
        }

        let cases = [
            TestCase {
                a:        date(2024, 3, 10),
                b:        date(2024, 3, 10),
                expected: 0,
            },
            TestCase {
                a:        date(2024, 2, 28),
                b:        date(2024, 3, 1),
                expected: 2,
            },
            TestCase {
                a:        date(2023, 2, 28),
                b:        date(2023, 3, 1),
                expected: 1,
            },
            TestCase {
                a:        date(2024, 3, 10),
                b:        date(2024, 3, 3),
                expected: -7,
            },
            TestCase {
                a:        date(2000, 1, 1),
                b:        date(2001, 1, 1),
                expected: 366,
            },
        ];

        for case in &cases {
            assert_eq!(diff_days(case.a, case.b), case.expected, "{} -> {}", case.a, case.b);
        }
    }

    #[test]
    fn test_add_days_inverts_diff() {
        let from = date(2024, 3, 10);
        for n in [-400, -7, -1, 0, 1, 7, 400] {
            assert_eq!(diff_days(from, add_days(from, n)), n);
        }
    }

    #[test]
    fn test_add_days_crosses_year() {
        assert_eq!(add_days(date(2023, 12, 31), 1), date(2024, 1, 1));
        assert_eq!(add_days(date(2024, 1, 1), -1), date(2023, 12, 31));
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(add_days(CalendarDate::max_value(), 1), CalendarDate::max_value());
        assert_eq!(add_days(CalendarDate::min_value(), -1), CalendarDate::min_value());
        assert_eq!(add_days(date(2024, 1, 1), i64::MAX), CalendarDate::max_value());
        assert_eq!(add_days(date(2024, 1, 1), i64::MIN), CalendarDate::min_value());
    }

    #[test]
    fn test_clamp() {
        let range = DateRange::new(Some(date(2024, 3, 1)), Some(date(2024, 3, 31))).unwrap();
        assert_eq!(clamp(date(2024, 2, 1), &range), date(2024, 3, 1));
        assert_eq!(clamp(date(2024, 3, 15), &range), date(2024, 3, 15));
        assert_eq!(clamp(date(2024, 4, 1), &range), date(2024, 3, 31));
    }

    #[test]
    fn test_start_of_week() {
        // 2024-03-13 is a Wednesday
        assert_eq!(start_of_week(date(2024, 3, 13), WeekStart::SUNDAY), date(2024, 3, 10));
        assert_eq!(start_of_week(date(2024, 3, 13), WeekStart::MONDAY), date(2024, 3, 11));
        assert_eq!(start_of_week(date(2024, 3, 10), WeekStart::SUNDAY), date(2024, 3, 10));
    }

    #[test]
    fn test_today_is_representable() {
        let now = today();
        assert!(now >= CalendarDate::min_value() && now <= CalendarDate::max_value());
    }
}
