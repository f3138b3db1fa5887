use serde::{Deserialize, Serialize};

use crate::{CalendarDate, ConfigError, WeekStart};

const MONTHS_IN_YEAR: usize = 12;
const DAYS_IN_WEEK: usize = 7;

/// Tokens understood by [`format_date`], longest first within each letter.
const TOKENS: [&str; 12] = ["YYYY", "YY", "MMMM", "MMM", "MM", "M", "DD", "Do", "D", "dddd", "ddd", "d"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodayLabel {
    pub long:  String,
    pub short: String,
}

impl Default for TodayLabel {
    fn default() -> Self {
        Self {
            long:  "Today".to_owned(),
            short: "Today".to_owned(),
        }
    }
}

/// Label tables for one language. Only rendering reads these; changing the
/// locale never moves the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Locale {
    pub name:           String,
    pub header_format:  String,
    pub months:         Vec<String>,
    pub months_short:   Vec<String>,
    /// Sunday first
    pub weekdays:       Vec<String>,
    pub weekdays_short: Vec<String>,
    /// Header text when nothing is selected
    pub blank:          String,
    pub today_label:    TodayLabel,
    pub week_start:     WeekStart,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| (*name).to_owned()).collect()
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            name:           "en".to_owned(),
            header_format:  "dddd, MMM Do".to_owned(),
            months:         owned(&[
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]),
            months_short:   owned(&[
                "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
            ]),
            weekdays:       owned(&[
                "Sunday",
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
            ]),
            weekdays_short: owned(&["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]),
            blank:          "No date selected".to_owned(),
            today_label:    TodayLabel::default(),
            week_start:     WeekStart::SUNDAY,
        }
    }
}

impl Locale {
    /// Checks the name tables have one entry per month and weekday.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidLocale` naming the first wrongly sized table.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let tables = [
            ("months", &self.months, MONTHS_IN_YEAR),
            ("monthsShort", &self.months_short, MONTHS_IN_YEAR),
            ("weekdays", &self.weekdays, DAYS_IN_WEEK),
            ("weekdaysShort", &self.weekdays_short, DAYS_IN_WEEK),
        ];
        for (field, table, expected) in tables {
            if table.len() != expected {
                return Err(ConfigError::InvalidLocale {
                    field,
                    expected,
                    found: table.len(),
                });
            }
        }
        Ok(())
    }

    pub fn format(&self, date: CalendarDate, pattern: &str) -> String {
        format_date(date, pattern, self)
    }

    fn ordinal(&self, day: u32) -> String {
        if !self.name.starts_with("en") {
            return day.to_string();
        }
        let suffix = match (day % 10, day % 100) {
            (_, 11..=13) => "th",
            (1, _) => "st",
            (2, _) => "nd",
            (3, _) => "rd",
            _ => "th",
        };
        format!("{day}{suffix}")
    }
}

fn name(table: &[String], position: u32) -> &str {
    usize::try_from(position)
        .ok()
        .and_then(|i| table.get(i))
        .map_or("", String::as_str)
}

/// Formats `date` with moment-style tokens (`YYYY YY MMMM MMM MM M DD Do D
/// dddd ddd d`). Text inside `[...]` is copied verbatim; anything else that is
/// not a token passes through unchanged.
pub fn format_date(date: CalendarDate, pattern: &str, locale: &Locale) -> String {
    let weekday = date.weekday().num_days_from_sunday();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut rest = pattern;

    while let Some(c) = rest.chars().next() {
        if c == '[' {
            match rest[1..].split_once(']') {
                Some((literal, after)) => {
                    out.push_str(literal);
                    rest = after;
                },
                None => {
                    out.push_str(&rest[1..]);
                    rest = "";
                },
            }
            continue;
        }

        let Some(token) = TOKENS.iter().find(|token| rest.starts_with(**token)) else {
            out.push(c);
            rest = &rest[c.len_utf8()..];
            continue;
        };
        let piece = match *token {
            "YYYY" => format!("{:04}", date.year()),
            "YY" => format!("{:02}", date.year().rem_euclid(100)),
            "MMMM" => name(&locale.months, date.month() - 1).to_owned(),
            "MMM" => name(&locale.months_short, date.month() - 1).to_owned(),
            "MM" => format!("{:02}", date.month()),
            "M" => date.month().to_string(),
            "DD" => format!("{:02}", date.day()),
            "Do" => locale.ordinal(date.day()),
            "D" => date.day().to_string(),
            "dddd" => name(&locale.weekdays, weekday).to_owned(),
            "ddd" => name(&locale.weekdays_short, weekday).to_owned(),
            _ => weekday.to_string(),
        };
        out.push_str(&piece);
        rest = &rest[token.len()..];
    }
    out
}
