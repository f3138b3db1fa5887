use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{
    Align, CalendarDate, DEFAULT_OVERSCAN_ROWS, DEFAULT_ROW_HEIGHT, DEFAULT_SCROLL_DURATION_MS,
    DEFAULT_VIEWPORT_HEIGHT, DateRange, DisabledSet, Locale, RangeError, SelectionError,
};

/// Initial or controlled selection.
///
/// In configuration files `true` (or a missing key) means today, `false`
/// suppresses selection, and a date string selects that day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SelectedDate {
    #[default]
    Today,
    None,
    Date(CalendarDate),
}

impl SelectedDate {
    pub fn resolve(self, today: CalendarDate) -> Option<CalendarDate> {
        match self {
            Self::Today => Some(today),
            Self::None => None,
            Self::Date(date) => Some(date),
        }
    }
}

impl From<CalendarDate> for SelectedDate {
    fn from(date: CalendarDate) -> Self {
        Self::Date(date)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawSelectedDate {
    Flag(bool),
    Date(CalendarDate),
}

impl Serialize for SelectedDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Today => serializer.serialize_bool(true),
            Self::None => serializer.serialize_bool(false),
            Self::Date(date) => date.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for SelectedDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(match RawSelectedDate::deserialize(deserializer)? {
            RawSelectedDate::Flag(true) => Self::Today,
            RawSelectedDate::Flag(false) => Self::None,
            RawSelectedDate::Date(date) => Self::Date(date),
        })
    }
}

/// Geometry of the scrolling list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    /// Height of one week row, in pixels
    pub row_height:         u32,
    /// Viewport height, in pixels
    pub height:             u32,
    pub overscan_rows:      u32,
    pub align:              Align,
    pub scroll_duration_ms: u64,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            row_height:         DEFAULT_ROW_HEIGHT,
            height:             DEFAULT_VIEWPORT_HEIGHT,
            overscan_rows:      DEFAULT_OVERSCAN_ROWS,
            align:              Align::Top,
            scroll_duration_ms: DEFAULT_SCROLL_DURATION_MS,
        }
    }
}

impl Layout {
    pub const fn scroll_duration(&self) -> Duration {
        Duration::from_millis(self.scroll_duration_ms)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Range(#[from] RangeError),

    #[error(transparent)]
    Selection(#[from] SelectionError),

    #[error("Row height must be greater than zero")]
    InvalidRowHeight,

    #[error("Locale table {field} must have {expected} entries, found {found}")]
    InvalidLocale {
        field:    &'static str,
        expected: usize,
        found:    usize,
    },

    #[error("Invalid configuration file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Every option the calendar recognizes. Unset keys take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalendarConfig {
    pub selected_date:    SelectedDate,
    pub min_date:         Option<CalendarDate>,
    pub max_date:         Option<CalendarDate>,
    pub disabled_dates:   Vec<CalendarDate>,
    pub keyboard_support: bool,
    pub locale:           Locale,
    pub layout:           Layout,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            selected_date:    SelectedDate::Today,
            min_date:         None,
            max_date:         None,
            disabled_dates:   Vec::new(),
            keyboard_support: true,
            locale:           Locale::default(),
            layout:           Layout::default(),
        }
    }
}

impl CalendarConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` for malformed TOML, or any error of [`Self::validate`].
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks everything that can be checked without knowing today's date and
    /// returns the validated range.
    ///
    /// # Errors
    /// Returns `ConfigError::Range` if min > max, `InvalidRowHeight` for a zero
    /// row height, `InvalidLocale` for wrongly sized name tables.
    pub fn validate(&self) -> Result<DateRange, ConfigError> {
        let range = self.range()?;
        if self.layout.row_height == 0 {
            return Err(ConfigError::InvalidRowHeight);
        }
        self.locale.validate()?;
        Ok(range)
    }

    /// # Errors
    /// Returns `RangeError::InvalidRange` if min > max.
    pub fn range(&self) -> Result<DateRange, RangeError> {
        DateRange::new(self.min_date, self.max_date)
    }

    pub fn disabled_set(&self) -> DisabledSet {
        self.disabled_dates.iter().collect()
    }

    pub fn with_selected_date(mut self, selected: impl Into<SelectedDate>) -> Self {
        self.selected_date = selected.into();
        self
    }

    pub fn with_min_date(mut self, min: CalendarDate) -> Self {
        self.min_date = Some(min);
        self
    }

    pub fn with_max_date(mut self, max: CalendarDate) -> Self {
        self.max_date = Some(max);
        self
    }

    pub fn with_disabled_dates(mut self, dates: impl IntoIterator<Item = CalendarDate>) -> Self {
        self.disabled_dates = dates.into_iter().collect();
        self
    }

    pub fn with_keyboard_support(mut self, enabled: bool) -> Self {
        self.keyboard_support = enabled;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WeekStart;
    use crate::test_utils::date;

    #[test]
    fn test_defaults() {
        let config = CalendarConfig::default();
        assert_eq!(config.selected_date, SelectedDate::Today);
        assert!(config.keyboard_support);
        assert_eq!(config.layout.row_height, 56);
        assert_eq!(config.validate().unwrap(), DateRange::unbounded());
    }

    #[test]
    fn test_min_after_max_is_rejected() {
        let config = CalendarConfig::default()
            .with_min_date(date(2024, 3, 11))
            .with_max_date(date(2024, 3, 10));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Range(RangeError::InvalidRange { .. }))
        ));
    }

    #[test]
    fn test_zero_row_height_is_rejected() {
        let config = CalendarConfig::default().with_layout(Layout {
            row_height: 0,
            ..Layout::default()
        });
        assert!(matches!(config.validate(), Err(ConfigError::InvalidRowHeight)));
    }

    #[test]
    fn test_selected_date_serde() {
        struct TestCase {
            json:     &'static str,
            expected: SelectedDate,
        }

        let cases = [
            TestCase {
                json:     "true",
                expected: SelectedDate::Today,
            },
            TestCase {
                json:     "false",
                expected: SelectedDate::None,
            },
            TestCase {
                json:     r#""2016-01-01""#,
                expected: SelectedDate::Date(date(2016, 1, 1)),
            },
        ];

        for case in &cases {
            let parsed: SelectedDate = serde_json::from_str(case.json).unwrap();
            assert_eq!(parsed, case.expected, "{}", case.json);
            assert_eq!(serde_json::to_string(&parsed).unwrap(), case.json);
        }

        assert!(serde_json::from_str::<SelectedDate>(r#""2016-13-01""#).is_err());
    }

    #[test]
    fn test_from_toml() {
        let config = CalendarConfig::from_toml_str(
            r#"
            selectedDate = false
            minDate = "2024-01-01"
            maxDate = "2024-12-31"
            disabledDates = ["2024-03-11", "2024-03-12"]
            keyboardSupport = false

            [locale]
            weekStart = 1

            [layout]
            rowHeight = 40
            align = "center"
            "#,
        )
        .unwrap();

        assert_eq!(config.selected_date, SelectedDate::None);
        assert_eq!(config.min_date, Some(date(2024, 1, 1)));
        assert_eq!(config.max_date, Some(date(2024, 12, 31)));
        assert!(config.disabled_set().contains(date(2024, 3, 12)));
        assert!(!config.keyboard_support);
        assert_eq!(config.locale.week_start, WeekStart::MONDAY);
        assert_eq!(config.locale.months.len(), 12);
        assert_eq!(config.layout.row_height, 40);
        assert_eq!(config.layout.height, 500);
        assert_eq!(config.layout.align, Align::Center);
    }

    #[test]
    fn test_from_toml_reports_errors() {
        assert!(matches!(
            CalendarConfig::from_toml_str(r#"minDate = "2024-02-30""#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            CalendarConfig::from_toml_str("minDate = \"2024-02-01\"\nmaxDate = \"2024-01-01\""),
            Err(ConfigError::Range(_))
        ));
    }
}
