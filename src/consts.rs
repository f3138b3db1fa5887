/// Earliest representable year (inclusive)
pub const MIN_YEAR: i32 = 1;

/// Latest representable year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u32 = 12;

/// Number of days held by one row of the list (one week)
pub const DAYS_PER_WEEK: i64 = 7;

/// Length of the canonical `YYYYMMDD` key
pub const KEY_LEN: usize = 8;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
/// Marker for an open range bound, as in ISO 8601-2 (`2024-01-01/..`)
pub const OPEN_BOUND: &str = "..";

/// Default height of one week row, in pixels
pub const DEFAULT_ROW_HEIGHT: u32 = 56;
/// Default viewport height, in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 500;
/// Rows rendered beyond each edge of the viewport
pub const DEFAULT_OVERSCAN_ROWS: u32 = 1;
/// Duration of an animated programmatic scroll, in milliseconds
pub const DEFAULT_SCROLL_DURATION_MS: u64 = 300;

/// DOM key codes understood by the keyboard controller
pub const KEY_CODE_ENTER: u32 = 13;
pub const KEY_CODE_LEFT: u32 = 37;
pub const KEY_CODE_UP: u32 = 38;
pub const KEY_CODE_RIGHT: u32 = 39;
pub const KEY_CODE_DOWN: u32 = 40;
