use std::fmt;
use std::time::Duration;

use crate::keyboard::KeyHook;
use crate::math;
use crate::prelude::*;
use crate::{
    CalendarConfig, CalendarDate, ConfigError, DateIndex, Key, KeyAction, KeyboardController, Locale,
    RowIndex, ScrollCoordinator, ScrollHooks, ScrollSettled, ScrollTicket, SelectOutcome,
    SelectionController, SelectionHooks, SelectionState, VirtualList, VisibleWindow,
};

pub type LunarLabeler = Box<dyn Fn(CalendarDate) -> String>;

/// Every notification the calendar can raise, gathered before construction.
#[derive(Default)]
pub struct Hooks {
    selection:   SelectionHooks,
    scroll:      ScrollHooks,
    on_key_down: Option<KeyHook>,
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("selection", &self.selection)
            .field("scroll", &self.scroll)
            .field("on_key_down", &self.on_key_down.is_some())
            .finish()
    }
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returning `false` cancels the selection before anything changes.
    pub fn before_select(mut self, hook: impl FnMut(CalendarDate) -> bool + 'static) -> Self {
        self.selection.before_select = Some(Box::new(hook));
        self
    }

    pub fn on_select(mut self, hook: impl FnMut(CalendarDate) + 'static) -> Self {
        self.selection.on_select = Some(Box::new(hook));
        self
    }

    pub fn after_select(mut self, hook: impl FnMut(CalendarDate) + 'static) -> Self {
        self.selection.after_select = Some(Box::new(hook));
        self
    }

    pub fn on_scroll(mut self, hook: impl FnMut(i64) + 'static) -> Self {
        self.scroll.on_scroll = Some(Box::new(hook));
        self
    }

    pub fn on_visible_date_change(mut self, hook: impl FnMut(CalendarDate) + 'static) -> Self {
        self.scroll.on_visible_date_change = Some(Box::new(hook));
        self
    }

    pub fn on_scroll_settled(mut self, hook: impl FnMut(ScrollSettled) + 'static) -> Self {
        self.scroll.on_scroll_settled = Some(Box::new(hook));
        self
    }

    pub fn on_key_down(mut self, hook: impl FnMut(Key) + 'static) -> Self {
        self.on_key_down = Some(Box::new(hook));
        self
    }
}

/// What the host needs to draw one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date:           CalendarDate,
    /// `YYYYMMDD`
    pub key:            String,
    pub label:          String,
    pub is_today:       bool,
    pub is_selected:    bool,
    pub is_highlighted: bool,
    pub is_disabled:    bool,
    pub in_range:       bool,
}

/// Headless infinite calendar.
///
/// Owns the date index and the selection, keyboard and scroll controllers,
/// and keeps them consistent with one [`CalendarConfig`]. The host forwards
/// scroll offsets, clicks, key presses and elapsed time, and renders from
/// [`Calendar::mounted_cells`].
pub struct Calendar {
    config:    CalendarConfig,
    today:     CalendarDate,
    index:     DateIndex,
    selection: SelectionController,
    keyboard:  KeyboardController,
    scroll:    ScrollCoordinator,
    lunar:     Option<LunarLabeler>,
}

impl fmt::Debug for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Calendar")
            .field("config", &self.config)
            .field("today", &self.today)
            .field("index", &self.index)
            .field("selection", &self.selection)
            .field("keyboard", &self.keyboard)
            .field("scroll", &self.scroll)
            .field("lunar", &self.lunar.is_some())
            .finish()
    }
}

impl Calendar {
    /// Builds a calendar for the local current date.
    ///
    /// # Errors
    /// Returns any error of [`CalendarConfig::validate`], or
    /// `ConfigError::Selection` when every day of the range is disabled.
    pub fn new(config: CalendarConfig, hooks: Hooks) -> Result<Self, ConfigError> {
        Self::with_today(config, hooks, math::today())
    }

    /// Builds a calendar that treats `today` as the current date. `today` is
    /// also the row anchor when the range has no lower bound.
    ///
    /// # Errors
    /// Same as [`Calendar::new`].
    pub fn with_today(config: CalendarConfig, hooks: Hooks, today: CalendarDate) -> Result<Self, ConfigError> {
        let range = config.validate()?;
        let Hooks {
            selection: selection_hooks,
            scroll: scroll_hooks,
            on_key_down,
        } = hooks;

        let index = DateIndex::new(range, config.locale.week_start, today);
        let selection = SelectionController::new(
            config.selected_date,
            today,
            range,
            config.disabled_set(),
            selection_hooks,
        )?;
        let keyboard = KeyboardController::new(config.keyboard_support, on_key_down);
        let list = VirtualList::new(&config.layout, index.row_bounds());
        let scroll = ScrollCoordinator::new(list, config.layout.scroll_duration(), scroll_hooks);

        let mut calendar = Self {
            config,
            today,
            index,
            selection,
            keyboard,
            scroll,
            lunar: None,
        };
        calendar.scroll_to_focus();
        debug!(%today, selected = ?calendar.selected_date(), "calendar mounted");
        Ok(calendar)
    }

    pub fn with_lunar_labeler(mut self, labeler: impl Fn(CalendarDate) -> String + 'static) -> Self {
        self.set_lunar_labeler(labeler);
        self
    }

    pub fn set_lunar_labeler(&mut self, labeler: impl Fn(CalendarDate) -> String + 'static) {
        self.lunar = Some(Box::new(labeler));
    }

    pub const fn config(&self) -> &CalendarConfig {
        &self.config
    }

    pub const fn locale(&self) -> &Locale {
        &self.config.locale
    }

    pub const fn today(&self) -> CalendarDate {
        self.today
    }

    pub const fn date_index(&self) -> &DateIndex {
        &self.index
    }

    pub const fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    pub const fn selected_date(&self) -> Option<CalendarDate> {
        self.selection.selected()
    }

    pub const fn highlighted_date(&self) -> CalendarDate {
        self.selection.highlighted()
    }

    pub const fn visible_window(&self) -> Option<VisibleWindow> {
        self.scroll.visible_window()
    }

    pub const fn visible_date(&self) -> Option<CalendarDate> {
        self.scroll.visible_date()
    }

    pub const fn is_keyboard_enabled(&self) -> bool {
        self.keyboard.is_enabled()
    }

    /// Scrolls to `date`, or to today when `None`. The target is clamped into
    /// range.
    pub fn scroll_to_date(&mut self, date: Option<CalendarDate>, animate: bool) -> ScrollTicket {
        let target = date.unwrap_or(self.today);
        self.scroll.scroll_to_date(target, animate, &self.index)
    }

    /// The scroll offset the calendar believes the list is at.
    pub fn get_current_offset(&self) -> i64 {
        self.scroll.current_offset().unwrap_or_default()
    }

    /// The offset `scroll_to_date(Some(date))` would land on.
    pub fn get_date_offset(&self, date: CalendarDate) -> i64 {
        self.scroll.offset_for_date(date, &self.index)
    }

    /// Scroll position reported by the host.
    pub fn on_scroll(&mut self, offset: i64) {
        self.scroll.on_scroll(offset, &self.index);
    }

    /// Advances the clock of any programmatic scroll in flight.
    pub fn tick(&mut self, elapsed: Duration) -> Option<ScrollSettled> {
        self.scroll.advance(elapsed, &self.index)
    }

    /// Day-cell click.
    pub fn click(&mut self, date: CalendarDate) -> SelectOutcome {
        self.selection.select(date)
    }

    /// Keyboard input. A move that leaves the highlighted day outside the
    /// viewport scrolls it back into view.
    pub fn key_down(&mut self, key: Key) -> Option<KeyAction> {
        let action = self.keyboard.handle(key, &mut self.selection)?;
        if let KeyAction::Move(_) = action {
            self.reveal_highlight();
        }
        Some(action)
    }

    /// Applies a new configuration, touching only what changed.
    ///
    /// Range or week-start changes rebuild the index and re-clamp the
    /// selection. A new `selected_date` replaces the selection and scrolls to
    /// it. Locale and layout changes never move the selection.
    ///
    /// # Errors
    /// Returns the validation error of `new`, or `ConfigError::Selection` if
    /// the new range has no enabled day. The calendar is unchanged on error.
    pub fn reconcile_config(&mut self, new: CalendarConfig) -> Result<(), ConfigError> {
        let range = new.validate()?;
        let old = &self.config;
        let range_changed = old.min_date != new.min_date || old.max_date != new.max_date;
        let week_changed = old.locale.week_start != new.locale.week_start;
        let disabled_changed = old.disabled_dates != new.disabled_dates;
        let selected_changed = old.selected_date != new.selected_date;
        let layout_changed = old.layout != new.layout;
        let locale_changed = old.locale != new.locale;
        let keyboard_changed = old.keyboard_support != new.keyboard_support;

        if range_changed || disabled_changed {
            self.selection.reconfigure(range, new.disabled_set())?;
        }
        if range_changed || week_changed {
            self.index = self.index.rebuild(range, new.locale.week_start);
            self.scroll.rebuild(&self.index);
        }
        if layout_changed {
            self.scroll.set_layout(&new.layout, &self.index);
        }
        if keyboard_changed {
            self.keyboard.set_enabled(new.keyboard_support);
        }
        if selected_changed {
            self.selection.set_selected(new.selected_date, self.today);
        }

        debug!(
            range_changed,
            week_changed,
            disabled_changed,
            selected_changed,
            layout_changed,
            locale_changed,
            keyboard_changed,
            "configuration reconciled"
        );
        self.config = new;

        if selected_changed || range_changed || week_changed {
            self.scroll_to_focus();
        }
        Ok(())
    }

    /// Header text: the selected date in the locale's header format, or the
    /// locale's blank text.
    pub fn header_label(&self) -> String {
        let locale = &self.config.locale;
        self.selected_date()
            .map_or_else(|| locale.blank.clone(), |date| locale.format(date, &locale.header_format))
    }

    pub fn day_cell(&self, date: CalendarDate) -> DayCell {
        let state = self.selection.state();
        let is_today = date == self.today;
        let label = if is_today {
            self.config.locale.today_label.short.clone()
        } else if let Some(lunar) = &self.lunar {
            lunar(date)
        } else {
            date.day().to_string()
        };

        DayCell {
            date,
            key: date.key(),
            label,
            is_today,
            is_selected: state.selected == Some(date),
            is_highlighted: state.highlighted == date,
            is_disabled: self.selection.is_disabled(date),
            in_range: self.index.range().contains(date),
        }
    }

    /// Cells of every mounted row, top to bottom.
    pub fn mounted_cells(&self) -> Vec<(RowIndex, Vec<DayCell>)> {
        let Some(window) = self.scroll.visible_window() else {
            return Vec::new();
        };
        window
            .rows()
            .map(|row| {
                let cells = self.index.row_dates(row).map(|date| self.day_cell(date)).collect();
                (row, cells)
            })
            .collect()
    }

    /// Jumps to the selection, or to today when nothing is selected.
    fn scroll_to_focus(&mut self) {
        let target = self.selected_date().unwrap_or(self.today);
        self.scroll.scroll_to_date(target, false, &self.index);
    }

    fn reveal_highlight(&mut self) {
        let row = self.index.index_of(self.highlighted_date());
        let offset = self.get_current_offset();
        if !self.scroll.list().is_fully_visible(row, offset) {
            self.scroll.scroll_to_date(self.highlighted_date(), false, &self.index);
        }
    }
}
