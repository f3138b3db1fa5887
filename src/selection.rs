use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use crate::math::add_days;
use crate::prelude::*;
use crate::{CalendarDate, DateRange, DisabledSet, SelectedDate};

pub type BeforeSelectHook = Box<dyn FnMut(CalendarDate) -> bool>;
pub type DateHook = Box<dyn FnMut(CalendarDate)>;

/// Selected and highlighted days.
///
/// `highlighted` is always inside the active range and never disabled.
/// `selected` satisfies the range too, and was not disabled when it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SelectionState {
    pub selected:    Option<CalendarDate>,
    pub highlighted: CalendarDate,
}

/// Result of a [`SelectionController::select`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    Selected(CalendarDate),
    /// The clamped target is disabled; nothing changed.
    Disabled(CalendarDate),
    /// `before_select` declined (or panicked); nothing changed.
    Vetoed(CalendarDate),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectionError {
    /// Every day of the range is disabled, so nothing can be highlighted.
    #[error("No selectable date in range {range}")]
    NoSelectableDate { range: DateRange },
}

/// External hooks run by `select`, in order: veto, selected, after settle.
#[derive(Default)]
pub struct SelectionHooks {
    pub before_select: Option<BeforeSelectHook>,
    pub on_select:     Option<DateHook>,
    pub after_select:  Option<DateHook>,
}

impl fmt::Debug for SelectionHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionHooks")
            .field("before_select", &self.before_select.is_some())
            .field("on_select", &self.on_select.is_some())
            .field("after_select", &self.after_select.is_some())
            .finish()
    }
}

#[derive(Debug)]
pub struct SelectionController {
    state:    SelectionState,
    range:    DateRange,
    disabled: DisabledSet,
    hooks:    SelectionHooks,
}

/// Closest enabled day to `date` inside `range`, looking forward first.
///
/// Only finitely many days are disabled, so `disabled.len() + 1` steps in each
/// direction is enough to find one whenever one exists.
fn nearest_enabled(date: CalendarDate, range: &DateRange, disabled: &DisabledSet) -> Option<CalendarDate> {
    let date = range.clamp(date);
    let steps = i64::try_from(disabled.len()).unwrap_or(i64::MAX).saturating_add(1);
    (0..=steps)
        .flat_map(|step| [add_days(date, step), add_days(date, -step)])
        .find(|candidate| range.contains(*candidate) && !disabled.contains(*candidate))
}

impl SelectionController {
    /// Builds the initial state: `initial` clamped into `range`, dropped if it
    /// is disabled. The highlight follows the selection, or today.
    ///
    /// # Errors
    /// Returns `SelectionError::NoSelectableDate` if no day in `range` is enabled.
    pub fn new(
        initial: SelectedDate,
        today: CalendarDate,
        range: DateRange,
        disabled: DisabledSet,
        hooks: SelectionHooks,
    ) -> Result<Self, SelectionError> {
        let selected = initial
            .resolve(today)
            .map(|date| range.clamp(date))
            .filter(|date| !disabled.contains(*date));
        let highlighted = nearest_enabled(selected.unwrap_or(today), &range, &disabled)
            .ok_or(SelectionError::NoSelectableDate { range })?;
        Ok(Self {
            state: SelectionState { selected, highlighted },
            range,
            disabled,
            hooks,
        })
    }

    pub const fn state(&self) -> SelectionState {
        self.state
    }

    pub const fn selected(&self) -> Option<CalendarDate> {
        self.state.selected
    }

    pub const fn highlighted(&self) -> CalendarDate {
        self.state.highlighted
    }

    pub const fn range(&self) -> &DateRange {
        &self.range
    }

    pub const fn disabled(&self) -> &DisabledSet {
        &self.disabled
    }

    pub fn is_disabled(&self, date: CalendarDate) -> bool {
        self.disabled.contains(date)
    }

    pub fn hooks_mut(&mut self) -> &mut SelectionHooks {
        &mut self.hooks
    }

    /// Selects `date` after clamping it into range.
    ///
    /// A disabled target is rejected rather than replaced by a neighbour.
    /// The veto hook runs before any mutation; on success `on_select` then
    /// `after_select` fire.
    pub fn select(&mut self, date: CalendarDate) -> SelectOutcome {
        let target = self.range.clamp(date);
        if self.disabled.contains(target) {
            debug!(%target, "selection rejected: date is disabled");
            return SelectOutcome::Disabled(target);
        }
        if !self.allowed_by_hook(target) {
            debug!(%target, "selection vetoed");
            return SelectOutcome::Vetoed(target);
        }

        self.state = SelectionState {
            selected:    Some(target),
            highlighted: target,
        };
        if let Some(hook) = self.hooks.on_select.as_mut() {
            hook(target);
        }
        if let Some(hook) = self.hooks.after_select.as_mut() {
            hook(target);
        }
        SelectOutcome::Selected(target)
    }

    fn allowed_by_hook(&mut self, target: CalendarDate) -> bool {
        let Some(hook) = self.hooks.before_select.as_mut() else {
            return true;
        };
        panic::catch_unwind(AssertUnwindSafe(|| hook(target))).unwrap_or_else(|_| {
            warn!(%target, "before_select hook panicked; treating as veto");
            false
        })
    }

    /// Moves the highlight to `date` clamped into range. Returns whether the
    /// highlight changed; a disabled target leaves it where it was.
    pub fn highlight(&mut self, date: CalendarDate) -> bool {
        let target = self.range.clamp(date);
        if self.disabled.contains(target) || target == self.state.highlighted {
            return false;
        }
        self.state.highlighted = target;
        true
    }

    /// Shifts the highlight by `delta_days`; pins at the range bounds.
    pub fn move_by(&mut self, delta_days: i64) -> bool {
        self.highlight(add_days(self.state.highlighted, delta_days))
    }

    /// Programmatic selection (configuration change). Skips the hooks.
    /// A disabled target clears the selection; the highlight follows a
    /// successful selection and is otherwise left alone.
    pub fn set_selected(&mut self, selected: SelectedDate, today: CalendarDate) -> Option<CalendarDate> {
        let target = selected
            .resolve(today)
            .map(|date| self.range.clamp(date))
            .filter(|date| !self.disabled.contains(*date));
        self.state.selected = target;
        if let Some(date) = target {
            self.state.highlighted = date;
        }
        target
    }

    /// Replaces the range and re-clamps the state into it.
    ///
    /// # Errors
    /// Returns `SelectionError::NoSelectableDate` (state untouched) if every
    /// day of the new range is disabled.
    pub fn set_range(&mut self, range: DateRange) -> Result<(), SelectionError> {
        let disabled = self.disabled.clone();
        self.reconfigure(range, disabled)
    }

    /// Replaces the disabled set. An already selected day is kept even if it
    /// is now disabled; only later operations see the new set.
    ///
    /// # Errors
    /// Returns `SelectionError::NoSelectableDate` (state untouched) if every
    /// day of the range is disabled.
    pub fn set_disabled(&mut self, disabled: DisabledSet) -> Result<(), SelectionError> {
        self.reconfigure(self.range, disabled)
    }

    /// Applies a new range and disabled set together, all or nothing.
    ///
    /// A selection that clamps onto a disabled day is cleared rather than
    /// moved; the highlight goes to the nearest enabled day.
    ///
    /// # Errors
    /// Returns `SelectionError::NoSelectableDate` (state untouched) if no day
    /// of `range` is enabled.
    pub fn reconfigure(&mut self, range: DateRange, disabled: DisabledSet) -> Result<(), SelectionError> {
        let selected = match self.state.selected {
            Some(date) if !range.contains(date) => {
                let clamped = range.clamp(date);
                (!disabled.contains(clamped)).then_some(clamped)
            },
            other => other,
        };
        let highlighted = nearest_enabled(self.state.highlighted, &range, &disabled)
            .ok_or(SelectionError::NoSelectableDate { range })?;

        if selected != self.state.selected {
            debug!(from = ?self.state.selected, to = ?selected, "selection re-clamped");
        }
        self.state = SelectionState { selected, highlighted };
        self.range = range;
        self.disabled = disabled;
        Ok(())
    }
}
