use std::fmt;
use std::time::Duration;

use crate::prelude::*;
use crate::selection::DateHook;
use crate::{CalendarDate, DateIndex, Layout, VirtualList, VisibleWindow};

pub type OffsetHook = Box<dyn FnMut(i64)>;
pub type SettledHook = Box<dyn FnMut(ScrollSettled)>;

/// Identifies one programmatic scroll request. Later requests get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, Into)]
#[display(fmt = "#{_0}")]
pub struct ScrollTicket(u64);

/// Reported once per programmatic scroll that ran to completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSettled {
    pub ticket: ScrollTicket,
    pub date:   CalendarDate,
    pub offset: i64,
}

#[derive(Default)]
pub struct ScrollHooks {
    /// Every change of scroll offset
    pub on_scroll:              Option<OffsetHook>,
    /// The date of the topmost fully visible row changed
    pub on_visible_date_change: Option<DateHook>,
    pub on_scroll_settled:      Option<SettledHook>,
}

impl fmt::Debug for ScrollHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollHooks")
            .field("on_scroll", &self.on_scroll.is_some())
            .field("on_visible_date_change", &self.on_visible_date_change.is_some())
            .field("on_scroll_settled", &self.on_scroll_settled.is_some())
            .finish()
    }
}

#[derive(Debug, Clone, Copy)]
struct PendingScroll {
    ticket:    ScrollTicket,
    date:      CalendarDate,
    offset:    i64,
    remaining: Duration,
    animated:  bool,
}

/// Bridges scroll offsets (from the user or from `scroll_to_date`) and the
/// mounted window of the list.
///
/// At most one programmatic request is in flight. A newer request replaces it
/// silently, so only the latest one ever reports settlement. Completion is
/// driven by [`ScrollCoordinator::advance`].
#[derive(Debug)]
pub struct ScrollCoordinator {
    list:         VirtualList,
    offset:       Option<i64>,
    window:       Option<VisibleWindow>,
    visible_date: Option<CalendarDate>,
    pending:      Option<PendingScroll>,
    next_ticket:  u64,
    animation:    Duration,
    hooks:        ScrollHooks,
}

impl ScrollCoordinator {
    pub fn new(list: VirtualList, animation: Duration, hooks: ScrollHooks) -> Self {
        Self {
            list,
            offset: None,
            window: None,
            visible_date: None,
            pending: None,
            next_ticket: 0,
            animation,
            hooks,
        }
    }

    pub const fn list(&self) -> &VirtualList {
        &self.list
    }

    /// `None` until the first scroll
    pub const fn current_offset(&self) -> Option<i64> {
        self.offset
    }

    pub const fn visible_window(&self) -> Option<VisibleWindow> {
        self.window
    }

    /// Date of the topmost fully visible row, as last reported
    pub const fn visible_date(&self) -> Option<CalendarDate> {
        self.visible_date
    }

    pub fn pending_ticket(&self) -> Option<ScrollTicket> {
        self.pending.map(|pending| pending.ticket)
    }

    pub fn hooks_mut(&mut self) -> &mut ScrollHooks {
        &mut self.hooks
    }

    /// Offset `scroll_to_date(date)` would scroll to.
    pub fn offset_for_date(&self, date: CalendarDate, index: &DateIndex) -> i64 {
        let target = index.range().clamp(date);
        self.list.scroll_offset_for(index.index_of(target))
    }

    /// Starts a programmatic scroll to `date` (clamped into range), replacing
    /// any request still in flight.
    ///
    /// Without animation the offset jumps now and settlement is reported on
    /// the next `advance`; user scrolling in between is kept. With animation
    /// both happen once the configured duration has elapsed.
    pub fn scroll_to_date(&mut self, date: CalendarDate, animate: bool, index: &DateIndex) -> ScrollTicket {
        let target = index.range().clamp(date);
        let offset = self.offset_for_date(target, index);
        if let Some(superseded) = self.pending.take() {
            trace!(ticket = %superseded.ticket, "scroll request superseded");
        }

        self.next_ticket += 1;
        let ticket = ScrollTicket(self.next_ticket);
        let remaining = if animate { self.animation } else { Duration::ZERO };
        self.pending = Some(PendingScroll {
            ticket,
            date: target,
            offset,
            remaining,
            animated: animate,
        });
        trace!(%ticket, %target, offset, animate, "scroll requested");

        if !animate {
            self.apply_offset(offset, index);
        }
        ticket
    }

    /// Drops the request in flight, if any. It will never report settlement.
    pub fn cancel(&mut self) -> Option<ScrollTicket> {
        self.pending.take().map(|pending| pending.ticket)
    }

    /// A scroll position reported by the host. Repeated identical offsets are
    /// ignored; a user scroll during an animated request cancels it.
    pub fn on_scroll(&mut self, offset: i64, index: &DateIndex) {
        if self.offset == Some(offset) {
            return;
        }
        if self.pending.is_some_and(|pending| pending.animated) {
            let cancelled = self.cancel();
            trace!(ticket = ?cancelled, "animated scroll cancelled by user scroll");
        }
        self.apply_offset(offset, index);
    }

    /// Advances the clock of the request in flight by `elapsed`, completing
    /// it when its time is up.
    pub fn advance(&mut self, elapsed: Duration, index: &DateIndex) -> Option<ScrollSettled> {
        let pending = self.pending.as_mut()?;
        if elapsed < pending.remaining {
            pending.remaining -= elapsed;
            return None;
        }
        let pending = self.pending.take()?;
        if pending.animated && self.offset != Some(pending.offset) {
            self.apply_offset(pending.offset, index);
        }

        let settled = ScrollSettled {
            ticket: pending.ticket,
            date:   pending.date,
            offset: pending.offset,
        };
        debug!(ticket = %pending.ticket, date = %pending.date, offset = pending.offset, "scroll settled");
        if let Some(hook) = self.hooks.on_scroll_settled.as_mut() {
            hook(settled);
        }
        Some(settled)
    }

    /// Re-reads the row bounds after the index was rebuilt. Requests in
    /// flight were computed against the old rows and are dropped.
    ///
    /// The old offset means nothing against the new rows, so only the window
    /// is remounted here; the visible date is reported by the next scroll.
    pub fn rebuild(&mut self, index: &DateIndex) {
        if let Some(stale) = self.cancel() {
            trace!(ticket = %stale, "scroll request dropped by index rebuild");
        }
        self.list.set_bounds(index.row_bounds());
        if let Some(offset) = self.offset {
            self.window = Some(self.list.mount(offset));
        }
    }

    pub fn set_layout(&mut self, layout: &Layout, index: &DateIndex) {
        self.list.set_layout(layout);
        self.animation = layout.scroll_duration();
        self.refresh(index);
    }

    fn apply_offset(&mut self, offset: i64, index: &DateIndex) {
        self.offset = Some(offset);
        if let Some(hook) = self.hooks.on_scroll.as_mut() {
            hook(offset);
        }
        self.refresh(index);
    }

    /// Remounts the window at the current offset and reports a new dominant date.
    fn refresh(&mut self, index: &DateIndex) {
        let Some(offset) = self.offset else {
            return;
        };
        self.window = Some(self.list.mount(offset));

        let row = self.list.top_fully_visible(offset);
        let dominant = index.range().clamp(index.date_at_index(row, 0));
        if self.visible_date != Some(dominant) {
            self.visible_date = Some(dominant);
            if let Some(hook) = self.hooks.on_visible_date_change.as_mut() {
                hook(dominant);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{Recorder, date};
    use crate::{DateRange, WeekStart};

    const ROW: i64 = 56;

    fn index() -> DateIndex {
        DateIndex::new(DateRange::unbounded(), WeekStart::SUNDAY, date(2024, 3, 10))
    }

    fn coordinator(index: &DateIndex) -> ScrollCoordinator {
        let layout = Layout::default();
        ScrollCoordinator::new(
            VirtualList::new(&layout, index.row_bounds()),
            layout.scroll_duration(),
            ScrollHooks::default(),
        )
    }

    fn record_settled(scroll: &mut ScrollCoordinator) -> Recorder<ScrollSettled> {
        let settled = Recorder::default();
        let sink = settled.clone();
        scroll.hooks_mut().on_scroll_settled = Some(Box::new(move |s: ScrollSettled| sink.push(s)));
        settled
    }

    #[test]
    fn test_jump_applies_now_and_settles_on_advance() {
        let index = index();
        let mut scroll = coordinator(&index);
        let settled = record_settled(&mut scroll);

        let ticket = scroll.scroll_to_date(date(2024, 3, 24), false, &index);
        assert_eq!(scroll.current_offset(), Some(2 * ROW));
        assert!(settled.is_empty());

        let result = scroll.advance(Duration::ZERO, &index);
        assert_eq!(result.map(|s| s.ticket), Some(ticket));
        assert_eq!(settled.len(), 1);
        assert_eq!(scroll.advance(Duration::from_secs(1), &index), None);
    }

    #[test]
    fn test_superseded_request_never_settles() {
        let index = index();
        let mut scroll = coordinator(&index);
        let settled = record_settled(&mut scroll);

        scroll.scroll_to_date(date(2024, 3, 24), true, &index);
        let second = scroll.scroll_to_date(date(2024, 4, 7), true, &index);
        scroll.advance(Duration::from_secs(1), &index);
        scroll.advance(Duration::from_secs(1), &index);

        let all = settled.take();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].ticket, second);
        assert_eq!(all[0].offset, 4 * ROW);
        assert_eq!(all[0].date, date(2024, 4, 7));
        assert_eq!(u64::from(second), 2);
        assert_eq!(second.to_string(), "#2");
    }

    #[test]
    fn test_animated_request_waits_for_duration() {
        let index = index();
        let mut scroll = coordinator(&index);
        scroll.on_scroll(0, &index);
        let settled = record_settled(&mut scroll);

        scroll.scroll_to_date(date(2024, 3, 17), true, &index);
        assert_eq!(scroll.current_offset(), Some(0));
        assert_eq!(scroll.advance(Duration::from_millis(100), &index), None);
        assert_eq!(scroll.current_offset(), Some(0));

        assert!(scroll.advance(Duration::from_millis(200), &index).is_some());
        assert_eq!(scroll.current_offset(), Some(ROW));
        assert_eq!(settled.len(), 1);
    }

    #[test]
    fn test_user_scroll_cancels_animation() {
        let index = index();
        let mut scroll = coordinator(&index);
        let settled = record_settled(&mut scroll);

        scroll.scroll_to_date(date(2024, 6, 1), true, &index);
        scroll.on_scroll(10, &index);
        assert_eq!(scroll.pending_ticket(), None);
        assert_eq!(scroll.advance(Duration::from_secs(1), &index), None);
        assert!(settled.is_empty());
        assert_eq!(scroll.current_offset(), Some(10));
    }

    #[test]
    fn test_echoed_jump_keeps_settlement() {
        let index = index();
        let mut scroll = coordinator(&index);
        let settled = record_settled(&mut scroll);

        scroll.scroll_to_date(date(2024, 3, 24), false, &index);
        scroll.on_scroll(2 * ROW, &index);
        scroll.on_scroll(2 * ROW + 5, &index);
        scroll.advance(Duration::ZERO, &index);
        assert_eq!(settled.len(), 1);
        assert_eq!(scroll.current_offset(), Some(2 * ROW + 5));
    }

    #[test]
    fn test_settling_jump_keeps_user_offset() {
        let index = index();
        let mut scroll = coordinator(&index);
        let settled = record_settled(&mut scroll);
        let offsets = Recorder::default();
        let sink = offsets.clone();
        scroll.hooks_mut().on_scroll = Some(Box::new(move |offset: i64| sink.push(offset)));

        let ticket = scroll.scroll_to_date(date(2024, 3, 24), false, &index);
        scroll.on_scroll(2 * ROW, &index);
        scroll.on_scroll(1000, &index);
        let result = scroll.advance(Duration::from_millis(16), &index);

        assert_eq!(result.map(|s| s.ticket), Some(ticket));
        assert_eq!(settled.len(), 1);
        assert_eq!(scroll.current_offset(), Some(1000));
        assert_eq!(offsets.take(), vec![2 * ROW, 1000]);
    }

    #[test]
    fn test_on_scroll_is_idempotent() {
        let index = index();
        let mut scroll = coordinator(&index);
        let offsets = Recorder::default();
        let sink = offsets.clone();
        scroll.hooks_mut().on_scroll = Some(Box::new(move |offset: i64| sink.push(offset)));

        scroll.on_scroll(30, &index);
        scroll.on_scroll(30, &index);
        scroll.on_scroll(31, &index);
        assert_eq!(offsets.take(), vec![30, 31]);
    }

    #[test]
    fn test_visible_date_fires_only_on_row_change() {
        let index = index();
        let mut scroll = coordinator(&index);
        let dates = Recorder::default();
        let sink = dates.clone();
        scroll.hooks_mut().on_visible_date_change = Some(Box::new(move |d: CalendarDate| sink.push(d)));

        for offset in 0..=ROW {
            scroll.on_scroll(offset, &index);
        }
        scroll.on_scroll(-ROW, &index);
        assert_eq!(
            dates.take(),
            vec![date(2024, 3, 10), date(2024, 3, 17), date(2024, 3, 3)]
        );
        assert_eq!(scroll.visible_date(), Some(date(2024, 3, 3)));
    }

    #[test]
    fn test_window_follows_offset() {
        let index = index();
        let mut scroll = coordinator(&index);
        scroll.on_scroll(ROW * 10, &index);
        let window = scroll.visible_window().unwrap();
        assert_eq!(window.first_index, 9);
        assert!(scroll.list().is_mounted(10));
    }

    #[test]
    fn test_scroll_target_is_clamped_into_range() {
        let range = DateRange::new(Some(date(2024, 1, 1)), Some(date(2024, 12, 31))).unwrap();
        let index = DateIndex::new(range, WeekStart::SUNDAY, date(2024, 3, 10));
        let mut scroll = coordinator(&index);
        scroll.scroll_to_date(date(2020, 1, 1), false, &index);
        assert_eq!(scroll.current_offset(), Some(0));
        let settled = scroll.advance(Duration::ZERO, &index).unwrap();
        assert_eq!(settled.date, date(2024, 1, 1));
    }

    #[test]
    fn test_rebuild_drops_pending_request() {
        let index = index();
        let mut scroll = coordinator(&index);
        let settled = record_settled(&mut scroll);
        scroll.scroll_to_date(date(2024, 6, 1), true, &index);

        let bounded = index.rebuild(DateRange::new(Some(date(2024, 3, 1)), None).unwrap(), WeekStart::SUNDAY);
        scroll.rebuild(&bounded);
        assert_eq!(scroll.advance(Duration::from_secs(1), &bounded), None);
        assert!(settled.is_empty());
        assert_eq!(scroll.list().bounds().first, Some(0));
    }

    #[test]
    fn test_rebuild_reports_visible_date_once() {
        let index = index();
        let mut scroll = coordinator(&index);
        let dates = Recorder::default();
        let sink = dates.clone();
        scroll.hooks_mut().on_visible_date_change = Some(Box::new(move |d: CalendarDate| sink.push(d)));
        scroll.on_scroll(20 * ROW, &index);
        dates.take();

        let min = date(2024, 3, 20);
        let bounded = index.rebuild(DateRange::new(Some(min), None).unwrap(), WeekStart::SUNDAY);
        scroll.rebuild(&bounded);
        assert!(dates.is_empty());
        assert!(scroll.visible_window().is_some());

        scroll.scroll_to_date(min, false, &bounded);
        assert_eq!(dates.take(), vec![min]);
    }
}
