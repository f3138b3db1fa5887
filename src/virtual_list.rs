use crate::prelude::*;
use crate::{Align, Layout, RowBounds, RowIndex, VisibleWindow};

/// Windowed list of fixed-height rows.
///
/// Either side may be infinite. Nothing here enumerates rows: every lookup is
/// a direct multiplication or division, so negative and very large indices
/// cost the same as small ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VirtualList {
    row_height:      i64,
    viewport_height: i64,
    overscan:        i64,
    align:           Align,
    bounds:          RowBounds,
    mounted:         Option<VisibleWindow>,
}

impl VirtualList {
    /// `layout` must have been validated (non-zero row height).
    pub fn new(layout: &Layout, bounds: RowBounds) -> Self {
        debug_assert!(layout.row_height > 0);
        Self {
            row_height: i64::from(layout.row_height.max(1)),
            viewport_height: i64::from(layout.height),
            overscan: i64::from(layout.overscan_rows),
            align: layout.align,
            bounds,
            mounted: None,
        }
    }

    pub const fn row_height(&self) -> i64 {
        self.row_height
    }

    pub const fn viewport_height(&self) -> i64 {
        self.viewport_height
    }

    pub const fn bounds(&self) -> RowBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: RowBounds) {
        self.bounds = bounds;
    }

    pub fn set_layout(&mut self, layout: &Layout) {
        let bounds = self.bounds;
        *self = Self {
            mounted: self.mounted,
            ..Self::new(layout, bounds)
        };
    }

    /// Total row count, `None` when the list is infinite on either side.
    pub fn row_count(&self) -> Option<u64> {
        self.bounds.len()
    }

    /// Height of all rows, `None` when the list is infinite on either side.
    pub fn total_height(&self) -> Option<i64> {
        self.row_count()
            .and_then(|rows| i64::try_from(rows).ok())
            .map(|rows| rows.saturating_mul(self.row_height))
    }

    pub const fn offset_for_index(&self, index: RowIndex) -> i64 {
        index.saturating_mul(self.row_height)
    }

    pub const fn index_for_offset(&self, offset: i64) -> RowIndex {
        offset.div_euclid(self.row_height)
    }

    /// Rows covering the viewport at `offset`, plus the overscan rows on each
    /// side, limited to the list bounds.
    pub fn visible_range(&self, offset: i64) -> VisibleWindow {
        let bottom = offset.saturating_add(self.viewport_height.max(1) - 1);
        let first = self
            .bounds
            .clamp(self.index_for_offset(offset).saturating_sub(self.overscan));
        let last = self
            .bounds
            .clamp(self.index_for_offset(bottom).saturating_add(self.overscan));
        VisibleWindow {
            first_index: first,
            last_index:  last,
            offset_px:   self.offset_for_index(first),
        }
    }

    /// Computes and records the mounted window for `offset`.
    pub fn mount(&mut self, offset: i64) -> VisibleWindow {
        let window = self.visible_range(offset);
        if self.mounted != Some(window) {
            trace!(first = window.first_index, last = window.last_index, "mounted rows changed");
        }
        self.mounted = Some(window);
        window
    }

    pub const fn mounted(&self) -> Option<VisibleWindow> {
        self.mounted
    }

    pub fn is_mounted(&self, index: RowIndex) -> bool {
        self.mounted.is_some_and(|window| window.contains(index))
    }

    /// The first row whose top edge is at or below `offset`.
    pub fn top_fully_visible(&self, offset: i64) -> RowIndex {
        let ceil = -(offset.saturating_neg().div_euclid(self.row_height));
        self.bounds.clamp(ceil)
    }

    pub fn is_fully_visible(&self, index: RowIndex, offset: i64) -> bool {
        let top = self.offset_for_index(index);
        top >= offset && top.saturating_add(self.row_height) <= offset.saturating_add(self.viewport_height)
    }

    /// Scroll offset that brings row `index` to the top (or center) of the
    /// viewport, kept within the scrollable extent of a bounded list.
    pub fn scroll_offset_for(&self, index: RowIndex) -> i64 {
        let top = self.offset_for_index(self.bounds.clamp(index));
        let aligned = match self.align {
            Align::Top => top,
            Align::Center => top - (self.viewport_height - self.row_height) / 2,
        };
        self.clamp_offset(aligned)
    }

    fn clamp_offset(&self, offset: i64) -> i64 {
        let min = self.bounds.first.map(|first| self.offset_for_index(first));
        let max = self.bounds.last.map(|last| {
            let end = self.offset_for_index(last.saturating_add(1));
            let max = end.saturating_sub(self.viewport_height);
            min.map_or(max, |min| max.max(min))
        });
        let offset = min.map_or(offset, |min| offset.max(min));
        max.map_or(offset, |max| offset.min(max))
    }
}
