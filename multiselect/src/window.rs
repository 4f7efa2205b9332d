//! Window adapter: maps the filtered catalog onto a fixed-height viewport
//! for an external virtualized row renderer.
//!
//! This module does not draw. A [`Window`] answers "how tall is the list,
//! how far does it scroll, what is in row `i`", and a [`Virtualizer`]
//! decides which index range is worth drawing for a scroll offset.
//! [`FixedSizeList`] is the stock virtualizer; renderers with their own
//! recycling or overscan strategy implement the trait instead.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use crate::catalog::{Item, Key};
use crate::config::Presentation;

/// List viewport height for `count` rows.
///
/// `min(max_height, count * row_height)`, minus `header` when a header
/// shares the panel with the list. Saturates at zero.
pub fn viewport_height(count: usize, row_height: u32, max_height: u32, header: u32) -> u32 {
    let rows = (count as u64).saturating_mul(u64::from(row_height));
    let capped = rows.min(u64::from(max_height)) as u32;
    capped.saturating_sub(header)
}

// =============================================================================
// Row data
// =============================================================================

/// Everything a row needs, bundled once per (filtered view, selection,
/// presentation) combination and shared by all rows.
#[derive(Debug)]
pub struct RowData<K> {
    pub items: Arc<[Item<K>]>,
    pub selected: HashSet<K>,
    pub presentation: Arc<Presentation>,
}

impl<K: Key> RowData<K> {
    pub fn new(
        items: Arc<[Item<K>]>,
        selected: HashSet<K>,
        presentation: Arc<Presentation>,
    ) -> Self {
        Self {
            items,
            selected,
            presentation,
        }
    }
}

/// One row, borrowed from a [`Window`].
#[derive(Debug, Clone)]
pub struct Row<'a, K> {
    pub index: usize,
    /// Offset of the row's top edge from the top of the list content.
    pub offset: u32,
    pub item: &'a Item<K>,
    pub selected: bool,
    pub presentation: &'a Presentation,
}

impl<'a, K> Row<'a, K> {
    /// The label, or an empty string for unlabeled items.
    pub fn label(&self) -> &'a str {
        self.item.label().unwrap_or("")
    }

    /// Selected rows carry a checkmark.
    pub fn show_checkmark(&self) -> bool {
        self.selected
    }

    /// Row background: hover beats selection beats the base color.
    pub fn background(&self, hovered: bool) -> &'a str {
        if hovered {
            &self.presentation.hover
        } else if self.selected {
            &self.presentation.selected
        } else {
            &self.presentation.background
        }
    }
}

// =============================================================================
// Window
// =============================================================================

/// The windowing contract handed to a row renderer.
#[derive(Debug, Clone)]
pub struct Window<K> {
    data: Arc<RowData<K>>,
    row_height: u32,
    height: u32,
}

impl<K: Key> Window<K> {
    pub fn new(data: Arc<RowData<K>>, row_height: u32, height: u32) -> Self {
        Self {
            data,
            row_height,
            height,
        }
    }

    /// Shared row bundle. Stays the same allocation until the filtered view,
    /// the selection or the presentation changes.
    pub fn data(&self) -> &Arc<RowData<K>> {
        &self.data
    }

    pub fn item_count(&self) -> usize {
        self.data.items.len()
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    /// Viewport height of the list.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total height of all rows, i.e. the scrollable extent.
    pub fn content_height(&self) -> u32 {
        let total = (self.item_count() as u64).saturating_mul(u64::from(self.row_height));
        total.min(u64::from(u32::MAX)) as u32
    }

    pub fn offset_of(&self, index: usize) -> u32 {
        let offset = (index as u64).saturating_mul(u64::from(self.row_height));
        offset.min(u64::from(u32::MAX)) as u32
    }

    /// Index of the row covering content offset `y`, if any.
    pub fn index_at(&self, y: u32) -> Option<usize> {
        if self.row_height == 0 {
            return None;
        }
        let index = (y / self.row_height) as usize;
        (index < self.item_count()).then_some(index)
    }

    pub fn row(&self, index: usize) -> Option<Row<'_, K>> {
        let item = self.data.items.get(index)?;
        Some(Row {
            index,
            offset: self.offset_of(index),
            item,
            selected: self.data.selected.contains(&item.key),
            presentation: &self.data.presentation,
        })
    }

    /// Rows in `range`, clipped to the item count.
    pub fn rows(&self, range: Range<usize>) -> impl Iterator<Item = Row<'_, K>> {
        let end = range.end.min(self.item_count());
        let start = range.start.min(end);
        (start..end).filter_map(move |index| self.row(index))
    }

    /// Rows the given virtualizer wants drawn.
    pub fn visible_rows<'a>(
        &'a self,
        virtualizer: &impl Virtualizer,
    ) -> impl Iterator<Item = Row<'a, K>> {
        self.rows(virtualizer.visible_range(self.item_count(), self.row_height, self.height))
    }
}

// =============================================================================
// Virtualizer
// =============================================================================

/// Picks the index range to draw. Implemented by row renderers.
pub trait Virtualizer {
    fn visible_range(&self, item_count: usize, row_height: u32, viewport: u32) -> Range<usize>;
}

/// Scroll position of a list viewport, clamped to the content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    /// Current offset from the top of the content.
    pub offset: u32,
    /// Viewport height.
    pub viewport: u32,
    /// Total content height.
    pub content_height: u32,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_offset(&self) -> u32 {
        self.content_height.saturating_sub(self.viewport)
    }

    pub fn can_scroll(&self) -> bool {
        self.content_height > self.viewport
    }

    /// Scroll by a relative amount. Returns true if the offset changed.
    pub fn scroll_by(&mut self, delta: i64) -> bool {
        let target = i64::from(self.offset)
            .saturating_add(delta)
            .clamp(0, i64::from(self.max_offset()));
        self.scroll_to(target as u32)
    }

    /// Scroll to an absolute offset. Returns true if the offset changed.
    pub fn scroll_to(&mut self, offset: u32) -> bool {
        let clamped = offset.min(self.max_offset());
        let changed = clamped != self.offset;
        self.offset = clamped;
        changed
    }

    /// Scroll the least amount that brings `[top, top + height)` into view.
    pub fn scroll_into_view(&mut self, top: u32, height: u32) -> bool {
        let bottom = top.saturating_add(height);
        if top < self.offset {
            self.scroll_to(top)
        } else if bottom > self.offset.saturating_add(self.viewport) {
            self.scroll_to(bottom.saturating_sub(self.viewport))
        } else {
            false
        }
    }

    pub fn set_viewport(&mut self, viewport: u32) {
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn set_content_height(&mut self, height: u32) {
        self.content_height = height;
        self.offset = self.offset.min(self.max_offset());
    }
}

/// Fixed-row-height virtualizer with overscan on both sides.
#[derive(Debug, Clone)]
pub struct FixedSizeList {
    pub scroll: ScrollState,
    /// Extra rows rendered above and below the viewport.
    pub overscan: usize,
}

impl Default for FixedSizeList {
    fn default() -> Self {
        Self {
            scroll: ScrollState::new(),
            overscan: 2,
        }
    }
}

impl FixedSizeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    /// Adopt a window's geometry, keeping the offset within bounds.
    pub fn sync<K: Key>(&mut self, window: &Window<K>) {
        self.scroll.set_content_height(window.content_height());
        self.scroll.set_viewport(window.height());
    }

    /// Scroll so that row `index` is fully visible.
    pub fn scroll_to_row<K: Key>(&mut self, window: &Window<K>, index: usize) -> bool {
        if index >= window.item_count() {
            return false;
        }
        self.scroll
            .scroll_into_view(window.offset_of(index), window.row_height())
    }

    /// Row under viewport-relative `y`.
    pub fn index_at<K: Key>(&self, window: &Window<K>, y: u32) -> Option<usize> {
        if y >= window.height() {
            return None;
        }
        window.index_at(self.scroll.offset.saturating_add(y))
    }
}

impl Virtualizer for FixedSizeList {
    fn visible_range(&self, item_count: usize, row_height: u32, viewport: u32) -> Range<usize> {
        if item_count == 0 || row_height == 0 || viewport == 0 {
            return 0..0;
        }

        let offset = self.scroll.offset;
        let first = (offset / row_height) as usize;
        let last = offset.saturating_add(viewport).div_ceil(row_height) as usize;

        let start = first.saturating_sub(self.overscan).min(item_count);
        let end = last.saturating_add(self.overscan).min(item_count);
        start..end
    }
}
