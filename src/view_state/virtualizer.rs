//! Fixed-row-height virtualizer.
//!
//! Every tree item occupies exactly one terminal row, so the on-screen slice is
//! `offset..offset + viewport_height` clamped to the visible content length.

use super::{RenderCollaborator, ScrollAlignment, VisibleRange};
use tracing::trace;

/// Scroll position and input focus for a one-row-per-item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Virtualizer {
    offset: usize,
    viewport_height: usize,
    total: usize,
    focused: Option<usize>,
}

impl Virtualizer {
    pub fn new(viewport_height: usize) -> Self {
        Self {
            viewport_height,
            ..Self::default()
        }
    }

    /// Index of the first on-screen row.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn viewport_height(&self) -> usize {
        self.viewport_height
    }

    /// Visible-content index that currently holds input focus.
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = height;
        self.clamp_offset();
    }

    /// Record the visible content length and keep the offset in bounds.
    pub fn set_total(&mut self, total: usize) {
        self.total = total;
        if self.focused.is_some_and(|index| index >= total) {
            self.focused = None;
        }
        self.clamp_offset();
    }

    /// Scroll by `delta` rows; negative scrolls up.
    pub fn scroll_by(&mut self, delta: isize) {
        self.offset = self.offset.saturating_add_signed(delta);
        self.clamp_offset();
    }

    /// Visible-content index rendered at viewport row `row`.
    pub fn index_at_row(&self, row: usize) -> Option<usize> {
        if row >= self.viewport_height {
            return None;
        }
        let index = self.offset + row;
        (index < self.total).then_some(index)
    }

    /// Viewport row of visible-content index `index`, if on screen.
    pub fn row_of_index(&self, index: usize) -> Option<usize> {
        let row = index.checked_sub(self.offset)?;
        (row < self.viewport_height && index < self.total).then_some(row)
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport_height)
    }

    fn clamp_offset(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

impl RenderCollaborator for Virtualizer {
    fn visible_range(&mut self, total: usize) -> VisibleRange {
        self.set_total(total);
        if total == 0 || self.viewport_height == 0 {
            return VisibleRange::default();
        }
        let last = (self.offset + self.viewport_height).min(total) - 1;
        VisibleRange::new(self.offset, last)
    }

    fn scroll_to_index(&mut self, index: usize, alignment: ScrollAlignment) {
        let height = self.viewport_height.max(1);
        let index = index.min(self.total.saturating_sub(1));

        self.offset = match alignment {
            ScrollAlignment::Start => index,
            ScrollAlignment::Center => index.saturating_sub(height / 2),
            ScrollAlignment::End => (index + 1).saturating_sub(height),
            ScrollAlignment::Nearest => {
                if index < self.offset {
                    index
                } else if index >= self.offset + height {
                    index + 1 - height
                } else {
                    self.offset
                }
            }
        };
        self.clamp_offset();
        trace!(index, ?alignment, offset = self.offset, "scrolled to index");
    }

    fn focus_element(&mut self, index: usize) -> bool {
        if self.row_of_index(index).is_none() {
            return false;
        }
        self.focused = Some(index);
        true
    }
}
