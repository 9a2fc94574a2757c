//! Visible-content filtering.

use crate::model::{ItemIndex, TreeItem};

/// Result of filtering content down to visible items.
///
/// Lengths are kept alongside the indices for debug measurements on large
/// trees.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FoundVisibleItems {
    /// Indices of visible items, in content order.
    pub visible: Vec<ItemIndex>,
    /// Length of the content that was filtered.
    pub content_len: usize,
    /// Length of `visible`.
    pub visible_len: usize,
    /// `content_len - visible_len`.
    pub difference: usize,
}

/// Every item whose ancestors are all expanded.
pub fn find_visible_items<T>(content: &[TreeItem<T>]) -> FoundVisibleItems {
    let visible: Vec<ItemIndex> = content
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_visible(content))
        .map(|(index, _)| ItemIndex::new(index))
        .collect();

    let visible_len = visible.len();
    FoundVisibleItems {
        visible,
        content_len: content.len(),
        visible_len,
        difference: content.len() - visible_len,
    }
}
