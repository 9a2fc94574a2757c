//! Per-node tree item state.
//!
//! A `TreeItem` carries immutable hierarchy metadata (level, position among
//! siblings, parent link, identifier) and three pieces of mutable state:
//! expansion, selection and roving tab index.

use super::identifiers::{ItemId, ItemIndex};
use thiserror::Error;
use tracing::error;

/// Roving tab index of a tree item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TabIndex {
    /// Reachable with Tab (`tabindex="0"`). At most one item per tree.
    Focusable,
    /// Reachable only through arrow-key navigation (`tabindex="-1"`).
    #[default]
    NotFocusable,
}

impl TabIndex {
    /// Attribute value as rendered on the element.
    pub fn value(self) -> i8 {
        match self {
            TabIndex::Focusable => 0,
            TabIndex::NotFocusable => -1,
        }
    }
}

/// Hierarchy metadata supplied when constructing an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeItemMetadata {
    /// Depth, 1 for root items.
    pub level: usize,
    /// Number of siblings including the item itself.
    pub size: usize,
    /// 1-based position among siblings.
    pub inset: usize,
    pub has_children: bool,
    /// Initial expansion. `None` keeps the default (expanded).
    pub expanded: Option<bool>,
}

impl TreeItemMetadata {
    /// Structural problems with this metadata and identifier.
    pub fn diagnostics(&self, identifier: &ItemId) -> Vec<ItemDiagnostic> {
        let mut found = Vec::new();

        if !identifier.is_valid() {
            found.push(ItemDiagnostic::InvalidIdentifier(identifier.clone()));
        }
        if self.level < 1 {
            found.push(ItemDiagnostic::LevelOutOfRange(self.level));
        }
        if self.size < 1 {
            found.push(ItemDiagnostic::SizeOutOfRange(self.size));
        }
        if self.inset > self.size {
            found.push(ItemDiagnostic::InsetExceedsSize {
                inset: self.inset,
                size: self.size,
            });
        }
        if self.inset < 1 {
            found.push(ItemDiagnostic::InsetOutOfRange(self.inset));
        }

        found
    }
}

/// Non-fatal construction problems. The item is still built and usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemDiagnostic {
    #[error("identifier {0:?} is not a valid element id (expected ^[A-Za-z][A-Za-z0-9_-]*$)")]
    InvalidIdentifier(ItemId),

    #[error("level must be 1 or higher (got {0})")]
    LevelOutOfRange(usize),

    #[error("size must be 1 or higher (got {0})")]
    SizeOutOfRange(usize),

    #[error("inset {inset} must be less than or equal to size {size}")]
    InsetExceedsSize { inset: usize, size: usize },

    #[error("inset must be 1 or higher (got {0})")]
    InsetOutOfRange(usize),

    #[error("identifier {0:?} is already used by an earlier item")]
    DuplicateIdentifier(ItemId),
}

/// One flattened node of the tree.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeItem<T> {
    data: T,
    identifier: ItemId,
    parent: Option<ItemIndex>,
    level: usize,
    size: usize,
    inset: usize,
    has_children: bool,
    expanded: bool,
    selected: bool,
    tab_index: TabIndex,
}

impl<T> TreeItem<T> {
    /// Build an item. A missing identifier is generated.
    ///
    /// Invalid metadata is logged, never rejected.
    pub fn new(
        data: T,
        metadata: TreeItemMetadata,
        parent: Option<ItemIndex>,
        identifier: Option<ItemId>,
    ) -> Self {
        let identifier = identifier.unwrap_or_else(ItemId::generate);

        for diagnostic in metadata.diagnostics(&identifier) {
            error!(identifier = %identifier, "{diagnostic}");
        }

        Self {
            data,
            identifier,
            parent,
            level: metadata.level,
            size: metadata.size,
            inset: metadata.inset,
            has_children: metadata.has_children,
            expanded: metadata.expanded.unwrap_or(true),
            selected: false,
            tab_index: TabIndex::default(),
        }
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn identifier(&self) -> &ItemId {
        &self.identifier
    }

    /// Index of the parent item in the owning sequence; `None` for roots.
    pub fn parent(&self) -> Option<ItemIndex> {
        self.parent
    }

    pub fn level(&self) -> usize {
        self.level
    }

    /// Number of items in the same branch.
    pub fn size(&self) -> usize {
        self.size
    }

    /// 1-based position within the branch.
    pub fn inset(&self) -> usize {
        self.inset
    }

    pub fn has_children(&self) -> bool {
        self.has_children
    }

    /// Expansion state; `None` when there are no children to show.
    pub fn expanded(&self) -> Option<bool> {
        self.has_children.then_some(self.expanded)
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn tab_index(&self) -> TabIndex {
        self.tab_index
    }

    pub fn is_focusable(&self) -> bool {
        self.tab_index == TabIndex::Focusable
    }

    /// Whether every ancestor in `content` is expanded.
    ///
    /// `content` must be the sequence this item's parent link indexes into.
    /// Root items are always visible.
    pub fn is_visible(&self, content: &[TreeItem<T>]) -> bool {
        let mut parent = self.parent;
        // Parent links point strictly backwards; the bound stops a malformed chain.
        let mut remaining = content.len();

        while let Some(index) = parent {
            let Some(ancestor) = content.get(index.get()) else {
                break;
            };
            if ancestor.expanded() == Some(false) {
                return false;
            }
            if remaining == 0 {
                break;
            }
            remaining -= 1;
            parent = ancestor.parent;
        }

        true
    }

    /// Make this item the Tab stop of the tree.
    pub fn enable_focus(&mut self) {
        self.tab_index = TabIndex::Focusable;
    }

    /// Remove this item from the Tab order.
    pub fn disable_focus(&mut self) {
        self.tab_index = TabIndex::NotFocusable;
    }

    /// Show children. No-op for leaves.
    pub fn expand(&mut self) {
        if self.has_children {
            self.expanded = true;
        }
    }

    /// Hide children. No-op for leaves.
    pub fn collapse(&mut self) {
        if self.has_children {
            self.expanded = false;
        }
    }

    pub fn toggle_expansion(&mut self) {
        if self.has_children {
            self.expanded = !self.expanded;
        }
    }

    pub fn select(&mut self) {
        self.selected = true;
    }

    pub fn deselect(&mut self) {
        self.selected = false;
    }

    pub fn toggle_selection(&mut self) {
        self.selected = !self.selected;
    }
}
