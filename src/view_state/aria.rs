//! Accessibility attributes derived from tree and item state.
//!
//! These mirror the WAI-ARIA tree pattern: the container is a `tree`, each row
//! a `treeitem`. Hosts that render to a DOM apply [`TreeItemAria::attributes`]
//! verbatim; the terminal view reads them back as a spoken-style description.

use crate::model::TreeItem;
use crate::state::SelectionMode;

/// Attributes of the tree container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeAria {
    pub multiselectable: bool,
}

impl TreeAria {
    pub const ROLE: &'static str = "tree";

    pub fn new(mode: SelectionMode) -> Self {
        Self {
            multiselectable: mode == SelectionMode::Multi,
        }
    }

    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("role", Self::ROLE.to_string()),
            ("aria-multiselectable", self.multiselectable.to_string()),
        ]
    }
}

/// Attributes of one rendered item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItemAria {
    pub id: String,
    pub tabindex: i8,
    /// Present only for items with children.
    pub expanded: Option<bool>,
    pub selected: bool,
    pub level: usize,
    pub posinset: usize,
    pub setsize: usize,
}

impl TreeItemAria {
    pub const ROLE: &'static str = "treeitem";

    pub fn from_item<T>(item: &TreeItem<T>) -> Self {
        Self {
            id: item.identifier().to_string(),
            tabindex: item.tab_index().value(),
            expanded: item.expanded(),
            selected: item.is_selected(),
            level: item.level(),
            posinset: item.inset(),
            setsize: item.size(),
        }
    }

    /// Attribute name/value pairs, omitting `aria-expanded` for leaves.
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = vec![
            ("role", Self::ROLE.to_string()),
            ("id", self.id.clone()),
            ("tabindex", self.tabindex.to_string()),
        ];
        if let Some(expanded) = self.expanded {
            attributes.push(("aria-expanded", expanded.to_string()));
        }
        attributes.extend([
            ("aria-selected", self.selected.to_string()),
            ("aria-level", self.level.to_string()),
            ("aria-posinset", self.posinset.to_string()),
            ("aria-setsize", self.setsize.to_string()),
        ]);
        attributes
    }

    /// Short description in the order a screen reader announces it.
    pub fn describe(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        match self.expanded {
            Some(true) => parts.push("expanded".to_string()),
            Some(false) => parts.push("collapsed".to_string()),
            None => {}
        }
        if self.selected {
            parts.push("selected".to_string());
        }
        parts.push(format!("level {}", self.level));
        parts.push(format!("{} of {}", self.posinset, self.setsize));
        parts.join(", ")
    }
}
