//! Selection policy and the selection-changed notification.

use crate::model::{ItemId, TreeItem};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How selecting one item affects the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Selecting an item deselects the previously selected one.
    #[default]
    Single,
    /// Items are selected independently.
    Multi,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Single => f.write_str("single"),
            SelectionMode::Multi => f.write_str("multi"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown selection mode {0:?} (expected \"single\" or \"multi\")")]
pub struct InvalidSelectionMode(pub String);

impl FromStr for SelectionMode {
    type Err = InvalidSelectionMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(SelectionMode::Single),
            "multi" | "multiple" => Ok(SelectionMode::Multi),
            _ => Err(InvalidSelectionMode(s.to_string())),
        }
    }
}

/// Fired after every selection change, carrying the full current selection.
#[derive(Debug)]
pub struct ItemSelectionEvent<'a, T> {
    pub selected_items: Vec<&'a TreeItem<T>>,
}

impl<T> ItemSelectionEvent<'_, T> {
    pub fn identifiers(&self) -> Vec<&ItemId> {
        self.selected_items
            .iter()
            .map(|item| item.identifier())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.selected_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected_items.is_empty()
    }
}

/// Callback subscribed to selection changes.
pub type SelectionListener<T> = Box<dyn FnMut(&ItemSelectionEvent<'_, T>)>;
