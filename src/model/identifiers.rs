//! Core identifier newtypes.
//!
//! `ItemId` is the stable, DOM-id-shaped name of a tree item. `ItemIndex` is its
//! position in the owning flattened sequence and doubles as the parent link.

use regex::Regex;
use std::borrow::Borrow;
use std::fmt;
use std::sync::LazyLock;
use uuid::Uuid;

static ITEM_ID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap_or_else(|e| unreachable!("static pattern: {e}"))
});

/// Identifier of a tree item, unique within one flatten result.
///
/// Construction never fails: an identifier that is not a valid element id is
/// still usable, it is only reported as a diagnostic when the item is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap a caller-supplied identifier.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Generate a fresh `item-<uuid>` identifier.
    pub fn generate() -> Self {
        Self(format!("item-{}", Uuid::new_v4()))
    }

    /// Whether this identifier is usable as an element id token.
    pub fn is_valid(&self) -> bool {
        ITEM_ID_PATTERN.is_match(&self.0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ItemId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ItemId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl PartialEq<str> for ItemId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ItemId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Position of an item in the full flattened sequence. 0-indexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ItemIndex(usize);

impl ItemIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ItemIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
