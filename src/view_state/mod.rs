//! View-state layer between the tree engine and the terminal.
//!
//! Holds the rendering-collaborator contract the engine talks to, the
//! fixed-row virtualizer that implements it, and the accessibility attributes
//! derived from item state.

pub mod aria;
pub mod virtualizer;
pub mod visible_range;

pub use aria::{TreeAria, TreeItemAria};
pub use virtualizer::Virtualizer;
pub use visible_range::VisibleRange;

/// Where a scrolled-to item should land in the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollAlignment {
    /// Item becomes the first on-screen row.
    Start,
    /// Item is centered.
    Center,
    /// Item becomes the last on-screen row.
    End,
    /// Scroll the minimum distance to bring the item on screen.
    #[default]
    Nearest,
}

/// The rendering layer the tree engine depends on.
///
/// Indices are positions in the engine's visible content.
pub trait RenderCollaborator {
    /// The currently on-screen slice for a visible sequence of `total` items.
    fn visible_range(&mut self, total: usize) -> VisibleRange;

    /// Scroll so the item at `index` is on screen.
    fn scroll_to_index(&mut self, index: usize, alignment: ScrollAlignment);

    /// Give input focus to the element rendering `index`.
    ///
    /// Returns `false` when no element is mounted for that index.
    fn focus_element(&mut self, index: usize) -> bool;
}
