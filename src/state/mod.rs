//! Tree state engine (pure).
//!
//! All state transitions are plain method calls testable without a terminal.

pub mod focus;
pub mod key_handler;
pub mod mouse_handler;
pub mod selection;
pub mod tree_state;
pub mod visibility;

// Re-export for convenience
pub use focus::{FocusRequest, Interaction, InteractionGuard};
pub use key_handler::handle_key_action;
pub use mouse_handler::{handle_click, handle_row_click, handle_wheel};
pub use selection::{InvalidSelectionMode, ItemSelectionEvent, SelectionListener, SelectionMode};
pub use tree_state::{TreeOptions, TreeState};
pub use visibility::{find_visible_items, FoundVisibleItems};
