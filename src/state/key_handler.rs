//! Keyboard action handler.
//!
//! Maps one [`KeyAction`] to one engine operation under the keyboard
//! re-entrancy guard. Focus moves leave the guard held until
//! [`TreeState::settle`] applies input focus after the next render.

use crate::model::KeyAction;
use crate::state::{Interaction, TreeState};
use tracing::{debug, trace};

/// Apply a keyboard action to the tree.
///
/// Returns `true` if the action changed tree state. A keypress that arrives
/// while a previous keyboard interaction is still in flight is ignored.
/// [`KeyAction::Quit`] is not a tree action and always returns `false`.
pub fn handle_key_action<T>(state: &mut TreeState<T>, action: KeyAction) -> bool {
    if action == KeyAction::Quit {
        return false;
    }
    if !state.begin_interaction(Interaction::Keyboard) {
        trace!(%action, "keyboard interaction in flight, ignoring");
        return false;
    }

    let origin = Interaction::Keyboard;
    let changed = match action {
        KeyAction::FocusNext => state.focus_next(origin),
        KeyAction::FocusPrevious => state.focus_previous(origin),
        KeyAction::ExpandOrFocusChild => state.expand_or_focus_child(origin),
        KeyAction::CollapseOrFocusParent => state.collapse_or_focus_parent(origin),
        KeyAction::FocusFirst => state.focus_first(origin),
        KeyAction::FocusLast => state.focus_last(origin),
        KeyAction::ToggleSelection => state.toggle_current_selection(),
        KeyAction::ExpandSiblings => state.expand_current_level() > 0,
        KeyAction::Quit => false,
    };

    // A queued focus move keeps the guard until settle.
    if state.pending_focus().is_none() {
        state.end_interaction(origin);
    }
    debug!(%action, changed, "key action handled");
    changed
}

#[cfg(test)]
#[path = "key_handler_tests.rs"]
mod tests;
