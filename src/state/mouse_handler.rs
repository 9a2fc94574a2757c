//! Mouse event handler.
//!
//! Pure functions that transform TreeState in response to pointer events.

use crate::state::{Interaction, TreeState};
use crate::view_state::{RenderCollaborator, Virtualizer};
use tracing::{debug, trace};

/// Handle a click on the item `id`.
///
/// The click moves roving focus to the item, toggles its selection per the
/// selection policy and, unless disabled in [`TreeOptions`](super::TreeOptions),
/// toggles its expansion.
///
/// # Returns
/// * `false` if the item is not in the tree or not visible (stale event)
/// * `false` if a pointer interaction is already being processed
pub fn handle_click<T>(state: &mut TreeState<T>, id: &str) -> bool {
    if !state.is_visible(id) {
        debug!(id, "click on unknown or hidden item ignored");
        return false;
    }
    if !state.begin_interaction(Interaction::Pointer) {
        trace!(id, "pointer interaction in flight, ignoring");
        return false;
    }

    state.rove_focus_to(id);
    state.toggle_selection(id);
    if state.options().click_toggles_expansion {
        state.toggle_expansion(id);
    }

    state.end_interaction(Interaction::Pointer);
    true
}

/// Handle a click on viewport row `row` of the tree area.
///
/// Rows past the end of the content are ignored.
pub fn handle_row_click<T>(state: &mut TreeState<T>, virtualizer: &mut Virtualizer, row: usize) -> bool {
    let Some(position) = virtualizer.index_at_row(row) else {
        return false;
    };
    let Some(id) = state
        .visible_item(position)
        .map(|item| item.identifier().clone())
    else {
        return false;
    };

    if !handle_click(state, id.as_str()) {
        return false;
    }

    // Expansion may have changed what lies below the clicked row.
    let range = virtualizer.visible_range(state.visible_len());
    state.visibility_changed(range);
    virtualizer.focus_element(position);
    true
}

/// Scroll the viewport by `delta` rows (mouse wheel) and report the new range.
pub fn handle_wheel<T>(state: &mut TreeState<T>, virtualizer: &mut Virtualizer, delta: isize) {
    virtualizer.set_total(state.visible_len());
    virtualizer.scroll_by(delta);
    let range = virtualizer.visible_range(state.visible_len());
    state.visibility_changed(range);
}

#[cfg(test)]
#[path = "mouse_handler_tests.rs"]
mod tests;
