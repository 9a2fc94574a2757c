//! Tests for the tree state engine.

use super::*;
use crate::flatten::{flatten_with, FlattenOptions};
use crate::model::SourceNode;
use crate::view_state::Virtualizer;
use std::cell::RefCell;
use std::rc::Rc;

/// a [a1, a2 [a2x], a3], b, c [c1]
fn sample_nodes() -> Vec<SourceNode> {
    vec![
        SourceNode::named("A").with_id("a").with_children(vec![
            SourceNode::named("A1").with_id("a1"),
            SourceNode::named("A2")
                .with_id("a2")
                .with_children(vec![SourceNode::named("A2X").with_id("a2x")]),
            SourceNode::named("A3").with_id("a3"),
        ]),
        SourceNode::named("B").with_id("b"),
        SourceNode::named("C")
            .with_id("c")
            .with_children(vec![SourceNode::named("C1").with_id("c1")]),
    ]
}

fn state_with(flatten_options: FlattenOptions, options: TreeOptions) -> TreeState<crate::model::NodeData> {
    TreeState::with_content(flatten_with(&sample_nodes(), &flatten_options), options)
}

fn expanded_state() -> TreeState<crate::model::NodeData> {
    state_with(FlattenOptions::default(), TreeOptions::default())
}

fn ids<'a, T: 'a>(items: impl IntoIterator<Item = &'a TreeItem<T>>) -> Vec<String> {
    items
        .into_iter()
        .map(|item| item.identifier().to_string())
        .collect()
}

fn current_id<T>(state: &TreeState<T>) -> Option<String> {
    state
        .current_focusable_item()
        .map(|item| item.identifier().to_string())
}

fn focusable_count<T>(state: &TreeState<T>) -> usize {
    state
        .content()
        .iter()
        .filter(|item| item.is_focusable())
        .count()
}

/// Report the virtualizer's on-screen slice to the engine.
fn sync<T>(state: &mut TreeState<T>, virtualizer: &mut Virtualizer) {
    let range = virtualizer.visible_range(state.visible_len());
    state.visibility_changed(range);
}

fn record_events(
    state: &mut TreeState<crate::model::NodeData>,
) -> Rc<RefCell<Vec<Vec<String>>>> {
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    state.subscribe(move |event| {
        sink.borrow_mut().push(
            event
                .identifiers()
                .into_iter()
                .map(ToString::to_string)
                .collect(),
        );
    });
    events
}

mod content {
    use super::*;

    #[test]
    fn empty_state_has_no_views() {
        let state: TreeState<()> = TreeState::default();
        assert!(state.is_empty());
        assert_eq!(state.visible_len(), 0);
        assert!(state.current_focusable_item().is_none());
        assert!(state.rendered_items().is_empty());
        assert!(state.selected_items().is_empty());
    }

    #[test]
    fn new_content_gives_first_item_roving_focus() {
        let state = expanded_state();
        assert_eq!(current_id(&state).as_deref(), Some("a"));
        assert_eq!(focusable_count(&state), 1);
    }

    #[test]
    fn set_content_replaces_rather_than_appends() {
        let mut state = expanded_state();
        state.set_content(flatten_with(
            &[SourceNode::named("Only").with_id("only")],
            &FlattenOptions::default(),
        ));
        assert_eq!(state.len(), 1);
        assert!(state.item("a").is_none());
        assert_eq!(current_id(&state).as_deref(), Some("only"));
    }

    #[test]
    fn set_content_drops_pending_focus() {
        let mut state = expanded_state();
        state.focus_next(Interaction::Keyboard);
        assert!(state.pending_focus().is_some());
        state.set_content(flatten_with(&sample_nodes(), &FlattenOptions::default()));
        assert!(state.pending_focus().is_none());
    }

    #[test]
    fn set_content_releases_interaction_of_dropped_request() {
        let mut state = expanded_state();
        assert!(state.begin_interaction(Interaction::Keyboard));
        state.focus_next(Interaction::Keyboard);

        state.set_content(flatten_with(
            &[SourceNode::named("Only").with_id("only")],
            &FlattenOptions::default(),
        ));

        assert!(state.guard().is_idle());
        assert_eq!(current_id(&state).as_deref(), Some("only"));
        assert_eq!(focusable_count(&state), 1);
    }

    #[test]
    fn lookups_by_identifier() {
        let state = expanded_state();
        assert_eq!(state.index_of("a2x"), Some(ItemIndex::new(3)));
        assert_eq!(
            state.parent_of("a2x").map(|item| item.identifier().as_str()),
            Some("a2")
        );
        assert!(state.parent_of("a").is_none());
        assert!(state.item("missing").is_none());
        assert!(!state.is_visible("missing"));
    }
}

mod visibility {
    use super::*;

    #[test]
    fn all_items_visible_when_expanded() {
        let state = expanded_state();
        assert_eq!(state.visible_len(), 8);
    }

    #[test]
    fn collapsing_hides_descendants() {
        let mut state = expanded_state();
        assert!(state.collapse("a"));
        assert_eq!(ids(state.visible_content()), vec!["a", "b", "c", "c1"]);
        assert!(!state.is_visible("a2x"));
        assert!(state.is_visible("c1"));
    }

    #[test]
    fn nested_collapse_survives_parent_expand() {
        let mut state = expanded_state();
        state.collapse("a2");
        state.collapse("a");
        state.expand("a");
        assert_eq!(
            ids(state.visible_content()),
            vec!["a", "a1", "a2", "a3", "b", "c", "c1"]
        );
    }

    #[test]
    fn expansion_ops_on_leaf_are_noops() {
        let mut state = expanded_state();
        assert!(state.toggle_expansion("b"));
        assert_eq!(state.item("b").and_then(TreeItem::expanded), None);
        assert_eq!(state.visible_len(), 8);
    }

    #[test]
    fn unknown_identifier_is_ignored() {
        let mut state = expanded_state();
        assert!(!state.collapse("missing"));
        assert!(!state.select("missing"));
        assert!(!state.rove_focus_to("missing"));
        assert_eq!(state.visible_len(), 8);
    }

    #[test]
    fn rendered_window_follows_reported_range() {
        let mut state = expanded_state();
        state.visibility_changed(VisibleRange::new(2, 4));
        assert_eq!(ids(state.rendered_items()), vec!["a2", "a2x", "a3"]);
        assert_eq!(state.rendered_bounds(), 2..5);
    }

    #[test]
    fn rendered_window_is_clamped_to_visible_content() {
        let mut state = expanded_state();
        state.visibility_changed(VisibleRange::new(6, 20));
        state.collapse("c");
        assert_eq!(ids(state.rendered_items()), vec!["c"]);
    }

    #[test]
    fn expand_level_expands_only_that_level() {
        let mut state = state_with(FlattenOptions::collapsed(), TreeOptions::default());
        assert_eq!(state.expand_level(1), 2);
        assert_eq!(state.item("a").and_then(TreeItem::expanded), Some(true));
        assert_eq!(state.item("c").and_then(TreeItem::expanded), Some(true));
        assert_eq!(state.item("a2").and_then(TreeItem::expanded), Some(false));
        assert_eq!(state.expand_level(1), 0);
    }
}

mod roving_focus {
    use super::*;

    #[test]
    fn rove_moves_the_single_focusable_item() {
        let mut state = expanded_state();
        assert!(state.rove_focus_to("a3"));
        assert_eq!(current_id(&state).as_deref(), Some("a3"));
        assert_eq!(focusable_count(&state), 1);
    }

    #[test]
    fn cannot_rove_to_hidden_item() {
        let mut state = expanded_state();
        state.collapse("a2");
        assert!(!state.rove_focus_to("a2x"));
        assert_eq!(current_id(&state).as_deref(), Some("a"));
    }

    #[test]
    fn hiding_the_focused_item_reassigns_focus() {
        let mut state = expanded_state();
        state.rove_focus_to("a2x");
        state.collapse("a2");
        // The hidden item does not keep a second tab stop.
        assert_eq!(focusable_count(&state), 1);
        assert_eq!(current_id(&state).as_deref(), Some("a"));
    }

    #[test]
    fn scrolled_window_without_focus_takes_first_rendered_item() {
        let mut state = expanded_state();
        state.visibility_changed(VisibleRange::new(5, 7));
        assert_eq!(current_id(&state).as_deref(), Some("b"));
        assert_eq!(focusable_count(&state), 1);
    }

    #[test]
    fn window_containing_focus_keeps_it() {
        let mut state = expanded_state();
        state.rove_focus_to("a2");
        state.visibility_changed(VisibleRange::new(1, 4));
        assert_eq!(current_id(&state).as_deref(), Some("a2"));
    }

    #[test]
    fn fallback_waits_for_interaction_to_finish() {
        let mut state = expanded_state();
        assert!(state.begin_interaction(Interaction::Keyboard));
        state.visibility_changed(VisibleRange::new(5, 7));
        assert_eq!(current_id(&state).as_deref(), Some("a"));

        state.end_interaction(Interaction::Keyboard);
        state.visibility_changed(VisibleRange::new(5, 7));
        assert_eq!(current_id(&state).as_deref(), Some("b"));
    }

    #[test]
    fn navigation_targets() {
        let mut state = expanded_state();
        assert!(state.previous_item().is_none());
        assert_eq!(
            state.next_item().map(|item| item.identifier().as_str()),
            Some("a1")
        );
        assert_eq!(
            state.first_child().map(|item| item.identifier().as_str()),
            Some("a1")
        );

        state.rove_focus_to("c1");
        assert!(state.next_item().is_none());
        assert!(state.first_child().is_none());
        assert_eq!(
            state.previous_item().map(|item| item.identifier().as_str()),
            Some("c")
        );
    }

    #[test]
    fn navigation_skips_hidden_items() {
        let mut state = expanded_state();
        state.collapse("a");
        state.focus_next(Interaction::Keyboard);
        assert_eq!(current_id(&state).as_deref(), Some("b"));
    }
}

mod focus_requests {
    use super::*;

    #[test]
    fn focus_next_queues_request_without_scroll_when_on_screen() {
        let mut state = expanded_state();
        let mut virtualizer = Virtualizer::new(10);
        sync(&mut state, &mut virtualizer);

        assert!(state.focus_next(Interaction::Keyboard));
        assert_eq!(
            state.pending_focus(),
            Some(&FocusRequest {
                identifier: ItemId::new("a1"),
                scroll: None,
                origin: Interaction::Keyboard,
            })
        );
    }

    #[test]
    fn boundaries_are_noops() {
        let mut state = expanded_state();
        assert!(!state.focus_previous(Interaction::Keyboard));
        state.rove_focus_to("c1");
        assert!(!state.focus_next(Interaction::Keyboard));
        assert!(state.pending_focus().is_none());
    }

    #[test]
    fn settle_applies_input_focus_and_releases_guard() {
        let mut state = expanded_state();
        let mut virtualizer = Virtualizer::new(10);
        sync(&mut state, &mut virtualizer);

        state.begin_interaction(Interaction::Keyboard);
        state.focus_next(Interaction::Keyboard);
        assert!(state.settle(&mut virtualizer));

        assert_eq!(virtualizer.focused(), Some(1));
        assert!(state.guard().is_idle());
        assert!(state.pending_focus().is_none());
    }

    #[test]
    fn settle_without_request_does_nothing() {
        let mut state = expanded_state();
        let mut virtualizer = Virtualizer::new(10);
        assert!(!state.settle(&mut virtualizer));
        assert_eq!(virtualizer.focused(), None);
    }

    #[test]
    fn focus_last_scrolls_target_to_the_bottom() {
        let mut state = expanded_state();
        let mut virtualizer = Virtualizer::new(3);
        sync(&mut state, &mut virtualizer);

        state.begin_interaction(Interaction::Keyboard);
        assert!(state.focus_last(Interaction::Keyboard));
        assert_eq!(
            state.pending_focus().and_then(|request| request.scroll),
            Some(ScrollAlignment::End)
        );
        assert!(state.settle(&mut virtualizer));

        assert_eq!(virtualizer.offset(), 5);
        assert_eq!(state.visible_range(), VisibleRange::new(5, 7));
        assert_eq!(current_id(&state).as_deref(), Some("c1"));
        assert_eq!(virtualizer.focused(), Some(7));
    }

    #[test]
    fn off_screen_target_scrolls_to_nearest_edge() {
        let mut state = expanded_state();
        let mut virtualizer = Virtualizer::new(3);
        sync(&mut state, &mut virtualizer);
        state.rove_focus_to("a2");

        state.focus_next(Interaction::Keyboard);
        assert_eq!(
            state.pending_focus().and_then(|request| request.scroll),
            Some(ScrollAlignment::Nearest)
        );
        state.settle(&mut virtualizer);
        assert_eq!(virtualizer.offset(), 1);
        assert_eq!(virtualizer.focused(), Some(3));
    }

    #[test]
    fn stale_request_is_dropped() {
        let mut state = expanded_state();
        let mut virtualizer = Virtualizer::new(10);
        sync(&mut state, &mut virtualizer);
        state.rove_focus_to("a2");

        state.begin_interaction(Interaction::Keyboard);
        state.focus_next(Interaction::Keyboard);
        state.collapse("a2");
        assert!(!state.settle(&mut virtualizer));
        assert!(state.guard().is_idle());
        assert_eq!(focusable_count(&state), 1);
    }

    #[test]
    fn focus_first_on_empty_state_is_noop() {
        let mut state: TreeState<()> = TreeState::default();
        assert!(!state.focus_first(Interaction::Keyboard));
        assert!(!state.focus_last(Interaction::Keyboard));
    }
}

mod selection {
    use super::*;

    #[test]
    fn single_mode_replaces_selection_in_one_event() {
        let mut state = expanded_state();
        let events = record_events(&mut state);

        state.select("a1");
        state.select("b");

        assert_eq!(ids(state.selected_items()), vec!["b"]);
        assert_eq!(
            *events.borrow(),
            vec![vec!["a1".to_string()], vec!["b".to_string()]]
        );
    }

    #[test]
    fn multi_mode_accumulates() {
        let mut state = state_with(
            FlattenOptions::default(),
            TreeOptions {
                selection_mode: SelectionMode::Multi,
                ..TreeOptions::default()
            },
        );
        let events = record_events(&mut state);

        state.select("a1");
        state.select("b");

        assert_eq!(ids(state.selected_items()), vec!["a1", "b"]);
        assert_eq!(
            events.borrow().last(),
            Some(&vec!["a1".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn toggle_deselects_a_selected_item() {
        let mut state = expanded_state();
        let events = record_events(&mut state);

        state.toggle_selection("c");
        state.toggle_selection("c");

        assert!(state.selected_items().is_empty());
        assert_eq!(events.borrow().len(), 2);
        assert!(events.borrow()[1].is_empty());
    }

    #[test]
    fn hidden_items_stay_selected() {
        let mut state = expanded_state();
        state.select("a2x");
        state.collapse("a");
        assert_eq!(ids(state.selected_items()), vec!["a2x"]);
    }

    #[test]
    fn switching_to_single_keeps_first_selected() {
        let mut state = state_with(
            FlattenOptions::default(),
            TreeOptions {
                selection_mode: SelectionMode::Multi,
                ..TreeOptions::default()
            },
        );
        state.select("c");
        state.select("a1");
        let events = record_events(&mut state);

        state.set_selection_mode(SelectionMode::Single);

        assert_eq!(ids(state.selected_items()), vec!["a1"]);
        assert_eq!(*events.borrow(), vec![vec!["a1".to_string()]]);
    }

    #[test]
    fn toggle_current_selection_targets_focused_item() {
        let mut state = expanded_state();
        state.rove_focus_to("a3");
        assert!(state.toggle_current_selection());
        assert_eq!(ids(state.selected_items()), vec!["a3"]);
        assert_eq!(current_id(&state).as_deref(), Some("a3"));
    }
}

mod keyboard_semantics {
    use super::*;

    #[test]
    fn expand_or_focus_child_expands_collapsed_item_in_place() {
        let mut state = state_with(FlattenOptions::collapsed(), TreeOptions::default());
        assert!(state.expand_or_focus_child(Interaction::Keyboard));
        assert_eq!(state.item("a").and_then(TreeItem::expanded), Some(true));
        assert_eq!(current_id(&state).as_deref(), Some("a"));
        assert!(state.pending_focus().is_none());
    }

    #[test]
    fn expand_or_focus_child_moves_into_expanded_item() {
        let mut state = expanded_state();
        assert!(state.expand_or_focus_child(Interaction::Keyboard));
        assert_eq!(current_id(&state).as_deref(), Some("a1"));
        assert_eq!(state.item("a").map(TreeItem::tab_index), Some(crate::model::TabIndex::NotFocusable));
    }

    #[test]
    fn expand_or_focus_child_on_leaf_is_noop() {
        let mut state = expanded_state();
        state.rove_focus_to("b");
        assert!(!state.expand_or_focus_child(Interaction::Keyboard));
        assert_eq!(current_id(&state).as_deref(), Some("b"));
    }

    #[test]
    fn collapse_or_focus_parent() {
        let mut state = expanded_state();
        sync(&mut state, &mut Virtualizer::new(10));
        state.rove_focus_to("a2");

        assert!(state.collapse_or_focus_parent(Interaction::Keyboard));
        assert_eq!(state.item("a2").and_then(TreeItem::expanded), Some(false));
        assert_eq!(current_id(&state).as_deref(), Some("a2"));

        assert!(state.collapse_or_focus_parent(Interaction::Keyboard));
        assert_eq!(current_id(&state).as_deref(), Some("a"));
    }

    #[test]
    fn collapse_or_focus_parent_on_root_leaf_is_noop() {
        let mut state = expanded_state();
        state.rove_focus_to("b");
        assert!(!state.collapse_or_focus_parent(Interaction::Keyboard));
    }

    #[test]
    fn expand_current_level_uses_focused_level() {
        let mut state = state_with(FlattenOptions::collapsed(), TreeOptions::default());
        state.expand("a");
        state.rove_focus_to("a1");
        assert_eq!(state.expand_current_level(), 1);
        assert_eq!(state.item("a2").and_then(TreeItem::expanded), Some(true));
        assert_eq!(state.item("c").and_then(TreeItem::expanded), Some(false));
    }
}
