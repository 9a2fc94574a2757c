//! Visibility, focus and selection engine.
//!
//! `TreeState` owns the flattened item sequence and derives every view the
//! tree needs from it: visible content, the on-screen rendered window, the
//! current roving-focus item, navigation targets and the selection. Derived
//! views are computed on first read and cached until a mutation that feeds them
//! invalidates the cache.
//!
//! All mutation goes through `TreeState` so that the caches, the single
//! roving-focus invariant and the selection policy cannot be bypassed. Items
//! are only ever handed out by shared reference.

use super::focus::{FocusRequest, Interaction, InteractionGuard};
use super::selection::{ItemSelectionEvent, SelectionListener, SelectionMode};
use super::visibility::find_visible_items;
use crate::model::{ItemId, ItemIndex, TreeItem};
use crate::view_state::{RenderCollaborator, ScrollAlignment, VisibleRange};
use std::cell::OnceCell;
use std::collections::HashMap;
use std::fmt;
use std::ops::Range;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Engine behavior switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeOptions {
    pub selection_mode: SelectionMode,
    /// A click toggles expansion in addition to selection.
    pub click_toggles_expansion: bool,
    /// Emit timing and size measurements for derived-view recomputation.
    pub debug_mode: bool,
}

impl Default for TreeOptions {
    fn default() -> Self {
        Self {
            selection_mode: SelectionMode::Single,
            click_toggles_expansion: true,
            debug_mode: false,
        }
    }
}

/// Which input of the derived views a mutation touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StateChange {
    Content,
    Expansion,
    Selection,
    Focus,
}

/// Memoized derived views.
#[derive(Debug, Default)]
struct DerivedViews {
    ids: OnceCell<HashMap<ItemId, ItemIndex>>,
    visible: OnceCell<Vec<ItemIndex>>,
    /// Position of the focusable item within `visible`.
    current: OnceCell<Option<usize>>,
    selected: OnceCell<Vec<ItemIndex>>,
}

impl DerivedViews {
    fn invalidate(&mut self, change: StateChange) {
        match change {
            StateChange::Content => *self = Self::default(),
            StateChange::Expansion => {
                self.visible.take();
                self.current.take();
            }
            StateChange::Selection => {
                self.selected.take();
            }
            StateChange::Focus => {
                self.current.take();
            }
        }
    }
}

/// State engine of one tree view.
pub struct TreeState<T> {
    content: Vec<TreeItem<T>>,
    visible_range: VisibleRange,
    options: TreeOptions,
    guard: InteractionGuard,
    pending_focus: Option<FocusRequest>,
    views: DerivedViews,
    listeners: Vec<SelectionListener<T>>,
}

impl<T> Default for TreeState<T> {
    fn default() -> Self {
        Self::new(TreeOptions::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for TreeState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeState")
            .field("content", &self.content)
            .field("visible_range", &self.visible_range)
            .field("options", &self.options)
            .field("guard", &self.guard)
            .field("pending_focus", &self.pending_focus)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl<T> TreeState<T> {
    pub fn new(options: TreeOptions) -> Self {
        Self {
            content: Vec::new(),
            visible_range: VisibleRange::default(),
            options,
            guard: InteractionGuard::default(),
            pending_focus: None,
            views: DerivedViews::default(),
            listeners: Vec::new(),
        }
    }

    pub fn with_content(content: Vec<TreeItem<T>>, options: TreeOptions) -> Self {
        let mut state = Self::new(options);
        state.set_content(content);
        state
    }

    // ===== Configuration =====

    pub fn options(&self) -> &TreeOptions {
        &self.options
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.options.selection_mode
    }

    /// Switch selection policy.
    ///
    /// Entering single mode with several items selected keeps only the first
    /// selected item in content order.
    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.options.selection_mode = mode;
        if mode != SelectionMode::Single || self.selected_indices().len() <= 1 {
            return;
        }

        let extra: Vec<ItemIndex> = self.selected_indices()[1..].to_vec();
        self.batch(&[StateChange::Selection], |content| {
            for index in extra {
                content[index.get()].deselect();
            }
        });
        self.emit_selection_changed();
    }

    pub fn set_click_toggles_expansion(&mut self, enabled: bool) {
        self.options.click_toggles_expansion = enabled;
    }

    /// Register a selection-changed listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&ItemSelectionEvent<'_, T>) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ===== Content =====

    /// Replace the whole item sequence.
    ///
    /// This is a replace, not an append: all previous items, focus and
    /// pending focus requests are dropped.
    pub fn set_content(&mut self, content: Vec<TreeItem<T>>) {
        info!(items = content.len(), "tree content replaced");
        self.content = content;
        self.drop_pending_focus();
        self.views.invalidate(StateChange::Content);
        self.ensure_focusable();
    }

    pub fn content(&self) -> &[TreeItem<T>] {
        &self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn get(&self, index: ItemIndex) -> Option<&TreeItem<T>> {
        self.content.get(index.get())
    }

    pub fn index_of(&self, id: &str) -> Option<ItemIndex> {
        self.views
            .ids
            .get_or_init(|| {
                self.content
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (item.identifier().clone(), ItemIndex::new(index)))
                    .collect()
            })
            .get(id)
            .copied()
    }

    pub fn item(&self, id: &str) -> Option<&TreeItem<T>> {
        self.index_of(id).and_then(|index| self.get(index))
    }

    pub fn parent_of(&self, id: &str) -> Option<&TreeItem<T>> {
        self.item(id)?.parent().and_then(|index| self.get(index))
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.item(id)
            .is_some_and(|item| item.is_visible(&self.content))
    }

    // ===== Derived views =====

    fn visible_indices(&self) -> &[ItemIndex] {
        self.views.visible.get_or_init(|| {
            let started = Instant::now();
            let found = find_visible_items(&self.content);
            if self.options.debug_mode {
                debug!(
                    content_len = found.content_len,
                    visible_len = found.visible_len,
                    difference = found.difference,
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "visible content calculation"
                );
            }
            found.visible
        })
    }

    fn selected_indices(&self) -> &[ItemIndex] {
        self.views
            .selected
            .get_or_init(|| selected_in(&self.content))
    }

    /// Items whose ancestors are all expanded, in content order.
    pub fn visible_content(&self) -> impl Iterator<Item = &TreeItem<T>> + '_ {
        self.visible_indices()
            .iter()
            .map(|index| &self.content[index.get()])
    }

    pub fn visible_len(&self) -> usize {
        self.visible_indices().len()
    }

    /// Item at `position` within visible content.
    pub fn visible_item(&self, position: usize) -> Option<&TreeItem<T>> {
        let index = self.visible_indices().get(position)?;
        self.content.get(index.get())
    }

    /// Position of `id` within visible content.
    pub fn visible_position(&self, id: &str) -> Option<usize> {
        let index = self.index_of(id)?;
        self.visible_indices().binary_search(&index).ok()
    }

    /// Range last reported by the rendering collaborator.
    pub fn visible_range(&self) -> VisibleRange {
        self.visible_range
    }

    /// Bounds of the rendered window within visible content.
    pub fn rendered_bounds(&self) -> Range<usize> {
        self.visible_range.clamp_to(self.visible_len())
    }

    /// The slice of visible content that is on screen.
    pub fn rendered_items(&self) -> Vec<&TreeItem<T>> {
        let started = Instant::now();
        let bounds = self.rendered_bounds();
        let rendered: Vec<&TreeItem<T>> = self.visible_indices()[bounds]
            .iter()
            .map(|index| &self.content[index.get()])
            .collect();

        if self.options.debug_mode {
            debug!(
                visible_len = self.visible_len(),
                rendered_len = rendered.len(),
                difference = self.visible_len() - rendered.len(),
                elapsed_us = started.elapsed().as_micros() as u64,
                "rendered items calculation"
            );
        }
        rendered
    }

    /// Position within visible content of the item holding tab index 0.
    pub fn current_position(&self) -> Option<usize> {
        *self.views.current.get_or_init(|| {
            let started = Instant::now();
            let position = self
                .visible_indices()
                .iter()
                .position(|index| self.content[index.get()].is_focusable());
            if self.options.debug_mode {
                debug!(
                    visible_len = self.visible_len(),
                    ?position,
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "current focusable item calculation"
                );
            }
            position
        })
    }

    /// The visible item holding tab index 0.
    pub fn current_focusable_item(&self) -> Option<&TreeItem<T>> {
        self.visible_item(self.current_position()?)
    }

    /// Visible item before the current one.
    pub fn previous_item(&self) -> Option<&TreeItem<T>> {
        let position = self.current_position()?.checked_sub(1)?;
        self.visible_item(position)
    }

    /// Visible item after the current one.
    pub fn next_item(&self) -> Option<&TreeItem<T>> {
        self.visible_item(self.current_position()? + 1)
    }

    /// First item in content order whose parent is the current item.
    pub fn first_child(&self) -> Option<&TreeItem<T>> {
        let current = self.index_of(self.current_focusable_item()?.identifier().as_str())?;
        self.content[current.get() + 1..]
            .iter()
            .find(|item| item.parent() == Some(current))
    }

    /// Selected items in content order.
    pub fn selected_items(&self) -> Vec<&TreeItem<T>> {
        self.selected_indices()
            .iter()
            .map(|index| &self.content[index.get()])
            .collect()
    }

    // ===== Interaction bookkeeping =====

    pub fn guard(&self) -> InteractionGuard {
        self.guard
    }

    /// Mark an interaction as in flight. `false` if one of that kind already is.
    pub fn begin_interaction(&mut self, kind: Interaction) -> bool {
        self.guard.try_begin(kind)
    }

    pub fn end_interaction(&mut self, kind: Interaction) {
        self.guard.end(kind);
    }

    pub fn pending_focus(&self) -> Option<&FocusRequest> {
        self.pending_focus.as_ref()
    }

    // ===== Visible-range notifications =====

    /// The rendering collaborator reports a new on-screen slice.
    pub fn visibility_changed(&mut self, range: VisibleRange) {
        self.visible_range = range;
        self.ensure_focusable();
    }

    /// Give tab index 0 to the first rendered item if no rendered item has it.
    ///
    /// Skipped while an interaction is in flight so an in-progress focus move
    /// is not overridden.
    fn ensure_focusable(&mut self) {
        if !self.guard.is_idle() {
            return;
        }

        let bounds = self.rendered_bounds();
        let rendered = &self.visible_indices()[bounds];
        if rendered
            .iter()
            .any(|index| self.content[index.get()].is_focusable())
        {
            return;
        }

        if let Some(&first) = rendered.first() {
            debug!(index = %first, "assigning fallback roving focus");
            self.rove_focus_to_index(first);
        }
    }

    /// Apply a pending focus request after the host has rendered.
    ///
    /// Scrolls when requested, re-reads the on-screen range, then gives input
    /// focus to the target element and releases the interaction that produced
    /// the request. Returns whether input focus was applied.
    pub fn settle<C: RenderCollaborator + ?Sized>(&mut self, collaborator: &mut C) -> bool {
        let Some(request) = self.pending_focus.take() else {
            return false;
        };

        let Some(position) = self.visible_position(request.identifier.as_str()) else {
            warn!(identifier = %request.identifier, "dropping focus request for item that is no longer visible");
            self.guard.end(request.origin);
            self.ensure_focusable();
            return false;
        };

        if let Some(alignment) = request.scroll {
            // Bring the collaborator up to date with the committed content first.
            collaborator.visible_range(self.visible_len());
            collaborator.scroll_to_index(position, alignment);
        }
        let range = collaborator.visible_range(self.visible_len());
        self.visibility_changed(range);

        let focused = collaborator.focus_element(position);
        self.guard.end(request.origin);
        self.ensure_focusable();
        focused
    }

    // ===== Focus =====

    /// Move roving focus to the visible item `id`.
    ///
    /// A pending focus request for another item is dropped along with the
    /// interaction holding it. Returns `false` for unknown or hidden items.
    pub fn rove_focus_to(&mut self, id: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if self.visible_indices().binary_search(&index).is_err() {
            return false;
        }
        if self
            .pending_focus
            .as_ref()
            .is_some_and(|request| request.identifier.as_str() != id)
        {
            self.drop_pending_focus();
        }
        self.rove_focus_to_index(index);
        true
    }

    /// Discard the pending focus request and release its interaction.
    fn drop_pending_focus(&mut self) {
        if let Some(request) = self.pending_focus.take() {
            debug!(identifier = %request.identifier, "pending focus request superseded");
            self.guard.end(request.origin);
        }
    }

    fn rove_focus_to_index(&mut self, target: ItemIndex) {
        let started = Instant::now();
        self.batch(&[StateChange::Focus], |content| {
            for item in content.iter_mut().filter(|item| item.is_focusable()) {
                item.disable_focus();
            }
            content[target.get()].enable_focus();
        });
        if self.options.debug_mode {
            debug!(
                target = %target,
                elapsed_us = started.elapsed().as_micros() as u64,
                "focus rove"
            );
        }
    }

    /// Rove focus to `target` and queue the matching input-focus request.
    fn focus_visible(
        &mut self,
        position: usize,
        origin: Interaction,
        scroll: Option<ScrollAlignment>,
    ) -> bool {
        let Some(&target) = self.visible_indices().get(position) else {
            return false;
        };
        let identifier = self.content[target.get()].identifier().clone();
        let on_screen = self.rendered_bounds().contains(&position);

        self.rove_focus_to_index(target);
        let scroll = scroll.or((!on_screen).then_some(ScrollAlignment::Nearest));
        debug!(identifier = %identifier, position, ?scroll, "focus moved");
        self.pending_focus = Some(FocusRequest {
            identifier,
            scroll,
            origin,
        });
        true
    }

    fn focus_item(&mut self, target: ItemIndex, origin: Interaction) -> bool {
        match self.visible_indices().binary_search(&target) {
            Ok(position) => self.focus_visible(position, origin, None),
            Err(_) => false,
        }
    }

    /// Focus the next visible item. No-op at the end.
    pub fn focus_next(&mut self, origin: Interaction) -> bool {
        match self.current_position() {
            Some(position) => self.focus_visible(position + 1, origin, None),
            None => false,
        }
    }

    /// Focus the previous visible item. No-op at the start.
    pub fn focus_previous(&mut self, origin: Interaction) -> bool {
        match self.current_position().and_then(|p| p.checked_sub(1)) {
            Some(position) => self.focus_visible(position, origin, None),
            None => false,
        }
    }

    /// Focus the first visible item and scroll it to the top.
    pub fn focus_first(&mut self, origin: Interaction) -> bool {
        self.focus_visible(0, origin, Some(ScrollAlignment::Start))
    }

    /// Focus the last visible item and scroll it to the bottom.
    pub fn focus_last(&mut self, origin: Interaction) -> bool {
        let Some(last) = self.visible_len().checked_sub(1) else {
            return false;
        };
        self.focus_visible(last, origin, Some(ScrollAlignment::End))
    }

    /// Collapsed: expand. Expanded: focus the first child. Leaf: nothing.
    pub fn expand_or_focus_child(&mut self, origin: Interaction) -> bool {
        let Some(current) = self.current_focusable_item() else {
            return false;
        };
        match current.expanded() {
            Some(false) => {
                let id = current.identifier().clone();
                self.expand(id.as_str())
            }
            Some(true) => {
                let Some(child) = self.first_child() else {
                    return false;
                };
                let id = child.identifier().clone();
                match self.index_of(id.as_str()) {
                    Some(index) => self.focus_item(index, origin),
                    None => false,
                }
            }
            None => false,
        }
    }

    /// Expanded: collapse. Otherwise focus the parent, if any.
    pub fn collapse_or_focus_parent(&mut self, origin: Interaction) -> bool {
        let Some(current) = self.current_focusable_item() else {
            return false;
        };
        if current.expanded() == Some(true) {
            let id = current.identifier().clone();
            return self.collapse(id.as_str());
        }
        match current.parent() {
            Some(parent) => self.focus_item(parent, origin),
            None => false,
        }
    }

    // ===== Expansion =====

    pub fn expand(&mut self, id: &str) -> bool {
        self.update_expansion(id, TreeItem::expand)
    }

    pub fn collapse(&mut self, id: &str) -> bool {
        self.update_expansion(id, TreeItem::collapse)
    }

    pub fn toggle_expansion(&mut self, id: &str) -> bool {
        self.update_expansion(id, TreeItem::toggle_expansion)
    }

    fn update_expansion(&mut self, id: &str, apply: fn(&mut TreeItem<T>)) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if !self.content[index.get()].has_children() {
            return true;
        }
        self.batch(&[StateChange::Expansion], |content| {
            apply(&mut content[index.get()]);
        });
        self.ensure_focusable();
        true
    }

    /// Expand every visible parent item on `level`. Returns how many were collapsed.
    pub fn expand_level(&mut self, level: usize) -> usize {
        let targets: Vec<ItemIndex> = self
            .visible_indices()
            .iter()
            .copied()
            .filter(|index| {
                let item = &self.content[index.get()];
                item.level() == level && item.expanded() == Some(false)
            })
            .collect();

        if targets.is_empty() {
            return 0;
        }
        self.batch(&[StateChange::Expansion], |content| {
            for index in &targets {
                content[index.get()].expand();
            }
        });
        self.ensure_focusable();
        debug!(level, expanded = targets.len(), "expanded level");
        targets.len()
    }

    /// Expand every visible item on the current item's level.
    pub fn expand_current_level(&mut self) -> usize {
        match self.current_focusable_item() {
            Some(current) => {
                let level = current.level();
                self.expand_level(level)
            }
            None => 0,
        }
    }

    // ===== Selection =====

    /// Select `id`, deselecting any other item in single mode.
    pub fn select(&mut self, id: &str) -> bool {
        let Some(target) = self.index_of(id) else {
            return false;
        };
        let single = self.options.selection_mode == SelectionMode::Single;
        self.batch(&[StateChange::Selection], |content| {
            if single {
                for (index, item) in content.iter_mut().enumerate() {
                    if index != target.get() && item.is_selected() {
                        item.deselect();
                    }
                }
            }
            content[target.get()].select();
        });
        self.emit_selection_changed();
        true
    }

    pub fn deselect(&mut self, id: &str) -> bool {
        let Some(target) = self.index_of(id) else {
            return false;
        };
        self.batch(&[StateChange::Selection], |content| {
            content[target.get()].deselect();
        });
        self.emit_selection_changed();
        true
    }

    /// Deselect a selected item, otherwise select it per the selection policy.
    pub fn toggle_selection(&mut self, id: &str) -> bool {
        match self.item(id).map(TreeItem::is_selected) {
            Some(true) => self.deselect(id),
            Some(false) => self.select(id),
            None => false,
        }
    }

    /// Toggle selection of the current focusable item.
    pub fn toggle_current_selection(&mut self) -> bool {
        let Some(current) = self.current_focusable_item() else {
            return false;
        };
        let id = current.identifier().clone();
        self.toggle_selection(id.as_str())
    }

    fn emit_selection_changed(&mut self) {
        let content = &self.content;
        let indices = self.views.selected.get_or_init(|| selected_in(content));
        let event = ItemSelectionEvent {
            selected_items: indices.iter().map(|index| &content[index.get()]).collect(),
        };

        info!(
            selected = event.len(),
            identifiers = ?event.identifiers(),
            "selection changed"
        );
        for listener in self.listeners.iter_mut() {
            listener(&event);
        }
    }

    // ===== Internals =====

    /// Apply a group of item mutations, then invalidate once.
    fn batch<R>(
        &mut self,
        changes: &[StateChange],
        apply: impl FnOnce(&mut [TreeItem<T>]) -> R,
    ) -> R {
        let result = apply(&mut self.content);
        for change in changes {
            self.views.invalidate(*change);
        }
        result
    }
}

fn selected_in<T>(content: &[TreeItem<T>]) -> Vec<ItemIndex> {
    content
        .iter()
        .enumerate()
        .filter(|(_, item)| item.is_selected())
        .map(|(index, _)| ItemIndex::new(index))
        .collect()
}

#[cfg(test)]
#[path = "tree_state_tests.rs"]
mod tests;
