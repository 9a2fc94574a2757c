//! Deferred focus application and interaction guards.
//!
//! A keyboard focus move changes tab indices immediately but can only apply
//! input focus after the host has rendered the new state (and possibly
//! scrolled). The move is recorded as a [`FocusRequest`] and the interaction
//! stays in flight until [`TreeState::settle`](super::TreeState::settle).

use crate::model::ItemId;
use crate::view_state::ScrollAlignment;

/// Kind of user interaction being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Pointer,
    Keyboard,
}

/// Re-entrancy flags, one per interaction kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionGuard {
    pointer: bool,
    keyboard: bool,
}

impl InteractionGuard {
    /// Mark `kind` as in flight. Returns `false` if it already was.
    pub fn try_begin(&mut self, kind: Interaction) -> bool {
        let flag = self.flag_mut(kind);
        if *flag {
            return false;
        }
        *flag = true;
        true
    }

    pub fn end(&mut self, kind: Interaction) {
        *self.flag_mut(kind) = false;
    }

    pub fn end_all(&mut self) {
        self.pointer = false;
        self.keyboard = false;
    }

    pub fn is_active(&self, kind: Interaction) -> bool {
        match kind {
            Interaction::Pointer => self.pointer,
            Interaction::Keyboard => self.keyboard,
        }
    }

    /// No interaction of any kind is in flight.
    pub fn is_idle(&self) -> bool {
        !self.pointer && !self.keyboard
    }

    fn flag_mut(&mut self, kind: Interaction) -> &mut bool {
        match kind {
            Interaction::Pointer => &mut self.pointer,
            Interaction::Keyboard => &mut self.keyboard,
        }
    }
}

/// A pending focus move waiting for the next render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRequest {
    pub identifier: ItemId,
    /// Scroll before focusing; `None` when the target is already on screen.
    pub scroll: Option<ScrollAlignment>,
    /// Interaction that produced the request; released by `settle`.
    pub origin: Interaction,
}
