//! Domain-level keyboard actions independent of key bindings.

use std::fmt;
use std::str::FromStr;

/// Domain-level actions that can be mapped to configurable key bindings.
///
/// These represent user intent, not specific keys. The mapping from
/// crossterm::event::KeyEvent to KeyAction is handled by KeyBindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Move focus to the next visible item. Default: ↓/j
    FocusNext,
    /// Move focus to the previous visible item. Default: ↑/k
    FocusPrevious,
    /// Expand a collapsed item, or step into the first child of an expanded one. Default: →/l
    ExpandOrFocusChild,
    /// Collapse an expanded item, or step out to the parent. Default: ←/h
    CollapseOrFocusParent,
    /// Focus the first visible item. Default: Home/g
    FocusFirst,
    /// Focus the last visible item. Default: End/G
    FocusLast,
    /// Toggle selection of the focused item. Default: Enter/Space
    ToggleSelection,
    /// Expand every visible item on the focused item's level. Default: *
    ExpandSiblings,
    /// Exit the application. Default: q/Ctrl+c
    Quit,
}

impl KeyAction {
    /// Every action, in help order.
    pub const ALL: [KeyAction; 9] = [
        KeyAction::FocusNext,
        KeyAction::FocusPrevious,
        KeyAction::ExpandOrFocusChild,
        KeyAction::CollapseOrFocusParent,
        KeyAction::FocusFirst,
        KeyAction::FocusLast,
        KeyAction::ToggleSelection,
        KeyAction::ExpandSiblings,
        KeyAction::Quit,
    ];

    /// Name used in the `[keybindings]` config table.
    pub fn config_name(self) -> &'static str {
        match self {
            KeyAction::FocusNext => "focus_next",
            KeyAction::FocusPrevious => "focus_previous",
            KeyAction::ExpandOrFocusChild => "expand_or_focus_child",
            KeyAction::CollapseOrFocusParent => "collapse_or_focus_parent",
            KeyAction::FocusFirst => "focus_first",
            KeyAction::FocusLast => "focus_last",
            KeyAction::ToggleSelection => "toggle_selection",
            KeyAction::ExpandSiblings => "expand_siblings",
            KeyAction::Quit => "quit",
        }
    }
}

impl fmt::Display for KeyAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.config_name())
    }
}

/// Unknown action name in configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key action {0:?}")]
pub struct UnknownKeyAction(pub String);

impl FromStr for KeyAction {
    type Err = UnknownKeyAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeyAction::ALL
            .into_iter()
            .find(|action| action.config_name() == s)
            .ok_or_else(|| UnknownKeyAction(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_names_parse_back() {
        for action in KeyAction::ALL {
            assert_eq!(action.config_name().parse::<KeyAction>(), Ok(action));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(
            "scroll_up".parse::<KeyAction>(),
            Err(UnknownKeyAction("scroll_up".to_string()))
        );
    }

    #[test]
    fn display_uses_config_name() {
        assert_eq!(KeyAction::ExpandSiblings.to_string(), "expand_siblings");
    }
}
