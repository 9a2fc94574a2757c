//! Keyboard bindings configuration.

use crate::model::key_action::{KeyAction, UnknownKeyAction};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use thiserror::Error;

/// Errors in the `[keybindings]` config table.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyBindingError {
    #[error(transparent)]
    UnknownAction(#[from] UnknownKeyAction),

    /// Key spec that does not name a key, e.g. `"ctrl+"` or `"hyper+x"`.
    #[error("cannot parse key {spec:?} bound to {action}")]
    InvalidKey { action: KeyAction, spec: String },
}

/// Maps keyboard events to domain actions.
///
/// Provides default arrow/vim-style bindings with option to override via
/// configuration.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Shift is ignored for character keys whose case already carries it.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        let key = normalize(KeyEvent::new(key.code, key.modifiers));
        self.bindings.get(&key).copied()
    }

    /// Keys bound to `action`, for help output.
    pub fn keys_for(&self, action: KeyAction) -> Vec<KeyEvent> {
        let mut keys: Vec<KeyEvent> = self
            .bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect();
        keys.sort_by_key(|key| format!("{:?}{:?}", key.code, key.modifiers));
        keys
    }

    /// Replace the keys of every action named in `overrides`.
    ///
    /// Actions not mentioned keep their defaults. A key moved to another
    /// action is removed from its previous one.
    pub fn apply_overrides(
        &mut self,
        overrides: &HashMap<String, Vec<String>>,
    ) -> Result<(), KeyBindingError> {
        let mut parsed = Vec::with_capacity(overrides.len());
        for (name, specs) in overrides {
            let action: KeyAction = name.parse()?;
            let keys = specs
                .iter()
                .map(|spec| {
                    parse_key(spec).ok_or_else(|| KeyBindingError::InvalidKey {
                        action,
                        spec: spec.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            parsed.push((action, keys));
        }

        for (action, keys) in parsed {
            self.bindings.retain(|_, bound| *bound != action);
            for key in keys {
                self.bindings.insert(key, action);
            }
        }
        Ok(())
    }

    fn bind(&mut self, code: KeyCode, modifiers: KeyModifiers, action: KeyAction) {
        self.bindings
            .insert(normalize(KeyEvent::new(code, modifiers)), action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };

        // Arrow navigation
        keys.bind(KeyCode::Down, KeyModifiers::NONE, KeyAction::FocusNext);
        keys.bind(KeyCode::Up, KeyModifiers::NONE, KeyAction::FocusPrevious);
        keys.bind(KeyCode::Right, KeyModifiers::NONE, KeyAction::ExpandOrFocusChild);
        keys.bind(KeyCode::Left, KeyModifiers::NONE, KeyAction::CollapseOrFocusParent);
        keys.bind(KeyCode::Home, KeyModifiers::NONE, KeyAction::FocusFirst);
        keys.bind(KeyCode::End, KeyModifiers::NONE, KeyAction::FocusLast);

        // Vim-style navigation
        keys.bind(KeyCode::Char('j'), KeyModifiers::NONE, KeyAction::FocusNext);
        keys.bind(KeyCode::Char('k'), KeyModifiers::NONE, KeyAction::FocusPrevious);
        keys.bind(KeyCode::Char('l'), KeyModifiers::NONE, KeyAction::ExpandOrFocusChild);
        keys.bind(KeyCode::Char('h'), KeyModifiers::NONE, KeyAction::CollapseOrFocusParent);
        keys.bind(KeyCode::Char('g'), KeyModifiers::NONE, KeyAction::FocusFirst);
        keys.bind(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::FocusLast);

        // Item interaction
        keys.bind(KeyCode::Enter, KeyModifiers::NONE, KeyAction::ToggleSelection);
        keys.bind(KeyCode::Char(' '), KeyModifiers::NONE, KeyAction::ToggleSelection);
        keys.bind(KeyCode::Char('*'), KeyModifiers::NONE, KeyAction::ExpandSiblings);

        // Application controls
        keys.bind(KeyCode::Char('q'), KeyModifiers::NONE, KeyAction::Quit);
        keys.bind(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        keys
    }
}

/// Drop SHIFT from character keys; terminals disagree on reporting it.
fn normalize(key: KeyEvent) -> KeyEvent {
    match key.code {
        KeyCode::Char(_) => KeyEvent::new(key.code, key.modifiers.difference(KeyModifiers::SHIFT)),
        _ => key,
    }
}

/// Parse a key spec such as `"Down"`, `"j"`, `"*"`, `"space"` or `"ctrl+n"`.
///
/// Names are case-insensitive; a single character is taken literally.
pub fn parse_key(spec: &str) -> Option<KeyEvent> {
    let spec = spec.trim();
    let (prefix, key) = match spec.rsplit_once('+') {
        // "+" on its own or "ctrl++" bind the plus key
        Some((prefix, "")) if !prefix.is_empty() => (prefix.strip_suffix('+')?, "+"),
        Some((prefix, key)) if !prefix.is_empty() => (prefix, key),
        _ => ("", spec),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.split('+').filter(|part| !part.is_empty()) {
        modifiers |= match part.to_ascii_lowercase().as_str() {
            "ctrl" | "control" => KeyModifiers::CONTROL,
            "alt" | "meta" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return None,
        };
    }

    let mut chars = key.chars();
    let code = match (chars.next(), chars.next()) {
        (Some(c), None) => KeyCode::Char(c),
        (Some(_), Some(_)) => match key.to_ascii_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "enter" | "return" => KeyCode::Enter,
            "space" => KeyCode::Char(' '),
            "tab" => KeyCode::Tab,
            "esc" | "escape" => KeyCode::Esc,
            "pageup" => KeyCode::PageUp,
            "pagedown" => KeyCode::PageDown,
            _ => return None,
        },
        (None, _) => return None,
    };

    Some(normalize(KeyEvent::new(code, modifiers)))
}
