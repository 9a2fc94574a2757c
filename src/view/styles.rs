//! Tree row styling.
//!
//! Focus and selection must stay distinguishable without color, so both also
//! carry a modifier.

use ratatui::style::{Color, Modifier, Style};

// ===== ColorConfig =====

/// Configuration for color output.
///
/// Determines whether colors should be enabled or disabled based on:
/// - `--no-color` CLI flag
/// - `NO_COLOR` environment variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorConfig {
    enabled: bool,
}

impl ColorConfig {
    /// Create a ColorConfig from CLI args and environment.
    ///
    /// Priority (first match wins):
    /// 1. `--no-color` flag (disables colors)
    /// 2. `NO_COLOR` env var (any value disables colors)
    /// 3. Default: colors enabled
    pub fn from_env_and_args(no_color_flag: bool) -> Self {
        let enabled = !no_color_flag && std::env::var("NO_COLOR").is_err();
        Self { enabled }
    }

    pub fn enabled() -> Self {
        Self { enabled: true }
    }

    pub fn disabled() -> Self {
        Self { enabled: false }
    }

    /// Check if colors are enabled.
    pub fn colors_enabled(self) -> bool {
        self.enabled
    }
}

// ===== TreeStyles =====

/// Styles applied to tree rows and the status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStyles {
    /// Row holding roving focus.
    pub focused: Style,
    /// Selected row (combined with `focused` when both apply).
    pub selected: Style,
    /// Expand/collapse marker.
    pub marker: Style,
    pub status: Style,
}

impl TreeStyles {
    /// Create styles for the given color configuration.
    ///
    /// Without colors, focus is reversed video and selection is bold.
    pub fn with_color_config(config: ColorConfig) -> Self {
        if config.colors_enabled() {
            Self {
                focused: Style::default().add_modifier(Modifier::REVERSED),
                selected: Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                marker: Style::default().fg(Color::Cyan),
                status: Style::default().fg(Color::Black).bg(Color::Gray),
            }
        } else {
            Self {
                focused: Style::default().add_modifier(Modifier::REVERSED),
                selected: Style::default().add_modifier(Modifier::BOLD),
                marker: Style::default(),
                status: Style::default().add_modifier(Modifier::REVERSED),
            }
        }
    }

    /// Style of a whole row.
    pub fn row(&self, focused: bool, selected: bool) -> Style {
        let mut style = Style::default();
        if selected {
            style = style.patch(self.selected);
        }
        if focused {
            style = style.patch(self.focused);
        }
        style
    }
}

impl Default for TreeStyles {
    fn default() -> Self {
        Self::with_color_config(ColorConfig::from_env_and_args(false))
    }
}
