//! TUI rendering and terminal management (impure shell)

pub mod item_renderer;
pub mod styles;
pub mod tree_view;

pub use item_renderer::{truncate_to_width, ItemRenderer, LabelRenderer};
pub use styles::{ColorConfig, TreeStyles};
pub use tree_view::{tree_title, TreeView};

use crate::config::KeyBindings;
use crate::flatten::{flatten_with, FlattenOptions};
use crate::model::{AppError, KeyAction, NodeData, SourceNode};
use crate::state::{
    handle_key_action, handle_row_click, handle_wheel, ItemSelectionEvent, TreeOptions, TreeState,
};
use crate::view_state::{RenderCollaborator, TreeAria, TreeItemAria, Virtualizer};
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout, Rect},
    widgets::{Block, Paragraph},
    Terminal,
};
use std::io::{self, Stdout};
use thiserror::Error;
use tracing::{debug, info};

/// Rows scrolled per mouse wheel notch.
const WHEEL_ROWS: isize = 3;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

impl From<TuiError> for AppError {
    fn from(err: TuiError) -> Self {
        match err {
            TuiError::Io(e) => AppError::Terminal(e),
        }
    }
}

/// Settings the shell hands to the TUI.
///
/// Bridges resolved configuration (config file, env, CLI) to the rendering
/// layer.
#[derive(Debug, Clone)]
pub struct TuiSettings {
    pub tree_options: TreeOptions,
    pub flatten_options: FlattenOptions,
    pub key_bindings: KeyBindings,
    pub colors: ColorConfig,
}

impl Default for TuiSettings {
    fn default() -> Self {
        Self {
            tree_options: TreeOptions::default(),
            flatten_options: FlattenOptions::default(),
            key_bindings: KeyBindings::default(),
            colors: ColorConfig::from_env_and_args(false),
        }
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    tree: TreeState<NodeData>,
    virtualizer: Virtualizer,
    key_bindings: KeyBindings,
    renderer: LabelRenderer,
    styles: TreeStyles,
    /// Inner tree area of the last frame (for row click detection)
    last_tree_area: Option<Rect>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(nodes: &[SourceNode], settings: TuiSettings) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

        Ok(Self::with_terminal(terminal, nodes, settings))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q or Ctrl+C by default).
    /// Blocks on terminal events; nothing is redrawn while idle.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if self.handle_event(event::read()?)? {
                return Ok(());
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app over an existing terminal.
    ///
    /// Flattens `nodes` with the configured options; the terminal is not
    /// touched until the first draw.
    pub fn with_terminal(terminal: Terminal<B>, nodes: &[SourceNode], settings: TuiSettings) -> Self {
        let content = flatten_with(nodes, &settings.flatten_options);
        info!(
            items = content.len(),
            mode = %settings.tree_options.selection_mode,
            "tree flattened"
        );
        let styles = TreeStyles::with_color_config(settings.colors);

        Self {
            terminal,
            tree: TreeState::with_content(content, settings.tree_options),
            virtualizer: Virtualizer::default(),
            key_bindings: settings.key_bindings,
            renderer: LabelRenderer::new(styles.marker),
            styles,
            last_tree_area: None,
        }
    }

    pub fn tree(&self) -> &TreeState<NodeData> {
        &self.tree
    }

    pub fn virtualizer(&self) -> &Virtualizer {
        &self.virtualizer
    }

    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Register a selection-changed listener on the tree.
    pub fn subscribe(&mut self, listener: impl FnMut(&ItemSelectionEvent<'_, NodeData>) + 'static) {
        self.tree.subscribe(listener);
    }

    /// Process one terminal event and redraw.
    ///
    /// Returns `true` if the app should quit.
    pub fn handle_event(&mut self, event: Event) -> Result<bool, TuiError> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => {
                self.handle_mouse(mouse);
                self.draw()?;
                Ok(false)
            }
            Event::Resize(width, height) => {
                debug!(width, height, "terminal resized");
                self.draw()?;
                Ok(false)
            }
            _ => Ok(false),
        }
    }

    /// Handle a single keyboard event
    ///
    /// A focus move is drawn first, then settled (scroll and input focus),
    /// then drawn again in its final position.
    fn handle_key(&mut self, key: KeyEvent) -> Result<bool, TuiError> {
        let Some(action) = self.key_bindings.get(key) else {
            return Ok(false);
        };
        if action == KeyAction::Quit {
            return Ok(true);
        }

        handle_key_action(&mut self.tree, action);
        self.draw()?;
        if self.tree.pending_focus().is_some() {
            self.tree.settle(&mut self.virtualizer);
            self.draw()?;
        }
        Ok(false)
    }

    /// Handle a single mouse event
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(area) = self.last_tree_area else {
                    return;
                };
                let inside = mouse.column >= area.x
                    && mouse.column < area.x + area.width
                    && mouse.row >= area.y
                    && mouse.row < area.y + area.height;
                if inside {
                    let row = (mouse.row - area.y) as usize;
                    handle_row_click(&mut self.tree, &mut self.virtualizer, row);
                }
            }
            MouseEventKind::ScrollDown => {
                handle_wheel(&mut self.tree, &mut self.virtualizer, WHEEL_ROWS)
            }
            MouseEventKind::ScrollUp => {
                handle_wheel(&mut self.tree, &mut self.virtualizer, -WHEEL_ROWS)
            }
            _ => {}
        }
    }

    /// Status text: the focused item's description and the selection count.
    pub fn status_text(&self) -> String {
        let selected = self.tree.selected_items().len();
        match self.tree.current_focusable_item() {
            Some(item) => format!(
                " {}: {} | {} selected",
                item.data().label(),
                TreeItemAria::from_item(item).describe(),
                selected
            ),
            None => format!(" empty | {} selected", selected),
        }
    }

    /// Render the current frame
    ///
    /// Sizes the virtualizer to the tree area and reports the on-screen range
    /// before painting, so the widget and the engine agree on the window.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let frame_area = Rect::new(0, 0, size.width, size.height);
        let [tree_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame_area);

        let block = Block::bordered().title(tree_title(TreeAria::new(self.tree.selection_mode())));
        let inner = block.inner(tree_area);
        self.last_tree_area = Some(inner);

        self.virtualizer.set_viewport_height(inner.height as usize);
        let range = self.virtualizer.visible_range(self.tree.visible_len());
        self.tree.visibility_changed(range);

        let status = truncate_to_width(&self.status_text(), status_area.width as usize);
        let tree = &self.tree;
        let renderer = &self.renderer;
        let styles = self.styles;
        self.terminal.draw(|frame| {
            frame.render_widget(
                TreeView::new(tree, renderer).styles(styles).block(block),
                tree_area,
            );
            frame.render_widget(Paragraph::new(status).style(styles.status), status_area);
        })?;

        Ok(())
    }
}

/// Initialize and run the TUI application over `nodes`
///
/// Handles terminal setup, runs the event loop, and ensures cleanup on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_source(
    nodes: &[SourceNode],
    settings: TuiSettings,
    on_selection: impl FnMut(&ItemSelectionEvent<'_, NodeData>) + 'static,
) -> Result<(), TuiError> {
    let mut app = match TuiApp::new(nodes, settings) {
        Ok(app) => app,
        Err(e) => {
            let _ = restore_terminal();
            return Err(e);
        }
    };
    app.subscribe(on_selection);

    // Run the app and ensure cleanup happens even on error
    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
