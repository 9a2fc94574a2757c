//! Tree widget.
//!
//! Paints only the rendered window: the slice of visible content the engine
//! last received from the virtualizer. Row `r` of the area shows rendered item
//! `r`, so the widget and [`Virtualizer`](crate::view_state::Virtualizer) must
//! agree on the viewport height.

use super::item_renderer::ItemRenderer;
use super::styles::TreeStyles;
use crate::state::TreeState;
use crate::view_state::TreeAria;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::{Block, Widget};

/// Widget rendering a [`TreeState`]'s on-screen items.
pub struct TreeView<'a, T, R> {
    state: &'a TreeState<T>,
    renderer: &'a R,
    styles: TreeStyles,
    block: Option<Block<'a>>,
}

impl<'a, T, R: ItemRenderer<T>> TreeView<'a, T, R> {
    pub fn new(state: &'a TreeState<T>, renderer: &'a R) -> Self {
        Self {
            state,
            renderer,
            styles: TreeStyles::default(),
            block: None,
        }
    }

    pub fn styles(mut self, styles: TreeStyles) -> Self {
        self.styles = styles;
        self
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl<T, R: ItemRenderer<T>> Widget for TreeView<'_, T, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.is_empty() {
            return;
        }

        for (row, item) in self
            .state
            .rendered_items()
            .into_iter()
            .take(inner.height as usize)
            .enumerate()
        {
            let row_area = Rect {
                x: inner.x,
                y: inner.y + row as u16,
                width: inner.width,
                height: 1,
            };
            buf.set_style(
                row_area,
                self.styles.row(item.is_focusable(), item.is_selected()),
            );
            let line = self.renderer.render(item);
            buf.set_line(row_area.x, row_area.y, &line, row_area.width);
        }
    }
}

/// Title for the tree block, e.g. `" tree (multi-select) "`.
pub fn tree_title(aria: TreeAria) -> String {
    if aria.multiselectable {
        format!(" {} (multi-select) ", TreeAria::ROLE)
    } else {
        format!(" {} ", TreeAria::ROLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::flatten;
    use crate::model::SourceNode;
    use crate::state::{SelectionMode, TreeOptions};
    use crate::view::item_renderer::LabelRenderer;
    use crate::view::styles::ColorConfig;
    use crate::view_state::VisibleRange;
    use ratatui::style::Modifier;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    fn state() -> TreeState<crate::model::NodeData> {
        let nodes = vec![
            SourceNode::named("docs").with_children(vec![
                SourceNode::named("a.txt"),
                SourceNode::named("b.txt"),
            ]),
            SourceNode::named("readme"),
        ];
        TreeState::with_content(flatten(&nodes), TreeOptions::default())
    }

    #[test]
    fn renders_only_the_rendered_window() {
        let mut state = state();
        state.visibility_changed(VisibleRange::new(1, 2));
        let renderer = LabelRenderer::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 3));

        TreeView::new(&state, &renderer).render(buf.area, &mut buf);

        assert_eq!(row_text(&buf, 0), "    a.txt");
        assert_eq!(row_text(&buf, 1), "    b.txt");
        assert_eq!(row_text(&buf, 2), "");
    }

    #[test]
    fn focused_row_is_highlighted_across_full_width() {
        let mut state = state();
        state.visibility_changed(VisibleRange::new(0, 3));
        let renderer = LabelRenderer::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 12, 4));

        TreeView::new(&state, &renderer)
            .styles(TreeStyles::with_color_config(ColorConfig::disabled()))
            .render(buf.area, &mut buf);

        assert!(buf[(11, 0)].modifier.contains(Modifier::REVERSED));
        assert!(!buf[(11, 1)].modifier.contains(Modifier::REVERSED));
    }

    #[test]
    fn zero_sized_area_is_ignored() {
        let state = state();
        let renderer = LabelRenderer::default();
        let mut buf = Buffer::empty(Rect::new(0, 0, 0, 0));
        TreeView::new(&state, &renderer).render(buf.area, &mut buf);
    }

    #[test]
    fn title_reflects_selection_mode() {
        assert_eq!(tree_title(TreeAria::new(SelectionMode::Single)), " tree ");
        assert_eq!(
            tree_title(TreeAria::new(SelectionMode::Multi)),
            " tree (multi-select) "
        );
    }
}
