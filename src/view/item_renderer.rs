//! Per-item rendering.
//!
//! The tree widget knows nothing about payloads; it asks an [`ItemRenderer`]
//! for one line per rendered item and applies focus and selection styling on
//! top.

use crate::model::{NodeData, TreeItem};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthChar;

/// Produces the displayable line for one tree item.
pub trait ItemRenderer<T> {
    fn render(&self, item: &TreeItem<T>) -> Line<'static>;
}

impl<T, F> ItemRenderer<T> for F
where
    F: Fn(&TreeItem<T>) -> Line<'static>,
{
    fn render(&self, item: &TreeItem<T>) -> Line<'static> {
        self(item)
    }
}

/// Indented label with an expansion marker.
///
/// ```text
/// ▾ Projects
///   ▸ project-3
///     project-4.docx
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelRenderer {
    pub marker_style: Style,
}

impl LabelRenderer {
    pub const EXPANDED: &'static str = "▾ ";
    pub const COLLAPSED: &'static str = "▸ ";
    pub const LEAF: &'static str = "  ";
    /// Columns of indentation per level below the root.
    pub const INDENT: usize = 2;

    pub fn new(marker_style: Style) -> Self {
        Self { marker_style }
    }

    pub fn marker(expanded: Option<bool>) -> &'static str {
        match expanded {
            Some(true) => Self::EXPANDED,
            Some(false) => Self::COLLAPSED,
            None => Self::LEAF,
        }
    }
}

impl ItemRenderer<NodeData> for LabelRenderer {
    fn render(&self, item: &TreeItem<NodeData>) -> Line<'static> {
        let indent = " ".repeat(Self::INDENT * item.level().saturating_sub(1));
        Line::from(vec![
            Span::raw(indent),
            Span::styled(Self::marker(item.expanded()), self.marker_style),
            Span::raw(item.data().label().to_string()),
        ])
    }
}

/// Cut `text` to at most `width` terminal columns, appending `…` when cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().filter_map(UnicodeWidthChar::width).sum();
    if total <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flatten::{flatten_with, FlattenOptions};
    use crate::model::SourceNode;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn renders_indent_marker_and_label() {
        let items = flatten_with(
            &[SourceNode::named("Projects").with_children(vec![
                SourceNode::named("project-3").with_children(vec![SourceNode::named("3A")]),
                SourceNode::named("project-4.docx"),
            ])],
            &FlattenOptions::default(),
        );
        let renderer = LabelRenderer::default();

        let lines: Vec<String> = items
            .iter()
            .map(|item| line_text(&renderer.render(item)))
            .collect();
        assert_eq!(
            lines,
            vec![
                "▾ Projects",
                "  ▾ project-3",
                "      3A",
                "    project-4.docx",
            ]
        );
    }

    #[test]
    fn collapsed_marker() {
        assert_eq!(LabelRenderer::marker(Some(false)), "▸ ");
    }

    #[test]
    fn closures_are_renderers() {
        let items = flatten_with(&[SourceNode::named("x")], &FlattenOptions::default());
        let renderer = |item: &TreeItem<NodeData>| Line::from(format!("#{}", item.inset()));
        assert_eq!(line_text(&renderer.render(&items[0])), "#1");
    }

    #[test]
    fn truncation_respects_wide_characters() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdef", 4), "abc…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
        assert_eq!(truncate_to_width("abc", 0), "");
    }
}
