//! The document screen (every rendered node stacked top to bottom) plus
//! the loading and error screens shown instead of it.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, StatefulWidget, Widget, Wrap},
};

use super::grid_widget::{GridState, GridWidget, TileMetrics};
use super::layout::stack_layout;
use super::node::WidgetNode;
use super::theme::Theme;

// ───────────────────────────────────────── document ──────────

/// Draws the nodes of one document.
///
/// State holds one [`GridState`] per node (indices match `nodes`); entries
/// for non-grid nodes are unused.
pub struct StackWidget<'a> {
    nodes: &'a [WidgetNode<'a>],
    metrics: TileMetrics,
    focused_node: Option<usize>,
}

impl<'a> StackWidget<'a> {
    pub fn new(nodes: &'a [WidgetNode<'a>], metrics: TileMetrics) -> Self {
        Self {
            nodes,
            metrics,
            focused_node: None,
        }
    }

    pub fn focused_node(mut self, index: Option<usize>) -> Self {
        self.focused_node = index;
        self
    }
}

impl StatefulWidget for StackWidget<'_> {
    type State = Vec<GridState>;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if state.len() < self.nodes.len() {
            state.resize(self.nodes.len(), GridState::default());
        }

        for (index, rect) in stack_layout(area, self.nodes) {
            match self.nodes[index] {
                WidgetNode::TitleBar(title_bar) => title_bar.render(rect, buf),
                WidgetNode::Grid(grid) => {
                    GridWidget::new(grid, self.metrics)
                        .focused(self.focused_node == Some(index))
                        .render(rect, buf, &mut state[index]);
                }
                WidgetNode::Empty => {}
            }
        }
    }
}

// ───────────────────────────────────────── messages ──────────

/// Centred message shown while the document is loading.
pub struct LoadingScreen<'a> {
    pub origin: &'a str,
}

impl Widget for LoadingScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![Line::from(Span::styled(
            format!("Loading document from {}…", self.origin),
            Theme::message_style(),
        ))];
        render_centered(lines, area, buf);
    }
}

/// Shown when the document could not be loaded.  Never drawn together with
/// a partial stack.
pub struct ErrorScreen<'a> {
    pub message: &'a str,
    pub retry_hint: &'a str,
}

impl Widget for ErrorScreen<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = vec![
            Line::from(Span::styled("Document unavailable", Theme::error_style())),
            Line::raw(""),
            Line::from(Span::styled(self.message, Theme::message_style())),
            Line::raw(""),
            Line::from(Span::styled(self.retry_hint, Theme::hint_style())),
        ];
        render_centered(lines, area, buf);
    }
}

/// Vertically centre a short block of centred lines.
fn render_centered(lines: Vec<Line<'_>>, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    let height = (lines.len() as u16).min(area.height);
    let y = area.y + (area.height - height) / 2;
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(Rect::new(area.x, y, area.width, area.height - (y - area.y)), buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::component::Component;
    use crate::core::document::{Document, ItemData};
    use crate::ui::renderer::render_document;
    use ratatui::{backend::TestBackend, style::Color, Terminal};

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol().to_string()).collect()
    }

    fn draw(doc: &Document, width: u16, height: u16, grids: &mut Vec<GridState>) -> Buffer {
        let nodes = render_document(doc);
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|f| {
                f.render_stateful_widget(
                    StackWidget::new(&nodes, TileMetrics::default()),
                    f.area(),
                    grids,
                );
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn header_sits_above_grid() {
        let doc = Document::new(vec![
            Component::TitleBar {
                title: "Server Driven UI".into(),
            },
            Component::Grid {
                items: vec![ItemData::new("circle", "#00ff00", "Item0", 180.0, 32.0)],
            },
        ]);
        let mut grids = Vec::new();
        let buf = draw(&doc, 40, 16, &mut grids);

        assert_eq!(grids.len(), 2);
        assert_eq!(buf[(0, 0)].bg, Color::Red);
        let header: String = (0..40).map(|x| buf[(x, 1)].symbol().to_string()).collect();
        assert!(header.contains("Server Driven UI"));
        // The grid starts right under the 3-row header with a rounded card.
        assert_eq!(buf[(0, 3)].symbol(), "╭");
        assert_eq!(buf[(5, 4)].bg, Color::Rgb(0, 255, 0));
    }

    #[test]
    fn unknown_components_take_no_space() {
        let doc = Document::new(vec![
            Component::Unknown {
                view_type: "Banner".into(),
            },
            Component::TitleBar { title: "T".into() },
        ]);
        let buf = draw(&doc, 20, 6, &mut Vec::new());
        assert_eq!(buf[(0, 0)].bg, Color::Red);
        assert_eq!(buf[(0, 3)].bg, Color::Reset);
    }

    #[test]
    fn scrolled_grid_draws_later_rows() {
        let items: Vec<ItemData> = (0..20)
            .map(|i| ItemData::new("rectangle", "#ffff00", &format!("Item{i}"), 60.0, 32.0))
            .collect();
        let doc = Document::new(vec![Component::Grid { items }]);
        let mut grids = vec![GridState {
            offset: 3,
            selected: None,
        }];
        let buf = draw(&doc, 30, 6, &mut grids);
        let text = buffer_text(&buf);
        assert!(text.contains("Item6"));
        assert!(text.contains("Item9"));
        assert!(!text.contains("Item5"));
    }

    #[test]
    fn error_screen_names_the_failure() {
        let area = Rect::new(0, 0, 50, 9);
        let mut buf = Buffer::empty(area);
        ErrorScreen {
            message: "no such file",
            retry_hint: "press r to retry",
        }
        .render(area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("Document unavailable"));
        assert!(text.contains("no such file"));
        assert!(text.contains("press r to retry"));
    }
}
