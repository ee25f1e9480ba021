//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::node::WidgetNode;
use super::title_bar::TITLE_BAR_HEIGHT;

/// Primary screen layout: document content and a bottom status bar.
pub struct AppLayout {
    pub content_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // document stack
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            content_area: chunks[0],
            status_area: chunks[1],
        }
    }
}

/// Vertical stack of the non-empty nodes, in document order.
///
/// Returns `(node index, area)` pairs.  Title bars get a fixed height; grids
/// share whatever is left equally.
pub fn stack_layout(area: Rect, nodes: &[WidgetNode<'_>]) -> Vec<(usize, Rect)> {
    let shown: Vec<(usize, Constraint)> = nodes
        .iter()
        .enumerate()
        .filter_map(|(i, node)| match node {
            WidgetNode::TitleBar(_) => Some((i, Constraint::Length(TITLE_BAR_HEIGHT))),
            WidgetNode::Grid(_) => Some((i, Constraint::Fill(1))),
            WidgetNode::Empty => None,
        })
        .collect();

    if shown.is_empty() {
        return Vec::new();
    }

    let chunks = Layout::vertical(shown.iter().map(|&(_, c)| c)).split(area);
    shown
        .iter()
        .zip(chunks.iter())
        .map(|(&(i, _), &rect)| (i, rect))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::document::ItemData;
    use crate::ui::node::{GridNode, TitleBarNode};

    #[test]
    fn status_bar_is_last_row() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.content_area, Rect::new(0, 0, 80, 23));
    }

    #[test]
    fn stack_keeps_order_and_skips_empty() {
        let items = vec![ItemData::new("circle", "#ffffff", "a", 20.0, 10.0)];
        let nodes = [
            WidgetNode::TitleBar(TitleBarNode { title: "top" }),
            WidgetNode::Empty,
            WidgetNode::Grid(GridNode::new(&items)),
        ];
        let areas = stack_layout(Rect::new(0, 0, 40, 20), &nodes);
        assert_eq!(
            areas,
            vec![(0, Rect::new(0, 0, 40, 3)), (2, Rect::new(0, 3, 40, 17))]
        );
    }

    #[test]
    fn all_empty_stack_has_no_areas() {
        let nodes = [WidgetNode::Empty, WidgetNode::Empty];
        assert!(stack_layout(Rect::new(0, 0, 10, 10), &nodes).is_empty());
    }
}
