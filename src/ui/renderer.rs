//! The rendering dispatcher: component in, widget node out.

use crate::core::component::Component;
use crate::core::document::{Document, ItemData};

use super::node::{GridNode, TitleBarNode, WidgetNode};

/// Render one component.  Unknown and invalid components render as
/// [`WidgetNode::Empty`].
pub fn render(component: &Component) -> WidgetNode<'_> {
    match component {
        Component::TitleBar { title } => build_title_bar(title),
        Component::Grid { items } => build_grid(items),
        Component::Unknown { .. } | Component::Invalid { .. } => WidgetNode::Empty,
    }
}

/// Render every component, in document order.  The result has one node per
/// component, so indices line up with [`Document::components`].
pub fn render_document(document: &Document) -> Vec<WidgetNode<'_>> {
    document.components().iter().map(render).collect()
}

fn build_title_bar(title: &str) -> WidgetNode<'_> {
    WidgetNode::TitleBar(TitleBarNode { title })
}

fn build_grid(items: &[ItemData]) -> WidgetNode<'_> {
    WidgetNode::Grid(GridNode::new(items))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::color::Argb;
    use crate::core::grid::CellPos;
    use crate::ui::node::Outline;

    fn scenario() -> Document {
        Document::from_json(
            r##"[
                {"viewType":"TopBar","data":{"viewType":"TopBar","title":"Server Driven UI","data":[]}},
                {"viewType":"GridView","data":{"viewType":"GridView","title":"","data":[
                    {"shape":"circle","color":"#00ff00","name":"Item0","cardHeight":180,"fontSize":32}
                ]}}
            ]"##,
        )
        .unwrap()
    }

    #[test]
    fn header_then_single_tile_grid() {
        let doc = scenario();
        let nodes = render_document(&doc);
        assert_eq!(nodes.len(), 2);

        assert_eq!(
            nodes[0],
            WidgetNode::TitleBar(TitleBarNode {
                title: "Server Driven UI"
            })
        );

        let WidgetNode::Grid(grid) = nodes[1] else {
            panic!("second node should be a grid");
        };
        assert_eq!(grid.len(), 1);
        let tile = grid.tile(0).unwrap();
        assert_eq!(tile.outline, Outline::Circular);
        assert_eq!(tile.background, Argb::opaque(0, 0xFF, 0));
        assert_eq!(tile.label, "Item0");
        assert_eq!(tile.font_size, 32.0);
        assert_eq!(tile.card_height, 180.0);
    }

    #[test]
    fn unknown_view_type_renders_nothing() {
        let c = Component::Unknown {
            view_type: "Carousel".into(),
        };
        assert!(render(&c).is_empty());
        let c = Component::Invalid {
            view_type: "GridView".into(),
            reason: "bad".into(),
        };
        assert!(render(&c).is_empty());
    }

    #[test]
    fn document_order_is_preserved() {
        let doc = Document::new(vec![
            Component::TitleBar { title: "a".into() },
            Component::Unknown {
                view_type: "X".into(),
            },
            Component::Grid { items: Vec::new() },
            Component::TitleBar { title: "b".into() },
        ]);
        let nodes = render_document(&doc);
        assert!(matches!(nodes[0], WidgetNode::TitleBar(TitleBarNode { title: "a" })));
        assert!(nodes[1].is_empty());
        assert!(matches!(nodes[2], WidgetNode::Grid(g) if g.is_empty()));
        assert!(matches!(nodes[3], WidgetNode::TitleBar(TitleBarNode { title: "b" })));
    }

    #[test]
    fn empty_title_is_still_a_header() {
        let c = Component::TitleBar {
            title: String::new(),
        };
        assert_eq!(render(&c), WidgetNode::TitleBar(TitleBarNode { title: "" }));
    }

    #[test]
    fn twenty_items_fill_ten_rows_in_order() {
        let items: Vec<ItemData> = (0..20)
            .map(|i| ItemData::new("rectangle", "#ffffff", &format!("Item{i}"), 180.0, 32.0))
            .collect();
        let c = Component::Grid { items };
        let WidgetNode::Grid(grid) = render(&c) else {
            panic!("expected grid");
        };
        assert_eq!(grid.row_count(), 10);
        assert_eq!(grid.columns(), 2);
        for i in 0..20 {
            assert_eq!(grid.position(i), CellPos { row: i / 2, col: i % 2 });
            assert_eq!(grid.tile(i).unwrap().label, format!("Item{i}"));
        }
    }

    #[test]
    fn triangle_renders_as_rectangle() {
        let c = Component::Grid {
            items: vec![ItemData::new("triangle", "#123456", "T", 100.0, 20.0)],
        };
        let WidgetNode::Grid(grid) = render(&c) else {
            panic!("expected grid");
        };
        assert_eq!(grid.tile(0).unwrap().outline, Outline::Rectangular);
    }
}
