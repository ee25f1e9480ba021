//! The built-in demo document, served when no document file is given.

use super::document::{ComponentToRender, ElementData, ItemData, ItemSlot};

pub const SAMPLE_TITLE: &str = "Server Driven UI";

/// (shape, colour) for Item0..Item19.
const SAMPLE_TILES: [(&str, &str); 20] = [
    ("circle", "#00ff00"),
    ("rectangle", "#00ffff"),
    ("rectangle", "#ffff00"),
    ("circle", "#ffffff"),
    ("circle", "#00ff00"),
    ("rectangle", "#00ffff"),
    ("rectangle", "#ffff00"),
    ("circle", "#ffffff"),
    ("circle", "#00ff00"),
    ("rectangle", "#ffff00"),
    ("rectangle", "#00ffff"),
    ("circle", "#ffffff"),
    ("circle", "#00ff00"),
    ("rectangle", "#ffff00"),
    ("rectangle", "#00ffff"),
    ("circle", "#000000"),
    ("circle", "#00ff00"),
    ("rectangle", "#00ffff"),
    ("rectangle", "#ffff00"),
    ("circle", "#000000"),
];

/// A title bar followed by a 20-tile grid.
pub fn sample_components() -> Vec<ComponentToRender> {
    let items = SAMPLE_TILES
        .iter()
        .enumerate()
        .map(|(i, &(shape, color))| {
            ItemSlot::Item(ItemData::new(shape, color, &format!("Item{i}"), 180.0, 32.0))
        })
        .collect();

    vec![
        ComponentToRender {
            view_type: "TopBar".into(),
            data: ElementData {
                view_type: "TopBar".into(),
                title: SAMPLE_TITLE.into(),
                data: Vec::new(),
            },
        },
        ComponentToRender {
            view_type: "GridView".into(),
            data: ElementData {
                view_type: "GridView".into(),
                title: String::new(),
                data: items,
            },
        },
    ]
}
