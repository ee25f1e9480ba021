//! Widget nodes: what the renderer produces from a document.
//!
//! Nodes borrow the document they came from and are rebuilt on every frame.
//! A grid node does not hold its tiles; [`GridNode::tile`] realises one on
//! demand so drawing stays proportional to what is on screen.

use crate::core::color::Argb;
use crate::core::document::{ItemData, Shape, DEFAULT_CARD_HEIGHT, DEFAULT_FONT_SIZE};
use crate::core::grid::{self, CellPos};

use super::theme::Theme;

/// Receiver of one-way user notifications (toasts).
///
/// Sending never blocks and never reports failure back to the widget.
pub trait Notifier {
    fn notify(&self, message: String);
}

/// Output of rendering one component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WidgetNode<'a> {
    TitleBar(TitleBarNode<'a>),
    Grid(GridNode<'a>),
    Empty,
}

impl WidgetNode<'_> {
    pub fn is_empty(&self) -> bool {
        matches!(self, WidgetNode::Empty)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleBarNode<'a> {
    pub title: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridNode<'a> {
    items: &'a [ItemData],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outline {
    Circular,
    Rectangular,
}

/// A realised grid tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<'a> {
    pub index: usize,
    pub label: &'a str,
    /// Logical pixels; always positive.
    pub font_size: f32,
    /// Logical pixels; always positive.
    pub card_height: f32,
    pub background: Argb,
    pub outline: Outline,
    pub label_color: Argb,
}

// ───────────────────────────────────────── grid ──────────────

impl<'a> GridNode<'a> {
    pub fn new(items: &'a [ItemData]) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn columns(&self) -> usize {
        grid::COLUMNS
    }

    pub fn row_count(&self) -> usize {
        grid::row_count(self.items.len())
    }

    pub fn position(&self, index: usize) -> CellPos {
        grid::cell_position(index)
    }

    /// Card height of item `index` in logical pixels; 0 past the end.
    pub fn card_height(&self, index: usize) -> f32 {
        self.items
            .get(index)
            .map_or(0.0, |item| positive_or(item.card_height, DEFAULT_CARD_HEIGHT))
    }

    /// Height of a grid row: its tallest card.
    pub fn row_height(&self, row: usize) -> f32 {
        grid::row_items(row, self.items.len())
            .map(|i| self.card_height(i))
            .fold(0.0, f32::max)
    }

    /// Realise the tile for item `index`.
    pub fn tile(&self, index: usize) -> Option<Tile<'a>> {
        let item = self.items.get(index)?;

        let background = match Argb::parse(&item.color) {
            Ok(c) => c,
            Err(err) => {
                tracing::debug!("tile {index} ({}): {err}; using fallback", item.name);
                Theme::FALLBACK_TILE_COLOR
            }
        };

        Some(Tile {
            index,
            label: &item.name,
            font_size: positive_or(item.font_size, DEFAULT_FONT_SIZE),
            card_height: positive_or(item.card_height, DEFAULT_CARD_HEIGHT),
            background,
            outline: match item.shape {
                Shape::Circle => Outline::Circular,
                Shape::Rectangle => Outline::Rectangular,
            },
            label_color: Argb::WHITE,
        })
    }
}

fn positive_or(value: f32, fallback: f32) -> f32 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

impl Tile<'_> {
    pub fn tap_message(&self) -> String {
        format!("{} clicked", self.label)
    }

    /// Fire the tile's tap notification.
    pub fn tap(&self, notifier: &dyn Notifier) {
        notifier.notify(self.tap_message());
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::RefCell;

    /// Records every notification it receives.
    #[derive(Default)]
    pub struct RecordingNotifier {
        pub messages: RefCell<Vec<String>>,
    }

    impl Notifier for RecordingNotifier {
        fn notify(&self, message: String) {
            self.messages.borrow_mut().push(message);
        }
    }

    fn items() -> Vec<ItemData> {
        vec![
            ItemData::new("circle", "#00ff00", "Item0", 180.0, 32.0),
            ItemData::new("triangle", "#80ff0000", "Item1", 90.0, 12.0),
            ItemData::new("", "not-a-colour", "Item2", -5.0, f32::NAN),
        ]
    }

    #[test]
    fn tile_mirrors_item() {
        let items = items();
        let grid = GridNode::new(&items);
        let tile = grid.tile(0).unwrap();
        assert_eq!(tile.label, "Item0");
        assert_eq!(tile.outline, Outline::Circular);
        assert_eq!(tile.background, Argb::opaque(0, 0xFF, 0));
        assert_eq!(tile.card_height, 180.0);
        assert_eq!(tile.font_size, 32.0);
        assert_eq!(tile.label_color, Argb::WHITE);
    }

    #[test]
    fn unrecognised_shapes_are_rectangular() {
        let items = items();
        let grid = GridNode::new(&items);
        assert_eq!(grid.tile(1).unwrap().outline, Outline::Rectangular);
        assert_eq!(grid.tile(2).unwrap().outline, Outline::Rectangular);
    }

    #[test]
    fn bad_values_fall_back_per_tile() {
        let items = items();
        let grid = GridNode::new(&items);
        let tile = grid.tile(2).unwrap();
        assert_eq!(tile.background, Theme::FALLBACK_TILE_COLOR);
        assert_eq!(tile.card_height, DEFAULT_CARD_HEIGHT);
        assert_eq!(tile.font_size, DEFAULT_FONT_SIZE);
        // Siblings are untouched.
        assert_eq!(grid.tile(1).unwrap().background, Argb::from_u32(0x80FF_0000));
    }

    #[test]
    fn row_height_is_tallest_card() {
        let items = items();
        let grid = GridNode::new(&items);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.row_height(0), 180.0);
        assert_eq!(grid.row_height(1), DEFAULT_CARD_HEIGHT);
        assert_eq!(grid.row_height(2), 0.0);
    }

    #[test]
    fn out_of_range_tile_is_none() {
        let items = items();
        assert!(GridNode::new(&items).tile(3).is_none());
        assert!(GridNode::new(&[]).tile(0).is_none());
    }

    #[test]
    fn tapping_notifies_once_with_name() {
        let items = items();
        let grid = GridNode::new(&items);
        let notifier = RecordingNotifier::default();
        grid.tile(1).unwrap().tap(&notifier);
        assert_eq!(*notifier.messages.borrow(), ["Item1 clicked"]);
    }
}
