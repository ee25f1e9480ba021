//! Two-column tile grid with row scrolling.
//!
//! ## Architecture
//!
//! * **Geometry** (`TileGeometry`, `GridGeometry`, `grid_geometry`): pure
//!   layout math shared between the widget (drawing) and the input handler
//!   (hit-testing).  Only rows from the scroll offset down to the bottom of
//!   the viewport are measured.
//! * **Widget** (`GridWidget`): realises the visible tiles and draws each
//!   one as a bordered card with a centred label.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    text::Line,
    widgets::{Block, BorderType, Borders, Paragraph, StatefulWidget, Widget},
};

use crate::core::grid::{self, COLUMNS};

use super::node::{GridNode, Outline, Tile};
use super::theme::Theme;

// ─── constants ──────────────────────────────────────────────────

/// Blank columns between the two grid columns.
const COLUMN_GAP: u16 = 1;
/// Smallest card that still has room for a label inside its border.
const MIN_CARD_ROWS: u16 = 3;

// ─── metrics ────────────────────────────────────────────────────

/// How logical pixels map onto terminal cells.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileMetrics {
    /// Logical pixels per terminal row.
    pub px_per_row: f32,
    /// Labels at or above this size are drawn bold.
    pub large_font_px: f32,
}

impl Default for TileMetrics {
    fn default() -> Self {
        Self {
            px_per_row: 20.0,
            large_font_px: 24.0,
        }
    }
}

impl TileMetrics {
    /// Terminal rows for a card of `height_px` logical pixels.
    pub fn card_rows(&self, height_px: f32) -> u16 {
        let rows = (height_px / self.px_per_row.max(1.0)).ceil();
        (rows.min(u16::MAX as f32) as u16).max(MIN_CARD_ROWS)
    }
}

// ─── state ──────────────────────────────────────────────────────

/// Per-grid scroll position and keyboard selection.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GridState {
    /// First visible grid row.
    pub offset: usize,
    /// Selected item index, if any.
    pub selected: Option<usize>,
}

impl GridState {
    pub fn scroll_by(&mut self, delta: isize, max_scroll: usize) {
        self.offset = self.offset.saturating_add_signed(delta).min(max_scroll);
    }

    /// Move the selection by `delta` items, clamped to `[0, len)`.
    pub fn move_selection(&mut self, delta: isize, len: usize) {
        if len == 0 {
            self.selected = None;
            return;
        }
        let next = match self.selected {
            Some(current) => {
                let target = current as isize + delta;
                if target < 0 || target >= len as isize {
                    current
                } else {
                    target as usize
                }
            }
            None => 0,
        };
        self.selected = Some(next.min(len - 1));
    }
}

// ─── geometry ───────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGeometry {
    pub index: usize,
    /// Card outline, clipped to the viewport.
    pub card_rect: Rect,
    /// Inside the border; the tile's only hit target.
    pub label_rect: Rect,
    /// True when the card is cut off by the bottom of the viewport.
    pub is_partial: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridGeometry {
    pub tiles: Vec<TileGeometry>,
    /// Offset actually used after clamping.
    pub offset: usize,
    /// Largest offset at which the last row is fully visible.
    pub max_scroll: usize,
    /// Rows at least partly drawn.
    pub visible_rows: usize,
    pub total_rows: usize,
}

impl GridGeometry {
    /// Item whose label area contains the given cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<usize> {
        let pos = Position::new(column, row);
        self.tiles
            .iter()
            .find(|t| t.label_rect.contains(pos))
            .map(|t| t.index)
    }

    pub fn tile(&self, index: usize) -> Option<&TileGeometry> {
        self.tiles.iter().find(|t| t.index == index)
    }

    /// True when item `index` is drawn in full.
    pub fn fully_shows(&self, index: usize) -> bool {
        self.tile(index).is_some_and(|t| !t.is_partial)
    }
}

/// Lay out the rows of `node` that fall inside `area`, starting at
/// `requested_offset` (clamped).
pub fn grid_geometry(
    area: Rect,
    node: &GridNode<'_>,
    requested_offset: usize,
    metrics: &TileMetrics,
) -> GridGeometry {
    let total_rows = node.row_count();
    let row_rows = |row: usize| metrics.card_rows(node.row_height(row));

    // Walk backwards from the last row while the rows still fit.
    let max_scroll = {
        let mut used = 0u16;
        let mut first_fitting = total_rows;
        for row in (0..total_rows).rev() {
            let needed = used.saturating_add(row_rows(row));
            if needed > area.height {
                break;
            }
            used = needed;
            first_fitting = row;
        }
        // A single row taller than the viewport still needs to be reachable.
        first_fitting.min(total_rows.saturating_sub(1))
    };
    let offset = requested_offset.min(max_scroll);

    let left_width = area.width.saturating_sub(COLUMN_GAP) / 2;
    let right_width = area.width.saturating_sub(COLUMN_GAP).saturating_sub(left_width);
    let column_x = [area.x, area.x + left_width + COLUMN_GAP];
    let column_w = [left_width, right_width];

    let bottom = area.y.saturating_add(area.height);
    let mut tiles = Vec::new();
    let mut visible_rows = 0;
    let mut y = area.y;

    for row in offset..total_rows {
        let remaining = bottom.saturating_sub(y);
        if remaining == 0 {
            break;
        }
        // Each card keeps its own height; the row advances by the tallest.
        for index in grid::row_items(row, node.len()) {
            let col = index % COLUMNS;
            let own = metrics.card_rows(node.card_height(index));
            let card_rect = Rect::new(column_x[col], y, column_w[col], own.min(remaining));
            let inner = Rect::new(
                card_rect.x.saturating_add(1),
                card_rect.y.saturating_add(1),
                card_rect.width.saturating_sub(2),
                own.saturating_sub(2),
            );
            tiles.push(TileGeometry {
                index,
                card_rect,
                label_rect: inner.intersection(card_rect),
                is_partial: own > remaining,
            });
        }

        visible_rows += 1;
        y = y.saturating_add(row_rows(row).min(remaining));
    }

    GridGeometry {
        tiles,
        offset,
        max_scroll,
        visible_rows,
        total_rows,
    }
}

// ─── widget ─────────────────────────────────────────────────────

/// Draws a [`GridNode`], realising only the tiles that are on screen.
pub struct GridWidget<'a> {
    node: GridNode<'a>,
    metrics: TileMetrics,
    focused: bool,
}

impl<'a> GridWidget<'a> {
    pub fn new(node: GridNode<'a>, metrics: TileMetrics) -> Self {
        Self {
            node,
            metrics,
            focused: false,
        }
    }

    /// Highlight the selected tile (only the focused grid shows its selection).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }
}

impl StatefulWidget for GridWidget<'_> {
    type State = GridState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if area.is_empty() || self.node.is_empty() {
            return;
        }

        let geometry = grid_geometry(area, &self.node, state.offset, &self.metrics);
        state.offset = geometry.offset;

        for geom in &geometry.tiles {
            let Some(tile) = self.node.tile(geom.index) else {
                continue;
            };
            let selected = self.focused && state.selected == Some(geom.index);
            render_tile(&tile, geom, selected, &self.metrics, buf);
        }
    }
}

fn render_tile(
    tile: &Tile<'_>,
    geom: &TileGeometry,
    selected: bool,
    metrics: &TileMetrics,
    buf: &mut Buffer,
) {
    let border_type = match tile.outline {
        Outline::Circular => BorderType::Rounded,
        Outline::Rectangular => BorderType::Plain,
    };
    let border_style = if selected {
        Theme::selected_border_style(tile.background)
    } else {
        Theme::tile_border_style(tile.background)
    };
    // A clipped card loses its bottom border so it reads as continuing below.
    let borders = if geom.is_partial {
        Borders::TOP | Borders::LEFT | Borders::RIGHT
    } else {
        Borders::ALL
    };

    Block::default()
        .borders(borders)
        .border_type(border_type)
        .border_style(border_style)
        .style(Theme::tile_style(tile.background))
        .render(geom.card_rect, buf);

    let label_area = geom.label_rect;
    if label_area.is_empty() {
        return;
    }
    // Centre vertically within the full (unclipped) inner height.
    let full_inner = metrics.card_rows(tile.card_height).saturating_sub(2);
    let mid_y = geom.card_rect.y + 1 + full_inner.saturating_sub(1) / 2;
    if mid_y >= label_area.y + label_area.height {
        return;
    }

    let large = tile.font_size >= metrics.large_font_px;
    Paragraph::new(Line::from(tile.label))
        .alignment(Alignment::Center)
        .style(Theme::tile_label_style(tile.label_color, tile.background, large))
        .render(Rect::new(label_area.x, mid_y, label_area.width, 1), buf);
}
