//! Input handling: maps key/mouse events to state mutations.
//!
//! Layout is recomputed here from the last known terminal size, the same
//! way the draw pass does it, so hit-testing always agrees with what is on
//! screen.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};

use crate::config::Action;
use crate::core::grid::{self, COLUMNS};
use crate::ui::grid_widget::{grid_geometry, GridState, TileMetrics};
use crate::ui::layout::{stack_layout, AppLayout};
use crate::ui::node::{GridNode, Notifier, WidgetNode};
use crate::ui::renderer::render_document;

use super::state::{AppState, LoadState};

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent, notifier: &dyn Notifier) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::Reload => state.needs_reload = true,
        Action::NextGrid => focus_next_grid(state),
        Action::MoveLeft => move_selection(state, -1),
        Action::MoveRight => move_selection(state, 1),
        Action::MoveUp => move_selection(state, -(COLUMNS as isize)),
        Action::MoveDown => move_selection(state, COLUMNS as isize),
        Action::PageUp => page(state, -1),
        Action::PageDown => page(state, 1),
        Action::Tap => {
            if let Some((node, _, grid_state, _)) = focused_grid(state) {
                if let Some(tile) = grid_state.selected.and_then(|i| node.tile(i)) {
                    tile.tap(notifier);
                }
            }
        }
    }
}

// ── Keyboard helpers ────────────────────────────────────────────

/// The focused grid's node, on-screen area, state, and metrics.
fn focused_grid(state: &mut AppState) -> Option<(GridNode<'_>, Rect, &mut GridState, TileMetrics)> {
    let index = state.focused_grid?;
    let metrics = state.config.tile_metrics();
    let content = AppLayout::from_area(state.terminal_area).content_area;
    let LoadState::Ready(doc) = &state.load else {
        return None;
    };

    let nodes = render_document(doc);
    let WidgetNode::Grid(node) = *nodes.get(index)? else {
        return None;
    };
    let (_, rect) = stack_layout(content, &nodes)
        .into_iter()
        .find(|&(i, _)| i == index)?;
    let grid_state = state.grids.get_mut(index)?;
    Some((node, rect, grid_state, metrics))
}

fn move_selection(state: &mut AppState, delta: isize) {
    let Some((node, rect, grid_state, metrics)) = focused_grid(state) else {
        return;
    };
    grid_state.move_selection(delta, node.len());
    ensure_visible(&node, rect, grid_state, &metrics);
}

fn page(state: &mut AppState, direction: isize) {
    let Some((node, rect, grid_state, metrics)) = focused_grid(state) else {
        return;
    };
    let geometry = grid_geometry(rect, &node, grid_state.offset, &metrics);
    let step = geometry.visible_rows.saturating_sub(1).max(1) as isize;
    grid_state.scroll_by(direction * step, geometry.max_scroll);
}

/// Scroll so the selected tile is fully on screen (or as close as the
/// viewport allows).
fn ensure_visible(node: &GridNode<'_>, rect: Rect, grid_state: &mut GridState, metrics: &TileMetrics) {
    let Some(selected) = grid_state.selected else {
        return;
    };
    let row = grid::cell_position(selected).row;
    if row < grid_state.offset {
        grid_state.offset = row;
        return;
    }
    loop {
        let geometry = grid_geometry(rect, node, grid_state.offset, metrics);
        grid_state.offset = geometry.offset;
        if geometry.fully_shows(selected)
            || geometry.offset >= row
            || geometry.offset >= geometry.max_scroll
        {
            return;
        }
        grid_state.offset += 1;
    }
}

/// Move keyboard focus to the next non-empty grid, wrapping around.
fn focus_next_grid(state: &mut AppState) {
    let Some(doc) = state.document() else {
        return;
    };
    let candidates: Vec<usize> = render_document(doc)
        .iter()
        .enumerate()
        .filter(|(_, node)| matches!(node, WidgetNode::Grid(g) if !g.is_empty()))
        .map(|(i, _)| i)
        .collect();
    if candidates.is_empty() {
        return;
    }
    let next = match state.focused_grid {
        Some(current) => candidates
            .iter()
            .copied()
            .find(|&i| i > current)
            .unwrap_or(candidates[0]),
        None => candidates[0],
    };
    state.focused_grid = Some(next);
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.  A left click on a tile's label taps it; the wheel
/// scrolls the grid under the pointer.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent, notifier: &dyn Notifier) {
    let scroll = match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => 0,
        MouseEventKind::ScrollUp => -1,
        MouseEventKind::ScrollDown => 1,
        _ => return,
    };

    let metrics = state.config.tile_metrics();
    let content = AppLayout::from_area(state.terminal_area).content_area;
    let LoadState::Ready(doc) = &state.load else {
        return;
    };
    let nodes = render_document(doc);
    let pointer = Position::new(mouse.column, mouse.row);

    let Some((index, rect)) = stack_layout(content, &nodes)
        .into_iter()
        .find(|(_, rect)| rect.contains(pointer))
    else {
        return;
    };
    let WidgetNode::Grid(node) = nodes[index] else {
        return;
    };
    let Some(grid_state) = state.grids.get_mut(index) else {
        return;
    };
    let geometry = grid_geometry(rect, &node, grid_state.offset, &metrics);

    if scroll != 0 {
        grid_state.scroll_by(scroll, geometry.max_scroll);
        return;
    }

    let Some(hit) = geometry.hit(mouse.column, mouse.row) else {
        return;
    };
    grid_state.selected = Some(hit);
    if let Some(tile) = node.tile(hit) {
        tile.tap(notifier);
    }
    state.focused_grid = Some(index);
}
