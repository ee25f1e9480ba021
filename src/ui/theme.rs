//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

use crate::core::color::Argb;

/// Central theme. Change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    /// Background for tiles whose colour string doesn't parse.
    pub const FALLBACK_TILE_COLOR: Argb = Argb::opaque(0x44, 0x44, 0x44);

    pub fn rgb(color: Argb) -> Color {
        let (r, g, b) = color.composite_over_black();
        Color::Rgb(r, g, b)
    }

    // ── title bar ──────────────────────────────────────────────
    pub fn title_bar_style() -> Style {
        Style::default()
            .bg(Color::Red)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    // ── grid tiles ─────────────────────────────────────────────
    pub fn tile_style(background: Argb) -> Style {
        Style::default().bg(Self::rgb(background))
    }

    pub fn tile_border_style(background: Argb) -> Style {
        Style::default().bg(Self::rgb(background)).fg(Color::Gray)
    }

    pub fn selected_border_style(background: Argb) -> Style {
        Style::default()
            .bg(Self::rgb(background))
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    }

    pub fn tile_label_style(label: Argb, background: Argb, large: bool) -> Style {
        let style = Style::default().fg(Self::rgb(label)).bg(Self::rgb(background));
        if large {
            style.add_modifier(Modifier::BOLD)
        } else {
            style
        }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn toast_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::White)
    }

    pub fn toast_border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn message_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn error_style() -> Style {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    }

    pub fn hint_style() -> Style {
        Style::default().fg(Color::DarkGray)
    }
}
