//! Fixed-height header drawn for a `TopBar` component.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    text::Line,
    widgets::{Paragraph, Widget},
};

use super::node::TitleBarNode;
use super::theme::Theme;

/// Rows taken by a title bar in the document stack.
pub const TITLE_BAR_HEIGHT: u16 = 3;

impl Widget for TitleBarNode<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.is_empty() {
            return;
        }
        buf.set_style(area, Theme::title_bar_style());

        let middle = Rect::new(area.x, area.y + (area.height - 1) / 2, area.width, 1);
        Paragraph::new(Line::from(self.title))
            .alignment(Alignment::Center)
            .style(Theme::title_bar_style())
            .render(middle, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::{Color, Modifier};

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn title_is_centered_bold_on_red() {
        let area = Rect::new(0, 0, 20, TITLE_BAR_HEIGHT);
        let mut buf = Buffer::empty(area);
        TitleBarNode { title: "SDUI" }.render(area, &mut buf);

        assert_eq!(row_text(&buf, 1), "        SDUI        ");
        let cell = &buf[(8, 1)];
        assert_eq!(cell.bg, Color::Red);
        assert!(cell.modifier.contains(Modifier::BOLD));
        // The whole band is filled, not just the text row.
        assert_eq!(buf[(0, 0)].bg, Color::Red);
        assert_eq!(buf[(19, 2)].bg, Color::Red);
    }

    #[test]
    fn empty_title_is_a_blank_band() {
        let area = Rect::new(0, 0, 10, TITLE_BAR_HEIGHT);
        let mut buf = Buffer::empty(area);
        TitleBarNode { title: "" }.render(area, &mut buf);
        assert_eq!(row_text(&buf, 1).trim(), "");
        assert_eq!(buf[(5, 1)].bg, Color::Red);
    }
}
