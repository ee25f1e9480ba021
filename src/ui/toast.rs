//! Transient notification overlay, drawn just above the status bar.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use super::theme::Theme;

pub struct ToastWidget<'a> {
    pub message: &'a str,
}

impl Widget for ToastWidget<'_> {
    /// `area` is the region the toast may cover; it is placed bottom-centre.
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 5 || area.height < 3 {
            return;
        }
        let width = (self.message.chars().count() as u16)
            .saturating_add(4)
            .min(area.width);
        let x = area.x + (area.width - width) / 2;
        let y = area.y + area.height - 3;
        let popup = Rect::new(x, y, width, 3);
        Clear.render(popup, buf);

        Paragraph::new(self.message)
            .alignment(Alignment::Center)
            .style(Theme::toast_style())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Theme::toast_border_style()),
            )
            .render(popup, buf);
    }
}
