//! Toast notification component
//!
//! Renders the current status notice in the bottom-right corner on top of
//! all other content. Expiry is owned by the monitor; this only draws.

use crate::actions::Notice;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Render `notice` in the bottom-right corner
///
/// Uses the `Clear` widget so the toast is visible on top of other content.
pub fn render(f: &mut Frame, area: Rect, notice: &Notice, theme: &Theme) {
    // 2 chars of padding each side, border included
    let width = (notice.message.width() as u16 + 4).min(area.width.saturating_sub(4));
    let height = 3;

    let x = area.right().saturating_sub(width + 2);
    let y = area.bottom().saturating_sub(height + 2);
    let toast_area = Rect::new(x, y, width, height).intersection(area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(Style::default().fg(theme.notice(notice.kind)))
        .style(Style::default().bg(theme.background));

    let text = Paragraph::new(notice.message.as_str())
        .alignment(Alignment::Center)
        .style(Style::default().fg(theme.foreground))
        .block(block);

    f.render_widget(Clear, toast_area);
    f.render_widget(text, toast_area);
}
