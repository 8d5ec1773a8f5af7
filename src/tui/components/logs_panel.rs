//! Logs panel component
//!
//! Shows the most recent captured log lines, colour-coded by level. Logs
//! are captured in memory so they never break through the alternate screen.

use crate::logging::LogEntry;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, List, ListItem},
    Frame,
};
use unicode_width::UnicodeWidthChar;

pub fn render(f: &mut Frame, area: Rect, entries: &[LogEntry], theme: &Theme) {
    let width = area.width.saturating_sub(2) as usize;

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            let line = format!(
                "{} {:<5} {}",
                entry.timestamp.format("%H:%M:%S"),
                entry.level.as_str(),
                entry.message
            );
            ListItem::new(truncate_to_width(&line, width))
                .style(Style::default().fg(theme.log_level(entry.level)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Logs "),
    );

    f.render_widget(list, area);
}

/// Cut `s` to at most `max` display columns, ending with '…' when cut
fn truncate_to_width(s: &str, max: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    if total <= max {
        return s.to_string();
    }

    let budget = max.saturating_sub(1);
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push('…');
    out
}
