// Stats panel - chain, sample count, range and last update

use crate::gas::derive::NO_VALUE;
use crate::gas::history::HISTORY_CAPACITY;
use crate::gas::Dashboard;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub struct StatsPanel;

impl StatsPanel {
    pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, theme: &Theme) {
        let row = |label: &str, value: String| {
            Line::from(vec![
                Span::styled(format!(" {:<9}", label), Style::default().fg(theme.muted)),
                Span::styled(value, Style::default().fg(theme.foreground)),
            ])
        };

        let lines = vec![
            row(
                "Chain",
                dash.chain.clone().unwrap_or_else(|| NO_VALUE.to_string()),
            ),
            row(
                "Samples",
                format!("{} / {}", dash.sample_count, HISTORY_CAPACITY),
            ),
            row(
                "Min/Max",
                dash.range_text().unwrap_or_else(|| NO_VALUE.to_string()),
            ),
            row(
                "Updated",
                dash.updated_text().unwrap_or_else(|| NO_VALUE.to_string()),
            ),
        ];

        let panel = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.border))
                .title(" Stats "),
        );
        frame.render_widget(panel, area);
    }
}
