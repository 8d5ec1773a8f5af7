// Gauge panel
//
// Current value in large type, with a gauge showing where it sits between
// the lowest and highest recent sample.

use crate::gas::Dashboard;
use crate::tui::theme::Theme;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub struct GaugePanel;

impl GaugePanel {
    pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard, theme: &Theme) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(Style::default().fg(theme.border))
            .title(" Gas price ");
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(inner);

        let tone = theme.tone(dash.mood.tone());
        let value = Paragraph::new(Line::from(vec![
            Span::styled(
                format!(" {}", dash.formatted),
                Style::default().fg(tone).add_modifier(Modifier::BOLD),
            ),
            Span::styled(" gwei", Style::default().fg(theme.muted)),
        ]));
        frame.render_widget(value, rows[0]);

        let label = match dash.range_text() {
            Some(range) => format!("low {} high", range.replace(" / ", " ─── ")),
            None => "waiting for samples".to_string(),
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(tone).bg(theme.border))
            .ratio(dash.gauge)
            .label(Span::styled(label, Style::default().fg(theme.foreground)));
        frame.render_widget(gauge, rows[2]);
    }
}
