// UI rendering - lays out the dashboard and draws each component
//
// One derived Dashboard snapshot per frame; components never read the
// monitor directly.

use super::app::{App, LOG_LINES};
use super::layout::Breakpoint;
use super::components::{
    controls_bar, gauge_panel::GaugePanel, logs_panel, spark_panel::SparkPanel,
    stats_panel::StatsPanel, title_bar, toast,
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

/// Main draw function
pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let dash = app.dashboard();

    f.render_widget(
        Block::default().style(Style::default().bg(app.theme.background)),
        area,
    );

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),                     // Title
            Constraint::Length(6),                     // Gauge + stats
            Constraint::Min(6),                        // Sparkline
            Constraint::Length(LOG_LINES as u16 + 2), // Logs
            Constraint::Length(3),                     // Controls
        ])
        .split(area);

    title_bar::render(f, rows[0], app, &dash);

    if Breakpoint::from_width(area.width).at_least(Breakpoint::Normal) {
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(rows[1]);
        GaugePanel::render(f, middle[0], &dash, &app.theme);
        StatsPanel::render(f, middle[1], &dash, &app.theme);
    } else {
        GaugePanel::render(f, rows[1], &dash, &app.theme);
    }

    SparkPanel::render(f, rows[2], &dash, &app.theme);
    logs_panel::render(f, rows[3], &app.recent_logs(), &app.theme);
    controls_bar::render(f, rows[4], app, &dash);

    if let Some(notice) = app.session.monitor().notice() {
        toast::render(f, area, notice, &app.theme);
    }
}
