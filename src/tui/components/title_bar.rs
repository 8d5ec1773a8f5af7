// Title bar component
//
// Renders the app title with the chain name, a refresh spinner while a fetch
// is in flight, and the mood badge on the right.

use crate::gas::Dashboard;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, dash: &Dashboard) {
    let theme = &app.theme;

    let chain = dash
        .chain
        .as_deref()
        .map(|c| format!(" ──── {}", c))
        .unwrap_or_default();

    let refreshing = if app.is_fetching() {
        format!(" {} Refreshing…", app.spinner_char())
    } else {
        String::new()
    };

    let title = Paragraph::new(format!(" ⛽ {}{}{}", app.session.app_name(), chain, refreshing))
        .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.title))
                .title_top(
                    Line::from(Span::styled(
                        format!(" {} ", dash.mood),
                        Style::default()
                            .fg(theme.background)
                            .bg(theme.tone(dash.mood.tone()))
                            .add_modifier(Modifier::BOLD),
                    ))
                    .right_aligned(),
                ),
        );

    f.render_widget(title, area);
}
