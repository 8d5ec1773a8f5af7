// Controls bar
//
// Interval selector with the countdown, plus key hints. On narrow terminals
// the hints collapse to single letters.

use crate::gas::{Dashboard, RefreshInterval};
use crate::tui::app::App;
use crate::tui::layout::Breakpoint;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App, dash: &Dashboard) {
    let theme = &app.theme;
    let selected = app.interval();

    let mut selector = vec![Span::styled(" Refresh ", Style::default().fg(theme.muted))];
    for (i, option) in RefreshInterval::ALL.iter().enumerate() {
        let style = if *option == selected {
            Style::default()
                .fg(theme.background)
                .bg(theme.highlight)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.foreground)
        };
        selector.push(Span::styled(format!(" {}:{} ", i, option.label()), style));
    }
    selector.push(Span::styled(
        format!("  {}", dash.countdown_text(selected)),
        Style::default().fg(theme.muted),
    ));

    let hints = if Breakpoint::from_width(area.width).at_least(Breakpoint::Normal) {
        " r refresh │ c copy │ s share │ a add to apps │ ←/→ interval │ q quit"
    } else {
        " r │ c │ s │ a │ ←/→ │ q"
    };

    let bar = Paragraph::new(vec![
        Line::from(selector),
        Line::from(Span::styled(hints, Style::default().fg(theme.muted))),
    ])
    .block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(theme.border))
            .title_top(Line::from(format!(" up {} ", app.uptime())).right_aligned()),
    );

    f.render_widget(bar, area);
}
