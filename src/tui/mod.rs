// TUI module - Terminal User Interface
//
// This module manages the terminal dashboard using ratatui. It handles:
// - Terminal initialization and cleanup
// - The event loop (keyboard input, animation ticks, session events)
// - Key dispatch onto the session's actions

pub mod app;
pub mod components;
pub mod layout;
pub mod theme;
pub mod ui;

use crate::events::AppEvent;
use crate::logging::LogBuffer;
use crate::monitor::{self, Session};
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(
    session: Session,
    mut event_rx: mpsc::Receiver<AppEvent>,
    log_buffer: LogBuffer,
) -> Result<()> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new(session, log_buffer);

    let result = run_event_loop(&mut terminal, &mut app, &mut event_rx).await;

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on three sources at once:
/// 1. Keyboard input
/// 2. Animation ticks (spinner frames, notice expiry)
/// 3. Session events (clock, fetch due, fetch results, action notices)
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    event_rx: &mut mpsc::Receiver<AppEvent>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    if let Ok(Event::Key(key_event)) = event::read() {
                        handle_key_event(app, key_event);
                    }
                }
            } => {}

            _ = tick_interval.tick() => {
                app.tick();
            }

            Some(event) = event_rx.recv() => {
                app.session.handle(event, monitor::now_ms());
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Handle keyboard input
///
/// Only presses act; repeats and releases are ignored so a held key
/// fires its action once.
fn handle_key_event(app: &mut App, key_event: KeyEvent) {
    if key_event.kind != KeyEventKind::Press {
        return;
    }

    match key_event.code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            app.should_quit = true
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            tracing::debug!("Manual refresh");
            app.session.refresh();
        }
        KeyCode::Char('c') | KeyCode::Char('C') => app.session.copy(monitor::now_ms()),
        KeyCode::Char('s') | KeyCode::Char('S') => app.session.share(monitor::now_ms()),
        KeyCode::Char('a') | KeyCode::Char('A') => app.session.add_to_apps(),
        KeyCode::Char(c @ '0'..='9') => {
            if let Some(index) = c.to_digit(10) {
                app.select_interval(index as usize);
            }
        }
        KeyCode::Right | KeyCode::Tab => app.next_interval(),
        KeyCode::Left | KeyCode::BackTab => app.prev_interval(),
        _ => {}
    }
}
