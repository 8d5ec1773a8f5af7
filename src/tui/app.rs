// TUI application state
//
// Wraps the running Session with what only the terminal view needs: the
// theme, the captured logs, the spinner frame and the quit flag.

use super::theme::Theme;
use crate::gas::{Dashboard, RefreshInterval};
use crate::logging::{LogBuffer, LogEntry};
use crate::monitor::{self, Session};
use std::time::Instant;

/// Spinner frames shown while a fetch is in flight
const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];

/// Number of log lines shown in the log strip
pub const LOG_LINES: usize = 4;

/// Main application state for the TUI
pub struct App {
    pub session: Session,
    pub theme: Theme,
    pub log_buffer: LogBuffer,
    pub should_quit: bool,
    pub start_time: Instant,
    frame: usize,
}

impl App {
    pub fn new(session: Session, log_buffer: LogBuffer) -> Self {
        Self {
            session,
            theme: Theme::default(),
            log_buffer,
            should_quit: false,
            start_time: Instant::now(),
            frame: 0,
        }
    }

    /// Snapshot of everything the dashboard draws
    pub fn dashboard(&self) -> Dashboard {
        self.session.dashboard(monitor::now_ms())
    }

    pub fn interval(&self) -> RefreshInterval {
        self.session.interval()
    }

    pub fn is_fetching(&self) -> bool {
        self.session.monitor().is_fetching()
    }

    pub fn recent_logs(&self) -> Vec<LogEntry> {
        self.log_buffer.recent(LOG_LINES)
    }

    /// Advance the spinner and expire notices
    pub fn tick(&mut self) {
        self.frame = self.frame.wrapping_add(1);
        self.session.tick(Instant::now());
    }

    pub fn spinner_char(&self) -> char {
        SPINNER[self.frame % SPINNER.len()]
    }

    /// Select an interval by its position in the option list
    pub fn select_interval(&mut self, index: usize) {
        if let Some(interval) = RefreshInterval::from_index(index) {
            self.change_interval(interval);
        }
    }

    pub fn next_interval(&mut self) {
        self.change_interval(self.interval().next());
    }

    pub fn prev_interval(&mut self) {
        self.change_interval(self.interval().prev());
    }

    fn change_interval(&mut self, interval: RefreshInterval) {
        tracing::info!("Refresh interval: {}", interval.label());
        self.session.set_interval(interval);
    }

    /// Uptime as "Hh Mm Ss" / "Mm Ss"
    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
        if h > 0 {
            format!("{}h {}m {}s", h, m, s)
        } else {
            format!("{}m {}s", m, s)
        }
    }
}
