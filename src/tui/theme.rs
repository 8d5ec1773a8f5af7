// Theme for the TUI
//
// One palette for every widget. Mood colours come from the mood's tone so
// the badge, the gauge and the sparkline always agree.

use crate::actions::NoticeKind;
use crate::gas::derive::Tone;
use crate::logging::LogLevel;
use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Complete theme definition with all UI colors
#[derive(Debug, Clone)]
pub struct Theme {
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub border_type: BorderType,
    pub title: Color,
    pub highlight: Color,

    // Tones
    pub good: Color,
    pub neutral: Color,
    pub bad: Color,

    // Notices
    pub warning: Color,
    pub error: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            background: Color::Rgb(11, 13, 18),
            foreground: Color::Rgb(230, 233, 239),
            muted: Color::Rgb(128, 135, 150),
            border: Color::Rgb(52, 58, 72),
            border_type: BorderType::Rounded,
            title: Color::Rgb(82, 139, 255),
            highlight: Color::Rgb(82, 139, 255),

            good: Color::Rgb(52, 211, 153),
            neutral: Color::Rgb(148, 163, 184),
            bad: Color::Rgb(248, 113, 113),

            warning: Color::Rgb(251, 191, 36),
            error: Color::Rgb(248, 113, 113),

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
        }
    }

    pub fn tone(&self, tone: Tone) -> Color {
        match tone {
            Tone::Good => self.good,
            Tone::Neutral => self.neutral,
            Tone::Bad => self.bad,
        }
    }

    pub fn notice(&self, kind: NoticeKind) -> Color {
        match kind {
            NoticeKind::Success => self.good,
            NoticeKind::Warning => self.warning,
            NoticeKind::Error => self.error,
        }
    }

    pub fn log_level(&self, level: LogLevel) -> Color {
        match level {
            LogLevel::Error => self.log_error,
            LogLevel::Warn => self.log_warn,
            LogLevel::Info => self.log_info,
            LogLevel::Debug | LogLevel::Trace => self.log_debug,
        }
    }
}
