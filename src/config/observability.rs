//! `[logging]` section: filter level and the optional JSON log file

use serde::Deserialize;
use std::path::PathBuf;

const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// How often the JSON log file rolls over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogRotation {
    Hourly,
    #[default]
    Daily,
    /// Single file, appended forever
    Never,
}

impl LogRotation {
    /// "hourly" / "daily" / "never", case-insensitive
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::Daily => "daily",
            Self::Never => "never",
        }
    }
}

/// Where and how much gasgauge logs
///
/// The level only applies to this crate's own targets; `RUST_LOG` replaces
/// the whole filter when set.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// Also write JSON lines to `file_dir` (TUI buffer / stdout are always on)
    pub file_enabled: bool,
    pub file_dir: PathBuf,
    pub file_rotation: LogRotation,
    /// File name stem, e.g. "gasgauge" -> "gasgauge.2025-01-15"
    pub file_prefix: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_enabled: false,
            file_dir: PathBuf::from("./logs"),
            file_rotation: LogRotation::Daily,
            file_prefix: "gasgauge".to_string(),
        }
    }
}

/// `[logging]` as written in the config file
#[derive(Debug, Deserialize, Default)]
pub struct FileLogging {
    pub level: Option<String>,
    pub file_enabled: Option<bool>,
    pub file_dir: Option<String>,
    pub file_rotation: Option<String>,
    pub file_prefix: Option<String>,
}

impl LoggingConfig {
    /// Merge the file section over the defaults
    ///
    /// Unknown levels and rotations keep the default and print a warning;
    /// tracing is not up yet when config loads.
    pub fn from_file(file: Option<FileLogging>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let level = match file.level {
            Some(level) if LEVELS.contains(&level.trim().to_ascii_lowercase().as_str()) => {
                level.trim().to_ascii_lowercase()
            }
            Some(level) => {
                eprintln!(
                    "Warning: unknown log level {:?}, using {}",
                    level, defaults.level
                );
                defaults.level
            }
            None => defaults.level,
        };

        let file_rotation = match file.file_rotation {
            Some(s) => LogRotation::parse(&s).unwrap_or_else(|| {
                eprintln!(
                    "Warning: unknown file_rotation {:?}, using {}",
                    s,
                    defaults.file_rotation.as_str()
                );
                defaults.file_rotation
            }),
            None => defaults.file_rotation,
        };

        Self {
            level,
            file_enabled: file.file_enabled.unwrap_or(defaults.file_enabled),
            file_dir: file
                .file_dir
                .filter(|d| !d.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(defaults.file_dir),
            file_rotation,
            file_prefix: file
                .file_prefix
                .filter(|p| !p.trim().is_empty())
                .unwrap_or(defaults.file_prefix),
        }
    }
}
