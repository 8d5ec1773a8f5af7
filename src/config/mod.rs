//! Configuration for the dashboard and the endpoint server
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/gasgauge/config.toml)
//! 3. Built-in defaults (lowest priority)

use crate::gas::RefreshInterval;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod endpoints;
mod observability;
mod serialization;

#[cfg(test)]
mod tests;

// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use endpoints::{FileHost, FileServer, HostConfig, ServerConfig};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:3000/api/gas";
const DEFAULT_APP_NAME: &str = "Base Gas Checker";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Gas endpoint the dashboard polls
    pub endpoint_url: String,

    /// Initial auto-refresh interval
    pub refresh: RefreshInterval,

    /// Title used in the copy text
    pub app_name: String,

    /// Public URL appended to the share text (empty = none)
    pub share_url: String,

    /// Per-request timeout for the fetcher
    pub request_timeout_secs: u64,

    /// Whether to enable the TUI (can be disabled for headless mode)
    pub enable_tui: bool,

    /// Demo mode: synthetic readings instead of the HTTP endpoint
    pub demo_mode: bool,

    /// `gasgauge serve` settings
    pub server: ServerConfig,

    /// Host bridge commands for share and add-to-apps
    pub host: HostConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: DEFAULT_ENDPOINT.to_string(),
            refresh: RefreshInterval::default(),
            app_name: DEFAULT_APP_NAME.to_string(),
            share_url: String::new(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            enable_tui: true,
            demo_mode: false,
            server: ServerConfig::default(),
            host: HostConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub endpoint_url: Option<String>,
    pub refresh: Option<String>,
    pub app_name: Option<String>,
    pub share_url: Option<String>,
    pub request_timeout_secs: Option<u64>,

    /// Optional [server] section
    pub server: Option<FileServer>,

    /// Optional [host] section
    pub host: Option<FileHost>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/gasgauge/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("gasgauge").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// Exits the process if the file exists but cannot be read or parsed.
    /// A broken config fails fast instead of silently running on defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Invalid boolean values (use true/false)");
                    eprintln!("    - Typos in section names\n");
                    eprintln!("  To reset, run `gasgauge config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        Self::from_sources(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // Endpoint: env > file > default
        let endpoint_url = env("GASGAUGE_ENDPOINT")
            .or(file.endpoint_url)
            .unwrap_or(defaults.endpoint_url);

        // Refresh interval: env > file > default (unknown values fall back)
        let refresh = env("GASGAUGE_REFRESH")
            .or(file.refresh)
            .and_then(|s| {
                let parsed = RefreshInterval::parse(&s);
                if parsed.is_none() {
                    eprintln!("Ignoring unknown refresh interval {:?}", s);
                }
                parsed
            })
            .unwrap_or(defaults.refresh);

        let app_name = file.app_name.unwrap_or(defaults.app_name);

        // Share URL: env > file > default (empty)
        let share_url = env("GASGAUGE_APP_URL")
            .or(file.share_url)
            .unwrap_or(defaults.share_url);

        let request_timeout_secs = file
            .request_timeout_secs
            .unwrap_or(defaults.request_timeout_secs);

        // TUI toggle: env only (runtime flag)
        let enable_tui = env("GASGAUGE_NO_TUI")
            .map(|v| v != "1" && v.to_lowercase() != "true")
            .unwrap_or(true);

        // Demo mode: env only (runtime flag)
        let demo_mode = env("GASGAUGE_DEMO")
            .map(|v| v == "1" || v.to_lowercase() == "true")
            .unwrap_or(false);

        let server = ServerConfig::from_file(
            file.server,
            env("GASGAUGE_BIND"),
            env("GASGAUGE_RPC_URL"),
            &share_url,
        );
        let host = HostConfig::from_file(file.host);
        let logging = LoggingConfig::from_file(file.logging);

        Self {
            endpoint_url,
            refresh,
            app_name,
            share_url,
            request_timeout_secs,
            enable_tui,
            demo_mode,
            server,
            host,
            logging,
        }
    }
}
