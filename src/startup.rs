// Startup module - displays the banner and what this run is wired to
//
// Printed to stdout before the TUI takes over the screen, then mirrored
// into the log buffer so it shows up in the log strip too.

use crate::cli::Mode;
use crate::config::{Config, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// One "label: value" line of the banner
struct StatusLine {
    label: &'static str,
    value: String,
    active: bool,
}

fn status_lines(config: &Config, mode: Mode) -> Vec<StatusLine> {
    if mode == Mode::Serve {
        return vec![
            StatusLine {
                label: "listen",
                value: format!("http://{}", config.server.bind_addr),
                active: true,
            },
            StatusLine {
                label: "rpc",
                value: config.server.rpc_url.clone(),
                active: true,
            },
            StatusLine {
                label: "manifest",
                value: config.server.manifest_path.display().to_string(),
                active: config.server.manifest_path.exists(),
            },
        ];
    }

    let source = if config.demo_mode {
        "demo readings".to_string()
    } else {
        config.endpoint_url.clone()
    };

    vec![
        StatusLine {
            label: "source",
            value: source,
            active: true,
        },
        StatusLine {
            label: "refresh",
            value: config.refresh.label().to_string(),
            active: !config.refresh.is_off(),
        },
        StatusLine {
            label: "host",
            value: if config.host.is_attached() {
                "commands configured".to_string()
            } else {
                "detached".to_string()
            },
            active: config.host.is_attached(),
        },
        StatusLine {
            label: "ui",
            value: if config.enable_tui {
                "terminal".to_string()
            } else {
                "headless".to_string()
            },
            active: config.enable_tui,
        },
    ]
}

/// Print the startup banner
pub fn print_startup(config: &Config, mode: Mode) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}Gas Gauge{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}{}{RESET}", config.app_name);
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    for line in status_lines(config, mode) {
        let icon = if line.active {
            format!("{GREEN}✓{RESET}")
        } else {
            format!("{DIM}○{RESET}")
        };
        println!("    {icon} {:<10} {DIM}{}{RESET}", line.label, line.value);
    }
    println!();

    if config.demo_mode && mode == Mode::Dashboard {
        println!("  {YELLOW}▸{RESET} {YELLOW}Demo mode active{RESET} {DIM}(synthetic readings){RESET}");
    } else if mode == Mode::Serve {
        println!(
            "  {MAGENTA}▸{RESET} Serving on {BOLD}{}{RESET}",
            config.server.bind_addr
        );
    }
    println!();
}

/// Mirror the banner into the log
pub fn log_startup(config: &Config, mode: Mode) {
    tracing::info!("Gas Gauge v{}", VERSION);

    for line in status_lines(config, mode) {
        let icon = if line.active { "✓" } else { "○" };
        tracing::info!("  {} {} - {}", icon, line.label, line.value);
    }

    if config.demo_mode && mode == Mode::Dashboard {
        tracing::info!("▸ Demo mode active (synthetic readings)");
    }
}
