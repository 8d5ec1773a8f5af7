// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - serve: run the gas endpoint server instead of the dashboard
// - config --show: Display effective configuration
// - config --reset: Regenerate config file with defaults
// - config --path: Show config file path

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};
use std::io::Write;

/// Gas Gauge - live gas price telemetry in the terminal
#[derive(Parser)]
#[command(name = "gasgauge")]
#[command(version = VERSION)]
#[command(about = "Live gas price dashboard and endpoint server", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve /api/gas, the embed metadata and the app manifest
    Serve,

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// What main should do after argument parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Run the dashboard (TUI or headless)
    Dashboard,
    /// Run the endpoint server
    Serve,
    /// A command was handled; exit
    Done,
}

/// Handle CLI commands and pick the run mode
pub fn handle_cli() -> Mode {
    mode_for(Cli::parse())
}

fn mode_for(cli: Cli) -> Mode {
    match cli.command {
        None => Mode::Dashboard,
        Some(Commands::Serve) => Mode::Serve,
        Some(Commands::Config { show, reset, path }) => {
            if path {
                handle_config_path();
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset();
            } else {
                // No flag provided, show help
                println!("Usage: gasgauge config [--show|--reset|--path]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --reset   Reset config file to defaults");
                println!("  --path    Show config file path");
            }
            Mode::Done
        }
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("endpoint_url = {:?}", config.endpoint_url);
    println!("refresh = {:?}", config.refresh.label());
    println!("app_name = {:?}", config.app_name);
    println!("share_url = {:?}", config.share_url);
    println!("request_timeout_secs = {}", config.request_timeout_secs);
    println!("tui = {}", config.enable_tui);
    println!("demo = {}", config.demo_mode);
    println!();
    println!("[server]");
    println!("bind_addr = {:?}", config.server.bind_addr.to_string());
    println!("rpc_url = {:?}", config.server.rpc_url);
    println!("chain = {:?}", config.server.chain);
    println!(
        "manifest_path = {:?}",
        config.server.manifest_path.display().to_string()
    );
    println!();
    println!("[host]");
    println!(
        "share_command = {:?}",
        config.host.share_command.as_deref().unwrap_or("")
    );
    println!(
        "add_app_command = {:?}",
        config.host.add_app_command.as_deref().unwrap_or("")
    );
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!(
        "file_dir = {:?}",
        config.logging.file_dir.display().to_string()
    );
    println!("file_rotation = {:?}", config.logging.file_rotation.as_str());
    println!("file_prefix = {:?}", config.logging.file_prefix);

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            eprintln!("Error creating directory: {}", e);
            std::process::exit(1);
        }
    }

    if let Err(e) = std::fs::write(&path, Config::default().to_toml()) {
        eprintln!("Error writing config: {}", e);
        std::process::exit(1);
    }

    println!("Config reset to defaults: {}", path.display());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_no_subcommand_runs_dashboard() {
        assert_eq!(mode_for(parse(&["gasgauge"])), Mode::Dashboard);
    }

    #[test]
    fn test_serve_subcommand() {
        assert_eq!(mode_for(parse(&["gasgauge", "serve"])), Mode::Serve);
    }

    #[test]
    fn test_config_flags_parse() {
        let cli = parse(&["gasgauge", "config", "--path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                path: true,
                show: false,
                reset: false
            })
        ));
    }

    #[test]
    fn test_unknown_subcommand_rejected() {
        assert!(Cli::try_parse_from(["gasgauge", "deploy"]).is_err());
    }
}
