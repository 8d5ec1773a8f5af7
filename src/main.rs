// Gas Gauge - live gas price telemetry
//
// Samples a gas price endpoint on a user-chosen interval and shows it as a
// terminal dashboard: formatted value, mood, gauge and a 30-sample trail.
//
// Architecture:
// - gas: reading model, fetcher, sample history, scheduler, derived view
// - monitor: the Session that owns all state and applies events
// - actions/host: copy, share and add-to-apps through an injected bridge
// - server (axum): `gasgauge serve` exposes /api/gas, embed metadata, manifest
// - TUI (ratatui) or headless: render or log the derived dashboard
// - Event system: one mpsc channel feeds every event into the Session

mod actions;
mod cli;
mod config;
mod demo;
mod events;
mod gas;
mod headless;
mod host;
mod logging;
mod monitor;
mod server;
mod startup;
mod tui;

use anyhow::Result;
use cli::Mode;
use config::Config;
use gas::{HttpFetcher, MetricSource};
use host::{CommandHost, DetachedHost, HostBridge};
use logging::LogBuffer;
use monitor::Session;
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    let mode = cli::handle_cli();
    if mode == Mode::Done {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // TUI mode captures logs into the buffer; everything else logs to stdout
    let log_buffer = LogBuffer::new();
    let capture = mode == Mode::Dashboard && config.enable_tui;
    let _log_guard = logging::init(&config.logging, &log_buffer, capture);

    startup::print_startup(&config, mode);
    startup::log_startup(&config, mode);

    match mode {
        Mode::Serve => run_server(&config).await?,
        _ => run_dashboard(config, log_buffer).await?,
    }

    tracing::info!("Shutdown complete");
    Ok(())
}

async fn run_server(config: &Config) -> Result<()> {
    let (shutdown_tx, shutdown_rx) = oneshot::channel();

    let server_config = config.server.clone();
    let timeout = config.request_timeout();
    let mut server_handle = tokio::spawn(async move {
        server::start_server(&server_config, timeout, shutdown_rx).await
    });

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down...");
            // If the send fails, the server has already stopped
            let _ = shutdown_tx.send(());
            server_handle.await??;
        }
        result = &mut server_handle => {
            result??;
        }
    }

    Ok(())
}

async fn run_dashboard(config: Config, log_buffer: LogBuffer) -> Result<()> {
    let source: Arc<dyn MetricSource> = if config.demo_mode {
        Arc::new(demo::DemoSource::new(config.server.chain.clone()))
    } else {
        Arc::new(HttpFetcher::new(
            config.endpoint_url.clone(),
            config.request_timeout(),
        )?)
    };

    let host: Arc<dyn HostBridge> = if config.host.is_attached() {
        Arc::new(CommandHost::new(
            config.host.share_command.clone(),
            config.host.add_app_command.clone(),
        ))
    } else {
        Arc::new(DetachedHost)
    };
    // Ready is advisory; a detached host still gets the full dashboard
    if let Err(e) = host.ready().await {
        tracing::debug!("Host not ready: {}", e);
    }

    let (event_tx, event_rx) = mpsc::channel(events::EVENT_BUFFER);
    let mut session = Session::new(
        &config,
        source,
        host,
        Arc::new(actions::SystemClipboard),
        event_tx,
    );
    session.start(config.refresh);

    if config.enable_tui {
        tracing::info!("Starting TUI");
        if let Err(e) = tui::run_tui(session, event_rx, log_buffer).await {
            tracing::error!("TUI error: {:?}", e);
        }
    } else {
        tracing::info!("TUI disabled, running in headless mode");
        headless::run(session, event_rx).await?;
    }

    Ok(())
}
