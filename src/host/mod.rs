//! Host bridge - capabilities provided by the surrounding environment
//!
//! The dashboard can hand text to a "compose share" action and ask the host
//! to register it as an app. Neither is guaranteed to exist, so every call
//! may fail and callers degrade gracefully. Tests substitute stubs.

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// Failures from host capabilities
#[derive(Debug, Error)]
pub enum HostError {
    /// The capability is not provided here
    #[error("host capability not available")]
    Unavailable,

    /// The host tried and refused or failed
    #[error("host rejected the request: {0}")]
    Rejected(String),
}

/// Capabilities the dashboard may ask its host for
#[async_trait]
pub trait HostBridge: Send + Sync {
    /// Signal that the dashboard is up. Called once at startup; failures are ignored.
    async fn ready(&self) -> Result<(), HostError>;

    /// Hand free text to the host's share/compose flow
    async fn compose_share(&self, text: &str) -> Result<(), HostError>;

    /// Ask the host to add this dashboard to the user's apps
    async fn add_app(&self) -> Result<(), HostError>;
}

/// No host at all: every capability is unavailable
pub struct DetachedHost;

#[async_trait]
impl HostBridge for DetachedHost {
    async fn ready(&self) -> Result<(), HostError> {
        Err(HostError::Unavailable)
    }

    async fn compose_share(&self, _text: &str) -> Result<(), HostError> {
        Err(HostError::Unavailable)
    }

    async fn add_app(&self) -> Result<(), HostError> {
        Err(HostError::Unavailable)
    }
}

/// Host capabilities backed by user-configured shell commands
///
/// The share command receives the text in the `GASGAUGE_TEXT` environment
/// variable, e.g. `share_command = "notify-send Gas \"$GASGAUGE_TEXT\""`.
pub struct CommandHost {
    share_command: Option<String>,
    add_app_command: Option<String>,
}

impl CommandHost {
    pub fn new(share_command: Option<String>, add_app_command: Option<String>) -> Self {
        Self {
            share_command,
            add_app_command,
        }
    }

    async fn run(command: &str, text: Option<&str>) -> Result<(), HostError> {
        // Platform-specific shell
        let (shell, flag) = if cfg!(windows) {
            ("cmd", "/C")
        } else {
            ("sh", "-c")
        };

        let mut cmd = Command::new(shell);
        cmd.arg(flag).arg(command);
        if let Some(text) = text {
            cmd.env("GASGAUGE_TEXT", text);
        }

        let status = cmd
            .status()
            .await
            .map_err(|e| HostError::Rejected(format!("failed to launch '{}': {}", command, e)))?;

        if status.success() {
            Ok(())
        } else {
            Err(HostError::Rejected(format!("'{}' exited with {}", command, status)))
        }
    }
}

#[async_trait]
impl HostBridge for CommandHost {
    async fn ready(&self) -> Result<(), HostError> {
        if self.share_command.is_none() && self.add_app_command.is_none() {
            return Err(HostError::Unavailable);
        }
        Ok(())
    }

    async fn compose_share(&self, text: &str) -> Result<(), HostError> {
        match &self.share_command {
            Some(command) => Self::run(command, Some(text)).await,
            None => Err(HostError::Unavailable),
        }
    }

    async fn add_app(&self) -> Result<(), HostError> {
        match &self.add_app_command {
            Some(command) => Self::run(command, None).await,
            None => Err(HostError::Unavailable),
        }
    }
}
