// Action handlers - user-triggered copy, share and add-to-apps
//
// Actions read the derived dashboard and report back a short Notice. They
// never touch the scheduler or the sample history; manual refresh lives in
// the monitor because it behaves exactly like an automatic tick.

pub mod clipboard;

pub use clipboard::{ClipboardSink, SystemClipboard};

use crate::gas::derive::{format_gwei, Dashboard};
use crate::host::HostBridge;
use std::time::{Duration, Instant};

/// How long success notices stay on screen
pub const SUCCESS_TTL: Duration = Duration::from_millis(900);

const COPY_OK: &str = "Copied.";
const COPY_BLOCKED: &str = "Copy blocked in this terminal. Select the value and copy it manually.";
const SHARE_COPIED: &str = "Share text copied.";
const SHARE_UNAVAILABLE: &str = "Share not available here.";
const ADD_FAILED: &str = "Add failed. Try from inside Base App.";

/// Classification of a status message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// Acknowledgement, auto-dismissed
    Success,
    /// Recoverable problem with an action
    Warning,
    /// Fetch failure; cleared when the next fetch starts
    Error,
}

/// A short-lived status message
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
    created_at: Instant,
    ttl: Option<Duration>,
}

impl Notice {
    fn new(kind: NoticeKind, message: impl Into<String>, ttl: Option<Duration>) -> Self {
        Self {
            kind,
            message: message.into(),
            created_at: Instant::now(),
            ttl,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Success, message, Some(SUCCESS_TTL))
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Warning, message, None)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NoticeKind::Error, message, None)
    }

    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        self.kind == NoticeKind::Success
    }

    /// Whether the notice should be removed at `now`
    pub fn is_expired_at(&self, now: Instant) -> bool {
        match self.ttl {
            Some(ttl) => now.duration_since(self.created_at) >= ttl,
            None => false,
        }
    }
}

/// Text block for the copy action
pub fn copy_text(dash: &Dashboard, app_name: &str) -> String {
    let mut text = format!("{}\nGas: {} gwei\n", app_name, dash.formatted);
    if let Some(range) = dash.range_text() {
        text.push_str(&format!("Min/Max (30): {}\n", range));
    }
    if let Some(updated) = dash.updated_text() {
        text.push_str(&format!("Updated: {}\n", updated));
    }
    text
}

/// Status line for the share action
///
/// `fallback_chain` names the chain before the first reading arrives.
pub fn share_text(dash: &Dashboard, fallback_chain: &str, url: &str) -> String {
    let chain = dash.chain.as_deref().unwrap_or(fallback_chain);
    let mut text = format!(
        "{} gas is {} gwei • {}",
        title_case(chain),
        format_gwei(dash.current),
        dash.mood
    );
    if !url.is_empty() {
        text.push('\n');
        text.push_str(url);
    }
    text
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Copy text to the clipboard
pub fn copy(clipboard: &dyn ClipboardSink, text: &str) -> Notice {
    match clipboard.write_text(text) {
        Ok(()) => Notice::success(COPY_OK),
        Err(e) => {
            tracing::warn!("Copy failed: {}", e);
            Notice::warning(COPY_BLOCKED)
        }
    }
}

/// Share through the host, falling back to the clipboard
///
/// Returns `None` when the host accepted the text (the host shows its own UI).
pub async fn share(
    host: &dyn HostBridge,
    clipboard: &dyn ClipboardSink,
    text: &str,
) -> Option<Notice> {
    match host.compose_share(text).await {
        Ok(()) => {
            tracing::info!("Shared via host");
            None
        }
        Err(e) => {
            tracing::debug!("Host share unavailable ({}), copying instead", e);
            match clipboard.write_text(text) {
                Ok(()) => Some(Notice::success(SHARE_COPIED)),
                Err(e) => {
                    tracing::warn!("Share fallback copy failed: {}", e);
                    Some(Notice::warning(SHARE_UNAVAILABLE))
                }
            }
        }
    }
}

/// Ask the host to add this dashboard to the user's apps. No retry.
pub async fn add_to_apps(host: &dyn HostBridge) -> Option<Notice> {
    match host.add_app().await {
        Ok(()) => {
            tracing::info!("Added to host apps");
            None
        }
        Err(e) => {
            tracing::warn!("Add to apps failed: {}", e);
            Some(Notice::warning(ADD_FAILED))
        }
    }
}
