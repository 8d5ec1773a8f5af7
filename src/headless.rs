// Headless mode - the dashboard loop without a terminal UI
//
// Drives the same Session as the TUI and reports readings, errors and
// notices through tracing. Runs until Ctrl+C.

use crate::actions::NoticeKind;
use crate::events::AppEvent;
use crate::monitor::{self, Session};
use anyhow::Result;
use tokio::sync::mpsc;

pub async fn run(mut session: Session, mut event_rx: mpsc::Receiver<AppEvent>) -> Result<()> {
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,

            event = event_rx.recv() => {
                let Some(event) = event else { break };
                let fetched = matches!(event, AppEvent::Fetched(_));
                session.handle(event, monitor::now_ms());
                if fetched {
                    report(&session);
                }
            }
        }
    }

    Ok(())
}

/// Log the latest dashboard state after a fetch settles
fn report(session: &Session) {
    let dash = session.dashboard(monitor::now_ms());

    if let Some(notice) = session.monitor().notice() {
        if notice.kind == NoticeKind::Error {
            tracing::warn!("{}", notice.message);
            return;
        }
    }

    tracing::info!(
        "{} gwei ({}) range {} samples {} {} [{}]",
        dash.formatted,
        dash.mood,
        dash.range_text().unwrap_or_default(),
        dash.sample_count,
        dash.countdown_text(session.interval()),
        session.phase().label()
    );
}
