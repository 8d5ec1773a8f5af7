// Monitor - the single owner of dashboard state
//
// `Monitor` holds the latest reading, the sample history, the countdown
// basis and the status notice. Only fetch completions write the reading and
// the history. `Session` wires a monitor to its scheduler, metric source and
// host bridge, and is what the TUI and headless loops drive.

use crate::actions::{self, ClipboardSink, Notice, NoticeKind};
use crate::config::Config;
use crate::events::AppEvent;
use crate::gas::scheduler::{spawn_fetch, SchedulerPhase};
use crate::gas::{
    Dashboard, FetchError, GasReading, MetricSource, RefreshInterval, SampleHistory, Scheduler,
};
use crate::host::HostBridge;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

/// Dashboard state, mutated one event at a time
#[derive(Debug, Default)]
pub struct Monitor {
    latest: Option<GasReading>,
    history: SampleHistory,
    /// Client time (ms) of the last successful fetch
    basis_ms: Option<i64>,
    in_flight: usize,
    notice: Option<Notice>,
}

impl Monitor {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn latest(&self) -> Option<&GasReading> {
        self.latest.as_ref()
    }

    #[cfg(test)]
    pub fn history(&self) -> &SampleHistory {
        &self.history
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn is_fetching(&self) -> bool {
        self.in_flight > 0
    }

    /// A fetch was issued: count it and clear any previous fetch error
    pub fn begin_fetch(&mut self) {
        self.in_flight += 1;
        self.clear_fetch_error();
    }

    /// Apply a completed fetch
    ///
    /// Success replaces the latest reading, appends its value and resets the
    /// countdown basis to `now_ms`. Failure leaves all of that untouched and
    /// shows an error notice instead.
    pub fn apply_fetch(&mut self, result: Result<GasReading, FetchError>, now_ms: i64) {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(reading) => {
                self.history.append(reading.gwei());
                self.latest = Some(reading);
                self.basis_ms = Some(now_ms);
                self.clear_fetch_error();
            }
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
            }
        }
    }

    /// Show a notice, replacing the current one
    pub fn show(&mut self, notice: Notice) {
        self.notice = Some(notice);
    }

    /// Drop the notice once its time is up. Returns true if one was removed.
    pub fn expire_notice(&mut self, now: Instant) -> bool {
        if self.notice.as_ref().is_some_and(|n| n.is_expired_at(now)) {
            self.notice = None;
            return true;
        }
        false
    }

    fn clear_fetch_error(&mut self) {
        if self
            .notice
            .as_ref()
            .is_some_and(|n| n.kind == NoticeKind::Error)
        {
            self.notice = None;
        }
    }

    pub fn dashboard(&self, interval: RefreshInterval, now_ms: i64) -> Dashboard {
        Dashboard::derive(
            self.latest.as_ref(),
            &self.history,
            interval,
            self.basis_ms,
            now_ms,
        )
    }
}

/// Current wall-clock time in epoch milliseconds
pub fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// A running dashboard: monitor, scheduler and the capabilities it calls
pub struct Session {
    monitor: Monitor,
    scheduler: Scheduler,
    source: Arc<dyn MetricSource>,
    host: Arc<dyn HostBridge>,
    clipboard: Arc<dyn ClipboardSink>,
    tx: mpsc::Sender<AppEvent>,
    app_name: String,
    share_url: String,
    chain: String,
}

impl Session {
    pub fn new(
        config: &Config,
        source: Arc<dyn MetricSource>,
        host: Arc<dyn HostBridge>,
        clipboard: Arc<dyn ClipboardSink>,
        tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        Self {
            monitor: Monitor::new(),
            scheduler: Scheduler::new(tx.clone()),
            source,
            host,
            clipboard,
            tx,
            app_name: config.app_name.clone(),
            share_url: config.share_url.clone(),
            chain: config.server.chain.clone(),
        }
    }

    /// Mount: fetch once immediately, then start the timers
    pub fn start(&mut self, interval: RefreshInterval) {
        tracing::info!(
            "Watching {} (refresh {})",
            self.source.describe(),
            interval.label()
        );
        self.refresh();
        self.scheduler.set_interval(interval);
    }

    pub fn monitor(&self) -> &Monitor {
        &self.monitor
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn interval(&self) -> RefreshInterval {
        self.scheduler.interval()
    }

    pub fn phase(&self) -> SchedulerPhase {
        self.scheduler.phase(self.monitor.is_fetching())
    }

    pub fn set_interval(&mut self, interval: RefreshInterval) {
        self.scheduler.set_interval(interval);
    }

    /// Fetch now, independent of the timers
    pub fn refresh(&mut self) {
        self.monitor.begin_fetch();
        spawn_fetch(self.source.clone(), self.tx.clone());
    }

    pub fn dashboard(&self, now_ms: i64) -> Dashboard {
        self.monitor.dashboard(self.interval(), now_ms)
    }

    /// Apply one event. Returns true when the view should redraw.
    pub fn handle(&mut self, event: AppEvent, now_ms: i64) -> bool {
        match event {
            AppEvent::Clock => true,
            AppEvent::FetchDue => {
                self.refresh();
                true
            }
            AppEvent::Fetched(result) => {
                if let Ok(reading) = &result {
                    tracing::debug!(
                        "{} gas {} gwei",
                        reading.chain_title(),
                        reading.gas_price_gwei
                    );
                }
                self.monitor.apply_fetch(result, now_ms);
                true
            }
            AppEvent::Notice(notice) => {
                self.monitor.show(notice);
                true
            }
        }
    }

    /// Expire a timed-out notice. Returns true when the view should redraw.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.monitor.expire_notice(now)
    }

    pub fn copy(&mut self, now_ms: i64) {
        let text = actions::copy_text(&self.dashboard(now_ms), &self.app_name);
        let notice = actions::copy(self.clipboard.as_ref(), &text);
        self.monitor.show(notice);
    }

    /// Share in the background; the outcome arrives as a Notice event
    pub fn share(&self, now_ms: i64) {
        let text = actions::share_text(&self.dashboard(now_ms), &self.chain, &self.share_url);
        let host = self.host.clone();
        let clipboard = self.clipboard.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Some(notice) = actions::share(host.as_ref(), clipboard.as_ref(), &text).await {
                let _ = tx.send(AppEvent::Notice(notice)).await;
            }
        });
    }

    /// Add-to-apps in the background; a failure arrives as a Notice event
    pub fn add_to_apps(&self) {
        let host = self.host.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            if let Some(notice) = actions::add_to_apps(host.as_ref()).await {
                let _ = tx.send(AppEvent::Notice(notice)).await;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::clipboard::ClipboardError;
    use crate::gas::derive::Mood;
    use crate::host::DetachedHost;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::time::Duration;

    fn reading(gwei: &str) -> GasReading {
        GasReading {
            chain: "base".to_string(),
            gas_price_wei: "0".to_string(),
            gas_price_gwei: gwei.to_string(),
            fetched_at: 0,
        }
    }

    /// Source that replays a script of results
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<GasReading, FetchError>>>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<GasReading, FetchError>>) -> Arc<Self> {
            Arc::new(Self {
                script: Mutex::new(script.into()),
            })
        }
    }

    #[async_trait]
    impl MetricSource for ScriptedSource {
        async fn fetch(&self) -> Result<GasReading, FetchError> {
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(FetchError::Transport("script exhausted".to_string())))
        }

        fn describe(&self) -> String {
            "scripted".to_string()
        }
    }

    struct NullClipboard;

    impl ClipboardSink for NullClipboard {
        fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
            Ok(())
        }
    }

    fn session(
        source: Arc<dyn MetricSource>,
    ) -> (Session, mpsc::Receiver<AppEvent>) {
        let (tx, rx) = mpsc::channel(64);
        let session = Session::new(
            &Config::default(),
            source,
            Arc::new(DetachedHost),
            Arc::new(NullClipboard),
            tx,
        );
        (session, rx)
    }

    #[test]
    fn test_moods_follow_fetches() {
        let mut monitor = Monitor::new();
        let mut moods = Vec::new();
        for (i, gwei) in ["0.05", "0.3", "2.0"].into_iter().enumerate() {
            monitor.begin_fetch();
            monitor.apply_fetch(Ok(reading(gwei)), i as i64 * 10_000);
            moods.push(monitor.dashboard(RefreshInterval::Secs10, 0).mood);
        }
        assert_eq!(moods, vec![Mood::Cheap, Mood::Normal, Mood::Hot]);
        assert_eq!(monitor.history().len(), 3);
        assert!(!monitor.is_fetching());
    }

    #[test]
    fn test_failure_keeps_latest_then_success_clears_error() {
        let mut monitor = Monitor::new();
        monitor.begin_fetch();
        monitor.apply_fetch(Ok(reading("0.3")), 1_000);

        monitor.begin_fetch();
        monitor.apply_fetch(Err(FetchError::Status(500)), 2_000);
        assert_eq!(monitor.latest().unwrap().gas_price_gwei, "0.3");
        assert_eq!(monitor.history().len(), 1);
        assert_eq!(monitor.notice().unwrap().kind, NoticeKind::Error);
        // Countdown basis still points at the last success
        assert_eq!(
            monitor.dashboard(RefreshInterval::Secs10, 2_000).countdown,
            Some(9)
        );

        monitor.begin_fetch();
        assert!(monitor.notice().is_none(), "error clears when a fetch starts");
        monitor.apply_fetch(Ok(reading("0.5")), 3_000);
        assert_eq!(monitor.latest().unwrap().gas_price_gwei, "0.5");
        assert_eq!(monitor.history().len(), 2);
        assert!(monitor.notice().is_none());
    }

    #[test]
    fn test_unparseable_reading_becomes_latest_without_sample() {
        let mut monitor = Monitor::new();
        monitor.begin_fetch();
        monitor.apply_fetch(Ok(reading("n/a")), 1_000);
        assert!(monitor.latest().is_some());
        assert!(monitor.history().is_empty());
        assert_eq!(monitor.dashboard(RefreshInterval::Secs10, 1_000).mood, Mood::NoData);
    }

    #[test]
    fn test_overlapping_fetches_last_completed_wins() {
        let mut monitor = Monitor::new();
        monitor.begin_fetch();
        monitor.begin_fetch();
        assert!(monitor.is_fetching());

        // Newer request lands first, older one after
        monitor.apply_fetch(Ok(reading("0.9")), 1_000);
        assert!(monitor.is_fetching());
        monitor.apply_fetch(Ok(reading("0.4")), 1_100);

        assert_eq!(monitor.latest().unwrap().gas_price_gwei, "0.4");
        assert_eq!(monitor.history().len(), 2);
        assert!(!monitor.is_fetching());
    }

    #[test]
    fn test_action_notice_survives_fetch_start() {
        let mut monitor = Monitor::new();
        monitor.show(Notice::warning("Add failed."));
        monitor.begin_fetch();
        assert_eq!(monitor.notice().unwrap().kind, NoticeKind::Warning);
    }

    #[test]
    fn test_success_notice_expires() {
        let mut monitor = Monitor::new();
        monitor.show(Notice::success("Copied."));
        let now = Instant::now();
        assert!(!monitor.expire_notice(now));
        assert!(monitor.expire_notice(now + Duration::from_secs(1)));
        assert!(monitor.notice().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_refresh_cycle() {
        let source = ScriptedSource::new(vec![Ok(reading("0.05")), Ok(reading("0.3"))]);
        let (mut session, mut rx) = session(source);

        session.start(RefreshInterval::Secs10);
        assert_eq!(session.phase(), SchedulerPhase::TickingWithFetch);

        // Initial fetch completes first
        let event = rx.recv().await.unwrap();
        assert!(matches!(event, AppEvent::Fetched(Ok(_))));
        session.handle(event, 0);
        assert_eq!(session.phase(), SchedulerPhase::TickingNoFetch);
        assert_eq!(session.dashboard(0).countdown, Some(10));

        // Run until the scheduled fetch has been applied
        let mut now = 0;
        while session.monitor().history().len() < 2 {
            let event = rx.recv().await.unwrap();
            if matches!(event, AppEvent::Clock) {
                now += 1_000;
            }
            session.handle(event, now);
        }
        assert_eq!(session.dashboard(now).mood, Mood::Normal);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_off_stops_automatic_fetches() {
        let source = ScriptedSource::new(vec![Ok(reading("0.05"))]);
        let (mut session, mut rx) = session(source);

        session.start(RefreshInterval::Secs10);
        let event = rx.recv().await.unwrap();
        session.handle(event, 0);

        tokio::time::sleep(Duration::from_secs(3)).await;
        session.set_interval(RefreshInterval::Off);
        while rx.try_recv().is_ok() {}

        assert_eq!(session.phase(), SchedulerPhase::Idle);
        assert_eq!(session.dashboard(3_000).countdown, None);
        assert_eq!(
            session.dashboard(3_000).countdown_text(session.interval()),
            "off"
        );
        let waited = tokio::time::timeout(Duration::from_secs(60), rx.recv()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn test_detached_add_to_apps_reports_warning() {
        let (session, mut rx) = session(ScriptedSource::new(Vec::new()));
        session.add_to_apps();
        match rx.recv().await {
            Some(AppEvent::Notice(notice)) => assert_eq!(notice.kind, NoticeKind::Warning),
            other => panic!("Expected notice, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_detached_share_falls_back_to_clipboard() {
        let (session, mut rx) = session(ScriptedSource::new(Vec::new()));
        session.share(0);
        match rx.recv().await {
            Some(AppEvent::Notice(notice)) => assert!(notice.is_success()),
            other => panic!("Expected notice, got {:?}", other),
        }
    }
}
