//! Refresh scheduler
//!
//! Owns the two repeating timers: a one-second clock for the countdown and a
//! fetch timer at the selected interval. Every transition goes through
//! [`Scheduler::cancel_all`] first, so at most one pair of timers exists.
//!
//! Timers only emit events. The loop that receives them decides what to do,
//! which keeps all state mutation in one task.

use super::fetcher::MetricSource;
use crate::events::AppEvent;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Period of the countdown clock
const CLOCK_PERIOD: Duration = Duration::from_millis(1000);

/// Selectable auto-refresh intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RefreshInterval {
    Off,
    Secs5,
    #[default]
    Secs10,
    Secs20,
    Secs30,
    Secs60,
}

impl RefreshInterval {
    /// All options in display order
    pub const ALL: [RefreshInterval; 6] = [
        RefreshInterval::Off,
        RefreshInterval::Secs5,
        RefreshInterval::Secs10,
        RefreshInterval::Secs20,
        RefreshInterval::Secs30,
        RefreshInterval::Secs60,
    ];

    /// Interval in milliseconds, `None` when off
    pub fn as_millis(&self) -> Option<u64> {
        match self {
            RefreshInterval::Off => None,
            RefreshInterval::Secs5 => Some(5_000),
            RefreshInterval::Secs10 => Some(10_000),
            RefreshInterval::Secs20 => Some(20_000),
            RefreshInterval::Secs30 => Some(30_000),
            RefreshInterval::Secs60 => Some(60_000),
        }
    }

    pub fn period(&self) -> Option<Duration> {
        self.as_millis().map(Duration::from_millis)
    }

    pub fn is_off(&self) -> bool {
        *self == RefreshInterval::Off
    }

    pub fn label(&self) -> &'static str {
        match self {
            RefreshInterval::Off => "Off",
            RefreshInterval::Secs5 => "5s",
            RefreshInterval::Secs10 => "10s",
            RefreshInterval::Secs20 => "20s",
            RefreshInterval::Secs30 => "30s",
            RefreshInterval::Secs60 => "60s",
        }
    }

    /// Position in [`Self::ALL`]
    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|i| i == self).unwrap_or(0)
    }

    /// Option by position in [`Self::ALL`]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Next option (wraps around)
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Previous option (wraps around)
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Parse from config: "off", "0", "5s", "10", "60s", ...
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        if s == "off" || s == "0" || s == "0s" {
            return Some(RefreshInterval::Off);
        }
        let secs: u64 = s.strip_suffix('s').unwrap_or(&s).parse().ok()?;
        Self::ALL
            .iter()
            .copied()
            .find(|i| i.as_millis() == Some(secs * 1000))
    }
}

/// Timer ownership state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    /// Refresh off, no timers running
    Idle,
    /// Clock and fetch timers running at `interval`
    Active { interval: RefreshInterval },
}

/// Observable refresh phase (timer state combined with in-flight fetches)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerPhase {
    Idle,
    TickingNoFetch,
    TickingWithFetch,
}

impl SchedulerPhase {
    pub fn label(&self) -> &'static str {
        match self {
            SchedulerPhase::Idle => "auto refresh off",
            SchedulerPhase::TickingNoFetch => "waiting",
            SchedulerPhase::TickingWithFetch => "fetching",
        }
    }
}

/// Owns the clock and fetch timers
pub struct Scheduler {
    tx: mpsc::Sender<AppEvent>,
    state: SchedulerState,
    clock_timer: Option<JoinHandle<()>>,
    fetch_timer: Option<JoinHandle<()>>,
}

impl Scheduler {
    /// Create an idle scheduler that will emit into `tx`
    pub fn new(tx: mpsc::Sender<AppEvent>) -> Self {
        Self {
            tx,
            state: SchedulerState::Idle,
            clock_timer: None,
            fetch_timer: None,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SchedulerState {
        self.state
    }

    /// Currently selected interval (Off when idle)
    pub fn interval(&self) -> RefreshInterval {
        match self.state {
            SchedulerState::Idle => RefreshInterval::Off,
            SchedulerState::Active { interval } => interval,
        }
    }

    pub fn phase(&self, fetch_in_flight: bool) -> SchedulerPhase {
        match (self.state, fetch_in_flight) {
            (SchedulerState::Idle, _) => SchedulerPhase::Idle,
            (SchedulerState::Active { .. }, false) => SchedulerPhase::TickingNoFetch,
            (SchedulerState::Active { .. }, true) => SchedulerPhase::TickingWithFetch,
        }
    }

    /// Switch to a new interval
    ///
    /// Always restarts the timers, even when the interval is unchanged, so
    /// both fire one full period after the selection. Must be called from
    /// within a tokio runtime.
    pub fn set_interval(&mut self, interval: RefreshInterval) {
        self.cancel_all();

        let Some(period) = interval.period() else {
            tracing::debug!("Auto refresh off");
            return;
        };

        self.clock_timer = Some(spawn_timer(self.tx.clone(), CLOCK_PERIOD, || AppEvent::Clock));
        self.fetch_timer = Some(spawn_timer(self.tx.clone(), period, || AppEvent::FetchDue));
        self.state = SchedulerState::Active { interval };

        tracing::debug!("Auto refresh every {}", interval.label());
    }

    /// Stop both timers and go idle
    pub fn cancel_all(&mut self) {
        if let Some(handle) = self.clock_timer.take() {
            handle.abort();
        }
        if let Some(handle) = self.fetch_timer.take() {
            handle.abort();
        }
        self.state = SchedulerState::Idle;
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

/// Spawn a repeating timer whose first tick is one period from now
fn spawn_timer(
    tx: mpsc::Sender<AppEvent>,
    period: Duration,
    make_event: fn() -> AppEvent,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            if tx.send(make_event()).await.is_err() {
                // Receiver gone: the view was torn down
                break;
            }
        }
    })
}

/// Run one fetch in the background and report the result as an event
///
/// Overlapping fetches are allowed and each completion is applied on
/// arrival: the most recently *completed* fetch wins, not the most recently
/// issued one. If the receiver is gone by then, the result is dropped.
pub fn spawn_fetch(
    source: Arc<dyn MetricSource>,
    tx: mpsc::Sender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let result = source.fetch().await;
        if let Err(e) = &result {
            tracing::warn!("Gas fetch failed: {}", e);
        }
        let _ = tx.send(AppEvent::Fetched(result)).await;
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gas::{FetchError, GasReading};
    use async_trait::async_trait;

    fn channel() -> (mpsc::Sender<AppEvent>, mpsc::Receiver<AppEvent>) {
        mpsc::channel(64)
    }

    #[test]
    fn test_interval_parse() {
        assert_eq!(RefreshInterval::parse("off"), Some(RefreshInterval::Off));
        assert_eq!(RefreshInterval::parse("0"), Some(RefreshInterval::Off));
        assert_eq!(RefreshInterval::parse("5s"), Some(RefreshInterval::Secs5));
        assert_eq!(RefreshInterval::parse("10"), Some(RefreshInterval::Secs10));
        assert_eq!(RefreshInterval::parse(" 60S "), Some(RefreshInterval::Secs60));
        assert_eq!(RefreshInterval::parse("15s"), None);
        assert_eq!(RefreshInterval::parse("soon"), None);
    }

    #[test]
    fn test_interval_cycle_wraps() {
        assert_eq!(RefreshInterval::Secs60.next(), RefreshInterval::Off);
        assert_eq!(RefreshInterval::Off.prev(), RefreshInterval::Secs60);
        assert_eq!(RefreshInterval::default(), RefreshInterval::Secs10);
        assert_eq!(RefreshInterval::from_index(3), Some(RefreshInterval::Secs20));
        assert_eq!(RefreshInterval::from_index(6), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_active_emits_clock_then_fetch() {
        let (tx, mut rx) = channel();
        let mut scheduler = Scheduler::new(tx);
        scheduler.set_interval(RefreshInterval::Secs10);
        assert_eq!(
            scheduler.state(),
            SchedulerState::Active {
                interval: RefreshInterval::Secs10
            }
        );

        let start = Instant::now();
        let mut clocks = 0;
        loop {
            match rx.recv().await.expect("scheduler keeps the channel open") {
                AppEvent::Clock => clocks += 1,
                AppEvent::FetchDue => break,
                other => panic!("Unexpected event {:?}", other),
            }
        }

        // Fetch fires one full interval after selection
        assert!(start.elapsed() >= Duration::from_secs(10));
        assert!(start.elapsed() < Duration::from_secs(11));
        // Clock ticks at 1s..=9s (the 10s tick may race the fetch)
        assert!(clocks >= 9);
    }

    #[tokio::test(start_paused = true)]
    async fn test_switch_to_off_cancels_timers() {
        let (tx, mut rx) = channel();
        let mut scheduler = Scheduler::new(tx);
        scheduler.set_interval(RefreshInterval::Secs10);

        // Mid-countdown: let a few clock ticks through
        for _ in 0..3 {
            assert!(matches!(rx.recv().await, Some(AppEvent::Clock)));
        }

        scheduler.set_interval(RefreshInterval::Off);
        assert_eq!(scheduler.state(), SchedulerState::Idle);
        assert_eq!(scheduler.phase(false), SchedulerPhase::Idle);

        // Drain anything sent before the switch, then expect silence
        while rx.try_recv().is_ok() {}
        let waited = tokio::time::timeout(Duration::from_secs(120), rx.recv()).await;
        assert!(waited.is_err(), "no events after switching off");
    }

    #[tokio::test(start_paused = true)]
    async fn test_reselect_restarts_fetch_timer() {
        let (tx, mut rx) = channel();
        let mut scheduler = Scheduler::new(tx);
        scheduler.set_interval(RefreshInterval::Secs10);

        tokio::time::sleep(Duration::from_secs(8)).await;
        scheduler.set_interval(RefreshInterval::Secs5);
        while rx.try_recv().is_ok() {}

        let start = Instant::now();
        loop {
            if let Some(AppEvent::FetchDue) = rx.recv().await {
                break;
            }
        }
        // Old 10s timer would have fired after 2s; the new one fires after 5s
        assert!(start.elapsed() >= Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_timers() {
        let (tx, mut rx) = channel();
        let keep_open = tx.clone();
        {
            let mut scheduler = Scheduler::new(tx);
            scheduler.set_interval(RefreshInterval::Secs5);
        }
        let waited = tokio::time::timeout(Duration::from_secs(30), rx.recv()).await;
        assert!(waited.is_err());
        drop(keep_open);
    }

    #[tokio::test]
    async fn test_phase() {
        let (tx, _rx) = channel();
        let mut scheduler = Scheduler::new(tx);
        assert_eq!(scheduler.phase(true), SchedulerPhase::Idle);
        scheduler.set_interval(RefreshInterval::Secs30);
        assert_eq!(scheduler.phase(false), SchedulerPhase::TickingNoFetch);
        assert_eq!(scheduler.phase(true), SchedulerPhase::TickingWithFetch);
        assert_eq!(scheduler.interval(), RefreshInterval::Secs30);

        assert_eq!(scheduler.phase(true).label(), "fetching");
        scheduler.cancel_all();
        assert_eq!(scheduler.phase(false).label(), "auto refresh off");
    }

    struct FailingSource;

    #[async_trait]
    impl MetricSource for FailingSource {
        async fn fetch(&self) -> Result<GasReading, FetchError> {
            Err(FetchError::Status(503))
        }

        fn describe(&self) -> String {
            "failing".to_string()
        }
    }

    #[tokio::test]
    async fn test_spawn_fetch_reports_result() {
        let (tx, mut rx) = channel();
        spawn_fetch(Arc::new(FailingSource), tx);
        match rx.recv().await {
            Some(AppEvent::Fetched(Err(FetchError::Status(503)))) => {}
            other => panic!("Expected failed fetch, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_spawn_fetch_after_teardown_is_harmless() {
        let (tx, rx) = channel();
        drop(rx);
        let handle = spawn_fetch(Arc::new(FailingSource), tx);
        assert!(handle.await.is_ok());
    }
}
