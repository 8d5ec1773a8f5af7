// Gas module - the telemetry core
//
// Everything that samples, stores and interprets the gas price lives here:
// - reading: wire format of the metric endpoint
// - history: bounded rolling buffer of recent samples
// - fetcher: one-shot HTTP sampling behind the MetricSource trait
// - scheduler: clock and fetch timers keyed on the refresh interval
// - derive: pure presentation values (format, mood, gauge, sparkline, countdown)

pub mod derive;
pub mod fetcher;
pub mod history;
pub mod reading;
pub mod scheduler;

pub use derive::Dashboard;
pub use fetcher::{FetchError, HttpFetcher, MetricSource};
pub use history::SampleHistory;
pub use reading::GasReading;
pub use scheduler::{RefreshInterval, Scheduler};
