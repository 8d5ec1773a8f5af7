// Components module - the pieces of the dashboard
//
// - Title bar: app name, chain, mood badge, refresh spinner
// - Gauge panel: current value and its position in the recent range
// - Spark panel: the sample history trail
// - Stats panel: sample count, min/max, last update
// - Controls bar: interval selector, countdown, key hints
// - Logs panel: the last few captured log lines
// - Toast: the status notice overlay

pub mod controls_bar;
pub mod gauge_panel;
pub mod logs_panel;
pub mod spark_panel;
pub mod stats_panel;
pub mod title_bar;
pub mod toast;
