//! Presentation derivation
//!
//! Pure functions from the latest reading and the sample history to the
//! values the dashboard shows. Nothing in here touches timers or I/O, so
//! every frame can recompute from scratch.

use super::history::SampleHistory;
use super::reading::GasReading;
use super::scheduler::RefreshInterval;
use chrono::{Local, TimeZone};
use std::fmt;

/// Placeholder shown for values that are missing or non-finite
pub const NO_VALUE: &str = "—";

/// Logical sparkline canvas (the history trail is drawn inside it)
pub const SPARK_WIDTH: f64 = 520.0;
pub const SPARK_HEIGHT: f64 = 92.0;
pub const SPARK_PADDING: f64 = 10.0;

/// Upper bound (inclusive) of the cheap band, in gwei
const CHEAP_MAX_GWEI: f64 = 0.2;
/// Upper bound (inclusive) of the normal band, in gwei
const NORMAL_MAX_GWEI: f64 = 1.0;

/// Format a gwei value with precision tiered by magnitude
///
/// # Examples
/// ```ignore
/// assert_eq!(format_gwei(150.0), "150");
/// assert_eq!(format_gwei(1.5), "1.50");
/// assert_eq!(format_gwei(0.015), "0.0150");
/// ```
pub fn format_gwei(value: f64) -> String {
    if !value.is_finite() {
        return NO_VALUE.to_string();
    }
    let decimals = if value >= 100.0 {
        0
    } else if value >= 10.0 {
        1
    } else if value >= 1.0 {
        2
    } else if value >= 0.1 {
        3
    } else {
        4
    };
    round_half_up(value, decimals)
}

/// Fixed-point rendering of the exact binary value with ties rounded up
///
/// `format!("{:.N}")` rounds ties to even, so 100.5 would show as "100".
fn round_half_up(value: f64, decimals: usize) -> String {
    // Every finite f64 has at most 1074 fractional digits
    let exact = format!("{:.1074}", value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(decimals))
        .collect();

    if frac_part.as_bytes().get(decimals).is_some_and(|d| *d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - decimals;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..split].iter().map(|d| *d as char));
    if decimals > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|d| *d as char));
    }
    out
}

/// Colour family of a mood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Neutral,
    Bad,
}

/// Qualitative classification of the current gas price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Cheap,
    Normal,
    Hot,
    NoData,
}

impl Mood {
    /// Classify a gwei value against the fixed thresholds
    pub fn classify(gwei: f64) -> Self {
        if !gwei.is_finite() {
            Mood::NoData
        } else if gwei <= CHEAP_MAX_GWEI {
            Mood::Cheap
        } else if gwei <= NORMAL_MAX_GWEI {
            Mood::Normal
        } else {
            Mood::Hot
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Cheap => "Cheap",
            Mood::Normal => "Normal",
            Mood::Hot => "Hot",
            Mood::NoData => "No data",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            Mood::Cheap => Tone::Good,
            Mood::Normal | Mood::NoData => Tone::Neutral,
            Mood::Hot => Tone::Bad,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Position of `latest` within the history's `(min, max)`, clamped to `[0, 1]`
///
/// Returns the midpoint when there is no usable range yet.
pub fn gauge_position(latest: f64, history: &SampleHistory) -> f64 {
    let (min, max) = history.range_of();
    if !latest.is_finite() || !min.is_finite() || !max.is_finite() {
        return 0.5;
    }
    let span = max - min;
    if span <= 0.0 {
        return 0.5;
    }
    ((latest - min) / span).clamp(0.0, 1.0)
}

/// Map samples to `(x, y)` points inside the sparkline canvas
///
/// x is evenly spaced, y is inverted so larger values sit higher (smaller y),
/// and the vertical scale is the samples' own min/max.
pub fn spark_points(samples: &[f64]) -> Vec<(f64, f64)> {
    if samples.is_empty() {
        return Vec::new();
    }
    let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
    let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let span = (max - min).max(1e-9);

    let inner_w = SPARK_WIDTH - SPARK_PADDING * 2.0;
    let inner_h = SPARK_HEIGHT - SPARK_PADDING * 2.0;
    let x_step = inner_w / (samples.len().saturating_sub(1).max(1) as f64);

    samples
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let y_norm = (v - min) / span;
            let x = SPARK_PADDING + i as f64 * x_step;
            let y = SPARK_PADDING + (1.0 - y_norm) * inner_h;
            (x, y)
        })
        .collect()
}

/// Seconds until the next automatic fetch
///
/// `None` when refresh is off or nothing has been fetched yet. The basis is
/// the client-side time of the last successful fetch, not the server's
/// `fetchedAt`, so the countdown tracks what this process has observed.
pub fn countdown_secs(
    interval: RefreshInterval,
    basis_ms: Option<i64>,
    now_ms: i64,
) -> Option<u64> {
    let interval_ms = interval.as_millis()? as i64;
    let basis = basis_ms?;
    let left_ms = interval_ms - (now_ms - basis);
    if left_ms <= 0 {
        return Some(0);
    }
    // ceil(left / 1000) for positive integers
    Some(((left_ms + 999) / 1000) as u64)
}

/// Local wall-clock time as HH:MM:SS
pub fn time_hhmmss(ms: i64) -> String {
    match Local.timestamp_millis_opt(ms).single() {
        Some(t) => t.format("%H:%M:%S").to_string(),
        None => NO_VALUE.to_string(),
    }
}

/// Everything the dashboard renders, derived in one pass
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Latest value in gwei (NaN when nothing has been fetched)
    pub current: f64,
    pub formatted: String,
    pub mood: Mood,
    pub gauge: f64,
    /// `(min, max)` of the history, NaN when empty
    pub range: (f64, f64),
    pub sample_count: usize,
    pub spark: Vec<(f64, f64)>,
    pub countdown: Option<u64>,
    pub chain: Option<String>,
    /// Client time of the last successful fetch
    pub updated_at: Option<i64>,
}

impl Dashboard {
    pub fn derive(
        latest: Option<&GasReading>,
        history: &SampleHistory,
        interval: RefreshInterval,
        basis_ms: Option<i64>,
        now_ms: i64,
    ) -> Self {
        let current = latest.map(GasReading::gwei).unwrap_or(f64::NAN);
        let samples: Vec<f64> = history.iter().collect();

        Self {
            current,
            formatted: format_gwei(current),
            mood: Mood::classify(current),
            gauge: gauge_position(current, history),
            range: history.range_of(),
            sample_count: history.len(),
            spark: spark_points(&samples),
            countdown: countdown_secs(interval, basis_ms, now_ms),
            chain: latest.map(|r| r.chain.clone()),
            updated_at: latest.and(basis_ms),
        }
    }

    /// "min / max" text, or `None` before the first sample
    pub fn range_text(&self) -> Option<String> {
        let (min, max) = self.range;
        if !min.is_finite() {
            return None;
        }
        Some(format!("{} / {}", format_gwei(min), format_gwei(max)))
    }

    /// "HH:MM:SS" of the last update, or `None` before the first fetch
    pub fn updated_text(&self) -> Option<String> {
        self.updated_at.map(time_hhmmss)
    }

    /// Countdown label: "off", "next in Ns" or "next in —s"
    pub fn countdown_text(&self, interval: RefreshInterval) -> String {
        if interval.is_off() {
            return "off".to_string();
        }
        match self.countdown {
            Some(secs) => format!("next in {}s", secs),
            None => format!("next in {}s", NO_VALUE),
        }
    }
}
