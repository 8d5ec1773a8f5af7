//! Rolling sample history
//!
//! A small ring buffer of recent gas prices (gwei). It feeds the min/max
//! range, the gauge position and the sparkline.

use std::collections::VecDeque;

/// Maximum number of samples kept for range and sparkline
pub const HISTORY_CAPACITY: usize = 30;

/// Bounded FIFO buffer of finite samples
#[derive(Debug, Clone)]
pub struct SampleHistory {
    samples: VecDeque<f64>,
}

impl Default for SampleHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleHistory {
    pub fn new() -> Self {
        Self {
            samples: VecDeque::with_capacity(HISTORY_CAPACITY + 1),
        }
    }

    /// Append a sample, dropping the oldest ones beyond capacity
    ///
    /// Non-finite values are ignored rather than treated as errors.
    pub fn append(&mut self, value: f64) {
        if !value.is_finite() {
            tracing::trace!("Dropping non-finite sample: {}", value);
            return;
        }
        self.samples.push_back(value);
        while self.samples.len() > HISTORY_CAPACITY {
            self.samples.pop_front();
        }
    }

    /// `(min, max)` over the current contents, `(NaN, NaN)` when empty
    pub fn range_of(&self) -> (f64, f64) {
        if self.is_empty() {
            return (f64::NAN, f64::NAN);
        }
        self.samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Samples in insertion order (oldest first)
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.samples.iter().copied()
    }
}
