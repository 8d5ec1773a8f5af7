// Demo mode: synthetic gas readings to showcase the dashboard
//
// The price wanders in a bounded random walk across all three mood bands,
// with the occasional spike and a simulated endpoint failure now and then,
// so every part of the UI gets exercised without a network.
//
// Run with: GASGAUGE_DEMO=1 cargo run --release

use crate::gas::{FetchError, GasReading, MetricSource};
use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use std::time::Duration;

/// Lowest and highest demo price, in gwei
const FLOOR_GWEI: f64 = 0.005;
const CEILING_GWEI: f64 = 3.0;

/// Chance that a fetch fails
const FAILURE_RATE: f64 = 0.08;
/// Chance that a fetch lands on a spike
const SPIKE_RATE: f64 = 0.05;

struct WalkState {
    rng: StdRng,
    gwei: f64,
}

/// MetricSource producing a random walk
pub struct DemoSource {
    chain: String,
    latency: Duration,
    state: Mutex<WalkState>,
}

impl DemoSource {
    pub fn new(chain: impl Into<String>) -> Self {
        Self::with_rng(chain, StdRng::from_entropy(), Duration::from_millis(350))
    }

    fn with_rng(chain: impl Into<String>, rng: StdRng, latency: Duration) -> Self {
        Self {
            chain: chain.into(),
            latency,
            state: Mutex::new(WalkState { rng, gwei: 0.08 }),
        }
    }

    /// Advance the walk. `None` means this sample is a simulated failure.
    fn step(&self) -> Option<f64> {
        let Ok(mut state) = self.state.lock() else {
            return None;
        };
        let WalkState { rng, gwei } = &mut *state;

        if rng.gen_bool(FAILURE_RATE) {
            return None;
        }

        let next = if rng.gen_bool(SPIKE_RATE) {
            *gwei * rng.gen_range(4.0..12.0)
        } else {
            // Multiplicative drift with a pull back toward the cheap band
            let drift = rng.gen_range(-0.18..0.18);
            let pull = if *gwei > 0.5 { -0.12 } else { 0.0 };
            *gwei * (1.0 + drift + pull)
        };

        *gwei = next.clamp(FLOOR_GWEI, CEILING_GWEI);
        Some(*gwei)
    }
}

#[async_trait]
impl MetricSource for DemoSource {
    async fn fetch(&self) -> Result<GasReading, FetchError> {
        tokio::time::sleep(self.latency).await;

        let gwei = self
            .step()
            .ok_or_else(|| FetchError::Transport("simulated outage".to_string()))?;
        let wei = (gwei * 1e9).round() as u128;

        Ok(GasReading {
            chain: self.chain.clone(),
            gas_price_wei: wei.to_string(),
            gas_price_gwei: crate::server::format_units(wei, 9),
            fetched_at: Utc::now().timestamp_millis(),
        })
    }

    fn describe(&self) -> String {
        format!("demo ({})", self.chain)
    }
}
