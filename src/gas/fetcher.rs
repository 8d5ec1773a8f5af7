//! Metric fetcher
//!
//! One HTTP GET per call, no retries. The next scheduler tick is the retry.

use super::reading::GasReading;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::CACHE_CONTROL;
use std::time::Duration;
use thiserror::Error;

/// Failures while sampling the metric
///
/// None of these are fatal: the caller keeps its previous reading and
/// surfaces the message until the next successful fetch.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Endpoint answered with a non-success status
    #[error("Failed to fetch gas (HTTP {0})")]
    Status(u16),

    /// Request never produced a response (DNS, connect, timeout)
    #[error("Failed to fetch gas: {0}")]
    Transport(String),

    /// Response body was not a valid reading
    #[error("Unexpected gas response: {0}")]
    Decode(String),
}

/// Anything that can produce one gas reading per call
#[async_trait]
pub trait MetricSource: Send + Sync {
    async fn fetch(&self) -> Result<GasReading, FetchError>;

    /// Short description for the startup banner and logs
    fn describe(&self) -> String;
}

/// Fetches readings from the `/api/gas` endpoint
pub struct HttpFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait]
impl MetricSource for HttpFetcher {
    async fn fetch(&self) -> Result<GasReading, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!("Gas endpoint returned {}", status);
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }

    fn describe(&self) -> String {
        self.endpoint.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use serde_json::json;

    fn fetcher_for(server: &Server) -> HttpFetcher {
        HttpFetcher::new(format!("{}/api/gas", server.url()), Duration::from_secs(5))
            .expect("client should build")
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let mut server = Server::new_async().await;
        let body = json!({
            "chain": "base",
            "gasPriceWei": "12000000",
            "gasPriceGwei": "0.012",
            "fetchedAt": 1_700_000_000_000_i64,
        })
        .to_string();

        let mock = server
            .mock("GET", "/api/gas")
            .match_header("cache-control", "no-store")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create_async()
            .await;

        let reading = fetcher_for(&server).fetch().await.expect("fetch should succeed");
        assert_eq!(reading.chain, "base");
        assert_eq!(reading.gas_price_gwei, "0.012");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_non_success_status() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/gas")
            .with_status(500)
            .with_body(r#"{"error":"Failed to fetch gas price"}"#)
            .create_async()
            .await;

        match fetcher_for(&server).fetch().await {
            Err(FetchError::Status(code)) => assert_eq!(code, 500),
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_malformed_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/gas")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        assert!(matches!(
            fetcher_for(&server).fetch().await,
            Err(FetchError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_endpoint() {
        // Reserve a free port, then release it so nothing is listening there
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let fetcher =
            HttpFetcher::new(format!("http://{}/api/gas", addr), Duration::from_secs(2)).unwrap();
        assert!(matches!(
            fetcher.fetch().await,
            Err(FetchError::Transport(_))
        ));
    }
}
