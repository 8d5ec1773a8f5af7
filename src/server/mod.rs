// Endpoint server - the HTTP side of `gasgauge serve`
//
// Serves the gas reading the dashboard polls, the static manifest and the
// share-card metadata. Binds to 127.0.0.1 by default.

mod embed;
mod error;
mod gas;
mod manifest;

pub use error::ApiError;
pub use gas::format_units;

use crate::config::ServerConfig;
use anyhow::{Context, Result};
use axum::{routing::get, Router};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

/// State shared by every handler
pub struct ServerState {
    pub client: reqwest::Client,
    pub rpc_url: String,
    pub chain: String,
    pub manifest_path: PathBuf,
    pub app_url: String,
}

impl ServerState {
    pub fn from_config(config: &ServerConfig, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            rpc_url: config.rpc_url.clone(),
            chain: config.chain.clone(),
            manifest_path: config.manifest_path.clone(),
            app_url: config.app_url.clone(),
        })
    }
}

/// Build the router
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/api/gas", get(gas::get_gas))
        .route("/api/embed", get(embed::get_embed))
        .route("/.well-known/farcaster.json", get(manifest::get_manifest))
        .with_state(state)
}

/// Serve on an already bound listener until `shutdown_rx` fires
pub async fn serve(
    listener: TcpListener,
    state: Arc<ServerState>,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move {
            shutdown_rx.await.ok();
        })
        .await
        .context("Server error")?;

    tracing::info!("Server shut down gracefully");
    Ok(())
}

/// Start the endpoint server
pub async fn start_server(
    config: &ServerConfig,
    timeout: Duration,
    shutdown_rx: tokio::sync::oneshot::Receiver<()>,
) -> Result<()> {
    let state = Arc::new(ServerState::from_config(config, timeout)?);

    tracing::info!("Upstream RPC: {}", config.rpc_url);
    if !config.manifest_path.exists() {
        tracing::warn!(
            "Manifest {} not found, /.well-known/farcaster.json will return 404",
            config.manifest_path.display()
        );
    }

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .context("Failed to bind to address")?;

    tracing::info!("Serving on http://{}", config.bind_addr);

    serve(listener, state, shutdown_rx).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::{json, Value};
    use std::io::Write;
    use tokio::sync::oneshot;

    struct Running {
        base: String,
        _shutdown: oneshot::Sender<()>,
    }

    async fn spawn_server(rpc_url: String, manifest_path: PathBuf) -> Running {
        let state = Arc::new(ServerState {
            client: reqwest::Client::new(),
            rpc_url,
            chain: "base".to_string(),
            manifest_path,
            app_url: "https://gas.example".to_string(),
        });
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();
        tokio::spawn(serve(listener, state, rx));
        Running {
            base: format!("http://{}", addr),
            _shutdown: tx,
        }
    }

    #[tokio::test]
    async fn test_gas_endpoint_success() {
        let mut rpc = Server::new_async().await;
        let mock = rpc
            .mock("POST", "/")
            .match_body(Matcher::PartialJson(json!({"method": "eth_gasPrice"})))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0xb71b00"}"#)
            .create_async()
            .await;

        let server = spawn_server(rpc.url(), PathBuf::from("/nonexistent")).await;
        let response = reqwest::get(format!("{}/api/gas", server.base)).await.unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["cache-control"], "no-store");
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["chain"], "base");
        assert_eq!(body["gasPriceWei"], "12000000");
        assert_eq!(body["gasPriceGwei"], "0.012");
        assert!(body["fetchedAt"].as_i64().unwrap() > 0);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_gas_endpoint_upstream_failure() {
        let mut rpc = Server::new_async().await;
        let _mock = rpc
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"down"}}"#)
            .create_async()
            .await;

        let server = spawn_server(rpc.url(), PathBuf::from("/nonexistent")).await;
        let response = reqwest::get(format!("{}/api/gas", server.base)).await.unwrap();

        assert_eq!(response.status(), 500);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "Failed to fetch gas price"}));
    }

    #[tokio::test]
    async fn test_manifest_served_verbatim() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let manifest = r#"{"miniapp":{"name":"Base Gas Checker"}}"#;
        file.write_all(manifest.as_bytes()).unwrap();

        let server = spawn_server("http://127.0.0.1:9".to_string(), file.path().to_path_buf()).await;
        let response = reqwest::get(format!("{}/.well-known/farcaster.json", server.base))
            .await
            .unwrap();

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers()["content-type"],
            "application/json; charset=utf-8"
        );
        assert_eq!(response.headers()["cache-control"], "no-store");
        assert_eq!(response.text().await.unwrap(), manifest);
    }

    #[tokio::test]
    async fn test_manifest_missing() {
        let dir = tempfile::tempdir().unwrap();
        let server = spawn_server(
            "http://127.0.0.1:9".to_string(),
            dir.path().join("farcaster.json"),
        )
        .await;
        let response = reqwest::get(format!("{}/.well-known/farcaster.json", server.base))
            .await
            .unwrap();

        assert_eq!(response.status(), 404);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body, json!({"error": "manifest not found"}));
    }

    #[tokio::test]
    async fn test_embed_endpoint() {
        let server = spawn_server("http://127.0.0.1:9".to_string(), PathBuf::new()).await;
        let body: Value = reqwest::get(format!("{}/api/embed", server.base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["fc:miniapp"]["imageUrl"], "https://gas.example/hero.png");
    }
}
