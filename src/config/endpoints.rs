//! Server and host bridge configuration
//!
//! - Server: bind address, upstream RPC and the manifest served by `gasgauge serve`
//! - Host: shell commands that stand in for a host's share and add-app capabilities

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Server Configuration
// ─────────────────────────────────────────────────────────────────────────────

const DEFAULT_BIND: &str = "127.0.0.1:3000";
const DEFAULT_RPC_URL: &str = "https://mainnet.base.org";
const DEFAULT_CHAIN: &str = "base";
const DEFAULT_MANIFEST: &str = "./public/.well-known/farcaster.json";

/// Endpoint server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address `gasgauge serve` listens on
    pub bind_addr: SocketAddr,
    /// JSON-RPC endpoint queried for `eth_gasPrice`
    pub rpc_url: String,
    /// Chain name reported in readings
    pub chain: String,
    /// Static manifest served at /.well-known/farcaster.json
    pub manifest_path: PathBuf,
    /// Public base URL used for embed image and launch links
    pub app_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let bind_addr = default_bind();
        Self {
            bind_addr,
            rpc_url: DEFAULT_RPC_URL.to_string(),
            chain: DEFAULT_CHAIN.to_string(),
            manifest_path: PathBuf::from(DEFAULT_MANIFEST),
            app_url: format!("http://{}", bind_addr),
        }
    }
}

fn default_bind() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 3000))
}

/// Server settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileServer {
    pub bind_addr: Option<String>,
    pub rpc_url: Option<String>,
    pub chain: Option<String>,
    pub manifest_path: Option<String>,
}

impl ServerConfig {
    /// Create from file config, env overrides and the shared public URL
    pub fn from_file(
        file: Option<FileServer>,
        env_bind: Option<String>,
        env_rpc: Option<String>,
        share_url: &str,
    ) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let bind_str = env_bind
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr = match bind_str.parse() {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Invalid bind address {:?} ({}), using {}", bind_str, e, DEFAULT_BIND);
                default_bind()
            }
        };

        let app_url = if share_url.is_empty() {
            format!("http://{}", bind_addr)
        } else {
            share_url.trim_end_matches('/').to_string()
        };

        Self {
            bind_addr,
            rpc_url: env_rpc.or(file.rpc_url).unwrap_or(defaults.rpc_url),
            chain: file.chain.unwrap_or(defaults.chain),
            manifest_path: file
                .manifest_path
                .map(PathBuf::from)
                .unwrap_or(defaults.manifest_path),
            app_url,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host Bridge Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Host bridge configuration
///
/// With neither command set the dashboard runs detached: share falls back
/// to the clipboard and add-to-apps reports its failure notice.
#[derive(Debug, Clone, Default)]
pub struct HostConfig {
    /// Shell command run for share; the text is in `$GASGAUGE_TEXT`
    pub share_command: Option<String>,
    /// Shell command run for add-to-apps
    pub add_app_command: Option<String>,
}

/// Host settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileHost {
    pub share_command: Option<String>,
    pub add_app_command: Option<String>,
}

impl HostConfig {
    pub fn from_file(file: Option<FileHost>) -> Self {
        let file = file.unwrap_or_default();
        Self {
            share_command: file.share_command.filter(|s| !s.trim().is_empty()),
            add_app_command: file.add_app_command.filter(|s| !s.trim().is_empty()),
        }
    }

    /// Whether any host capability is configured
    pub fn is_attached(&self) -> bool {
        self.share_command.is_some() || self.add_app_command.is_some()
    }
}
