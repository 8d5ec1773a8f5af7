//! Configuration tests
//!
//! The round-trip tests guard `to_toml()`: when a field is added to the
//! file layer but not to the template (or vice versa), they fail.

use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn parse(toml_str: &str) -> FileConfig {
    toml::from_str(toml_str).unwrap_or_else(|e| panic!("TOML should parse: {}\n{}", e, toml_str))
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let file = parse(&config.to_toml());
    let loaded = Config::from_sources(file, no_env);

    assert_eq!(loaded.endpoint_url, config.endpoint_url);
    assert_eq!(loaded.refresh, config.refresh);
    assert_eq!(loaded.app_name, config.app_name);
    assert_eq!(loaded.server.bind_addr, config.server.bind_addr);
    assert_eq!(loaded.server.rpc_url, config.server.rpc_url);
    assert_eq!(loaded.logging.file_rotation, config.logging.file_rotation);
    assert!(loaded.host.share_command.is_none());
}

#[test]
fn test_config_roundtrip_customized() {
    let mut config = Config::default();
    config.endpoint_url = "https://gas.example/api/gas".to_string();
    config.refresh = RefreshInterval::Off;
    config.share_url = "https://gas.example".to_string();
    config.host.share_command = Some("printf '%s' \"$GASGAUGE_TEXT\" | wl-copy".to_string());
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let loaded = Config::from_sources(parse(&config.to_toml()), no_env);

    assert_eq!(loaded.endpoint_url, "https://gas.example/api/gas");
    assert_eq!(loaded.refresh, RefreshInterval::Off);
    assert_eq!(loaded.share_url, "https://gas.example");
    assert_eq!(loaded.host.share_command, config.host.share_command);
    assert!(loaded.host.add_app_command.is_none());
    assert!(loaded.logging.file_enabled);
    assert_eq!(loaded.logging.file_rotation, LogRotation::Hourly);
}

#[test]
fn test_config_roundtrip_escapes_control_chars() {
    let mut config = Config::default();
    config.app_name = "Gas \x1b[1m\"Gauge\"\\\t".to_string();
    config.host.share_command = Some("echo \x07 'done'".to_string());

    let toml_str = config.to_toml();
    assert!(!toml_str.contains("\\u{"));

    let loaded = Config::from_sources(parse(&toml_str), no_env);
    assert_eq!(loaded.app_name, config.app_name);
    assert_eq!(loaded.host.share_command, config.host.share_command);
}

// ─────────────────────────────────────────────────────────────────────────────
// Precedence tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file = parse(
        r#"
endpoint_url = "http://file/api/gas"
refresh = "30s"

[server]
bind_addr = "0.0.0.0:4000"
"#,
    );
    let env: HashMap<&str, &str> = [
        ("GASGAUGE_ENDPOINT", "http://env/api/gas"),
        ("GASGAUGE_REFRESH", "5"),
        ("GASGAUGE_BIND", "127.0.0.1:5000"),
        ("GASGAUGE_NO_TUI", "1"),
        ("GASGAUGE_DEMO", "true"),
    ]
    .into_iter()
    .collect();

    let config = Config::from_sources(file, |k| env.get(k).map(|v| v.to_string()));

    assert_eq!(config.endpoint_url, "http://env/api/gas");
    assert_eq!(config.refresh, RefreshInterval::Secs5);
    assert_eq!(config.server.bind_addr.port(), 5000);
    assert!(!config.enable_tui);
    assert!(config.demo_mode);
}

#[test]
fn test_file_overrides_defaults() {
    let file = parse(
        r#"
refresh = "off"
app_name = "Gas"

[server]
chain = "optimism"

[logging]
level = "debug"
"#,
    );
    let config = Config::from_sources(file, no_env);

    assert_eq!(config.refresh, RefreshInterval::Off);
    assert_eq!(config.app_name, "Gas");
    assert_eq!(config.server.chain, "optimism");
    assert_eq!(config.logging.level, "debug");
    // Untouched keys keep their defaults
    assert_eq!(config.server.rpc_url, "https://mainnet.base.org");
    assert!(config.enable_tui);
}

#[test]
fn test_invalid_values_fall_back() {
    let file = parse(
        r#"
refresh = "15s"

[server]
bind_addr = "not an address"

[host]
share_command = "   "
"#,
    );
    let config = Config::from_sources(file, no_env);

    assert_eq!(config.refresh, RefreshInterval::default());
    assert_eq!(config.server.bind_addr, ServerConfig::default().bind_addr);
    assert!(!config.host.is_attached());
}

#[test]
fn test_app_url_follows_share_url() {
    let file = parse(r#"share_url = "https://gas.example/""#);
    let config = Config::from_sources(file, no_env);
    assert_eq!(config.server.app_url, "https://gas.example");

    let config = Config::from_sources(FileConfig::default(), no_env);
    assert_eq!(config.server.app_url, "http://127.0.0.1:3000");
}

#[test]
fn test_rotation_parse() {
    assert_eq!(LogRotation::parse("weekly"), None);
    assert_eq!(LogRotation::parse(" HOURLY "), Some(LogRotation::Hourly));
}

#[test]
fn test_invalid_logging_values_fall_back() {
    let file = parse(
        r#"
[logging]
level = "LOUD"
file_rotation = "weekly"
file_prefix = ""
"#,
    );
    let config = Config::from_sources(file, no_env);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file_rotation, LogRotation::Daily);
    assert_eq!(config.logging.file_prefix, "gasgauge");
}

#[test]
fn test_logging_level_is_normalized() {
    let file = parse(
        r#"
[logging]
level = "DEBUG"
"#,
    );
    let config = Config::from_sources(file, no_env);
    assert_eq!(config.logging.level, "debug");
}
