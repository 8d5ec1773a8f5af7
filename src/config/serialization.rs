//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

/// A TOML basic string, escaped the way the parser reads it back
fn quoted(s: &str) -> String {
    toml::Value::String(s.to_string()).to_string()
}

impl Config {
    /// Render an optional command as a TOML line, commented out when unset
    fn command_line(key: &str, value: &Option<String>, example: &str) -> String {
        match value {
            Some(cmd) => format!("{} = {}\n", key, quoted(cmd)),
            None => format!("# {} = {}\n", key, quoted(example)),
        }
    }

    /// Serialize the config as a commented TOML file
    pub fn to_toml(&self) -> String {
        let share_command = Self::command_line(
            "share_command",
            &self.host.share_command,
            "notify-send \"$GASGAUGE_TEXT\"",
        );
        let add_app_command =
            Self::command_line("add_app_command", &self.host.add_app_command, "true");

        format!(
            r#"# gasgauge configuration

# Gas endpoint polled by the dashboard (served by `gasgauge serve`)
endpoint_url = {endpoint}

# Auto refresh: off, 5s, 10s, 20s, 30s, 60s
refresh = {refresh}

# Title used in copied text
app_name = {app_name}

# Public URL appended to shared text (empty = none)
share_url = {share_url}

# Per-request timeout for the gas endpoint
request_timeout_secs = {timeout}

# Endpoint server (`gasgauge serve`)
[server]
bind_addr = {bind}
rpc_url = {rpc_url}
chain = {chain}
manifest_path = {manifest}

# Host bridge commands. Shared text is passed in $GASGAUGE_TEXT.
[host]
{share_command}{add_app_command}
# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# File logging (in addition to TUI buffer or stdout)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = {log_file_rotation}  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            endpoint = quoted(&self.endpoint_url),
            refresh = quoted(&self.refresh.label().to_lowercase()),
            app_name = quoted(&self.app_name),
            share_url = quoted(&self.share_url),
            timeout = self.request_timeout_secs,
            bind = quoted(&self.server.bind_addr.to_string()),
            rpc_url = quoted(&self.server.rpc_url),
            chain = quoted(&self.server.chain),
            manifest = quoted(&self.server.manifest_path.display().to_string()),
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = quoted(self.logging.file_rotation.as_str()),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
