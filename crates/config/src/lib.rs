//! RPGClient Configuration Management
//!
//! Loads the client configuration from `clientoptions.txt`.
//!
//! # Format
//!
//! One `key = value` pair per line. Blank lines and lines starting with `#`
//! are skipped. Unknown keys are ignored, and a value that does not parse
//! keeps the default for its key.
//!
//! ```text
//! # clientoptions.txt
//! serverhost = game.example.org
//! serverport = 3012
//! account = Hero
//! keepalive = 10
//! ```

use rpgclient_core::{ClientError, Result};
use std::fs;
use std::net::{SocketAddr, ToSocketAddrs};
use std::path::Path;
use std::time::Duration;

/// Default configuration file, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = "config/clientoptions.txt";

/// Complete client configuration
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Game server host name or IP (from "serverhost")
    pub server_host: String,
    /// Game server port (from "serverport", default: 3012)
    pub server_port: u16,
    /// Protocol version sent with the login (from "clientversion")
    pub client_version: u8,
    /// Character name (from "account")
    pub account: String,
    /// Password (from "password")
    pub password: String,
    /// Seconds between keepalives (from "keepalive")
    pub keepalive_secs: u64,
    /// Largest payload the client will encode (from "maxpayload")
    pub max_payload: usize,
    /// Disable Nagle's algorithm (from "nodelay")
    pub nodelay: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_host: "127.0.0.1".into(),
            server_port: 3012,
            client_version: 122,
            account: String::new(),
            password: String::new(),
            keepalive_secs: 10,
            max_payload: 0xFFFF,
            nodelay: true,
        }
    }
}

// Keep the password out of logs
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("client_version", &self.client_version)
            .field("account", &self.account)
            .field("password", &"***")
            .field("keepalive_secs", &self.keepalive_secs)
            .field("max_payload", &self.max_payload)
            .field("nodelay", &self.nodelay)
            .finish()
    }
}

impl ClientConfig {
    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ClientError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Ok(Self::parse(&content))
    }

    /// Load configuration from [`DEFAULT_CONFIG_PATH`]
    pub fn load_default() -> Result<Self> {
        Self::load_from_file(DEFAULT_CONFIG_PATH)
    }

    /// Parse clientoptions.txt content
    pub fn parse(content: &str) -> Self {
        let mut config = Self::default();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                config.parse_option(key.trim(), value.trim());
            }
        }

        config
    }

    fn parse_option(&mut self, key: &str, value: &str) {
        match key {
            "serverhost" => self.server_host = value.into(),
            "serverport" => {
                self.server_port = value.parse().unwrap_or(3012);
            }
            "clientversion" => {
                self.client_version = value.parse().unwrap_or(122);
            }
            "account" => self.account = value.into(),
            "password" => self.password = value.into(),
            "keepalive" => {
                self.keepalive_secs = value.parse().unwrap_or(10);
            }
            "maxpayload" => {
                self.max_payload = value.parse().unwrap_or(0xFFFF);
            }
            "nodelay" => {
                self.nodelay = value.parse().unwrap_or(true);
            }
            _ => {
                tracing::debug!("Unknown config option: {} = {}", key, value);
            }
        }
    }

    pub fn keepalive_interval(&self) -> Duration {
        Duration::from_secs(self.keepalive_secs.max(1))
    }

    /// Resolve the server address
    pub fn server_address(&self) -> Result<SocketAddr> {
        let target = format!("{}:{}", self.server_host, self.server_port);
        target
            .to_socket_addrs()
            .map_err(|e| ClientError::Config(format!("Cannot resolve {}: {}", target, e)))?
            .next()
            .ok_or_else(|| ClientError::Config(format!("No address for {}", target)))
    }

    /// Check the values a connection needs
    pub fn validate(&self) -> Result<()> {
        if self.account.is_empty() {
            return Err(ClientError::Config("No account configured".into()));
        }
        self.validate_limits()
    }

    /// Check the transport limits alone, without requiring an account
    pub fn validate_limits(&self) -> Result<()> {
        if self.max_payload == 0 || self.max_payload > 0xFFFF {
            return Err(ClientError::Config(format!(
                "maxpayload must be within 1..=65535, got {}",
                self.max_payload
            )));
        }
        Ok(())
    }

    /// Display configuration summary
    pub fn display(&self) {
        tracing::info!("Client configuration:");
        tracing::info!("  Server: {}:{}", self.server_host, self.server_port);
        tracing::info!("  Client version: {}", self.client_version);
        tracing::info!("  Account: {}", self.account);
        tracing::info!("  Password: {}", if self.password.is_empty() { "(none)" } else { "***" });
        tracing::info!("  Keepalive: {}s", self.keepalive_secs);
        tracing::info!("  Max payload: {} bytes", self.max_payload);
        tracing::info!("  TCP_NODELAY: {}", self.nodelay);
    }
}
