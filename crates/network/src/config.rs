//! # Connection Configuration
//!
//! Options for the connection to the game server.
//!
//! # Example
//!
//! ```rust
//! use rpgclient_network::ConnectionConfig;
//! use std::time::Duration;
//!
//! let config = ConnectionConfig {
//!     server_address: "127.0.0.1:3012".parse().unwrap(),
//!     keepalive_interval: Duration::from_secs(5),
//!     ..Default::default()
//! };
//! ```

use rpgclient_config::ClientConfig;
use rpgclient_core::Result;
use std::net::SocketAddr;
use std::time::Duration;

/// Connection options
///
/// # Default Values
/// - `127.0.0.1:3012`
/// - keepalive every 10 seconds
/// - 10-second connect timeout
/// - 65535-byte payload limit (the most a frame header can describe)
/// - 256 queued frames
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Game server address
    pub server_address: SocketAddr,

    /// Time between keepalive commands
    pub keepalive_interval: Duration,

    /// How long to wait for the TCP handshake
    pub connect_timeout: Duration,

    /// Largest payload accepted for sending or receiving
    pub max_payload: usize,

    /// Disable Nagle's algorithm so small commands go out immediately
    pub nodelay: bool,

    /// Frames that may wait in the outbound queue before `send` blocks
    pub queue_capacity: usize,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            server_address: SocketAddr::from(([127, 0, 0, 1], 3012)),
            keepalive_interval: Duration::from_secs(10),
            connect_timeout: Duration::from_secs(10),
            max_payload: 0xFFFF,
            nodelay: true,
            queue_capacity: 256,
        }
    }
}

impl ConnectionConfig {
    /// Build from the loaded client configuration, resolving the server host
    pub fn from_client_config(config: &ClientConfig) -> Result<Self> {
        config.validate_limits()?;
        Ok(Self {
            server_address: config.server_address()?,
            keepalive_interval: config.keepalive_interval(),
            max_payload: config.max_payload,
            nodelay: config.nodelay,
            ..Default::default()
        })
    }
}
