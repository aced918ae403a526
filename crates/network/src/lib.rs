//! # RPGClient Networking Layer
//!
//! This crate provides the Tokio-based connection to the game server.
//!
//! ## Modules
//!
//! - [`config`] - Connection options
//! - [`codec`] - Frame codec for `tokio_util`
//! - [`connection`] - Connection tasks and the handle used to send commands

pub mod config;
pub mod codec;
pub mod connection;

// Re-export commonly used items
pub use config::ConnectionConfig;
pub use codec::CommandCodec;
pub use connection::{ConnectionHandle, ConnectionState};
