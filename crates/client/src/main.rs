//! RPGClient - headless game client
//!
//! Connects to the configured server, logs in and keeps the session alive
//! until Ctrl-C or until the server closes the connection.

use rpgclient_config::{ClientConfig, DEFAULT_CONFIG_PATH};
use rpgclient_network::{ConnectionConfig, ConnectionHandle};
use rpgclient_protocol::LoginCmd;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("RPGClient starting up...");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    info!("Loading configuration from {}...", path);

    let config = match ClientConfig::load_from_file(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to load {}: {}", path, e);
            warn!("Using default configuration");
            ClientConfig::default()
        }
    };

    config.display();
    config.validate()?;

    let connection = ConnectionHandle::connect(ConnectionConfig::from_client_config(&config)?).await?;
    connection
        .send(&LoginCmd::new(
            config.client_version,
            config.account.as_str(),
            config.password.as_str(),
        ))
        .await?;
    info!("Logged in as {}", config.account);

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result?;
            info!("Interrupted, logging off");
        }
        _ = connection.closed() => {
            warn!("Server closed the connection");
        }
    }

    let frames = connection.frames_sent();
    connection.disconnect().await?;
    info!("Session ended after {} frames", frames);
    Ok(())
}
