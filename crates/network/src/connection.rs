//! # Server Connection
//!
//! This module owns the TCP connection to the game server.
//!
//! # Architecture
//!
//! Three Tokio tasks run per connection:
//! - **writer**: drains the outbound queue into a `FramedWrite`
//! - **reader**: drains inbound bytes and notices when the server hangs up
//!   (decoding server messages is not this crate's job)
//! - **keepalive**: queues a [`KeepAliveCmd`] every `keepalive_interval`
//!
//! Commands are encoded on the caller's task, so contract errors (a dialog
//! answer without a dialog id, a trade without an action) are returned by
//! [`ConnectionHandle::send`] and never reach the socket.
//!
//! # Lifecycle
//!
//! ```text
//! Connecting → Connected → Disconnecting → Disconnected
//!                  ↓                            ↑
//!                  └──── server closed / I/O error
//! ```

use futures::SinkExt;
use parking_lot::Mutex;
use rpgclient_core::{ClientError, Result};
use rpgclient_protocol::{ClientCommand, CommandFrame, KeepAliveCmd, LogoffCmd};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot, Notify};
use tokio::task::JoinHandle;
use tokio::time::{interval, timeout, MissedTickBehavior};
use tokio_util::codec::FramedWrite;
use tracing::{debug, error, info, trace, warn};

use crate::codec::CommandCodec;
use crate::config::ConnectionConfig;

/// State of the server connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    /// TCP handshake in progress
    Connecting,

    /// Commands can be sent
    Connected,

    /// Logoff sent, flushing the queue
    Disconnecting,

    /// Connection closed
    Disconnected,
}

/// Messages for the writer task
#[derive(Debug)]
enum Outbound {
    Frame(CommandFrame),
    /// Flush, close the socket and acknowledge
    Shutdown(oneshot::Sender<()>),
}

/// State shared between the handle and its tasks
#[derive(Debug)]
struct Shared {
    state: Mutex<ConnectionState>,
    closed: Notify,
    frames_sent: AtomicU64,
    bytes_received: AtomicU64,
}

impl Shared {
    fn new() -> Self {
        Self {
            state: Mutex::new(ConnectionState::Connecting),
            closed: Notify::new(),
            frames_sent: AtomicU64::new(0),
            bytes_received: AtomicU64::new(0),
        }
    }

    fn state(&self) -> ConnectionState {
        *self.state.lock()
    }

    /// Move from `from` to `to`; any other current state is left alone
    fn transition(&self, from: ConnectionState, to: ConnectionState) -> bool {
        let mut state = self.state.lock();
        if *state != from {
            return false;
        }
        *state = to;
        debug!("Connection state {:?} -> {:?}", from, to);
        true
    }

    fn set_state(&self, state: ConnectionState) {
        let previous = std::mem::replace(&mut *self.state.lock(), state);
        if previous != state {
            debug!("Connection state {:?} -> {:?}", previous, state);
        }
        if state == ConnectionState::Disconnected {
            self.closed.notify_waiters();
        }
    }
}

/// Handle to a live server connection
///
/// Dropping the handle aborts the connection tasks without sending a logoff;
/// use [`ConnectionHandle::disconnect`] to leave cleanly.
#[derive(Debug)]
pub struct ConnectionHandle {
    config: ConnectionConfig,
    sender: mpsc::Sender<Outbound>,
    shared: Arc<Shared>,
    tasks: Vec<JoinHandle<()>>,
}

impl ConnectionHandle {
    /// Connect to the configured server
    pub async fn connect(config: ConnectionConfig) -> Result<Self> {
        let address = config.server_address;
        info!("Connecting to game server at {}", address);

        let stream = timeout(config.connect_timeout, TcpStream::connect(address))
            .await
            .map_err(|_| {
                ClientError::Network(format!(
                    "Timed out after {:?} connecting to {}",
                    config.connect_timeout, address
                ))
            })?
            .map_err(|e| ClientError::Network(format!("Failed to connect to {}: {}", address, e)))?;

        Self::from_stream(stream, config)
    }

    /// Take over an already connected stream
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_stream(stream: TcpStream, config: ConnectionConfig) -> Result<Self> {
        stream.set_nodelay(config.nodelay).map_err(|e| {
            ClientError::Network(format!("Failed to set TCP_NODELAY: {}", e))
        })?;
        let peer = stream.peer_addr()?;

        let shared = Arc::new(Shared::new());
        // before the reader can observe EOF
        shared.transition(ConnectionState::Connecting, ConnectionState::Connected);
        let (read_half, write_half) = stream.into_split();
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));

        let sink = FramedWrite::new(write_half, CommandCodec::new(config.max_payload));
        let tasks = vec![
            tokio::spawn(run_writer(sink, receiver, shared.clone())),
            tokio::spawn(run_reader(read_half, shared.clone())),
            tokio::spawn(run_keepalive(
                sender.clone(),
                config.keepalive_interval,
                shared.clone(),
            )),
        ];

        info!("Connected to game server at {}", peer);

        Ok(Self {
            config,
            sender,
            shared,
            tasks,
        })
    }

    pub fn state(&self) -> ConnectionState {
        self.shared.state()
    }

    pub fn is_connected(&self) -> bool {
        self.state() == ConnectionState::Connected
    }

    /// Frames written to the socket so far
    pub fn frames_sent(&self) -> u64 {
        self.shared.frames_sent.load(Ordering::Relaxed)
    }

    /// Bytes received from the server so far
    pub fn bytes_received(&self) -> u64 {
        self.shared.bytes_received.load(Ordering::Relaxed)
    }

    fn frame(&self, command: &dyn ClientCommand) -> Result<CommandFrame> {
        if !self.is_connected() {
            return Err(ClientError::Network(format!(
                "Cannot send {}: connection is {:?}",
                command,
                self.state()
            )));
        }
        CommandFrame::from_command_with_limit(command, self.config.max_payload)
    }

    /// Encode a command and queue it, waiting for room in the queue
    pub async fn send(&self, command: &dyn ClientCommand) -> Result<()> {
        let frame = self.frame(command)?;
        debug!("Queueing {}", command);
        self.sender
            .send(Outbound::Frame(frame))
            .await
            .map_err(|_| ClientError::Network("Connection writer has stopped".into()))
    }

    /// Encode a command and queue it without waiting
    ///
    /// Fails when the queue is full; usable from synchronous code.
    pub fn try_send(&self, command: &dyn ClientCommand) -> Result<()> {
        let frame = self.frame(command)?;
        debug!("Queueing {}", command);
        self.sender.try_send(Outbound::Frame(frame)).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => {
                ClientError::Network("Outbound queue is full".into())
            }
            mpsc::error::TrySendError::Closed(_) => {
                ClientError::Network("Connection writer has stopped".into())
            }
        })
    }

    /// Wait until the connection is closed by either side
    pub async fn closed(&self) {
        loop {
            let notified = self.shared.closed.notified();
            if self.state() == ConnectionState::Disconnected {
                return;
            }
            notified.await;
        }
    }

    /// Send a logoff, flush everything queued and close the socket
    pub async fn disconnect(self) -> Result<()> {
        if self.state() != ConnectionState::Connected {
            debug!("Disconnect requested while {:?}", self.state());
            return Ok(());
        }

        info!("Logging off");
        let logoff = self.frame(&LogoffCmd)?;
        if !self
            .shared
            .transition(ConnectionState::Connected, ConnectionState::Disconnecting)
        {
            debug!("Connection closed before logoff");
            return Ok(());
        }

        let (ack_tx, ack_rx) = oneshot::channel();
        let queued = self.sender.send(Outbound::Frame(logoff)).await.is_ok()
            && self.sender.send(Outbound::Shutdown(ack_tx)).await.is_ok();

        if queued && ack_rx.await.is_ok() {
            info!("Disconnected from game server");
        } else {
            warn!("Connection closed before logoff was flushed");
        }

        self.shared.set_state(ConnectionState::Disconnected);
        Ok(())
    }
}

impl Drop for ConnectionHandle {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn run_writer(
    mut sink: FramedWrite<OwnedWriteHalf, CommandCodec>,
    mut receiver: mpsc::Receiver<Outbound>,
    shared: Arc<Shared>,
) {
    while let Some(message) = receiver.recv().await {
        match message {
            Outbound::Frame(frame) => {
                let id = frame.id;
                let len = frame.payload.len();
                if let Err(e) = sink.send(frame).await {
                    error!("Failed to send frame 0x{:02X}: {}", id, e);
                    shared.set_state(ConnectionState::Disconnected);
                    break;
                }
                shared.frames_sent.fetch_add(1, Ordering::Relaxed);
                trace!("Sent frame 0x{:02X} ({} byte payload)", id, len);
            }
            Outbound::Shutdown(ack) => {
                if let Err(e) = sink.close().await {
                    warn!("Error closing connection: {}", e);
                }
                let _ = ack.send(());
                break;
            }
        }
    }
    debug!("Writer task finished");
}

async fn run_reader(mut read_half: OwnedReadHalf, shared: Arc<Shared>) {
    let mut buf = vec![0u8; 8192];
    loop {
        match read_half.read(&mut buf).await {
            Ok(0) => {
                info!("Server closed the connection");
                break;
            }
            Ok(n) => {
                shared.bytes_received.fetch_add(n as u64, Ordering::Relaxed);
                trace!("Received {} bytes", n);
            }
            Err(e) => {
                warn!("Read error: {}", e);
                break;
            }
        }
    }
    shared.set_state(ConnectionState::Disconnected);
}

async fn run_keepalive(sender: mpsc::Sender<Outbound>, period: Duration, shared: Arc<Shared>) {
    let mut ticker = interval(period.max(Duration::from_millis(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // the first tick completes immediately
    ticker.tick().await;

    loop {
        ticker.tick().await;
        if shared.state() != ConnectionState::Connected {
            break;
        }

        let frame = match CommandFrame::from_command(&KeepAliveCmd) {
            Ok(frame) => frame,
            Err(e) => {
                error!("Failed to encode keepalive: {}", e);
                break;
            }
        };
        if sender.send(Outbound::Frame(frame)).await.is_err() {
            break;
        }
        trace!("Keepalive queued");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use rpgclient_core::ItemCount;
    use rpgclient_protocol::{CommandKind, CommandReader, LoginCmd, SayCmd, TradeItemCmd};
    use tokio::net::TcpListener;
    use tokio_util::codec::FramedRead;

    async fn pair(keepalive: Duration) -> (ConnectionHandle, TcpStream) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let config = ConnectionConfig {
            server_address: listener.local_addr().unwrap(),
            keepalive_interval: keepalive,
            ..Default::default()
        };

        let (handle, accepted) = tokio::join!(ConnectionHandle::connect(config), listener.accept());
        (handle.unwrap(), accepted.unwrap().0)
    }

    #[tokio::test]
    async fn test_login_reaches_server() {
        let (handle, server) = pair(Duration::from_secs(3600)).await;
        let mut frames = FramedRead::new(server, CommandCodec::default());

        assert!(handle.is_connected());
        handle.send(&LoginCmd::new(5, "Hero", "secret")).await.unwrap();

        let frame = frames.next().await.unwrap().unwrap();
        assert_eq!(frame.kind(), Some(CommandKind::Login));

        let mut reader = CommandReader::new(&frame.payload);
        assert_eq!(reader.read_ubyte().unwrap(), 5);
        assert_eq!(reader.read_string().unwrap(), "Hero");
        assert_eq!(reader.read_string().unwrap(), "secret");
        reader.finish().unwrap();
    }

    #[tokio::test]
    async fn test_disconnect_sends_logoff_and_closes() {
        let (handle, server) = pair(Duration::from_secs(3600)).await;
        let mut frames = FramedRead::new(server, CommandCodec::default());

        handle.send(&SayCmd::say("bye")).await.unwrap();
        handle.disconnect().await.unwrap();

        let say = frames.next().await.unwrap().unwrap();
        assert_eq!(say.kind(), Some(CommandKind::Say));
        let logoff = frames.next().await.unwrap().unwrap();
        assert_eq!(logoff.kind(), Some(CommandKind::Logoff));
        assert!(logoff.payload.is_empty());
        assert!(frames.next().await.is_none());
    }

    #[tokio::test]
    async fn test_keepalive_is_sent() {
        let (_handle, server) = pair(Duration::from_millis(20)).await;
        let mut frames = FramedRead::new(server, CommandCodec::default());

        let frame = tokio::time::timeout(Duration::from_secs(5), frames.next())
            .await
            .expect("keepalive within timeout")
            .unwrap()
            .unwrap();
        assert_eq!(frame.kind(), Some(CommandKind::KeepAlive));
    }

    #[tokio::test]
    async fn test_contract_errors_are_returned_to_caller() {
        let (handle, _server) = pair(Duration::from_secs(3600)).await;

        let err = handle.send(&TradeItemCmd::new(1)).await.unwrap_err();
        assert!(matches!(err, ClientError::MissingField("trade action")));

        let mut trade = TradeItemCmd::new(1);
        trade.buy(0, ItemCount::ONE);
        handle.try_send(&trade).unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_hangup_before_handoff_is_not_overwritten() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();

        for _ in 0..50 {
            let (client, accepted) = tokio::join!(TcpStream::connect(address), listener.accept());
            let client = client.unwrap();
            drop(accepted.unwrap().0);

            let handle = ConnectionHandle::from_stream(client, ConnectionConfig {
                server_address: address,
                keepalive_interval: Duration::from_secs(3600),
                ..Default::default()
            })
            .unwrap();

            tokio::time::timeout(Duration::from_secs(5), handle.closed())
                .await
                .expect("closed after early hangup");
            assert!(!handle.is_connected());
        }
    }

    #[tokio::test]
    async fn test_server_hangup_is_noticed() {
        let (handle, server) = pair(Duration::from_secs(3600)).await;
        drop(server);

        tokio::time::timeout(Duration::from_secs(5), handle.closed())
            .await
            .expect("hangup noticed");
        assert_eq!(handle.state(), ConnectionState::Disconnected);
        assert!(handle.send(&SayCmd::say("anyone?")).await.is_err());
    }
}
