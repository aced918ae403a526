//! # RPGClient Protocol Library
//!
//! This library implements the client-to-server half of the game protocol:
//! every command the client can send, encoded byte-for-byte the way the
//! server's decoder expects.
//!
//! ## Architecture
//!
//! ### 1. Wire Primitives ([`writer`], [`reader`], [`values`])
//! Big-endian integers, length-prefixed ISO-8859-1 strings and map
//! locations, plus the encoders for the shared value types
//! (`CharacterId`, `ItemCount`, `ItemId`, `Location`, `Direction`).
//!
//! ### 2. Command Contract ([`command`], [`opcodes`])
//! The [`ClientCommand`] trait and the [`CommandKind`] opcode registry.
//!
//! ### 3. Commands
//! - [`movement`] - moving and turning
//! - [`look`] - look-at requests
//! - [`drag`] - the twelve drag variants
//! - [`dialog`] - message, input and selection dialog answers
//! - [`trade`] - merchant and crafting dialog actions
//! - [`container`] - showcases, bags and picking items up
//! - [`combat`] - attacking
//! - [`chat`] - say, shout and whisper
//! - [`session`] - login, logoff, keepalive, introduction
//!
//! ### 4. Framing ([`frame`])
//! The header the transport wraps around each payload.
//!
//! ## Usage Example
//!
//! ```rust
//! use rpgclient_core::{CharacterId, Direction};
//! use rpgclient_protocol::{CommandFrame, MoveCmd, MoveMode};
//! use bytes::BytesMut;
//!
//! let cmd = MoveCmd::new(CharacterId::new(7), Direction::North, MoveMode::Walk);
//! let frame = CommandFrame::from_command(&cmd).unwrap();
//!
//! let mut buf = BytesMut::new();
//! frame.write_to(&mut buf).unwrap();
//! assert_eq!(buf.len(), 6 + 6);
//! ```

pub mod writer;
pub mod reader;
pub mod values;
pub mod opcodes;
pub mod command;
pub mod movement;
pub mod look;
pub mod drag;
pub mod dialog;
pub mod trade;
pub mod container;
pub mod combat;
pub mod chat;
pub mod session;
pub mod frame;

// Re-export commonly used items
pub use writer::*;
pub use reader::*;
pub use values::*;
pub use opcodes::*;
pub use command::{encode_payload, encode_payload_with_limit, ClientCommand};
pub use movement::*;
pub use look::*;
pub use drag::*;
pub use dialog::*;
pub use trade::*;
pub use container::*;
pub use combat::*;
pub use chat::*;
pub use session::*;
pub use frame::*;
