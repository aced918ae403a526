//! # Client Command Contract
//!
//! A command is a small immutable value describing one player action. It
//! knows its opcode and how to write its payload; the opcode itself is not
//! part of the payload; the frame envelope adds it (see [`crate::frame`]).
//!
//! ## Failure Semantics
//!
//! `encode` returns an error instead of writing a placeholder when a required
//! field was never set (a `-1` dialog id, a trade dialog without an action).
//! Errors raised by the writer propagate unchanged.
//!
//! ## Thread Safety
//!
//! Commands are `Send + Sync` and `encode` only reads `self`, so one instance
//! may be encoded from several threads. The two builders with setters
//! ([`crate::TradeItemCmd`], [`crate::CraftItemCmd`]) need `&mut` to change,
//! which keeps unsynchronized mutation out of shared instances.

use bytes::Bytes;
use rpgclient_core::{ClientError, Result};
use std::fmt;

use crate::opcodes::CommandKind;
use crate::writer::{CommandWriter, WireWriter};

/// An outbound message the client can send to the server
pub trait ClientCommand: fmt::Debug + fmt::Display + Send + Sync {
    /// Opcode identifying this command to the server
    fn id(&self) -> u8;

    /// Write the payload, field by field, in wire order
    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()>;

    /// Registry entry for [`ClientCommand::id`]
    fn kind(&self) -> Option<CommandKind> {
        CommandKind::from_u8(self.id())
    }
}

/// Encode a command's payload into a fresh buffer
pub fn encode_payload(command: &dyn ClientCommand) -> Result<Bytes> {
    encode_payload_with_limit(command, CommandWriter::DEFAULT_LIMIT)
}

/// Encode a command's payload, refusing to grow past `limit` bytes
pub fn encode_payload_with_limit(command: &dyn ClientCommand, limit: usize) -> Result<Bytes> {
    let mut writer = CommandWriter::with_limit(limit);
    command.encode(&mut writer)?;
    tracing::trace!("Encoded {} (0x{:02X}): {} bytes", command, command.id(), writer.len());
    Ok(writer.freeze())
}

/// Reject the `-1` "never set" sentinel (and any other negative id)
pub(crate) fn check_dialog_id(dialog_id: i32) -> Result<()> {
    if dialog_id < 0 {
        return Err(ClientError::MissingField("dialog id"));
    }
    Ok(())
}

/// Success flags are a full byte, `0xFF` or `0x00`
pub(crate) fn write_flag(writer: &mut dyn WireWriter, flag: bool) -> Result<()> {
    writer.write_ubyte(if flag { 0xFF } else { 0x00 })
}

/// Declare a command whose opcode is its whole message
macro_rules! signal_command {
    ($(#[$meta:meta])* $name:ident => $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub struct $name;

        impl $name {
            pub const fn new() -> Self {
                Self
            }
        }

        impl $crate::command::ClientCommand for $name {
            fn id(&self) -> u8 {
                $crate::opcodes::CommandKind::$kind.as_u8()
            }

            fn encode(&self, _writer: &mut dyn $crate::writer::WireWriter) -> rpgclient_core::Result<()> {
                Ok(())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(concat!(stringify!($name), "()"))
            }
        }
    };
}

pub(crate) use signal_command;

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Payload bytes of a command, panicking on encode errors
    pub fn payload(command: &dyn ClientCommand) -> Vec<u8> {
        encode_payload(command).expect("command should encode").to_vec()
    }
}
