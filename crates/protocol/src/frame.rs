//! # Command Frame Envelope
//!
//! Command payloads travel inside a fixed six-byte header:
//!
//! ```text
//! {UBYTE opcode}
//! {UBYTE opcode ^ 0xFF}     // header sanity check
//! {USHORT length}           // payload length
//! {USHORT checksum}         // sum of payload bytes, mod 0xFFFF
//! {payload...}
//! ```

use bytes::{Buf, BufMut, Bytes, BytesMut};
use rpgclient_core::{ClientError, Result};

use crate::command::{encode_payload_with_limit, ClientCommand};
use crate::opcodes::CommandKind;
use crate::writer::CommandWriter;

/// Size of the frame header in bytes
pub const HEADER_LEN: usize = 6;

/// Mask applied to the opcode copy in the header
pub const ID_XOR_MASK: u8 = 0xFF;

/// A command ready to be put on the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandFrame {
    pub id: u8,
    pub payload: Bytes,
}

impl CommandFrame {
    #[inline]
    pub fn new(id: u8, payload: Bytes) -> Self {
        Self { id, payload }
    }

    /// Encode a command into a frame
    pub fn from_command(command: &dyn ClientCommand) -> Result<Self> {
        Self::from_command_with_limit(command, CommandWriter::DEFAULT_LIMIT)
    }

    /// Encode a command, failing if its payload exceeds `limit` bytes
    pub fn from_command_with_limit(command: &dyn ClientCommand, limit: usize) -> Result<Self> {
        let payload = encode_payload_with_limit(command, limit.min(CommandWriter::DEFAULT_LIMIT))?;
        Ok(Self::new(command.id(), payload))
    }

    pub fn kind(&self) -> Option<CommandKind> {
        CommandKind::from_u8(self.id)
    }

    /// Header plus payload
    pub fn encoded_len(&self) -> usize {
        HEADER_LEN + self.payload.len()
    }

    /// Payload checksum: byte sum modulo 0xFFFF
    pub fn checksum(payload: &[u8]) -> u16 {
        let sum = payload
            .iter()
            .fold(0u32, |acc, &b| (acc + u32::from(b)) % 0xFFFF);
        sum as u16
    }

    /// Append the header and payload to `buf`
    pub fn write_to(&self, buf: &mut BytesMut) -> Result<()> {
        let len = u16::try_from(self.payload.len()).map_err(|_| {
            ClientError::OutOfRange(format!("payload of {} bytes exceeds 65535", self.payload.len()))
        })?;

        buf.reserve(self.encoded_len());
        buf.put_u8(self.id);
        buf.put_u8(self.id ^ ID_XOR_MASK);
        buf.put_u16(len);
        buf.put_u16(Self::checksum(&self.payload));
        buf.put_slice(&self.payload);
        Ok(())
    }

    /// Parse one frame from the front of `buf`
    ///
    /// # Returns
    /// - `Ok(Some(frame))` - a complete frame was consumed
    /// - `Ok(None)` - more bytes are needed; nothing was consumed
    /// - `Err(e)` - the header or checksum is corrupt, or the payload is
    ///   larger than `max_payload`
    pub fn parse(buf: &mut BytesMut, max_payload: usize) -> Result<Option<Self>> {
        if buf.len() < HEADER_LEN {
            return Ok(None);
        }

        let id = buf[0];
        let check = buf[1];
        if id ^ ID_XOR_MASK != check {
            return Err(ClientError::Protocol(format!(
                "Corrupt frame header: opcode 0x{:02X}, check byte 0x{:02X}",
                id, check
            )));
        }

        let len = usize::from(u16::from_be_bytes([buf[2], buf[3]]));
        if len > max_payload {
            return Err(ClientError::Protocol(format!(
                "Frame payload of {} bytes exceeds limit of {}",
                len, max_payload
            )));
        }
        if buf.len() < HEADER_LEN + len {
            return Ok(None);
        }

        let expected = u16::from_be_bytes([buf[4], buf[5]]);
        buf.advance(HEADER_LEN);
        let payload = buf.split_to(len).freeze();

        let actual = Self::checksum(&payload);
        if actual != expected {
            return Err(ClientError::Protocol(format!(
                "Checksum mismatch for opcode 0x{:02X}: expected 0x{:04X}, got 0x{:04X}",
                id, expected, actual
            )));
        }

        Ok(Some(Self::new(id, payload)))
    }
}
