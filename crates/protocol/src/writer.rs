//! Wire writer primitives
//!
//! All multi-byte integers are written big-endian. Strings are an unsigned
//! 16-bit byte length followed by ISO-8859-1 bytes, with no terminator.

use bytes::{BufMut, Bytes, BytesMut};
use rpgclient_core::{ClientError, Location, Result};

/// Sink for the primitive writes a command payload is made of
///
/// Writes are sequential and append-only. A writer may refuse a write (for
/// example when its capacity is exhausted); the error propagates unchanged
/// out of `encode`.
pub trait WireWriter {
    fn write_byte(&mut self, value: i8) -> Result<()>;
    fn write_ubyte(&mut self, value: u8) -> Result<()>;
    fn write_short(&mut self, value: i16) -> Result<()>;
    fn write_ushort(&mut self, value: u16) -> Result<()>;
    fn write_int(&mut self, value: i32) -> Result<()>;
    fn write_uint(&mut self, value: u32) -> Result<()>;
    fn write_long(&mut self, value: i64) -> Result<()>;
    fn write_string(&mut self, value: &str) -> Result<()>;

    /// Write x, y and z as signed shorts, in that order
    fn write_location(&mut self, location: &Location) -> Result<()> {
        self.write_short(location.x)?;
        self.write_short(location.y)?;
        self.write_short(location.z)
    }
}

/// Encode a string as ISO-8859-1
pub fn encode_latin1(value: &str) -> Result<Vec<u8>> {
    value
        .chars()
        .map(|c| u8::try_from(u32::from(c)).map_err(|_| ClientError::UnmappableCharacter(c)))
        .collect()
}

/// Buffer-backed [`WireWriter`] with a hard capacity limit
///
/// A write that does not fit fails with [`ClientError::BufferOverflow`] and
/// leaves the buffer untouched.
#[derive(Debug, Clone)]
pub struct CommandWriter {
    buf: BytesMut,
    limit: usize,
}

impl CommandWriter {
    /// Largest payload a frame length field can describe
    pub const DEFAULT_LIMIT: usize = u16::MAX as usize;

    pub fn new() -> Self {
        Self::with_limit(Self::DEFAULT_LIMIT)
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(limit.min(256)),
            limit,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Bytes still accepted before the limit is hit
    #[inline]
    pub fn available(&self) -> usize {
        self.limit.saturating_sub(self.buf.len())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    fn reserve(&mut self, needed: usize) -> Result<()> {
        let available = self.available();
        if needed > available {
            return Err(ClientError::BufferOverflow { needed, available });
        }
        Ok(())
    }
}

impl Default for CommandWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl WireWriter for CommandWriter {
    fn write_byte(&mut self, value: i8) -> Result<()> {
        self.reserve(1)?;
        self.buf.put_i8(value);
        Ok(())
    }

    fn write_ubyte(&mut self, value: u8) -> Result<()> {
        self.reserve(1)?;
        self.buf.put_u8(value);
        Ok(())
    }

    fn write_short(&mut self, value: i16) -> Result<()> {
        self.reserve(2)?;
        self.buf.put_i16(value);
        Ok(())
    }

    fn write_ushort(&mut self, value: u16) -> Result<()> {
        self.reserve(2)?;
        self.buf.put_u16(value);
        Ok(())
    }

    fn write_int(&mut self, value: i32) -> Result<()> {
        self.reserve(4)?;
        self.buf.put_i32(value);
        Ok(())
    }

    fn write_uint(&mut self, value: u32) -> Result<()> {
        self.reserve(4)?;
        self.buf.put_u32(value);
        Ok(())
    }

    fn write_long(&mut self, value: i64) -> Result<()> {
        self.reserve(8)?;
        self.buf.put_i64(value);
        Ok(())
    }

    fn write_string(&mut self, value: &str) -> Result<()> {
        let bytes = encode_latin1(value)?;
        let len = u16::try_from(bytes.len()).map_err(|_| {
            ClientError::OutOfRange(format!("string of {} bytes exceeds 65535", bytes.len()))
        })?;

        self.reserve(2 + bytes.len())?;
        self.buf.put_u16(len);
        self.buf.put_slice(&bytes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_are_big_endian() {
        let mut writer = CommandWriter::new();
        writer.write_short(0x0102).unwrap();
        writer.write_uint(0xA1B2_C3D4).unwrap();
        writer.write_byte(-1).unwrap();
        writer.write_long(1).unwrap();

        assert_eq!(
            writer.as_bytes(),
            &[0x01, 0x02, 0xA1, 0xB2, 0xC3, 0xD4, 0xFF, 0, 0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn test_string_is_length_prefixed_latin1() {
        let mut writer = CommandWriter::new();
        writer.write_string("Grüße").unwrap();

        assert_eq!(writer.as_bytes(), &[0x00, 0x05, b'G', b'r', 0xFC, 0xDF, b'e']);
    }

    #[test]
    fn test_string_rejects_non_latin1() {
        let mut writer = CommandWriter::new();
        let err = writer.write_string("→").unwrap_err();
        assert!(matches!(err, ClientError::UnmappableCharacter('→')));
        assert!(writer.is_empty());
    }

    #[test]
    fn test_location_order() {
        let mut writer = CommandWriter::new();
        writer.write_location(&Location::new(1, -2, 3)).unwrap();
        assert_eq!(writer.as_bytes(), &[0x00, 0x01, 0xFF, 0xFE, 0x00, 0x03]);
    }

    #[test]
    fn test_limit_refuses_write() {
        let mut writer = CommandWriter::with_limit(3);
        writer.write_short(7).unwrap();

        let err = writer.write_int(1).unwrap_err();
        assert!(matches!(err, ClientError::BufferOverflow { needed: 4, available: 1 }));
        assert_eq!(writer.len(), 2);

        writer.write_ubyte(9).unwrap();
        assert_eq!(writer.available(), 0);
    }
}
