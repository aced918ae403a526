//! Wire reader, the mirror image of [`crate::writer`]
//!
//! The client never reads its own payloads back during normal operation; the
//! reader exists for frame validation and for tests that decode what a
//! command wrote.

use bytes::Buf;
use rpgclient_core::{ClientError, Location, Result};

/// Cursor over an encoded payload
#[derive(Debug, Clone)]
pub struct CommandReader<'a> {
    buf: &'a [u8],
}

impl<'a> CommandReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    fn need(&self, bytes: usize, what: &str) -> Result<()> {
        if self.buf.remaining() < bytes {
            return Err(ClientError::InvalidData(format!(
                "Not enough bytes for {}: need {}, have {}",
                what,
                bytes,
                self.buf.remaining()
            )));
        }
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<i8> {
        self.need(1, "byte")?;
        Ok(self.buf.get_i8())
    }

    pub fn read_ubyte(&mut self) -> Result<u8> {
        self.need(1, "ubyte")?;
        Ok(self.buf.get_u8())
    }

    pub fn read_short(&mut self) -> Result<i16> {
        self.need(2, "short")?;
        Ok(self.buf.get_i16())
    }

    pub fn read_ushort(&mut self) -> Result<u16> {
        self.need(2, "ushort")?;
        Ok(self.buf.get_u16())
    }

    pub fn read_int(&mut self) -> Result<i32> {
        self.need(4, "int")?;
        Ok(self.buf.get_i32())
    }

    pub fn read_uint(&mut self) -> Result<u32> {
        self.need(4, "uint")?;
        Ok(self.buf.get_u32())
    }

    pub fn read_long(&mut self) -> Result<i64> {
        self.need(8, "long")?;
        Ok(self.buf.get_i64())
    }

    /// Read a length-prefixed ISO-8859-1 string
    pub fn read_string(&mut self) -> Result<String> {
        let len = usize::from(self.read_ushort()?);
        self.need(len, "string")?;

        let (text, rest) = self.buf.split_at(len);
        self.buf = rest;
        Ok(text.iter().map(|&b| char::from(b)).collect())
    }

    pub fn read_location(&mut self) -> Result<Location> {
        let x = self.read_short()?;
        let y = self.read_short()?;
        let z = self.read_short()?;
        Ok(Location::new(x, y, z))
    }

    /// Fail if anything is left unread
    pub fn finish(self) -> Result<()> {
        if !self.buf.is_empty() {
            return Err(ClientError::InvalidData(format!(
                "{} trailing bytes after payload",
                self.buf.len()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::{CommandWriter, WireWriter};

    #[test]
    fn test_reads_what_writer_wrote() {
        let mut writer = CommandWriter::new();
        writer.write_ubyte(200).unwrap();
        writer.write_string("Grüße").unwrap();
        writer.write_int(-5).unwrap();
        writer.write_location(&Location::new(-7, 8, 1)).unwrap();

        let mut reader = CommandReader::new(writer.as_bytes());
        assert_eq!(reader.read_ubyte().unwrap(), 200);
        assert_eq!(reader.read_string().unwrap(), "Grüße");
        assert_eq!(reader.read_int().unwrap(), -5);
        assert_eq!(reader.read_location().unwrap(), Location::new(-7, 8, 1));
        reader.finish().unwrap();
    }

    #[test]
    fn test_truncated_input() {
        let mut reader = CommandReader::new(&[0x00, 0x04, b'a']);
        assert!(matches!(reader.read_string(), Err(ClientError::InvalidData(_))));

        let mut reader = CommandReader::new(&[0x01]);
        assert!(reader.read_ushort().is_err());
    }

    #[test]
    fn test_finish_detects_trailing_bytes() {
        let mut reader = CommandReader::new(&[1, 2]);
        reader.read_ubyte().unwrap();
        assert!(reader.finish().is_err());
    }
}
