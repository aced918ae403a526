//! Encoders for the shared value types
//!
//! Commands carrying one of these values call its encoder instead of
//! flattening it by hand, so each format lives in exactly one place.

use rpgclient_core::{CharacterId, ClientError, Direction, ItemCount, ItemId, Location, Result};

use crate::reader::CommandReader;
use crate::writer::WireWriter;

/// Trait for values with a fixed wire representation
pub trait WireValue: Sized {
    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()>;
    fn decode(reader: &mut CommandReader<'_>) -> Result<Self>;
}

/// `{UINT id}`
impl WireValue for CharacterId {
    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_uint(self.0)
    }

    fn decode(reader: &mut CommandReader<'_>) -> Result<Self> {
        Ok(Self(reader.read_uint()?))
    }
}

/// `{USHORT count}`
impl WireValue for ItemCount {
    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_ushort(self.0)
    }

    fn decode(reader: &mut CommandReader<'_>) -> Result<Self> {
        Ok(Self(reader.read_ushort()?))
    }
}

/// `{USHORT id}`
impl WireValue for ItemId {
    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_ushort(self.0)
    }

    fn decode(reader: &mut CommandReader<'_>) -> Result<Self> {
        Ok(Self(reader.read_ushort()?))
    }
}

/// `{SHORT x}{SHORT y}{SHORT z}`
impl WireValue for Location {
    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_location(self)
    }

    fn decode(reader: &mut CommandReader<'_>) -> Result<Self> {
        reader.read_location()
    }
}

/// `{UBYTE direction}`
impl WireValue for Direction {
    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_ubyte(self.as_u8())
    }

    fn decode(reader: &mut CommandReader<'_>) -> Result<Self> {
        let raw = reader.read_ubyte()?;
        Direction::from_u8(raw).ok_or(ClientError::InvalidDirection(i32::from(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::CommandWriter;

    #[test]
    fn test_value_widths() {
        let mut writer = CommandWriter::new();
        CharacterId::new(0x0102_0304).encode(&mut writer).unwrap();
        ItemCount::new(300).encode(&mut writer).unwrap();
        ItemId::new(7).encode(&mut writer).unwrap();
        Direction::SouthWest.encode(&mut writer).unwrap();

        assert_eq!(
            writer.as_bytes(),
            &[0x01, 0x02, 0x03, 0x04, 0x01, 0x2C, 0x00, 0x07, 0x05]
        );
    }

    #[test]
    fn test_direction_decode_rejects_garbage() {
        let mut reader = CommandReader::new(&[9]);
        assert!(matches!(
            Direction::decode(&mut reader),
            Err(ClientError::InvalidDirection(9))
        ));
    }
}
