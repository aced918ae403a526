//! Look-at requests
//!
//! Each of these asks the server for a description of one thing: a
//! character, a map tile, an inventory slot, a showcase slot or a quick menu
//! entry.

use rpgclient_core::{CharacterId, ItemId, Location, Result};
use std::fmt;

use crate::command::ClientCommand;
use crate::opcodes::CommandKind;
use crate::values::WireValue;
use crate::writer::WireWriter;

/// `{0xFE}{UINT character}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookAtCharacterCmd {
    pub character: CharacterId,
}

impl LookAtCharacterCmd {
    #[inline]
    pub fn new(character: CharacterId) -> Self {
        Self { character }
    }
}

impl ClientCommand for LookAtCharacterCmd {
    fn id(&self) -> u8 {
        CommandKind::LookAtCharacter.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        self.character.encode(writer)
    }
}

impl fmt::Display for LookAtCharacterCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LookAtCharacterCmd({})", self.character)
    }
}

/// `{0xFF}{LOCATION tile}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookAtTileCmd {
    pub location: Location,
}

impl LookAtTileCmd {
    #[inline]
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

impl ClientCommand for LookAtTileCmd {
    fn id(&self) -> u8 {
        CommandKind::LookAtTile.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        self.location.encode(writer)
    }
}

impl fmt::Display for LookAtTileCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LookAtTileCmd({})", self.location)
    }
}

/// `{0xFD}{UBYTE slot}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookAtInventoryCmd {
    pub slot: u8,
}

impl LookAtInventoryCmd {
    #[inline]
    pub fn new(slot: u8) -> Self {
        Self { slot }
    }
}

impl ClientCommand for LookAtInventoryCmd {
    fn id(&self) -> u8 {
        CommandKind::LookAtInventory.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_ubyte(self.slot)
    }
}

impl fmt::Display for LookAtInventoryCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LookAtInventoryCmd(slot {})", self.slot)
    }
}

/// `{0xFC}{UBYTE showcase}{USHORT slot}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookAtShowcaseCmd {
    pub showcase: u8,
    pub slot: u16,
}

impl LookAtShowcaseCmd {
    #[inline]
    pub fn new(showcase: u8, slot: u16) -> Self {
        Self { showcase, slot }
    }
}

impl ClientCommand for LookAtShowcaseCmd {
    fn id(&self) -> u8 {
        CommandKind::LookAtShowcase.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_ubyte(self.showcase)?;
        writer.write_ushort(self.slot)
    }
}

impl fmt::Display for LookAtShowcaseCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LookAtShowcaseCmd(showcase {} slot {})", self.showcase, self.slot)
    }
}

/// Look at an entry of the quick menu
///
/// The item id is sent along with the slot so the server can check that the
/// client's menu is still in sync.
///
/// ```text
/// {0xFB}{UBYTE slot}{USHORT item}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LookAtMenuCmd {
    pub slot: u8,
    pub item: ItemId,
}

impl LookAtMenuCmd {
    #[inline]
    pub fn new(slot: u8, item: ItemId) -> Self {
        Self { slot, item }
    }
}

impl ClientCommand for LookAtMenuCmd {
    fn id(&self) -> u8 {
        CommandKind::LookAtMenu.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_ubyte(self.slot)?;
        self.item.encode(writer)
    }
}

impl fmt::Display for LookAtMenuCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LookAtMenuCmd(slot {} item {})", self.slot, self.item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::payload;

    #[test]
    fn test_look_at_character() {
        let cmd = LookAtCharacterCmd::new(CharacterId::new(0x8000_0001));
        assert_eq!(cmd.id(), 0xFE);
        assert_eq!(payload(&cmd), vec![0x80, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_look_at_tile() {
        let cmd = LookAtTileCmd::new(Location::new(100, 200, -3));
        assert_eq!(cmd.id(), 0xFF);
        assert_eq!(payload(&cmd), vec![0x00, 0x64, 0x00, 0xC8, 0xFF, 0xFD]);
    }

    #[test]
    fn test_look_at_slots() {
        assert_eq!(payload(&LookAtInventoryCmd::new(9)), vec![0x09]);
        assert_eq!(payload(&LookAtShowcaseCmd::new(1, 260)), vec![0x01, 0x01, 0x04]);
    }

    #[test]
    fn test_look_at_menu_sends_item_id() {
        let cmd = LookAtMenuCmd::new(3, ItemId::new(0x0102));
        assert_eq!(cmd.id(), 0xFB);
        assert_eq!(payload(&cmd), vec![0x03, 0x01, 0x02]);
        assert_eq!(cmd.to_string(), "LookAtMenuCmd(slot 3 item 258)");
    }
}
