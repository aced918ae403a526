//! Movement and turning

use rpgclient_core::{CharacterId, Direction, Result};
use std::fmt;

use crate::command::ClientCommand;
use crate::opcodes::CommandKind;
use crate::values::WireValue;
use crate::writer::WireWriter;

/// How a character moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveMode {
    Walk = 0x0B,
    /// Push the character standing on the target tile
    Push = 0x0C,
    Run = 0x0D,
}

impl MoveMode {
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x0B => Some(Self::Walk),
            0x0C => Some(Self::Push),
            0x0D => Some(Self::Run),
            _ => None,
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Move a character one step
///
/// # Packet Structure
/// ```text
/// Packet ID: 0x10
/// {
///     UINT  character;  // the character to move
///     UBYTE direction;
///     UBYTE mode;       // 0x0B walk, 0x0C push, 0x0D run
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveCmd {
    pub character: CharacterId,
    pub direction: Direction,
    pub mode: MoveMode,
}

impl MoveCmd {
    #[inline]
    pub fn new(character: CharacterId, direction: Direction, mode: MoveMode) -> Self {
        Self {
            character,
            direction,
            mode,
        }
    }
}

impl ClientCommand for MoveCmd {
    fn id(&self) -> u8 {
        CommandKind::Move.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        self.character.encode(writer)?;
        self.direction.encode(writer)?;
        writer.write_ubyte(self.mode.as_u8())
    }
}

impl fmt::Display for MoveCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MoveCmd({} {} {:?})", self.character, self.direction, self.mode)
    }
}

/// Turn the player to face a direction
///
/// Carries no payload: the opcode is `0x11 + direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnCmd {
    direction: Direction,
}

impl TurnCmd {
    #[inline]
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }

    /// Build from a raw direction value
    ///
    /// # Errors
    /// [`rpgclient_core::ClientError::InvalidDirection`] unless `0 <= direction < 8`.
    pub fn from_index(direction: i32) -> Result<Self> {
        Ok(Self::new(Direction::from_index(direction)?))
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }
}

impl ClientCommand for TurnCmd {
    fn id(&self) -> u8 {
        CommandKind::turn(self.direction).as_u8()
    }

    fn encode(&self, _writer: &mut dyn WireWriter) -> Result<()> {
        Ok(())
    }
}

impl fmt::Display for TurnCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TurnCmd({})", self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::payload;
    use rpgclient_core::ClientError;

    #[test]
    fn test_move_layout() {
        let cmd = MoveCmd::new(CharacterId::new(0x0000_1234), Direction::East, MoveMode::Run);
        assert_eq!(cmd.id(), 0x10);
        assert_eq!(payload(&cmd), vec![0x00, 0x00, 0x12, 0x34, 0x02, 0x0D]);
    }

    #[test]
    fn test_move_modes() {
        for mode in [MoveMode::Walk, MoveMode::Push, MoveMode::Run] {
            let cmd = MoveCmd::new(CharacterId::new(1), Direction::North, mode);
            let bytes = payload(&cmd);
            assert_eq!(bytes.len(), 6);
            assert_eq!(bytes[5], mode.as_u8());
            assert_eq!(MoveMode::from_u8(bytes[5]), Some(mode));
        }
    }

    #[test]
    fn test_turn_opcode_carries_direction() {
        for direction in Direction::ALL {
            let cmd = TurnCmd::new(direction);
            assert_eq!(cmd.id(), 0x11 + direction.as_u8());
            assert!(payload(&cmd).is_empty());
        }
    }

    #[test]
    fn test_turn_rejects_out_of_range_at_construction() {
        assert!(TurnCmd::from_index(0).is_ok());
        assert!(TurnCmd::from_index(7).is_ok());
        assert!(matches!(TurnCmd::from_index(8), Err(ClientError::InvalidDirection(8))));
        assert!(matches!(TurnCmd::from_index(-1), Err(ClientError::InvalidDirection(-1))));
    }

    #[test]
    fn test_display_is_stable() {
        let cmd = MoveCmd::new(CharacterId::new(7), Direction::South, MoveMode::Walk);
        assert_eq!(cmd.to_string(), "MoveCmd(#7 south Walk)");
        assert_eq!(cmd.to_string(), cmd.to_string());
        assert_eq!(TurnCmd::new(Direction::West).to_string(), "TurnCmd(west)");
    }
}
