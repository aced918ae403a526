//! Combat

use rpgclient_core::{CharacterId, Result};
use std::fmt;

use crate::command::{signal_command, ClientCommand};
use crate::opcodes::CommandKind;
use crate::values::WireValue;
use crate::writer::WireWriter;

/// Start attacking a character
///
/// ```text
/// {0xFA}{UINT target}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackCmd {
    pub target: CharacterId,
}

impl AttackCmd {
    #[inline]
    pub fn new(target: CharacterId) -> Self {
        Self { target }
    }
}

impl ClientCommand for AttackCmd {
    fn id(&self) -> u8 {
        CommandKind::Attack.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        self.target.encode(writer)
    }
}

impl fmt::Display for AttackCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AttackCmd({})", self.target)
    }
}

signal_command! {
    /// Stop the current attack
    StandDownCmd => StandDown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::payload;

    #[test]
    fn test_attack_layout() {
        let cmd = AttackCmd::new(CharacterId::new(42));
        assert_eq!(cmd.id(), 0xFA);
        assert_eq!(payload(&cmd), vec![0, 0, 0, 42]);
        assert_eq!(cmd.to_string(), "AttackCmd(#42)");
    }

    #[test]
    fn test_stand_down_has_no_payload() {
        assert_eq!(StandDownCmd.id(), 0xF9);
        assert!(payload(&StandDownCmd).is_empty());
        assert_eq!(StandDownCmd::new().to_string(), "StandDownCmd()");
    }
}
