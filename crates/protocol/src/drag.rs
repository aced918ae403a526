//! # Drag Commands
//!
//! A drag moves items from one endpoint to another. There are four kinds of
//! source and three kinds of destination; each of the twelve combinations
//! has its own opcode and a fixed payload layout:
//!
//! ```text
//! {SOURCE}{DESTINATION}{USHORT count}
//! ```
//!
//! ## Endpoint Locators
//!
//! | Endpoint   | Locator                          | Bytes |
//! |------------|----------------------------------|-------|
//! | Inventory  | `{UBYTE slot}`                   | 1     |
//! | Map (near) | `{UBYTE direction}` from player  | 1     |
//! | Map        | `{LOCATION tile}`                | 6     |
//! | Showcase   | `{UBYTE showcase}{USHORT slot}`  | 3     |
//!
//! Items can only be picked off the map from a tile next to the player
//! (addressed by direction) or from an explicit location; they are always
//! dropped onto an explicit location.
//!
//! The count is always written, even for a single item.

use rpgclient_core::{Direction, ItemCount, Location, Result};
use std::fmt;

use crate::command::ClientCommand;
use crate::opcodes::CommandKind;
use crate::values::WireValue;
use crate::writer::WireWriter;

/// Where dragged items come from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Inventory { slot: u8 },
    /// Tile adjacent to the player
    MapNear { direction: Direction },
    Map { location: Location },
    Showcase { showcase: u8, slot: u16 },
}

impl DragSource {
    pub fn inventory(slot: u8) -> Self {
        Self::Inventory { slot }
    }

    pub fn map_near(direction: Direction) -> Self {
        Self::MapNear { direction }
    }

    pub fn map(location: Location) -> Self {
        Self::Map { location }
    }

    pub fn showcase(showcase: u8, slot: u16) -> Self {
        Self::Showcase { showcase, slot }
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        match self {
            Self::Inventory { slot } => writer.write_ubyte(*slot),
            Self::MapNear { direction } => direction.encode(writer),
            Self::Map { location } => location.encode(writer),
            Self::Showcase { showcase, slot } => write_showcase_slot(writer, *showcase, *slot),
        }
    }
}

impl fmt::Display for DragSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inventory { slot } => write!(f, "inventory {}", slot),
            Self::MapNear { direction } => write!(f, "map {}", direction),
            Self::Map { location } => write!(f, "map {}", location),
            Self::Showcase { showcase, slot } => write!(f, "showcase {}/{}", showcase, slot),
        }
    }
}

/// Where dragged items go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragTarget {
    Inventory { slot: u8 },
    Map { location: Location },
    Showcase { showcase: u8, slot: u16 },
}

impl DragTarget {
    pub fn inventory(slot: u8) -> Self {
        Self::Inventory { slot }
    }

    pub fn map(location: Location) -> Self {
        Self::Map { location }
    }

    pub fn showcase(showcase: u8, slot: u16) -> Self {
        Self::Showcase { showcase, slot }
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        match self {
            Self::Inventory { slot } => writer.write_ubyte(*slot),
            Self::Map { location } => location.encode(writer),
            Self::Showcase { showcase, slot } => write_showcase_slot(writer, *showcase, *slot),
        }
    }
}

impl fmt::Display for DragTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inventory { slot } => write!(f, "inventory {}", slot),
            Self::Map { location } => write!(f, "map {}", location),
            Self::Showcase { showcase, slot } => write!(f, "showcase {}/{}", showcase, slot),
        }
    }
}

fn write_showcase_slot(writer: &mut dyn WireWriter, showcase: u8, slot: u16) -> Result<()> {
    writer.write_ubyte(showcase)?;
    writer.write_ushort(slot)
}

/// Move items between two endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DragCmd {
    pub source: DragSource,
    pub target: DragTarget,
    pub count: ItemCount,
}

impl DragCmd {
    #[inline]
    pub fn new(source: DragSource, target: DragTarget, count: ItemCount) -> Self {
        Self {
            source,
            target,
            count,
        }
    }

    /// Opcode for this source/destination pair
    pub fn command_kind(&self) -> CommandKind {
        use DragSource as S;
        use DragTarget as T;

        match (&self.source, &self.target) {
            (S::Inventory { .. }, T::Inventory { .. }) => CommandKind::DragInvInv,
            (S::Inventory { .. }, T::Map { .. }) => CommandKind::DragInvMap,
            (S::Inventory { .. }, T::Showcase { .. }) => CommandKind::DragInvSc,
            (S::MapNear { .. }, T::Inventory { .. }) => CommandKind::DragMapNearInv,
            (S::MapNear { .. }, T::Map { .. }) => CommandKind::DragMapNearMap,
            (S::MapNear { .. }, T::Showcase { .. }) => CommandKind::DragMapNearSc,
            (S::Map { .. }, T::Inventory { .. }) => CommandKind::DragMapInv,
            (S::Map { .. }, T::Map { .. }) => CommandKind::DragMapMap,
            (S::Map { .. }, T::Showcase { .. }) => CommandKind::DragMapSc,
            (S::Showcase { .. }, T::Inventory { .. }) => CommandKind::DragScInv,
            (S::Showcase { .. }, T::Map { .. }) => CommandKind::DragScMap,
            (S::Showcase { .. }, T::Showcase { .. }) => CommandKind::DragScSc,
        }
    }
}

impl ClientCommand for DragCmd {
    fn id(&self) -> u8 {
        self.command_kind().as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        self.source.encode(writer)?;
        self.target.encode(writer)?;
        self.count.encode(writer)
    }
}

impl fmt::Display for DragCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DragCmd({} -> {} x{})", self.source, self.target, self.count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::testing::payload;
    use std::collections::HashSet;

    fn sources() -> [DragSource; 4] {
        [
            DragSource::inventory(4),
            DragSource::map_near(Direction::SouthEast),
            DragSource::map(Location::new(10, -20, 1)),
            DragSource::showcase(2, 300),
        ]
    }

    fn targets() -> [DragTarget; 3] {
        [
            DragTarget::inventory(11),
            DragTarget::map(Location::new(-1, 2, 0)),
            DragTarget::showcase(0, 7),
        ]
    }

    fn locator_len(cmd: &DragCmd) -> usize {
        let source = match cmd.source {
            DragSource::Inventory { .. } | DragSource::MapNear { .. } => 1,
            DragSource::Map { .. } => 6,
            DragSource::Showcase { .. } => 3,
        };
        let target = match cmd.target {
            DragTarget::Inventory { .. } => 1,
            DragTarget::Map { .. } => 6,
            DragTarget::Showcase { .. } => 3,
        };
        source + target
    }

    #[test]
    fn test_every_pair_has_its_own_drag_opcode() {
        let mut seen = HashSet::new();
        for source in sources() {
            for target in targets() {
                let cmd = DragCmd::new(source, target, ItemCount::ONE);
                assert!(cmd.command_kind().is_drag());
                assert!(seen.insert(cmd.id()), "duplicate opcode for {}", cmd);
            }
        }
        assert_eq!(seen.len(), 12);
    }

    #[test]
    fn test_count_only_changes_suffix() {
        for source in sources() {
            for target in targets() {
                let single = payload(&DragCmd::new(source, target, ItemCount::ONE));
                let stack = payload(&DragCmd::new(source, target, ItemCount::new(250)));
                let prefix = locator_len(&DragCmd::new(source, target, ItemCount::ONE));

                assert_eq!(single.len(), prefix + 2);
                assert_eq!(stack.len(), prefix + 2);
                assert_eq!(single[..prefix], stack[..prefix]);
                assert_eq!(single[prefix..], [0x00u8, 0x01]);
                assert_eq!(stack[prefix..], [0x00u8, 0xFA]);
            }
        }
    }

    #[test]
    fn test_inventory_to_map_layout() {
        let cmd = DragCmd::new(
            DragSource::inventory(5),
            DragTarget::map(Location::new(1, 2, 3)),
            ItemCount::new(10),
        );
        assert_eq!(cmd.command_kind(), CommandKind::DragInvMap);
        assert_eq!(payload(&cmd), vec![0x05, 0, 1, 0, 2, 0, 3, 0, 10]);
    }

    #[test]
    fn test_near_map_to_showcase_layout() {
        let cmd = DragCmd::new(
            DragSource::map_near(Direction::West),
            DragTarget::showcase(1, 0x0203),
            ItemCount::ONE,
        );
        assert_eq!(cmd.command_kind(), CommandKind::DragMapNearSc);
        assert_eq!(payload(&cmd), vec![0x06, 0x01, 0x02, 0x03, 0x00, 0x01]);
    }

    #[test]
    fn test_encode_twice_is_identical() {
        let cmd = DragCmd::new(DragSource::showcase(3, 1), DragTarget::inventory(0), ItemCount::new(2));
        assert_eq!(payload(&cmd), payload(&cmd));
        assert_eq!(cmd.to_string(), "DragCmd(showcase 3/1 -> inventory 0 x2)");
    }
}
