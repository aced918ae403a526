//! Containers, showcases and picking items up
//!
//! A showcase is a container window the server has opened on the client
//! (backpack, chest, depot). Showcases are numbered by the server.

use rpgclient_core::{Direction, Location, Result};
use std::fmt;

use crate::command::{signal_command, ClientCommand};
use crate::opcodes::CommandKind;
use crate::values::WireValue;
use crate::writer::WireWriter;

signal_command! {
    /// Open the player's backpack
    OpenBagCmd => OpenBag
}

signal_command! {
    /// Pick up every item in reach
    PickUpAllCmd => PickUpAll
}

/// Open a container on a tile next to the player
///
/// ```text
/// {0xEE}{UBYTE direction}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMapCmd {
    pub direction: Direction,
}

impl OpenMapCmd {
    #[inline]
    pub fn new(direction: Direction) -> Self {
        Self { direction }
    }
}

impl ClientCommand for OpenMapCmd {
    fn id(&self) -> u8 {
        CommandKind::OpenMap.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        self.direction.encode(writer)
    }
}

impl fmt::Display for OpenMapCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpenMapCmd({})", self.direction)
    }
}

/// Open a container stored inside a showcase (a bag in a chest)
///
/// ```text
/// {0xEC}{UBYTE showcase}{USHORT slot}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenShowcaseContainerCmd {
    pub showcase: u8,
    pub slot: u16,
}

impl OpenShowcaseContainerCmd {
    #[inline]
    pub fn new(showcase: u8, slot: u16) -> Self {
        Self { showcase, slot }
    }
}

impl ClientCommand for OpenShowcaseContainerCmd {
    fn id(&self) -> u8 {
        CommandKind::OpenShowcaseContainer.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_ubyte(self.showcase)?;
        writer.write_ushort(self.slot)
    }
}

impl fmt::Display for OpenShowcaseContainerCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "OpenShowcaseContainerCmd(showcase {} slot {})", self.showcase, self.slot)
    }
}

/// `{0xEB}{UBYTE showcase}`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseShowcaseCmd {
    pub showcase: u8,
}

impl CloseShowcaseCmd {
    #[inline]
    pub fn new(showcase: u8) -> Self {
        Self { showcase }
    }
}

impl ClientCommand for CloseShowcaseCmd {
    fn id(&self) -> u8 {
        CommandKind::CloseShowcase.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_ubyte(self.showcase)
    }
}

impl fmt::Display for CloseShowcaseCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CloseShowcaseCmd(showcase {})", self.showcase)
    }
}

/// Pick up the top item of a tile
///
/// ```text
/// {0xE0}{LOCATION tile}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PickUpCmd {
    pub location: Location,
}

impl PickUpCmd {
    #[inline]
    pub fn new(location: Location) -> Self {
        Self { location }
    }
}

impl ClientCommand for PickUpCmd {
    fn id(&self) -> u8 {
        CommandKind::PickUp.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        self.location.encode(writer)
    }
}

impl fmt::Display for PickUpCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PickUpCmd({})", self.location)
    }
}
