//! Core type definitions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{ClientError, Result};

/// Character ID (32-bit unsigned)
///
/// Identifies players, monsters and NPCs alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl CharacterId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for CharacterId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Number of items in a stack (16-bit unsigned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ItemCount(pub u16);

impl ItemCount {
    /// A single item
    pub const ONE: ItemCount = ItemCount(1);

    /// No count given; the server moves the whole stack
    pub const ZERO: ItemCount = ItemCount(0);

    pub const fn new(count: u16) -> Self {
        Self(count)
    }

    /// Checked conversion from a wider count
    pub fn try_new(count: i64) -> Result<Self> {
        u16::try_from(count)
            .map(Self)
            .map_err(|_| ClientError::OutOfRange(format!("item count {} exceeds 0..=65535", count)))
    }

    pub fn get(&self) -> u16 {
        self.0
    }

    pub fn is_single(&self) -> bool {
        self.0 == 1
    }
}

impl From<u16> for ItemCount {
    fn from(count: u16) -> Self {
        Self(count)
    }
}

impl fmt::Display for ItemCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Item type ID (16-bit unsigned)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub u16);

impl ItemId {
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    pub fn get(&self) -> u16 {
        self.0
    }
}

impl From<u16> for ItemId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Eight-way compass direction
///
/// The discriminant is the value sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Direction {
    North = 0,
    NorthEast = 1,
    East = 2,
    SouthEast = 3,
    South = 4,
    SouthWest = 5,
    West = 6,
    NorthWest = 7,
}

impl Direction {
    /// Number of directions
    pub const COUNT: usize = 8;

    /// All directions in wire order
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::NorthEast,
        Direction::East,
        Direction::SouthEast,
        Direction::South,
        Direction::SouthWest,
        Direction::West,
        Direction::NorthWest,
    ];

    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    /// Fallible conversion from an arbitrary integer
    pub fn from_index(value: i32) -> Result<Self> {
        u8::try_from(value)
            .ok()
            .and_then(Self::from_u8)
            .ok_or(ClientError::InvalidDirection(value))
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Tile offset `(dx, dy)`; north is negative y
    pub fn offset(self) -> (i16, i16) {
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, -1),
            Self::East => (1, 0),
            Self::SouthEast => (1, 1),
            Self::South => (0, 1),
            Self::SouthWest => (-1, 1),
            Self::West => (-1, 0),
            Self::NorthWest => (-1, -1),
        }
    }

    pub fn from_offset(dx: i16, dy: i16) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.offset() == (dx, dy))
    }

    pub fn opposite(self) -> Self {
        Self::ALL[(self.as_u8() as usize + 4) % Self::COUNT]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::NorthEast => "northeast",
            Self::East => "east",
            Self::SouthEast => "southeast",
            Self::South => "south",
            Self::SouthWest => "southwest",
            Self::West => "west",
            Self::NorthWest => "northwest",
        }
    }
}

impl TryFrom<i32> for Direction {
    type Error = ClientError;

    fn try_from(value: i32) -> Result<Self> {
        Self::from_index(value)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
