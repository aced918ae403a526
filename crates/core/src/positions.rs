//! Map positions

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::Direction;

/// A tile on the server map
///
/// Commands store their own copy of a location, never a reference into the
/// mutable world state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Location {
    pub x: i16,
    pub y: i16,
    /// Map level
    pub z: i16,
}

impl Location {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Neighbouring tile in the given direction on the same level
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x.wrapping_add(dx),
            y: self.y.wrapping_add(dy),
            z: self.z,
        }
    }

    /// Direction from this location towards `target`
    ///
    /// Returns `None` when both share the same x/y tile. The level is ignored.
    pub fn direction_to(self, target: Location) -> Option<Direction> {
        let dx = (i32::from(target.x) - i32::from(self.x)).signum() as i16;
        let dy = (i32::from(target.y) - i32::from(self.y)).signum() as i16;
        Direction::from_offset(dx, dy)
    }

    /// Chebyshev distance on the x/y plane
    pub fn distance(self, other: Location) -> u32 {
        let dx = (i32::from(self.x) - i32::from(other.x)).unsigned_abs();
        let dy = (i32::from(self.y) - i32::from(other.y)).unsigned_abs();
        dx.max(dy)
    }

    /// True when `other` is on the same level and at most one tile away
    pub fn is_neighbour(self, other: Location) -> bool {
        self.z == other.z && self.distance(other) <= 1
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
