//! # Client Command Opcodes
//!
//! Every command the client sends is identified by a one-byte opcode. The
//! values are shared with the server's decoder and must not change.
//!
//! ## Shared Opcodes
//!
//! - Turning uses eight consecutive opcodes starting at [`TURN_BASE`]; the
//!   direction is carried by the opcode itself.
//! - Chat uses one opcode per speech mode.
//! - [`CommandKind::TradeItem`] and [`CommandKind::CraftItem`] carry several
//!   actions, told apart by a sub-command byte that follows the dialog id.
//! - The twelve drag opcodes encode which kind of endpoint the item moves
//!   from and to.

use rpgclient_core::Direction;

/// Opcode of the first turn command (north); the rest follow in direction order
pub const TURN_BASE: u8 = 0x11;

/// Opcode enumeration for all client-to-server commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CommandKind {
    /// Log in with client version, account name and password
    ///
    /// ```text
    /// {0x0D}{UBYTE version}{STRING name}{STRING password}
    /// ```
    Login = 0x0D,

    /// Leave the game
    Logoff = 0x0F,

    /// Move a character one tile
    ///
    /// ```text
    /// {0x10}{UINT char}{UBYTE direction}{UBYTE mode}
    /// ```
    Move = 0x10,

    /// Turn to face north
    TurnNorth = 0x11,

    /// Turn to face north-east
    TurnNorthEast = 0x12,

    /// Turn to face east
    TurnEast = 0x13,

    /// Turn to face south-east
    TurnSouthEast = 0x14,

    /// Turn to face south
    TurnSouth = 0x15,

    /// Turn to face south-west
    TurnSouthWest = 0x16,

    /// Turn to face west
    TurnWest = 0x17,

    /// Turn to face north-west
    TurnNorthWest = 0x18,

    /// Answer a text input dialog
    ///
    /// ```text
    /// {0x50}{INT dialog}{UBYTE success}{STRING text}
    /// ```
    CloseDialogInput = 0x50,

    /// Acknowledge a message dialog
    ///
    /// ```text
    /// {0x51}{INT dialog}
    /// ```
    CloseDialogMessage = 0x51,

    /// Merchant dialog action (close, sell, buy, look)
    ///
    /// ```text
    /// {0x52}{INT dialog}{UBYTE subcommand}{...}
    /// ```
    TradeItem = 0x52,

    /// Answer a selection dialog
    ///
    /// ```text
    /// {0x53}{INT dialog}{UBYTE success}{USHORT index}
    /// ```
    CloseDialogSelection = 0x53,

    /// Crafting dialog action (close, craft, look)
    ///
    /// ```text
    /// {0x54}{INT dialog}{UBYTE subcommand}{...}
    /// ```
    CraftItem = 0x54,

    /// Drag from an inventory slot to an inventory slot
    DragInvInv = 0xC0,

    /// Drag from an inventory slot onto the map
    DragInvMap = 0xC1,

    /// Drag from an inventory slot into a showcase
    DragInvSc = 0xC2,

    /// Drag from an adjacent tile into the inventory
    DragMapNearInv = 0xC3,

    /// Drag from an adjacent tile to another tile
    DragMapNearMap = 0xC4,

    /// Drag from an adjacent tile into a showcase
    DragMapNearSc = 0xC5,

    /// Drag from a map location into the inventory
    DragMapInv = 0xC6,

    /// Drag from a map location to another tile
    DragMapMap = 0xC7,

    /// Drag from a map location into a showcase
    DragMapSc = 0xC8,

    /// Drag from a showcase into the inventory
    DragScInv = 0xC9,

    /// Drag from a showcase onto the map
    DragScMap = 0xCA,

    /// Drag from a showcase slot to a showcase slot
    DragScSc = 0xCB,

    /// Keep the connection alive
    KeepAlive = 0xD8,

    /// Pick up the top item of a tile
    ///
    /// ```text
    /// {0xE0}{LOCATION tile}
    /// ```
    PickUp = 0xE0,

    /// Pick up every item around the player
    PickUpAll = 0xE1,

    /// Close an open showcase
    ///
    /// ```text
    /// {0xEB}{UBYTE showcase}
    /// ```
    CloseShowcase = 0xEB,

    /// Open a container stored in a showcase slot
    ///
    /// ```text
    /// {0xEC}{UBYTE showcase}{USHORT slot}
    /// ```
    OpenShowcaseContainer = 0xEC,

    /// Open a container lying next to the player
    ///
    /// ```text
    /// {0xEE}{UBYTE direction}
    /// ```
    OpenMap = 0xEE,

    /// Open the backpack
    OpenBag = 0xEF,

    /// Whisper text
    Whisper = 0xF3,

    /// Shout text
    Shout = 0xF4,

    /// Say text
    Say = 0xF5,

    /// Introduce the player to everyone nearby
    Introduce = 0xF6,

    /// Stop attacking
    StandDown = 0xF9,

    /// Attack a character
    ///
    /// ```text
    /// {0xFA}{UINT char}
    /// ```
    Attack = 0xFA,

    /// Look at an item in the quick menu
    ///
    /// ```text
    /// {0xFB}{UBYTE slot}{USHORT item}
    /// ```
    LookAtMenu = 0xFB,

    /// Look at an item in a showcase
    ///
    /// ```text
    /// {0xFC}{UBYTE showcase}{USHORT slot}
    /// ```
    LookAtShowcase = 0xFC,

    /// Look at an inventory slot
    ///
    /// ```text
    /// {0xFD}{UBYTE slot}
    /// ```
    LookAtInventory = 0xFD,

    /// Look at a character
    ///
    /// ```text
    /// {0xFE}{UINT char}
    /// ```
    LookAtCharacter = 0xFE,

    /// Look at a map tile
    ///
    /// ```text
    /// {0xFF}{LOCATION tile}
    /// ```
    LookAtTile = 0xFF,
}

impl CommandKind {
    /// Every opcode, in ascending order
    pub const ALL: [CommandKind; 46] = [
        CommandKind::Login,
        CommandKind::Logoff,
        CommandKind::Move,
        CommandKind::TurnNorth,
        CommandKind::TurnNorthEast,
        CommandKind::TurnEast,
        CommandKind::TurnSouthEast,
        CommandKind::TurnSouth,
        CommandKind::TurnSouthWest,
        CommandKind::TurnWest,
        CommandKind::TurnNorthWest,
        CommandKind::CloseDialogInput,
        CommandKind::CloseDialogMessage,
        CommandKind::TradeItem,
        CommandKind::CloseDialogSelection,
        CommandKind::CraftItem,
        CommandKind::DragInvInv,
        CommandKind::DragInvMap,
        CommandKind::DragInvSc,
        CommandKind::DragMapNearInv,
        CommandKind::DragMapNearMap,
        CommandKind::DragMapNearSc,
        CommandKind::DragMapInv,
        CommandKind::DragMapMap,
        CommandKind::DragMapSc,
        CommandKind::DragScInv,
        CommandKind::DragScMap,
        CommandKind::DragScSc,
        CommandKind::KeepAlive,
        CommandKind::PickUp,
        CommandKind::PickUpAll,
        CommandKind::CloseShowcase,
        CommandKind::OpenShowcaseContainer,
        CommandKind::OpenMap,
        CommandKind::OpenBag,
        CommandKind::Whisper,
        CommandKind::Shout,
        CommandKind::Say,
        CommandKind::Introduce,
        CommandKind::StandDown,
        CommandKind::Attack,
        CommandKind::LookAtMenu,
        CommandKind::LookAtShowcase,
        CommandKind::LookAtInventory,
        CommandKind::LookAtCharacter,
        CommandKind::LookAtTile,
    ];

    /// Look up the command kind for an opcode
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x0D => Some(Self::Login),
            0x0F => Some(Self::Logoff),
            0x10 => Some(Self::Move),
            0x11 => Some(Self::TurnNorth),
            0x12 => Some(Self::TurnNorthEast),
            0x13 => Some(Self::TurnEast),
            0x14 => Some(Self::TurnSouthEast),
            0x15 => Some(Self::TurnSouth),
            0x16 => Some(Self::TurnSouthWest),
            0x17 => Some(Self::TurnWest),
            0x18 => Some(Self::TurnNorthWest),
            0x50 => Some(Self::CloseDialogInput),
            0x51 => Some(Self::CloseDialogMessage),
            0x52 => Some(Self::TradeItem),
            0x53 => Some(Self::CloseDialogSelection),
            0x54 => Some(Self::CraftItem),
            0xC0 => Some(Self::DragInvInv),
            0xC1 => Some(Self::DragInvMap),
            0xC2 => Some(Self::DragInvSc),
            0xC3 => Some(Self::DragMapNearInv),
            0xC4 => Some(Self::DragMapNearMap),
            0xC5 => Some(Self::DragMapNearSc),
            0xC6 => Some(Self::DragMapInv),
            0xC7 => Some(Self::DragMapMap),
            0xC8 => Some(Self::DragMapSc),
            0xC9 => Some(Self::DragScInv),
            0xCA => Some(Self::DragScMap),
            0xCB => Some(Self::DragScSc),
            0xD8 => Some(Self::KeepAlive),
            0xE0 => Some(Self::PickUp),
            0xE1 => Some(Self::PickUpAll),
            0xEB => Some(Self::CloseShowcase),
            0xEC => Some(Self::OpenShowcaseContainer),
            0xEE => Some(Self::OpenMap),
            0xEF => Some(Self::OpenBag),
            0xF3 => Some(Self::Whisper),
            0xF4 => Some(Self::Shout),
            0xF5 => Some(Self::Say),
            0xF6 => Some(Self::Introduce),
            0xF9 => Some(Self::StandDown),
            0xFA => Some(Self::Attack),
            0xFB => Some(Self::LookAtMenu),
            0xFC => Some(Self::LookAtShowcase),
            0xFD => Some(Self::LookAtInventory),
            0xFE => Some(Self::LookAtCharacter),
            0xFF => Some(Self::LookAtTile),
            _ => None,
        }
    }

    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Turn opcode for a direction
    pub fn turn(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::TurnNorth,
            Direction::NorthEast => Self::TurnNorthEast,
            Direction::East => Self::TurnEast,
            Direction::SouthEast => Self::TurnSouthEast,
            Direction::South => Self::TurnSouth,
            Direction::SouthWest => Self::TurnSouthWest,
            Direction::West => Self::TurnWest,
            Direction::NorthWest => Self::TurnNorthWest,
        }
    }

    /// Direction carried by a turn opcode
    pub fn turn_direction(self) -> Option<Direction> {
        self.as_u8()
            .checked_sub(TURN_BASE)
            .and_then(Direction::from_u8)
    }

    /// True for the twelve drag opcodes
    pub fn is_drag(self) -> bool {
        (Self::DragInvInv.as_u8()..=Self::DragScSc.as_u8()).contains(&self.as_u8())
    }

    /// Lowercase name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logoff => "logoff",
            Self::Move => "move",
            Self::TurnNorth => "turn_north",
            Self::TurnNorthEast => "turn_north_east",
            Self::TurnEast => "turn_east",
            Self::TurnSouthEast => "turn_south_east",
            Self::TurnSouth => "turn_south",
            Self::TurnSouthWest => "turn_south_west",
            Self::TurnWest => "turn_west",
            Self::TurnNorthWest => "turn_north_west",
            Self::CloseDialogInput => "close_dialog_input",
            Self::CloseDialogMessage => "close_dialog_message",
            Self::TradeItem => "trade_item",
            Self::CloseDialogSelection => "close_dialog_selection",
            Self::CraftItem => "craft_item",
            Self::DragInvInv => "drag_inv_inv",
            Self::DragInvMap => "drag_inv_map",
            Self::DragInvSc => "drag_inv_sc",
            Self::DragMapNearInv => "drag_map_near_inv",
            Self::DragMapNearMap => "drag_map_near_map",
            Self::DragMapNearSc => "drag_map_near_sc",
            Self::DragMapInv => "drag_map_inv",
            Self::DragMapMap => "drag_map_map",
            Self::DragMapSc => "drag_map_sc",
            Self::DragScInv => "drag_sc_inv",
            Self::DragScMap => "drag_sc_map",
            Self::DragScSc => "drag_sc_sc",
            Self::KeepAlive => "keep_alive",
            Self::PickUp => "pick_up",
            Self::PickUpAll => "pick_up_all",
            Self::CloseShowcase => "close_showcase",
            Self::OpenShowcaseContainer => "open_showcase_container",
            Self::OpenMap => "open_map",
            Self::OpenBag => "open_bag",
            Self::Whisper => "whisper",
            Self::Shout => "shout",
            Self::Say => "say",
            Self::Introduce => "introduce",
            Self::StandDown => "stand_down",
            Self::Attack => "attack",
            Self::LookAtMenu => "look_at_menu",
            Self::LookAtShowcase => "look_at_showcase",
            Self::LookAtInventory => "look_at_inventory",
            Self::LookAtCharacter => "look_at_character",
            Self::LookAtTile => "look_at_tile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_u8_round_trips_every_kind() {
        for kind in CommandKind::ALL {
            assert_eq!(CommandKind::from_u8(kind.as_u8()), Some(kind));
        }
        assert_eq!(CommandKind::from_u8(0x00), None);
        assert_eq!(CommandKind::from_u8(0x19), None);
    }

    #[test]
    fn test_opcodes_are_unique_and_sorted() {
        for pair in CommandKind::ALL.windows(2) {
            assert!(pair[0].as_u8() < pair[1].as_u8(), "{:?} / {:?}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_turn_opcodes() {
        assert_eq!(CommandKind::turn(Direction::North), CommandKind::TurnNorth);
        assert_eq!(CommandKind::turn(Direction::NorthWest), CommandKind::TurnNorthWest);
        for direction in Direction::ALL {
            let kind = CommandKind::turn(direction);
            assert_eq!(kind.as_u8(), TURN_BASE + direction.as_u8());
            assert_eq!(kind.turn_direction(), Some(direction));
        }
        assert_eq!(CommandKind::Move.turn_direction(), None);
        assert_eq!(CommandKind::Say.turn_direction(), None);
    }

    #[test]
    fn test_drag_range() {
        let drags = CommandKind::ALL.iter().filter(|k| k.is_drag()).count();
        assert_eq!(drags, 12);
        assert!(!CommandKind::KeepAlive.is_drag());
    }
}
