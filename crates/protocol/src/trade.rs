//! # Merchant and Crafting Dialogs
//!
//! Every merchant action shares the [`CommandKind::TradeItem`] opcode and
//! every crafting action the [`CommandKind::CraftItem`] opcode. The payload
//! starts with the dialog id and a sub-command byte naming the action:
//!
//! ```text
//! {INT dialog}{UBYTE subcommand}{action fields...}
//! ```
//!
//! ## Merchant Item References
//!
//! Items the player offers for sale are addressed by a container byte and a
//! slot. Container `0` is the inventory; showcase `n` is sent as `n + 1`.
//!
//! ```text
//! {UBYTE container}{USHORT slot}
//! ```

use rpgclient_core::{ClientError, ItemCount, Result};
use std::fmt;

use crate::command::{check_dialog_id, ClientCommand};
use crate::opcodes::CommandKind;
use crate::values::WireValue;
use crate::writer::WireWriter;

/// An item the player owns, as seen by a merchant dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeSlot {
    Inventory { slot: u8 },
    Showcase { showcase: u8, slot: u16 },
}

impl TradeSlot {
    /// Container byte: 0 for the inventory, showcase + 1 otherwise
    pub fn container_byte(&self) -> Result<u8> {
        match self {
            Self::Inventory { .. } => Ok(0),
            Self::Showcase { showcase, .. } => showcase.checked_add(1).ok_or_else(|| {
                ClientError::OutOfRange(format!("showcase {} has no merchant container byte", showcase))
            }),
        }
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        let container = self.container_byte()?;
        let slot = match self {
            Self::Inventory { slot } => u16::from(*slot),
            Self::Showcase { slot, .. } => *slot,
        };
        writer.write_ubyte(container)?;
        writer.write_ushort(slot)
    }
}

impl fmt::Display for TradeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inventory { slot } => write!(f, "inventory {}", slot),
            Self::Showcase { showcase, slot } => write!(f, "showcase {}/{}", showcase, slot),
        }
    }
}

/// Merchant dialog actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Close,
    Sell { item: TradeSlot, count: ItemCount },
    /// Buy from the merchant's offer list
    Buy { index: u8, count: ItemCount },
    LookAtSellItem { item: TradeSlot },
    LookAtBuyItem { index: u8 },
}

impl TradeAction {
    pub fn sub_command(&self) -> u8 {
        match self {
            Self::Close => 0,
            Self::Sell { .. } => 1,
            Self::Buy { .. } => 2,
            Self::LookAtSellItem { .. } => 3,
            Self::LookAtBuyItem { .. } => 4,
        }
    }

    /// Check every field that can fail before anything is written
    fn validate(&self) -> Result<()> {
        if let Self::Sell { item, .. } | Self::LookAtSellItem { item } = self {
            item.container_byte()?;
        }
        Ok(())
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_ubyte(self.sub_command())?;
        match self {
            Self::Close => Ok(()),
            Self::Sell { item, count } => {
                item.encode(writer)?;
                count.encode(writer)
            }
            Self::Buy { index, count } => {
                writer.write_ubyte(*index)?;
                count.encode(writer)
            }
            Self::LookAtSellItem { item } => item.encode(writer),
            Self::LookAtBuyItem { index } => writer.write_ubyte(*index),
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Close => f.write_str("close"),
            Self::Sell { item, count } => write!(f, "sell {} x{}", item, count),
            Self::Buy { index, count } => write!(f, "buy {} x{}", index, count),
            Self::LookAtSellItem { item } => write!(f, "look at {}", item),
            Self::LookAtBuyItem { index } => write!(f, "look at offer {}", index),
        }
    }
}

/// Act on a merchant dialog
///
/// Built empty for a dialog, then given exactly one action. Encoding before
/// an action was chosen fails with [`ClientError::MissingField`].
///
/// # Example
/// ```
/// use rpgclient_protocol::{encode_payload, TradeItemCmd};
/// use rpgclient_core::ItemCount;
///
/// let mut cmd = TradeItemCmd::new(5);
/// cmd.sell_from_inventory(2, ItemCount::ONE);
/// let bytes = encode_payload(&cmd).unwrap();
/// assert_eq!(&bytes[..], &[0, 0, 0, 5, 1, 0, 0, 2, 0, 1]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeItemCmd {
    dialog_id: i32,
    action: Option<TradeAction>,
}

impl TradeItemCmd {
    pub fn new(dialog_id: i32) -> Self {
        Self {
            dialog_id,
            action: None,
        }
    }

    pub fn with_action(dialog_id: i32, action: TradeAction) -> Self {
        Self {
            dialog_id,
            action: Some(action),
        }
    }

    pub fn dialog_id(&self) -> i32 {
        self.dialog_id
    }

    pub fn action(&self) -> Option<&TradeAction> {
        self.action.as_ref()
    }

    pub fn close(&mut self) -> &mut Self {
        self.action = Some(TradeAction::Close);
        self
    }

    pub fn sell_from_inventory(&mut self, slot: u8, count: ItemCount) -> &mut Self {
        self.action = Some(TradeAction::Sell {
            item: TradeSlot::Inventory { slot },
            count,
        });
        self
    }

    pub fn sell_from_showcase(&mut self, showcase: u8, slot: u16, count: ItemCount) -> &mut Self {
        self.action = Some(TradeAction::Sell {
            item: TradeSlot::Showcase { showcase, slot },
            count,
        });
        self
    }

    pub fn buy(&mut self, index: u8, count: ItemCount) -> &mut Self {
        self.action = Some(TradeAction::Buy { index, count });
        self
    }

    pub fn look_at_sell_item(&mut self, item: TradeSlot) -> &mut Self {
        self.action = Some(TradeAction::LookAtSellItem { item });
        self
    }

    pub fn look_at_buy_item(&mut self, index: u8) -> &mut Self {
        self.action = Some(TradeAction::LookAtBuyItem { index });
        self
    }

    /// Forget the chosen action
    pub fn reset(&mut self) {
        self.action = None;
    }
}

impl ClientCommand for TradeItemCmd {
    fn id(&self) -> u8 {
        CommandKind::TradeItem.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        check_dialog_id(self.dialog_id)?;
        let action = self.action.as_ref().ok_or(ClientError::MissingField("trade action"))?;
        action.validate()?;

        writer.write_int(self.dialog_id)?;
        action.encode(writer)
    }
}

impl fmt::Display for TradeItemCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            Some(action) => write!(f, "TradeItemCmd(dialog {} {})", self.dialog_id, action),
            None => write!(f, "TradeItemCmd(dialog {} no action)", self.dialog_id),
        }
    }
}

/// Crafting dialog actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CraftAction {
    Close,
    Craft { index: u8, count: ItemCount },
    LookAtCraftable { index: u8 },
    LookAtIngredient { index: u8, ingredient: u8 },
}

impl CraftAction {
    pub fn sub_command(&self) -> u8 {
        match self {
            Self::Close => 0,
            Self::Craft { .. } => 1,
            Self::LookAtCraftable { .. } => 2,
            Self::LookAtIngredient { .. } => 3,
        }
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_ubyte(self.sub_command())?;
        match self {
            Self::Close => Ok(()),
            Self::Craft { index, count } => {
                writer.write_ubyte(*index)?;
                count.encode(writer)
            }
            Self::LookAtCraftable { index } => writer.write_ubyte(*index),
            Self::LookAtIngredient { index, ingredient } => {
                writer.write_ubyte(*index)?;
                writer.write_ubyte(*ingredient)
            }
        }
    }
}

impl fmt::Display for CraftAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Close => f.write_str("close"),
            Self::Craft { index, count } => write!(f, "craft {} x{}", index, count),
            Self::LookAtCraftable { index } => write!(f, "look at {}", index),
            Self::LookAtIngredient { index, ingredient } => {
                write!(f, "look at ingredient {} of {}", ingredient, index)
            }
        }
    }
}

/// Act on a crafting dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CraftItemCmd {
    dialog_id: i32,
    action: Option<CraftAction>,
}

impl CraftItemCmd {
    pub fn new(dialog_id: i32) -> Self {
        Self {
            dialog_id,
            action: None,
        }
    }

    pub fn with_action(dialog_id: i32, action: CraftAction) -> Self {
        Self {
            dialog_id,
            action: Some(action),
        }
    }

    pub fn dialog_id(&self) -> i32 {
        self.dialog_id
    }

    pub fn action(&self) -> Option<&CraftAction> {
        self.action.as_ref()
    }

    pub fn close(&mut self) -> &mut Self {
        self.action = Some(CraftAction::Close);
        self
    }

    pub fn craft(&mut self, index: u8, count: ItemCount) -> &mut Self {
        self.action = Some(CraftAction::Craft { index, count });
        self
    }

    pub fn look_at_craftable(&mut self, index: u8) -> &mut Self {
        self.action = Some(CraftAction::LookAtCraftable { index });
        self
    }

    pub fn look_at_ingredient(&mut self, index: u8, ingredient: u8) -> &mut Self {
        self.action = Some(CraftAction::LookAtIngredient { index, ingredient });
        self
    }

    pub fn reset(&mut self) {
        self.action = None;
    }
}

impl ClientCommand for CraftItemCmd {
    fn id(&self) -> u8 {
        CommandKind::CraftItem.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        check_dialog_id(self.dialog_id)?;
        let action = self.action.as_ref().ok_or(ClientError::MissingField("craft action"))?;

        writer.write_int(self.dialog_id)?;
        action.encode(writer)
    }
}

impl fmt::Display for CraftItemCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.action {
            Some(action) => write!(f, "CraftItemCmd(dialog {} {})", self.dialog_id, action),
            None => write!(f, "CraftItemCmd(dialog {} no action)", self.dialog_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{encode_payload, testing::payload};
    use crate::writer::CommandWriter;

    #[test]
    fn test_sell_container_offset() {
        let mut from_inventory = TradeItemCmd::new(5);
        from_inventory.sell_from_inventory(2, ItemCount::ONE);
        assert_eq!(payload(&from_inventory), vec![0, 0, 0, 5, 0x01, 0x00, 0x00, 0x02, 0x00, 0x01]);

        let mut from_showcase = TradeItemCmd::new(5);
        from_showcase.sell_from_showcase(0, 2, ItemCount::ONE);
        assert_eq!(payload(&from_showcase), vec![0, 0, 0, 5, 0x01, 0x01, 0x00, 0x02, 0x00, 0x01]);
    }

    #[test]
    fn test_all_trade_actions_share_one_opcode() {
        let actions = [
            TradeAction::Close,
            TradeAction::Buy { index: 1, count: ItemCount::ONE },
            TradeAction::LookAtBuyItem { index: 1 },
        ];
        for action in actions {
            let cmd = TradeItemCmd::with_action(3, action);
            assert_eq!(cmd.id(), 0x52);
            assert_eq!(payload(&cmd)[4], action.sub_command());
        }
    }

    #[test]
    fn test_buy_and_look_layouts() {
        let mut cmd = TradeItemCmd::new(1);
        cmd.buy(7, ItemCount::new(20));
        assert_eq!(payload(&cmd), vec![0, 0, 0, 1, 0x02, 0x07, 0x00, 0x14]);

        cmd.look_at_sell_item(TradeSlot::Showcase { showcase: 4, slot: 9 });
        assert_eq!(payload(&cmd), vec![0, 0, 0, 1, 0x03, 0x05, 0x00, 0x09]);

        cmd.close();
        assert_eq!(payload(&cmd), vec![0, 0, 0, 1, 0x00]);
    }

    #[test]
    fn test_look_at_buy_item_layout() {
        let mut cmd = TradeItemCmd::new(9);
        cmd.look_at_buy_item(6);
        assert_eq!(payload(&cmd), vec![0, 0, 0, 9, 0x04, 0x06]);
    }

    #[test]
    fn test_craft_close_and_look_layouts() {
        let mut cmd = CraftItemCmd::new(12);
        cmd.close();
        assert_eq!(payload(&cmd), vec![0, 0, 0, 12, 0x00]);

        cmd.look_at_craftable(4);
        assert_eq!(payload(&cmd), vec![0, 0, 0, 12, 0x02, 0x04]);
    }

    #[test]
    fn test_no_action_fails() {
        let cmd = TradeItemCmd::new(5);
        assert!(matches!(
            encode_payload(&cmd),
            Err(ClientError::MissingField("trade action"))
        ));
    }

    #[test]
    fn test_reset_clears_action() {
        let mut cmd = TradeItemCmd::new(5);
        cmd.buy(0, ItemCount::ONE);
        assert!(encode_payload(&cmd).is_ok());

        cmd.reset();
        assert!(cmd.action().is_none());
        assert!(encode_payload(&cmd).is_err());
    }

    #[test]
    fn test_last_showcase_overflows_container_byte() {
        let mut cmd = TradeItemCmd::new(5);
        cmd.sell_from_showcase(255, 0, ItemCount::ONE);

        let mut writer = CommandWriter::new();
        assert!(matches!(cmd.encode(&mut writer), Err(ClientError::OutOfRange(_))));
        assert!(writer.is_empty());
    }

    #[test]
    fn test_craft_layouts() {
        let mut cmd = CraftItemCmd::new(12);
        cmd.craft(3, ItemCount::new(2));
        assert_eq!(cmd.id(), 0x54);
        assert_eq!(payload(&cmd), vec![0, 0, 0, 12, 0x01, 0x03, 0x00, 0x02]);

        cmd.look_at_ingredient(3, 1);
        assert_eq!(payload(&cmd), vec![0, 0, 0, 12, 0x03, 0x03, 0x01]);

        cmd.reset();
        assert!(matches!(
            encode_payload(&cmd),
            Err(ClientError::MissingField("craft action"))
        ));
    }

    #[test]
    fn test_display() {
        let mut cmd = TradeItemCmd::new(5);
        assert_eq!(cmd.to_string(), "TradeItemCmd(dialog 5 no action)");
        cmd.sell_from_inventory(2, ItemCount::ONE);
        assert_eq!(cmd.to_string(), "TradeItemCmd(dialog 5 sell inventory 2 x1)");
    }
}
