//! # Dialog Responses
//!
//! Dialogs are opened by the server with an id the client must echo back when
//! it answers or closes them. Merchant and crafting dialogs are handled in
//! [`crate::trade`].
//!
//! A dialog id of `-1` means "never set"; encoding such a command fails.

use rpgclient_core::Result;
use std::fmt;

use crate::command::{check_dialog_id, write_flag, ClientCommand};
use crate::opcodes::CommandKind;
use crate::writer::WireWriter;

/// Acknowledge a message dialog
///
/// ```text
/// {0x51}{INT dialog}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseDialogMessageCmd {
    pub dialog_id: i32,
}

impl CloseDialogMessageCmd {
    #[inline]
    pub fn new(dialog_id: i32) -> Self {
        Self { dialog_id }
    }
}

impl ClientCommand for CloseDialogMessageCmd {
    fn id(&self) -> u8 {
        CommandKind::CloseDialogMessage.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        check_dialog_id(self.dialog_id)?;
        writer.write_int(self.dialog_id)
    }
}

impl fmt::Display for CloseDialogMessageCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CloseDialogMessageCmd(dialog {})", self.dialog_id)
    }
}

/// Answer a text input dialog
///
/// ```text
/// {0x50}{INT dialog}{UBYTE success: 0xFF | 0x00}{STRING text}
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseDialogInputCmd {
    pub dialog_id: i32,
    pub text: String,
    /// `false` when the player cancelled the dialog
    pub success: bool,
}

impl CloseDialogInputCmd {
    #[inline]
    pub fn new(dialog_id: i32, text: impl Into<String>, success: bool) -> Self {
        Self {
            dialog_id,
            text: text.into(),
            success,
        }
    }

    /// The player dismissed the dialog without entering anything
    pub fn cancelled(dialog_id: i32) -> Self {
        Self::new(dialog_id, String::new(), false)
    }
}

impl ClientCommand for CloseDialogInputCmd {
    fn id(&self) -> u8 {
        CommandKind::CloseDialogInput.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        check_dialog_id(self.dialog_id)?;
        writer.write_int(self.dialog_id)?;
        write_flag(writer, self.success)?;
        writer.write_string(&self.text)
    }
}

impl fmt::Display for CloseDialogInputCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CloseDialogInputCmd(dialog {} success {} text {:?})",
            self.dialog_id, self.success, self.text
        )
    }
}

/// Answer a selection dialog
///
/// The index is written even when the dialog was cancelled.
///
/// ```text
/// {0x53}{INT dialog}{UBYTE success: 0xFF | 0x00}{USHORT index}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CloseDialogSelectionCmd {
    pub dialog_id: i32,
    pub selected_index: u16,
    pub success: bool,
}

impl CloseDialogSelectionCmd {
    #[inline]
    pub fn new(dialog_id: i32, selected_index: u16, success: bool) -> Self {
        Self {
            dialog_id,
            selected_index,
            success,
        }
    }

    pub fn selected(dialog_id: i32, selected_index: u16) -> Self {
        Self::new(dialog_id, selected_index, true)
    }

    pub fn cancelled(dialog_id: i32) -> Self {
        Self::new(dialog_id, 0, false)
    }
}

impl ClientCommand for CloseDialogSelectionCmd {
    fn id(&self) -> u8 {
        CommandKind::CloseDialogSelection.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        check_dialog_id(self.dialog_id)?;
        writer.write_int(self.dialog_id)?;
        write_flag(writer, self.success)?;
        writer.write_ushort(self.selected_index)
    }
}

impl fmt::Display for CloseDialogSelectionCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CloseDialogSelectionCmd(dialog {} success {} index {})",
            self.dialog_id, self.success, self.selected_index
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{encode_payload, testing::payload};
    use crate::reader::CommandReader;
    use rpgclient_core::ClientError;

    #[test]
    fn test_message_close_layout() {
        let cmd = CloseDialogMessageCmd::new(0x0102_0304);
        assert_eq!(cmd.id(), 0x51);
        assert_eq!(payload(&cmd), vec![0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_input_success_flag_precedes_text() {
        let accepted = payload(&CloseDialogInputCmd::new(5, "ok", true));
        assert_eq!(accepted, vec![0, 0, 0, 5, 0xFF, 0x00, 0x02, b'o', b'k']);

        let cancelled = payload(&CloseDialogInputCmd::new(5, "ok", false));
        assert_eq!(cancelled[4], 0x00);
        assert_eq!(accepted[5..], cancelled[5..]);
    }

    #[test]
    fn test_input_text_reads_back() {
        let bytes = payload(&CloseDialogInputCmd::new(77, "Ärger", true));
        let mut reader = CommandReader::new(&bytes);
        assert_eq!(reader.read_int().unwrap(), 77);
        assert_eq!(reader.read_ubyte().unwrap(), 0xFF);
        assert_eq!(reader.read_string().unwrap(), "Ärger");
        reader.finish().unwrap();
    }

    #[test]
    fn test_selection_layout() {
        let cmd = CloseDialogSelectionCmd::selected(9, 513);
        assert_eq!(cmd.id(), 0x53);
        assert_eq!(payload(&cmd), vec![0, 0, 0, 9, 0xFF, 0x02, 0x01]);
        assert_eq!(
            payload(&CloseDialogSelectionCmd::cancelled(9)),
            vec![0, 0, 0, 9, 0x00, 0x00, 0x00]
        );
    }

    #[test]
    fn test_unset_dialog_id_fails() {
        assert!(matches!(
            encode_payload(&CloseDialogMessageCmd::new(-1)),
            Err(ClientError::MissingField("dialog id"))
        ));
        assert!(encode_payload(&CloseDialogInputCmd::cancelled(-1)).is_err());
        assert!(encode_payload(&CloseDialogSelectionCmd::cancelled(-1)).is_err());
    }
}
