//! Chat
//!
//! One command type covers all three speech modes; the mode picks the opcode.
//!
//! ```text
//! {0xF5 say | 0xF4 shout | 0xF3 whisper}{STRING text}
//! ```

use rpgclient_core::Result;
use std::fmt;

use crate::command::ClientCommand;
use crate::opcodes::CommandKind;
use crate::writer::WireWriter;

/// How loudly text is spoken
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeechMode {
    Say,
    Shout,
    Whisper,
}

impl SpeechMode {
    pub fn command_kind(self) -> CommandKind {
        match self {
            Self::Say => CommandKind::Say,
            Self::Shout => CommandKind::Shout,
            Self::Whisper => CommandKind::Whisper,
        }
    }
}

/// Speak a line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SayCmd {
    pub mode: SpeechMode,
    pub text: String,
}

impl SayCmd {
    #[inline]
    pub fn new(mode: SpeechMode, text: impl Into<String>) -> Self {
        Self {
            mode,
            text: text.into(),
        }
    }

    pub fn say(text: impl Into<String>) -> Self {
        Self::new(SpeechMode::Say, text)
    }

    pub fn shout(text: impl Into<String>) -> Self {
        Self::new(SpeechMode::Shout, text)
    }

    pub fn whisper(text: impl Into<String>) -> Self {
        Self::new(SpeechMode::Whisper, text)
    }
}

impl ClientCommand for SayCmd {
    fn id(&self) -> u8 {
        self.mode.command_kind().as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_string(&self.text)
    }
}

impl fmt::Display for SayCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SayCmd({:?} {:?})", self.mode, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{encode_payload, testing::payload};
    use rpgclient_core::ClientError;

    #[test]
    fn test_mode_selects_opcode() {
        assert_eq!(SayCmd::say("hi").id(), 0xF5);
        assert_eq!(SayCmd::shout("hi").id(), 0xF4);
        assert_eq!(SayCmd::whisper("hi").id(), 0xF3);
    }

    #[test]
    fn test_payload_is_the_string() {
        assert_eq!(payload(&SayCmd::shout("Hey!")), vec![0x00, 0x04, b'H', b'e', b'y', b'!']);
        assert_eq!(payload(&SayCmd::say("")), vec![0x00, 0x00]);
    }

    #[test]
    fn test_unmappable_text_fails() {
        assert!(matches!(
            encode_payload(&SayCmd::say("hi 😀")),
            Err(ClientError::UnmappableCharacter('😀'))
        ));
    }
}
