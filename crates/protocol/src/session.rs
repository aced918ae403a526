//! Session commands: login, logoff, keepalive, introduction

use rpgclient_core::Result;
use std::fmt;

use crate::command::{signal_command, ClientCommand};
use crate::opcodes::CommandKind;
use crate::writer::WireWriter;

/// Log in to the game server
///
/// # Packet Structure
/// ```text
/// Packet ID: 0x0D
/// {
///     UBYTE  version;   // client protocol version
///     STRING name;      // character name
///     STRING password;  // plain text, protected by the transport
/// }
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCmd {
    pub version: u8,
    pub name: String,
    pub password: String,
}

impl LoginCmd {
    #[inline]
    pub fn new(version: u8, name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            version,
            name: name.into(),
            password: password.into(),
        }
    }
}

impl ClientCommand for LoginCmd {
    fn id(&self) -> u8 {
        CommandKind::Login.as_u8()
    }

    fn encode(&self, writer: &mut dyn WireWriter) -> Result<()> {
        writer.write_ubyte(self.version)?;
        writer.write_string(&self.name)?;
        writer.write_string(&self.password)
    }
}

// Keep the password out of logs
impl fmt::Debug for LoginCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCmd")
            .field("version", &self.version)
            .field("name", &self.name)
            .field("password", &"***")
            .finish()
    }
}

impl fmt::Display for LoginCmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LoginCmd(v{} {} ***)", self.version, self.name)
    }
}

signal_command! {
    /// Leave the game
    LogoffCmd => Logoff
}

signal_command! {
    /// Sent periodically so the server keeps the connection open
    KeepAliveCmd => KeepAlive
}

signal_command! {
    /// Tell nearby players the character's name
    IntroduceCmd => Introduce
}
