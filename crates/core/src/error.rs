//! Core error types for the RPG client

#[derive(thiserror::Error, Debug)]
pub enum ClientError {
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// A command was encoded before a required field was set
    #[error("Missing field: {0}")]
    MissingField(&'static str),

    #[error("Invalid direction: {0} (expected 0..8)")]
    InvalidDirection(i32),

    #[error("Value out of range: {0}")]
    OutOfRange(String),

    #[error("Character {0:?} cannot be encoded as ISO-8859-1")]
    UnmappableCharacter(char),

    /// The wire writer refused a write because its capacity is exhausted
    #[error("Buffer overflow: {needed} bytes needed, {available} available")]
    BufferOverflow { needed: usize, available: usize },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClientError>;
