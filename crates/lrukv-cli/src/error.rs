//! Error types for command parsing

use std::fmt;

/// Result type alias for command parsing
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a script line is not a valid command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Line has no command word
    Empty,

    /// Command word is not recognised
    UnknownCommand(String),

    /// Command got the wrong number of arguments
    WrongArity {
        command: &'static str,
        expected: usize,
        got: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Empty => write!(f, "empty command"),
            Error::UnknownCommand(cmd) => write!(f, "unknown command '{}'", cmd),
            Error::WrongArity { command, expected, got } => write!(
                f,
                "wrong number of arguments for '{}' command (expected {}, got {})",
                command.to_lowercase(),
                expected,
                got
            ),
        }
    }
}

impl std::error::Error for Error {}
