//! Prompt runtime error types

use thiserror::Error;

/// Errors that can occur while acquiring the terminal or running a prompt
///
/// Submitting and canceling are not errors; they are reported through
/// [`PromptResult`](crate::prompt::PromptResult).
#[derive(Error, Debug)]
pub enum PromptError {
    /// Standard input or output is not an interactive terminal
    #[error("Interactive prompting is unavailable: stdin/stdout is not a terminal")]
    NotATty,

    /// A terminal session is already open in this process
    #[error("A terminal session is already open; only one prompt may be interactive at a time")]
    AlreadyOpen,

    /// The session was closed before the read completed
    #[error("Terminal session is closed")]
    Closed,

    /// A select-style prompt was run without any options
    #[error("Prompt '{0}' has no options to choose from")]
    NoOptions(String),

    /// Configuration could not be loaded or is invalid
    #[error("Invalid prompt configuration: {0}")]
    Config(String),

    /// Underlying terminal I/O failed
    #[error("Terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PromptError>;
