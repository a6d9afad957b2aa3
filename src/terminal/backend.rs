//! Input/output seam between the prompt engine and a terminal

use crate::error::Result;
use async_trait::async_trait;
use std::io::Write;

/// Terminal dimensions in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Size {
    pub width: u16,
    pub height: u16,
}

impl Size {
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

/// One unit of terminal input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Raw bytes as delivered by the terminal
    Bytes(Vec<u8>),
    /// The terminal was resized
    Resize(Size),
    /// The input stream ended
    Eof,
}

/// Byte-level terminal the prompt engine drives
///
/// [`TerminalSession`](super::TerminalSession) is the real implementation;
/// [`ScriptedBackend`](crate::test_utils::ScriptedBackend) replays canned
/// input for tests.
#[async_trait]
pub trait Backend: Send {
    /// Wait for the next chunk of input
    ///
    /// Fails with [`PromptError::Closed`](crate::PromptError::Closed) once
    /// the backend has been closed.
    async fn read_input(&mut self) -> Result<Input>;

    /// Current terminal size
    fn size(&self) -> Size;

    /// Sink that rendered frames are written to
    fn writer(&mut self) -> &mut (dyn Write + Send);
}
