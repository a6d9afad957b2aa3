//! Helpers for driving prompts without a real terminal
//!
//! Shared by the unit tests and the integration tests under `tests/`.

use crate::error::{PromptError, Result};
use crate::terminal::{Backend, Input, Size};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::io::Write;
use std::sync::{Mutex, OnceLock};

/// Process-wide mutex for tests that mutate environment variables
pub fn env_lock() -> &'static Mutex<()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Backend that replays scripted input and records everything written
///
/// Each scripted chunk is delivered by one `read_input` call, in order.
/// Once the script runs out the backend reports end of input, or waits
/// forever when built with [`hold_open`](Self::hold_open).
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    script: VecDeque<Input>,
    output: Vec<u8>,
    size: Size,
    hold_open: bool,
    closed: bool,
}

impl ScriptedBackend {
    pub fn new<I, B>(chunks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: AsRef<[u8]>,
    {
        Self {
            script: chunks
                .into_iter()
                .map(|chunk| Input::Bytes(chunk.as_ref().to_vec()))
                .collect(),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = size;
        self
    }

    /// Queue another chunk of bytes
    pub fn then_bytes<B: AsRef<[u8]>>(mut self, bytes: B) -> Self {
        self.script.push_back(Input::Bytes(bytes.as_ref().to_vec()));
        self
    }

    /// Queue a resize notification; the reported size changes when it is read
    pub fn then_resize(mut self, size: Size) -> Self {
        self.script.push_back(Input::Resize(size));
        self
    }

    /// Never report end of input
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// Fail every read with `PromptError::Closed`
    pub fn closed(mut self) -> Self {
        self.closed = true;
        self
    }

    /// Raw bytes written so far, escape sequences included
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Written output with escape sequences removed
    pub fn screen(&self) -> String {
        strip_ansi(&String::from_utf8_lossy(&self.output))
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn read_input(&mut self) -> Result<Input> {
        if self.closed {
            return Err(PromptError::Closed);
        }
        match self.script.pop_front() {
            Some(Input::Resize(size)) => {
                self.size = size;
                Ok(Input::Resize(size))
            }
            Some(input) => Ok(input),
            None if self.hold_open => std::future::pending().await,
            None => Ok(Input::Eof),
        }
    }

    fn size(&self) -> Size {
        self.size
    }

    fn writer(&mut self) -> &mut (dyn Write + Send) {
        &mut self.output
    }
}

/// Remove terminal escape sequences, keeping text and line breaks
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }
        if let Some('[') = chars.next() {
            // Parameters and intermediates run until a final byte
            for c in chars.by_ref() {
                if ('\u{40}'..='\u{7e}').contains(&c) {
                    break;
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[?2026hab\x1b[1Gc\x1b[K\x1b[38;5;6md\x1b[0m"), "abcd");
        assert_eq!(strip_ansi("line\r\nnext"), "line\r\nnext");
    }

    #[tokio::test]
    async fn test_scripted_backend_replays_then_ends() {
        let mut backend = ScriptedBackend::new(["ab"]).then_resize(Size::new(10, 5));
        assert_eq!(backend.read_input().await.unwrap(), Input::Bytes(b"ab".to_vec()));
        assert_eq!(backend.read_input().await.unwrap(), Input::Resize(Size::new(10, 5)));
        assert_eq!(backend.size(), Size::new(10, 5));
        assert_eq!(backend.read_input().await.unwrap(), Input::Eof);
        assert_eq!(backend.read_input().await.unwrap(), Input::Eof);
    }

    #[tokio::test]
    async fn test_closed_backend_errors() {
        let mut backend = ScriptedBackend::new(["x"]).closed();
        assert!(matches!(backend.read_input().await, Err(PromptError::Closed)));
    }
}
