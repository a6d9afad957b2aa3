//! Exclusive raw-mode session on the controlling terminal

use super::backend::{Backend, Input, Size};
use super::raw_mode::{RawModeGuard, SessionLock};
use super::stdin_reader::{self, Chunk};
use crate::error::{PromptError, Result};
use async_trait::async_trait;
use crossterm::terminal;
use std::io::{self, IsTerminal, Stdout, Write};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::debug;

/// Raw-mode session on the process's terminal
///
/// While a session is open the terminal delivers unbuffered, unechoed
/// input. Only one session can be open per process.
///
/// The first session starts a background thread that owns stdin for the
/// rest of the process. Once a session has been opened, bytes typed after
/// it closes are buffered for the next session and never reach other
/// readers of stdin; the next `open` discards them as typeahead.
pub struct TerminalSession {
    input: Option<UnboundedReceiver<Chunk>>,
    stdout: Stdout,
    size: Size,
    eof: bool,
    raw_mode: Option<RawModeGuard>,
    lock: Option<SessionLock>,
    #[cfg(unix)]
    resize: Option<tokio::signal::unix::Signal>,
}

impl TerminalSession {
    /// Put the terminal into raw mode and start delivering its input
    ///
    /// Fails with `NotATty` when stdin or stdout is not a terminal and with
    /// `AlreadyOpen` when another session is outstanding.
    pub fn open() -> Result<Self> {
        if !io::stdin().is_terminal() || !io::stdout().is_terminal() {
            return Err(PromptError::NotATty);
        }
        let lock = SessionLock::acquire()?;
        let raw_mode = RawModeGuard::enter()?;
        let mut input = stdin_reader::checkout()?.ok_or(PromptError::AlreadyOpen)?;

        // Keys typed before the prompt appeared must not answer it
        let mut eof = false;
        while let Ok(chunk) = input.try_recv() {
            if matches!(chunk, Chunk::Eof) {
                eof = true;
            }
        }

        let size = terminal::size()
            .map(|(width, height)| Size::new(width, height))
            .unwrap_or_default();
        debug!(width = size.width, height = size.height, "terminal session opened");

        Ok(Self {
            input: Some(input),
            stdout: io::stdout(),
            size,
            eof,
            raw_mode: Some(raw_mode),
            lock: Some(lock),
            #[cfg(unix)]
            resize: None,
        })
    }

    /// Restore the terminal; safe to call more than once
    pub fn close(&mut self) {
        if let Some(input) = self.input.take() {
            stdin_reader::park(input);
        }
        let _ = self.stdout.flush();
        self.raw_mode.take();
        if self.lock.take().is_some() {
            debug!("terminal session closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.lock.is_some()
    }

    /// Re-query the terminal size (call after a resize notification)
    pub fn refresh_size(&mut self) {
        if let Ok((width, height)) = terminal::size() {
            self.size = Size::new(width, height);
        }
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        self.close();
    }
}

#[async_trait]
impl Backend for TerminalSession {
    async fn read_input(&mut self) -> Result<Input> {
        let Some(input) = self.input.as_mut() else {
            return Err(PromptError::Closed);
        };
        if self.eof {
            return Ok(Input::Eof);
        }

        #[cfg(unix)]
        let next = {
            use tokio::signal::unix::{signal, SignalKind};
            if self.resize.is_none() {
                self.resize = signal(SignalKind::window_change())
                    .map_err(|err| debug!("resize notifications unavailable: {}", err))
                    .ok();
            }
            match self.resize.as_mut() {
                Some(resize) => tokio::select! {
                    chunk = input.recv() => Some(chunk),
                    _ = resize.recv() => None,
                },
                None => Some(input.recv().await),
            }
        };
        #[cfg(not(unix))]
        let next = Some(input.recv().await);

        match next {
            None => {
                self.refresh_size();
                Ok(Input::Resize(self.size))
            }
            Some(Some(Chunk::Bytes(bytes))) => Ok(Input::Bytes(bytes)),
            Some(Some(Chunk::Eof)) | Some(None) => {
                self.eof = true;
                Ok(Input::Eof)
            }
        }
    }

    fn size(&self) -> Size {
        self.size
    }

    fn writer(&mut self) -> &mut (dyn Write + Send) {
        &mut self.stdout
    }
}
