//! Dedicated thread pumping raw stdin bytes into a channel
//!
//! The thread is started on first use and lives for the rest of the process.
//! Its receiving end is parked here between sessions so consecutive prompts
//! share one reader instead of racing several blocked threads for stdin.

use std::io::{self, Read};
use std::sync::Mutex;
use std::thread;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::debug;

const READ_CHUNK: usize = 64;

/// A chunk read from stdin
#[derive(Debug)]
pub(crate) enum Chunk {
    Bytes(Vec<u8>),
    Eof,
}

static PARKED: Mutex<Option<UnboundedReceiver<Chunk>>> = Mutex::new(None);
static STARTED: Mutex<bool> = Mutex::new(false);

/// Take the stdin receiver, starting the reader thread if needed
///
/// Returns `None` only if the receiver is already checked out, which the
/// session lock rules out.
pub(crate) fn checkout() -> io::Result<Option<UnboundedReceiver<Chunk>>> {
    let mut started = STARTED.lock().unwrap_or_else(|e| e.into_inner());
    if !*started {
        let (tx, rx) = mpsc::unbounded_channel();
        thread::Builder::new()
            .name("promptline-stdin".to_string())
            .spawn(move || {
                let stdin = io::stdin();
                let mut buf = [0u8; READ_CHUNK];
                loop {
                    match stdin.lock().read(&mut buf) {
                        Ok(0) => {
                            let _ = tx.send(Chunk::Eof);
                            break;
                        }
                        Ok(n) => {
                            if tx.send(Chunk::Bytes(buf[..n].to_vec())).is_err() {
                                break;
                            }
                        }
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                        Err(err) => {
                            debug!("stdin reader stopping: {}", err);
                            let _ = tx.send(Chunk::Eof);
                            break;
                        }
                    }
                }
            })?;
        *started = true;
        return Ok(Some(rx));
    }
    let mut parked = PARKED.lock().unwrap_or_else(|e| e.into_inner());
    Ok(parked.take())
}

/// Hand the receiver back for the next session
pub(crate) fn park(rx: UnboundedReceiver<Chunk>) {
    let mut parked = PARKED.lock().unwrap_or_else(|e| e.into_inner());
    *parked = Some(rx);
}
