//! Terminal abstraction over crossterm

mod backend;
mod raw_mode;
mod session;
mod stdin_reader;

pub use backend::{Backend, Input, Size};
pub use raw_mode::{RawModeGuard, SessionLock};
pub use session::TerminalSession;
