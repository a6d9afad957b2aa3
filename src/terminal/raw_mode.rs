//! Process-wide session lock and RAII guard for raw terminal mode

use crate::error::{PromptError, Result};
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::{self, stdout};
use std::sync::atomic::{AtomicBool, Ordering};

static SESSION_OPEN: AtomicBool = AtomicBool::new(false);

/// Exclusive claim on the controlling terminal
///
/// At most one lock exists per process. Dropping it releases the claim.
#[derive(Debug)]
pub struct SessionLock {
    _private: (),
}

impl SessionLock {
    /// Claim the terminal, failing with `AlreadyOpen` if it is held
    pub fn acquire() -> Result<Self> {
        SESSION_OPEN
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| PromptError::AlreadyOpen)?;
        Ok(Self { _private: () })
    }

    /// Whether some session currently holds the terminal
    pub fn is_held() -> bool {
        SESSION_OPEN.load(Ordering::Acquire)
    }
}

impl Drop for SessionLock {
    fn drop(&mut self) {
        SESSION_OPEN.store(false, Ordering::Release);
    }
}

/// RAII guard for raw terminal mode
///
/// Entering raw mode also hides the hardware cursor; prompts draw their own.
/// Dropping the guard restores cooked mode and shows the cursor again, even
/// when unwinding from a panic.
pub struct RawModeGuard {
    _private: (),
}

impl RawModeGuard {
    pub(crate) fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        if let Err(err) = execute!(stdout(), Hide) {
            let _ = disable_raw_mode();
            return Err(err);
        }
        Ok(Self { _private: () })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Best effort; nothing useful can be done with a failure here
        let _ = restore_terminal();
    }
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), Show)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_second_acquire_is_rejected() {
        let first = SessionLock::acquire().unwrap();
        assert!(SessionLock::is_held());
        assert!(matches!(
            SessionLock::acquire(),
            Err(PromptError::AlreadyOpen)
        ));
        drop(first);
        assert!(!SessionLock::is_held());
        let again = SessionLock::acquire();
        assert!(again.is_ok());
    }
}
