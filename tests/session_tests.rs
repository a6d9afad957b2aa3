use promptline::terminal::SessionLock;
use promptline::{interact, PromptError, TerminalSession, TextPrompt};
use serial_test::serial;
use std::io::IsTerminal;

#[test]
#[serial]
fn test_open_requires_a_terminal() {
    if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
        return;
    }
    assert!(matches!(TerminalSession::open(), Err(PromptError::NotATty)));
    assert!(!SessionLock::is_held());
}

#[tokio::test]
#[serial]
async fn test_interact_without_terminal_errors() {
    if std::io::stdin().is_terminal() && std::io::stdout().is_terminal() {
        return;
    }
    let err = interact(TextPrompt::new("Name?")).await.unwrap_err();
    assert!(matches!(err, PromptError::NotATty));
}

#[test]
#[serial]
fn test_lock_is_exclusive() {
    let lock = SessionLock::acquire().unwrap();
    assert!(matches!(SessionLock::acquire(), Err(PromptError::AlreadyOpen)));
    drop(lock);
    assert!(SessionLock::acquire().is_ok());
}
