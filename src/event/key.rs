//! Decoded key events

/// A key press as seen by prompts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Printable character (never a space; that is [`Key::Space`])
    Char(char),
    Space,
    Enter,
    Backspace,
    Delete,
    Esc,
    Tab,
    BackTab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    /// Ctrl-C
    Interrupt,
}

impl Key {
    /// Keys that cancel any prompt regardless of its own handling
    pub fn is_cancel(&self) -> bool {
        matches!(self, Key::Esc | Key::Interrupt)
    }

    pub fn is_enter(&self) -> bool {
        matches!(self, Key::Enter)
    }

    /// The character this key inserts into text, if any
    pub fn as_char(&self) -> Option<char> {
        match self {
            Key::Char(c) => Some(*c),
            Key::Space => Some(' '),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_cancel() {
        assert!(Key::Esc.is_cancel());
        assert!(Key::Interrupt.is_cancel());
        assert!(!Key::Enter.is_cancel());
        assert!(!Key::Char('q').is_cancel());
    }

    #[test]
    fn test_as_char() {
        assert_eq!(Key::Char('a').as_char(), Some('a'));
        assert_eq!(Key::Space.as_char(), Some(' '));
        assert_eq!(Key::Enter.as_char(), None);
        assert_eq!(Key::Up.as_char(), None);
    }
}
