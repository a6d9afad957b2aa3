//! Text attributes (bold, dim, reversed, ...)

use crossterm::style::Attribute;
use std::ops::BitOr;

/// Text attributes as a bitfield
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifier(u8);

impl Modifier {
    pub const NONE: Self = Self(0);
    pub const BOLD: Self = Self(1 << 0);
    pub const DIM: Self = Self(1 << 1);
    pub const ITALIC: Self = Self(1 << 2);
    pub const UNDERLINED: Self = Self(1 << 3);
    /// Swap foreground and background; used for the fake text cursor
    pub const REVERSED: Self = Self(1 << 4);
    pub const CROSSED_OUT: Self = Self(1 << 5);

    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub const fn contains(&self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Crossterm attributes to emit for this set, in a stable order
    pub fn attributes(&self) -> impl Iterator<Item = Attribute> + '_ {
        [
            (Self::BOLD, Attribute::Bold),
            (Self::DIM, Attribute::Dim),
            (Self::ITALIC, Attribute::Italic),
            (Self::UNDERLINED, Attribute::Underlined),
            (Self::REVERSED, Attribute::Reverse),
            (Self::CROSSED_OUT, Attribute::CrossedOut),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, attr)| attr)
    }
}

impl BitOr for Modifier {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}
