//! Style combining a foreground color and attributes

use super::{Color, Modifier};
use crossterm::{
    queue,
    style::{Attribute, SetAttribute, SetForegroundColor},
};
use std::io::{self, Write};

/// Style applied to a span of prompt text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Style {
    pub fg: Color,
    pub modifier: Modifier,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: Color::Reset,
            modifier: Modifier::NONE,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    pub const fn bold(mut self) -> Self {
        self.modifier = self.modifier.union(Modifier::BOLD);
        self
    }

    pub const fn dim(mut self) -> Self {
        self.modifier = self.modifier.union(Modifier::DIM);
        self
    }

    pub const fn italic(mut self) -> Self {
        self.modifier = self.modifier.union(Modifier::ITALIC);
        self
    }

    pub const fn reversed(mut self) -> Self {
        self.modifier = self.modifier.union(Modifier::REVERSED);
        self
    }

    pub const fn crossed_out(mut self) -> Self {
        self.modifier = self.modifier.union(Modifier::CROSSED_OUT);
        self
    }

    pub fn is_plain(&self) -> bool {
        self.fg == Color::Reset && self.modifier.is_empty()
    }

    /// Queue the escape sequences that switch the terminal to this style
    pub(crate) fn queue_enter<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if self.fg != Color::Reset {
            queue!(out, SetForegroundColor(self.fg.into()))?;
        }
        for attr in self.modifier.attributes() {
            queue!(out, SetAttribute(attr))?;
        }
        Ok(())
    }

    /// Queue a full attribute reset if this style changed anything
    pub(crate) fn queue_leave<W: Write>(&self, out: &mut W) -> io::Result<()> {
        if !self.is_plain() {
            queue!(out, SetAttribute(Attribute::Reset))?;
        }
        Ok(())
    }
}
