//! Fixed look of the prompts: glyphs plus the styles they are painted in

mod symbols;

pub use symbols::Symbols;

use crate::style::{Color, Line, Span, Style};

/// Where a prompt is in its lifecycle, as far as decoration is concerned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Active,
    /// Active, but the last submit attempt was rejected
    Error,
    Submitted,
    Canceled,
}

/// Symbols and styles shared by every prompt frame
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub symbols: Symbols,
    pub active: Style,
    pub submitted: Style,
    pub canceled: Style,
    pub error: Style,
    pub bar: Style,
    pub dim: Style,
    pub hint: Style,
    pub highlight: Style,
    pub cursor: Style,
    pub progress_fill: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Self::new(Symbols::UNICODE)
    }
}

impl Theme {
    pub fn new(symbols: Symbols) -> Self {
        Self {
            symbols,
            active: Style::new().fg(Color::Cyan),
            submitted: Style::new().fg(Color::Green),
            canceled: Style::new().fg(Color::Red),
            error: Style::new().fg(Color::Yellow),
            bar: Style::new().fg(Color::DarkGrey),
            dim: Style::new().dim(),
            hint: Style::new().fg(Color::DarkGrey).italic(),
            highlight: Style::new().fg(Color::Cyan).bold(),
            cursor: Style::new().reversed(),
            progress_fill: Style::new().fg(Color::Magenta),
        }
    }

    /// Theme with ASCII or unicode glyphs
    pub fn with_unicode(unicode: bool) -> Self {
        Self::new(Symbols::new(unicode))
    }

    /// Style of the gutter bar for a phase
    pub fn bar_style(&self, phase: Phase) -> Style {
        match phase {
            Phase::Active => self.active,
            Phase::Error => self.error,
            Phase::Submitted | Phase::Canceled => self.bar,
        }
    }

    /// Header line: phase glyph followed by the prompt message
    pub fn header(&self, phase: Phase, message: &str) -> Line {
        let (glyph, style) = match phase {
            Phase::Active => (self.symbols.step_active, self.active),
            Phase::Error => (self.symbols.step_error, self.error),
            Phase::Submitted => (self.symbols.step_submit, self.submitted),
            Phase::Canceled => (self.symbols.step_cancel, self.canceled),
        };
        Line::from_spans(vec![
            Span::styled(glyph, style),
            Span::raw("  "),
            Span::raw(message),
        ])
    }

    /// Empty gutter line separating a prompt from what came before
    pub fn gutter(&self) -> Line {
        Line::from_spans(vec![Span::styled(self.symbols.bar, self.bar)])
    }

    /// Gutter bar plus padding, ready for content spans
    pub fn body(&self, phase: Phase) -> Line {
        Line::from_spans(vec![
            Span::styled(self.symbols.bar, self.bar_style(phase)),
            Span::raw("  "),
        ])
    }

    /// Closing line of an active prompt, optionally carrying an error
    pub fn footer(&self, phase: Phase, error: Option<&str>) -> Line {
        let mut line = Line::from_spans(vec![Span::styled(
            self.symbols.bar_end,
            self.bar_style(phase),
        )]);
        if let Some(message) = error {
            line.push("  ");
            line.push(Span::styled(message, self.error));
        }
        line
    }
}
