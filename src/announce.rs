//! Static announcements printed around prompts
//!
//! These write once and never redraw: an intro opening a session, free-form
//! messages and log lines between prompts, and an outro or cancel notice
//! closing it. The stdout functions use the theme from the loaded config;
//! the `_to` variants take any writer and an explicit theme.

use crate::error::Result;
use crate::style::{Line, Span, Style};
use crate::theme::Theme;
use std::io::{self, Write};

/// Extra text for an announcement
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageOptions {
    /// Dim text shown after the message
    pub hint: Option<String>,
}

impl MessageOptions {
    pub fn with_hint<S: Into<String>>(hint: S) -> Self {
        Self {
            hint: Some(hint.into()),
        }
    }
}

/// Open a session: `┌  title`
pub fn intro(title: &str, options: &MessageOptions) -> Result<()> {
    intro_to(&mut io::stdout(), &crate::default_theme(), title, options)
}

/// Close a session normally: `└  message`
pub fn outro(message: &str, options: &MessageOptions) -> Result<()> {
    outro_to(&mut io::stdout(), &crate::default_theme(), message, options)
}

/// Free-form message under the gutter, one gutter line per text line
pub fn message(text: &str, options: &MessageOptions) -> Result<()> {
    message_to(&mut io::stdout(), &crate::default_theme(), text, options)
}

/// Close a session after the user backed out: `└  message` in red
pub fn cancel(message: &str, options: &MessageOptions) -> Result<()> {
    cancel_to(&mut io::stdout(), &crate::default_theme(), message, options)
}

pub fn intro_to<W: Write>(
    out: &mut W,
    theme: &Theme,
    title: &str,
    options: &MessageOptions,
) -> Result<()> {
    let line = Line::from_spans(vec![
        Span::styled(theme.symbols.bar_start, theme.bar),
        Span::raw("  "),
        Span::styled(title, Style::new().bold()),
    ]);
    write_lines(out, &[with_hint(line, theme, options)])
}

pub fn outro_to<W: Write>(
    out: &mut W,
    theme: &Theme,
    message: &str,
    options: &MessageOptions,
) -> Result<()> {
    let line = Line::from_spans(vec![
        Span::styled(theme.symbols.bar_end, theme.bar),
        Span::raw("  "),
        Span::raw(message),
    ]);
    write_lines(out, &[theme.gutter(), with_hint(line, theme, options), Line::empty()])
}

pub fn message_to<W: Write>(
    out: &mut W,
    theme: &Theme,
    text: &str,
    options: &MessageOptions,
) -> Result<()> {
    let bar = Span::styled(theme.symbols.bar, theme.bar);
    write_block(out, theme, bar, Style::new(), text, options)
}

pub fn cancel_to<W: Write>(
    out: &mut W,
    theme: &Theme,
    message: &str,
    options: &MessageOptions,
) -> Result<()> {
    let line = Line::from_spans(vec![
        Span::styled(theme.symbols.bar_end, theme.bar),
        Span::raw("  "),
        Span::styled(message, theme.canceled),
    ]);
    write_lines(out, &[with_hint(line, theme, options), Line::empty()])
}

fn with_hint(mut line: Line, theme: &Theme, options: &MessageOptions) -> Line {
    if let Some(hint) = &options.hint {
        line.push("  ");
        line.push(Span::styled(hint.as_str(), theme.hint));
    }
    line
}

/// Gutter line, then `symbol  first line`, then `│  rest` for each remaining line
fn write_block<W: Write>(
    out: &mut W,
    theme: &Theme,
    symbol: Span,
    text_style: Style,
    text: &str,
    options: &MessageOptions,
) -> Result<()> {
    let mut lines = vec![theme.gutter()];
    let mut text_lines = text.lines();
    let first = text_lines.next().unwrap_or("");
    lines.push(with_hint(
        Line::from_spans(vec![symbol, Span::raw("  "), Span::styled(first, text_style)]),
        theme,
        options,
    ));
    for rest in text_lines {
        lines.push(Line::from_spans(vec![
            Span::styled(theme.symbols.bar, theme.bar),
            Span::raw("  "),
            Span::styled(rest, text_style),
        ]));
    }
    write_lines(out, &lines)
}

fn write_lines<W: Write>(out: &mut W, lines: &[Line]) -> Result<()> {
    for line in lines {
        for span in &line.spans {
            span.style.queue_enter(out)?;
            out.write_all(span.content.as_bytes())?;
            span.style.queue_leave(out)?;
        }
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}

/// Single-line status messages between prompts
pub mod log {
    use super::{write_block, MessageOptions};
    use crate::error::Result;
    use crate::style::{Color, Span, Style};
    use crate::theme::Theme;
    use std::io::{self, Write};

    /// Severity of a log line, which picks its glyph and color
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Level {
        Info,
        Success,
        Step,
        Warn,
        Error,
    }

    pub fn info(message: &str) -> Result<()> {
        log(Level::Info, message)
    }

    pub fn success(message: &str) -> Result<()> {
        log(Level::Success, message)
    }

    pub fn step(message: &str) -> Result<()> {
        log(Level::Step, message)
    }

    pub fn warn(message: &str) -> Result<()> {
        log(Level::Warn, message)
    }

    pub fn error(message: &str) -> Result<()> {
        log(Level::Error, message)
    }

    fn log(level: Level, message: &str) -> Result<()> {
        log_to(&mut io::stdout(), &crate::default_theme(), level, message)
    }

    pub fn log_to<W: Write>(out: &mut W, theme: &Theme, level: Level, message: &str) -> Result<()> {
        let symbols = &theme.symbols;
        let (glyph, style) = match level {
            Level::Info => (symbols.info, Style::new().fg(Color::Blue)),
            Level::Success => (symbols.success, theme.submitted),
            Level::Step => (symbols.step_submit, theme.submitted),
            Level::Warn => (symbols.warn, theme.error),
            Level::Error => (symbols.error, theme.canceled),
        };
        let text_style = match level {
            Level::Error => theme.canceled,
            _ => Style::new(),
        };
        write_block(
            out,
            theme,
            Span::styled(glyph, style),
            text_style,
            message,
            &MessageOptions::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::log::{log_to, Level};
    use super::*;
    use crate::test_utils::strip_ansi;

    fn capture(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        strip_ansi(&String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_intro_and_outro() {
        let theme = Theme::default();
        let none = MessageOptions::default();
        assert_eq!(
            capture(|out| intro_to(out, &theme, "create-app", &none)),
            "┌  create-app\n"
        );
        assert_eq!(
            capture(|out| outro_to(out, &theme, "All set", &MessageOptions::with_hint("cd app"))),
            "│\n└  All set  cd app\n\n"
        );
    }

    #[test]
    fn test_multiline_message() {
        let theme = Theme::default();
        assert_eq!(
            capture(|out| message_to(out, &theme, "first\nsecond", &MessageOptions::default())),
            "│\n│  first\n│  second\n"
        );
    }

    #[test]
    fn test_cancel_uses_canceled_style() {
        let theme = Theme::default();
        let mut out = Vec::new();
        cancel_to(&mut out, &theme, "Operation cancelled", &MessageOptions::default()).unwrap();
        let raw = String::from_utf8(out).unwrap();
        assert_ne!(strip_ansi(&raw), raw);
        assert_eq!(strip_ansi(&raw), "└  Operation cancelled\n\n");
    }

    #[test]
    fn test_log_levels() {
        let theme = Theme::default();
        let line = |level| capture(|out| log_to(out, &theme, level, "msg"));
        assert_eq!(line(Level::Info), "│\n●  msg\n");
        assert_eq!(line(Level::Success), "│\n◆  msg\n");
        assert_eq!(line(Level::Step), "│\n◇  msg\n");
        assert_eq!(line(Level::Warn), "│\n▲  msg\n");
        assert_eq!(line(Level::Error), "│\n■  msg\n");
    }

    #[test]
    fn test_ascii_symbols() {
        let theme = Theme::with_unicode(false);
        assert_eq!(
            capture(|out| intro_to(out, &theme, "app", &MessageOptions::default())),
            "T  app\n"
        );
    }
}
