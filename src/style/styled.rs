//! Styled text types: Span and Line

use super::text_utils::truncate_to_width;
use super::Style;
use unicode_width::UnicodeWidthStr;

/// A run of text in a single style
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Span {
    pub content: String,
    pub style: Style,
}

impl Span {
    pub fn raw<S: Into<String>>(content: S) -> Self {
        Self {
            content: content.into(),
            style: Style::default(),
        }
    }

    pub fn styled<S: Into<String>>(content: S, style: Style) -> Self {
        Self {
            content: content.into(),
            style,
        }
    }

    /// Display width in terminal cells
    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.content.as_str())
    }
}

impl<S: Into<String>> From<S> for Span {
    fn from(s: S) -> Self {
        Self::raw(s)
    }
}

/// One screen row of a frame
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Line {
    pub spans: Vec<Span>,
}

impl Line {
    pub fn empty() -> Self {
        Self { spans: Vec::new() }
    }

    pub fn raw<S: Into<String>>(content: S) -> Self {
        Self {
            spans: vec![Span::raw(content)],
        }
    }

    pub fn from_spans<I: IntoIterator<Item = Span>>(spans: I) -> Self {
        Self {
            spans: spans.into_iter().collect(),
        }
    }

    /// Append a span, builder style
    pub fn with<S: Into<Span>>(mut self, span: S) -> Self {
        self.spans.push(span.into());
        self
    }

    pub fn push<S: Into<Span>>(&mut self, span: S) {
        self.spans.push(span.into());
    }

    pub fn width(&self) -> usize {
        self.spans.iter().map(Span::width).sum()
    }

    /// The line's text with all styling removed
    pub fn plain(&self) -> String {
        self.spans.iter().map(|s| s.content.as_str()).collect()
    }

    /// Copy of the line with every control character replaced by a space
    pub fn without_controls(&self) -> Line {
        self.spans
            .iter()
            .map(|span| {
                let content = if span.content.chars().any(char::is_control) {
                    span.content
                        .chars()
                        .map(|c| if c.is_control() { ' ' } else { c })
                        .collect::<String>()
                } else {
                    span.content.clone()
                };
                Span::styled(content, span.style)
            })
            .collect()
    }

    /// Clip the line so it fits in `max_width` cells
    ///
    /// Spans past the limit are dropped; the span straddling it is cut.
    pub fn truncated(&self, max_width: usize) -> Line {
        if self.width() <= max_width {
            return self.clone();
        }
        let mut remaining = max_width;
        let mut spans = Vec::new();
        for span in &self.spans {
            if remaining == 0 {
                break;
            }
            let width = span.width();
            if width <= remaining {
                spans.push(span.clone());
                remaining -= width;
            } else {
                spans.push(Span::styled(
                    truncate_to_width(&span.content, remaining),
                    span.style,
                ));
                remaining = 0;
            }
        }
        Line { spans }
    }
}

impl From<&str> for Line {
    fn from(s: &str) -> Self {
        Self::raw(s)
    }
}

impl From<String> for Line {
    fn from(s: String) -> Self {
        Self::raw(s)
    }
}

impl FromIterator<Span> for Line {
    fn from_iter<I: IntoIterator<Item = Span>>(iter: I) -> Self {
        Self::from_spans(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::Color;

    #[test]
    fn test_span_width() {
        assert_eq!(Span::raw("hello").width(), 5);
        // 3 characters, 6 cells wide
        assert_eq!(Span::raw("日本語").width(), 6);
    }

    #[test]
    fn test_line_plain() {
        let line = Line::empty()
            .with("◆  ")
            .with(Span::styled("Pick one", Style::new().bold()));
        assert_eq!(line.plain(), "◆  Pick one");
        assert_eq!(line.width(), 11);
    }

    #[test]
    fn test_line_truncated() {
        let red = Style::new().fg(Color::Red);
        let line = Line::from_spans(vec![Span::raw("abc"), Span::styled("defgh", red)]);

        let cut = line.truncated(5);
        assert_eq!(cut.plain(), "abcde");
        assert_eq!(cut.spans[1].style, red);

        let untouched = line.truncated(80);
        assert_eq!(untouched, line);
    }

    #[test]
    fn test_line_equality_includes_style() {
        let a = Line::raw("x");
        let b = Line::from_spans(vec![Span::styled("x", Style::new().bold())]);
        assert_ne!(a, b);
    }
}
