//! One full render of a prompt

use crate::style::Line;

/// Ordered lines describing a prompt's state at one instant
///
/// Frames are built fresh from state for every render and handed to the
/// renderer by value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    lines: Vec<Line>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push<L: Into<Line>>(&mut self, line: L) {
        self.lines.push(line.into());
    }

    /// Builder-style push
    pub fn line<L: Into<Line>>(mut self, line: L) -> Self {
        self.push(line);
        self
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of every line without styling
    pub fn plain(&self) -> Vec<String> {
        self.lines.iter().map(Line::plain).collect()
    }
}

impl From<Vec<Line>> for Frame {
    fn from(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

impl FromIterator<Line> for Frame {
    fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}
