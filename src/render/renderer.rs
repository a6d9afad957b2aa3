//! Line-diffing inline renderer

use super::Frame;
use crate::style::Line;
use crossterm::{
    cursor::{MoveDown, MoveToColumn, MoveUp},
    queue,
    style::Print,
    terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate},
};
use std::io::{self, Write};
use tracing::trace;

/// What a single [`Renderer::render`] call touched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderStats {
    /// Lines rewritten because their content changed
    pub lines_written: usize,
    /// Leftover lines blanked because the frame shrank
    pub lines_cleared: usize,
}

impl RenderStats {
    pub fn is_noop(&self) -> bool {
        self.lines_written == 0 && self.lines_cleared == 0
    }
}

/// Inline renderer owning the frame last written to the terminal
///
/// The region starts on the line the cursor occupies when the first frame
/// is drawn and grows downward. Only lines that differ from the previous
/// frame are rewritten.
#[derive(Debug, Default)]
pub struct Renderer {
    previous: Frame,
    /// Rows of the region that exist on screen
    rows: usize,
    /// Row (relative to the region top) the cursor is parked on
    cursor_row: usize,
    /// Terminal width in cells; 0 disables truncation
    width: u16,
    /// Rewrite every line on the next render
    force_redraw: bool,
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_width(width: u16) -> Self {
        Self {
            width,
            ..Self::default()
        }
    }

    /// Update the terminal width; the next render rewrites everything
    pub fn set_width(&mut self, width: u16) {
        if width != self.width {
            self.width = width;
            self.force_redraw = true;
        }
    }

    /// The frame currently on screen
    pub fn previous(&self) -> &Frame {
        &self.previous
    }

    /// Draw `next`, rewriting only the lines that changed
    pub fn render<W: Write>(
        &mut self,
        out: &mut W,
        next: Frame,
    ) -> io::Result<RenderStats> {
        let next: Frame = next
            .lines()
            .iter()
            .map(|line| self.fit(line))
            .collect();

        let changed: Vec<usize> = (0..next.len())
            .filter(|&i| self.force_redraw || self.previous.get(i) != next.get(i))
            .collect();
        let stale = next.len()..self.previous.len();

        let stats = RenderStats {
            lines_written: changed.len(),
            lines_cleared: stale.len(),
        };
        if stats.is_noop() {
            self.force_redraw = false;
            return Ok(stats);
        }

        queue!(out, BeginSynchronizedUpdate)?;
        for &i in &changed {
            self.move_to_row(out, i)?;
            for span in &next.lines()[i].spans {
                span.style.queue_enter(out)?;
                queue!(out, Print(&span.content))?;
                span.style.queue_leave(out)?;
            }
            queue!(out, Clear(ClearType::UntilNewLine))?;
        }
        for i in stale {
            self.move_to_row(out, i)?;
            queue!(out, Clear(ClearType::CurrentLine))?;
        }
        queue!(out, EndSynchronizedUpdate)?;
        out.flush()?;

        trace!(
            written = stats.lines_written,
            cleared = stats.lines_cleared,
            "frame rendered"
        );
        self.previous = next;
        self.force_redraw = false;
        Ok(stats)
    }

    /// Park the cursor below the region, leaving its content on screen
    ///
    /// The renderer is reset; the next render starts a new region on the
    /// line the cursor now occupies.
    pub fn finish<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        // Rows past the content were cleared by the last render
        if !self.previous.is_empty() {
            let last = self.previous.len() - 1;
            self.move_to_row(out, last)?;
            queue!(out, Print("\r\n"))?;
            out.flush()?;
        } else if self.rows > 0 {
            self.move_to_row(out, 0)?;
            out.flush()?;
        }
        self.previous = Frame::new();
        self.rows = 0;
        self.cursor_row = 0;
        self.force_redraw = false;
        Ok(())
    }

    fn fit(&self, line: &Line) -> Line {
        // One frame line must occupy exactly one terminal row
        let line = line.without_controls();
        if self.width == 0 {
            return line;
        }
        // Leave the last column free so the terminal never auto-wraps
        line.truncated(usize::from(self.width).saturating_sub(1))
    }

    fn move_to_row<W: Write>(&mut self, out: &mut W, row: usize) -> io::Result<()> {
        if row < self.cursor_row {
            queue!(out, MoveUp(to_u16(self.cursor_row - row)))?;
        } else if row > self.cursor_row {
            let last_existing = self.rows.saturating_sub(1).max(self.cursor_row);
            let down = row.min(last_existing) - self.cursor_row;
            if down > 0 {
                queue!(out, MoveDown(to_u16(down)))?;
            }
            for _ in last_existing..row {
                queue!(out, Print("\r\n"))?;
            }
        }
        queue!(out, MoveToColumn(0))?;
        self.cursor_row = row;
        self.rows = self.rows.max(row + 1);
        Ok(())
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}
