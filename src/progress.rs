//! Caller-driven progress bar
//!
//! Progress does not read the keyboard and never enters raw mode. Each call
//! redraws the bar in place through the same diffing [`Renderer`] the
//! prompts use.

use crate::error::Result;
use crate::render::{Frame, Renderer};
use crate::style::{Line, Span};
use crate::theme::Theme;
use serde::{Deserialize, Serialize};
use std::io::{self, Stdout, Write};
use tracing::debug;

const DEFAULT_MAX: u64 = 100;
const DEFAULT_SIZE: usize = 40;

/// Glyph the bar is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProgressStyle {
    Light,
    #[default]
    Heavy,
    Block,
}

/// Bar shape; zero `max` or `size` fall back to 100 and 40
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressOptions {
    pub style: ProgressStyle,
    pub max: u64,
    pub size: usize,
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self {
            style: ProgressStyle::default(),
            max: DEFAULT_MAX,
            size: DEFAULT_SIZE,
        }
    }
}

impl ProgressOptions {
    fn normalized(self) -> Self {
        Self {
            style: self.style,
            max: if self.max == 0 { DEFAULT_MAX } else { self.max },
            size: if self.size == 0 { DEFAULT_SIZE } else { self.size },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    Running,
    Stopped { exit_code: i32 },
}

/// Progress bar writing to `W` (stdout by default)
pub struct Progress<W: Write = Stdout> {
    out: W,
    renderer: Renderer,
    theme: Theme,
    options: ProgressOptions,
    current: u64,
    label: String,
    state: State,
}

impl Progress<Stdout> {
    /// Bar on stdout, truncated to the terminal width when known
    pub fn new(options: ProgressOptions) -> Self {
        let mut progress = Self::with_writer(io::stdout(), options);
        if let Ok((width, _)) = crossterm::terminal::size() {
            progress.renderer.set_width(width);
        }
        progress
    }
}

impl<W: Write> Progress<W> {
    pub fn with_writer(out: W, options: ProgressOptions) -> Self {
        Self {
            out,
            renderer: Renderer::new(),
            theme: Theme::default(),
            options: options.normalized(),
            current: 0,
            label: String::new(),
            state: State::Idle,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Reset to zero and draw the empty bar
    pub fn start(&mut self, label: &str) -> Result<()> {
        if self.is_stopped() {
            return Ok(());
        }
        self.current = 0;
        self.label = label.to_string();
        self.state = State::Running;
        debug!(max = self.options.max, size = self.options.size, "progress started");
        self.draw()
    }

    /// Move forward by `delta`, clamping at `max`; `None` keeps the label
    pub fn advance(&mut self, delta: u64, label: Option<&str>) -> Result<()> {
        if self.is_stopped() {
            return Ok(());
        }
        self.state = State::Running;
        self.current = self.current.saturating_add(delta).min(self.options.max);
        if let Some(label) = label {
            self.label = label.to_string();
        }
        self.draw()
    }

    /// Draw the final bar and leave it in scroll-back
    ///
    /// Exit code 0 completes the bar. Any other code keeps it where it is
    /// and draws a failure marker. Later calls are ignored.
    pub fn stop(&mut self, label: Option<&str>, exit_code: i32) -> Result<()> {
        if self.is_stopped() {
            return Ok(());
        }
        if exit_code == 0 {
            self.current = self.options.max;
        }
        if let Some(label) = label {
            self.label = label.to_string();
        }
        self.state = State::Stopped { exit_code };
        self.draw()?;
        self.renderer.finish(&mut self.out)?;
        debug!(exit_code, current = self.current, "progress stopped");
        Ok(())
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn max(&self) -> u64 {
        self.options.max
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self.state, State::Stopped { .. })
    }

    /// Cells of the bar currently filled
    pub fn filled_cells(&self) -> usize {
        let size = self.options.size as u128;
        let max = u128::from(self.options.max);
        let current = u128::from(self.current);
        // round(size * current / max), half up
        ((2 * size * current + max) / (2 * max)) as usize
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    fn frame(&self) -> Frame {
        let theme = &self.theme;
        let (glyph, style) = match self.state {
            State::Idle | State::Running => (theme.symbols.step_active, theme.active),
            State::Stopped { exit_code: 0 } => (theme.symbols.step_submit, theme.submitted),
            State::Stopped { exit_code: 1 } => (theme.symbols.step_cancel, theme.canceled),
            State::Stopped { .. } => (theme.symbols.step_error, theme.error),
        };
        let cell = match self.options.style {
            ProgressStyle::Light => theme.symbols.progress_light,
            ProgressStyle::Heavy => theme.symbols.progress_heavy,
            ProgressStyle::Block => theme.symbols.progress_block,
        };
        let filled = self.filled_cells();
        let empty = self.options.size - filled;

        let mut bar = Line::from_spans(vec![
            Span::styled(glyph, style),
            Span::raw("  "),
            Span::styled(cell.to_string().repeat(filled), theme.progress_fill),
            Span::styled(cell.to_string().repeat(empty), theme.dim),
        ]);
        if !self.label.is_empty() {
            bar.push("  ");
            bar.push(self.label.as_str());
        }
        Frame::new()
            .line(theme.gutter())
            .line(bar)
    }

    fn draw(&mut self) -> Result<()> {
        let frame = self.frame();
        self.renderer.render(&mut self.out, frame)?;
        Ok(())
    }
}
