//! Single-choice select prompt

use super::{option_window, Prompt, PromptStatus, RenderContext, SelectOption, Transition};
use crate::error::{PromptError, Result};
use crate::event::Key;
use crate::render::Frame;
use crate::style::{Line, Span};
use crate::theme::{Phase, Theme};

/// Pick exactly one option with the arrow keys
///
/// The cursor wraps at both ends. Enter submits the highlighted value.
pub struct SelectPrompt<T> {
    message: String,
    options: Vec<SelectOption<T>>,
    cursor: usize,
    max_items: Option<usize>,
}

impl<T: Clone + PartialEq> SelectPrompt<T> {
    pub fn new<S, I>(message: S, options: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = SelectOption<T>>,
    {
        Self {
            message: message.into(),
            options: options.into_iter().collect(),
            cursor: 0,
            max_items: None,
        }
    }

    /// Start with the cursor on the option holding `value`, if any
    pub fn initial_value(mut self, value: T) -> Self {
        if let Some(index) = self.options.iter().position(|opt| *opt.value() == value) {
            self.cursor = index;
        }
        self
    }

    /// Show at most `n` options at a time, scrolling with the cursor
    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn options(&self) -> &[SelectOption<T>] {
        &self.options
    }

    fn move_up(&mut self) {
        let n = self.options.len();
        if n > 0 {
            self.cursor = (self.cursor + n - 1) % n;
        }
    }

    fn move_down(&mut self) {
        let n = self.options.len();
        if n > 0 {
            self.cursor = (self.cursor + 1) % n;
        }
    }

    fn option_line(&self, theme: &Theme, index: usize) -> Line {
        let option = &self.options[index];
        let mut line = theme.body(Phase::Active);
        if index == self.cursor {
            line.push(Span::styled(theme.symbols.radio_active, theme.submitted));
            line.push(" ");
            line.push(Span::styled(option.label(), theme.highlight));
            if let Some(hint) = option.hint() {
                line.push(Span::styled(format!(" ({})", hint), theme.hint));
            }
        } else {
            line.push(Span::styled(theme.symbols.radio_inactive, theme.dim));
            line.push(" ");
            line.push(Span::styled(option.label(), theme.dim));
        }
        line
    }
}

impl<T: Clone + PartialEq> Prompt for SelectPrompt<T> {
    type Output = T;

    fn check(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(PromptError::NoOptions(self.message.clone()));
        }
        Ok(())
    }

    fn vi_navigation(&self) -> bool {
        true
    }

    fn handle_key(&mut self, key: Key) -> Transition<T> {
        match key {
            Key::Up | Key::Left | Key::BackTab => self.move_up(),
            Key::Down | Key::Right | Key::Tab => self.move_down(),
            Key::Enter => {
                if let Some(option) = self.options.get(self.cursor) {
                    return Transition::Submit(option.value().clone());
                }
            }
            _ => {}
        }
        Transition::Continue
    }

    fn render(&self, ctx: &RenderContext) -> Frame {
        let theme = &ctx.theme;
        let phase = ctx.phase(false);
        let mut frame = Frame::new()
            .line(theme.gutter())
            .line(theme.header(phase, &self.message));
        let label = self.options.get(self.cursor).map_or("", SelectOption::label);

        match ctx.status {
            PromptStatus::Active => {
                let rows = ctx.visible_rows(self.max_items);
                for index in option_window(self.options.len(), self.cursor, rows) {
                    frame.push(self.option_line(theme, index));
                }
                frame.push(theme.footer(phase, None));
            }
            PromptStatus::Submitted => {
                frame.push(theme.body(phase).with(Span::styled(label, theme.dim)));
            }
            PromptStatus::Canceled => {
                frame.push(
                    theme
                        .body(phase)
                        .with(Span::styled(label, theme.dim.crossed_out())),
                );
                frame.push(theme.gutter());
            }
        }
        frame
    }
}
