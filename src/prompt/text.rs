//! Free-text input prompt

use super::{Prompt, PromptStatus, RenderContext, Transition};
use crate::event::Key;
use crate::render::Frame;
use crate::style::Span;

type Validator = Box<dyn Fn(&str) -> Result<(), String> + Send>;

/// Editable buffer with a character-indexed cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextState {
    buffer: Vec<char>,
    /// Position in characters, `0..=buffer.len()`
    cursor: usize,
}

impl TextState {
    pub fn with_value(value: &str) -> Self {
        let buffer: Vec<char> = value.chars().collect();
        let cursor = buffer.len();
        Self { buffer, cursor }
    }

    pub fn value(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn insert(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += 1;
    }

    /// Delete the character before the cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            self.buffer.remove(self.cursor);
        }
    }

    /// Delete the character under the cursor
    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.buffer.len());
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.buffer.len();
    }
}

/// Single-line text prompt
///
/// Submits the typed text, or the default value when nothing was typed.
pub struct TextPrompt {
    message: String,
    placeholder: Option<String>,
    default_value: String,
    state: TextState,
    validator: Option<Validator>,
    mask: Option<Option<char>>,
    error: Option<String>,
}

impl TextPrompt {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            placeholder: None,
            default_value: String::new(),
            state: TextState::default(),
            validator: None,
            mask: None,
            error: None,
        }
    }

    /// Dim text shown while the buffer is empty
    pub fn placeholder<S: Into<String>>(mut self, placeholder: S) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Value submitted when Enter is pressed on an empty buffer
    pub fn default_value<S: Into<String>>(mut self, value: S) -> Self {
        self.default_value = value.into();
        self
    }

    /// Pre-fill the buffer, cursor at the end
    pub fn initial_value<S: AsRef<str>>(mut self, value: S) -> Self {
        self.state = TextState::with_value(value.as_ref());
        self
    }

    /// Check the value on submit; an `Err` message keeps the prompt open
    pub fn validate<F>(mut self, validator: F) -> Self
    where
        F: Fn(&str) -> Result<(), String> + Send + 'static,
    {
        self.validator = Some(Box::new(validator));
        self
    }

    /// Hide input behind the theme's password mask
    pub fn password(mut self) -> Self {
        self.mask = Some(None);
        self
    }

    /// Hide input behind a specific character
    pub fn mask(mut self, c: char) -> Self {
        self.mask = Some(Some(c));
        self
    }

    pub fn state(&self) -> &TextState {
        &self.state
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn resolved_value(&self) -> String {
        if self.state.is_empty() {
            self.default_value.clone()
        } else {
            self.state.value()
        }
    }

    fn display(&self, text: &str, mask_char: char) -> String {
        match self.mask {
            Some(mask) => {
                let c = mask.unwrap_or(mask_char);
                std::iter::repeat(c).take(text.chars().count()).collect()
            }
            None => text.to_string(),
        }
    }
}

impl Prompt for TextPrompt {
    type Output = String;

    fn handle_key(&mut self, key: Key) -> Transition<String> {
        match key {
            Key::Enter => {
                let value = self.resolved_value();
                if let Some(validator) = &self.validator {
                    if let Err(message) = validator(&value) {
                        self.error = Some(message);
                        return Transition::Continue;
                    }
                }
                return Transition::Submit(value);
            }
            Key::Backspace => self.state.backspace(),
            Key::Delete => self.state.delete(),
            Key::Left => self.state.move_left(),
            Key::Right => self.state.move_right(),
            Key::Home => self.state.move_home(),
            Key::End => self.state.move_end(),
            other => match other.as_char() {
                Some(c) => self.state.insert(c),
                None => return Transition::Continue,
            },
        }
        self.error = None;
        Transition::Continue
    }

    fn render(&self, ctx: &RenderContext) -> Frame {
        let theme = ctx.theme;
        let phase = ctx.phase(self.error.is_some());
        let mask_char = theme.symbols.password_mask;
        let mut frame = Frame::new()
            .line(theme.gutter())
            .line(theme.header(phase, &self.message));

        match ctx.status {
            PromptStatus::Active => {
                let mut line = theme.body(phase);
                if self.state.is_empty() {
                    let placeholder = self.placeholder.as_deref().unwrap_or("");
                    let mut chars = placeholder.chars();
                    let first = chars.next().map_or(" ".to_string(), String::from);
                    line.push(Span::styled(first, theme.cursor));
                    line.push(Span::styled(chars.collect::<String>(), theme.dim));
                } else {
                    let shown: Vec<char> = self.display(&self.state.value(), mask_char).chars().collect();
                    let cursor = self.state.cursor();
                    line.push(shown[..cursor].iter().collect::<String>());
                    match shown.get(cursor) {
                        Some(c) => {
                            line.push(Span::styled(c.to_string(), theme.cursor));
                            line.push(shown[cursor + 1..].iter().collect::<String>());
                        }
                        None => line.push(Span::styled(" ", theme.cursor)),
                    }
                }
                frame.push(line);
                frame.push(theme.footer(phase, self.error.as_deref()));
            }
            PromptStatus::Submitted => {
                let shown = self.display(&self.resolved_value(), mask_char);
                let mut line = theme.body(phase);
                line.push(Span::styled(shown, theme.dim));
                frame.push(line);
            }
            PromptStatus::Canceled => {
                let mut line = theme.body(phase);
                if !self.state.is_empty() {
                    let shown = self.display(&self.state.value(), mask_char);
                    line.push(Span::styled(shown, theme.dim.crossed_out()));
                }
                frame.push(line);
                frame.push(theme.gutter());
            }
        }
        frame
    }
}
