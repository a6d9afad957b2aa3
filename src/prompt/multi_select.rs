//! Multiple-choice select prompt

use super::{option_window, Prompt, PromptStatus, RenderContext, SelectOption, Transition};
use crate::error::{PromptError, Result};
use crate::event::Key;
use crate::render::Frame;
use crate::style::{Line, Span};
use crate::theme::{Phase, Theme};
use std::collections::BTreeSet;

const REQUIRED_MESSAGE: &str = "Select at least one option (space to toggle, enter to submit)";

/// Pick any number of options
///
/// Space toggles the highlighted option. Enter submits the selected values
/// in the order the options were given, not the order they were toggled.
pub struct MultiSelectPrompt<T> {
    message: String,
    options: Vec<SelectOption<T>>,
    cursor: usize,
    selected: BTreeSet<usize>,
    required: bool,
    max_items: Option<usize>,
    error: Option<String>,
}

impl<T: Clone + PartialEq> MultiSelectPrompt<T> {
    pub fn new<S, I>(message: S, options: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = SelectOption<T>>,
    {
        Self {
            message: message.into(),
            options: options.into_iter().collect(),
            cursor: 0,
            selected: BTreeSet::new(),
            required: false,
            max_items: None,
            error: None,
        }
    }

    /// Preselect every option whose value appears in `values`
    pub fn initial_values<I: IntoIterator<Item = T>>(mut self, values: I) -> Self {
        for value in values {
            if let Some(index) = self.options.iter().position(|opt| *opt.value() == value) {
                self.selected.insert(index);
            }
        }
        self
    }

    /// Refuse to submit an empty selection
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn max_items(mut self, n: usize) -> Self {
        self.max_items = Some(n);
        self
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Indices of the selected options, ascending
    pub fn selected(&self) -> impl Iterator<Item = usize> + '_ {
        self.selected.iter().copied()
    }

    pub fn toggle(&mut self, index: usize) {
        if index >= self.options.len() {
            return;
        }
        if !self.selected.remove(&index) {
            self.selected.insert(index);
        }
    }

    fn values(&self) -> Vec<T> {
        self.selected
            .iter()
            .map(|&i| self.options[i].value().clone())
            .collect()
    }

    fn labels(&self) -> String {
        self.selected
            .iter()
            .map(|&i| self.options[i].label())
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn option_line(&self, theme: &Theme, phase: Phase, index: usize) -> Line {
        let option = &self.options[index];
        let is_cursor = index == self.cursor;
        let is_selected = self.selected.contains(&index);
        let mut line = theme.body(phase);

        if is_cursor {
            line.push(Span::styled(theme.symbols.pointer, theme.active));
        } else {
            line.push(" ");
        }
        line.push(" ");
        let mark = match (is_selected, is_cursor) {
            (true, _) => Span::styled(theme.symbols.checkbox_selected, theme.submitted),
            (false, true) => Span::styled(theme.symbols.checkbox_active, theme.active),
            (false, false) => Span::styled(theme.symbols.checkbox_inactive, theme.dim),
        };
        line.push(mark);
        line.push(" ");
        if is_cursor {
            line.push(Span::styled(option.label(), theme.highlight));
            if let Some(hint) = option.hint() {
                line.push(Span::styled(format!(" ({})", hint), theme.hint));
            }
        } else {
            line.push(Span::styled(option.label(), theme.dim));
        }
        line
    }
}

impl<T: Clone + PartialEq> Prompt for MultiSelectPrompt<T> {
    type Output = Vec<T>;

    fn check(&self) -> Result<()> {
        if self.options.is_empty() {
            return Err(PromptError::NoOptions(self.message.clone()));
        }
        Ok(())
    }

    fn vi_navigation(&self) -> bool {
        true
    }

    fn handle_key(&mut self, key: Key) -> Transition<Vec<T>> {
        let n = self.options.len();
        match key {
            Key::Up | Key::Left if n > 0 => self.cursor = (self.cursor + n - 1) % n,
            Key::Down | Key::Right if n > 0 => self.cursor = (self.cursor + 1) % n,
            Key::Space => self.toggle(self.cursor),
            Key::Enter => {
                if self.required && self.selected.is_empty() {
                    self.error = Some(REQUIRED_MESSAGE.to_string());
                    return Transition::Continue;
                }
                return Transition::Submit(self.values());
            }
            _ => return Transition::Continue,
        }
        self.error = None;
        Transition::Continue
    }

    fn render(&self, ctx: &RenderContext) -> Frame {
        let theme = &ctx.theme;
        let phase = ctx.phase(self.error.is_some());
        let mut frame = Frame::new()
            .line(theme.gutter())
            .line(theme.header(phase, &self.message));

        match ctx.status {
            PromptStatus::Active => {
                let rows = ctx.visible_rows(self.max_items);
                for index in option_window(self.options.len(), self.cursor, rows) {
                    frame.push(self.option_line(theme, phase, index));
                }
                frame.push(theme.footer(phase, self.error.as_deref()));
            }
            PromptStatus::Submitted => {
                frame.push(theme.body(phase).with(Span::styled(self.labels(), theme.dim)));
            }
            PromptStatus::Canceled => {
                let mut line = theme.body(phase);
                if !self.selected.is_empty() {
                    line.push(Span::styled(self.labels(), theme.dim.crossed_out()));
                }
                frame.push(line);
                frame.push(theme.gutter());
            }
        }
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::Size;

    fn prompt() -> MultiSelectPrompt<&'static str> {
        MultiSelectPrompt::new(
            "Toppings",
            ["x", "y", "z"].into_iter().map(SelectOption::new),
        )
    }

    fn ctx(status: PromptStatus) -> RenderContext {
        RenderContext {
            status,
            theme: Theme::default(),
            size: Size::new(80, 24),
        }
    }

    #[test]
    fn test_submits_in_option_order() {
        let mut p = prompt().initial_values(["y"]);
        for key in [Key::Space, Key::Down, Key::Down, Key::Space] {
            assert_eq!(p.handle_key(key), Transition::Continue);
        }
        assert_eq!(p.handle_key(Key::Enter), Transition::Submit(vec!["x", "y", "z"]));
    }

    #[test]
    fn test_toggle_order_does_not_matter() {
        let mut p = prompt();
        p.toggle(2);
        p.toggle(0);
        assert_eq!(p.handle_key(Key::Enter), Transition::Submit(vec!["x", "z"]));
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        let mut p = prompt().initial_values(["z"]);
        for index in 0..3 {
            let before: Vec<usize> = p.selected().collect();
            p.toggle(index);
            p.toggle(index);
            assert_eq!(p.selected().collect::<Vec<_>>(), before);
        }
    }

    #[test]
    fn test_unmatched_initial_values_ignored() {
        let p = prompt().initial_values(["nope", "x"]);
        assert_eq!(p.selected().collect::<Vec<_>>(), vec![0]);
    }

    #[test]
    fn test_required_blocks_empty_submit() {
        let mut p = prompt().required(true);
        assert_eq!(p.handle_key(Key::Enter), Transition::Continue);
        let frame = p.render(&ctx(PromptStatus::Active));
        assert!(frame.plain()[1].starts_with("▲"));
        assert!(frame.plain().last().unwrap().contains("Select at least one option"));

        p.handle_key(Key::Space);
        assert_eq!(p.handle_key(Key::Enter), Transition::Submit(vec!["x"]));
    }

    #[test]
    fn test_empty_submit_allowed_by_default() {
        let mut p = prompt();
        assert_eq!(p.handle_key(Key::Enter), Transition::Submit(Vec::new()));
    }

    #[test]
    fn test_render_markers_are_independent() {
        let mut p = prompt().initial_values(["y"]);
        p.handle_key(Key::Down);
        p.handle_key(Key::Down);
        assert_eq!(
            p.render(&ctx(PromptStatus::Active)).plain(),
            vec![
                "│",
                "◆  Toppings",
                "│    ◻ x",
                "│    ◼ y",
                "│  › ◻ z",
                "└",
            ]
        );
    }

    #[test]
    fn test_render_submitted_lists_labels() {
        let mut p = prompt().initial_values(["z", "x"]);
        assert_eq!(
            p.render(&ctx(PromptStatus::Submitted)).plain(),
            vec!["│", "◇  Toppings", "│  x, z"]
        );
        p.toggle(0);
        p.toggle(2);
        assert_eq!(
            p.render(&ctx(PromptStatus::Canceled)).plain(),
            vec!["│", "■  Toppings", "│  ", "│"]
        );
    }
}
