//! Yes/no confirmation prompt

use super::{Prompt, PromptStatus, RenderContext, Transition};
use crate::event::Key;
use crate::render::Frame;
use crate::style::{Line, Span};
use crate::theme::Theme;

/// Boolean choice between two labels
pub struct ConfirmPrompt {
    message: String,
    active: String,
    inactive: String,
    value: bool,
}

impl ConfirmPrompt {
    /// Prompt defaulting to `true`, labeled "Yes" / "No"
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
            active: "Yes".to_string(),
            inactive: "No".to_string(),
            value: true,
        }
    }

    pub fn initial_value(mut self, value: bool) -> Self {
        self.value = value;
        self
    }

    /// Label for `true`
    pub fn active<S: Into<String>>(mut self, label: S) -> Self {
        self.active = label.into();
        self
    }

    /// Label for `false`
    pub fn inactive<S: Into<String>>(mut self, label: S) -> Self {
        self.inactive = label.into();
        self
    }

    pub fn value(&self) -> bool {
        self.value
    }

    fn label(&self) -> &str {
        if self.value {
            &self.active
        } else {
            &self.inactive
        }
    }
}

impl Prompt for ConfirmPrompt {
    type Output = bool;

    fn vi_navigation(&self) -> bool {
        true
    }

    fn handle_key(&mut self, key: Key) -> Transition<bool> {
        match key {
            Key::Left | Key::Right | Key::Up | Key::Down | Key::Tab | Key::BackTab => {
                self.value = !self.value;
            }
            Key::Char('y') | Key::Char('Y') => {
                self.value = true;
                return Transition::Submit(true);
            }
            Key::Char('n') | Key::Char('N') => {
                self.value = false;
                return Transition::Submit(false);
            }
            Key::Enter => return Transition::Submit(self.value),
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

        match ctx.status {
            PromptStatus::Active => {
                let mut line = theme.body(phase);
                push_choice(&mut line, theme, &self.active, self.value);
                line.push(Span::styled(" / ", theme.dim));
                push_choice(&mut line, theme, &self.inactive, !self.value);
                frame.push(line);
                frame.push(theme.footer(phase, None));
            }
            PromptStatus::Submitted => {
                frame.push(theme.body(phase).with(Span::styled(self.label(), theme.dim)));
            }
            PromptStatus::Canceled => {
                frame.push(
                    theme
                        .body(phase)
                        .with(Span::styled(self.label(), theme.dim.crossed_out())),
                );
                frame.push(theme.gutter());
            }
        }
        frame
    }
}

fn push_choice(line: &mut Line, theme: &Theme, label: &str, on: bool) {
    if on {
        line.push(Span::styled(theme.symbols.radio_active, theme.submitted));
        line.push(" ");
        line.push(label);
    } else {
        line.push(Span::styled(theme.symbols.radio_inactive, theme.dim));
        line.push(" ");
        line.push(Span::styled(label, theme.dim));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::Size;

    fn ctx(status: PromptStatus) -> RenderContext {
        RenderContext {
            status,
            theme: Theme::default(),
            size: Size::new(80, 24),
        }
    }

    #[test]
    fn test_enter_submits_initial_value() {
        assert_eq!(ConfirmPrompt::new("Ok?").handle_key(Key::Enter), Transition::Submit(true));
        assert_eq!(
            ConfirmPrompt::new("Ok?").initial_value(false).handle_key(Key::Enter),
            Transition::Submit(false)
        );
    }

    #[test]
    fn test_arrows_flip() {
        let mut p = ConfirmPrompt::new("Ok?");
        p.handle_key(Key::Right);
        assert!(!p.value());
        p.handle_key(Key::Left);
        assert!(p.value());
        p.handle_key(Key::Tab);
        assert_eq!(p.handle_key(Key::Enter), Transition::Submit(false));
    }

    #[test]
    fn test_shortcuts_submit_immediately() {
        let mut p = ConfirmPrompt::new("Ok?");
        assert_eq!(p.handle_key(Key::Char('n')), Transition::Submit(false));
        let mut p = ConfirmPrompt::new("Ok?").initial_value(false);
        assert_eq!(p.handle_key(Key::Char('Y')), Transition::Submit(true));
    }

    #[test]
    fn test_other_keys_ignored() {
        let mut p = ConfirmPrompt::new("Ok?");
        assert_eq!(p.handle_key(Key::Char('q')), Transition::Continue);
        assert_eq!(p.handle_key(Key::Space), Transition::Continue);
        assert!(p.value());
    }

    #[test]
    fn test_render() {
        let p = ConfirmPrompt::new("Deploy?").active("Ship it").inactive("Wait");
        assert_eq!(
            p.render(&ctx(PromptStatus::Active)).plain(),
            vec!["│", "◆  Deploy?", "│  ● Ship it / ○ Wait", "└"]
        );
        assert_eq!(
            p.render(&ctx(PromptStatus::Submitted)).plain(),
            vec!["│", "◇  Deploy?", "│  Ship it"]
        );
    }
}
