//! Interactive prompts and the engine that runs them
//!
//! A [`Prompt`] is a small state machine: it receives decoded keys, answers
//! with a [`Transition`], and renders its current state as a [`Frame`]. The
//! [`PromptEngine`] owns everything else (terminal input, cancellation,
//! diff rendering) and is shared by every prompt type.

mod cancel;
mod confirm;
mod engine;
mod multi_select;
mod option;
mod select;
mod text;

pub use cancel::CancellationSignal;
pub use confirm::ConfirmPrompt;
pub use engine::PromptEngine;
pub use multi_select::MultiSelectPrompt;
pub use option::SelectOption;
pub use select::SelectPrompt;
pub use text::TextPrompt;

use crate::error::Result;
use crate::event::Key;
use crate::render::Frame;
use crate::terminal::Size;
use crate::theme::{Phase, Theme};

/// Outcome of one interactive session
///
/// A prompt either resolves to a value or is canceled. The two are kept
/// apart so a legitimately empty value (`""`, `false`, `0`) is never
/// mistaken for a cancellation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResult<T> {
    Submitted(T),
    Canceled,
}

impl<T> PromptResult<T> {
    pub fn is_cancel(&self) -> bool {
        matches!(self, PromptResult::Canceled)
    }

    pub fn is_submitted(&self) -> bool {
        matches!(self, PromptResult::Submitted(_))
    }

    /// The submitted value, or `None` if canceled
    pub fn submitted(self) -> Option<T> {
        match self {
            PromptResult::Submitted(value) => Some(value),
            PromptResult::Canceled => None,
        }
    }

    pub fn as_ref(&self) -> PromptResult<&T> {
        match self {
            PromptResult::Submitted(value) => PromptResult::Submitted(value),
            PromptResult::Canceled => PromptResult::Canceled,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> PromptResult<U> {
        match self {
            PromptResult::Submitted(value) => PromptResult::Submitted(f(value)),
            PromptResult::Canceled => PromptResult::Canceled,
        }
    }
}

/// True iff `result` is the canceled outcome
pub fn is_cancel<T>(result: &PromptResult<T>) -> bool {
    result.is_cancel()
}

/// What a prompt wants after handling a key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition<T> {
    /// Stay active (state may have changed)
    Continue,
    Submit(T),
    Cancel,
}

/// Lifecycle state of the engine's run loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptStatus {
    Active,
    Submitted,
    Canceled,
}

/// Everything a prompt needs to draw itself
#[derive(Debug, Clone, Copy)]
pub struct RenderContext {
    pub status: PromptStatus,
    pub theme: Theme,
    pub size: Size,
}

impl RenderContext {
    /// Decoration phase, given whether the prompt has a pending error
    pub fn phase(&self, has_error: bool) -> Phase {
        match self.status {
            PromptStatus::Active if has_error => Phase::Error,
            PromptStatus::Active => Phase::Active,
            PromptStatus::Submitted => Phase::Submitted,
            PromptStatus::Canceled => Phase::Canceled,
        }
    }

    /// How many option rows fit on screen next to the prompt chrome
    pub fn visible_rows(&self, max_items: Option<usize>) -> usize {
        // gutter + header + footer, plus a line of slack
        let fit = usize::from(self.size.height).saturating_sub(4).max(1);
        max_items.map_or(fit, |max| max.max(1).min(fit))
    }
}

/// A key-driven prompt state machine
pub trait Prompt {
    /// Value produced on submit
    type Output;

    /// Reject configurations that cannot be run
    fn check(&self) -> Result<()> {
        Ok(())
    }

    /// Whether `h`/`j`/`k`/`l` should decode as arrow keys
    fn vi_navigation(&self) -> bool {
        false
    }

    /// Apply one key. Esc and Ctrl-C never reach this method.
    fn handle_key(&mut self, key: Key) -> Transition<Self::Output>;

    /// Draw the current state
    fn render(&self, ctx: &RenderContext) -> Frame;
}

/// Range of option indices to show so that `cursor` stays visible
pub(crate) fn option_window(len: usize, cursor: usize, rows: usize) -> std::ops::Range<usize> {
    if len <= rows {
        return 0..len;
    }
    let half = rows / 2;
    let start = cursor.saturating_sub(half).min(len - rows);
    start..start + rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_result_helpers() {
        let ok: PromptResult<&str> = PromptResult::Submitted("");
        assert!(!is_cancel(&ok));
        assert!(ok.is_submitted());
        assert_eq!(ok.clone().submitted(), Some(""));
        assert_eq!(ok.map(str::len), PromptResult::Submitted(0));

        let canceled: PromptResult<bool> = PromptResult::Canceled;
        assert!(is_cancel(&canceled));
        assert_eq!(canceled.submitted(), None);
    }

    #[test]
    fn test_option_window() {
        assert_eq!(option_window(3, 2, 10), 0..3);
        assert_eq!(option_window(20, 0, 5), 0..5);
        assert_eq!(option_window(20, 10, 5), 8..13);
        assert_eq!(option_window(20, 19, 5), 15..20);
    }

    #[test]
    fn test_visible_rows() {
        let ctx = RenderContext {
            status: PromptStatus::Active,
            theme: Theme::default(),
            size: Size::new(80, 10),
        };
        assert_eq!(ctx.visible_rows(None), 6);
        assert_eq!(ctx.visible_rows(Some(3)), 3);
        assert_eq!(ctx.visible_rows(Some(50)), 6);
    }
}
