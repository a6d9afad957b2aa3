//! Inline interactive terminal prompts
//!
//! Text, select, multi-select and confirm prompts share one key-driven
//! engine and one diffing renderer. Progress bars and static announcements
//! reuse the same look without reading the keyboard.

pub mod announce;
pub mod config;
pub mod error;
pub mod event;
pub mod progress;
pub mod prompt;
pub mod render;
pub mod style;
pub mod terminal;
pub mod test_utils;
pub mod theme;

pub use config::PromptConfig;
pub use error::{PromptError, Result};
pub use progress::{Progress, ProgressOptions, ProgressStyle};
pub use prompt::{
    is_cancel, CancellationSignal, ConfirmPrompt, MultiSelectPrompt, Prompt, PromptEngine,
    PromptResult, SelectOption, SelectPrompt, TextPrompt,
};
pub use terminal::TerminalSession;
pub use theme::Theme;

use std::sync::OnceLock;
use tracing::warn;

/// Run `prompt` on the controlling terminal
///
/// Loads [`PromptConfig`], opens a [`TerminalSession`] for the duration of
/// the prompt and restores the terminal before returning.
pub async fn interact<P: Prompt>(prompt: P) -> Result<PromptResult<P::Output>> {
    run_on_terminal(prompt, None).await
}

/// Like [`interact`], but also canceled when `signal` is raised
pub async fn interact_until<P: Prompt>(
    prompt: P,
    signal: CancellationSignal,
) -> Result<PromptResult<P::Output>> {
    run_on_terminal(prompt, Some(signal)).await
}

async fn run_on_terminal<P: Prompt>(
    prompt: P,
    signal: Option<CancellationSignal>,
) -> Result<PromptResult<P::Output>> {
    let config = PromptConfig::resolve()?;
    let session = TerminalSession::open()?;
    let mut engine = PromptEngine::new(session).with_config(&config);
    if let Some(signal) = signal {
        engine = engine.with_cancellation(signal);
    }
    let result = engine.run(prompt).await;
    engine.into_backend().close();
    result
}

/// Theme for output that is not tied to an engine, from the loaded config
pub(crate) fn default_theme() -> Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    *THEME.get_or_init(|| match PromptConfig::resolve() {
        Ok(config) => Theme::with_unicode(config.display.unicode),
        Err(err) => {
            warn!("falling back to default theme: {}", err);
            Theme::default()
        }
    })
}
