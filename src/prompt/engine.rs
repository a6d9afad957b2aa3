//! Shared run loop for every prompt type

use super::{CancellationSignal, Prompt, PromptResult, PromptStatus, RenderContext, Transition};
use crate::config::PromptConfig;
use crate::error::{PromptError, Result};
use crate::event::{Key, KeyDecoder};
use crate::render::Renderer;
use crate::terminal::{Backend, Input};
use crate::theme::Theme;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::debug;

/// Default wait before a lone ESC byte is treated as the Esc key
pub const DEFAULT_ESCAPE_TIMEOUT: Duration = Duration::from_millis(25);

/// What woke the engine while it waited for input
enum Wake {
    Cancelled,
    EscapeTimeout,
    Input(Result<Input>),
}

/// What the run loop does next
enum Step {
    Key(Key),
    Redraw,
    Stop,
}

/// Drives a [`Prompt`] against a [`Backend`]
///
/// The engine owns the backend, the renderer and the key decoder. Prompts
/// run one at a time; each run leaves its final frame on screen and parks
/// the cursor below it.
pub struct PromptEngine<B: Backend> {
    backend: B,
    renderer: Renderer,
    decoder: KeyDecoder,
    theme: Theme,
    cancel: Option<CancellationSignal>,
    escape_timeout: Duration,
    vi_navigation: bool,
    pending: VecDeque<Key>,
}

impl<B: Backend> PromptEngine<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            renderer: Renderer::new(),
            decoder: KeyDecoder::new(),
            theme: Theme::default(),
            cancel: None,
            escape_timeout: DEFAULT_ESCAPE_TIMEOUT,
            vi_navigation: true,
            pending: VecDeque::new(),
        }
    }

    /// Apply input and display settings from a loaded config
    pub fn with_config(mut self, config: &PromptConfig) -> Self {
        self.escape_timeout = config.input.escape_timeout();
        self.vi_navigation = config.input.vi_navigation;
        self.theme = Theme::with_unicode(config.display.unicode);
        self
    }

    /// Cancel the running prompt once `signal` is raised
    pub fn with_cancellation(mut self, signal: CancellationSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn with_escape_timeout(mut self, timeout: Duration) -> Self {
        self.escape_timeout = timeout;
        self
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Run `prompt` until it is submitted or canceled
    ///
    /// Esc, Ctrl-C, end of input and the cancellation signal all resolve to
    /// [`PromptResult::Canceled`]. Only terminal I/O failures and invalid
    /// prompt setups are errors.
    pub async fn run<P: Prompt>(&mut self, mut prompt: P) -> Result<PromptResult<P::Output>> {
        prompt.check()?;
        self.decoder =
            KeyDecoder::new().with_vi_navigation(self.vi_navigation && prompt.vi_navigation());
        self.pending.clear();
        self.renderer.set_width(self.backend.size().width);

        let outcome = loop {
            self.draw(&prompt, PromptStatus::Active)?;
            let key = match self.next_step().await? {
                Step::Key(key) => key,
                Step::Redraw => continue,
                Step::Stop => break PromptResult::Canceled,
            };
            if key.is_cancel() {
                debug!(?key, "prompt canceled from keyboard");
                break PromptResult::Canceled;
            }
            match prompt.handle_key(key) {
                Transition::Continue => {}
                Transition::Submit(value) => break PromptResult::Submitted(value),
                Transition::Cancel => break PromptResult::Canceled,
            }
        };

        let status = if outcome.is_cancel() {
            PromptStatus::Canceled
        } else {
            PromptStatus::Submitted
        };
        self.draw(&prompt, status)?;
        let mut out = self.backend.writer();
        self.renderer.finish(&mut out)?;
        debug!(?status, "prompt finished");
        Ok(outcome)
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancellationSignal::is_cancelled)
    }

    fn draw<P: Prompt>(&mut self, prompt: &P, status: PromptStatus) -> Result<()> {
        let ctx = RenderContext {
            status,
            theme: self.theme,
            size: self.backend.size(),
        };
        let frame = prompt.render(&ctx);
        let mut out = self.backend.writer();
        self.renderer.render(&mut out, frame)?;
        Ok(())
    }

    async fn next_step(&mut self) -> Result<Step> {
        loop {
            // External cancellation wins over keys that are already queued
            if self.is_cancelled() {
                debug!("prompt canceled by signal");
                return Ok(Step::Stop);
            }
            if let Some(key) = self.pending.pop_front() {
                return Ok(Step::Key(key));
            }

            let escape_pending = self.decoder.is_pending();
            let wake = tokio::select! {
                biased;
                _ = wait_cancelled(self.cancel.as_ref()) => Wake::Cancelled,
                _ = tokio::time::sleep(self.escape_timeout), if escape_pending => Wake::EscapeTimeout,
                input = self.backend.read_input() => Wake::Input(input),
            };

            match wake {
                Wake::Cancelled => continue,
                Wake::EscapeTimeout => {
                    if let Some(key) = self.decoder.flush() {
                        self.pending.push_back(key);
                    }
                }
                Wake::Input(Ok(Input::Bytes(bytes))) => {
                    self.pending.extend(self.decoder.decode(&bytes));
                }
                Wake::Input(Ok(Input::Resize(size))) => {
                    debug!(width = size.width, height = size.height, "terminal resized");
                    self.renderer.set_width(size.width);
                    return Ok(Step::Redraw);
                }
                Wake::Input(Ok(Input::Eof)) => match self.decoder.flush() {
                    Some(key) => self.pending.push_back(key),
                    None => {
                        debug!("input ended while prompting");
                        return Ok(Step::Stop);
                    }
                },
                Wake::Input(Err(PromptError::Closed)) => return Ok(Step::Stop),
                Wake::Input(Err(err)) => return Err(err),
            }
        }
    }
}

async fn wait_cancelled(signal: Option<&CancellationSignal>) {
    match signal {
        Some(signal) => signal.cancelled().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::{ConfirmPrompt, SelectOption, SelectPrompt, TextPrompt};
    use crate::terminal::Size;
    use crate::test_utils::ScriptedBackend;

    #[tokio::test]
    async fn test_text_submit() {
        let backend = ScriptedBackend::new(["hi", "\r"]);
        let mut engine = PromptEngine::new(backend);
        let result = engine.run(TextPrompt::new("Say?")).await.unwrap();
        assert_eq!(result, PromptResult::Submitted("hi".to_string()));

        let screen = engine.backend().screen();
        assert!(screen.contains("◇  Say?"));
        assert!(screen.ends_with("\r\n"));
    }

    #[tokio::test]
    async fn test_eof_cancels() {
        let backend = ScriptedBackend::new(["partial"]);
        let mut engine = PromptEngine::new(backend);
        let result = engine.run(TextPrompt::new("Say?")).await.unwrap();
        assert!(result.is_cancel());
        assert!(engine.backend().screen().contains("■  Say?"));
    }

    #[tokio::test]
    async fn test_closed_backend_cancels() {
        let backend = ScriptedBackend::new(Vec::<&str>::new()).closed();
        let mut engine = PromptEngine::new(backend);
        let result = engine.run(ConfirmPrompt::new("Ok?")).await.unwrap();
        assert!(result.is_cancel());
    }

    #[tokio::test]
    async fn test_lone_escape_cancels_after_timeout() {
        let backend = ScriptedBackend::new(["\x1b"]).hold_open();
        let mut engine =
            PromptEngine::new(backend).with_escape_timeout(Duration::from_millis(5));
        let run = engine.run(TextPrompt::new("Say?"));
        let result = tokio::time::timeout(Duration::from_secs(2), run)
            .await
            .expect("escape was never flushed")
            .unwrap();
        assert!(result.is_cancel());
    }

    #[tokio::test]
    async fn test_signal_cancels_idle_prompt() {
        let backend = ScriptedBackend::new(Vec::<&str>::new()).hold_open();
        let signal = CancellationSignal::new();
        let mut engine = PromptEngine::new(backend).with_cancellation(signal.clone());
        let canceller = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            signal.cancel();
        });
        let run = engine.run(TextPrompt::new("Say?"));
        let result = tokio::time::timeout(Duration::from_secs(2), run)
            .await
            .expect("signal was ignored")
            .unwrap();
        assert!(result.is_cancel());
        canceller.await.unwrap();
    }

    #[tokio::test]
    async fn test_signal_wins_over_ready_keys() {
        let backend = ScriptedBackend::new(["\r"]);
        let signal = CancellationSignal::new();
        signal.cancel();
        let mut engine = PromptEngine::new(backend).with_cancellation(signal);
        let result = engine.run(ConfirmPrompt::new("Ok?")).await.unwrap();
        assert!(result.is_cancel());
    }

    #[tokio::test]
    async fn test_empty_select_is_an_error() {
        let backend = ScriptedBackend::new(["\r"]);
        let mut engine = PromptEngine::new(backend);
        let prompt: SelectPrompt<String> = SelectPrompt::new("Pick", Vec::new());
        let err = engine.run(prompt).await.unwrap_err();
        assert!(matches!(err, PromptError::NoOptions(_)));
    }

    #[tokio::test]
    async fn test_resize_redraws_at_new_width() {
        let backend = ScriptedBackend::new(Vec::<&str>::new())
            .with_size(Size::new(80, 24))
            .then_resize(Size::new(12, 24))
            .then_bytes("\r");
        let mut engine = PromptEngine::new(backend);
        let result = engine
            .run(TextPrompt::new("A rather long question?").default_value("x"))
            .await
            .unwrap();
        assert_eq!(result, PromptResult::Submitted("x".to_string()));
        // Width 12 leaves 11 usable cells
        assert!(engine.backend().screen().contains("◇  A rather"));
        assert!(!engine.backend().screen().contains("◇  A rather long"));
    }

    #[tokio::test]
    async fn test_vi_keys_only_for_navigating_prompts() {
        let options = vec![SelectOption::new("a"), SelectOption::new("b")];
        let mut engine = PromptEngine::new(ScriptedBackend::new(["j\r"]));
        let picked = engine.run(SelectPrompt::new("Pick", options)).await.unwrap();
        assert_eq!(picked, PromptResult::Submitted("b"));

        let mut engine = PromptEngine::new(ScriptedBackend::new(["jk\r"]));
        let typed = engine.run(TextPrompt::new("Say?")).await.unwrap();
        assert_eq!(typed, PromptResult::Submitted("jk".to_string()));
    }

    #[tokio::test]
    async fn test_vi_navigation_disabled_by_config() {
        let mut config = PromptConfig::default();
        config.input.vi_navigation = false;
        let options = vec![SelectOption::new("a"), SelectOption::new("b")];
        let mut engine = PromptEngine::new(ScriptedBackend::new(["j\r"])).with_config(&config);
        let picked = engine.run(SelectPrompt::new("Pick", options)).await.unwrap();
        assert_eq!(picked, PromptResult::Submitted("a"));
    }
}
