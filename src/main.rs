use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use promptline::announce::{self, log, MessageOptions};
use promptline::{
    interact, interact_until, CancellationSignal, ConfirmPrompt, MultiSelectPrompt, Progress,
    PromptConfig, PromptResult, SelectOption, SelectPrompt, TextPrompt, Theme,
};
use std::env;
use std::fmt::Debug;
use std::time::Duration;

/// Try out the promptline prompts from the command line
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Ask for a line of text
    Text {
        message: String,
        #[arg(long)]
        placeholder: Option<String>,
        #[arg(long)]
        default: Option<String>,
        /// Mask the input
        #[arg(long)]
        password: bool,
        /// Cancel automatically after this many seconds
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Pick one of several options
    Select {
        message: String,
        #[arg(required = true)]
        options: Vec<String>,
        #[arg(long)]
        initial: Option<String>,
    },
    /// Pick any number of options
    Multiselect {
        message: String,
        #[arg(required = true)]
        options: Vec<String>,
        /// Preselected options (comma-separated)
        #[arg(long, value_delimiter = ',')]
        initial: Vec<String>,
        /// Refuse an empty selection
        #[arg(long)]
        required: bool,
    },
    /// Ask a yes/no question
    Confirm {
        message: String,
        /// Start on "No"
        #[arg(long)]
        no: bool,
    },
    /// Fill a progress bar
    Progress {
        #[arg(long, default_value_t = 20)]
        steps: u64,
        #[arg(long, default_value_t = 50)]
        delay_ms: u64,
        #[arg(long, value_enum)]
        style: Option<BarStyle>,
        /// Stop with a failure marker halfway through
        #[arg(long)]
        fail: bool,
    },
    /// Walk through every prompt type
    Tour,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
#[value(rename_all = "lowercase")]
enum BarStyle {
    Light,
    Heavy,
    Block,
}

impl From<BarStyle> for promptline::ProgressStyle {
    fn from(style: BarStyle) -> Self {
        match style {
            BarStyle::Light => promptline::ProgressStyle::Light,
            BarStyle::Heavy => promptline::ProgressStyle::Heavy,
            BarStyle::Block => promptline::ProgressStyle::Block,
        }
    }
}

fn init_logging(config: &PromptConfig) {
    let default_directive = format!("promptline={}", config.logging.level.to_lowercase());
    let env_override = env::var("RUST_LOG").unwrap_or_default();
    let combined_filter = if env_override.trim().is_empty() {
        default_directive
    } else if env_override.contains("promptline") {
        env_override
    } else {
        format!("{},{}", env_override, default_directive)
    };

    tracing_subscriber::fmt()
        .with_env_filter(combined_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn report<T: Debug>(result: PromptResult<T>) {
    match result {
        PromptResult::Submitted(value) => println!("{:?}", value),
        PromptResult::Canceled => println!("canceled"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = PromptConfig::resolve()?;
    init_logging(&config);

    match cli.command {
        Commands::Text {
            message,
            placeholder,
            default,
            password,
            timeout,
        } => {
            let mut prompt = TextPrompt::new(message);
            if let Some(placeholder) = placeholder {
                prompt = prompt.placeholder(placeholder);
            }
            if let Some(default) = default {
                prompt = prompt.default_value(default);
            }
            if password {
                prompt = prompt.password();
            }
            let result = match timeout {
                Some(secs) => {
                    let signal = CancellationSignal::with_timeout(Duration::from_secs(secs));
                    interact_until(prompt, signal).await?
                }
                None => interact(prompt).await?,
            };
            report(result);
        }
        Commands::Select {
            message,
            options,
            initial,
        } => {
            let mut prompt = SelectPrompt::new(message, options.into_iter().map(SelectOption::new));
            if let Some(initial) = initial {
                prompt = prompt.initial_value(initial);
            }
            report(interact(prompt).await?);
        }
        Commands::Multiselect {
            message,
            options,
            initial,
            required,
        } => {
            let prompt = MultiSelectPrompt::new(message, options.into_iter().map(SelectOption::new))
                .initial_values(initial)
                .required(required);
            report(interact(prompt).await?);
        }
        Commands::Confirm { message, no } => {
            report(interact(ConfirmPrompt::new(message).initial_value(!no)).await?);
        }
        Commands::Progress {
            steps,
            delay_ms,
            style,
            fail,
        } => {
            let mut options = config.progress.to_options();
            options.max = steps;
            if let Some(style) = style {
                options.style = style.into();
            }
            run_progress(&config, options, delay_ms, fail).await?;
        }
        Commands::Tour => tour(&config).await?,
    }
    Ok(())
}

async fn run_progress(
    config: &PromptConfig,
    options: promptline::ProgressOptions,
    delay_ms: u64,
    fail: bool,
) -> Result<()> {
    let mut progress =
        Progress::new(options).with_theme(Theme::with_unicode(config.display.unicode));
    progress.start("Working")?;
    for step in 1..=progress.max() {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        if fail && step * 2 > progress.max() {
            progress.stop(Some("Failed"), 1)?;
            return Ok(());
        }
        progress.advance(1, Some(&format!("Step {}/{}", step, progress.max())))?;
    }
    progress.stop(Some("Done"), 0)?;
    Ok(())
}

async fn tour(config: &PromptConfig) -> Result<()> {
    let none = MessageOptions::default();
    announce::intro("promptline tour", &none)?;

    let name = interact(TextPrompt::new("What is your project called?").placeholder("my-app")).await?;
    let Some(name) = name.submitted() else {
        announce::cancel("Tour canceled", &none)?;
        return Ok(());
    };

    let language = interact(SelectPrompt::new(
        "Pick a language",
        vec![
            SelectOption::new("rust").with_label("Rust").with_hint("recommended"),
            SelectOption::new("go").with_label("Go"),
            SelectOption::new("zig").with_label("Zig"),
        ],
    ))
    .await?;
    let Some(language) = language.submitted() else {
        announce::cancel("Tour canceled", &none)?;
        return Ok(());
    };

    let extras = interact(
        MultiSelectPrompt::new(
            "Extras",
            vec![
                SelectOption::new("ci").with_label("CI workflow"),
                SelectOption::new("docs").with_label("Docs site"),
                SelectOption::new("bench").with_label("Benchmarks"),
            ],
        )
        .initial_values(["ci"]),
    )
    .await?;
    let Some(extras) = extras.submitted() else {
        announce::cancel("Tour canceled", &none)?;
        return Ok(());
    };

    let proceed = interact(ConfirmPrompt::new("Create the project?")).await?;
    if proceed.submitted() != Some(true) {
        announce::cancel("Nothing created", &none)?;
        return Ok(());
    }

    log::step(&format!("{} ({}) with {} extras", name, language, extras.len()))?;
    run_progress(config, config.progress.to_options(), 10, false).await?;
    log::success("Scaffolded")?;
    announce::outro("All done", &MessageOptions::with_hint(format!("cd {}", name)))?;
    Ok(())
}
