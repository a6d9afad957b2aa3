//! Runtime configuration
//!
//! Settings are read from TOML and can be overridden from the environment.

pub mod prompt_config;

pub use prompt_config::{
    DisplayConfig, InputConfig, LoggingConfig, ProgressConfig, PromptConfig, CONFIG_ENV_VAR,
    CONFIG_FILE_NAME, DEFAULT_CONFIG,
};
