//! Prompt runtime configuration
//!
//! Defines input timing, glyph set, progress bar defaults and logging.

use crate::error::{PromptError, Result};
use crate::progress::{ProgressOptions, ProgressStyle};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Embedded copy of the documented default configuration
pub const DEFAULT_CONFIG: &str = include_str!("../../promptline.default.toml");

/// Configuration file name
pub const CONFIG_FILE_NAME: &str = "promptline.toml";

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "PROMPTLINE_CONFIG";

/// Top-level configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PromptConfig {
    /// Keyboard input handling
    #[serde(default)]
    pub input: InputConfig,
    /// Glyphs and styling
    #[serde(default)]
    pub display: DisplayConfig,
    /// Progress bar defaults
    #[serde(default)]
    pub progress: ProgressConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PromptConfig {
    /// Load configuration from the first config file found, or defaults
    ///
    /// Looks in the working directory, then `~/.promptline/`, then the
    /// path in `PROMPTLINE_CONFIG`. Nothing is written when no file exists.
    pub fn load() -> Result<Self> {
        if let Ok(content) = std::fs::read_to_string(CONFIG_FILE_NAME) {
            return Self::parse(&content, CONFIG_FILE_NAME);
        }

        if let Some(base_dirs) = BaseDirs::new() {
            let home_config = base_dirs
                .home_dir()
                .join(".promptline")
                .join(CONFIG_FILE_NAME);
            if let Ok(content) = std::fs::read_to_string(&home_config) {
                return Self::parse(&content, &home_config.display().to_string());
            }
        }

        if let Ok(config_path) = std::env::var(CONFIG_ENV_VAR) {
            if let Ok(content) = std::fs::read_to_string(&config_path) {
                return Self::parse(&content, &config_path);
            }
        }

        debug!("no configuration file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PromptError::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content, &path.display().to_string())
    }

    /// Load, apply environment overrides and validate
    pub fn resolve() -> Result<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn parse(content: &str, origin: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| PromptError::Config(format!("Failed to parse {}: {}", origin, e)))?;
        debug!(origin, "configuration loaded");
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        match self.logging.level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(PromptError::Config(format!(
                    "Invalid log level: {}",
                    self.logging.level
                )))
            }
        }

        if self.input.escape_timeout_ms == 0 {
            return Err(PromptError::Config(
                "input.escape_timeout_ms must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply environment variable overrides to the configuration
    pub fn apply_env_overrides(&mut self) {
        if let Some(ascii) = env_flag("PROMPTLINE_ASCII") {
            self.display.unicode = !ascii;
        }
        if let Ok(level) = std::env::var("PROMPTLINE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(vi) = env_flag("PROMPTLINE_VI") {
            self.input.vi_navigation = vi;
        }
    }
}

/// Parse a boolean-ish environment variable; unset or unrecognized is `None`
fn env_flag(name: &str) -> Option<bool> {
    let value = std::env::var(name).ok()?;
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        other => {
            debug!(name, value = other, "ignoring unrecognized flag value");
            None
        }
    }
}

/// Keyboard input configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    /// Milliseconds a lone ESC waits for a following byte
    #[serde(default = "default_escape_timeout_ms")]
    pub escape_timeout_ms: u64,
    /// Decode h/j/k/l as arrows in prompts that navigate
    #[serde(default = "default_true")]
    pub vi_navigation: bool,
}

impl InputConfig {
    pub fn escape_timeout(&self) -> Duration {
        Duration::from_millis(self.escape_timeout_ms)
    }
}

fn default_escape_timeout_ms() -> u64 {
    25
}

fn default_true() -> bool {
    true
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            escape_timeout_ms: default_escape_timeout_ms(),
            vi_navigation: true,
        }
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Use unicode glyphs; `false` selects the ASCII set
    #[serde(default = "default_true")]
    pub unicode: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self { unicode: true }
    }
}

/// Progress bar defaults
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressConfig {
    #[serde(default = "default_progress_max")]
    pub max: u64,
    #[serde(default = "default_progress_size")]
    pub size: usize,
    #[serde(default)]
    pub style: ProgressStyle,
}

fn default_progress_max() -> u64 {
    100
}

fn default_progress_size() -> usize {
    40
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            max: default_progress_max(),
            size: default_progress_size(),
            style: ProgressStyle::default(),
        }
    }
}

impl ProgressConfig {
    pub fn to_options(&self) -> ProgressOptions {
        ProgressOptions {
            style: self.style,
            max: self.max,
            size: self.size,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_default_matches_default() {
        let parsed: PromptConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, PromptConfig::default());
        assert!(parsed.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: PromptConfig = toml::from_str("[display]\nunicode = false\n").unwrap();
        assert!(!config.display.unicode);
        assert_eq!(config.input.escape_timeout(), Duration::from_millis(25));
        assert_eq!(config.progress.size, 40);
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = PromptConfig::default();
        config.logging.level = "loud".to_string();
        assert!(matches!(config.validate(), Err(PromptError::Config(_))));

        let mut config = PromptConfig::default();
        config.input.escape_timeout_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_progress_style_names() {
        let config: PromptConfig = toml::from_str("[progress]\nstyle = \"block\"\n").unwrap();
        assert_eq!(config.progress.style, ProgressStyle::Block);
        assert!(toml::from_str::<PromptConfig>("[progress]\nstyle = \"fancy\"\n").is_err());
    }
}
