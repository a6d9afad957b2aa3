use promptline::config::PromptConfig;
use promptline::test_utils::env_lock;
use promptline::PromptError;
use std::env;
use std::fs;
use tempfile::TempDir;

fn write_config(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("promptline.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"
[input]
escape_timeout_ms = 40
vi_navigation = false

[display]
unicode = false

[progress]
max = 10
size = 20
style = "light"

[logging]
level = "debug"
"#,
    );
    let config = PromptConfig::load_from_file(&path).unwrap();
    assert_eq!(config.input.escape_timeout_ms, 40);
    assert!(!config.input.vi_navigation);
    assert!(!config.display.unicode);
    assert_eq!(config.progress.max, 10);
    assert_eq!(config.logging.level, "debug");
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let err = PromptConfig::load_from_file(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, PromptError::Config(_)));
}

#[test]
fn test_malformed_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[input\nescape_timeout_ms = ");
    let err = PromptConfig::load_from_file(&path).unwrap_err();
    assert!(err.to_string().contains("Failed to parse"));
}

#[test]
fn test_invalid_values_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "[input]\nescape_timeout_ms = 0\n");
    let config = PromptConfig::load_from_file(&path).unwrap();
    assert!(config.validate().is_err());
}

#[test]
fn test_env_overrides() {
    let _guard = env_lock().lock().unwrap();
    env::set_var("PROMPTLINE_ASCII", "1");
    env::set_var("PROMPTLINE_LOG_LEVEL", "trace");
    env::set_var("PROMPTLINE_VI", "off");

    let mut config = PromptConfig::default();
    config.apply_env_overrides();

    env::remove_var("PROMPTLINE_ASCII");
    env::remove_var("PROMPTLINE_LOG_LEVEL");
    env::remove_var("PROMPTLINE_VI");

    assert!(!config.display.unicode);
    assert_eq!(config.logging.level, "trace");
    assert!(!config.input.vi_navigation);
    assert!(config.validate().is_ok());
}

#[test]
fn test_unrecognized_flag_leaves_value() {
    let _guard = env_lock().lock().unwrap();
    env::set_var("PROMPTLINE_ASCII", "maybe");
    let mut config = PromptConfig::default();
    config.apply_env_overrides();
    env::remove_var("PROMPTLINE_ASCII");
    assert!(config.display.unicode);
}

#[test]
fn test_config_feeds_engine() {
    use promptline::test_utils::ScriptedBackend;
    use promptline::PromptEngine;

    let mut config = PromptConfig::default();
    config.display.unicode = false;
    let engine = PromptEngine::new(ScriptedBackend::new(["\r"])).with_config(&config);
    assert_eq!(engine.theme().symbols.bar, "|");
}
