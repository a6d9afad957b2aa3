use promptline::test_utils::strip_ansi;
use promptline::{Progress, ProgressOptions, ProgressStyle, PromptConfig, Theme};

fn small_bar() -> Progress<Vec<u8>> {
    Progress::with_writer(
        Vec::new(),
        ProgressOptions {
            style: ProgressStyle::Block,
            max: 10,
            size: 10,
        },
    )
}

#[test]
fn test_three_advances_reach_max_then_complete() {
    let mut progress = small_bar();
    progress.start("Copying").unwrap();
    progress.advance(2, None).unwrap();
    progress.advance(5, None).unwrap();
    progress.advance(3, Some("Finishing")).unwrap();
    assert_eq!(progress.current(), progress.max());
    assert_eq!(progress.filled_cells(), 10);

    progress.stop(Some("Copied"), 0).unwrap();
    assert!(progress.is_stopped());
    assert_eq!(progress.current(), 10);

    let text = strip_ansi(&String::from_utf8(progress.into_writer()).unwrap());
    assert!(text.contains("◆  ██████████  Finishing"));
    assert!(text.contains("◇  ██████████  Copied"));
}

#[test]
fn test_overshooting_advance_is_clamped() {
    let mut progress = small_bar();
    progress.start("Copying").unwrap();
    assert_eq!(progress.filled_cells(), 0);

    progress.advance(3, None).unwrap();
    assert_eq!(progress.current(), 3);
    assert_eq!(progress.filled_cells(), 3);

    progress.advance(100, Some("Almost")).unwrap();
    assert_eq!(progress.current(), 10);
    assert_eq!(progress.filled_cells(), 10);

    progress.stop(Some("Copied"), 0).unwrap();
    assert!(progress.is_stopped());

    let text = strip_ansi(&String::from_utf8(progress.into_writer()).unwrap());
    assert!(text.contains("◆  ██████████  Almost"));
    assert!(text.contains("◇  ██████████  Copied"));
    assert!(text.ends_with("\r\n"));
}

#[test]
fn test_success_stop_fills_bar() {
    let mut progress = small_bar();
    progress.start("").unwrap();
    progress.advance(2, None).unwrap();
    progress.stop(None, 0).unwrap();
    assert_eq!(progress.current(), 10);
}

#[test]
fn test_other_exit_codes_mark_error() {
    let mut progress = small_bar();
    progress.start("").unwrap();
    progress.stop(Some("Timed out"), 2).unwrap();
    assert_eq!(progress.current(), 0);
    let text = strip_ansi(&String::from_utf8(progress.into_writer()).unwrap());
    assert!(text.contains("▲  "));
}

#[test]
fn test_ascii_theme_and_config_defaults() {
    let config = PromptConfig::default();
    let options = config.progress.to_options();
    assert_eq!(options.max, 100);
    assert_eq!(options.size, 40);
    assert_eq!(options.style, ProgressStyle::Heavy);

    let mut progress = Progress::with_writer(Vec::new(), ProgressOptions { size: 4, ..options })
        .with_theme(Theme::with_unicode(false));
    progress.start("").unwrap();
    progress.advance(50, None).unwrap();
    let text = strip_ansi(&String::from_utf8(progress.into_writer()).unwrap());
    assert!(text.contains("*  ===="));
}
