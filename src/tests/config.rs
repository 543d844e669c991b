use super::Config;
use crate::error::Error;
use crate::formats::article::ArticleFormat;
use crate::formats::html::HtmlFormat;
use crate::formats::markdown::MarkdownFormat;
use crate::formats::Format;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_defaults_from_empty_file() {
    let cfg = Config::from_toml("").unwrap();
    assert_eq!(cfg.wrap_width, 100);
    assert_eq!(cfg.toc_width, 32);
    assert_eq!(
        cfg.file_extensions,
        vec!["md", "markdown", "html", "htm", "json"]
    );
    assert!((cfg.scroll_offset - 2.0).abs() < f64::EPSILON);
    assert!((cfg.active_threshold - 0.333).abs() < f64::EPSILON);
    assert_eq!(cfg.denylist, vec!["留言板"]);
    assert_eq!(cfg.excluded_markers, vec!["comments"]);
    assert_eq!(cfg.settle_delay_ms, 500);
    assert_eq!(cfg.debounce_ms, 300);
    assert!(cfg.log_file.is_empty());
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_default_extensions_cover_every_format() {
    let cfg = Config::from_toml("").unwrap();
    let formats: [&dyn Format; 3] = [&MarkdownFormat, &HtmlFormat, &ArticleFormat];
    for format in formats {
        for ext in format.extensions() {
            assert!(
                cfg.file_extensions.iter().any(|e| e == ext),
                "{ext} ({}) is rejected by default",
                format.name()
            );
        }
    }
}

#[test]
fn test_overrides_keep_other_defaults() {
    let cfg = Config::from_toml("wrap_width = 72\ndenylist = [\"Guestbook\", \"留言板\"]\n").unwrap();
    assert_eq!(cfg.wrap_width, 72);
    assert_eq!(cfg.denylist, vec!["Guestbook", "留言板"]);
    assert_eq!(cfg.debounce_ms, 300);
}

#[test]
fn test_toc_options_carry_values() {
    let cfg = Config::from_toml("scroll_offset = 4.0\nactive_threshold = 0.5\n").unwrap();
    let options = cfg.toc_options();
    assert!((options.scroll_offset - 4.0).abs() < f64::EPSILON);
    assert!((options.threshold.ratio - 0.5).abs() < f64::EPSILON);
    assert_eq!(options.extract.excluded_markers, vec!["comments"]);
    assert_eq!(cfg.settle_delay().as_millis(), 500);
    assert_eq!(cfg.debounce().as_millis(), 300);
}

#[test]
fn test_validation_rejects_bad_values() {
    for text in [
        "active_threshold = 0.0",
        "active_threshold = 1.5",
        "wrap_width = 0",
        "scroll_offset = -1.0",
    ] {
        let cfg = Config::from_toml(text).unwrap();
        assert!(matches!(cfg.validate(), Err(Error::Config(_))), "{text}");
    }
}

#[test]
fn test_malformed_toml() {
    assert!(matches!(
        Config::from_toml("wrap_width = \"wide\""),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_load_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("waymark.toml");
    fs::write(&path, "toc_width = 40\n").unwrap();
    assert_eq!(Config::load(Some(path.as_path())).unwrap().toc_width, 40);

    assert!(matches!(
        Config::load(Some(dir.path().join("absent.toml").as_path())),
        Err(Error::Io(_))
    ));

    fs::write(&path, "debounce_ms = 10\nactive_threshold = 2.0\n").unwrap();
    assert!(matches!(Config::load(Some(path.as_path())), Err(Error::Config(_))));
}
