use super::{AppState, Focus, OutlineArea};
use crate::config::Config;
use crate::document::DocumentQuery;
use crate::formats::load_document;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn section(title: &str, level: usize, paragraphs: usize) -> String {
    let mut out = format!("{} {title}\n\n", "#".repeat(level));
    for i in 0..paragraphs {
        writeln!(out, "Paragraph {i} of {title}.\n").unwrap();
    }
    out
}

fn three_sections() -> String {
    [section("One", 1, 10), section("Two", 2, 10), section("Three", 2, 10)].concat()
}

/// Writes `source` to a markdown file and opens it with a 20-row viewport, outline built.
fn open(dir: &TempDir, source: &str) -> (AppState, Instant) {
    let path: PathBuf = dir.path().join("post.md");
    fs::write(&path, source).unwrap();
    let cfg = Config::from_toml("").unwrap();
    let start = Instant::now();
    let tree = load_document(&path).unwrap();
    let mut app = AppState::new(path, tree, &cfg, start);
    app.resize(80, 20);
    let settled = start + cfg.settle_delay();
    app.tick(settled);
    (app, settled)
}

fn top(app: &AppState, id: &str) -> usize {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let row = app.tree.top_of(id).unwrap() as usize;
    row
}

#[test]
fn test_outline_waits_for_settle() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("post.md");
    fs::write(&path, three_sections()).unwrap();
    let cfg = Config::from_toml("").unwrap();
    let start = Instant::now();

    let mut app = AppState::load(path, &cfg, start).unwrap();
    app.resize(80, 20);
    assert!(app.toc.is_placeholder());

    app.tick(start + Duration::from_millis(499));
    assert!(app.toc.is_placeholder());

    app.tick(start + cfg.settle_delay());
    assert_eq!(app.toc.outline().len(), 3);
    assert_eq!(app.toc.active_id(), Some("heading-0"));
    assert_eq!(app.current_entry_index, 0);
    assert!(!app.schedule.is_armed());
}

#[test]
fn test_scrolling_moves_active_and_cursor() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = open(&dir, &three_sections());

    let two = top(&app, "heading-1");
    app.scroll_to(two);
    assert_eq!(app.toc.active_id(), Some("heading-1"));
    assert_eq!(app.current_entry_id().as_deref(), Some("heading-1"));

    app.scroll_to(0);
    assert_eq!(app.toc.active_id(), Some("heading-0"));
    assert_eq!(app.current_entry_index, 0);
}

#[test]
fn test_scroll_is_clamped() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = open(&dir, &three_sections());

    app.scroll_by(isize::MAX);
    assert_eq!(app.scroll_top, app.max_scroll());
    assert_eq!(app.toc.active_id(), Some("heading-2"));

    app.scroll_by(isize::MIN);
    assert_eq!(app.scroll_top, 0);
}

#[test]
fn test_navigate_to_entry_scrolls_smoothly() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = open(&dir, &three_sections());

    app.navigate_to_entry(2);
    assert_eq!(app.toc.active_id(), Some("heading-2"));
    assert!(app.is_animating());

    let target = (top(&app, "heading-2") - 2).min(app.max_scroll());
    let mut frames = 0;
    while app.is_animating() && frames < 100 {
        app.step_scroll();
        frames += 1;
    }
    assert!(frames > 1, "expected several animation frames");
    assert_eq!(app.scroll_top, target);
    assert_eq!(app.toc.active_id(), Some("heading-2"));
}

#[test]
fn test_manual_scroll_cancels_animation() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = open(&dir, &three_sections());

    app.navigate_to_entry(2);
    app.step_scroll();
    app.scroll_by(-1);
    assert!(!app.is_animating());
}

#[test]
fn test_toggle_current_collapses_subtree() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = open(&dir, &three_sections());
    app.focus = Focus::Outline;
    assert_eq!(app.toc.visible_entries().len(), 3);

    app.toggle_current();
    assert_eq!(app.toc.visible_entries().len(), 1);
    assert_eq!(app.current_entry_index, 0);

    app.toggle_current();
    assert_eq!(app.toc.visible_entries().len(), 3);
}

#[test]
fn test_outline_navigation_helpers() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = open(&dir, &three_sections());

    assert_eq!(app.navigate_to_first_child(), Some(1));
    assert_eq!(app.find_prev_entry(), None);
    assert_eq!(app.navigate_to_last(), Some(2));

    app.current_entry_index = 2;
    assert_eq!(app.navigate_to_parent(), Some(0));
    assert_eq!(app.find_next_entry(), None);
    assert_eq!(app.find_prev_entry(), Some(1));
    assert_eq!(app.navigate_to_first(), Some(0));
}

#[test]
fn test_content_change_rebuilds_after_debounce() {
    let dir = TempDir::new().unwrap();
    let (mut app, settled) = open(&dir, &three_sections());

    let extended = three_sections() + &section("Four", 3, 2);
    fs::write(&app.path, extended).unwrap();
    app.content_changed(settled);
    app.tick(settled + Duration::from_millis(100));
    assert_eq!(app.toc.outline().len(), 3);

    app.tick(settled + Duration::from_millis(300));
    assert_eq!(app.toc.outline().len(), 4);
    assert_eq!(app.message.as_deref(), Some("Reloaded"));
}

#[test]
fn test_failed_reload_keeps_outline() {
    let dir = TempDir::new().unwrap();
    let (mut app, settled) = open(&dir, &three_sections());

    fs::remove_file(&app.path).unwrap();
    app.content_changed(settled);
    app.tick(settled + Duration::from_secs(1));

    assert_eq!(app.toc.outline().len(), 3);
    assert!(app
        .message
        .as_deref()
        .is_some_and(|m| m.starts_with("Reload failed")));
}

#[test]
fn test_entry_at_maps_screen_rows() {
    let dir = TempDir::new().unwrap();
    let (mut app, _) = open(&dir, &three_sections());
    app.outline_area = Some(OutlineArea {
        x: 1,
        y: 1,
        width: 30,
        height: 10,
    });

    assert_eq!(app.entry_at(5, 1), Some(0));
    assert_eq!(app.entry_at(5, 3), Some(2));
    assert_eq!(app.entry_at(5, 4), None);
    assert_eq!(app.entry_at(0, 1), None);
    assert_eq!(app.entry_at(40, 1), None);
}

#[test]
fn test_teardown_disarms_and_clears() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("post.md");
    fs::write(&path, three_sections()).unwrap();
    let cfg = Config::from_toml("").unwrap();

    let mut app = AppState::load(path, &cfg, Instant::now()).unwrap();
    assert!(app.schedule.is_armed());
    app.teardown();
    assert!(!app.schedule.is_armed());
    assert!(app.toc.is_placeholder());
}
