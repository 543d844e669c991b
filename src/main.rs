//! waymark: a scroll-tracking table of contents for long-form articles.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use serde::Serialize;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use waymark::app_state::{AppState, Focus};
use waymark::config::Config;
use waymark::error::{Error, Result};
use waymark::heading::Heading;
use waymark::logging::{self, LogTarget};
use waymark::toc::TocState;
use waymark::tracker::Viewport;
use waymark::watch::ContentWatcher;
use waymark::{formats, ui};

/// Longest the event loop waits for input when nothing is scheduled.
const IDLE_POLL: Duration = Duration::from_millis(250);
/// Poll interval while a smooth scroll is animating.
const ANIMATION_FRAME: Duration = Duration::from_millis(16);
/// Rows moved per mouse wheel notch.
const WHEEL_ROWS: isize = 3;

#[derive(Parser)]
#[command(name = "waymark")]
#[command(about = "Scroll-tracking table of contents for long-form articles", long_about = None)]
struct Args {
    /// Markdown, HTML, or article JSON file to read
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Configuration file (defaults to ./waymark.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the outline as JSON instead of opening the reader
    #[arg(long)]
    print: bool,

    /// Scroll position used with --print
    #[arg(long, default_value_t = 0.0)]
    scroll: f64,

    /// Viewport height used with --print
    #[arg(long, default_value_t = 40.0)]
    height: f64,

    /// Do not reload when the file changes
    #[arg(long)]
    no_watch: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    headings: &'a [Heading],
    active_id: Option<&'a str>,
    expanded: Vec<&'a str>,
    visible: Vec<&'a str>,
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();
    let cfg = Config::load(args.config.as_deref())?;

    let ext = args
        .path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();
    if !cfg.file_extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext)) {
        return Err(Error::UnsupportedFormat(args.path.display().to_string()));
    }

    if args.print {
        logging::init(LogTarget::Stderr)?;
        return print_outline(&args, &cfg);
    }

    let target = if cfg.log_file.is_empty() {
        LogTarget::Disabled
    } else {
        LogTarget::File(&cfg.log_file)
    };
    logging::init(target)?;

    let watcher = if args.no_watch {
        None
    } else {
        Some(ContentWatcher::new(&args.path)?)
    };
    let state = AppState::load(args.path, &cfg, Instant::now())?;
    run_tui(state, &cfg, watcher.as_ref())
}

fn print_outline(args: &Args, cfg: &Config) -> Result<()> {
    let mut tree = formats::load_document(&args.path)?;
    tree.layout(cfg.wrap_width);

    let mut toc = TocState::new(cfg.toc_options());
    toc.rebuild(&mut tree);
    toc.on_scroll(&tree, Viewport::new(args.scroll, args.height));

    let mut expanded: Vec<&str> = toc.expanded().iter().collect();
    expanded.sort_by_key(|id| toc.outline().position(id));
    let report = Report {
        headings: toc.outline().headings(),
        active_id: toc.active_id(),
        expanded,
        visible: toc
            .visible_entries()
            .into_iter()
            .map(|h| h.id.as_str())
            .collect(),
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{json}");
    Ok(())
}

fn run_tui(mut app: AppState, cfg: &Config, watcher: Option<&ContentWatcher>) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, cfg, watcher);
    app.teardown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn poll_timeout(app: &AppState) -> Duration {
    if app.is_animating() {
        return ANIMATION_FRAME;
    }
    app.schedule
        .next_deadline()
        .map_or(IDLE_POLL, |deadline| {
            deadline.saturating_duration_since(Instant::now()).min(IDLE_POLL)
        })
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    cfg: &Config,
    watcher: Option<&ContentWatcher>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app, cfg))?;

        if event::poll(poll_timeout(app))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(app, key) {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }

        if let Some(watcher) = watcher {
            if watcher.drain() > 0 {
                app.content_changed(Instant::now());
            }
        }
        app.tick(Instant::now());
    }
}

/// Applies a key press; returns true when the reader should quit.
fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    app.message = None;
    let page = isize::try_from(app.viewport_height.max(1)).unwrap_or(isize::MAX);

    match (app.focus, key.code) {
        (_, KeyCode::Char('q') | KeyCode::Esc) => return true,
        (_, KeyCode::Tab) => {
            app.focus = match app.focus {
                Focus::Document => Focus::Outline,
                Focus::Outline => {
                    app.follow_active();
                    Focus::Document
                }
            };
        }
        (_, KeyCode::PageDown | KeyCode::Char(' ')) if app.focus == Focus::Document => {
            app.scroll_by(page);
        }
        (_, KeyCode::PageUp) => app.scroll_by(-page),
        (Focus::Document, KeyCode::Down | KeyCode::Char('j')) => app.scroll_by(1),
        (Focus::Document, KeyCode::Up | KeyCode::Char('k')) => app.scroll_by(-1),
        (Focus::Document, KeyCode::Home) => app.scroll_by(isize::MIN),
        (Focus::Document, KeyCode::End) => app.scroll_by(isize::MAX),
        (Focus::Outline, KeyCode::Down | KeyCode::Char('j')) => {
            if let Some(next) = app.find_next_entry() {
                app.current_entry_index = next;
            }
        }
        (Focus::Outline, KeyCode::Up | KeyCode::Char('k')) => {
            if let Some(prev) = app.find_prev_entry() {
                app.current_entry_index = prev;
            }
        }
        (Focus::Outline, KeyCode::Left | KeyCode::Char('h')) => {
            if let Some(parent) = app.navigate_to_parent() {
                app.current_entry_index = parent;
            }
        }
        (Focus::Outline, KeyCode::Right | KeyCode::Char('l')) => {
            if let Some(child) = app.navigate_to_first_child() {
                app.current_entry_index = child;
            }
        }
        (Focus::Outline, KeyCode::Home) => {
            if let Some(first) = app.navigate_to_first() {
                app.current_entry_index = first;
            }
        }
        (Focus::Outline, KeyCode::End) => {
            if let Some(last) = app.navigate_to_last() {
                app.current_entry_index = last;
            }
        }
        (Focus::Outline, KeyCode::Enter) => app.navigate_to_entry(app.current_entry_index),
        (Focus::Outline, KeyCode::Char(' ')) => app.toggle_current(),
        (_, KeyCode::Char('r')) => {
            if let Err(e) = app.reload() {
                app.message = Some(format!("Reload failed: {e}"));
            }
        }
        _ => {}
    }
    false
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollDown => app.scroll_by(WHEEL_ROWS),
        MouseEventKind::ScrollUp => app.scroll_by(-WHEEL_ROWS),
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(index) = app.entry_at(mouse.column, mouse.row) {
                app.navigate_to_entry(index);
            }
        }
        MouseEventKind::Down(MouseButton::Right) => {
            if let Some(index) = app.entry_at(mouse.column, mouse.row) {
                app.current_entry_index = index;
                app.toggle_current();
            }
        }
        _ => {}
    }
}
