//! The UI renders the application state into an outline pane and a document pane.
//!
//! The outline shows the visible entries indented by level, with the active heading
//! highlighted and a marker showing whether each entry is expanded. The document pane shows the
//! laid-out rows from the current scroll position. Pane sizes are fed back into the state so
//! scroll samples and mouse hits use what is actually on screen.

use crate::app_state::{AppState, Focus, OutlineArea};
use crate::config::Config;
use crate::heading::Heading;
use crate::toc::PLACEHOLDER;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Renders both panes and the help bar.
pub fn draw(f: &mut Frame, app: &mut AppState, cfg: &Config) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(cfg.toc_width), Constraint::Min(0)])
        .split(rows[0]);

    draw_document(f, app, panes[1]);
    draw_outline(f, app, panes[0]);
    draw_help(f, app, rows[1]);
}

fn pane_block(title: String, focused: bool) -> Block<'static> {
    let style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title)
}

/// Marker shown before an entry: expanded, collapsed, or a leaf.
fn entry_marker(heading: &Heading, expanded: bool) -> &'static str {
    match (heading.child_ids.is_empty(), expanded) {
        (true, _) => "  ",
        (false, true) => "▾ ",
        (false, false) => "▸ ",
    }
}

fn draw_outline(f: &mut Frame, app: &mut AppState, area: Rect) {
    let block = pane_block("Contents".to_string(), app.focus == Focus::Outline);
    let inner = block.inner(area);
    app.outline_area = Some(OutlineArea {
        x: inner.x,
        y: inner.y,
        width: inner.width,
        height: inner.height,
    });

    if app.toc.is_placeholder() {
        let placeholder = Paragraph::new(PLACEHOLDER)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(placeholder, area);
        return;
    }

    let min_level = app
        .toc
        .outline()
        .headings()
        .iter()
        .map(|h| h.level)
        .min()
        .unwrap_or(1);
    let active = app.toc.active_id();
    let expanded = app.toc.expanded();

    let items: Vec<ListItem> = app
        .toc
        .visible_entries()
        .into_iter()
        .map(|heading| {
            let indent = "  ".repeat(usize::from(heading.level - min_level));
            let marker = entry_marker(heading, expanded.contains(&heading.id));
            let style = if Some(heading.id.as_str()) == active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::raw(indent),
                Span::styled(marker, Style::default().fg(Color::DarkGray)),
                Span::styled(heading.text.clone(), style),
            ]))
        })
        .collect();

    let highlight = if app.focus == Focus::Outline {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    let list = List::new(items).block(block).highlight_style(highlight);

    app.list_state.select(Some(app.current_entry_index));
    f.render_stateful_widget(list, area, &mut app.list_state);
}

fn heading_style(level: u8) -> Style {
    let color = match level {
        1 => Color::Magenta,
        2 => Color::Blue,
        3 => Color::Green,
        _ => Color::Cyan,
    };
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn draw_document(f: &mut Frame, app: &mut AppState, area: Rect) {
    let title = app
        .path
        .file_name()
        .map_or_else(|| "Document".to_string(), |n| n.to_string_lossy().to_string());
    let block = pane_block(title, app.focus == Focus::Document);
    let inner = block.inner(area);

    app.resize(usize::from(inner.width), usize::from(inner.height));

    let lines: Vec<Line> = app
        .tree
        .lines()
        .iter()
        .skip(app.scroll_top)
        .take(usize::from(inner.height))
        .map(|row| match row.heading_level {
            Some(level) => Line::from(Span::styled(row.text.clone(), heading_style(level))),
            None => Line::from(row.text.clone()),
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect) {
    let help = if let Some(ref msg) = app.message {
        msg.clone()
    } else {
        match app.focus {
            Focus::Document => {
                "↑/↓/PgUp/PgDn: Scroll | Tab: Outline | Click entry: Jump | q: Quit".to_string()
            }
            Focus::Outline => {
                "↑/↓: Select | ←/→: Parent/Child | Enter: Jump | Space: Expand/Collapse | Tab: Document | q: Quit"
                    .to_string()
            }
        }
    };
    let position = format!(
        " {}/{} ",
        app.scroll_top + 1,
        app.tree.lines().len().max(1)
    );
    let widget = Paragraph::new(help).block(
        Block::default()
            .borders(Borders::ALL)
            .title(position),
    );
    f.render_widget(widget, area);
}
