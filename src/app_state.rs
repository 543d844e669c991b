//! The core state machine bridging the laid-out document and its table of contents.
//!
//! A TUI needs a single source of truth that can be interrogated and mutated as the reader
//! scrolls and navigates. `AppState` owns the content tree, the outline component, and the
//! rebuild schedule, and turns terminal events (scrolls, clicks, resizes, ticks) into calls on
//! them. Scrolling is tracked in rows; every change of the scroll position is reported to the
//! outline as a fresh sample.

use crate::config::Config;
use crate::document::ContentTree;
use crate::error::Result;
use crate::formats;
use crate::schedule::{RebuildReason, RebuildSchedule};
use crate::toc::{ScrollBehavior, ScrollRequest, TocState};
use crate::tracker::Viewport;
use ratatui::widgets::ListState;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Which pane receives keyboard input.
pub enum Focus {
    /// Arrow keys scroll the document; the outline cursor follows the active heading.
    Document,
    /// Arrow keys move the outline cursor; Enter jumps to the entry.
    Outline,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
/// Screen rectangle of the outline list, recorded at draw time for mouse hit-testing.
pub struct OutlineArea {
    /// Left column.
    pub x: u16,
    /// First row inside the border.
    pub y: u16,
    /// Width inside the border.
    pub width: u16,
    /// Height inside the border.
    pub height: u16,
}

impl OutlineArea {
    #[must_use]
    /// Row within the list for a screen position, if it falls inside.
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let inside = column >= self.x
            && column < self.x.saturating_add(self.width)
            && row >= self.y
            && row < self.y.saturating_add(self.height);
        inside.then(|| usize::from(row - self.y))
    }
}

/// Bridges the document, the outline, and the terminal, maintaining session state.
pub struct AppState {
    /// Document being read.
    pub path: PathBuf,
    /// Parsed and laid-out content.
    pub tree: ContentTree,
    /// Outline and active state.
    pub toc: TocState,
    /// Settle and debounce timers for outline rebuilds.
    pub schedule: RebuildSchedule,
    /// Pane receiving keyboard input.
    pub focus: Focus,
    /// First visible document row.
    pub scroll_top: usize,
    /// Visible document rows.
    pub viewport_height: usize,
    /// Width the document is laid out at.
    pub layout_width: usize,
    /// Upper bound on the layout width.
    pub wrap_width: usize,
    /// Selected entry in the visible outline.
    pub current_entry_index: usize,
    /// Target row of an in-flight smooth scroll.
    pub scroll_target: Option<usize>,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Scroll state of the rendered outline list.
    pub list_state: ListState,
    /// Where the outline list was last drawn.
    pub outline_area: Option<OutlineArea>,
}

impl AppState {
    #[must_use]
    /// Initialises state around an already parsed document and arms the settle timer.
    pub fn new(path: PathBuf, mut tree: ContentTree, cfg: &Config, now: Instant) -> Self {
        tree.layout(cfg.wrap_width);
        let mut schedule = RebuildSchedule::new(cfg.settle_delay(), cfg.debounce());
        schedule.mount(now);

        Self {
            path,
            tree,
            toc: TocState::new(cfg.toc_options()),
            schedule,
            focus: Focus::Document,
            scroll_top: 0,
            viewport_height: 0,
            layout_width: cfg.wrap_width,
            wrap_width: cfg.wrap_width,
            current_entry_index: 0,
            scroll_target: None,
            message: None,
            list_state: ListState::default(),
            outline_area: None,
        }
    }

    /// Loads the document at `path` and initialises state around it.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed.
    pub fn load(path: PathBuf, cfg: &Config, now: Instant) -> Result<Self> {
        let tree = formats::load_document(&path)?;
        Ok(Self::new(path, tree, cfg, now))
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    /// The visible window in document rows.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.scroll_top as f64, self.viewport_height as f64)
    }

    #[must_use]
    /// Largest scroll position that still fills the viewport.
    pub fn max_scroll(&self) -> usize {
        self.tree.lines().len().saturating_sub(self.viewport_height)
    }

    /// Records that the document changed on disk.
    pub fn content_changed(&mut self, now: Instant) {
        self.schedule.mutation(now);
    }

    /// Runs whatever is due: a scheduled rebuild, then one step of a smooth scroll.
    pub fn tick(&mut self, now: Instant) {
        match self.schedule.take_due(now) {
            Some(RebuildReason::Settled) => self.rebuild_outline(),
            Some(RebuildReason::Mutated) => {
                if let Err(e) = self.reload() {
                    tracing::warn!(error = %e, "reload failed");
                    self.message = Some(format!("Reload failed: {e}"));
                }
            }
            None => {}
        }
        self.step_scroll();
    }

    /// Re-reads the document from disk, keeping the scroll position where possible.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be read or parsed; the old content is kept.
    pub fn reload(&mut self) -> Result<()> {
        let mut tree = formats::load_document(&self.path)?;
        tree.layout(self.layout_width);
        self.tree = tree;
        self.scroll_top = self.scroll_top.min(self.max_scroll());
        self.scroll_target = None;
        self.rebuild_outline();
        self.message = Some("Reloaded".to_string());
        Ok(())
    }

    /// Re-extracts the outline from the current tree.
    pub fn rebuild_outline(&mut self) {
        self.toc.rebuild(&mut self.tree);
        self.toc.on_scroll(&self.tree, self.viewport());
        self.follow_active();
    }

    /// Adapts to a new document pane size, re-laying out the text when the width changed.
    pub fn resize(&mut self, width: usize, height: usize) {
        let layout_width = width.min(self.wrap_width).max(1);
        if layout_width != self.layout_width {
            self.layout_width = layout_width;
            self.tree.layout(layout_width);
        }
        self.viewport_height = height;
        self.scroll_to(self.scroll_top);
    }

    /// Moves the document to `row`, clamped, and reports the new position to the outline.
    pub fn scroll_to(&mut self, row: usize) {
        self.scroll_top = row.min(self.max_scroll());
        self.toc.on_scroll(&self.tree, self.viewport());
        if self.focus == Focus::Document {
            self.follow_active();
        }
    }

    /// Scrolls by `delta` rows, cancelling any smooth scroll in flight.
    pub fn scroll_by(&mut self, delta: isize) {
        self.scroll_target = None;
        self.scroll_to(self.scroll_top.saturating_add_signed(delta));
    }

    /// Applies a scroll request from the outline.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn apply_scroll(&mut self, request: ScrollRequest) {
        let target = request.target.max(0.0).round() as usize;
        match request.behavior {
            ScrollBehavior::Smooth => self.scroll_target = Some(target.min(self.max_scroll())),
            ScrollBehavior::Instant => {
                self.scroll_target = None;
                self.scroll_to(target);
            }
        }
    }

    /// Advances a smooth scroll by a quarter of the remaining distance.
    pub fn step_scroll(&mut self) {
        let Some(target) = self.scroll_target else {
            return;
        };
        let distance = target.abs_diff(self.scroll_top);
        if distance == 0 {
            self.scroll_target = None;
            return;
        }
        let step = distance.div_ceil(4);
        let next = if target > self.scroll_top {
            self.scroll_top + step
        } else {
            self.scroll_top - step
        };
        if next == target {
            self.scroll_target = None;
        }
        self.scroll_to(next);
    }

    #[must_use]
    /// True while a smooth scroll is in flight.
    pub fn is_animating(&self) -> bool {
        self.scroll_target.is_some()
    }

    #[must_use]
    /// Id of the outline entry under the cursor.
    pub fn current_entry_id(&self) -> Option<String> {
        self.toc
            .visible_entries()
            .get(self.current_entry_index)
            .map(|h| h.id.clone())
    }

    /// Jumps to the visible entry at `index`.
    pub fn navigate_to_entry(&mut self, index: usize) {
        let Some(id) = self.toc.visible_entries().get(index).map(|h| h.id.clone()) else {
            return;
        };
        self.current_entry_index = index;
        match self.toc.navigate_to(&self.tree, &id) {
            Some(request) => self.apply_scroll(request),
            None => self.message = Some(format!("Cannot locate {id}")),
        }
        self.select_entry(&id);
    }

    /// Expands or collapses the entry under the cursor.
    pub fn toggle_current(&mut self) {
        if let Some(id) = self.current_entry_id() {
            self.toc.toggle(&id);
            self.select_entry(&id);
        }
    }

    /// Points the cursor at the active heading, if it is visible.
    pub fn follow_active(&mut self) {
        if let Some(active) = self.toc.active_id().map(str::to_string) {
            self.select_entry(&active);
        }
        self.clamp_cursor();
    }

    fn select_entry(&mut self, id: &str) {
        if let Some(index) = self.toc.visible_entries().iter().position(|h| h.id == id) {
            self.current_entry_index = index;
        }
        self.clamp_cursor();
    }

    fn clamp_cursor(&mut self) {
        let len = self.toc.visible_entries().len();
        self.current_entry_index = self.current_entry_index.min(len.saturating_sub(1));
    }

    #[must_use]
    /// Returns the following entry index for sequential navigation.
    pub fn find_next_entry(&self) -> Option<usize> {
        let next = self.current_entry_index + 1;
        (next < self.toc.visible_entries().len()).then_some(next)
    }

    #[must_use]
    /// Returns the preceding entry index for reverse navigation.
    pub fn find_prev_entry(&self) -> Option<usize> {
        self.current_entry_index.checked_sub(1)
    }

    #[must_use]
    /// Moves to the containing heading in the outline.
    pub fn navigate_to_parent(&self) -> Option<usize> {
        let entries = self.toc.visible_entries();
        let parent = entries.get(self.current_entry_index)?.parent_id.as_deref()?;
        entries.iter().position(|h| h.id == parent)
    }

    #[must_use]
    /// Descends to the first child of the current entry, if it is visible.
    pub fn navigate_to_first_child(&self) -> Option<usize> {
        let entries = self.toc.visible_entries();
        let child = entries.get(self.current_entry_index)?.child_ids.first()?;
        entries.iter().position(|h| &h.id == child)
    }

    #[must_use]
    /// Jumps to the first entry.
    pub fn navigate_to_first(&self) -> Option<usize> {
        (!self.toc.visible_entries().is_empty()).then_some(0)
    }

    #[must_use]
    /// Jumps to the last entry.
    pub fn navigate_to_last(&self) -> Option<usize> {
        self.toc.visible_entries().len().checked_sub(1)
    }

    #[must_use]
    /// Outline entry under a screen position, accounting for list scrolling.
    pub fn entry_at(&self, column: u16, row: u16) -> Option<usize> {
        let row = self.outline_area?.row_at(column, row)?;
        let index = self.list_state.offset() + row;
        (index < self.toc.visible_entries().len()).then_some(index)
    }

    /// Disarms timers and drops the outline; called when the reader closes.
    pub fn teardown(&mut self) {
        self.schedule.cancel();
        self.toc.clear();
        self.scroll_target = None;
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
