//! The table-of-contents component: outline plus the active state of one page view.
//!
//! `TocState` owns the extracted outline, the active heading, and the expansion set. It is fed
//! by three kinds of events: a rebuild after content settles or changes, a scroll sample, and a
//! click on an entry. Every entry point is synchronous and never fails; with no headings the
//! component simply stays in its placeholder state.

use crate::document::DocumentQuery;
use crate::expansion::ExpansionSet;
use crate::extract::{extract_headings, ExtractOptions};
use crate::heading::Heading;
use crate::hierarchy::Outline;
use crate::tracker::{resolve_active, ActiveThreshold, Viewport};

/// Text shown in place of the outline while no headings are known.
pub const PLACEHOLDER: &str = "Loading…";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// How the host should move to a scroll target.
pub enum ScrollBehavior {
    /// Animate towards the target.
    Smooth,
    /// Jump straight to the target.
    Instant,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Request for the host to scroll the document.
pub struct ScrollRequest {
    /// Document offset to bring to the top of the viewport.
    pub target: f64,
    /// Animation style.
    pub behavior: ScrollBehavior,
}

#[derive(Clone, Debug, Default)]
/// Settings the component needs from configuration.
pub struct TocOptions {
    /// Exclusion rules for extraction.
    pub extract: ExtractOptions,
    /// Where headings become active.
    pub threshold: ActiveThreshold,
    /// Amount kept clear above a heading when navigating to it.
    pub scroll_offset: f64,
}

/// Outline and active state for one page view.
pub struct TocState {
    options: TocOptions,
    outline: Outline,
    active_id: Option<String>,
    expanded: ExpansionSet,
    viewport: Viewport,
}

impl TocState {
    #[must_use]
    /// Creates an empty component.
    pub fn new(options: TocOptions) -> Self {
        Self {
            options,
            outline: Outline::default(),
            active_id: None,
            expanded: ExpansionSet::new(),
            viewport: Viewport::default(),
        }
    }

    #[must_use]
    /// The current outline.
    pub fn outline(&self) -> &Outline {
        &self.outline
    }

    #[must_use]
    /// The active heading id, once one has been resolved.
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    #[must_use]
    /// The expansion set.
    pub fn expanded(&self) -> &ExpansionSet {
        &self.expanded
    }

    #[must_use]
    /// The last viewport seen.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    /// True while there is nothing to show but the placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.outline.is_empty()
    }

    #[must_use]
    /// Headings to render, in document order.
    pub fn visible_entries(&self) -> Vec<&Heading> {
        if self.is_placeholder() {
            return Vec::new();
        }
        self.expanded.visible(&self.outline)
    }

    /// Re-extracts the outline from `doc` and re-resolves the active heading.
    pub fn rebuild<D: DocumentQuery>(&mut self, doc: &mut D) {
        let headings = extract_headings(doc, &self.options.extract);
        if headings.is_empty() {
            tracing::debug!("no headings yet, keeping placeholder");
            self.clear();
            return;
        }
        self.outline = Outline::new(headings);
        tracing::info!(headings = self.outline.len(), "outline rebuilt");

        // The old active heading may be gone; force a fresh expansion set.
        self.active_id = None;
        self.refresh_active(doc);
    }

    /// Records a scroll sample and updates the active heading.
    pub fn on_scroll<D: DocumentQuery>(&mut self, doc: &D, viewport: Viewport) {
        self.viewport = viewport;
        self.refresh_active(doc);
    }

    fn refresh_active<D: DocumentQuery>(&mut self, doc: &D) {
        if self.is_placeholder() {
            return;
        }
        let positions: Vec<(&str, f64)> = self
            .outline
            .headings()
            .iter()
            .filter_map(|h| doc.top_of(&h.id).map(|top| (h.id.as_str(), top)))
            .collect();
        let resolved = resolve_active(positions, self.viewport, self.options.threshold)
            .or_else(|| self.outline.headings().first().map(|h| h.id.clone()));
        self.set_active(resolved);
    }

    fn set_active(&mut self, id: Option<String>) {
        if id == self.active_id {
            return;
        }
        match &id {
            Some(active) => {
                tracing::trace!(%active, "active heading changed");
                self.expanded.recompute(&self.outline, active);
            }
            None => self.expanded.clear(),
        }
        self.active_id = id;
    }

    /// Activates the heading with `id` and asks the host to scroll to it.
    ///
    /// Returns `None` when the heading is unknown or its position cannot be resolved.
    pub fn navigate_to<D: DocumentQuery>(&mut self, doc: &D, id: &str) -> Option<ScrollRequest> {
        self.outline.get(id)?;
        let top = doc.top_of(id)?;
        self.set_active(Some(id.to_string()));
        Some(ScrollRequest {
            target: (top - self.options.scroll_offset).max(0.0),
            behavior: ScrollBehavior::Smooth,
        })
    }

    /// Manually expands or collapses the entry `id`.
    pub fn toggle(&mut self, id: &str) {
        self.expanded.toggle(&self.outline, id);
    }

    /// Drops the outline and active state.
    pub fn clear(&mut self) {
        self.outline = Outline::default();
        self.active_id = None;
        self.expanded.clear();
    }
}

#[cfg(test)]
#[path = "tests/toc.rs"]
mod tests;
