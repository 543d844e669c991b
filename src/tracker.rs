//! Active-heading resolution from the current scroll position.
//!
//! A heading counts as reached once its top edge, relative to the viewport, sits at or above a
//! fraction of the viewport height. The last reached heading in document order is active; when
//! nothing is reached yet the first heading is.

/// Default fraction of the viewport height a heading must scroll past.
pub const DEFAULT_THRESHOLD_RATIO: f64 = 1.0 / 3.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
/// Visible window onto the laid-out document.
pub struct Viewport {
    /// Document offset of the first visible row.
    pub scroll_top: f64,
    /// Visible height.
    pub height: f64,
}

impl Viewport {
    #[must_use]
    /// Creates a viewport at `scroll_top` spanning `height`.
    pub fn new(scroll_top: f64, height: f64) -> Self {
        Self { scroll_top, height }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Where in the viewport a heading becomes active.
pub struct ActiveThreshold {
    /// Fraction of the viewport height, measured from the top.
    pub ratio: f64,
}

impl Default for ActiveThreshold {
    fn default() -> Self {
        Self {
            ratio: DEFAULT_THRESHOLD_RATIO,
        }
    }
}

impl ActiveThreshold {
    #[must_use]
    /// True when a heading at document offset `top` has been reached in `viewport`.
    pub fn is_reached(&self, top: f64, viewport: Viewport) -> bool {
        top - viewport.scroll_top <= viewport.height * self.ratio
    }
}

/// Resolves the active heading id.
///
/// `positions` yields `(id, top)` pairs in document order; headings whose position could not be
/// resolved should be left out by the caller. Returns `None` only when there are no headings.
pub fn resolve_active<'a, I>(
    positions: I,
    viewport: Viewport,
    threshold: ActiveThreshold,
) -> Option<String>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    let mut first = None;
    let mut reached = None;
    for (id, top) in positions {
        if first.is_none() {
            first = Some(id);
        }
        if threshold.is_reached(top, viewport) {
            reached = Some(id);
        }
    }
    reached.or(first).map(str::to_string)
}

#[cfg(test)]
#[path = "tests/tracker.rs"]
mod tests;
