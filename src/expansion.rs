//! Which outline nodes are expanded, and therefore which headings are visible.
//!
//! The automatic set is the active heading, its whole ancestor chain, and one level of its
//! children. A heading is visible when it is a root or its parent is expanded. Manual toggles
//! edit the set directly and hold until the active heading changes.

use crate::heading::Heading;
use crate::hierarchy::Outline;
use std::collections::HashSet;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Ids of the outline nodes currently expanded.
pub struct ExpansionSet {
    expanded: HashSet<String>,
}

impl ExpansionSet {
    #[must_use]
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the set from scratch around `active_id`.
    pub fn recompute(&mut self, outline: &Outline, active_id: &str) {
        self.expanded.clear();
        let Some(active) = outline.get(active_id) else {
            return;
        };
        self.expanded.insert(active.id.clone());
        for ancestor in outline.ancestors(active_id) {
            self.expanded.insert(ancestor.to_string());
        }
        self.expanded.extend(active.child_ids.iter().cloned());
    }

    #[must_use]
    /// True when `id` is expanded.
    pub fn contains(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    #[must_use]
    /// Number of expanded ids.
    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    #[must_use]
    /// True when nothing is expanded.
    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Iterates over the expanded ids in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }

    #[must_use]
    /// True when `heading` should be rendered.
    pub fn is_visible(&self, heading: &Heading) -> bool {
        heading
            .parent_id
            .as_deref()
            .is_none_or(|parent| self.contains(parent))
    }

    #[must_use]
    /// The visible headings in document order.
    pub fn visible<'a>(&self, outline: &'a Outline) -> Vec<&'a Heading> {
        outline
            .headings()
            .iter()
            .filter(|h| self.is_visible(h))
            .collect()
    }

    /// Removes `id` and its recorded children from the set.
    pub fn collapse(&mut self, outline: &Outline, id: &str) {
        self.expanded.remove(id);
        if let Some(heading) = outline.get(id) {
            for child in &heading.child_ids {
                self.expanded.remove(child);
            }
        }
    }

    /// Adds `id` and its immediate children to the set.
    pub fn expand(&mut self, outline: &Outline, id: &str) {
        let Some(heading) = outline.get(id) else {
            return;
        };
        self.expanded.insert(heading.id.clone());
        self.expanded.extend(heading.child_ids.iter().cloned());
    }

    /// Collapses an expanded node, or expands a collapsed one.
    pub fn toggle(&mut self, outline: &Outline, id: &str) {
        if self.contains(id) {
            self.collapse(outline, id);
        } else {
            self.expand(outline, id);
        }
    }

    /// Empties the set.
    pub fn clear(&mut self) {
        self.expanded.clear();
    }
}

#[cfg(test)]
#[path = "tests/expansion.rs"]
mod tests;
