//! Parent/child structure among headings, derived from levels and document order.
//!
//! A single pass keeps a stack of "open" headings. Anything at the same or a deeper level than
//! the incoming heading is closed, and whatever remains on top becomes its parent. Because a
//! parent is always an earlier heading, the result is a forest.

use crate::heading::Heading;
use std::collections::HashMap;

/// Links each heading to its parent and children in place.
///
/// Existing links are discarded first, so running this twice over the same list gives the same
/// result.
pub fn build_hierarchy(headings: &mut [Heading]) {
    for heading in headings.iter_mut() {
        heading.parent_id = None;
        heading.child_ids.clear();
    }

    let mut open: Vec<usize> = Vec::new();
    for i in 0..headings.len() {
        let level = headings[i].level;
        while open.last().is_some_and(|&top| headings[top].level >= level) {
            open.pop();
        }
        if let Some(&parent) = open.last() {
            let child_id = headings[i].id.clone();
            headings[i].parent_id = Some(headings[parent].id.clone());
            headings[parent].child_ids.push(child_id);
        }
        open.push(i);
    }
}

#[derive(Clone, Debug, Default)]
/// Linked headings with lookup by id.
pub struct Outline {
    headings: Vec<Heading>,
    index: HashMap<String, usize>,
}

impl Outline {
    #[must_use]
    /// Builds the hierarchy over `headings` and indexes them by id.
    pub fn new(mut headings: Vec<Heading>) -> Self {
        build_hierarchy(&mut headings);
        let index = headings
            .iter()
            .enumerate()
            .map(|(i, h)| (h.id.clone(), i))
            .collect();
        Self { headings, index }
    }

    #[must_use]
    /// All headings in document order.
    pub fn headings(&self) -> &[Heading] {
        &self.headings
    }

    #[must_use]
    /// Number of headings.
    pub fn len(&self) -> usize {
        self.headings.len()
    }

    #[must_use]
    /// True when the outline holds no headings.
    pub fn is_empty(&self) -> bool {
        self.headings.is_empty()
    }

    #[must_use]
    /// Document-order position of the heading with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    #[must_use]
    /// The heading with `id`.
    pub fn get(&self, id: &str) -> Option<&Heading> {
        self.position(id).map(|i| &self.headings[i])
    }

    /// Headings without a parent.
    pub fn roots(&self) -> impl Iterator<Item = &Heading> {
        self.headings.iter().filter(|h| h.is_root())
    }

    /// Immediate children of `id`, in document order.
    pub fn children(&self, id: &str) -> impl Iterator<Item = &Heading> {
        self.get(id)
            .into_iter()
            .flat_map(|h| h.child_ids.iter())
            .filter_map(|child| self.get(child))
    }

    #[must_use]
    /// Ids of the strict ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: &str) -> Vec<&str> {
        let mut chain = Vec::new();
        let mut current = self.get(id).and_then(|h| h.parent_id.as_deref());
        while let Some(parent) = current {
            chain.push(parent);
            current = self.get(parent).and_then(|h| h.parent_id.as_deref());
        }
        chain
    }
}

#[cfg(test)]
#[path = "tests/hierarchy.rs"]
mod tests;
