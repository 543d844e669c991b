//! Heading extraction from a rendered document.
//!
//! Scans heading nodes in document order, drops the ones that belong to excluded regions or
//! carry no text, and gives every survivor an id that is unique within the document. Every
//! id is written back onto its node so position lookups resolve the heading, not some other
//! element that happens to share the id.

use crate::document::DocumentQuery;
use crate::heading::Heading;
use std::collections::HashSet;

/// Prefix for synthesised heading ids.
pub const ID_PREFIX: &str = "heading-";

#[derive(Clone, Debug, Default)]
/// Rules deciding which headings belong in the outline.
pub struct ExtractOptions {
    /// Phrases that exclude a heading when its text contains them (case-insensitive).
    pub denylist: Vec<String>,
    /// Class names or ids marking containers whose headings are excluded.
    pub excluded_markers: Vec<String>,
}

impl ExtractOptions {
    #[must_use]
    /// True when `text` contains a denylisted phrase.
    pub fn is_denied(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.denylist
            .iter()
            .filter(|phrase| !phrase.trim().is_empty())
            .any(|phrase| lowered.contains(&phrase.to_lowercase()))
    }
}

/// Extracts outline headings from `doc` in document order.
///
/// The returned headings are unlinked; pass them to the hierarchy builder to fill in
/// parent/child ids. A document with no headings (or no content yet) yields an empty list.
pub fn extract_headings<D: DocumentQuery>(doc: &mut D, options: &ExtractOptions) -> Vec<Heading> {
    let nodes = doc.heading_nodes();
    let mut used: HashSet<String> = HashSet::new();
    let mut headings = Vec::new();

    for (index, node) in nodes.into_iter().enumerate() {
        let Some(level) = doc.heading_level(node) else {
            continue;
        };
        let text = doc.text(node).trim().to_string();
        if text.is_empty() {
            tracing::trace!(index, "skipping heading without text");
            continue;
        }
        if options.is_denied(&text) || doc.within_marker(node, &options.excluded_markers) {
            tracing::debug!(index, %text, "excluding heading");
            continue;
        }

        let reusable = doc
            .element_id(node)
            .filter(|existing| !existing.is_empty() && !used.contains(*existing))
            .map(str::to_string);
        let id = reusable.unwrap_or_else(|| {
            unique_id(&format!("{ID_PREFIX}{index}"), |candidate| {
                used.contains(candidate) || doc.id_taken(candidate)
            })
        });
        // Duplicate ids elsewhere in the document must not shadow the heading.
        doc.assign_id(node, &id);
        used.insert(id.clone());
        headings.push(Heading::new(id, text, level));
    }

    tracing::debug!(count = headings.len(), "extracted headings");
    headings
}

fn unique_id(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }
    (1..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken(candidate))
        .unwrap_or_else(|| base.to_string())
}

#[cfg(test)]
#[path = "tests/extract.rs"]
mod tests;
