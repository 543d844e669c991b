//! Heading representation for extracted document outlines.
//!
//! A heading is one leveled, identified node pulled out of rendered content. Headings track
//! their place in the outline through parent/child id links, which the hierarchy builder fills
//! in after extraction.

use serde::Serialize;

/// Lowest heading rank (`h1`).
pub const MIN_LEVEL: u8 = 1;
/// Highest heading rank (`h6`).
pub const MAX_LEVEL: u8 = 6;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Identified, leveled heading used to build a navigable outline.
pub struct Heading {
    /// Identifier unique within the document, persisted back onto the source node.
    pub id: String,
    /// Trimmed visible text of the heading.
    pub text: String,
    /// Heading rank, 1 (`h1`) through 6 (`h6`).
    pub level: u8,
    /// Nearest preceding heading with a strictly smaller level.
    pub parent_id: Option<String>,
    /// Headings whose parent is this one, in document order.
    pub child_ids: Vec<String>,
}

impl Heading {
    #[must_use]
    /// Creates an unlinked heading, clamping the level into `1..=6`.
    pub fn new(id: impl Into<String>, text: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            level: level.clamp(MIN_LEVEL, MAX_LEVEL),
            parent_id: None,
            child_ids: Vec::new(),
        }
    }

    #[must_use]
    /// True when no heading contains this one.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[must_use]
/// Maps a tag name such as `h3` to its heading level.
pub fn level_of_tag(tag: &str) -> Option<u8> {
    let digit = tag.strip_prefix(['h', 'H'])?;
    match digit.parse::<u8>() {
        Ok(level) if (MIN_LEVEL..=MAX_LEVEL).contains(&level) => Some(level),
        _ => None,
    }
}
