//! Format trait and implementations for the document types waymark can read.
//!
//! Each format turns source text into a [`ContentTree`]. Markdown goes through tree-sitter,
//! HTML through scraper, and CMS article payloads decode their envelope before handing the body
//! to one of the other two.

pub mod article;
pub mod html;
pub mod markdown;

use crate::document::ContentTree;
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

/// Source format that can be parsed into a content tree.
pub trait Format {
    /// Short name used in logs.
    fn name(&self) -> &'static str;
    /// File extensions handled by this format, without the dot.
    fn extensions(&self) -> &'static [&'static str];
    /// Parses source text into a content tree.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be parsed at all.
    fn parse(&self, source: &str) -> Result<ContentTree>;
}

/// Picks the format for `path` from its extension.
///
/// # Errors
///
/// Returns [`Error::UnsupportedFormat`] when no format claims the extension.
pub fn for_path(path: &Path) -> Result<Box<dyn Format>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let formats: [Box<dyn Format>; 3] = [
        Box::new(markdown::MarkdownFormat),
        Box::new(html::HtmlFormat),
        Box::new(article::ArticleFormat),
    ];
    formats
        .into_iter()
        .find(|f| f.extensions().contains(&ext.as_str()))
        .ok_or_else(|| Error::UnsupportedFormat(path.display().to_string()))
}

/// Reads and parses the document at `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, has an unknown extension, or fails to parse.
pub fn load_document(path: &Path) -> Result<ContentTree> {
    let format = for_path(path)?;
    let source = fs::read_to_string(path)?;
    let tree = format.parse(&source)?;
    tracing::debug!(
        path = %path.display(),
        format = format.name(),
        nodes = tree.len(),
        "loaded document"
    );
    Ok(tree)
}

#[cfg(test)]
#[path = "tests/formats.rs"]
mod tests;
