//! HTML format implementation using scraper.
//!
//! The content container is the first `article`, then `main`, then `body` found in the page.
//! Element ids and class names are kept so that heading exclusion can look at ancestry, and
//! non-content elements such as scripts are dropped.

use crate::document::{ContentTree, NodeId};
use crate::error::Result;
use crate::formats::Format;
use scraper::{ElementRef, Html, Node, Selector};

/// Elements searched, in order, for the main content.
pub const CONTENT_CONTAINERS: &[&str] = &["article", "main", "body"];

const SKIPPED_TAGS: &[&str] = &["head", "script", "style", "template", "noscript", "svg"];

/// Scraper backed HTML reader.
pub struct HtmlFormat;

impl HtmlFormat {
    #[must_use]
    /// Parses an HTML fragment into a content tree rooted at an `article`.
    pub fn parse_fragment(&self, source: &str) -> ContentTree {
        let fragment = Html::parse_fragment(source);
        let mut content = ContentTree::new();
        let root = content.root();
        append_children(&mut content, root, fragment.root_element(), false);
        content
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &'static str {
        "html"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["html", "htm"]
    }

    fn parse(&self, source: &str) -> Result<ContentTree> {
        let document = Html::parse_document(source);
        let container = CONTENT_CONTAINERS
            .iter()
            .filter_map(|tag| Selector::parse(tag).ok())
            .find_map(|selector| document.select(&selector).next())
            .unwrap_or_else(|| document.root_element());
        tracing::trace!(container = container.value().name(), "html content container");

        let mut content = ContentTree::new();
        let root = content.root();
        if let Some(id) = container.value().id() {
            content.set_id(root, id);
        }
        for class in container.value().classes() {
            content.add_class(root, class);
        }
        append_children(&mut content, root, container, false);
        Ok(content)
    }
}

fn append_children(content: &mut ContentTree, parent: NodeId, element: ElementRef<'_>, in_pre: bool) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                if in_pre || !text.trim().is_empty() {
                    content.append_text(parent, text);
                }
            }
            Node::Element(_) => {
                let Some(el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = el.value().name();
                if SKIPPED_TAGS.contains(&name) {
                    continue;
                }
                let node = content.append_element(parent, name);
                if let Some(id) = el.value().id() {
                    content.set_id(node, id);
                }
                for class in el.value().classes() {
                    content.add_class(node, class);
                }
                append_children(content, node, el, in_pre || name == "pre");
            }
            _ => {}
        }
    }
}
