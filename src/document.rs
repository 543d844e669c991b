//! Document model the outline algorithms query instead of a live browser DOM.
//!
//! [`ContentTree`] is an arena of element and text nodes carrying the little a table of contents
//! needs: tag names, id attributes, class names, text, and the vertical position each node lands
//! at once the tree is laid out into terminal rows. Algorithms depend only on the
//! [`DocumentQuery`] capability so they can run against any tree.

use crate::heading::level_of_tag;
use std::collections::HashMap;

/// Index of a node inside a [`ContentTree`].
pub type NodeId = usize;

/// Tag used for text nodes.
pub const TEXT_TAG: &str = "#text";

const BLOCK_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "body",
    "dd",
    "details",
    "div",
    "dl",
    "dt",
    "figcaption",
    "figure",
    "footer",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "html",
    "li",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "summary",
    "table",
    "tr",
    "ul",
];

/// Minimal query capability over a rendered document.
///
/// This is the seam between the outline algorithms and whatever holds the content: find the
/// heading nodes, read their text, read or persist their ids, test their ancestry, and resolve
/// a heading's vertical position from its id.
pub trait DocumentQuery {
    /// Handle to a node in the underlying document.
    type Node: Copy;

    /// Heading nodes (`h1`..`h6`) in document order.
    fn heading_nodes(&self) -> Vec<Self::Node>;

    /// Rank of a heading node, if it is one.
    fn heading_level(&self, node: Self::Node) -> Option<u8>;

    /// Concatenated text content of the node and its descendants.
    fn text(&self, node: Self::Node) -> String;

    /// The node's id attribute.
    fn element_id(&self, node: Self::Node) -> Option<&str>;

    /// Persists an id attribute onto the node. Later lookups of `id` resolve to this node.
    fn assign_id(&mut self, node: Self::Node, id: &str);

    /// True when some element in the document already carries `id`.
    fn id_taken(&self, id: &str) -> bool;

    /// True when any ancestor carries one of `markers` as a class name or id.
    fn within_marker(&self, node: Self::Node, markers: &[String]) -> bool;

    /// Vertical position of the element carrying `id`, once laid out.
    fn top_of(&self, id: &str) -> Option<f64>;
}

#[derive(Clone, Debug)]
/// Element or text node in a [`ContentTree`].
pub struct Node {
    /// Lower-cased tag name, or [`TEXT_TAG`] for text.
    pub tag: String,
    /// Id attribute.
    pub id: Option<String>,
    /// Class names.
    pub classes: Vec<String>,
    /// Text of a text node; empty for elements.
    pub text: String,
    /// Containing element.
    pub parent: Option<NodeId>,
    /// Child nodes in document order.
    pub children: Vec<NodeId>,
    /// First rendered row of the node after layout.
    pub top: Option<usize>,
}

impl Node {
    fn element(tag: &str, parent: Option<NodeId>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            id: None,
            classes: Vec::new(),
            text: String::new(),
            parent,
            children: Vec::new(),
            top: None,
        }
    }

    #[must_use]
    /// True for text nodes.
    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// One laid-out row of document text.
pub struct RenderedLine {
    /// Row content.
    pub text: String,
    /// Heading level when the row belongs to a heading.
    pub heading_level: Option<u8>,
}

#[derive(Clone, Debug)]
/// Arena-backed document tree with a terminal layout.
pub struct ContentTree {
    nodes: Vec<Node>,
    ids: HashMap<String, NodeId>,
    lines: Vec<RenderedLine>,
}

impl Default for ContentTree {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentTree {
    #[must_use]
    /// Creates a tree holding only an empty `article` root.
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::element("article", None)],
            ids: HashMap::new(),
            lines: Vec::new(),
        }
    }

    #[must_use]
    /// The root element.
    pub fn root(&self) -> NodeId {
        0
    }

    #[must_use]
    /// Borrows a node.
    ///
    /// # Panics
    ///
    /// Panics if `id` did not come from this tree.
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    #[must_use]
    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    /// True when the root has no content.
    pub fn is_empty(&self) -> bool {
        self.nodes[0].children.is_empty()
    }

    /// Appends an element under `parent` and returns it.
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::element(tag, Some(parent)));
        self.nodes[parent].children.push(id);
        id
    }

    /// Appends a text node under `parent` and returns it.
    pub fn append_text(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.append_element(parent, TEXT_TAG);
        self.nodes[id].text = text.to_string();
        id
    }

    /// Sets the id attribute, keeping the id index current.
    pub fn set_id(&mut self, node: NodeId, id: &str) {
        if let Some(old) = self.nodes[node].id.take() {
            if self.ids.get(&old) == Some(&node) {
                self.ids.remove(&old);
            }
        }
        self.ids.entry(id.to_string()).or_insert(node);
        self.nodes[node].id = Some(id.to_string());
    }

    /// Adds a class name.
    pub fn add_class(&mut self, node: NodeId, class: &str) {
        self.nodes[node].classes.push(class.to_string());
    }

    #[must_use]
    /// Looks up the first element carrying `id`.
    pub fn find_by_id(&self, id: &str) -> Option<NodeId> {
        self.ids.get(id).copied()
    }

    #[must_use]
    /// All nodes in document (pre-)order, root first.
    pub fn preorder(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root()];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev());
        }
        order
    }

    #[must_use]
    /// Textual content of a node, like the DOM's `textContent`.
    pub fn text_content(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(node, &mut out);
        out
    }

    fn collect_text(&self, node: NodeId, out: &mut String) {
        let n = &self.nodes[node];
        if n.is_text() {
            out.push_str(&n.text);
        }
        for &child in &n.children {
            self.collect_text(child, out);
        }
    }

    /// Iterates over the strict ancestors of a node, nearest first.
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.nodes[node].parent, |&id| self.nodes[id].parent)
    }

    /// Copies the content under `other`'s root beneath `parent`.
    pub fn graft(&mut self, parent: NodeId, other: &ContentTree) {
        for &child in &other.nodes[other.root()].children {
            self.graft_node(parent, other, child);
        }
    }

    fn graft_node(&mut self, parent: NodeId, other: &ContentTree, source: NodeId) {
        let src = &other.nodes[source];
        let copy = if src.is_text() {
            self.append_text(parent, &src.text)
        } else {
            let copy = self.append_element(parent, &src.tag);
            if let Some(id) = &src.id {
                self.set_id(copy, id);
            }
            self.nodes[copy].classes.clone_from(&src.classes);
            copy
        };
        for &child in &src.children {
            self.graft_node(copy, other, child);
        }
    }

    #[must_use]
    /// Rows produced by the last [`ContentTree::layout`].
    pub fn lines(&self) -> &[RenderedLine] {
        &self.lines
    }

    /// Lays the tree out into rows no wider than `width`, recording each node's first row.
    pub fn layout(&mut self, width: usize) {
        let mut cursor = LayoutCursor {
            width: width.max(1),
            ..LayoutCursor::default()
        };
        for node in &mut self.nodes {
            node.top = None;
        }
        self.layout_node(self.root(), &mut cursor);
        cursor.flush();
        while cursor.lines.last().is_some_and(|l| l.text.is_empty()) {
            cursor.lines.pop();
        }
        self.lines = cursor.lines;
    }

    fn layout_node(&mut self, id: NodeId, cursor: &mut LayoutCursor) {
        let tag = self.nodes[id].tag.clone();
        if tag == TEXT_TAG {
            self.nodes[id].top = Some(cursor.row());
            cursor.push_text(&self.nodes[id].text);
            return;
        }

        let block = BLOCK_TAGS.contains(&tag.as_str());
        if block {
            cursor.flush();
        }
        self.nodes[id].top = Some(cursor.row());

        match tag.as_str() {
            "hr" => {
                cursor.lines.push(RenderedLine {
                    text: "─".repeat(cursor.width.min(40)),
                    heading_level: None,
                });
                cursor.lines.push(RenderedLine::default());
                return;
            }
            "li" => cursor.bullet = true,
            "pre" => cursor.preformatted += 1,
            _ => {}
        }
        let level = level_of_tag(&tag);
        if level.is_some() {
            cursor.pending_level = level;
        }

        let children = self.nodes[id].children.clone();
        for child in children {
            self.layout_node(child, cursor);
        }

        if block {
            cursor.flush();
        }
        if tag == "pre" {
            cursor.preformatted -= 1;
        }
    }
}

#[derive(Default)]
struct LayoutCursor {
    width: usize,
    lines: Vec<RenderedLine>,
    pending: String,
    pending_level: Option<u8>,
    preformatted: usize,
    pending_verbatim: bool,
    bullet: bool,
}

impl LayoutCursor {
    fn row(&self) -> usize {
        self.lines.len()
    }

    fn push_text(&mut self, text: &str) {
        if self.preformatted > 0 {
            self.pending_verbatim = true;
            self.pending.push_str(text);
        } else {
            if !self.pending.is_empty() && !self.pending.ends_with(' ') {
                self.pending.push(' ');
            }
            self.pending.push_str(text.trim());
        }
    }

    fn flush(&mut self) {
        let pending = std::mem::take(&mut self.pending);
        let level = self.pending_level.take();
        let verbatim = std::mem::take(&mut self.pending_verbatim);
        if pending.trim().is_empty() {
            return;
        }
        let rows = if verbatim {
            pending
                .trim_end_matches('\n')
                .lines()
                .map(str::to_string)
                .collect()
        } else if self.bullet {
            wrap(pending.trim(), self.width.saturating_sub(2).max(1))
        } else {
            wrap(pending.trim(), self.width)
        };
        let bullet = std::mem::take(&mut self.bullet);
        for (i, text) in rows.into_iter().enumerate() {
            let text = match (bullet, i) {
                (true, 0) => format!("• {text}"),
                (true, _) => format!("  {text}"),
                _ => text,
            };
            self.lines.push(RenderedLine {
                text,
                heading_level: level,
            });
        }
        self.lines.push(RenderedLine::default());
    }
}

/// Greedy word wrap by character count, splitting words longer than `width`.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > width {
            if current_len > 0 {
                rows.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let rest = word.split_off(width);
            rows.push(word.into_iter().collect());
            word = rest;
        }
        let needed = if current_len == 0 {
            word.len()
        } else {
            current_len + 1 + word.len()
        };
        if needed > width && current_len > 0 {
            rows.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current_len += word.len();
        current.extend(word);
    }
    if current_len > 0 {
        rows.push(current);
    }
    rows
}

impl DocumentQuery for ContentTree {
    type Node = NodeId;

    fn heading_nodes(&self) -> Vec<NodeId> {
        self.preorder()
            .into_iter()
            .filter(|&id| level_of_tag(&self.nodes[id].tag).is_some())
            .collect()
    }

    fn heading_level(&self, node: NodeId) -> Option<u8> {
        level_of_tag(&self.nodes[node].tag)
    }

    fn text(&self, node: NodeId) -> String {
        self.text_content(node)
    }

    fn element_id(&self, node: NodeId) -> Option<&str> {
        self.nodes[node].id.as_deref()
    }

    fn assign_id(&mut self, node: NodeId, id: &str) {
        self.set_id(node, id);
        self.ids.insert(id.to_string(), node);
    }

    fn id_taken(&self, id: &str) -> bool {
        self.find_by_id(id).is_some()
    }

    fn within_marker(&self, node: NodeId, markers: &[String]) -> bool {
        self.ancestors(node).any(|ancestor| {
            let n = &self.nodes[ancestor];
            markers.iter().any(|marker| {
                n.classes.iter().any(|c| c == marker) || n.id.as_deref() == Some(marker.as_str())
            })
        })
    }

    #[allow(clippy::cast_precision_loss)]
    fn top_of(&self, id: &str) -> Option<f64> {
        let node = self.find_by_id(id)?;
        self.nodes[node].top.map(|row| row as f64)
    }
}

#[cfg(test)]
#[path = "tests/document.rs"]
mod tests;
