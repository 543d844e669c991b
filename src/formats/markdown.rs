//! Markdown format implementation using tree-sitter-md.
//!
//! A single query captures every leaf block in document order. ATX and setext headings become
//! `h1`..`h6` elements, with a trailing `{#id}` attribute taken as the heading's id. Raw HTML
//! blocks are parsed as HTML so their class names take part in heading exclusion.

use crate::document::{ContentTree, NodeId};
use crate::error::{Error, Result};
use crate::formats::html::HtmlFormat;
use crate::formats::Format;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Node, Parser, Query, QueryCursor};

/// Tree-sitter backed markdown reader.
pub struct MarkdownFormat;

impl MarkdownFormat {
    fn language(&self) -> tree_sitter::Language {
        tree_sitter_md::LANGUAGE.into()
    }

    fn block_query(&self) -> &'static str {
        "[(atx_heading) (setext_heading) (paragraph) (fenced_code_block) (indented_code_block) (html_block) (thematic_break) (pipe_table)] @block"
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["md", "markdown"]
    }

    fn parse(&self, source: &str) -> Result<ContentTree> {
        let language = self.language();
        let mut parser = Parser::new();
        parser.set_language(&language)?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| Error::Parse("markdown source".to_string()))?;

        let query = Query::new(&language, self.block_query())?;
        let mut cursor = QueryCursor::new();
        let mut matches = cursor.matches(&query, tree.root_node(), source.as_bytes());

        let mut content = ContentTree::new();
        let root = content.root();
        while let Some(m) = matches.next() {
            for capture in m.captures {
                append_block(&mut content, root, capture.node, source);
            }
        }
        Ok(content)
    }
}

fn node_text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    source.get(node.byte_range()).unwrap_or("")
}

fn append_block(content: &mut ContentTree, root: NodeId, node: Node<'_>, source: &str) {
    let parent_kind = node.parent().map(|p| p.kind()).unwrap_or_default();
    match node.kind() {
        "atx_heading" => {
            let level = atx_level(node).unwrap_or(1);
            let raw = child_of_kind(node, "inline").map_or("", |n| node_text(n, source));
            append_heading(content, root, level, raw);
        }
        "setext_heading" => {
            let level = if child_of_kind(node, "setext_h1_underline").is_some() {
                1
            } else {
                2
            };
            let raw = child_of_kind(node, "paragraph").map_or("", |n| node_text(n, source));
            append_heading(content, root, level, raw);
        }
        // Setext heading content was handled with its heading.
        "paragraph" if parent_kind == "setext_heading" => {}
        "paragraph" => {
            let tag = if parent_kind == "list_item" { "li" } else { "p" };
            let el = content.append_element(root, tag);
            content.append_text(el, &plain_inline(node_text(node, source)));
        }
        "fenced_code_block" => {
            let el = content.append_element(root, "pre");
            let code = child_of_kind(node, "code_fence_content").map_or("", |n| node_text(n, source));
            content.append_text(el, code);
        }
        "indented_code_block" | "pipe_table" => {
            let el = content.append_element(root, "pre");
            content.append_text(el, node_text(node, source));
        }
        "thematic_break" => {
            content.append_element(root, "hr");
        }
        "html_block" => {
            let fragment = HtmlFormat.parse_fragment(node_text(node, source));
            content.graft(root, &fragment);
        }
        other => tracing::trace!(kind = other, "ignoring markdown block"),
    }
}

fn child_of_kind<'t>(node: Node<'t>, kind: &str) -> Option<Node<'t>> {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).find(|c| c.kind() == kind);
    found
}

fn atx_level(node: Node<'_>) -> Option<u8> {
    let mut cursor = node.walk();
    let level = node.children(&mut cursor).find_map(|c| {
        c.kind()
            .strip_prefix("atx_h")
            .and_then(|rest| rest.strip_suffix("_marker"))
            .and_then(|digit| digit.parse::<u8>().ok())
    });
    level
}

fn append_heading(content: &mut ContentTree, root: NodeId, level: u8, raw: &str) {
    let (text, id) = split_heading_id(raw);
    let el = content.append_element(root, &format!("h{level}"));
    if let Some(id) = id {
        content.set_id(el, id);
    }
    content.append_text(el, &plain_inline(text));
}

/// Splits a trailing `{#id}` attribute off heading text, also dropping closing `#`s.
#[must_use]
pub fn split_heading_id(raw: &str) -> (&str, Option<&str>) {
    let mut text = raw.trim();
    let mut id = None;
    if let Some(body) = text.strip_suffix('}') {
        if let Some(open) = body.rfind("{#") {
            let candidate = body[open + 2..].trim();
            if !candidate.is_empty() && !candidate.contains(char::is_whitespace) {
                id = Some(candidate);
                text = body[..open].trim_end();
            }
        }
    }
    let without_closing = text.trim_end_matches('#');
    if without_closing.len() < text.len()
        && (without_closing.is_empty() || without_closing.ends_with(' '))
    {
        text = without_closing.trim_end();
    }
    (text, id)
}

/// Reduces inline markdown to its visible text: link targets, emphasis markers and code
/// backticks are dropped.
#[must_use]
pub fn plain_inline(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '*' | '`' => {}
            '!' if chars.peek() == Some(&'[') => {}
            '[' | ']' => {
                if c == ']' && chars.peek() == Some(&'(') {
                    for skipped in chars.by_ref() {
                        if skipped == ')' {
                            break;
                        }
                    }
                }
            }
            '\n' => out.push(' '),
            _ => out.push(c),
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
#[path = "../tests/markdown.rs"]
mod tests;
