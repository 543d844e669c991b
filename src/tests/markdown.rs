use super::{plain_inline, split_heading_id, MarkdownFormat};
use crate::document::{ContentTree, DocumentQuery};
use crate::formats::Format;

fn headings(tree: &ContentTree) -> Vec<(u8, String, Option<String>)> {
    tree.heading_nodes()
        .into_iter()
        .map(|n| {
            (
                tree.heading_level(n).unwrap_or_default(),
                tree.text(n),
                tree.element_id(n).map(str::to_string),
            )
        })
        .collect()
}

#[test]
fn test_atx_and_setext_headings() {
    let source = "# Intro\n\nSome *text*.\n\n## Setup {#setup}\n\nBody\n\nClosing\n=======\n\nSub\n---\n\n###### Deep ###\n";
    let tree = MarkdownFormat.parse(source).unwrap();
    assert_eq!(
        headings(&tree),
        vec![
            (1, "Intro".to_string(), None),
            (2, "Setup".to_string(), Some("setup".to_string())),
            (1, "Closing".to_string(), None),
            (2, "Sub".to_string(), None),
            (6, "Deep".to_string(), None),
        ]
    );
}

#[test]
fn test_blocks_map_to_elements() {
    let source = "Para with [a link](https://example.com).\n\n- item one\n- item two\n\n```rust\nfn main() {}\n```\n\n---\n";
    let tree = MarkdownFormat.parse(source).unwrap();
    let tags: Vec<&str> = tree
        .node(tree.root())
        .children
        .iter()
        .map(|&c| tree.node(c).tag.as_str())
        .collect();
    assert_eq!(tags, vec!["p", "li", "li", "pre", "hr"]);

    let first = tree.node(tree.root()).children[0];
    assert_eq!(tree.text_content(first), "Para with a link.");
    let pre = tree.node(tree.root()).children[3];
    assert!(tree.text_content(pre).contains("fn main() {}"));
}

#[test]
fn test_html_block_keeps_classes_for_exclusion() {
    let source = "# Post\n\n<div class=\"comments\">\n<h2>Discuss</h2>\n</div>\n";
    let tree = MarkdownFormat.parse(source).unwrap();
    let nodes = tree.heading_nodes();
    assert_eq!(nodes.len(), 2);
    assert!(!tree.within_marker(nodes[0], &["comments".to_string()]));
    assert!(tree.within_marker(nodes[1], &["comments".to_string()]));
}

#[test]
fn test_empty_source() {
    let tree = MarkdownFormat.parse("").unwrap();
    assert!(tree.is_empty());
    assert!(tree.heading_nodes().is_empty());
}

#[test]
fn test_split_heading_id() {
    assert_eq!(split_heading_id("Setup {#setup}"), ("Setup", Some("setup")));
    assert_eq!(split_heading_id("  Title ##  "), ("Title", None));
    assert_eq!(split_heading_id("Using C#"), ("Using C#", None));
    assert_eq!(
        split_heading_id("Odd {#two words}"),
        ("Odd {#two words}", None)
    );
    assert_eq!(split_heading_id("{#only}"), ("", Some("only")));
}

#[test]
fn test_plain_inline() {
    assert_eq!(plain_inline("Use **bold** and `code`"), "Use bold and code");
    assert_eq!(plain_inline("See [docs](http://x.y) now"), "See docs now");
    assert_eq!(plain_inline("![alt](img.png) caption"), "alt caption");
    assert_eq!(plain_inline("line\nbreak "), "line break");
}
