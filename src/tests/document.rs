use super::{wrap, ContentTree, DocumentQuery};

fn sample() -> ContentTree {
    let mut tree = ContentTree::new();
    let root = tree.root();
    let h1 = tree.append_element(root, "h1");
    tree.append_text(h1, "Title");
    let p = tree.append_element(root, "p");
    tree.append_text(p, "Some body text that is long enough to wrap twice");
    let comments = tree.append_element(root, "div");
    tree.add_class(comments, "comments");
    let h2 = tree.append_element(comments, "H2");
    tree.set_id(h2, "guestbook");
    tree.append_text(h2, "Guestbook");
    tree
}

#[test]
fn test_heading_nodes_in_document_order() {
    let tree = sample();
    let headings = tree.heading_nodes();
    assert_eq!(headings.len(), 2);
    assert_eq!(tree.heading_level(headings[0]), Some(1));
    assert_eq!(tree.heading_level(headings[1]), Some(2), "tags are lower-cased");
    assert_eq!(tree.text(headings[1]), "Guestbook");
}

#[test]
fn test_within_marker_checks_ancestors() {
    let tree = sample();
    let headings = tree.heading_nodes();
    let markers = vec!["comments".to_string()];
    assert!(!tree.within_marker(headings[0], &markers));
    assert!(tree.within_marker(headings[1], &markers));
    assert!(!tree.within_marker(headings[1], &["sidebar".to_string()]));
}

#[test]
fn test_assign_id_is_resolvable_after_layout() {
    let mut tree = sample();
    let first = tree.heading_nodes()[0];
    tree.assign_id(first, "heading-0");
    assert_eq!(tree.top_of("heading-0"), None, "no position before layout");

    tree.layout(20);
    assert_eq!(tree.top_of("heading-0"), Some(0.0));
    // Title, blank, wrapped body rows, blank, then the guestbook heading.
    let guestbook = tree.top_of("guestbook").unwrap();
    assert!(guestbook > 3.0, "got {guestbook}");
    assert_eq!(
        tree.lines()[guestbook as usize].heading_level,
        Some(2),
        "heading rows carry their level"
    );
}

#[test]
fn test_set_id_replaces_index_entry() {
    let mut tree = sample();
    let h2 = tree.find_by_id("guestbook").unwrap();
    tree.set_id(h2, "renamed");
    assert_eq!(tree.find_by_id("guestbook"), None);
    assert_eq!(tree.find_by_id("renamed"), Some(h2));
}

#[test]
fn test_graft_copies_subtree() {
    let mut tree = ContentTree::new();
    let section = tree.append_element(tree.root(), "section");
    tree.graft(section, &sample());
    assert_eq!(tree.heading_nodes().len(), 2);
    assert!(tree.find_by_id("guestbook").is_some());
    assert_eq!(tree.text_content(section), "TitleSome body text that is long enough to wrap twiceGuestbook");
}

#[test]
fn test_layout_keeps_preformatted_rows() {
    let mut tree = ContentTree::new();
    let pre = tree.append_element(tree.root(), "pre");
    tree.append_text(pre, "fn main() {\n    body();\n}\n");
    tree.layout(8);
    let rows: Vec<&str> = tree.lines().iter().map(|l| l.text.as_str()).collect();
    assert_eq!(rows, vec!["fn main() {", "    body();", "}"]);
}

#[test]
fn test_layout_bullets_list_items() {
    let mut tree = ContentTree::new();
    let li = tree.append_element(tree.root(), "li");
    tree.append_text(li, "one");
    tree.layout(40);
    assert_eq!(tree.lines()[0].text, "• one");
}

#[test]
fn test_wrap_splits_long_words() {
    assert_eq!(wrap("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
    assert_eq!(wrap("a bb ccc", 4), vec!["a bb", "ccc"]);
    assert!(wrap("   ", 10).is_empty());
}

#[test]
fn test_empty_tree() {
    let mut tree = ContentTree::new();
    assert!(tree.is_empty());
    tree.layout(10);
    assert!(tree.lines().is_empty());
    assert!(tree.heading_nodes().is_empty());
}
