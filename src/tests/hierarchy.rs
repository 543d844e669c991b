use super::{build_hierarchy, Outline};
use crate::heading::Heading;
use proptest::prelude::*;

fn headings(spec: &[(u8, &str)]) -> Vec<Heading> {
    spec.iter()
        .map(|&(level, id)| Heading::new(id, id, level))
        .collect()
}

#[test]
fn test_scenario_siblings_and_nesting() {
    let outline = Outline::new(headings(&[(1, "A"), (2, "B"), (2, "C"), (3, "D")]));

    let a = outline.get("A").unwrap();
    assert_eq!(a.parent_id, None);
    assert_eq!(a.child_ids, vec!["B", "C"]);
    assert_eq!(outline.get("B").unwrap().parent_id.as_deref(), Some("A"));
    assert_eq!(outline.get("C").unwrap().parent_id.as_deref(), Some("A"));
    assert_eq!(outline.get("C").unwrap().child_ids, vec!["D"]);
    assert_eq!(outline.get("D").unwrap().parent_id.as_deref(), Some("C"));
}

#[test]
fn test_shallower_heading_without_predecessor_is_root() {
    let outline = Outline::new(headings(&[(3, "deep"), (2, "mid"), (1, "top"), (4, "skip")]));
    assert!(outline.get("deep").unwrap().is_root());
    assert!(outline.get("mid").unwrap().is_root());
    assert!(outline.get("top").unwrap().is_root());
    assert_eq!(outline.get("skip").unwrap().parent_id.as_deref(), Some("top"));
    assert_eq!(outline.roots().count(), 3);
}

#[test]
fn test_ancestors_nearest_first() {
    let outline = Outline::new(headings(&[(1, "A"), (2, "B"), (3, "C"), (4, "D")]));
    assert_eq!(outline.ancestors("D"), vec!["C", "B", "A"]);
    assert!(outline.ancestors("A").is_empty());
    assert!(outline.ancestors("missing").is_empty());
}

#[test]
fn test_children_and_positions() {
    let outline = Outline::new(headings(&[(1, "A"), (2, "B"), (2, "C")]));
    let children: Vec<&str> = outline.children("A").map(|h| h.id.as_str()).collect();
    assert_eq!(children, vec!["B", "C"]);
    assert_eq!(outline.position("C"), Some(2));
    assert_eq!(outline.children("missing").count(), 0);
}

#[test]
fn test_rebuilding_clears_stale_links() {
    let mut list = headings(&[(1, "A"), (2, "B")]);
    list[0].child_ids.push("ghost".to_string());
    list[1].parent_id = Some("ghost".to_string());
    build_hierarchy(&mut list);
    assert_eq!(list[0].child_ids, vec!["B"]);
    assert_eq!(list[1].parent_id.as_deref(), Some("A"));
}

#[test]
fn test_empty_outline() {
    let outline = Outline::new(Vec::new());
    assert!(outline.is_empty());
    assert_eq!(outline.len(), 0);
    assert!(outline.get("A").is_none());
}

fn arbitrary_levels() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(1u8..=6, 0..40)
}

fn from_levels(levels: &[u8]) -> Vec<Heading> {
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| Heading::new(format!("h{i}"), format!("Heading {i}"), level))
        .collect()
}

proptest! {
    #[test]
    fn prop_parent_relation_is_acyclic(levels in arbitrary_levels()) {
        let outline = Outline::new(from_levels(&levels));
        for heading in outline.headings() {
            let chain = outline.ancestors(&heading.id);
            prop_assert!(chain.len() < outline.len());
            prop_assert!(!chain.contains(&heading.id.as_str()));
            // Parents always precede their children and sit at a smaller level.
            if let Some(parent) = heading.parent_id.as_deref() {
                let parent = outline.get(parent).unwrap();
                prop_assert!(outline.position(&parent.id) < outline.position(&heading.id));
                prop_assert!(parent.level < heading.level);
            }
        }
    }

    #[test]
    fn prop_level_one_headings_are_roots(levels in arbitrary_levels()) {
        let outline = Outline::new(from_levels(&levels));
        for heading in outline.headings().iter().filter(|h| h.level == 1) {
            prop_assert!(heading.is_root());
        }
    }

    #[test]
    fn prop_building_is_idempotent(levels in arbitrary_levels()) {
        let mut once = from_levels(&levels);
        build_hierarchy(&mut once);
        let mut twice = once.clone();
        build_hierarchy(&mut twice);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_children_mirror_parents(levels in arbitrary_levels()) {
        let outline = Outline::new(from_levels(&levels));
        for heading in outline.headings() {
            for child in &heading.child_ids {
                prop_assert_eq!(outline.get(child).unwrap().parent_id.as_deref(), Some(heading.id.as_str()));
            }
        }
    }
}
