//! TreeFilter - prune a forest to root-to-match paths for a search term.
//!
//! A node survives if its name contains the query case-insensitively, or if
//! any descendant survives. Ancestors of a match are always retained, so the
//! result never shows a match without the context needed to reach it.

use crate::CategoryNode;

/// Filter a forest by a search term, non-destructively.
///
/// Matching is pure substring containment on the category name, after
/// trimming the query and lowercasing both sides; no tokenization. An empty
/// or whitespace-only query returns a structurally equal copy of the forest.
/// No match at all returns an empty forest, which callers render as "no
/// results" rather than treating as an error.
pub fn filter(forest: &[CategoryNode], query: &str) -> Vec<CategoryNode> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return forest.to_vec();
    }

    forest
        .iter()
        .filter_map(|node| prune(node, &needle))
        .collect()
}

/// Rebuild `node` if it or any descendant matches, dropping dead branches.
fn prune(node: &CategoryNode, needle: &str) -> Option<CategoryNode> {
    let children: Vec<CategoryNode> = node
        .children
        .iter()
        .filter_map(|child| prune(child, needle))
        .collect();

    let self_matches = node.category.name.to_lowercase().contains(needle);
    if self_matches || !children.is_empty() {
        Some(CategoryNode {
            category: node.category.clone(),
            depth: node.depth,
            children,
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, TreeBuilder};

    fn sample_forest() -> Vec<CategoryNode> {
        let categories = vec![
            Category::new("a", "Apparel", None),
            Category::new("b", "Boots", Some("a")),
            Category::new("c", "Chelsea Boots", Some("b")),
            Category::new("d", "Denim", Some("a")),
            Category::new("e", "Electronics", None),
        ];
        TreeBuilder::build(&categories).roots
    }

    fn ids(nodes: &[CategoryNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.category.id.as_str()).collect()
    }

    #[test]
    fn match_keeps_whole_ancestor_chain() {
        let filtered = filter(&sample_forest(), "chelsea");

        assert_eq!(ids(&filtered), vec!["a"]);
        assert_eq!(ids(&filtered[0].children), vec!["b"]);
        assert_eq!(ids(&filtered[0].children[0].children), vec!["c"]);
    }

    #[test]
    fn non_matching_siblings_are_dropped() {
        let filtered = filter(&sample_forest(), "boots");

        // "Denim" and "Electronics" vanish, the Boots branch survives whole.
        assert_eq!(ids(&filtered), vec!["a"]);
        assert_eq!(ids(&filtered[0].children), vec!["b"]);
    }

    #[test]
    fn matching_ancestor_keeps_no_extra_descendants() {
        let filtered = filter(&sample_forest(), "apparel");

        // "Apparel" matches by itself; children that match nothing are gone.
        assert_eq!(ids(&filtered), vec!["a"]);
        assert!(filtered[0].children.is_empty());
    }

    #[test]
    fn case_insensitive_containment() {
        let filtered = filter(&sample_forest(), "ELECT");
        assert_eq!(ids(&filtered), vec!["e"]);
    }

    #[test]
    fn empty_query_is_a_no_op() {
        let forest = sample_forest();
        assert_eq!(filter(&forest, ""), forest);
        assert_eq!(filter(&forest, "   \t "), forest);
    }

    #[test]
    fn query_is_trimmed() {
        let filtered = filter(&sample_forest(), "  denim ");
        assert_eq!(ids(&filtered), vec!["a"]);
        assert_eq!(ids(&filtered[0].children), vec!["d"]);
    }

    #[test]
    fn no_match_yields_empty_forest() {
        let filtered = filter(&sample_forest(), "zzz-not-here");
        assert!(filtered.is_empty());
    }

    #[test]
    fn input_forest_untouched() {
        let forest = sample_forest();
        let before = forest.clone();
        let _ = filter(&forest, "boots");
        assert_eq!(forest, before);
    }

    #[test]
    fn depth_values_preserved_from_original() {
        let filtered = filter(&sample_forest(), "chelsea");
        assert_eq!(filtered[0].depth, 0);
        assert_eq!(filtered[0].children[0].depth, 1);
        assert_eq!(filtered[0].children[0].children[0].depth, 2);
    }

    #[test]
    fn unicode_names_match() {
        let categories = vec![
            Category::new("r", "Root", None),
            Category::new("u", "Überwürfe", Some("r")),
        ];
        let forest = TreeBuilder::build(&categories).roots;

        let filtered = filter(&forest, "überwürfe");
        assert_eq!(ids(&filtered), vec!["r"]);
    }
}
