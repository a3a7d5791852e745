//! CategoryIndex - the arena-style lookup every other component consumes.
//!
//! One O(n) pass over a flat category snapshot yields constant-time lookup by
//! id plus unsorted children buckets. The input is never mutated; categories
//! are copied into the index so downstream structures stay independent of the
//! caller's snapshot.

use crate::{Category, CategoryId, Diagnostic};
use std::collections::HashMap;

/// Lookup structure over a flat category list.
///
/// Fallback policies applied during the build:
///
/// - **Duplicate id**: the last occurrence wins, earlier occurrences
///   contribute nothing to the buckets ([`Diagnostic::DuplicateId`]).
/// - **Orphaned parent**: a `parent_id` that does not resolve to a present
///   category registers the category under the root bucket
///   ([`Diagnostic::OrphanParent`]). This is a deliberate policy so a
///   half-loaded snapshot still produces a renderable tree.
///
/// Children buckets preserve input order and are deliberately unsorted;
/// sibling ordering is [`crate::tree::TreeBuilder`]'s concern.
#[derive(Debug, Clone, Default)]
pub struct CategoryIndex {
    records: HashMap<CategoryId, Category>,
    children: HashMap<CategoryId, Vec<CategoryId>>,
    roots: Vec<CategoryId>,
    ids: Vec<CategoryId>,
    diagnostics: Vec<Diagnostic>,
}

impl CategoryIndex {
    /// Build an index from a category snapshot.
    pub fn build(categories: &[Category]) -> Self {
        let mut diagnostics = Vec::new();

        // First sweep: resolve duplicate ids (last write wins).
        let mut winner: HashMap<&str, usize> = HashMap::with_capacity(categories.len());
        for (pos, category) in categories.iter().enumerate() {
            if winner.insert(category.id.as_str(), pos).is_some() {
                diagnostics.push(Diagnostic::DuplicateId {
                    id: category.id.clone(),
                });
            }
        }

        // Second sweep: fill records and buckets from the winning occurrences,
        // in input order so bucket order is deterministic.
        let mut records = HashMap::with_capacity(winner.len());
        let mut children: HashMap<CategoryId, Vec<CategoryId>> = HashMap::new();
        let mut roots = Vec::new();
        let mut ids = Vec::with_capacity(winner.len());

        for (pos, category) in categories.iter().enumerate() {
            if winner[category.id.as_str()] != pos {
                continue;
            }

            ids.push(category.id.clone());
            records.insert(category.id.clone(), category.clone());

            match &category.parent_id {
                Some(parent) if winner.contains_key(parent.as_str()) => {
                    children
                        .entry(parent.clone())
                        .or_default()
                        .push(category.id.clone());
                }
                Some(parent) => {
                    diagnostics.push(Diagnostic::OrphanParent {
                        id: category.id.clone(),
                        parent_id: parent.clone(),
                    });
                    roots.push(category.id.clone());
                }
                None => roots.push(category.id.clone()),
            }
        }

        Self {
            records,
            children,
            roots,
            ids,
            diagnostics,
        }
    }

    /// Get a category by id.
    pub fn by_id(&self, id: &str) -> Option<&Category> {
        self.records.get(id)
    }

    /// Check if an id is present in the index.
    pub fn contains(&self, id: &str) -> bool {
        self.records.contains_key(id)
    }

    /// Children ids of a category, unsorted (input order).
    ///
    /// `None` addresses the root bucket: true roots plus categories re-rooted
    /// by the orphan policy.
    pub fn children_of(&self, parent: Option<&str>) -> &[CategoryId] {
        match parent {
            Some(id) => self.children.get(id).map(Vec::as_slice).unwrap_or(&[]),
            None => &self.roots,
        }
    }

    /// Ids of the root bucket.
    pub fn root_ids(&self) -> &[CategoryId] {
        &self.roots
    }

    /// All indexed ids in input order (duplicates already collapsed).
    pub fn ids(&self) -> &[CategoryId] {
        &self.ids
    }

    /// Count of indexed categories.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Check if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Defects observed while building the index.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Category> {
        vec![
            Category::new("a", "Apparel", None),
            Category::new("b", "Boots", Some("a")),
            Category::new("c", "Chelsea Boots", Some("b")),
            Category::new("d", "Denim", Some("a")),
        ]
    }

    #[test]
    fn build_basic_lookup() {
        let index = CategoryIndex::build(&sample());

        assert_eq!(index.len(), 4);
        assert_eq!(index.by_id("b").unwrap().name, "Boots");
        assert!(index.by_id("ghost").is_none());
        assert_eq!(index.root_ids(), &["a".to_string()]);
        assert!(index.diagnostics().is_empty());
    }

    #[test]
    fn children_preserve_input_order() {
        let index = CategoryIndex::build(&sample());
        assert_eq!(index.children_of(Some("a")), &["b".to_string(), "d".to_string()]);
        assert_eq!(index.children_of(Some("c")), &[] as &[String]);
        assert_eq!(index.children_of(None), &["a".to_string()]);
    }

    #[test]
    fn input_not_mutated() {
        let categories = sample();
        let before = categories.clone();
        let _index = CategoryIndex::build(&categories);
        assert_eq!(categories, before);
    }

    #[test]
    fn duplicate_id_last_write_wins() {
        let categories = vec![
            Category::new("a", "First", None),
            Category::new("a", "Second", None),
            Category::new("b", "Child of second", Some("a")),
        ];

        let index = CategoryIndex::build(&categories);

        assert_eq!(index.len(), 2);
        assert_eq!(index.by_id("a").unwrap().name, "Second");
        assert_eq!(
            index.diagnostics(),
            &[Diagnostic::DuplicateId { id: "a".into() }]
        );
        // "a" appears once in the root bucket, not twice.
        assert_eq!(index.root_ids(), &["a".to_string()]);
    }

    #[test]
    fn duplicate_under_different_parents() {
        let categories = vec![
            Category::new("p1", "Parent 1", None),
            Category::new("p2", "Parent 2", None),
            Category::new("x", "Under p1", Some("p1")),
            Category::new("x", "Under p2", Some("p2")),
        ];

        let index = CategoryIndex::build(&categories);

        // Only the winning occurrence contributes a bucket entry.
        assert_eq!(index.children_of(Some("p1")), &[] as &[String]);
        assert_eq!(index.children_of(Some("p2")), &["x".to_string()]);
    }

    #[test]
    fn orphan_registered_as_root() {
        let categories = vec![
            Category::new("a", "Apparel", None),
            Category::new("lost", "Lost", Some("ghost")),
        ];

        let index = CategoryIndex::build(&categories);

        assert_eq!(index.root_ids(), &["a".to_string(), "lost".to_string()]);
        assert_eq!(
            index.diagnostics(),
            &[Diagnostic::OrphanParent {
                id: "lost".into(),
                parent_id: "ghost".into(),
            }]
        );
        // The record itself keeps its original parent_id; only the structural
        // placement is re-rooted.
        assert_eq!(index.by_id("lost").unwrap().parent_id.as_deref(), Some("ghost"));
    }

    #[test]
    fn self_cycle_keeps_bucket_entry() {
        // A self-referencing category stays out of the root bucket here; the
        // tree builder's visited guard is what breaks the cycle.
        let categories = vec![Category::new("x", "Self", Some("x"))];
        let index = CategoryIndex::build(&categories);

        assert!(index.root_ids().is_empty());
        assert_eq!(index.children_of(Some("x")), &["x".to_string()]);
        assert!(index.diagnostics().is_empty());
    }

    #[test]
    fn empty_input() {
        let index = CategoryIndex::build(&[]);
        assert!(index.is_empty());
        assert!(index.root_ids().is_empty());
        assert!(index.children_of(None).is_empty());
    }
}
