//! SubcategoryAggregator - resolve which category ids scope a product query.
//!
//! Given a category and an explicit recursion flag, produce the closed set of
//! ids a product listing should match against. The set is the contract handed
//! to the external product query layer as a `category in (...)` filter; the
//! engine itself never queries products.

use crate::{CategoryId, CategoryIndex};
use std::collections::{BTreeSet, VecDeque};

/// Resolve the scope set for a category.
///
/// `recursive=false` returns just `{category_id}`. `recursive=true` adds
/// every descendant, walking `children_of` breadth-first with an explicit
/// queue and visiting each id at most once, so the same cycle hazards the
/// tree builder guards against cannot loop here either.
///
/// The `include_subcategory_products` flag on the category is a caller-side
/// default, not a permission: callers decide and pass `recursive` explicitly,
/// which keeps the aggregation decoupled from that policy.
///
/// The requested id is always in the result, even when it is unknown to the
/// index; an unknown id simply has no descendants to add.
pub fn resolve_scope(category_id: &str, recursive: bool, index: &CategoryIndex) -> BTreeSet<CategoryId> {
    let mut scope = BTreeSet::new();
    scope.insert(category_id.to_string());

    if !recursive {
        return scope;
    }

    let mut queue: VecDeque<&str> = VecDeque::new();
    queue.push_back(category_id);

    while let Some(current) = queue.pop_front() {
        for child in index.children_of(Some(current)) {
            if scope.insert(child.clone()) {
                queue.push_back(child);
            }
        }
    }

    scope
}
