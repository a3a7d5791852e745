//! TreeBuilder - flat parent-referencing lists to rooted, ordered forests.
//!
//! The builder consumes a [`CategoryIndex`] and assembles nested
//! [`CategoryNode`]s with an explicit stack, so recursion depth never depends
//! on tree depth. Malformed input (missing parents, cycles, duplicate ids)
//! degrades via the index policies plus cycle breaking here; the build never
//! fails.
//!
//! # Sibling ordering
//!
//! A single deterministic tie-break applies everywhere a tree is rendered:
//!
//! 1. Both siblings define `order` → ascending `order`, then case-insensitive
//!    name
//! 2. Exactly one defines `order` → that one sorts first
//! 3. Neither defines `order` → case-insensitive name
//! 4. Still tied → id, so the result is a total order

use crate::{Category, CategoryId, CategoryIndex, Diagnostic};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;

/// A category with its resolved children.
///
/// Nodes own copies of their categories; callers must not assume identity
/// with the input snapshot, which keeps downstream filtering non-destructive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    /// The category at this node (a copy, not a reference into the input)
    pub category: Category,
    /// Actual depth in the built forest (0 = root), recomputed from structure
    pub depth: u32,
    /// Ordered children
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    fn new(category: Category, depth: u32) -> Self {
        Self {
            category,
            depth,
            children: Vec::new(),
        }
    }

    /// Total node count of this subtree, including self.
    pub fn subtree_len(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

/// A rooted, ordered forest plus everything that went wrong building it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forest {
    /// Root nodes in sibling order; cycle-recovered roots follow in input order
    pub roots: Vec<CategoryNode>,
    /// Index defects plus cycles broken during assembly
    pub diagnostics: Vec<Diagnostic>,
}

impl Forest {
    /// Total number of nodes across all roots.
    pub fn node_count(&self) -> usize {
        self.roots.iter().map(CategoryNode::subtree_len).sum()
    }

    /// Depth-first search for a node by category id.
    pub fn find(&self, id: &str) -> Option<&CategoryNode> {
        let mut stack: Vec<&CategoryNode> = self.roots.iter().collect();
        while let Some(node) = stack.pop() {
            if node.category.id == id {
                return Some(node);
            }
            stack.extend(node.children.iter());
        }
        None
    }
}

/// Builds forests from flat category snapshots.
pub struct TreeBuilder;

impl TreeBuilder {
    /// Build a forest from a category snapshot.
    ///
    /// Runs [`CategoryIndex::build`] and assembles the nested structure.
    /// Every indexed id appears exactly once in the output; ids dropped by
    /// the duplicate policy are the only omissions.
    pub fn build(categories: &[Category]) -> Forest {
        let index = CategoryIndex::build(categories);
        Self::build_from_index(&index)
    }

    /// Build a forest from an existing index.
    pub fn build_from_index(index: &CategoryIndex) -> Forest {
        let mut diagnostics = index.diagnostics().to_vec();
        let mut visited: HashSet<&str> = HashSet::with_capacity(index.len());
        let mut roots = Vec::new();

        for root_id in sorted_ids(index, index.root_ids()) {
            if let Some(node) = assemble(index, &root_id, &mut visited) {
                roots.push(node);
            }
        }

        // Anything still unvisited sits on a parent cycle (or hangs below
        // one). The first such id in input order becomes a root, which drops
        // the cycle edge pointing at it.
        for id in index.ids() {
            if visited.contains(id.as_str()) {
                continue;
            }
            diagnostics.push(Diagnostic::CycleDetected { id: id.clone() });
            if let Some(node) = assemble(index, id, &mut visited) {
                roots.push(node);
            }
        }

        Forest { roots, diagnostics }
    }
}

/// Compare two sibling categories with the fixed tie-break.
pub fn sibling_order(a: &Category, b: &Category) -> Ordering {
    match (a.order, b.order) {
        (Some(x), Some(y)) => x
            .cmp(&y)
            .then_with(|| name_order(&a.name, &b.name))
            .then_with(|| a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => name_order(&a.name, &b.name).then_with(|| a.id.cmp(&b.id)),
    }
}

/// Case-insensitive name comparison (Unicode lowercase folding).
fn name_order(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn sorted_ids(index: &CategoryIndex, ids: &[CategoryId]) -> Vec<CategoryId> {
    let mut sorted = ids.to_vec();
    sorted.sort_by(|a, b| {
        match (index.by_id(a), index.by_id(b)) {
            (Some(ca), Some(cb)) => sibling_order(ca, cb),
            // Unreachable for ids the index produced, but stay total.
            _ => a.cmp(b),
        }
    });
    sorted
}

/// One explicit-stack frame per node under construction.
struct Frame {
    node: CategoryNode,
    pending: std::vec::IntoIter<CategoryId>,
}

/// Assemble the subtree rooted at `start` without native recursion.
///
/// The visited set guards against revisiting an id already placed anywhere in
/// the forest, which is what breaks cycle edges and keeps each id unique.
fn assemble<'a>(
    index: &'a CategoryIndex,
    start: &str,
    visited: &mut HashSet<&'a str>,
) -> Option<CategoryNode> {
    let category = index.by_id(start)?;
    // Key into the visited set with the index-owned string so the borrow
    // outlives this call.
    if !visited.insert(category.id.as_str()) {
        return None;
    }

    let mut stack = vec![Frame {
        node: CategoryNode::new(category.clone(), 0),
        pending: sorted_ids(index, index.children_of(Some(start))).into_iter(),
    }];

    loop {
        // Find the next child of the top frame that has not been placed yet.
        let depth = stack.len() as u32;
        let next_child = loop {
            let top = stack.last_mut().expect("stack is non-empty inside loop");
            match top.pending.next() {
                Some(child_id) => {
                    let child_key = index.by_id(&child_id).map(|c| c.id.as_str());
                    if let Some(key) = child_key {
                        if visited.insert(key) {
                            break Some(key);
                        }
                    }
                    // Already placed (cycle edge or duplicate path): drop it.
                }
                None => break None,
            }
        };

        match next_child {
            Some(child_id) => {
                let category = index
                    .by_id(child_id)
                    .expect("child id came from the index")
                    .clone();
                stack.push(Frame {
                    node: CategoryNode::new(category, depth),
                    pending: sorted_ids(index, index.children_of(Some(child_id))).into_iter(),
                });
            }
            None => {
                let finished = stack.pop().expect("stack is non-empty inside loop");
                match stack.last_mut() {
                    Some(parent) => parent.node.children.push(finished.node),
                    None => return Some(finished.node),
                }
            }
        }
    }
}
