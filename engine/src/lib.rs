//! # Trellis Engine
//!
//! The algorithmic core of the Trellis catalog administration tool.
//!
//! This crate turns flat, parent-referencing category lists into rooted,
//! ordered forests, filters those forests while preserving ancestor context,
//! resolves which category ids participate in a product listing, partitions
//! products by category, and coordinates bulk mutations with explicit
//! partial-failure reporting.
//!
//! ## Design Principles
//!
//! - **No IO**: tree building, filtering, scoping, and grouping are pure,
//!   synchronous transforms over snapshots
//! - **Never throws on malformed data**: duplicate ids, orphaned parents, and
//!   parent cycles degrade via documented policies and surface as
//!   [`Diagnostic`] values, because a tree still has to render
//! - **Deterministic**: the same category snapshot always produces the same
//!   forest, the same scope set, the same grouping
//! - **Caller-owned state**: the engine never mutates its inputs; expanded-node
//!   sets and other UI state stay with the caller
//!
//! ## Core Concepts
//!
//! ### Categories and Products
//!
//! A [`Category`] references its parent by id (`None` means root). A
//! [`Product`] belongs to at most one category directly. Both carry a
//! flattened passthrough map for fields the engine does not interpret.
//!
//! ### Index
//!
//! [`CategoryIndex`] is the arena built in one O(n) pass: constant-time lookup
//! by id plus unsorted children buckets. Everything else consumes it.
//!
//! ### Forest
//!
//! [`TreeBuilder`] produces a [`Forest`] of [`CategoryNode`]s with a fixed
//! sibling ordering, using an explicit stack so pathological depth cannot
//! exhaust the call stack. [`filter`] prunes a forest down to root-to-match
//! paths for a search term.
//!
//! ### Scope
//!
//! [`resolve_scope`] answers "which category ids participate in this product
//! listing" for a category plus an explicit recursion flag. The result feeds
//! an external `category in (...)` query; the engine never queries products
//! itself.
//!
//! ### Bulk operations
//!
//! [`BulkCoordinator`] is the single effectful component. It issues one
//! batched mutation through a [`MutationBackend`] and reports success or
//! failure per id via [`OutcomeReport`], never collapsing partial failure
//! into a single boolean.
//!
//! ## Quick Start
//!
//! ```rust
//! use trellis_engine::{filter, resolve_scope, Category, CategoryIndex, TreeBuilder};
//!
//! let categories = vec![
//!     Category::new("fruit", "Fruit", None),
//!     Category::new("citrus", "Citrus", Some("fruit")),
//!     Category::new("lemons", "Lemons", Some("citrus")),
//! ];
//!
//! let forest = TreeBuilder::build(&categories);
//! assert_eq!(forest.roots.len(), 1);
//! assert_eq!(forest.roots[0].category.id, "fruit");
//!
//! // Filtering keeps the whole ancestor chain of a match.
//! let pruned = filter(&forest.roots, "lemon");
//! assert_eq!(pruned[0].category.id, "fruit");
//!
//! // Scope resolution for "include subcategory products".
//! let index = CategoryIndex::build(&categories);
//! let scope = resolve_scope("fruit", true, &index);
//! assert_eq!(scope.len(), 3);
//! ```

pub mod bulk;
pub mod category;
pub mod diagnostics;
pub mod filter;
pub mod group;
pub mod index;
pub mod scope;
pub mod tree;

// Re-export main types at crate root
pub use bulk::{
    BulkCoordinator, BulkOp, BulkRequest, BulkResponse, BulkState, FailureKind, IdOutcome,
    MutationBackend, OutcomeReport, TransportError,
};
pub use category::{Category, Product};
pub use diagnostics::Diagnostic;
pub use filter::filter;
pub use group::group;
pub use index::CategoryIndex;
pub use scope::resolve_scope;
pub use tree::{CategoryNode, Forest, TreeBuilder};

/// Type aliases for clarity
pub type CategoryId = String;
pub type ProductId = String;
