//! Category and product records as received from the external API layer.
//!
//! The engine consumes snapshots of these records and returns derived
//! structures. Fields it does not interpret (prices, stock, images) ride
//! along in a flattened passthrough map.

use crate::{CategoryId, ProductId};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A catalog category.
///
/// `parent_id` is a nullable reference to another category's id; `None` means
/// root. The parent graph is expected to be acyclic, but the engine verifies
/// rather than trusts this (see [`crate::tree::TreeBuilder`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Opaque unique identifier
    pub id: CategoryId,
    /// Display name, non-empty
    pub name: String,
    /// Parent category id, `None` for roots
    pub parent_id: Option<CategoryId>,
    /// Declared depth from the API (0 = root). Advisory: the built forest
    /// recomputes actual depth from structure.
    #[serde(default)]
    pub level: u32,
    /// Explicit sibling ordering key; siblings without one sort by name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
    /// Visibility is independent of structural position
    #[serde(default = "default_true")]
    pub is_visible: bool,
    /// UI default for scoping product listings to descendants. The engine
    /// never reads this itself; callers pass recursion explicitly.
    #[serde(default)]
    pub include_subcategory_products: bool,
    /// URL slug, when the API provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    /// Uninterpreted fields, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn default_true() -> bool {
    true
}

impl Category {
    /// Create a category with defaults for everything but identity and parent.
    pub fn new(
        id: impl Into<CategoryId>,
        name: impl Into<String>,
        parent_id: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: parent_id.map(str::to_string),
            level: 0,
            order: None,
            is_visible: true,
            include_subcategory_products: false,
            slug: None,
            extra: Map::new(),
        }
    }

    /// Set the explicit sibling ordering key.
    pub fn with_order(mut self, order: i32) -> Self {
        self.order = Some(order);
        self
    }

    /// Set the declared level.
    pub fn with_level(mut self, level: u32) -> Self {
        self.level = level;
        self
    }

    /// Set visibility.
    pub fn with_visibility(mut self, visible: bool) -> Self {
        self.is_visible = visible;
        self
    }

    /// Check if this category is a root (no parent reference).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// A catalog product with its primary category placement.
///
/// A product belongs to at most one category directly, never many.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Opaque unique identifier
    pub id: ProductId,
    /// Display name
    pub name: String,
    /// Stock keeping unit, used for search alongside the name
    pub sku: String,
    /// Primary category placement, `None` for uncategorized
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Richer fields (price, stock, images) the engine passes through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    /// Create a product with an optional category placement.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        sku: impl Into<String>,
        category_id: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sku: sku.into(),
            category_id: category_id.map(str::to_string),
            extra: Map::new(),
        }
    }
}
