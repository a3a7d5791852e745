//! Scoped product listing endpoint.
//!
//! Resolves the category scope (the category alone, or its whole subtree)
//! with the engine, then issues a single `category_id IN (...)` query and
//! optionally partitions the results by category.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use trellis_engine::{group, resolve_scope, CategoryId, CategoryIndex, Product};

use crate::auth::AuthUser;
use crate::db;
use crate::error::{AppError, Result};
use crate::AppState;

/// Query parameters for the scoped product listing.
#[derive(Debug, Deserialize)]
pub struct ProductsQuery {
    /// Include products of descendant categories. Defaults to the category's
    /// own `includeSubcategoryProducts` flag when absent.
    pub recursive: Option<bool>,
    /// Partition the results by category.
    #[serde(default)]
    pub grouped: bool,
}

/// The scoped product listing response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub category_id: String,
    pub recursive: bool,
    /// The category ids that contributed products, in sorted order
    pub scope: Vec<CategoryId>,
    pub products: Vec<Product>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<BTreeMap<CategoryId, Vec<Product>>>,
}

/// GET /categories/{id}/products
pub async fn get_products(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(category_id): Path<String>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ProductsResponse>> {
    let rows = db::list_categories(&state.pool).await?;
    let categories: Vec<_> = rows.iter().map(|row| row.to_category()).collect();
    let index = CategoryIndex::build(&categories);

    let category = index
        .by_id(&category_id)
        .ok_or_else(|| AppError::NotFound(format!("Category '{category_id}' not found")))?;

    let recursive = query
        .recursive
        .unwrap_or(category.include_subcategory_products);

    let scope = resolve_scope(&category_id, recursive, &index);
    let scope_ids: Vec<CategoryId> = scope.iter().cloned().collect();

    let product_rows = db::list_products_in_scope(&state.pool, &scope_ids).await?;
    let products: Vec<Product> = product_rows.iter().map(|row| row.to_product()).collect();

    let groups = query.grouped.then(|| group(&products, &scope_ids));

    Ok(Json(ProductsResponse {
        category_id,
        recursive,
        scope: scope_ids,
        products,
        groups,
    }))
}
