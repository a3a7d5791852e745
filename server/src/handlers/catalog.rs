//! Category and product CRUD endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use trellis_engine::{Category, Product};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::db;
use crate::error::{AppError, Result};
use crate::AppState;

/// Payload for creating a category.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryCreate {
    pub name: String,
    pub parent_id: Option<String>,
    pub order: Option<i32>,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub include_subcategory_products: bool,
    pub slug: Option<String>,
}

/// Payload for updating a category. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub parent_id: Option<String>,
    pub order: Option<i32>,
    pub is_visible: Option<bool>,
    pub include_subcategory_products: Option<bool>,
    pub slug: Option<String>,
}

/// Payload for creating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub sku: String,
    pub category_id: Option<String>,
    #[serde(default)]
    pub attributes: Value,
}

/// Payload for updating a product. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub category_id: Option<String>,
    pub attributes: Option<Value>,
}

fn default_true() -> bool {
    true
}

/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<CategoryCreate>,
) -> Result<(StatusCode, Json<Category>)> {
    let level = match &body.parent_id {
        Some(parent_id) => {
            let rows = db::list_categories(&state.pool).await?;
            let parent = rows
                .iter()
                .find(|row| row.id == *parent_id)
                .ok_or_else(|| {
                    AppError::BadRequest(format!("Parent category '{parent_id}' does not exist"))
                })?;
            parent.level.max(0) as u32 + 1
        }
        None => 0,
    };

    let category = Category {
        id: Uuid::new_v4().to_string(),
        name: body.name,
        parent_id: body.parent_id,
        level,
        order: body.order,
        is_visible: body.is_visible,
        include_subcategory_products: body.include_subcategory_products,
        slug: body.slug,
        extra: serde_json::Map::new(),
    };

    db::insert_category(&state.pool, &category).await?;
    tracing::info!("Created category {} ({})", category.name, category.id);

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<CategoryUpdate>,
) -> Result<Json<Category>> {
    if let Some(parent_id) = &body.parent_id {
        if *parent_id == id {
            return Err(AppError::BadRequest(
                "A category cannot be its own parent".to_string(),
            ));
        }
        if !db::category_exists(&state.pool, parent_id).await? {
            return Err(AppError::BadRequest(format!(
                "Parent category '{parent_id}' does not exist"
            )));
        }
    }

    let row = db::update_category(
        &state.pool,
        &id,
        body.name.as_deref(),
        body.parent_id.as_deref(),
        body.order,
        body.is_visible,
        body.include_subcategory_products,
        body.slug.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Category '{id}' not found")))?;

    Ok(Json(row.to_category()))
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<ProductCreate>,
) -> Result<(StatusCode, Json<Product>)> {
    if let Some(category_id) = &body.category_id {
        if !db::category_exists(&state.pool, category_id).await? {
            return Err(AppError::BadRequest(format!(
                "Category '{category_id}' does not exist"
            )));
        }
    }

    let attributes = match body.attributes {
        Value::Null => Value::Object(serde_json::Map::new()),
        other => other,
    };

    let id = Uuid::new_v4().to_string();
    db::insert_product(
        &state.pool,
        &id,
        &body.name,
        &body.sku,
        body.category_id.as_deref(),
        &attributes,
    )
    .await?;
    tracing::info!("Created product {} ({})", body.name, id);

    let extra = match attributes {
        Value::Object(map) => map,
        _ => serde_json::Map::new(),
    };

    Ok((
        StatusCode::CREATED,
        Json(Product {
            id,
            name: body.name,
            sku: body.sku,
            category_id: body.category_id,
            extra,
        }),
    ))
}

/// PUT /products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<ProductUpdate>,
) -> Result<Json<Product>> {
    if let Some(category_id) = &body.category_id {
        if !db::category_exists(&state.pool, category_id).await? {
            return Err(AppError::BadRequest(format!(
                "Category '{category_id}' does not exist"
            )));
        }
    }

    let row = db::update_product(
        &state.pool,
        &id,
        body.name.as_deref(),
        body.sku.as_deref(),
        body.category_id.as_deref(),
        body.attributes.as_ref(),
    )
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Product '{id}' not found")))?;

    Ok(Json(row.to_product()))
}
