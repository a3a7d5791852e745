//! Database operations for the catalog tables.
//!
//! Bulk mutations are issued as single batched statements over `= ANY($1)`
//! and return the ids they actually touched, so callers can report per-id
//! outcomes instead of one boolean.

use crate::db::{CategoryRow, ProductRow};
use sqlx::PgPool;
use trellis_engine::Category;

/// Load the full category snapshot.
pub async fn list_categories(pool: &PgPool) -> Result<Vec<CategoryRow>, sqlx::Error> {
    sqlx::query_as::<_, CategoryRow>(
        r#"
        SELECT id, name, parent_id, level, sort_order, is_visible,
               include_subcategory_products, slug, created_at, updated_at
        FROM categories
        ORDER BY name ASC
        "#,
    )
    .fetch_all(pool)
    .await
}

/// Load products whose primary category is in the given scope set.
pub async fn list_products_in_scope(
    pool: &PgPool,
    scope: &[String],
) -> Result<Vec<ProductRow>, sqlx::Error> {
    sqlx::query_as::<_, ProductRow>(
        r#"
        SELECT id, name, sku, category_id, is_visible, attributes, created_at
        FROM products
        WHERE category_id = ANY($1)
        ORDER BY name ASC
        "#,
    )
    .bind(scope)
    .fetch_all(pool)
    .await
}

/// Check that a category id exists.
pub async fn category_exists(pool: &PgPool, id: &str) -> Result<bool, sqlx::Error> {
    let result: (bool,) =
        sqlx::query_as(r#"SELECT EXISTS(SELECT 1 FROM categories WHERE id = $1)"#)
            .bind(id)
            .fetch_one(pool)
            .await?;

    Ok(result.0)
}

/// Insert a category.
pub async fn insert_category(pool: &PgPool, category: &Category) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO categories (
            id, name, parent_id, level, sort_order, is_visible,
            include_subcategory_products, slug
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(&category.id)
    .bind(&category.name)
    .bind(&category.parent_id)
    .bind(category.level as i32)
    .bind(category.order)
    .bind(category.is_visible)
    .bind(category.include_subcategory_products)
    .bind(&category.slug)
    .execute(pool)
    .await?;

    Ok(())
}

/// Patch a category; `None` fields are left unchanged.
#[allow(clippy::too_many_arguments)]
pub async fn update_category(
    pool: &PgPool,
    id: &str,
    name: Option<&str>,
    parent_id: Option<&str>,
    sort_order: Option<i32>,
    is_visible: Option<bool>,
    include_subcategory_products: Option<bool>,
    slug: Option<&str>,
) -> Result<Option<CategoryRow>, sqlx::Error> {
    sqlx::query_as::<_, CategoryRow>(
        r#"
        UPDATE categories SET
            name = COALESCE($2, name),
            parent_id = COALESCE($3, parent_id),
            sort_order = COALESCE($4, sort_order),
            is_visible = COALESCE($5, is_visible),
            include_subcategory_products = COALESCE($6, include_subcategory_products),
            slug = COALESCE($7, slug),
            updated_at = now()
        WHERE id = $1
        RETURNING id, name, parent_id, level, sort_order, is_visible,
                  include_subcategory_products, slug, created_at, updated_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(parent_id)
    .bind(sort_order)
    .bind(is_visible)
    .bind(include_subcategory_products)
    .bind(slug)
    .fetch_optional(pool)
    .await
}

/// Insert a product.
pub async fn insert_product(
    pool: &PgPool,
    id: &str,
    name: &str,
    sku: &str,
    category_id: Option<&str>,
    attributes: &serde_json::Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO products (id, name, sku, category_id, attributes)
        VALUES ($1, $2, $3, $4, $5)
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(sku)
    .bind(category_id)
    .bind(attributes)
    .execute(pool)
    .await?;

    Ok(())
}

/// Patch a product; `None` fields are left unchanged.
pub async fn update_product(
    pool: &PgPool,
    id: &str,
    name: Option<&str>,
    sku: Option<&str>,
    category_id: Option<&str>,
    attributes: Option<&serde_json::Value>,
) -> Result<Option<ProductRow>, sqlx::Error> {
    sqlx::query_as::<_, ProductRow>(
        r#"
        UPDATE products SET
            name = COALESCE($2, name),
            sku = COALESCE($3, sku),
            category_id = COALESCE($4, category_id),
            attributes = COALESCE($5, attributes)
        WHERE id = $1
        RETURNING id, name, sku, category_id, is_visible, attributes, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(sku)
    .bind(category_id)
    .bind(attributes)
    .fetch_optional(pool)
    .await
}

// ---------------------------------------------------------------------------
// Batched bulk mutations
// ---------------------------------------------------------------------------

/// Set visibility for a batch of categories. Returns the ids actually updated.
pub async fn set_category_visibility(
    pool: &PgPool,
    ids: &[String],
    visible: bool,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        UPDATE categories SET is_visible = $2, updated_at = now()
        WHERE id = ANY($1)
        RETURNING id
        "#,
    )
    .bind(ids)
    .bind(visible)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Set visibility for a batch of products. Returns the ids actually updated.
pub async fn set_product_visibility(
    pool: &PgPool,
    ids: &[String],
    visible: bool,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        UPDATE products SET is_visible = $2
        WHERE id = ANY($1)
        RETURNING id
        "#,
    )
    .bind(ids)
    .bind(visible)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Re-parent a batch of categories. Returns the ids actually moved.
pub async fn move_categories(
    pool: &PgPool,
    ids: &[String],
    target: Option<&str>,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        UPDATE categories SET parent_id = $2, updated_at = now()
        WHERE id = ANY($1)
        RETURNING id
        "#,
    )
    .bind(ids)
    .bind(target)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Re-categorize a batch of products. Returns the ids actually moved.
pub async fn move_products(
    pool: &PgPool,
    ids: &[String],
    target: Option<&str>,
) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> = sqlx::query_as(
        r#"
        UPDATE products SET category_id = $2
        WHERE id = ANY($1)
        RETURNING id
        "#,
    )
    .bind(ids)
    .bind(target)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Delete a batch of categories. Returns the ids actually deleted.
pub async fn delete_categories(pool: &PgPool, ids: &[String]) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> =
        sqlx::query_as(r#"DELETE FROM categories WHERE id = ANY($1) RETURNING id"#)
            .bind(ids)
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}

/// Delete a batch of products. Returns the ids actually deleted.
pub async fn delete_products(pool: &PgPool, ids: &[String]) -> Result<Vec<String>, sqlx::Error> {
    let rows: Vec<(String,)> =
        sqlx::query_as(r#"DELETE FROM products WHERE id = ANY($1) RETURNING id"#)
            .bind(ids)
            .fetch_all(pool)
            .await?;

    Ok(rows.into_iter().map(|(id,)| id).collect())
}
