//! Row types bridging the catalog tables and the engine's records.

use serde_json::{Map, Value};
use sqlx::Row;
use trellis_engine::{Category, Product};

/// A category row from the database.
#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub level: i32,
    pub sort_order: Option<i32>,
    pub is_visible: bool,
    pub include_subcategory_products: bool,
    pub slug: Option<String>,
    #[allow(dead_code)]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[allow(dead_code)]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for CategoryRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(CategoryRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            parent_id: row.try_get("parent_id")?,
            level: row.try_get("level")?,
            sort_order: row.try_get("sort_order")?,
            is_visible: row.try_get("is_visible")?,
            include_subcategory_products: row.try_get("include_subcategory_products")?,
            slug: row.try_get("slug")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

impl CategoryRow {
    /// Convert the row into the engine's normalized category record.
    pub fn to_category(&self) -> Category {
        Category {
            id: self.id.clone(),
            name: self.name.clone(),
            parent_id: self.parent_id.clone(),
            level: self.level.max(0) as u32,
            order: self.sort_order,
            is_visible: self.is_visible,
            include_subcategory_products: self.include_subcategory_products,
            slug: self.slug.clone(),
            extra: Map::new(),
        }
    }
}

/// A product row from the database.
#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub category_id: Option<String>,
    pub is_visible: bool,
    /// Uninterpreted catalog fields (price, stock, images) stored as JSONB
    pub attributes: Value,
    #[allow(dead_code)]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> for ProductRow {
    fn from_row(row: &'r sqlx::postgres::PgRow) -> Result<Self, sqlx::Error> {
        Ok(ProductRow {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            sku: row.try_get("sku")?,
            category_id: row.try_get("category_id")?,
            is_visible: row.try_get("is_visible")?,
            attributes: row.try_get("attributes")?,
            created_at: row.try_get("created_at")?,
        })
    }
}

impl ProductRow {
    /// Convert the row into the engine's minimal product record.
    ///
    /// The attributes column and the visibility flag ride along in the
    /// passthrough map; the engine never interprets them.
    pub fn to_product(&self) -> Product {
        let mut extra = match &self.attributes {
            Value::Object(map) => map.clone(),
            _ => Map::new(),
        };
        extra.insert("isVisible".to_string(), Value::Bool(self.is_visible));

        Product {
            id: self.id.clone(),
            name: self.name.clone(),
            sku: self.sku.clone(),
            category_id: self.category_id.clone(),
            extra,
        }
    }
}
