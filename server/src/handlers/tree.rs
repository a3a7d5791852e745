//! Category tree endpoint.
//!
//! Loads the category snapshot, builds the forest, and optionally filters it
//! by a search term. Snapshot diagnostics (duplicates, orphans, cycles) are
//! logged and returned alongside the tree so the admin UI can surface them.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use trellis_engine::{filter, CategoryNode, Diagnostic, TreeBuilder};

use crate::auth::AuthUser;
use crate::db;
use crate::error::Result;
use crate::AppState;

/// Query parameters for the tree endpoint.
#[derive(Debug, Deserialize)]
pub struct TreeQuery {
    /// Optional search term; matches are returned with their full ancestor
    /// chains
    pub q: Option<String>,
}

/// The tree endpoint response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeResponse {
    pub roots: Vec<CategoryNode>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub diagnostics: Vec<Diagnostic>,
}

/// GET /categories/tree
pub async fn get_tree(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(query): Query<TreeQuery>,
) -> Result<Json<TreeResponse>> {
    let rows = db::list_categories(&state.pool).await?;
    let categories: Vec<_> = rows.iter().map(|row| row.to_category()).collect();

    let forest = TreeBuilder::build(&categories);
    for diagnostic in &forest.diagnostics {
        tracing::warn!("Category snapshot issue: {}", diagnostic);
    }

    let roots = match query.q.as_deref() {
        Some(term) if !term.trim().is_empty() => filter(&forest.roots, term),
        _ => forest.roots,
    };

    Ok(Json(TreeResponse {
        roots,
        diagnostics: forest.diagnostics,
    }))
}
