//! Route definitions.

mod catalog;
mod health;

use axum::Router;

use crate::AppState;

/// Assemble all application routes.
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(catalog::routes())
}
