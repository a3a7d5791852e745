//! Catalog API routes.

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::handlers;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/categories/tree", get(handlers::tree::get_tree))
        .route(
            "/categories/{id}/products",
            get(handlers::products::get_products),
        )
        .route("/categories", post(handlers::catalog::create_category))
        .route("/categories/{id}", put(handlers::catalog::update_category))
        .route("/products", post(handlers::catalog::create_product))
        .route("/products/{id}", put(handlers::catalog::update_product))
        .route("/bulk", post(handlers::bulk::post_bulk))
}
