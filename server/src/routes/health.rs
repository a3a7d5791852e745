//! Health check routes.

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};

use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
}

async fn root() -> &'static str {
    "Trellis Catalog Server"
}

async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "trellis-server",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
