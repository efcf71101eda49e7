use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::controller::JsonController;
use crate::di::{Container, Injectable};
use crate::error::Result;

/// Builds the HTTP surface from a populated container.
pub fn build_router(container: &Container) -> Result<Router> {
    let json_controller = Arc::new(JsonController::inject(container)?);

    Ok(Router::new()
        .route("/health", get(health))
        .nest(JsonController::base_path(), JsonController::router(json_controller))
        .layer(TraceLayer::new_for_http()))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
