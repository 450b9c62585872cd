// src/routes/mod.rs
pub mod chat;

use std::path::Path;

use crate::state::SharedState;
use axum::{
    Router,
    http::{Method, header},
    routing::{get, post},
};
use chat::{chat_handler, method_not_allowed, preflight_handler};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn create_router() -> Router<SharedState> {
    let chat = post(chat_handler)
        .options(preflight_handler)
        .fallback(method_not_allowed);

    Router::new()
        .route("/api/chat", chat)
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

/// Serves the dashboard bundle for every path the API does not handle.
pub fn with_dashboard(router: Router<SharedState>, dir: impl AsRef<Path>) -> Router<SharedState> {
    router.fallback_service(ServeDir::new(dir))
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
