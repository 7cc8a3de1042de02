use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use pagetalk_provider::ModelProvider;
use serde_json::{json, Value};

use crate::relay;

/// Shared state for the relay routes. One instance per process; every chat
/// turn is an independent pipeline over it.
#[derive(Clone)]
pub struct GatewayState {
    /// Injected model backend. Tests substitute a scripted provider here.
    pub provider: Arc<dyn ModelProvider>,
    pub model: String,
    /// Token budget handed to the history truncator.
    pub context_limit_tokens: usize,
}

/// CORS headers attached to every `/api/chat` response, including errors.
pub(crate) fn cors_headers() -> [(&'static str, &'static str); 3] {
    [
        ("access-control-allow-origin", "*"),
        ("access-control-allow-methods", "POST, OPTIONS"),
        ("access-control-allow-headers", "Content-Type"),
    ]
}

/// Build the relay router.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route(
            "/api/chat",
            post(relay::chat)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .route("/api/health", get(health))
        .with_state(state)
}

/// CORS preflight terminal response.
async fn preflight() -> impl IntoResponse {
    (StatusCode::NO_CONTENT, cors_headers())
}

async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        cors_headers(),
        "Method Not Allowed",
    )
}

/// Health check endpoint.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "pagetalk",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
