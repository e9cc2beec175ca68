use axum::{
    extract::{rejection::JsonRejection, State},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::models::relay::{ChatRequest, ChatResponse};
use crate::relay::relay_chat;
use crate::util::{build_http_client, cors_layer};

/// Shared application state used by the HTTP handlers.
pub struct AppState {
    pub config: RelayConfig,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: RelayConfig) -> Result<Self, reqwest::Error> {
        let http = build_http_client(&config)?;
        Ok(Self { config, http })
    }
}

/// Build the Axum router with `/health` and `/api/chat`.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Liveness probe; independent of configuration.
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, RelayError> {
    let Json(req) = body?;
    let resp = relay_chat(&state.http, &state.config, &req)
        .await
        .inspect_err(|e| tracing::info!(status = e.status().as_u16(), error = %e, "chat relay failed"))?;
    Ok(Json(resp))
}
