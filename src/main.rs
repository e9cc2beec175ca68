use std::sync::Arc;

use anyhow::Context;
use chat_relay::server::{build_router, AppState};
use chat_relay::util::init_tracing;
use chat_relay::RelayConfig;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = RelayConfig::from_env();
    tracing::debug!(config = ?config, "relay configuration loaded");

    // Starting without a key is allowed for local development; /api/chat answers 500 until set.
    if config.api_key.is_none() {
        tracing::warn!("OPENAI_API_KEY is not set; /api/chat will fail until it is configured");
    }
    if config.allows_any_origin() {
        tracing::info!("CORS: any origin allowed");
    } else {
        tracing::info!(origins = ?config.allowed_origins, "CORS: restricted origins");
    }
    tracing::info!(
        upstream = %config.upstream_url,
        timeout_secs = config.request_timeout.as_secs(),
        "Upstream configured"
    );

    let addr = config.bind_addr.clone();
    let state = AppState::new(config).context("failed to build upstream HTTP client")?;
    let app = build_router(Arc::new(state));

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Chat relay listening on http://{}", addr);

    axum::serve(listener, app.into_make_service())
        .await
        .context("server error")?;
    Ok(())
}
