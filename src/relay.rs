use http::header;
use serde_json::{json, Value};

use crate::config::RelayConfig;
use crate::conversion::{reply_from_bytes, to_upstream_request};
use crate::error::RelayError;
use crate::models::relay::{ChatRequest, ChatResponse};

/// Forward one prompt upstream and return the assistant reply.
///
/// Fails fast without any network traffic when no key is configured. Never
/// retries; every exit path drops the single upstream response.
pub async fn relay_chat(
    client: &reqwest::Client,
    config: &RelayConfig,
    req: &ChatRequest,
) -> Result<ChatResponse, RelayError> {
    let api_key = config.api_key.as_deref().ok_or(RelayError::MissingApiKey)?;

    let payload = to_upstream_request(req, &config.default_model);
    tracing::debug!(
        model = %payload.model,
        max_tokens = ?payload.max_tokens,
        prompt_chars = req.prompt.chars().count(),
        "relaying chat request upstream"
    );

    let resp = client
        .post(&config.upstream_url)
        .header(header::CONTENT_TYPE, "application/json")
        .bearer_auth(api_key)
        .json(&payload)
        .send()
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "upstream request failed");
            e
        })?;

    let status = resp.status();
    let bytes = resp.bytes().await?;

    if status.is_client_error() || status.is_server_error() {
        tracing::warn!(status = status.as_u16(), "upstream returned an error status");
        return Err(RelayError::UpstreamStatus {
            status: status.as_u16(),
            body: upstream_error_body(&bytes),
        });
    }

    let reply = reply_from_bytes(&bytes).map_err(|e| {
        tracing::warn!(reason = %e, "could not extract reply from upstream response");
        e
    })?;
    Ok(ChatResponse { reply })
}

/// Upstream error bodies are forwarded as JSON when they parse, else wrapped as `{"error": text}`.
fn upstream_error_body(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| json!({ "error": String::from_utf8_lossy(bytes) }))
}
