#![forbid(unsafe_code)]
#![doc = r#"
Chat Relay

Forward a browser chat prompt to an OpenAI-compatible Chat Completions endpoint and return the
assistant's text reply, keeping the API key server-side.

Crate highlights
- HTTP server (in `server`): `GET /health` and `POST /api/chat`.
- Library: pure mapping via `to_upstream_request(&ChatRequest, &str)` and `extract_reply(&Value)`.
- Configuration: `RelayConfig`, read once at startup and injected as router state.

Modules
- `config`: Environment-driven, immutable relay configuration.
- `models`: Relay payloads and the upstream Chat Completions request.
- `conversion`: Request mapping and reply extraction.
- `relay`: The chat relay operation (one upstream call, no retries).
- `error`: Error taxonomy and its `{"detail": ...}` HTTP mapping.
- `server`: Axum router/handlers (the binary uses this).
- `util`: Shared helpers (tracing, HTTP client, CORS).
"#]

pub mod config;
pub mod conversion;
pub mod error;
pub mod models;
pub mod relay;
pub mod server;
pub mod util;

pub use crate::config::RelayConfig;
pub use crate::conversion::{extract_reply, to_upstream_request, ReplyError};
pub use crate::error::RelayError;
pub use crate::server::{build_router, AppState};

// Re-export model namespaces for convenience (downstream users can do `use chat_relay::relay_models`).
pub use crate::models::{chat, relay as relay_models};
