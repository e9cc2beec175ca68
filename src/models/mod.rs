//! Data models for the relay surface and the upstream Chat Completions API.
//!
//! This module groups two submodules:
//! - `relay`: the browser-facing `ChatRequest` / `ChatResponse` payloads.
//! - `chat`: the subset of the OpenAI Chat Completions request sent upstream.
//!
//! The mapping between the two is implemented in `crate::conversion`.

pub mod chat;
pub mod relay;

pub use chat::{ChatCompletionRequest, ChatMessage, Role};
pub use relay::{ChatRequest, ChatResponse};
