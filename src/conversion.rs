use crate::models::chat::{ChatCompletionRequest, ChatMessage};
use crate::models::relay::ChatRequest;
use serde_json::Value;
use thiserror::Error;

pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const TEMPERATURE: f64 = 0.7;

/// Why an upstream success body could not be turned into a reply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplyError {
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(String),
    #[error("response body is not a JSON object")]
    NotAnObject,
    #[error("No choices returned from upstream")]
    NoChoices,
    #[error("first choice is malformed")]
    MalformedChoice,
    #[error("message content is not text")]
    NonTextContent,
}

/// Map a relay request onto the upstream Chat Completions payload.
///
/// `default_model` is used when the caller names no model.
pub fn to_upstream_request(req: &ChatRequest, default_model: &str) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: req.model_or(default_model).to_string(),
        messages: vec![
            ChatMessage::system(SYSTEM_PROMPT),
            ChatMessage::user(req.prompt.clone()),
        ],
        max_tokens: Some(req.max_tokens_or_default()),
        temperature: Some(TEMPERATURE),
    }
}

/// Decode a raw upstream success body and extract the assistant reply.
pub fn reply_from_bytes(body: &[u8]) -> Result<String, ReplyError> {
    let v: Value =
        serde_json::from_slice(body).map_err(|e| ReplyError::InvalidJson(e.to_string()))?;
    extract_reply(&v)
}

/// Extract the assistant text from a Chat Completions response.
///
/// Reads `choices[0].message.content`; when that is absent or null, falls back
/// to the legacy completions field `choices[0].text`, then to an empty string.
pub fn extract_reply(v: &Value) -> Result<String, ReplyError> {
    let obj = v.as_object().ok_or(ReplyError::NotAnObject)?;

    let first = match obj.get("choices") {
        None | Some(Value::Null) => return Err(ReplyError::NoChoices),
        Some(Value::Array(choices)) => choices.first().ok_or(ReplyError::NoChoices)?,
        Some(_) => return Err(ReplyError::MalformedChoice),
    };
    let first = first.as_object().ok_or(ReplyError::MalformedChoice)?;

    let content = match first.get("message") {
        None | Some(Value::Null) => None,
        Some(Value::Object(message)) => message.get("content"),
        Some(_) => return Err(ReplyError::MalformedChoice),
    };

    match content {
        Some(Value::String(s)) => Ok(s.clone()),
        None | Some(Value::Null) => Ok(first
            .get("text")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()),
        Some(_) => Err(ReplyError::NonTextContent),
    }
}
