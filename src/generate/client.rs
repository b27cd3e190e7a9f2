//! HTTP client for the generation endpoint
//!
//! Speaks one of two wire formats, selected by [`WireFormat`]:
//!
//! - chat completions: an OpenAI-style request with a bearer credential, a
//!   fixed system message and the base document plus instruction as the user
//!   message; the rewrite is read from `choices[0].message.content`.
//! - proxy: `{ "baseContent", "prompt" }` posted to a relay that answers
//!   `{ "result" }` or `{ "error" }`.
//!
//! Response parsing is split out into pure functions over `(status, body)`
//! so it can be tested without a server.

use crate::config::WireFormat;
use log::{debug, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

const SYSTEM_MESSAGE: &str = "You are a helpful assistant that transforms content based on user instructions. Always provide output in clean Markdown format.";
const TEMPERATURE: f32 = 0.7;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors from a single generation request.
///
/// These are scoped to the variant that issued the request; they never
/// affect other variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// A required endpoint setting is blank
    ConfigurationMissing(&'static str),
    /// The request never produced an HTTP response
    NetworkFailure(String),
    /// The endpoint answered with a non-success status
    Api { status: u16, message: String },
    /// The endpoint answered 2xx but the body is not in the expected shape
    MalformedResponse(String),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::ConfigurationMissing(field) => write!(
                f,
                "API is not configured: missing {}. Set it with `contentmorph config set`",
                field
            ),
            GenerationError::NetworkFailure(msg) => write!(
                f,
                "Network request failed: {}. Check that the API URL is correct, the network is reachable, and whether a proxy is required",
                msg
            ),
            GenerationError::Api { status, message } => {
                write!(f, "API request failed ({}): {}", status, message)
            }
            GenerationError::MalformedResponse(msg) => {
                write!(f, "Unexpected API response: {}", msg)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::NetworkFailure(err.to_string())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Endpoint configuration injected into the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub format: WireFormat,
}

// ─────────────────────────────────────────────────────────────────────────────
// Generator Trait
// ─────────────────────────────────────────────────────────────────────────────

/// Something that turns a base document and an instruction into a rewrite.
pub trait Generator: Send + Sync {
    fn generate(&self, base_content: &str, prompt: &str) -> Result<String, GenerationError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Wire Types
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProxyRequest<'a> {
    base_content: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct ProxyResponse {
    result: Option<String>,
    error: Option<String>,
}

/// The user message sent with a chat completions request.
pub fn user_message(base_content: &str, prompt: &str) -> String {
    format!(
        "CONTEXT:\n{}\n\nINSTRUCTION:\n{}\n\nProvide the output in clean Markdown format only.",
        base_content, prompt
    )
}

fn chat_request<'a>(model: &'a str, base_content: &str, prompt: &str) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: SYSTEM_MESSAGE.to_string(),
            },
            ChatMessage {
                role: "user",
                content: user_message(base_content, prompt),
            },
        ],
        temperature: TEMPERATURE,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Response Parsing
// ─────────────────────────────────────────────────────────────────────────────

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

fn non_empty(content: Option<&str>) -> Result<String, GenerationError> {
    match content {
        Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
        Some(_) => Err(GenerationError::MalformedResponse(
            "generated content is empty".to_string(),
        )),
        None => Err(GenerationError::MalformedResponse(
            "response contains no generated content".to_string(),
        )),
    }
}

/// Parse a chat completions response.
///
/// Non-2xx statuses use `error.message` from the body when present.
pub fn parse_chat_response(status: u16, body: &str) -> Result<String, GenerationError> {
    let parsed: Option<Value> = serde_json::from_str(body).ok();

    if !is_success(status) {
        let message = parsed
            .as_ref()
            .and_then(|v| v.pointer("/error/message"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("HTTP status {}", status));
        return Err(GenerationError::Api { status, message });
    }

    let value = parsed.ok_or_else(|| {
        GenerationError::MalformedResponse("response body is not valid JSON".to_string())
    })?;
    non_empty(
        value
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str),
    )
}

/// Parse a proxy response: `{ "result" }` on success, `{ "error" }` otherwise.
pub fn parse_proxy_response(status: u16, body: &str) -> Result<String, GenerationError> {
    let parsed: Option<ProxyResponse> = serde_json::from_str(body).ok();

    if !is_success(status) {
        let message = parsed
            .and_then(|r| r.error)
            .unwrap_or_else(|| format!("HTTP status {}", status));
        return Err(GenerationError::Api { status, message });
    }

    let response = parsed.ok_or_else(|| {
        GenerationError::MalformedResponse("response body is not valid JSON".to_string())
    })?;
    if let Some(message) = response.error {
        return Err(GenerationError::Api { status, message });
    }
    non_empty(response.result.as_deref())
}

// ─────────────────────────────────────────────────────────────────────────────
// HTTP Client
// ─────────────────────────────────────────────────────────────────────────────

/// Blocking HTTP generator. Each call is one POST; there are no retries.
pub struct GenerationClient {
    http: Client,
    config: ApiConfig,
}

impl GenerationClient {
    pub fn new(config: ApiConfig) -> Result<Self, GenerationError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { http, config })
    }
}

impl Generator for GenerationClient {
    fn generate(&self, base_content: &str, prompt: &str) -> Result<String, GenerationError> {
        let config = &self.config;
        if config.endpoint.is_empty() {
            return Err(GenerationError::ConfigurationMissing("API URL"));
        }

        let request = self.http.post(&config.endpoint);
        let request = match config.format {
            WireFormat::ChatCompletions => request
                .bearer_auth(&config.api_key)
                .json(&chat_request(&config.model, base_content, prompt)),
            WireFormat::Proxy => request.json(&ProxyRequest {
                base_content,
                prompt,
            }),
        };

        debug!("POST {} ({:?})", config.endpoint, config.format);
        let response = request.send().map_err(|e| {
            warn!("Generation request to {} failed: {}", config.endpoint, e);
            GenerationError::from(e)
        })?;
        let status = response.status().as_u16();
        let body = response.text()?;

        match config.format {
            WireFormat::ChatCompletions => parse_chat_response(status, &body),
            WireFormat::Proxy => parse_proxy_response(status, &body),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
