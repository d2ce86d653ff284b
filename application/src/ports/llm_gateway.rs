//! LLM Gateway port
//!
//! Defines the interface for sending a prompt to a model and getting text back.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during a completion request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("No API key configured (set one with `pantheon config set-key` or AI_GATEWAY_API_KEY)")]
    MissingApiKey,

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Timeout")]
    Timeout,

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Model returned no choices")]
    EmptyResponse,

    #[error("Other error: {0}")]
    Other(String),
}

/// Text produced by one completion request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completion {
    pub text: String,
    /// Total tokens billed for the request, 0 when the provider did not say
    pub tokens_used: u64,
}

impl Completion {
    pub fn new(text: impl Into<String>, tokens_used: u64) -> Self {
        Self {
            text: text.into(),
            tokens_used,
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer talks to models.
/// Implementations (adapters) live in the infrastructure layer and own
/// whatever timeout policy applies. Adapters never retry; only the judge
/// loop in the evaluate use case asks a model a second time.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send `prompt` to the model routed by `model_id` ("provider/model")
    async fn complete(
        &self,
        model_id: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<Completion, GatewayError>;
}
