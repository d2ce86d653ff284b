//! AI gateway adapter
//!
//! Implements the [`LlmGateway`](pantheon_application::LlmGateway) port by
//! POSTing to an OpenAI-compatible `/chat/completions` endpoint.

mod client;
mod types;

pub use client::AiGatewayClient;
