//! Wire types for the OpenAI-compatible `/chat/completions` endpoint

use pantheon_application::{Completion, GatewayError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ChatRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
}

impl<'a> ChatRequest<'a> {
    /// Single user turn carrying the whole prompt
    pub fn user(model: &'a str, prompt: &'a str, max_tokens: u32) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub total_tokens: u64,
}

impl ChatResponse {
    /// First choice's text plus total token usage (0 when not reported)
    pub fn into_completion(self) -> Result<Completion, GatewayError> {
        let tokens = self.usage.map(|u| u.total_tokens).unwrap_or(0);
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or(GatewayError::EmptyResponse)?;
        Ok(Completion::new(
            choice.message.content.unwrap_or_default(),
            tokens,
        ))
    }
}
