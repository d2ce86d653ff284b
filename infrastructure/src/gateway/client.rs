//! HTTP client for the AI gateway

use super::types::{ChatRequest, ChatResponse};
use crate::config::FileConfig;
use async_trait::async_trait;
use pantheon_application::{Completion, GatewayError, LlmGateway};
use pantheon_domain::clip_chars;
use std::time::Duration;
use tracing::debug;

/// Longest error body kept in a [`GatewayError::Http`]
const MAX_ERROR_BODY: usize = 500;

/// [`LlmGateway`] over an OpenAI-compatible chat completions endpoint
pub struct AiGatewayClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl AiGatewayClient {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("pantheon/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from the loaded configuration; fails without an API key
    pub fn from_config(config: &FileConfig) -> Result<Self, GatewayError> {
        let api_key = config.api_key().ok_or(GatewayError::MissingApiKey)?;
        Self::new(
            api_key,
            config.gateway.base_url.clone(),
            Duration::from_secs(config.gateway.timeout_seconds),
        )
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::ConnectionError(e.to_string())
    }
}

#[async_trait]
impl LlmGateway for AiGatewayClient {
    async fn complete(
        &self,
        model_id: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<Completion, GatewayError> {
        debug!("POST {} model={} max_tokens={}", self.endpoint(), model_id, max_tokens);

        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&ChatRequest::user(model_id, prompt, max_tokens))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::Http {
                status: status.as_u16(),
                body: clip_chars(body.trim(), MAX_ERROR_BODY).0.to_string(),
            });
        }

        let body: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                GatewayError::Timeout
            } else {
                GatewayError::InvalidResponse(e.to_string())
            }
        })?;

        body.into_completion()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Client for a local test server, bypassing any proxy settings
    fn local(api_key: &str, base_url: String) -> AiGatewayClient {
        AiGatewayClient {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(5))
                .no_proxy()
                .build()
                .unwrap(),
            base_url,
            api_key: api_key.to_string(),
        }
    }

    /// Serve one canned HTTP response and hand back the raw request
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            request
        });

        (format!("http://{}/v1", addr), handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let lower = line.to_ascii_lowercase();
                        lower
                            .strip_prefix("content-length:")
                            .map(|v| v.trim().parse::<usize>().unwrap())
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    #[tokio::test]
    async fn test_complete_success() {
        let (base_url, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"=== FILE: a.rs ===\nfn a() {}\n=== END FILE ==="}}],"usage":{"total_tokens":321}}"#,
        )
        .await;
        let client = local("sk-test", base_url);

        let completion = client
            .complete("anthropic/claude-opus-4-6", "solve it", 16384)
            .await
            .unwrap();

        assert!(completion.text.starts_with("=== FILE: a.rs ==="));
        assert_eq!(completion.tokens_used, 321);

        let request = server.await.unwrap();
        assert!(request.starts_with("POST /v1/chat/completions "));
        assert!(request.to_ascii_lowercase().contains("authorization: bearer sk-test"));
        assert!(request.contains(r#""model":"anthropic/claude-opus-4-6""#));
        assert!(request.contains(r#""max_tokens":16384"#));
    }

    #[tokio::test]
    async fn test_http_error_maps_status() {
        let (base_url, _server) =
            serve_once("401 Unauthorized", r#"{"error":{"message":"bad key"}}"#).await;
        let client = local("sk-bad", base_url);

        let err = client.complete("openai/gpt-5.2", "hi", 10).await.unwrap_err();

        match err {
            GatewayError::Http { status, body } => {
                assert_eq!(status, 401);
                assert!(body.contains("bad key"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_garbage_body_is_invalid_response() {
        let (base_url, _server) = serve_once("200 OK", "not json").await;
        let client = local("k", base_url);

        let err = client.complete("openai/gpt-5.2", "hi", 10).await.unwrap_err();

        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn test_connection_refused() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = local("k", format!("http://{}/v1", addr));

        let err = client.complete("openai/gpt-5.2", "hi", 10).await.unwrap_err();

        assert!(matches!(err, GatewayError::ConnectionError(_)));
    }

    #[test]
    fn test_from_config_requires_key() {
        let config = FileConfig {
            api_key: Some("sk-config".into()),
            ..Default::default()
        };
        let client = AiGatewayClient::from_config(&config).unwrap();
        assert_eq!(client.api_key, "sk-config");
        assert_eq!(
            client.endpoint(),
            "https://ai-gateway.vercel.sh/v1/chat/completions"
        );
    }
}
