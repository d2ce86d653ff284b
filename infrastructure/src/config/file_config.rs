//! Raw TOML configuration data types
//!
//! These structs mirror the config file exactly and convert into the
//! application's [`RunConfig`] once per invocation.

use pantheon_application::{DEFAULT_JUDGE_MAX_TOKENS, DEFAULT_SOLVE_MAX_TOKENS, RunConfig};
use pantheon_domain::{ModelEntry, default_models};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Environment variable consulted when the config file has no API key.
pub const API_KEY_ENV: &str = "AI_GATEWAY_API_KEY";

/// Default AI gateway endpoint (OpenAI-compatible).
pub const DEFAULT_BASE_URL: &str = "https://ai-gateway.vercel.sh/v1";

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// AI gateway API key
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model roster, in dispatch order
    pub models: Vec<ModelEntry>,
    /// HTTP client settings
    pub gateway: FileGatewayConfig,
    /// Token limits per phase
    pub limits: FileLimitsConfig,
}

/// `[gateway]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    pub base_url: String,
    /// Per-request timeout; solve answers can take minutes
    pub timeout_seconds: u64,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 600,
        }
    }
}

/// `[limits]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLimitsConfig {
    pub solve_max_tokens: u32,
    pub judge_max_tokens: u32,
}

impl Default for FileLimitsConfig {
    fn default() -> Self {
        Self {
            solve_max_tokens: DEFAULT_SOLVE_MAX_TOKENS,
            judge_max_tokens: DEFAULT_JUDGE_MAX_TOKENS,
        }
    }
}

impl FileConfig {
    /// Configured roster when it is usable, otherwise the default triple.
    pub fn active_models(&self) -> Vec<ModelEntry> {
        match ModelEntry::validate_roster(&self.models) {
            Ok(()) => self.models.clone(),
            Err(e) => {
                if !self.models.is_empty() {
                    warn!("Ignoring configured models ({}); using defaults", e);
                }
                default_models()
            }
        }
    }

    /// Whether [`active_models`](Self::active_models) falls back to the defaults
    pub fn uses_default_models(&self) -> bool {
        ModelEntry::validate_roster(&self.models).is_err()
    }

    /// API key from the file, else from `AI_GATEWAY_API_KEY`
    pub fn api_key(&self) -> Option<String> {
        resolve_api_key(self.api_key.as_deref(), std::env::var(API_KEY_ENV).ok())
    }

    /// Build the per-run configuration handed to the use cases
    pub fn to_run_config(&self) -> RunConfig {
        RunConfig::new(self.active_models())
            .with_solve_max_tokens(self.limits.solve_max_tokens)
            .with_judge_max_tokens(self.limits.judge_max_tokens)
    }
}

fn resolve_api_key(configured: Option<&str>, env: Option<String>) -> Option<String> {
    configured
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(String::from)
        .or_else(|| env.map(|key| key.trim().to_string()).filter(|key| !key.is_empty()))
}

/// Mask an API key for display: first four characters, then `...`
pub fn mask_key(key: &str) -> String {
    let prefix: String = key.chars().take(4).collect();
    format!("{}...", prefix)
}
