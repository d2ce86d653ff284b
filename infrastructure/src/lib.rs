//! Infrastructure layer for pantheon
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration file loading.

pub mod artifacts;
pub mod config;
pub mod gateway;

// Re-export commonly used types
pub use artifacts::JsonArtifactStore;
pub use config::{
    API_KEY_ENV, ConfigError, ConfigLoader, ConfigSource, DEFAULT_BASE_URL, FileConfig,
    FileGatewayConfig, FileLimitsConfig, mask_key,
};
pub use gateway::AiGatewayClient;
