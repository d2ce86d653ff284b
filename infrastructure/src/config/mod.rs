//! Configuration file loading for pantheon
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `--config <path>` specified file
//! 2. Project root: `./pantheon.toml` or `./.pantheon.toml`
//! 3. Global: `$XDG_CONFIG_HOME/pantheon/config.toml`
//! 4. Default values

mod error;
mod file_config;
mod loader;

pub use error::ConfigError;
pub use file_config::{
    API_KEY_ENV, DEFAULT_BASE_URL, FileConfig, FileGatewayConfig, FileLimitsConfig, mask_key,
};
pub use loader::{ConfigLoader, ConfigSource};
