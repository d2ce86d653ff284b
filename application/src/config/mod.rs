//! Application-level configuration.

pub mod run_config;

pub use run_config::{DEFAULT_JUDGE_MAX_TOKENS, DEFAULT_SOLVE_MAX_TOKENS, RunConfig};
