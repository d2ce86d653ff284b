//! Run configuration passed into the use cases.
//!
//! [`RunConfig`] is built once per invocation from the loaded file config and
//! handed to [`RunSolveUseCase`](crate::use_cases::run_solve::RunSolveUseCase)
//! and [`RunEvaluateUseCase`](crate::use_cases::run_evaluate::RunEvaluateUseCase)
//! by value. Nothing in the application layer reads ambient configuration.

use pantheon_domain::{ModelEntry, default_models};
use serde::{Deserialize, Serialize};

/// Default `max_tokens` for a solve request.
pub const DEFAULT_SOLVE_MAX_TOKENS: u32 = 16384;

/// Default `max_tokens` for a judge request.
pub const DEFAULT_JUDGE_MAX_TOKENS: u32 = 4096;

/// Parameters for one solve/evaluate run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunConfig {
    /// Active roster, in dispatch order
    pub models: Vec<ModelEntry>,
    pub solve_max_tokens: u32,
    pub judge_max_tokens: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            models: default_models(),
            solve_max_tokens: DEFAULT_SOLVE_MAX_TOKENS,
            judge_max_tokens: DEFAULT_JUDGE_MAX_TOKENS,
        }
    }
}

impl RunConfig {
    pub fn new(models: Vec<ModelEntry>) -> Self {
        Self {
            models,
            ..Self::default()
        }
    }

    // ==================== Builder Methods ====================

    pub fn with_solve_max_tokens(mut self, max: u32) -> Self {
        self.solve_max_tokens = max;
        self
    }

    pub fn with_judge_max_tokens(mut self, max: u32) -> Self {
        self.judge_max_tokens = max;
        self
    }

    /// Look up an active model by display name
    pub fn model(&self, name: &str) -> Option<&ModelEntry> {
        self.models.iter().find(|m| m.name == name)
    }
}
