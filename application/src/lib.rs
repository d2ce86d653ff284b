//! Application layer for pantheon
//!
//! This crate contains the solve and evaluate use cases, the ports they
//! drive, and the per-run configuration. It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{DEFAULT_JUDGE_MAX_TOKENS, DEFAULT_SOLVE_MAX_TOKENS, RunConfig};
pub use ports::{
    artifact_store::{Artifact, ArtifactError, ArtifactStore},
    llm_gateway::{Completion, GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::run_evaluate::{
    JUDGE_ATTEMPTS, JudgeFailure, RunEvaluateError, RunEvaluateUseCase,
};
pub use use_cases::run_solve::{RunSolveError, RunSolveUseCase};
