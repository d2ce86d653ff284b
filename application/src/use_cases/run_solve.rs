//! Run Solve use case
//!
//! Sends the task to every active model at once and records each outcome.

use crate::config::RunConfig;
use crate::ports::artifact_store::{ArtifactError, ArtifactStore};
use crate::ports::llm_gateway::{Completion, GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use pantheon_domain::{
    DomainError, MIN_QUORUM, ModelEntry, Phase, PromptTemplate, SolutionResult, SolutionsFile,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur during the solve phase
#[derive(Error, Debug)]
pub enum RunSolveError {
    #[error("No models configured")]
    NoModels,

    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(".context.json: {0}")]
    InvalidContext(#[from] DomainError),

    #[error("Only {succeeded} model(s) succeeded. Need at least {required}.")]
    QuorumNotMet {
        succeeded: usize,
        required: usize,
        solutions: SolutionsFile,
    },
}

impl RunSolveError {
    /// Whether the run failed on its inputs rather than on model outcomes
    pub fn is_input_error(&self) -> bool {
        !matches!(self, RunSolveError::QuorumNotMet { .. })
    }
}

/// Use case for the solve phase
///
/// Loads `.context.json`, dispatches one prompt per model concurrently, and
/// writes `.solutions.json` when at least [`MIN_QUORUM`] models succeed.
pub struct RunSolveUseCase<G: LlmGateway + 'static, S: ArtifactStore + 'static> {
    gateway: Arc<G>,
    store: Arc<S>,
}

impl<G: LlmGateway + 'static, S: ArtifactStore + 'static> RunSolveUseCase<G, S> {
    pub fn new(gateway: Arc<G>, store: Arc<S>) -> Self {
        Self { gateway, store }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, config: &RunConfig) -> Result<SolutionsFile, RunSolveError> {
        self.execute_with_progress(config, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        config: &RunConfig,
        progress: &dyn ProgressNotifier,
    ) -> Result<SolutionsFile, RunSolveError> {
        if config.models.is_empty() {
            return Err(RunSolveError::NoModels);
        }

        let context = self.store.load_context()?;
        context.validate()?;

        let prompt = Arc::new(PromptTemplate::solve(&context));
        info!(
            "Dispatching task to {} models: {}",
            config.models.len(),
            config
                .models
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        debug!("Solve prompt length: ~{} tokens", prompt.len() / 4);

        let solutions = self.dispatch(config, prompt, progress).await;

        let succeeded = solutions.success_count();
        if succeeded < MIN_QUORUM {
            return Err(RunSolveError::QuorumNotMet {
                succeeded,
                required: MIN_QUORUM,
                solutions,
            });
        }

        self.store.save_solutions(&solutions)?;
        info!(
            "{}/{} models succeeded; solutions written to {}",
            succeeded,
            config.models.len(),
            Phase::Solve.artifact()
        );
        Ok(solutions)
    }

    /// Query every model in parallel and keep results in dispatch order
    async fn dispatch(
        &self,
        config: &RunConfig,
        prompt: Arc<String>,
        progress: &dyn ProgressNotifier,
    ) -> SolutionsFile {
        progress.on_phase_start(&Phase::Solve, config.models.len());

        let mut join_set = JoinSet::new();

        for (index, model) in config.models.iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let model = model.clone();
            let prompt = Arc::clone(&prompt);
            let max_tokens = config.solve_max_tokens;

            join_set.spawn(async move {
                let result = Self::query_model(&gateway, &model, &prompt, max_tokens).await;
                (index, model, result)
            });
        }

        let mut slots: Vec<Option<SolutionResult>> = vec![None; config.models.len()];

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, model, Ok(completion))) => {
                    info!(
                        "Model {} responded ({} tokens)",
                        model.name, completion.tokens_used
                    );
                    progress.on_task_complete(&Phase::Solve, &model.name, true);
                    slots[index] = Some(SolutionResult::success(
                        model.name,
                        completion.text,
                        completion.tokens_used,
                    ));
                }
                Ok((index, model, Err(e))) => {
                    warn!("Model {} failed: {}", model.name, e);
                    progress.on_task_complete(&Phase::Solve, &model.name, false);
                    slots[index] = Some(SolutionResult::failure(model.name, e.to_string()));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        progress.on_phase_complete(&Phase::Solve);

        let solutions = slots
            .into_iter()
            .zip(&config.models)
            .map(|(slot, model)| {
                slot.unwrap_or_else(|| SolutionResult::failure(&model.name, "task did not complete"))
            })
            .collect();
        SolutionsFile::new(solutions)
    }

    async fn query_model(
        gateway: &G,
        model: &ModelEntry,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<Completion, GatewayError> {
        debug!("[{}] starting ({})", model.name, model.model_id);
        gateway.complete(&model.model_id, prompt, max_tokens).await
    }
}
