//! Run Evaluate use case
//!
//! Cross-judges the successful solutions anonymously and ranks them.
//!
//! ```text
//! LoadInputs → Filter (≥2 successes) → Anonymize → BuildJudgePrompt
//!   → DispatchJudges (parallel, 2 attempts each) → CollectValid (≥2)
//!   → Aggregate → Persist
//! ```

use crate::config::RunConfig;
use crate::ports::artifact_store::{ArtifactError, ArtifactStore};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use pantheon_domain::{
    DomainError, EvaluationFile, JudgeResult, Judgment, MIN_QUORUM, ModelEntry, Phase,
    PromptTemplate, SolutionResult, aggregate, parse_judge_response, shuffle_and_anonymize,
};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Attempts per judge: the base prompt, then once more with the JSON reminder.
pub const JUDGE_ATTEMPTS: usize = 2;

/// Errors that can occur during the evaluate phase
#[derive(Error, Debug)]
pub enum RunEvaluateError {
    #[error(transparent)]
    Artifact(#[from] ArtifactError),

    #[error(".context.json: {0}")]
    InvalidContext(#[from] DomainError),

    #[error("Need at least {required} successful solutions to evaluate, found {found}.")]
    NotEnoughSolutions { found: usize, required: usize },

    #[error("Fewer than {required} judges produced valid results ({valid} valid).")]
    NotEnoughJudges { valid: usize, required: usize },
}

impl RunEvaluateError {
    /// Whether the run failed on its inputs rather than on model outcomes
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            RunEvaluateError::Artifact(_) | RunEvaluateError::InvalidContext(_)
        )
    }
}

/// Why a judge was left out of aggregation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JudgeFailure {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("Malformed JSON response after {0} attempts")]
    Malformed(usize),
}

/// Settled outcome of one judge task
struct JudgeOutcome {
    attempts: usize,
    result: Result<JudgeResult, JudgeFailure>,
}

/// Use case for the evaluate phase
pub struct RunEvaluateUseCase<G: LlmGateway + 'static, S: ArtifactStore + 'static> {
    gateway: Arc<G>,
    store: Arc<S>,
}

impl<G: LlmGateway + 'static, S: ArtifactStore + 'static> RunEvaluateUseCase<G, S> {
    pub fn new(gateway: Arc<G>, store: Arc<S>) -> Self {
        Self { gateway, store }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, config: &RunConfig) -> Result<EvaluationFile, RunEvaluateError> {
        self.execute_with_progress(config, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        config: &RunConfig,
        progress: &dyn ProgressNotifier,
    ) -> Result<EvaluationFile, RunEvaluateError> {
        // LoadInputs
        let context = self.store.load_context()?;
        context.validate()?;
        let solutions_file = self.store.load_solutions()?;

        // Filter
        let successful: Vec<SolutionResult> = solutions_file.successful().cloned().collect();
        if successful.len() < MIN_QUORUM {
            return Err(RunEvaluateError::NotEnoughSolutions {
                found: successful.len(),
                required: MIN_QUORUM,
            });
        }

        // Anonymize
        let anonymized = shuffle_and_anonymize(&successful, &mut rand::thread_rng());
        for (label, model) in anonymized.map.entries() {
            debug!("{} -> {}", label, model);
        }

        // BuildJudgePrompt
        let prompt = PromptTemplate::evaluate(&context, &anonymized.solutions);
        debug!("Judge prompt length: ~{} tokens", prompt.len() / 4);

        // DispatchJudges
        let judges = Self::judge_pool(config, &successful);
        info!(
            "Dispatching evaluation to {} judges: {}",
            judges.len(),
            judges
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
        let judgments = self
            .dispatch_judges(config, &judges, prompt, progress)
            .await;

        // CollectValid
        if judgments.len() < MIN_QUORUM {
            return Err(RunEvaluateError::NotEnoughJudges {
                valid: judgments.len(),
                required: MIN_QUORUM,
            });
        }

        // Aggregate
        let aggregation = aggregate(&judgments, &anonymized.map);
        for self_score in &aggregation.self_scores {
            debug!(
                "Excluding self-score: {} judging {} (itself)",
                self_score.judge, self_score.label
            );
        }
        for (judge, index) in &aggregation.unresolved {
            warn!("Judge {} scored unknown solution {}; ignored", judge, index);
        }
        if aggregation.ranking.is_empty() {
            warn!("Every score was a self-score; ranking is empty");
        }

        // Persist
        let evaluation = EvaluationFile::new(aggregation.ranking, &judgments, anonymized.map);
        self.store.save_evaluation(&evaluation)?;

        match evaluation.ranking.first() {
            Some(top) => info!("Winner: {} ({:.2})", top.model, top.weighted_score),
            None => info!("No winner"),
        }
        Ok(evaluation)
    }

    /// Active models whose own solution succeeded, in roster order
    fn judge_pool(config: &RunConfig, successful: &[SolutionResult]) -> Vec<ModelEntry> {
        let solved: HashSet<&str> = successful.iter().map(|s| s.model.as_str()).collect();
        config
            .models
            .iter()
            .filter(|m| solved.contains(m.name.as_str()))
            .cloned()
            .collect()
    }

    /// Ask every judge in parallel; returns the valid judgments in pool order
    async fn dispatch_judges(
        &self,
        config: &RunConfig,
        judges: &[ModelEntry],
        prompt: String,
        progress: &dyn ProgressNotifier,
    ) -> Vec<Judgment> {
        progress.on_phase_start(&Phase::Evaluate, judges.len());

        let base_prompt = Arc::new(prompt);
        let mut join_set = JoinSet::new();

        for (index, judge) in judges.iter().enumerate() {
            let gateway = Arc::clone(&self.gateway);
            let judge = judge.clone();
            let base_prompt = Arc::clone(&base_prompt);
            let max_tokens = config.judge_max_tokens;

            join_set.spawn(async move {
                let outcome = Self::judge(&gateway, &judge, &base_prompt, max_tokens).await;
                (index, judge, outcome)
            });
        }

        let mut slots: Vec<Option<Judgment>> = vec![None; judges.len()];

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((index, judge, outcome)) => {
                    if outcome.attempts > 1 {
                        progress.on_retry(&Phase::Evaluate, &judge.name);
                    }
                    match outcome.result {
                        Ok(result) => {
                            info!(
                                "Judge {} scored {} solutions",
                                judge.name,
                                result.scores.len()
                            );
                            progress.on_task_complete(&Phase::Evaluate, &judge.name, true);
                            slots[index] = Some(Judgment::new(judge.name, result));
                        }
                        Err(e) => {
                            warn!("JUDGE FAILED: {}: {}", judge.name, e);
                            progress.on_task_complete(&Phase::Evaluate, &judge.name, false);
                        }
                    }
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        progress.on_phase_complete(&Phase::Evaluate);
        slots.into_iter().flatten().collect()
    }

    /// One judge: base prompt, then the JSON reminder on a second attempt.
    ///
    /// Either a transport error or an unparseable answer uses up an attempt.
    async fn judge(
        gateway: &G,
        judge: &ModelEntry,
        base_prompt: &str,
        max_tokens: u32,
    ) -> JudgeOutcome {
        let mut attempts = 0;
        let mut last_error = JudgeFailure::Malformed(0);

        while attempts < JUDGE_ATTEMPTS {
            let prompt = if attempts == 0 {
                base_prompt.to_string()
            } else {
                PromptTemplate::judge_retry(base_prompt)
            };
            attempts += 1;

            match gateway.complete(&judge.model_id, &prompt, max_tokens).await {
                Ok(completion) => {
                    if let Some(result) = parse_judge_response(&completion.text) {
                        return JudgeOutcome {
                            attempts,
                            result: Ok(result),
                        };
                    }
                    warn!("[{}] Attempt {}: malformed JSON", judge.name, attempts);
                    last_error = JudgeFailure::Malformed(attempts);
                }
                Err(e) => {
                    warn!("[{}] Attempt {}: {}", judge.name, attempts, e);
                    last_error = e.into();
                }
            }
        }

        JudgeOutcome {
            attempts,
            result: Err(last_error),
        }
    }
}
