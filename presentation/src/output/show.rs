//! `pantheon show` rendering, one function per mode

use crate::cli::commands::ShowMode;
use crate::output::console::ConsoleFormatter;
use crate::output::spec::SpecRenderer;
use pantheon_domain::{EvaluationFile, SolutionsFile, TaskContext};
use thiserror::Error;

/// Why a `show` mode could not render. All are input errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShowError {
    #[error("No evaluation found. Run `pantheon evaluate` first.")]
    NoEvaluation,

    #[error("Evaluation has no winner")]
    NoWinner,

    #[error("No successful solution for model '{model}'. Available: {available}")]
    ModelNotFound { model: String, available: String },
}

/// Render `mode` from the loaded artifacts
pub fn render(
    mode: &ShowMode,
    solutions: &SolutionsFile,
    evaluation: Option<&EvaluationFile>,
    context: Option<&TaskContext>,
) -> Result<String, ShowError> {
    match mode {
        ShowMode::Winner => {
            let evaluation = evaluation.ok_or(ShowError::NoEvaluation)?;
            if !evaluation.has_winner() {
                return Err(ShowError::NoWinner);
            }
            solution(solutions, Some(evaluation), &evaluation.winner, false)
        }
        ShowMode::All => {
            let output = solutions
                .successful()
                .map(|s| {
                    let score = evaluation.and_then(|e| e.score_of(&s.model));
                    ConsoleFormatter::solution(&s.model, &s.content, score, false)
                })
                .collect();
            Ok(output)
        }
        ShowMode::Rationales => Ok(ConsoleFormatter::rationales(solutions, evaluation)),
        ShowMode::Spec(model) => {
            let evaluation = evaluation.ok_or(ShowError::NoEvaluation)?;
            let target = match model {
                Some(model) => model.as_str(),
                None if evaluation.has_winner() => evaluation.winner.as_str(),
                None => return Err(ShowError::NoWinner),
            };
            SpecRenderer::new(context, solutions, evaluation)
                .render(target)
                .ok_or_else(|| not_found(solutions, target))
        }
        ShowMode::Model(model) => solution(solutions, evaluation, model, true),
    }
}

fn solution(
    solutions: &SolutionsFile,
    evaluation: Option<&EvaluationFile>,
    model: &str,
    full_raw: bool,
) -> Result<String, ShowError> {
    let found = solutions
        .successful()
        .find(|s| s.model == model)
        .ok_or_else(|| not_found(solutions, model))?;
    let score = evaluation.and_then(|e| e.score_of(model));
    Ok(ConsoleFormatter::solution(
        &found.model,
        &found.content,
        score,
        full_raw,
    ))
}

fn not_found(solutions: &SolutionsFile, model: &str) -> ShowError {
    let available: Vec<&str> = solutions.successful().map(|s| s.model.as_str()).collect();
    ShowError::ModelNotFound {
        model: model.to_string(),
        available: if available.is_empty() {
            "none".to_string()
        } else {
            available.join(", ")
        },
    }
}
