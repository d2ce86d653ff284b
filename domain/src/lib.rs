//! Domain layer for pantheon
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Solve
//!
//! A coding task ([`TaskContext`]) is sent to every configured model. Each
//! model answers with free text that is recorded as a [`SolutionResult`] and
//! can be viewed through [`parse_solution_files`].
//!
//! ## Judge
//!
//! Successful solutions are shuffled and relabelled ("Solution 1".."Solution k")
//! by [`shuffle_and_anonymize`], the same models score each other on a weighted
//! rubric, and [`aggregate`] turns the parsed judgments into a ranking with
//! self-scores excluded.

pub mod core;
pub mod judge;
pub mod orchestration;
pub mod prompt;
pub mod solve;

// Re-export commonly used types
pub use core::{
    catalog::{
        CatalogModel, DEFAULT_SELECTION, MODEL_CATALOG, ModelGroup, ModelTier, all_models,
        default_models, find_by_name,
    },
    error::DomainError,
    model::{MAX_MODELS, MIN_MODELS, ModelEntry},
    string::{clip_chars, one_line},
};
pub use judge::{
    anonymize::{AnonymizationMap, AnonymizedSolution, Anonymized, shuffle_and_anonymize},
    evaluation::EvaluationFile,
    parsing::{JudgeResult, SolutionScore, parse_judge_response},
    ranking::{Aggregation, Judgment, RankedSolution, SelfScore, aggregate},
    scores::{Dimension, DimensionScores, average_dimensions, weighted_score},
};
pub use orchestration::{MIN_QUORUM, Phase};
pub use prompt::PromptTemplate;
pub use solve::{
    context::TaskContext,
    parsing::{ParsedSolution, SolutionFile, parse_solution_files},
    solution::{SolutionResult, SolutionStatus, SolutionsFile},
};
