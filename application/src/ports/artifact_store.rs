//! Artifact store port
//!
//! The three JSON files that hand data from one phase to the next.

use pantheon_domain::{EvaluationFile, Phase, SolutionsFile, TaskContext};
use std::fmt;
use thiserror::Error;

/// A persisted hand-off file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Artifact {
    Context,
    Solutions,
    Evaluation,
}

impl Artifact {
    pub fn file_name(&self) -> &'static str {
        match self {
            Artifact::Context => ".context.json",
            Artifact::Solutions => Phase::Solve.artifact(),
            Artifact::Evaluation => Phase::Evaluate.artifact(),
        }
    }
}

impl fmt::Display for Artifact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// Errors reading or writing an artifact; every variant names the file
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("{artifact} not found in {dir}")]
    NotFound { artifact: Artifact, dir: String },

    #[error("Failed to parse {artifact}: {message}")]
    Parse { artifact: Artifact, message: String },

    #[error("Failed to access {artifact}: {source}")]
    Io {
        artifact: Artifact,
        #[source]
        source: std::io::Error,
    },
}

impl ArtifactError {
    pub fn artifact(&self) -> Artifact {
        match self {
            ArtifactError::NotFound { artifact, .. }
            | ArtifactError::Parse { artifact, .. }
            | ArtifactError::Io { artifact, .. } => *artifact,
        }
    }
}

/// Storage for phase artifacts
///
/// Each save is a single write at the end of a phase.
pub trait ArtifactStore: Send + Sync {
    fn load_context(&self) -> Result<TaskContext, ArtifactError>;

    fn load_solutions(&self) -> Result<SolutionsFile, ArtifactError>;

    fn save_solutions(&self, solutions: &SolutionsFile) -> Result<(), ArtifactError>;

    /// `Ok(None)` when no evaluation has been written yet
    fn load_evaluation(&self) -> Result<Option<EvaluationFile>, ArtifactError>;

    fn save_evaluation(&self, evaluation: &EvaluationFile) -> Result<(), ArtifactError>;
}
