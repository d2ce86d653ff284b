//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Task context has no \"task\" field")]
    MissingTask,

    #[error("Invalid model entry: {0}")]
    InvalidModel(String),

    #[error("Duplicate model name: {0}")]
    DuplicateModel(String),

    #[error("Need at least {required} models, got {actual}")]
    NotEnoughModels { required: usize, actual: usize },

    #[error("At most {max} models can be active, got {actual}")]
    TooManyModels { max: usize, actual: usize },
}

impl DomainError {
    /// Check if this error comes from a bad model roster
    pub fn is_roster_error(&self) -> bool {
        !matches!(self, DomainError::MissingTask)
    }
}
