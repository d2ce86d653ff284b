//! Model entry value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Smallest roster that can still cross-judge.
pub const MIN_MODELS: usize = 2;

/// Largest roster the setup commands accept.
pub const MAX_MODELS: usize = 4;

/// A model participating in a run (Value Object)
///
/// `name` is the display identity used everywhere in artifacts (solutions,
/// judges, rankings). `model_id` is the opaque gateway routing id in
/// `provider/model` form and never appears in judge prompts.
///
/// # Example
///
/// ```
/// use pantheon_domain::ModelEntry;
///
/// let entry = ModelEntry::new("gpt-5.2", "openai/gpt-5.2");
/// assert_eq!(entry.provider(), Some("openai"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Unique display name (e.g., "opus-4.6")
    pub name: String,
    /// Gateway routing id (e.g., "anthropic/claude-opus-4-6")
    #[serde(alias = "modelId")]
    pub model_id: String,
}

impl ModelEntry {
    pub fn new(name: impl Into<String>, model_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            model_id: model_id.into(),
        }
    }

    /// Provider prefix of the routing id, if it has one
    pub fn provider(&self) -> Option<&str> {
        self.model_id
            .split_once('/')
            .map(|(provider, _)| provider)
            .filter(|p| !p.is_empty())
    }

    /// Check that both fields are present
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::InvalidModel(
                "model name cannot be empty".to_string(),
            ));
        }
        if self.model_id.trim().is_empty() {
            return Err(DomainError::InvalidModel(format!(
                "{}: model id cannot be empty",
                self.name
            )));
        }
        Ok(())
    }

    /// Parse a custom `name=provider/model` pair
    pub fn parse_custom(spec: &str) -> Result<Self, DomainError> {
        let (name, model_id) = spec.split_once('=').ok_or_else(|| {
            DomainError::InvalidModel(format!("expected name=provider/model, got '{}'", spec))
        })?;
        let entry = Self::new(name.trim(), model_id.trim());
        entry.validate()?;
        if entry.provider().is_none() {
            return Err(DomainError::InvalidModel(format!(
                "{}: model id must look like provider/model",
                entry.name
            )));
        }
        Ok(entry)
    }

    /// Validate a whole roster: every entry well-formed, names unique,
    /// and at least [`MIN_MODELS`] entries.
    pub fn validate_roster(models: &[ModelEntry]) -> Result<(), DomainError> {
        let mut seen = HashSet::new();
        for model in models {
            model.validate()?;
            if !seen.insert(model.name.as_str()) {
                return Err(DomainError::DuplicateModel(model.name.clone()));
            }
        }
        if models.len() < MIN_MODELS {
            return Err(DomainError::NotEnoughModels {
                required: MIN_MODELS,
                actual: models.len(),
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for ModelEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.model_id)
    }
}
