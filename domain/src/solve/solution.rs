//! Solution results - one per model per solve run.

use serde::{Deserialize, Serialize};

/// Outcome of a single solve dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolutionStatus {
    Success,
    Failed,
}

/// Raw answer of one model to the solve prompt
///
/// `error` is present exactly when the status is [`SolutionStatus::Failed`];
/// the constructors are the only way this crate builds one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionResult {
    /// Model display name
    pub model: String,
    /// Raw model output (empty on failure)
    pub content: String,
    /// Tokens reported by the gateway
    #[serde(default)]
    pub tokens: u64,
    pub status: SolutionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SolutionResult {
    /// Creates a successful result.
    pub fn success(model: impl Into<String>, content: impl Into<String>, tokens: u64) -> Self {
        Self {
            model: model.into(),
            content: content.into(),
            tokens,
            status: SolutionStatus::Success,
            error: None,
        }
    }

    /// Creates a failed result carrying the error description.
    pub fn failure(model: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            content: String::new(),
            tokens: 0,
            status: SolutionStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == SolutionStatus::Success
    }
}

/// Hand-off artifact from solve to evaluate (`.solutions.json`)
///
/// Solutions are kept in dispatch order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionsFile {
    pub solutions: Vec<SolutionResult>,
}

impl SolutionsFile {
    pub fn new(solutions: Vec<SolutionResult>) -> Self {
        Self { solutions }
    }

    /// Successful solutions in dispatch order
    pub fn successful(&self) -> impl Iterator<Item = &SolutionResult> {
        self.solutions.iter().filter(|s| s.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.successful().count()
    }

    /// Look up a solution by model name
    pub fn find(&self, model: &str) -> Option<&SolutionResult> {
        self.solutions.iter().find(|s| s.model == model)
    }

    pub fn model_names(&self) -> Vec<&str> {
        self.solutions.iter().map(|s| s.model.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_has_error() {
        let failed = SolutionResult::failure("gpt-5", "rate limited");
        assert!(!failed.is_success());
        assert_eq!(failed.error.as_deref(), Some("rate limited"));
        assert!(failed.content.is_empty());
        assert_eq!(failed.tokens, 0);
    }

    #[test]
    fn test_wire_format() {
        let file = SolutionsFile::new(vec![
            SolutionResult::success("a", "text", 12),
            SolutionResult::failure("b", "boom"),
        ]);
        let json = serde_json::to_value(&file).unwrap();
        assert_eq!(json["solutions"][0]["status"], "success");
        assert!(json["solutions"][0].get("error").is_none());
        assert_eq!(json["solutions"][1]["status"], "failed");
        assert_eq!(json["solutions"][1]["error"], "boom");

        let back: SolutionsFile = serde_json::from_value(json).unwrap();
        assert_eq!(back, file);
    }

    #[test]
    fn test_successful_keeps_order() {
        let file = SolutionsFile::new(vec![
            SolutionResult::success("c", "", 0),
            SolutionResult::failure("a", "x"),
            SolutionResult::success("b", "", 0),
        ]);
        let names: Vec<_> = file.successful().map(|s| s.model.as_str()).collect();
        assert_eq!(names, vec!["c", "b"]);
        assert_eq!(file.success_count(), 2);
        assert!(file.find("a").is_some());
        assert!(file.find("z").is_none());
    }
}
