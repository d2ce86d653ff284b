//! Task context value object

use crate::core::error::DomainError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The coding task and the code around it (`.context.json`)
///
/// Produced by an upstream context-gathering step and read-only afterwards.
/// Every field defaults to empty so partially filled files still load;
/// [`TaskContext::validate`] decides whether the task itself is usable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskContext {
    /// Problem statement
    #[serde(default)]
    pub task: String,
    /// Existing code, path to content, in the order the file lists them
    #[serde(default)]
    pub files: IndexMap<String, String>,
    /// Project conventions, free text
    #[serde(default)]
    pub conventions: String,
    /// Rendered directory listing
    #[serde(default)]
    pub file_tree: String,
}

impl TaskContext {
    pub fn new(task: impl Into<String>) -> Self {
        Self {
            task: task.into(),
            ..Default::default()
        }
    }

    pub fn with_file(mut self, path: impl Into<String>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }

    pub fn with_conventions(mut self, conventions: impl Into<String>) -> Self {
        self.conventions = conventions.into();
        self
    }

    pub fn with_file_tree(mut self, tree: impl Into<String>) -> Self {
        self.file_tree = tree.into();
        self
    }

    /// A context without a task cannot be solved or judged
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.task.trim().is_empty() {
            Err(DomainError::MissingTask)
        } else {
            Ok(())
        }
    }

    /// Whether `path` is one of the existing files
    pub fn has_file(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    /// First sentence of the task, used as a document title
    pub fn title(&self) -> Option<&str> {
        self.task
            .split('.')
            .next()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "task": "Add a cache",
            "files": {"src/lib.rs": "pub fn f() {}"},
            "conventions": "",
            "fileTree": "src/\n  lib.rs"
        }"#;
        let ctx: TaskContext = serde_json::from_str(json).unwrap();
        assert_eq!(ctx.task, "Add a cache");
        assert!(ctx.has_file("src/lib.rs"));
        assert_eq!(ctx.file_tree, "src/\n  lib.rs");
    }

    #[test]
    fn test_files_keep_input_order() {
        let json = r#"{
            "task": "t",
            "files": {"src/z.rs": "z", "src/a.rs": "a", "src/m.rs": "m"}
        }"#;
        let ctx: TaskContext = serde_json::from_str(json).unwrap();
        let paths: Vec<_> = ctx.files.keys().map(String::as_str).collect();
        assert_eq!(paths, vec!["src/z.rs", "src/a.rs", "src/m.rs"]);

        let round_trip = serde_json::to_string(&ctx).unwrap();
        assert!(round_trip.find("src/z.rs").unwrap() < round_trip.find("src/a.rs").unwrap());
    }

    #[test]
    fn test_missing_fields_default() {
        let ctx: TaskContext = serde_json::from_str(r#"{"task": "x"}"#).unwrap();
        assert!(ctx.files.is_empty());
        assert!(ctx.conventions.is_empty());
        assert!(ctx.file_tree.is_empty());
    }

    #[test]
    fn test_validate() {
        assert!(TaskContext::new("Fix the bug").validate().is_ok());
        assert_eq!(
            TaskContext::new("   ").validate(),
            Err(DomainError::MissingTask)
        );
        assert_eq!(
            TaskContext::default().validate(),
            Err(DomainError::MissingTask)
        );
    }

    #[test]
    fn test_title() {
        let ctx = TaskContext::new("Add retries. Keep it small.");
        assert_eq!(ctx.title(), Some("Add retries"));
        assert_eq!(TaskContext::default().title(), None);
    }
}
