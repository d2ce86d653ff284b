use pantheon_application::{Artifact, ArtifactError, ArtifactStore};
use pantheon_domain::{EvaluationFile, SolutionsFile, TaskContext};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// [`ArtifactStore`] backed by pretty-printed JSON files in one directory
#[derive(Debug, Clone)]
pub struct JsonArtifactStore {
    dir: PathBuf,
}

impl JsonArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_of(&self, artifact: Artifact) -> PathBuf {
        self.dir.join(artifact.file_name())
    }

    pub fn exists(&self, artifact: Artifact) -> bool {
        self.path_of(artifact).is_file()
    }

    fn read<T: DeserializeOwned>(&self, artifact: Artifact) -> Result<T, ArtifactError> {
        let path = self.path_of(artifact);
        let contents = fs::read_to_string(&path).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                ArtifactError::NotFound {
                    artifact,
                    dir: self.dir.display().to_string(),
                }
            } else {
                ArtifactError::Io { artifact, source }
            }
        })?;

        debug!("Read {} ({} bytes)", path.display(), contents.len());
        serde_json::from_str(&contents).map_err(|e| ArtifactError::Parse {
            artifact,
            message: e.to_string(),
        })
    }

    fn write<T: Serialize>(&self, artifact: Artifact, value: &T) -> Result<(), ArtifactError> {
        let path = self.path_of(artifact);
        let json = serde_json::to_string_pretty(value).map_err(|e| ArtifactError::Parse {
            artifact,
            message: e.to_string(),
        })?;
        fs::write(&path, json).map_err(|source| ArtifactError::Io { artifact, source })?;
        debug!("Wrote {}", path.display());
        Ok(())
    }
}

impl ArtifactStore for JsonArtifactStore {
    fn load_context(&self) -> Result<TaskContext, ArtifactError> {
        self.read(Artifact::Context)
    }

    fn load_solutions(&self) -> Result<SolutionsFile, ArtifactError> {
        self.read(Artifact::Solutions)
    }

    fn save_solutions(&self, solutions: &SolutionsFile) -> Result<(), ArtifactError> {
        self.write(Artifact::Solutions, solutions)
    }

    fn load_evaluation(&self) -> Result<Option<EvaluationFile>, ArtifactError> {
        if !self.exists(Artifact::Evaluation) {
            return Ok(None);
        }
        self.read(Artifact::Evaluation).map(Some)
    }

    fn save_evaluation(&self, evaluation: &EvaluationFile) -> Result<(), ArtifactError> {
        self.write(Artifact::Evaluation, evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantheon_domain::SolutionResult;
    use tempfile::TempDir;

    #[test]
    fn test_load_context_camel_case() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(".context.json"),
            r#"{"task": "Add retries", "files": {"src/http.rs": "fn get() {}"}, "fileTree": "src/\n  http.rs"}"#,
        )
        .unwrap();
        let store = JsonArtifactStore::new(dir.path());

        let ctx = store.load_context().unwrap();

        assert_eq!(ctx.task, "Add retries");
        assert_eq!(ctx.file_tree, "src/\n  http.rs");
        assert!(ctx.has_file("src/http.rs"));
        assert_eq!(ctx.conventions, "");
    }

    #[test]
    fn test_missing_context_names_file() {
        let dir = TempDir::new().unwrap();
        let store = JsonArtifactStore::new(dir.path());

        let err = store.load_context().unwrap_err();

        assert!(matches!(err, ArtifactError::NotFound { .. }));
        assert_eq!(err.artifact(), Artifact::Context);
        assert!(err.to_string().contains(".context.json"));
    }

    #[test]
    fn test_unparseable_solutions() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".solutions.json"), "{ nope").unwrap();
        let store = JsonArtifactStore::new(dir.path());

        let err = store.load_solutions().unwrap_err();

        assert!(matches!(
            err,
            ArtifactError::Parse {
                artifact: Artifact::Solutions,
                ..
            }
        ));
        assert!(err.to_string().starts_with("Failed to parse .solutions.json"));
    }

    #[test]
    fn test_solutions_written_as_pretty_json() {
        let dir = TempDir::new().unwrap();
        let store = JsonArtifactStore::new(dir.path());
        let solutions = SolutionsFile::new(vec![
            SolutionResult::success("a", "body", 12),
            SolutionResult::failure("b", "Timeout"),
        ]);

        store.save_solutions(&solutions).unwrap();

        let raw = fs::read_to_string(dir.path().join(".solutions.json")).unwrap();
        assert!(raw.contains("\n  \"solutions\": ["));
        assert!(raw.contains(r#""status": "failed""#));
        assert_eq!(store.load_solutions().unwrap(), solutions);
    }

    #[test]
    fn test_evaluation_optional() {
        let dir = TempDir::new().unwrap();
        let store = JsonArtifactStore::new(dir.path());

        assert!(store.load_evaluation().unwrap().is_none());

        let evaluation = EvaluationFile::default();
        store.save_evaluation(&evaluation).unwrap();
        assert_eq!(store.load_evaluation().unwrap(), Some(evaluation));
    }
}
