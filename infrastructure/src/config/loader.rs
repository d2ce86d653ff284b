//! Configuration file loader with multi-source merging

use super::error::ConfigError;
use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

const PROJECT_FILES: [&str; 2] = ["pantheon.toml", ".pantheon.toml"];

/// One place configuration may come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    pub label: &'static str,
    pub path: PathBuf,
    pub found: bool,
}

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./pantheon.toml` or `./.pantheon.toml`
    /// 3. Global: `$XDG_CONFIG_HOME/pantheon/config.toml`
    /// 4. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, ConfigError> {
        Self::load_from(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path,
        )
    }

    /// Merge the given files over the defaults; absent files are skipped
    /// except an explicit path, which must exist.
    pub fn load_from(
        global: Option<&Path>,
        project: Option<&Path>,
        explicit: Option<&Path>,
    ) -> Result<FileConfig, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global
            && path.exists()
        {
            debug!("Loading global config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = project
            && path.exists()
        {
            debug!("Loading project config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            debug!("Loading config {}", path.display());
            figment = figment.merge(Toml::file(path));
        }

        figment
            .extract()
            .map_err(|e| ConfigError::Invalid(Box::new(e)))
    }

    /// Load only the global file (what `config set-*` edits)
    pub fn load_global() -> Result<FileConfig, ConfigError> {
        Self::load_from(Self::global_config_path().as_deref(), None, None)
    }

    /// Write `config` to the global file, returning its path
    pub fn save_global(config: &FileConfig) -> Result<PathBuf, ConfigError> {
        let path = Self::global_config_path().ok_or(ConfigError::NoConfigDir)?;
        Self::save_to(&path, config)?;
        Ok(path)
    }

    /// Write `config` as TOML, readable only by the owner on Unix.
    ///
    /// The file is created with mode 0600, and an existing file is narrowed to
    /// 0600 before any contents are written.
    pub fn save_to(path: &Path, config: &FileConfig) -> Result<(), ConfigError> {
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }

        let contents = toml::to_string_pretty(config)?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(path).map_err(write_error)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(write_error)?;
        }

        file.write_all(contents.as_bytes()).map_err(write_error)?;

        debug!("Wrote config {}", path.display());
        Ok(())
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("pantheon").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Config file locations in priority order, for `config show`
    pub fn sources(config_path: Option<&Path>) -> Vec<ConfigSource> {
        let mut sources = Vec::new();

        if let Some(path) = config_path {
            sources.push(ConfigSource {
                label: "Explicit",
                path: path.to_path_buf(),
                found: path.exists(),
            });
        }

        sources.push(match Self::project_config_path() {
            Some(path) => ConfigSource {
                label: "Project",
                path,
                found: true,
            },
            None => ConfigSource {
                label: "Project",
                path: PathBuf::from(PROJECT_FILES[0]),
                found: false,
            },
        });

        if let Some(path) = Self::global_config_path() {
            let found = path.exists();
            sources.push(ConfigSource {
                label: "Global",
                path,
                found,
            });
        }

        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pantheon_domain::ModelEntry;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_defaults_when_no_files() {
        let config = ConfigLoader::load_from(None, None, None).unwrap();
        assert_eq!(config, FileConfig::default());
    }

    #[test]
    fn test_priority_order() {
        let dir = TempDir::new().unwrap();
        let global = write(
            &dir,
            "global.toml",
            "api_key = \"global-key\"\n[limits]\nsolve_max_tokens = 100\njudge_max_tokens = 10\n",
        );
        let project = write(&dir, "project.toml", "[limits]\nsolve_max_tokens = 200\n");
        let explicit = write(&dir, "explicit.toml", "api_key = \"explicit-key\"\n");

        let config =
            ConfigLoader::load_from(Some(&global), Some(&project), Some(&explicit)).unwrap();

        assert_eq!(config.api_key.as_deref(), Some("explicit-key"));
        assert_eq!(config.limits.solve_max_tokens, 200);
        assert_eq!(config.limits.judge_max_tokens, 10);
    }

    #[test]
    fn test_project_models_replace_global_models() {
        let dir = TempDir::new().unwrap();
        let global = write(
            &dir,
            "global.toml",
            "[[models]]\nname = \"a\"\nmodel_id = \"p/a\"\n[[models]]\nname = \"b\"\nmodel_id = \"p/b\"\n[[models]]\nname = \"c\"\nmodel_id = \"p/c\"\n",
        );
        let project = write(
            &dir,
            "project.toml",
            "[[models]]\nname = \"x\"\nmodel_id = \"p/x\"\n[[models]]\nname = \"y\"\nmodel_id = \"p/y\"\n",
        );

        let config = ConfigLoader::load_from(Some(&global), Some(&project), None).unwrap();

        let names: Vec<_> = config.models.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y"]);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");

        let err = ConfigLoader::load_from(None, None, Some(&missing)).unwrap_err();

        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let bad = write(&dir, "bad.toml", "[limits]\nsolve_max_tokens = \"lots\"\n");

        let err = ConfigLoader::load_from(None, None, Some(&bad)).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = FileConfig {
            api_key: Some("sk-saved".into()),
            models: vec![ModelEntry::new("a", "p/a"), ModelEntry::new("b", "p/b")],
            ..Default::default()
        };

        ConfigLoader::save_to(&path, &config).unwrap();
        let reloaded = ConfigLoader::load_from(Some(&path), None, None).unwrap();

        assert_eq!(reloaded, config);
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        ConfigLoader::save_to(&path, &FileConfig::default()).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_world_readable_file_is_narrowed() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "api_key = \"old\"\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let config = FileConfig {
            api_key: Some("sk-new".into()),
            ..Default::default()
        };
        ConfigLoader::save_to(&path, &config).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        let reloaded = ConfigLoader::load_from(Some(&path), None, None).unwrap();
        assert_eq!(reloaded.api_key.as_deref(), Some("sk-new"));
    }

    #[test]
    fn test_global_config_path() {
        if let Some(path) = ConfigLoader::global_config_path() {
            assert!(path.ends_with("pantheon/config.toml"));
        }
    }
}
