//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for pantheon
#[derive(Parser, Debug)]
#[command(name = "pantheon")]
#[command(author, version, about = "Multi-model coding council - solve, cross-judge, rank")]
#[command(long_about = r#"
Pantheon sends one coding task to several models, has every model judge the
others' anonymized solutions, and ranks the results.

The run has two phases, each writing a JSON artifact next to .context.json:
1. solve:    every model answers the task          -> .solutions.json
2. evaluate: every successful model judges the rest -> .evaluation.json

Configuration files are loaded from (in priority order):
1. --config <path>                   Explicit config file
2. ./pantheon.toml                   Project-level config
3. ~/.config/pantheon/config.toml    Global config

Example:
  pantheon run
  pantheon show spec
  pantheon config set-models opus-4.6 gpt-5.2 gemini-3-pro
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the .context/.solutions/.evaluation files
    #[arg(long, value_name = "DIR", default_value = ".", global = true)]
    pub dir: PathBuf,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Dispatch the task to every model and write .solutions.json
    Solve,

    /// Cross-judge the solutions and write .evaluation.json
    Evaluate,

    /// Solve, then evaluate
    Run,

    /// Render results: winner (default), all, rationales, spec [MODEL], or a model name
    Show {
        /// What to show
        #[arg(value_name = "MODE")]
        mode: Option<String>,

        /// Model for `spec` (defaults to the winner)
        #[arg(value_name = "MODEL")]
        model: Option<String>,
    },

    /// List the model catalog
    Models,

    /// Inspect or edit the global configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommand,
    },
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommand {
    /// Show configuration sources and the active roster
    Show,

    /// Store the AI gateway API key
    SetKey {
        /// API key
        key: String,
    },

    /// Choose 2-4 models by catalog name or as name=provider/model
    SetModels {
        #[arg(required = true, num_args = 1.., value_name = "MODEL")]
        models: Vec<String>,
    },
}

/// What `pantheon show` renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShowMode {
    Winner,
    All,
    Rationales,
    /// Markdown tech spec for the given model, or the winner
    Spec(Option<String>),
    /// One model's solution
    Model(String),
}

impl ShowMode {
    pub fn from_args(mode: Option<&str>, model: Option<&str>) -> Self {
        match mode.unwrap_or("winner") {
            "winner" => ShowMode::Winner,
            "all" => ShowMode::All,
            "rationales" => ShowMode::Rationales,
            "spec" | "techspec" | "tech-spec" => ShowMode::Spec(model.map(String::from)),
            other => ShowMode::Model(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["pantheon", "solve", "-vv", "--dir", "/tmp/work"]);
        assert_eq!(cli.command, Command::Solve);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.dir, PathBuf::from("/tmp/work"));
        assert!(!cli.quiet);
    }

    #[test]
    fn test_show_args() {
        let cli = Cli::parse_from(["pantheon", "show", "spec", "gpt-5.2"]);
        match cli.command {
            Command::Show { mode, model } => {
                assert_eq!(
                    ShowMode::from_args(mode.as_deref(), model.as_deref()),
                    ShowMode::Spec(Some("gpt-5.2".into()))
                );
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_show_modes() {
        assert_eq!(ShowMode::from_args(None, None), ShowMode::Winner);
        assert_eq!(ShowMode::from_args(Some("all"), None), ShowMode::All);
        assert_eq!(
            ShowMode::from_args(Some("rationales"), None),
            ShowMode::Rationales
        );
        assert_eq!(
            ShowMode::from_args(Some("tech-spec"), None),
            ShowMode::Spec(None)
        );
        assert_eq!(
            ShowMode::from_args(Some("opus-4.6"), None),
            ShowMode::Model("opus-4.6".into())
        );
    }

    #[test]
    fn test_set_models_requires_names() {
        assert!(Cli::try_parse_from(["pantheon", "config", "set-models"]).is_err());
        let cli = Cli::parse_from(["pantheon", "config", "set-models", "a", "b=x/y"]);
        assert_eq!(
            cli.command,
            Command::Config {
                action: ConfigCommand::SetModels {
                    models: vec!["a".into(), "b=x/y".into()]
                }
            }
        );
    }
}
