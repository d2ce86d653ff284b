//! CLI entrypoint for pantheon
//!
//! This is the main binary that wires together all layers using
//! dependency injection, and maps failures to exit codes.

use anyhow::anyhow;
use clap::Parser;
use colored::Colorize;
use pantheon_application::{
    Artifact, ArtifactError, ArtifactStore, GatewayError, NoProgress, ProgressNotifier,
    RunConfig, RunEvaluateError, RunEvaluateUseCase, RunSolveError, RunSolveUseCase,
};
use pantheon_domain::{DomainError, MAX_MODELS, ModelEntry, find_by_name};
use pantheon_infrastructure::{
    AiGatewayClient, ConfigError, ConfigLoader, JsonArtifactStore, mask_key,
};
use pantheon_presentation::{
    Cli, Command, ConfigCommand, ConfigSummary, ConsoleFormatter, ProgressReporter, ShowError,
    ShowMode, SimpleProgress, render_show,
};
use std::io::IsTerminal;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const EXIT_INTERNAL: u8 = 1;
const EXIT_INPUT: u8 = 2;
const EXIT_QUORUM: u8 = 3;

/// A fatal error and the exit code it maps to
#[derive(Debug)]
struct Failure {
    code: u8,
    error: anyhow::Error,
}

impl Failure {
    fn input(error: impl Into<anyhow::Error>) -> Self {
        Self {
            code: EXIT_INPUT,
            error: error.into(),
        }
    }

    fn quorum(error: impl Into<anyhow::Error>) -> Self {
        Self {
            code: EXIT_QUORUM,
            error: error.into(),
        }
    }
}

impl From<RunSolveError> for Failure {
    fn from(e: RunSolveError) -> Self {
        if e.is_input_error() {
            Self::input(e)
        } else {
            Self::quorum(e)
        }
    }
}

impl From<RunEvaluateError> for Failure {
    fn from(e: RunEvaluateError) -> Self {
        if e.is_input_error() {
            Self::input(e)
        } else {
            Self::quorum(e)
        }
    }
}

impl From<GatewayError> for Failure {
    fn from(e: GatewayError) -> Self {
        match e {
            GatewayError::MissingApiKey => Self::input(e),
            other => Self {
                code: EXIT_INTERNAL,
                error: other.into(),
            },
        }
    }
}

macro_rules! input_errors {
    ($($error:ty),*) => {
        $(impl From<$error> for Failure {
            fn from(e: $error) -> Self {
                Self::input(e)
            }
        })*
    };
}

input_errors!(ConfigError, ArtifactError, DomainError, ShowError);

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    info!("Starting pantheon");

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("{} {:#}", "Error:".red().bold(), failure.error);
            ExitCode::from(failure.code)
        }
    }
}

/// `RUST_LOG` wins when set; otherwise `-v` picks the level
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), Failure> {
    match &cli.command {
        Command::Solve | Command::Evaluate | Command::Run => execute_phases(&cli).await,
        Command::Show { mode, model } => {
            show(&cli, &ShowMode::from_args(mode.as_deref(), model.as_deref()))
        }
        Command::Models => {
            let config = ConfigLoader::load(cli.config.as_deref())?;
            println!("{}", ConsoleFormatter::catalog(&config.active_models()));
            Ok(())
        }
        Command::Config { action } => config_command(&cli, action),
    }
}

async fn execute_phases(cli: &Cli) -> Result<(), Failure> {
    let config = ConfigLoader::load(cli.config.as_deref())?;
    let run_config = config.to_run_config();

    // === Dependency Injection ===
    let gateway = Arc::new(AiGatewayClient::from_config(&config)?);
    let store = Arc::new(JsonArtifactStore::new(&cli.dir));
    let progress = progress_for(cli.quiet);

    debug!(
        "Models: {}",
        run_config
            .models
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );

    if matches!(cli.command, Command::Solve | Command::Run) {
        solve(&gateway, &store, &run_config, progress.as_ref()).await?;
    }
    if matches!(cli.command, Command::Evaluate | Command::Run) {
        evaluate(&gateway, &store, &run_config, progress.as_ref()).await?;
    }
    Ok(())
}

/// Bars on a terminal, plain lines when piped, nothing with `--quiet`
fn progress_for(quiet: bool) -> Box<dyn ProgressNotifier> {
    if quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    }
}

async fn solve(
    gateway: &Arc<AiGatewayClient>,
    store: &Arc<JsonArtifactStore>,
    config: &RunConfig,
    progress: &dyn ProgressNotifier,
) -> Result<(), Failure> {
    let use_case = RunSolveUseCase::new(Arc::clone(gateway), Arc::clone(store));

    match use_case.execute_with_progress(config, progress).await {
        Ok(solutions) => {
            println!("{}", ConsoleFormatter::solve_summary(&solutions));
            eprintln!(
                "Wrote {}",
                store.path_of(Artifact::Solutions).display()
            );
            Ok(())
        }
        Err(e) => {
            if let RunSolveError::QuorumNotMet { solutions, .. } = &e {
                println!("{}", ConsoleFormatter::solve_summary(solutions));
            }
            Err(e.into())
        }
    }
}

async fn evaluate(
    gateway: &Arc<AiGatewayClient>,
    store: &Arc<JsonArtifactStore>,
    config: &RunConfig,
    progress: &dyn ProgressNotifier,
) -> Result<(), Failure> {
    let use_case = RunEvaluateUseCase::new(Arc::clone(gateway), Arc::clone(store));
    let evaluation = use_case.execute_with_progress(config, progress).await?;

    println!("{}", ConsoleFormatter::evaluation_summary(&evaluation));
    eprintln!(
        "Wrote {}",
        store.path_of(Artifact::Evaluation).display()
    );
    Ok(())
}

fn show(cli: &Cli, mode: &ShowMode) -> Result<(), Failure> {
    let store = JsonArtifactStore::new(&cli.dir);
    let solutions = store.load_solutions()?;
    let evaluation = store.load_evaluation()?;
    let context = if store.exists(Artifact::Context) {
        Some(store.load_context()?)
    } else {
        None
    };

    let output = render_show(mode, &solutions, evaluation.as_ref(), context.as_ref())?;
    println!("{}", output);
    Ok(())
}

fn config_command(cli: &Cli, action: &ConfigCommand) -> Result<(), Failure> {
    match action {
        ConfigCommand::Show => {
            let config = ConfigLoader::load(cli.config.as_deref())?;
            let summary = ConfigSummary {
                sources: ConfigLoader::sources(cli.config.as_deref())
                    .into_iter()
                    .map(|s| (s.label.to_string(), s.path, s.found))
                    .collect(),
                api_key: config.api_key().map(|key| mask_key(&key)),
                base_url: config.gateway.base_url.clone(),
                models: config.active_models(),
                using_default_models: config.uses_default_models(),
            };
            println!("{}", ConsoleFormatter::config(&summary));
        }
        ConfigCommand::SetKey { key } => {
            let key = key.trim();
            if key.is_empty() {
                return Err(Failure::input(anyhow!("API key cannot be empty")));
            }
            let mut config = ConfigLoader::load_global()?;
            config.api_key = Some(key.to_string());
            let path = ConfigLoader::save_global(&config)?;
            println!("API key saved to {}", path.display());
        }
        ConfigCommand::SetModels { models } => {
            let roster = resolve_models(models)?;
            let mut config = ConfigLoader::load_global()?;
            config.models = roster;
            let path = ConfigLoader::save_global(&config)?;
            println!(
                "Active models: {}",
                config
                    .models
                    .iter()
                    .map(|m| m.name.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            );
            println!("Saved to {}", path.display());
        }
    }
    Ok(())
}

/// Catalog names or custom `name=provider/model` pairs, as a valid roster
fn resolve_models(names: &[String]) -> Result<Vec<ModelEntry>, DomainError> {
    if names.len() > MAX_MODELS {
        return Err(DomainError::TooManyModels {
            max: MAX_MODELS,
            actual: names.len(),
        });
    }

    let models = names
        .iter()
        .map(|name| {
            if name.contains('=') {
                ModelEntry::parse_custom(name)
            } else {
                find_by_name(name).ok_or_else(|| {
                    DomainError::InvalidModel(format!(
                        "unknown model '{}' (see `pantheon models`)",
                        name
                    ))
                })
            }
        })
        .collect::<Result<Vec<_>, _>>()?;

    ModelEntry::validate_roster(&models)?;
    Ok(models)
}
