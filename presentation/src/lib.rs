//! Presentation layer for pantheon
//!
//! This crate contains CLI definitions, output formatters,
//! and progress reporters.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, ConfigCommand, ShowMode};
pub use output::console::{ConfigSummary, ConsoleFormatter, RAW_OUTPUT_LIMIT};
pub use output::show::{ShowError, render as render_show};
pub use output::spec::SpecRenderer;
pub use progress::reporter::{ProgressReporter, SimpleProgress};
