//! Console output formatter for pantheon results

use crate::output::markdown::fenced;
use colored::Colorize;
use pantheon_domain::{
    EvaluationFile, MODEL_CATALOG, ModelEntry, SolutionsFile, clip_chars, parse_solution_files,
};
use std::path::PathBuf;

/// Raw output longer than this is cut when a solution has no file blocks.
pub const RAW_OUTPUT_LIMIT: usize = 5000;

/// Inputs for `pantheon config show`
#[derive(Debug, Clone)]
pub struct ConfigSummary {
    /// `(label, path, found)` in priority order
    pub sources: Vec<(String, PathBuf, bool)>,
    /// Already masked
    pub api_key: Option<String>,
    pub base_url: String,
    pub models: Vec<ModelEntry>,
    pub using_default_models: bool,
}

/// Formats pantheon results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// One solution: its files as fenced blocks, then its rationale.
    ///
    /// When no file blocks parse, the raw text is shown instead, cut at
    /// [`RAW_OUTPUT_LIMIT`] characters unless `full_raw` is set.
    pub fn solution(model: &str, content: &str, score: Option<f64>, full_raw: bool) -> String {
        let parsed = parse_solution_files(content);
        let mut output = String::new();

        let title = match score {
            Some(score) => format!("{} (score: {})", model, score),
            None => model.to_string(),
        };
        let line = "=".repeat(70);
        output.push_str(&format!(
            "\n{}\n  {}\n  {} file(s)\n{}\n\n",
            line,
            title.bold(),
            parsed.files.len(),
            line
        ));

        for file in &parsed.files {
            output.push_str(&format!("### {}\n\n", file.path));
            output.push_str(&fenced(&file.path, &file.content));
            output.push('\n');
        }

        if !parsed.rationale.is_empty() {
            output.push_str(&format!("### Rationale\n\n{}\n\n", parsed.rationale));
        }

        if !parsed.has_files() {
            output.push_str("(Raw output - model did not use the expected file format)\n\n");
            if full_raw {
                output.push_str(content);
                output.push('\n');
            } else {
                let (shown, omitted) = clip_chars(content, RAW_OUTPUT_LIMIT);
                output.push_str(shown);
                output.push('\n');
                if omitted > 0 {
                    output.push_str(&format!(
                        "\n... ({} more characters, run `pantheon show {}` to see all)\n",
                        omitted, model
                    ));
                }
            }
            output.push('\n');
        }

        output
    }

    /// Rationale and file list per successful solution, best score first
    pub fn rationales(solutions: &SolutionsFile, evaluation: Option<&EvaluationFile>) -> String {
        let score_of = |model: &str| evaluation.and_then(|e| e.score_of(model));

        let mut successful: Vec<_> = solutions.successful().collect();
        successful.sort_by(|a, b| {
            let a = score_of(&a.model).unwrap_or(0.0);
            let b = score_of(&b.model).unwrap_or(0.0);
            b.total_cmp(&a)
        });

        let mut output = String::from("\n## Solution Approaches (rationale only)\n\n");

        for solution in successful {
            let parsed = parse_solution_files(&solution.content);
            let winner = match evaluation {
                Some(e) if e.winner == solution.model => " [WINNER]",
                _ => "",
            };
            let score = score_of(&solution.model)
                .map(|s| format!(" ({})", s))
                .unwrap_or_default();
            let files = parsed.paths().collect::<Vec<_>>().join(", ");

            output.push_str(&format!("### {}{}{}\n\n", solution.model, winner, score));
            output.push_str(&format!(
                "**Files:** {}\n\n",
                if files.is_empty() { "(none parsed)" } else { files.as_str() }
            ));
            if parsed.rationale.is_empty() {
                output.push_str("(No rationale section found)\n");
            } else {
                output.push_str(&parsed.rationale);
                output.push('\n');
            }
            output.push_str(&format!("\n{}\n\n", "─".repeat(50)));
        }

        output
    }

    /// Per-model outcome of the solve phase
    pub fn solve_summary(solutions: &SolutionsFile) -> String {
        let mut output = Self::section_header("Solve");

        for solution in &solutions.solutions {
            if solution.is_success() {
                output.push_str(&format!(
                    "  {} {} ({} tokens)\n",
                    "v".green(),
                    solution.model,
                    solution.tokens
                ));
            } else {
                output.push_str(&format!(
                    "  {} {}: {}\n",
                    "x".red(),
                    solution.model,
                    solution.error.as_deref().unwrap_or("Unknown")
                ));
            }
        }

        output.push_str(&format!(
            "\n{}/{} models succeeded. Solutions written to .solutions.json\n",
            solutions.success_count(),
            solutions.solutions.len()
        ));
        output
    }

    /// Ranking table and winner of the evaluate phase
    pub fn evaluation_summary(evaluation: &EvaluationFile) -> String {
        let mut output = Self::section_header("Ranking");

        for (position, ranked) in evaluation.ranking.iter().enumerate() {
            let averages = &ranked.dimension_averages;
            output.push_str(&format!(
                "  {}. {:<20} {:>5}   P {} / A {} / C {} / S {}   ({} judges)\n",
                position + 1,
                ranked.model,
                ranked.weighted_score,
                averages.precision,
                averages.accuracy,
                averages.creativity,
                averages.simplicity,
                ranked.scores_by_judge.len()
            ));
        }

        if evaluation.has_winner() {
            output.push_str(&format!(
                "\n{} {}\n",
                "Winner:".green().bold(),
                evaluation.winner
            ));
        } else {
            output.push_str(&format!(
                "\n{} every score was a self-score, so no model could be ranked\n",
                "No winner:".yellow().bold()
            ));
        }

        if !evaluation.cherry_picks.is_empty() {
            output.push_str(&format!(
                "{} {}\n",
                "Cherry-picks:".cyan(),
                evaluation.cherry_picks.len()
            ));
        }
        if !evaluation.risks.is_empty() {
            output.push_str(&format!("{} {}\n", "Risks:".cyan(), evaluation.risks.len()));
        }
        output.push_str("Results written to .evaluation.json\n");
        output
    }

    /// The model catalog, marking models in the active roster
    pub fn catalog(active: &[ModelEntry]) -> String {
        let mut output = Self::section_header("Model Catalog");

        for group in MODEL_CATALOG {
            output.push_str(&format!(
                "\n{} ({})\n",
                group.provider.cyan().bold(),
                group.tier
            ));
            for model in group.models {
                let marker = if active.iter().any(|m| m.name == model.name) {
                    "*".green().to_string()
                } else {
                    " ".to_string()
                };
                output.push_str(&format!(
                    "  {} {:<22} {}\n",
                    marker,
                    model.name,
                    model.model_id.dimmed()
                ));
            }
        }

        output.push_str("\n* = active. Custom models: pantheon config set-models name=provider/model\n");
        output
    }

    /// Configuration sources, key status and the active roster
    pub fn config(summary: &ConfigSummary) -> String {
        let mut output = String::from("Configuration sources (in priority order):\n");

        for (label, path, found) in &summary.sources {
            let status = if *found { "[FOUND]" } else { "[     ]" };
            output.push_str(&format!(
                "  {} {:<8} {}\n",
                status,
                format!("{}:", label),
                path.display()
            ));
        }
        output.push_str("  [     ] Default: built-in defaults\n\n");

        output.push_str(&format!(
            "{} {}\n",
            "API key:".cyan().bold(),
            summary.api_key.as_deref().unwrap_or("(not set)")
        ));
        output.push_str(&format!("{} {}\n", "Gateway:".cyan().bold(), summary.base_url));

        let roster_label = if summary.using_default_models {
            "Models (default):"
        } else {
            "Models:"
        };
        output.push_str(&format!("{}\n", roster_label.cyan().bold()));
        for model in &summary.models {
            output.push_str(&format!("  - {}\n", model));
        }
        output
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }
}
