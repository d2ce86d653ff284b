//! Markdown tech spec for one ranked solution

use crate::output::markdown::{fenced, table_cell};
use pantheon_domain::{
    Dimension, EvaluationFile, ParsedSolution, RankedSolution, SolutionsFile, TaskContext,
    clip_chars, parse_solution_files,
};
use std::collections::BTreeSet;

const SUMMARY_CHARS: usize = 80;

/// Line prefixes that never make a useful file summary
const BOILERPLATE_PREFIXES: [&str; 5] = ["import", "//", "'use", "use ", "#["];

/// Renders the winning (or any) solution as a Markdown tech spec
pub struct SpecRenderer<'a> {
    context: Option<&'a TaskContext>,
    solutions: &'a SolutionsFile,
    evaluation: &'a EvaluationFile,
}

impl<'a> SpecRenderer<'a> {
    pub fn new(
        context: Option<&'a TaskContext>,
        solutions: &'a SolutionsFile,
        evaluation: &'a EvaluationFile,
    ) -> Self {
        Self {
            context,
            solutions,
            evaluation,
        }
    }

    /// Render the spec for `model`; `None` when it has no solution
    pub fn render(&self, model: &str) -> Option<String> {
        let solution = self.solutions.find(model)?;
        let parsed = parse_solution_files(&solution.content);
        let rank = self.evaluation.find(model);
        let existing: BTreeSet<&str> = self
            .context
            .map(|c| c.files.keys().map(String::as_str).collect())
            .unwrap_or_default();

        let mut out = String::new();
        self.header(&mut out, model, rank);
        self.overview(&mut out, &parsed);
        Self::files_changed(&mut out, &parsed, &existing);
        if let Some(rank) = rank {
            Self::score_breakdown(&mut out, rank);
        }
        self.runner_up(&mut out, model, rank);
        self.notes(&mut out);
        Self::implementation(&mut out, &parsed, &existing);
        Some(out)
    }

    fn header(&self, out: &mut String, model: &str, rank: Option<&RankedSolution>) {
        let title = self
            .context
            .and_then(|c| c.title())
            .unwrap_or("Implementation");
        let score = rank
            .map(|r| r.weighted_score.to_string())
            .unwrap_or_else(|| "?".to_string());
        let judges = rank
            .map(|r| r.judges().collect::<Vec<_>>().join(", "))
            .filter(|j| !j.is_empty())
            .unwrap_or_else(|| "N/A".to_string());
        let role = if self.evaluation.winner == model {
            "Winner"
        } else {
            "Model"
        };

        out.push_str(&format!("# Tech Spec: {}\n\n", title));
        out.push_str(&format!(
            "**{}:** {} (score: {}, judged by {})\n\n",
            role, model, score, judges
        ));
    }

    fn overview(&self, out: &mut String, parsed: &ParsedSolution) {
        out.push_str("## Overview\n\n");
        if let Some(context) = self.context
            && !context.task.trim().is_empty()
        {
            out.push_str(context.task.trim());
            out.push('\n');
        }
        if !parsed.rationale.is_empty() {
            out.push_str(&format!("\n**Approach:** {}\n", parsed.rationale));
        }
        out.push('\n');
    }

    fn files_changed(out: &mut String, parsed: &ParsedSolution, existing: &BTreeSet<&str>) {
        out.push_str("## Files Changed\n\n");
        out.push_str("| File | Action | Description |\n");
        out.push_str("|------|--------|-------------|\n");
        for file in &parsed.files {
            let action = if existing.contains(file.path.as_str()) {
                "Modified"
            } else {
                "**New**"
            };
            out.push_str(&format!(
                "| `{}` | {} | {} |\n",
                file.path,
                action,
                table_cell(&summary_line(&file.content))
            ));
        }
        out.push('\n');
    }

    fn score_breakdown(out: &mut String, rank: &RankedSolution) {
        out.push_str("## Score Breakdown\n\n");
        out.push_str("| Dimension | Weight | Score |\n");
        out.push_str("|-----------|--------|-------|\n");
        for dimension in Dimension::ALL {
            out.push_str(&format!(
                "| {} | {}% | {}/5 |\n",
                dimension.label(),
                dimension.percent(),
                rank.dimension_averages.get(dimension)
            ));
        }
        out.push_str(&format!(
            "| **Weighted Total** | | **{}** |\n\n",
            rank.weighted_score
        ));

        out.push_str("### Per-Judge Scores\n\n");
        out.push_str("| Judge | Precision | Accuracy | Creativity | Simplicity |\n");
        out.push_str("|-------|-----------|----------|------------|------------|\n");
        for (judge, scores) in &rank.scores_by_judge {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} |\n",
                judge, scores.precision, scores.accuracy, scores.creativity, scores.simplicity
            ));
        }
        out.push('\n');
    }

    fn runner_up(&self, out: &mut String, model: &str, rank: Option<&RankedSolution>) {
        let others: Vec<_> = self
            .evaluation
            .ranking
            .iter()
            .filter(|r| r.model != model)
            .collect();
        if others.is_empty() {
            return;
        }

        out.push_str("## Runner-Up Comparison\n\n");
        out.push_str("| Model | Score | Precision | Accuracy | Creativity | Simplicity |\n");
        out.push_str("|-------|-------|-----------|----------|------------|------------|\n");
        match rank {
            Some(r) => out.push_str(&format!(
                "| **{}** | **{}** | {} | {} | {} | {} |\n",
                model,
                r.weighted_score,
                r.dimension_averages.precision,
                r.dimension_averages.accuracy,
                r.dimension_averages.creativity,
                r.dimension_averages.simplicity
            )),
            None => out.push_str(&format!("| **{}** | ? | | | | |\n", model)),
        }
        for other in others {
            let file_count = self
                .solutions
                .find(&other.model)
                .map(|s| parse_solution_files(&s.content).files.len().to_string())
                .unwrap_or_else(|| "?".to_string());
            out.push_str(&format!(
                "| {} ({} files) | {} | {} | {} | {} | {} |\n",
                other.model,
                file_count,
                other.weighted_score,
                other.dimension_averages.precision,
                other.dimension_averages.accuracy,
                other.dimension_averages.creativity,
                other.dimension_averages.simplicity
            ));
        }
        out.push('\n');
    }

    fn notes(&self, out: &mut String) {
        for (heading, items) in [
            ("Cherry-Picks", &self.evaluation.cherry_picks),
            ("Risks", &self.evaluation.risks),
        ] {
            if items.is_empty() {
                continue;
            }
            out.push_str(&format!("## {}\n\n", heading));
            for item in items {
                out.push_str(&format!("- {}\n\n", item));
            }
        }
    }

    fn implementation(out: &mut String, parsed: &ParsedSolution, existing: &BTreeSet<&str>) {
        out.push_str("## Implementation\n\n");
        for file in &parsed.files {
            let action = if existing.contains(file.path.as_str()) {
                "Modified"
            } else {
                "New file"
            };
            out.push_str(&format!("### `{}` ({})\n\n", file.path, action));
            out.push_str(&fenced(&file.path, &file.content));
            out.push('\n');
        }
    }
}

/// First non-boilerplate line of a file, clipped for a table cell
fn summary_line(content: &str) -> String {
    content
        .lines()
        .map(str::trim)
        .find(|line| {
            !line.is_empty() && !BOILERPLATE_PREFIXES.iter().any(|p| line.starts_with(p))
        })
        .map(|line| clip_chars(line, SUMMARY_CHARS).0.to_string())
        .unwrap_or_else(|| "-".to_string())
}
