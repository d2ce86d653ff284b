//! Prompt templates for the solve and evaluate phases

use crate::judge::anonymize::AnonymizedSolution;
use crate::judge::scores::Dimension;
use crate::solve::context::TaskContext;

const NO_CONVENTIONS: &str = "None provided.";

const SOLVE_INSTRUCTIONS: &str = r#"## Instructions
- Output complete file contents for every file you create or modify.
- Use this exact format for each file:
  === FILE: path/to/file.ts ===
  (full file content here)
  === END FILE ===
- After all files, write a ## Rationale section (3-5 sentences) explaining your approach, tradeoffs considered, and why this is the right solution.
- Do NOT over-engineer. Solve exactly what was asked.
- Do NOT include test files unless the task specifically asks for tests.
- Do NOT wrap file contents in markdown code fences. The === delimiters are sufficient."#;

const JUDGE_OUTPUT_FORMAT: &str = r#"## Required Output Format
Respond with ONLY valid JSON, no markdown fences, no explanation before or after:
{
  "scores": [
    {
      "solution": 1,
      "precision": 4,
      "accuracy": 5,
      "creativity": 3,
      "simplicity": 4,
      "notes": "Brief reasoning"
    }
  ],
  "cherry_picks": "Ideas from any solution worth incorporating into the winner",
  "risks": "Any concerns about any solution"
}"#;

const JUDGE_RETRY: &str = "IMPORTANT: Your previous response was not valid JSON. Respond with ONLY a JSON object, no other text.";

/// Templates for generating prompts at each stage
///
/// Pure string rendering; nothing here can fail.
pub struct PromptTemplate;

impl PromptTemplate {
    /// Prompt sent to every model in the solve phase
    pub fn solve(ctx: &TaskContext) -> String {
        let conventions = if ctx.conventions.trim().is_empty() {
            NO_CONVENTIONS
        } else {
            ctx.conventions.as_str()
        };

        format!(
            "You are solving a coding task. Produce a complete, implementable solution.\n\n\
             ## Task\n{}\n\n\
             ## Existing Code\n{}\n\n\
             ## Project Conventions\n{}\n\n\
             ## File Tree\n```\n{}\n```\n\n\
             {}",
            ctx.task,
            Self::existing_files(ctx),
            conventions,
            ctx.file_tree,
            SOLVE_INSTRUCTIONS
        )
    }

    /// Prompt sent to every judge; solutions appear in the given order
    pub fn evaluate(ctx: &TaskContext, solutions: &[AnonymizedSolution]) -> String {
        let solutions_block = solutions
            .iter()
            .map(|s| format!("### {}\n{}", s.label, s.content))
            .collect::<Vec<_>>()
            .join("\n\n---\n\n");

        format!(
            "You are evaluating coding solutions. Score each on the rubric below.\n\n\
             ## Original Task\n{}\n\n\
             ## Existing Code Context\n{}\n\n\
             ## Solutions to Evaluate\n\n{}\n\n\
             {}\n\n\
             {}",
            ctx.task,
            Self::existing_files(ctx),
            solutions_block,
            Self::rubric(),
            JUDGE_OUTPUT_FORMAT
        )
    }

    /// Judge prompt for the second attempt after a malformed answer
    pub fn judge_retry(base_prompt: &str) -> String {
        format!("{}\n\n{}", base_prompt, JUDGE_RETRY)
    }

    /// The weighted rubric, one line per dimension
    pub fn rubric() -> String {
        let mut rubric = String::from("## Rubric\nScore each solution 1-5 (integers only) on:");
        for dimension in Dimension::ALL {
            rubric.push_str(&format!(
                "\n- {} ({}%): {}",
                dimension.label(),
                dimension.percent(),
                dimension.criteria()
            ));
        }
        rubric
    }

    fn existing_files(ctx: &TaskContext) -> String {
        ctx.files
            .iter()
            .map(|(path, content)| format!("### {}\n```\n{}\n```", path, content))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
