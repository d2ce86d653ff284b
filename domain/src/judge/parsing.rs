//! Judge response parsing.
//!
//! Judges are told to answer with a bare JSON object, but they wrap it in
//! prose or markdown fences often enough that this parser tolerates both.
//! Malformed output is an expected case, so the result is an `Option`, never
//! an error.
//!
//! | Input | Result |
//! |-------|--------|
//! | Fenced or prose-wrapped JSON | Parsed from the `{ … }` span |
//! | Score outside 1..=5 or fractional | Rounded, then clamped |
//! | `scores` missing, empty, or not a list | `None` |
//! | Entry missing a numeric field | `None` |
//! | Invalid JSON | `None` |

use super::scores::DimensionScores;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::sync::LazyLock;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("fence pattern is valid")
});

const MIN_SCORE: f64 = 1.0;
const MAX_SCORE: f64 = 5.0;

/// One judge's scores for one anonymized solution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolutionScore {
    /// Index N of the "Solution N" label
    pub solution: u32,
    pub precision: u8,
    pub accuracy: u8,
    pub creativity: u8,
    pub simplicity: u8,
    #[serde(default)]
    pub notes: String,
}

impl SolutionScore {
    pub fn dimensions(&self) -> DimensionScores {
        DimensionScores::new(
            f64::from(self.precision),
            f64::from(self.accuracy),
            f64::from(self.creativity),
            f64::from(self.simplicity),
        )
    }
}

/// A validated judge response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JudgeResult {
    pub scores: Vec<SolutionScore>,
    #[serde(default)]
    pub cherry_picks: String,
    #[serde(default)]
    pub risks: String,
}

/// Extract and validate a [`JudgeResult`] from a judge's free text.
///
/// # Examples
///
/// ```
/// use pantheon_domain::parse_judge_response;
///
/// let text = r#"Sure! {"scores":[{"solution":1,"precision":7,"accuracy":4,"creativity":3,"simplicity":4}]}"#;
/// let result = parse_judge_response(text).unwrap();
/// assert_eq!(result.scores[0].precision, 5);
///
/// assert!(parse_judge_response("I liked Solution 2 best.").is_none());
/// ```
pub fn parse_judge_response(text: &str) -> Option<JudgeResult> {
    let json = extract_object(text);
    let parsed: Value = serde_json::from_str(json).ok()?;
    let object = parsed.as_object()?;

    let entries = object.get("scores")?.as_array()?;
    if entries.is_empty() {
        return None;
    }

    let scores = entries
        .iter()
        .map(|entry| parse_score_entry(entry.as_object()?))
        .collect::<Option<Vec<_>>>()?;

    Some(JudgeResult {
        scores,
        cherry_picks: text_field(object, "cherry_picks"),
        risks: text_field(object, "risks"),
    })
}

/// Narrow the response to the JSON object: first fenced block if any,
/// then the span from the first `{` to the last `}`.
fn extract_object(text: &str) -> &str {
    let mut candidate = text.trim();

    if let Some(caps) = FENCED_BLOCK.captures(candidate)
        && let Some(inner) = caps.get(1)
    {
        candidate = inner.as_str().trim();
    }

    if let Some(start) = candidate.find('{')
        && let Some(end) = candidate.rfind('}')
        && end > start
    {
        candidate = &candidate[start..=end];
    }

    candidate
}

fn parse_score_entry(entry: &Map<String, Value>) -> Option<SolutionScore> {
    let number = |key: &str| entry.get(key).and_then(Value::as_f64);

    let solution = number("solution")?;
    let precision = number("precision")?;
    let accuracy = number("accuracy")?;
    let creativity = number("creativity")?;
    let simplicity = number("simplicity")?;

    Some(SolutionScore {
        solution: label_index(solution),
        precision: clamp_score(precision),
        accuracy: clamp_score(accuracy),
        creativity: clamp_score(creativity),
        simplicity: clamp_score(simplicity),
        notes: entry
            .get("notes")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
    })
}

/// Non-integral or negative indices map to 0, which no label uses, so the
/// entry is dropped later during de-anonymization.
fn label_index(value: f64) -> u32 {
    if value.fract() == 0.0 && value >= 1.0 && value <= f64::from(u32::MAX) {
        value as u32
    } else {
        0
    }
}

fn clamp_score(value: f64) -> u8 {
    value.round().clamp(MIN_SCORE, MAX_SCORE) as u8
}

/// String fields default to empty; a list of strings is joined line by line.
fn text_field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        _ => String::new(),
    }
}
