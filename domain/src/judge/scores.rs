//! Rubric dimensions, weights and score arithmetic.

use serde::{Deserialize, Serialize};

/// One rubric axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Precision,
    Accuracy,
    Creativity,
    Simplicity,
}

impl Dimension {
    /// All dimensions in rubric order
    pub const ALL: [Dimension; 4] = [
        Dimension::Precision,
        Dimension::Accuracy,
        Dimension::Creativity,
        Dimension::Simplicity,
    ];

    /// Weight in the final score; the four weights sum to 1.0
    pub fn weight(&self) -> f64 {
        match self {
            Dimension::Precision => 0.35,
            Dimension::Accuracy => 0.30,
            Dimension::Creativity => 0.20,
            Dimension::Simplicity => 0.15,
        }
    }

    /// Weight as a whole percentage, for prompts and reports
    pub fn percent(&self) -> u32 {
        (self.weight() * 100.0).round() as u32
    }

    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Precision => "Precision",
            Dimension::Accuracy => "Accuracy",
            Dimension::Creativity => "Creativity",
            Dimension::Simplicity => "Simplicity",
        }
    }

    /// What judges are told to look for
    pub fn criteria(&self) -> &'static str {
        match self {
            Dimension::Precision => {
                "Solves the exact problem. No scope creep. No over/under-solving."
            }
            Dimension::Accuracy => "Logic correct. Edge cases handled. Type-safe. No bugs.",
            Dimension::Creativity => "Elegant approach. Right abstractions. Good patterns.",
            Dimension::Simplicity => "Readable. Minimal moving parts. Easy to maintain.",
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Scores on the four rubric dimensions
///
/// Raw judge scores are integers in 1..=5; averages carry two decimals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DimensionScores {
    pub precision: f64,
    pub accuracy: f64,
    pub creativity: f64,
    pub simplicity: f64,
}

impl DimensionScores {
    pub fn new(precision: f64, accuracy: f64, creativity: f64, simplicity: f64) -> Self {
        Self {
            precision,
            accuracy,
            creativity,
            simplicity,
        }
    }

    pub fn get(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Precision => self.precision,
            Dimension::Accuracy => self.accuracy,
            Dimension::Creativity => self.creativity,
            Dimension::Simplicity => self.simplicity,
        }
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(
            f(self.precision),
            f(self.accuracy),
            f(self.creativity),
            f(self.simplicity),
        )
    }

    fn add(self, other: &Self) -> Self {
        Self::new(
            self.precision + other.precision,
            self.accuracy + other.accuracy,
            self.creativity + other.creativity,
            self.simplicity + other.simplicity,
        )
    }
}

/// Round half away from zero to two decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Weighted sum `0.35p + 0.30a + 0.20c + 0.15s`
pub fn weighted_score(scores: &DimensionScores) -> f64 {
    Dimension::ALL
        .iter()
        .map(|d| scores.get(*d) * d.weight())
        .sum()
}

/// Per-dimension arithmetic mean rounded to two decimals; all zero when empty
pub fn average_dimensions(scores: &[DimensionScores]) -> DimensionScores {
    if scores.is_empty() {
        return DimensionScores::default();
    }
    let n = scores.len() as f64;
    scores
        .iter()
        .fold(DimensionScores::default(), |acc, s| acc.add(s))
        .map(|sum| round2(sum / n))
}
