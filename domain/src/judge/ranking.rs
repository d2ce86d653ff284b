//! Aggregation of judgments into a ranking.
//!
//! Protocol per evaluate run:
//!
//! 1. Resolve every score entry's label back to a model name; unresolvable
//!    labels are dropped.
//! 2. Drop entries where the judge scored its own solution.
//! 3. Group the rest by solution model, average each dimension, weight.
//! 4. Sort by weighted score, then precision average, then accuracy average,
//!    all descending. Full ties keep model-name order.

use super::anonymize::AnonymizationMap;
use super::parsing::JudgeResult;
use super::scores::{DimensionScores, average_dimensions, round2, weighted_score};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A valid response from one judge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgment {
    /// Name of the judging model
    pub judge: String,
    pub result: JudgeResult,
}

impl Judgment {
    pub fn new(judge: impl Into<String>, result: JudgeResult) -> Self {
        Self {
            judge: judge.into(),
            result,
        }
    }
}

/// Final standing of one model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedSolution {
    pub model: String,
    /// `weighted_score(dimension_averages)` rounded to two decimals
    pub weighted_score: f64,
    pub dimension_averages: DimensionScores,
    /// Raw scores per contributing judge; never contains the model itself
    pub scores_by_judge: BTreeMap<String, DimensionScores>,
}

impl RankedSolution {
    fn from_contributions(model: String, contributions: Contributions) -> Self {
        let dimension_averages = average_dimensions(&contributions.scores);
        Self {
            model,
            weighted_score: round2(weighted_score(&dimension_averages)),
            dimension_averages,
            scores_by_judge: contributions.by_judge,
        }
    }

    /// Names of the judges that scored this model
    pub fn judges(&self) -> impl Iterator<Item = &str> {
        self.scores_by_judge.keys().map(String::as_str)
    }

    /// Ranking order: higher weighted score first, then precision, then accuracy
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        other
            .weighted_score
            .total_cmp(&self.weighted_score)
            .then_with(|| {
                other
                    .dimension_averages
                    .precision
                    .total_cmp(&self.dimension_averages.precision)
            })
            .then_with(|| {
                other
                    .dimension_averages
                    .accuracy
                    .total_cmp(&self.dimension_averages.accuracy)
            })
    }
}

/// A dropped self-judgment, kept so callers can log it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfScore {
    pub judge: String,
    pub label: String,
}

/// Result of [`aggregate`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// Models in rank order, at most one entry each
    pub ranking: Vec<RankedSolution>,
    pub self_scores: Vec<SelfScore>,
    /// Score entries whose label did not resolve, as (judge, index)
    pub unresolved: Vec<(String, u32)>,
}

impl Aggregation {
    pub fn winner(&self) -> Option<&RankedSolution> {
        self.ranking.first()
    }
}

/// Non-self scores received by one model
#[derive(Default)]
struct Contributions {
    /// Every entry, averaged as a group
    scores: Vec<DimensionScores>,
    /// Last entry per judge
    by_judge: BTreeMap<String, DimensionScores>,
}

/// De-anonymize, exclude self-scores, average, weight and rank.
///
/// Every non-self entry counts toward the averages. A judge listed twice
/// for the same model keeps only its last entry in `scores_by_judge`.
pub fn aggregate(judgments: &[Judgment], map: &AnonymizationMap) -> Aggregation {
    let mut by_model: BTreeMap<String, Contributions> = BTreeMap::new();
    let mut self_scores = Vec::new();
    let mut unresolved = Vec::new();

    for judgment in judgments {
        for entry in &judgment.result.scores {
            let Some(model) = map.resolve(entry.solution) else {
                unresolved.push((judgment.judge.clone(), entry.solution));
                continue;
            };

            if model == judgment.judge {
                self_scores.push(SelfScore {
                    judge: judgment.judge.clone(),
                    label: AnonymizationMap::label(entry.solution),
                });
                continue;
            }

            let dimensions = entry.dimensions();
            let contributions = by_model.entry(model.to_string()).or_default();
            contributions.scores.push(dimensions);
            contributions
                .by_judge
                .insert(judgment.judge.clone(), dimensions);
        }
    }

    let mut ranking: Vec<_> = by_model
        .into_iter()
        .map(|(model, contributions)| RankedSolution::from_contributions(model, contributions))
        .collect();
    ranking.sort_by(RankedSolution::rank_cmp);

    Aggregation {
        ranking,
        self_scores,
        unresolved,
    }
}
