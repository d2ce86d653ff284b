//! Evaluation record - the persisted outcome of an evaluate run.

use super::anonymize::AnonymizationMap;
use super::ranking::{Judgment, RankedSolution};
use serde::{Deserialize, Serialize};

/// Hand-off artifact from evaluate to rendering (`.evaluation.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationFile {
    pub ranking: Vec<RankedSolution>,
    #[serde(default)]
    pub cherry_picks: Vec<String>,
    #[serde(default)]
    pub risks: Vec<String>,
    /// Top-ranked model, empty when nothing could be ranked
    #[serde(default)]
    pub winner: String,
    #[serde(default)]
    pub anonymization_map: AnonymizationMap,
}

impl EvaluationFile {
    /// Build the record from a finished ranking and the judgments behind it.
    pub fn new(
        ranking: Vec<RankedSolution>,
        judgments: &[Judgment],
        anonymization_map: AnonymizationMap,
    ) -> Self {
        let winner = ranking
            .first()
            .map(|r| r.model.clone())
            .unwrap_or_default();

        Self {
            ranking,
            cherry_picks: collect_notes(judgments.iter().map(|j| j.result.cherry_picks.as_str())),
            risks: collect_notes(judgments.iter().map(|j| j.result.risks.as_str())),
            winner,
            anonymization_map,
        }
    }

    pub fn has_winner(&self) -> bool {
        !self.winner.is_empty()
    }

    /// Ranking entry for a model
    pub fn find(&self, model: &str) -> Option<&RankedSolution> {
        self.ranking.iter().find(|r| r.model == model)
    }

    pub fn score_of(&self, model: &str) -> Option<f64> {
        self.find(model).map(|r| r.weighted_score)
    }
}

/// Keep non-empty notes that are not a bare "none"; no dedup.
fn collect_notes<'a>(notes: impl Iterator<Item = &'a str>) -> Vec<String> {
    notes
        .filter(|n| {
            let trimmed = n.trim();
            !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case("none")
        })
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::judge::parsing::JudgeResult;
    use crate::judge::scores::DimensionScores;
    use std::collections::BTreeMap;

    fn judgment(judge: &str, cherry: &str, risks: &str) -> Judgment {
        Judgment::new(
            judge,
            JudgeResult {
                scores: vec![],
                cherry_picks: cherry.to_string(),
                risks: risks.to_string(),
            },
        )
    }

    fn ranked(model: &str, score: f64) -> RankedSolution {
        RankedSolution {
            model: model.to_string(),
            weighted_score: score,
            dimension_averages: DimensionScores::default(),
            scores_by_judge: BTreeMap::new(),
        }
    }

    #[test]
    fn test_notes_filtered_not_deduped() {
        let judgments = vec![
            judgment("a", "Use the cache", "None"),
            judgment("b", "", "NONE"),
            judgment("c", "Use the cache", "Races on reload"),
            judgment("d", "   ", " none "),
        ];
        let eval = EvaluationFile::new(vec![], &judgments, AnonymizationMap::default());
        assert_eq!(eval.cherry_picks, vec!["Use the cache", "Use the cache"]);
        assert_eq!(eval.risks, vec!["Races on reload"]);
    }

    #[test]
    fn test_winner_is_first_ranked() {
        let eval = EvaluationFile::new(
            vec![ranked("b", 4.2), ranked("a", 3.9)],
            &[],
            AnonymizationMap::default(),
        );
        assert_eq!(eval.winner, "b");
        assert!(eval.has_winner());
        assert_eq!(eval.score_of("a"), Some(3.9));
        assert_eq!(eval.score_of("z"), None);
    }

    #[test]
    fn test_empty_ranking_has_empty_winner() {
        let eval = EvaluationFile::new(vec![], &[], AnonymizationMap::default());
        assert_eq!(eval.winner, "");
        assert!(!eval.has_winner());
    }

    #[test]
    fn test_wire_format_field_names() {
        let eval = EvaluationFile::new(vec![ranked("a", 4.0)], &[], AnonymizationMap::default());
        let json = serde_json::to_value(&eval).unwrap();
        for key in ["ranking", "cherry_picks", "risks", "winner", "anonymization_map"] {
            assert!(json.get(key).is_some(), "missing {}", key);
        }
        let first = &json["ranking"][0];
        for key in ["model", "weighted_score", "dimension_averages", "scores_by_judge"] {
            assert!(first.get(key).is_some(), "missing {}", key);
        }
    }
}
