//! Anonymization of candidate solutions before judging.
//!
//! Judges see solutions as "Solution 1".."Solution k" in a uniformly random
//! order. The label order carries no information about which model wrote
//! which solution, so a judge cannot spot its own answer by position. The
//! [`AnonymizationMap`] is the only link back to model names.

use crate::solve::solution::SolutionResult;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const LABEL_PREFIX: &str = "Solution ";

/// A solution as shown to judges: label and content only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnonymizedSolution {
    pub label: String,
    pub content: String,
}

/// Label to model name lookup, persisted with the evaluation for audit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnonymizationMap(BTreeMap<String, String>);

impl AnonymizationMap {
    /// Label text for a 1-based index
    pub fn label(index: u32) -> String {
        format!("{}{}", LABEL_PREFIX, index)
    }

    /// Model behind the label with the given 1-based index
    pub fn resolve(&self, index: u32) -> Option<&str> {
        self.0.get(&Self::label(index)).map(String::as_str)
    }

    /// Model behind a full label such as "Solution 2"
    pub fn model_for(&self, label: &str) -> Option<&str> {
        self.0.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in label index order ("Solution 2" before "Solution 10")
    pub fn entries(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .0
            .iter()
            .map(|(label, model)| (label.as_str(), model.as_str()))
            .collect();
        entries.sort_by_key(|(label, _)| {
            label
                .strip_prefix(LABEL_PREFIX)
                .and_then(|n| n.parse::<u32>().ok())
                .unwrap_or(u32::MAX)
        });
        entries
    }

    fn insert(&mut self, label: String, model: String) {
        self.0.insert(label, model);
    }
}

/// Output of [`shuffle_and_anonymize`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anonymized {
    /// Solutions in label order
    pub solutions: Vec<AnonymizedSolution>,
    pub map: AnonymizationMap,
}

/// Shuffle `solutions` uniformly and relabel them "Solution 1".."Solution k".
///
/// The permutation comes from `rng` (Fisher-Yates via [`SliceRandom::shuffle`]),
/// so every ordering is reachable and tests can pass a seeded generator.
pub fn shuffle_and_anonymize<R: Rng + ?Sized>(
    solutions: &[SolutionResult],
    rng: &mut R,
) -> Anonymized {
    let mut order: Vec<usize> = (0..solutions.len()).collect();
    order.shuffle(rng);

    let mut map = AnonymizationMap::default();
    let anonymized = order
        .into_iter()
        .enumerate()
        .map(|(position, original)| {
            let label = AnonymizationMap::label(position as u32 + 1);
            let solution = &solutions[original];
            map.insert(label.clone(), solution.model.clone());
            AnonymizedSolution {
                label,
                content: solution.content.clone(),
            }
        })
        .collect();

    Anonymized {
        solutions: anonymized,
        map,
    }
}
