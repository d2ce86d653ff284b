//! Run orchestration vocabulary shared by the use cases and progress display.

/// Minimum number of successful solutions, and of valid judgments, needed
/// to move past a phase.
pub const MIN_QUORUM: usize = 2;

/// A phase of a pantheon run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Every model answers the task
    Solve,
    /// Every successful model judges the anonymized answers
    Evaluate,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Solve => "solve",
            Phase::Evaluate => "evaluate",
        }
    }

    /// Artifact written when the phase finishes
    pub fn artifact(&self) -> &'static str {
        match self {
            Phase::Solve => ".solutions.json",
            Phase::Evaluate => ".evaluation.json",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
