//! Progress notification port
//!
//! Defines the interface for reporting progress during a run.

use pantheon_domain::Phase;

/// Callback for progress updates during solve and evaluate
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when one model's task settles within a phase
    fn on_task_complete(&self, phase: &Phase, model: &str, success: bool);

    /// Called when a judge needed a second attempt (transport error or malformed answer)
    fn on_retry(&self, _phase: &Phase, _model: &str) {}

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &Phase, _model: &str, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
