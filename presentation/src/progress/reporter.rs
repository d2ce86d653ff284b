//! Progress reporting for solve and evaluate runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use pantheon_application::ProgressNotifier;
use pantheon_domain::Phase;
use std::sync::Mutex;

/// Reports progress with indicatif bars on stderr
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: &Phase) -> &'static str {
        match phase {
            Phase::Solve => "Phase 2: Solve",
            Phase::Evaluate => "Phase 3: Evaluate",
        }
    }

    fn phase_short_name(phase: &Phase) -> &'static str {
        match phase {
            Phase::Solve => "Solve",
            Phase::Evaluate => "Evaluate",
        }
    }

    fn task_noun(phase: &Phase) -> &'static str {
        match phase {
            Phase::Solve => "models",
            Phase::Evaluate => "judges",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message(format!("Waiting on {} {}...", total_tasks, Self::task_noun(phase)));
        pb.enable_steady_tick(std::time::Duration::from_millis(120));

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, model: &str, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), model)
            } else {
                format!("{} {}", "x".red(), model)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_retry(&self, _phase: &Phase, model: &str) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            pb.println(format!(
                "  {} {} needed a second attempt",
                "~".yellow(),
                model
            ));
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            let phase_name = Self::phase_short_name(phase);
            pb.finish_with_message(format!("{} complete!", phase_name.green()));
        }
    }
}

/// Simple line-based progress for non-terminal stderr
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let phase_name = ProgressReporter::phase_display_name(phase);
        eprintln!(
            "{} {} ({} {})",
            "->".cyan(),
            phase_name.bold(),
            total_tasks,
            ProgressReporter::task_noun(phase)
        );
    }

    fn on_task_complete(&self, _phase: &Phase, model: &str, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), model);
        } else {
            eprintln!("  {} {} (failed)", "x".red(), model);
        }
    }

    fn on_retry(&self, _phase: &Phase, model: &str) {
        eprintln!("  {} {} needed a second attempt", "~".yellow(), model);
    }

    fn on_phase_complete(&self, _phase: &Phase) {
        eprintln!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_lifecycle() {
        let reporter = ProgressReporter::new();
        reporter.multi.set_draw_target(indicatif::ProgressDrawTarget::hidden());

        reporter.on_phase_start(&Phase::Solve, 2);
        reporter.on_task_complete(&Phase::Solve, "a", true);
        reporter.on_retry(&Phase::Solve, "a");
        reporter.on_task_complete(&Phase::Solve, "b", false);
        {
            let slot = reporter.phase_bar.lock().unwrap();
            assert_eq!(slot.as_ref().unwrap().position(), 2);
        }
        reporter.on_phase_complete(&Phase::Solve);
        assert!(reporter.phase_bar.lock().unwrap().is_none());
    }

    #[test]
    fn test_completion_without_phase_is_ignored() {
        let reporter = ProgressReporter::new();
        reporter.on_task_complete(&Phase::Evaluate, "a", true);
        reporter.on_phase_complete(&Phase::Evaluate);
    }
}
