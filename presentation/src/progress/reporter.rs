//! Progress reporting for workflow runs

use assessgen_application::WorkflowProgressNotifier;
use assessgen_domain::{QuestionId, WizardStep};
use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Mutex;
use std::time::Duration;

const STEP_COUNT: usize = 3;

/// Reports progress with indicatif spinners and a bar for the store loop
pub struct ProgressReporter {
    multi: MultiProgress,
    active: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            active: Mutex::new(None),
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn step_label(step: WizardStep) -> String {
        format!("Step {}/{}: {}", step.position(), STEP_COUNT, step.display_name())
    }

    fn start_spinner(&self, prefix: &str, message: String) {
        let pb = self.multi.add(ProgressBar::new_spinner());
        pb.set_style(Self::spinner_style());
        pb.set_prefix(prefix.to_string());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        self.replace_active(Some(pb));
    }

    fn replace_active(&self, pb: Option<ProgressBar>) {
        if let Ok(mut active) = self.active.lock()
            && let Some(previous) = std::mem::replace(&mut *active, pb)
        {
            previous.finish_and_clear();
        }
    }

    fn finish_active(&self, message: String) {
        if let Ok(mut active) = self.active.lock()
            && let Some(pb) = active.take()
        {
            pb.finish_with_message(message);
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl WorkflowProgressNotifier for ProgressReporter {
    fn on_step_changed(&self, step: WizardStep) {
        let _ = self
            .multi
            .println(format!("{} {}", "->".cyan(), Self::step_label(step).bold()));
    }

    fn on_generation_start(&self, question_count: u64) {
        self.start_spinner("Generate", format!("Drafting {} questions...", question_count));
    }

    fn on_generation_complete(&self, success: bool, draft_count: usize) {
        if success {
            self.finish_active(format!("{} {} drafts", "v".green(), draft_count));
        } else {
            self.finish_active(format!("{} generation failed", "x".red()));
        }
    }

    fn on_persist_start(&self, total: usize) {
        let pb = self.multi.add(ProgressBar::new(total as u64));
        pb.set_style(Self::bar_style());
        pb.set_prefix("Store");
        pb.set_message("Saving questions...");
        self.replace_active(Some(pb));
    }

    fn on_question_persisted(&self, draft_index: usize, id: &QuestionId) {
        if let Ok(active) = self.active.lock()
            && let Some(pb) = active.as_ref()
        {
            pb.set_message(format!("{} #{} -> {}", "v".green(), draft_index + 1, id));
            pb.inc(1);
        }
    }

    fn on_persist_complete(&self, persisted: usize, failed_at: Option<usize>) {
        match failed_at {
            None => self.finish_active(format!("{} {} stored", "v".green(), persisted)),
            Some(index) => self.finish_active(format!(
                "{} stopped at question {} ({} stored)",
                "x".red(),
                index + 1,
                persisted
            )),
        }
    }

    fn on_submit_start(&self) {
        self.start_spinner("Submit", "Submitting assessment...".to_string());
    }

    fn on_submit_complete(&self, success: bool) {
        if success {
            self.finish_active(format!("{}", "Submitted!".green()));
        } else {
            self.finish_active(format!("{} submission failed", "x".red()));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl WorkflowProgressNotifier for SimpleProgress {
    fn on_step_changed(&self, step: WizardStep) {
        println!("{} {}", "->".cyan(), ProgressReporter::step_label(step).bold());
    }

    fn on_generation_start(&self, question_count: u64) {
        println!("  Generating {} questions...", question_count);
    }

    fn on_generation_complete(&self, success: bool, draft_count: usize) {
        if success {
            println!("  {} {} drafts", "v".green(), draft_count);
        } else {
            println!("  {} generation failed", "x".red());
        }
    }

    fn on_question_persisted(&self, draft_index: usize, id: &QuestionId) {
        println!("  {} question {} stored as {}", "v".green(), draft_index + 1, id);
    }

    fn on_persist_complete(&self, _persisted: usize, failed_at: Option<usize>) {
        if let Some(index) = failed_at {
            println!("  {} question {} was not stored", "x".red(), index + 1);
        }
    }

    fn on_submit_complete(&self, success: bool) {
        if success {
            println!("  {} submitted", "v".green());
        } else {
            println!("  {} submission failed", "x".red());
        }
    }
}
