//! Progress reporting for benchmark runs

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use mcq_application::ports::progress::ProgressNotifier;
use mcq_domain::{Model, Stage};
use std::collections::HashMap;
use std::sync::Mutex;

/// Reports progress with a bar per stage and, while calling, a bar per model
pub struct ProgressReporter {
    multi: MultiProgress,
    model_bars: Mutex<HashMap<String, ProgressBar>>,
    stage_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            model_bars: Mutex::new(HashMap::new()),
            stage_bar: Mutex::new(None),
        }
    }

    fn stage_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn model_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("  {prefix:<28.bold} [{bar:30.green/white}] {pos}/{len} {msg} {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_stage_start(&self, stage: &Stage, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::stage_style());
        pb.set_prefix(stage.display_name().to_string());
        pb.set_message("Starting...");

        if let Ok(mut slot) = self.stage_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _stage: &Stage, task: &str, success: bool) {
        if let Ok(mut bars) = self.model_bars.lock()
            && let Some(bar) = bars.remove(task)
        {
            bar.finish_with_message(if success { "done" } else { "with errors" });
        }

        if let Ok(slot) = self.stage_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), task)
            } else {
                format!("{} {}", "x".red(), task)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_stage_complete(&self, stage: &Stage) {
        if let Ok(mut slot) = self.stage_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} complete!", stage.display_name().green()));
        }
        if let Ok(mut bars) = self.model_bars.lock() {
            for (_, bar) in bars.drain() {
                bar.abandon();
            }
        }
    }

    fn on_model_start(&self, model: &Model, total_questions: usize) {
        let bar = self.multi.add(ProgressBar::new(total_questions as u64));
        bar.set_style(Self::model_style());
        bar.set_prefix(model.to_string());

        if let Ok(mut bars) = self.model_bars.lock() {
            bars.insert(model.to_string(), bar);
        }
    }

    fn on_question_complete(&self, model: &Model, success: bool) {
        if let Ok(bars) = self.model_bars.lock()
            && let Some(bar) = bars.get(model.as_str())
        {
            if !success {
                bar.set_message("failures".red().to_string());
            }
            bar.inc(1);
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_stage_start(&self, stage: &Stage, total_tasks: usize) {
        println!(
            "{} {} ({} tasks)",
            "->".cyan(),
            stage.display_name().bold(),
            total_tasks
        );
    }

    fn on_task_complete(&self, _stage: &Stage, task: &str, success: bool) {
        if success {
            println!("  {} {}", "v".green(), task);
        } else {
            println!("  {} {} (with errors)", "x".red(), task);
        }
    }

    fn on_stage_complete(&self, _stage: &Stage) {
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reporter_tracks_model_bars() {
        let reporter = ProgressReporter::new();
        reporter.on_stage_start(&Stage::Call, 2);
        reporter.on_model_start(&Model::Gpt4o, 3);
        reporter.on_question_complete(&Model::Gpt4o, true);
        reporter.on_question_complete(&Model::Gpt4o, false);

        assert_eq!(reporter.model_bars.lock().unwrap()["gpt-4o"].position(), 2);

        reporter.on_task_complete(&Stage::Call, "gpt-4o", false);
        assert!(reporter.model_bars.lock().unwrap().is_empty());
        assert_eq!(
            reporter.stage_bar.lock().unwrap().as_ref().unwrap().position(),
            1
        );

        reporter.on_stage_complete(&Stage::Call);
        assert!(reporter.stage_bar.lock().unwrap().is_none());
    }
}
