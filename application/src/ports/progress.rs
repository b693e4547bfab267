//! Progress notification port
//!
//! Defines the interface for reporting progress during a benchmark run.

use mcq_domain::{Model, Stage};

/// Callback for progress updates during a benchmark run
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain lines, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a stage starts
    fn on_stage_start(&self, stage: &Stage, total_tasks: usize);

    /// Called when a task (a sheet, a model) completes within a stage
    fn on_task_complete(&self, stage: &Stage, task: &str, success: bool);

    /// Called when a stage completes
    fn on_stage_complete(&self, stage: &Stage);

    // ==================== Per-question Callbacks ====================

    /// Called when a model starts working through its questions
    fn on_model_start(&self, _model: &Model, _total_questions: usize) {}

    /// Called after each question sent to a model
    fn on_question_complete(&self, _model: &Model, _success: bool) {}
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_stage_start(&self, _stage: &Stage, _total_tasks: usize) {}
    fn on_task_complete(&self, _stage: &Stage, _task: &str, _success: bool) {}
    fn on_stage_complete(&self, _stage: &Stage) {}
}
