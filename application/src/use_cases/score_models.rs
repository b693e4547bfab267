//! Score Models use case
//!
//! Aggregates graded records into accuracy and timing tables and writes
//! the report.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::record_store::{RecordStore, StoreError};
use mcq_domain::{BenchSummary, Model, Stage};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while scoring
#[derive(Error, Debug)]
pub enum ScoreModelsError {
    #[error("No models configured")]
    NoModels,

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

/// Use case for computing and saving the benchmark report
pub struct ScoreModelsUseCase {
    store: Arc<dyn RecordStore>,
}

impl ScoreModelsUseCase {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn execute(&self, models: &[Model]) -> Result<BenchSummary, ScoreModelsError> {
        self.execute_with_progress(models, &NoProgress)
    }

    pub fn execute_with_progress(
        &self,
        models: &[Model],
        progress: &dyn ProgressNotifier,
    ) -> Result<BenchSummary, ScoreModelsError> {
        if models.is_empty() {
            return Err(ScoreModelsError::NoModels);
        }

        progress.on_stage_start(&Stage::Report, models.len());
        let questions = self.store.load_questions()?;
        let mut runs = Vec::with_capacity(models.len());
        for model in models {
            runs.push((model.clone(), self.store.load_graded(model)?));
            progress.on_task_complete(&Stage::Report, model.as_str(), true);
        }

        let summary = BenchSummary::compute(&questions, &runs);
        self.store.save_report(&summary, &runs)?;
        progress.on_stage_complete(&Stage::Report);

        info!(
            "Report written for {} models over {} questions",
            runs.len(),
            questions.len()
        );
        Ok(summary)
    }
}
