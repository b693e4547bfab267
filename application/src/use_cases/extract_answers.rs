//! Extract Answers use case
//!
//! Reads each model's saved replies, extracts the selected letters and
//! judges them against the ground truth.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::record_store::{RecordStore, StoreError};
use mcq_domain::{AnswerExtractor, GradedRecord, Model, Stage, accuracy};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Errors that can occur while extracting answers
#[derive(Error, Debug)]
pub enum ExtractAnswersError {
    #[error("No models configured")]
    NoModels,

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

/// Graded records of each model, in input model order
pub type ModelGrades = Vec<(Model, Vec<GradedRecord>)>;

/// Use case for grading saved replies
pub struct ExtractAnswersUseCase {
    store: Arc<dyn RecordStore>,
    extractor: AnswerExtractor,
}

impl ExtractAnswersUseCase {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            store,
            extractor: AnswerExtractor::default(),
        }
    }

    /// Use a custom rule set instead of the built-in patterns
    pub fn with_extractor(mut self, extractor: AnswerExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn execute(&self, models: &[Model]) -> Result<ModelGrades, ExtractAnswersError> {
        self.execute_with_progress(models, &NoProgress)
    }

    pub fn execute_with_progress(
        &self,
        models: &[Model],
        progress: &dyn ProgressNotifier,
    ) -> Result<ModelGrades, ExtractAnswersError> {
        if models.is_empty() {
            return Err(ExtractAnswersError::NoModels);
        }

        progress.on_stage_start(&Stage::Extract, models.len());
        let mut runs = Vec::with_capacity(models.len());
        for model in models {
            let responses = self.store.load_responses(model)?;
            let graded: Vec<GradedRecord> = responses
                .into_iter()
                .map(|r| r.grade(&self.extractor))
                .collect();

            info!(
                "Model {}: {} records, accuracy {}",
                model,
                graded.len(),
                accuracy(&graded)
                    .map(|a| format!("{:.4}", a))
                    .unwrap_or_else(|| "-".to_string())
            );
            self.store.save_graded(model, &graded)?;
            progress.on_task_complete(&Stage::Extract, model.as_str(), true);
            runs.push((model.clone(), graded));
        }
        progress.on_stage_complete(&Stage::Extract);

        Ok(runs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MemoryStore, question};
    use mcq_domain::ResponseRecord;

    fn store() -> Arc<MemoryStore> {
        let store = MemoryStore::default();
        store.responses.lock().unwrap().insert(
            "m".to_string(),
            vec![
                ResponseRecord::new(question("VN上来-受事N", 1, vec!['A']), "答案是A", 1.0),
                ResponseRecord::new(question("VN上来-受事N", 2, vec!['B']), "选A", 2.0),
                ResponseRecord::new(question("VN上来-受事N", 3, vec!['A', 'B']), "A和B都正确", 0.5),
                ResponseRecord::new(question("VN上来-受事N", 4, vec!['A']), "", 0.1),
            ],
        );
        Arc::new(store)
    }

    #[test]
    fn test_grades_and_saves_records() {
        let store = store();
        let use_case = ExtractAnswersUseCase::new(store.clone());

        let runs = use_case.execute(&[Model::from("m")]).unwrap();
        let judges: Vec<bool> = runs[0].1.iter().map(|g| g.judge).collect();
        assert_eq!(judges, vec![true, false, true, false]);
        assert!(runs[0].1[3].extracted_answer.is_empty());
        assert_eq!(store.graded.lock().unwrap()["m"].len(), 4);
    }

    #[test]
    fn test_custom_extractor() {
        let extractor = AnswerExtractor::from_patterns(&[r"选([A-Z])"]).unwrap();
        let use_case = ExtractAnswersUseCase::new(store()).with_extractor(extractor);

        let runs = use_case.execute(&[Model::from("m")]).unwrap();
        let judges: Vec<bool> = runs[0].1.iter().map(|g| g.judge).collect();
        assert_eq!(judges, vec![false, false, false, false]);
        assert_eq!(runs[0].1[1].extracted_answer.letters(), &['A']);
    }

    #[test]
    fn test_missing_responses_is_store_error() {
        let use_case = ExtractAnswersUseCase::new(store());
        let err = use_case.execute(&[Model::from("other")]).unwrap_err();
        assert!(matches!(err, ExtractAnswersError::StoreError(StoreError::NotFound(_))));
    }

    #[test]
    fn test_no_models_is_rejected() {
        let use_case = ExtractAnswersUseCase::new(store());
        assert!(matches!(use_case.execute(&[]), Err(ExtractAnswersError::NoModels)));
    }
}
