//! Build Questions use case
//!
//! Turns the annotated spreadsheet rows into the question set.

use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::record_store::{RecordStore, StoreError};
use mcq_domain::{CorpusConfig, DomainError, QuestionBuilder, QuestionRecord, Sheet, Stage};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while building questions
#[derive(Error, Debug)]
pub enum BuildQuestionsError {
    #[error("Sheet not found in workbook: {0}")]
    MissingSheet(String),

    #[error("Invalid sheet data: {0}")]
    InvalidRow(#[from] DomainError),

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

/// Input for the BuildQuestions use case
#[derive(Debug, Clone, Default)]
pub struct BuildQuestionsInput {
    /// Seed for option shuffling; fresh entropy when absent
    pub seed: Option<u64>,
}

impl BuildQuestionsInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Use case for building the question set from the sheets
pub struct BuildQuestionsUseCase {
    store: Arc<dyn RecordStore>,
    corpus: CorpusConfig,
}

impl BuildQuestionsUseCase {
    pub fn new(store: Arc<dyn RecordStore>, corpus: CorpusConfig) -> Self {
        Self { store, corpus }
    }

    pub fn execute(
        &self,
        input: BuildQuestionsInput,
    ) -> Result<Vec<QuestionRecord>, BuildQuestionsError> {
        self.execute_with_progress(input, &NoProgress)
    }

    /// Build every configured sheet in configuration order and save the result
    pub fn execute_with_progress(
        &self,
        input: BuildQuestionsInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<Vec<QuestionRecord>, BuildQuestionsError> {
        let sheets = self.store.load_sheets()?;
        let mut rng = match input.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let builder = QuestionBuilder::new(&self.corpus);
        let mut questions = Vec::new();

        progress.on_stage_start(&Stage::Build, self.corpus.sheets.len());
        for spec in &self.corpus.sheets {
            let sheet = find_sheet(&sheets, &spec.name)?;
            let built = builder.build_sheet(sheet, &mut rng)?;
            debug!(
                "Sheet {} ({} rows) -> {} questions",
                sheet.name,
                sheet.rows.len(),
                built.len()
            );
            progress.on_task_complete(&Stage::Build, &spec.name, true);
            questions.extend(built);
        }
        progress.on_stage_complete(&Stage::Build);

        info!(
            "Built {} questions from {} sheets",
            questions.len(),
            self.corpus.sheets.len()
        );
        self.store.save_questions(&questions)?;
        Ok(questions)
    }
}

fn find_sheet<'s>(sheets: &'s [Sheet], name: &str) -> Result<&'s Sheet, BuildQuestionsError> {
    sheets
        .iter()
        .find(|s| s.name == name)
        .ok_or_else(|| BuildQuestionsError::MissingSheet(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MemoryStore, middle_row, single_sheet_corpus};
    use mcq_domain::{QuestionKind, SheetRow};

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_sheets(vec![
            Sheet::new("V上N来-受事N", vec![middle_row(), middle_row()]),
            Sheet::new("说明", vec![SheetRow::default()]),
        ]))
    }

    #[test]
    fn test_builds_and_saves_questions() {
        let store = store();
        let use_case = BuildQuestionsUseCase::new(store.clone(), single_sheet_corpus());

        let questions = use_case
            .execute(BuildQuestionsInput::new().with_seed(1))
            .unwrap();

        assert_eq!(questions.len(), 6);
        assert_eq!(questions[0].kind, QuestionKind::Phrase);
        assert_eq!(questions[5].kind, QuestionKind::Meaning);
        assert!(questions.iter().all(|q| q.domain == "V上N来-受事N"));
        assert_eq!(store.questions.lock().unwrap().as_ref().unwrap().len(), 6);
    }

    #[test]
    fn test_same_seed_same_questions() {
        let use_case = BuildQuestionsUseCase::new(store(), single_sheet_corpus());

        let first = use_case.execute(BuildQuestionsInput::new().with_seed(42)).unwrap();
        let second = use_case.execute(BuildQuestionsInput::new().with_seed(42)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_sheet_is_reported() {
        let store = Arc::new(MemoryStore::with_sheets(vec![Sheet::new(
            "V上来N-受事N",
            vec![middle_row()],
        )]));
        let use_case = BuildQuestionsUseCase::new(store.clone(), single_sheet_corpus());

        let err = use_case.execute(BuildQuestionsInput::new()).unwrap_err();
        assert!(
            matches!(err, BuildQuestionsError::MissingSheet(ref name) if name == "V上N来-受事N")
        );
        assert!(store.questions.lock().unwrap().is_none());
    }

    #[test]
    fn test_incomplete_row_is_reported() {
        let mut row = middle_row();
        row.0.shift_remove("V上来N");
        let store = Arc::new(MemoryStore::with_sheets(vec![Sheet::new(
            "V上N来-受事N",
            vec![row],
        )]));
        let use_case = BuildQuestionsUseCase::new(store, single_sheet_corpus());

        let err = use_case.execute(BuildQuestionsInput::new()).unwrap_err();
        assert!(matches!(err, BuildQuestionsError::InvalidRow(_)));
    }
}
