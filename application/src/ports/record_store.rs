//! Record store port
//!
//! Persistence of the records handed from one pipeline stage to the next.
//! Every stage can be re-run on its own from what the previous stage saved.

use mcq_domain::{BenchSummary, GradedRecord, Model, QuestionRecord, ResponseRecord, Sheet};
use thiserror::Error;

/// Errors that can occur while loading or saving records
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    #[error("Malformed records in {path}: {message}")]
    Malformed { path: String, message: String },
}

/// Storage for sheets, questions, responses, graded records and reports
pub trait RecordStore: Send + Sync {
    /// Annotated spreadsheet rows, sheet by sheet
    fn load_sheets(&self) -> Result<Vec<Sheet>, StoreError>;

    fn save_questions(&self, questions: &[QuestionRecord]) -> Result<(), StoreError>;
    fn load_questions(&self) -> Result<Vec<QuestionRecord>, StoreError>;

    fn save_responses(&self, model: &Model, records: &[ResponseRecord]) -> Result<(), StoreError>;
    fn load_responses(&self, model: &Model) -> Result<Vec<ResponseRecord>, StoreError>;

    fn save_graded(&self, model: &Model, records: &[GradedRecord]) -> Result<(), StoreError>;
    fn load_graded(&self, model: &Model) -> Result<Vec<GradedRecord>, StoreError>;

    /// Summary tables plus one flattened table per model
    fn save_report(
        &self,
        summary: &BenchSummary,
        runs: &[(Model, Vec<GradedRecord>)],
    ) -> Result<(), StoreError>;
}
