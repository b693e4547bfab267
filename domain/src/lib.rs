//! Domain layer for mcq-bench
//!
//! This crate contains the records, the corpus builder and the grading
//! logic. It performs no I/O and has no dependencies on infrastructure or
//! presentation concerns.
//!
//! # Core Concepts
//!
//! ## Answer extraction
//!
//! Models answer in free text. [`AnswerExtractor`] turns a reply into the
//! set of option letters it selects, using a priority-ordered rule table
//! with first-match-wins selection and a monotonicity cut-off.
//!
//! ## Grading
//!
//! [`answers_match`] compares an extracted answer with the ground truth
//! (order-insensitive, no partial credit); [`ModelScore`] and
//! [`ModelTiming`] aggregate graded records per kind and per construction.

pub mod config;
pub mod core;
pub mod corpus;
pub mod grading;
pub mod pipeline;
pub mod prompt;

// Re-export commonly used types
pub use config::{ColumnNames, CorpusConfig, QuestionTemplates};
pub use core::{
    error::DomainError,
    model::Model,
    question::{QuestionKind, QuestionRecord, option_letter},
};
pub use corpus::{Construction, QuestionBuilder, Sheet, SheetRow, SheetSpec};
pub use grading::{
    AnswerExtractor, BenchSummary, CorpusCount, CorpusSummary, ExtractedAnswer, GradedRecord,
    ModelScore, ModelTiming, ResponseRecord, accuracy, answers_match, extract_answer,
    join_letters, mean_time, report_row,
};
pub use pipeline::Stage;
pub use prompt::PromptTemplate;
