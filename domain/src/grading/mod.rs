//! Grading: extraction, comparison and aggregation.
//!
//! ```text
//! ResponseRecord ──extract──▶ ExtractedAnswer ──compare──▶ GradedRecord ──▶ ModelScore
//! ```
//!
//! Everything here is pure; records are consumed and produced by value.

pub mod compare;
pub mod extract;
pub mod record;
pub mod report;
pub mod score;

pub use compare::answers_match;
pub use extract::{
    ANSWER_PATTERNS, AnswerExtractor, ExtractedAnswer, extract_answer, join_letters,
};
pub use record::{GradedRecord, ResponseRecord};
pub use report::{BenchSummary, report_row};
pub use score::{CorpusCount, CorpusSummary, ModelScore, ModelTiming, accuracy, mean_time};
