//! Configuration value objects for the domain layer
//!
//! Corpus vocabulary (sheet names, column names, question templates) is
//! carried in an immutable [`CorpusConfig`] that is handed to the builder
//! and the scorer at construction.

mod corpus;

pub use corpus::{ColumnNames, CorpusConfig, QuestionTemplates};
