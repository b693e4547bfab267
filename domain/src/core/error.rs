//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, PartialEq)]
pub enum DomainError {
    #[error("Unknown sheet: {0}")]
    UnknownSheet(String),

    #[error("Sheet {sheet}, row {row}: missing column {column}")]
    MissingColumn {
        sheet: String,
        row: usize,
        column: String,
    },

    #[error("Sheet {sheet}, row {row}: column {column} is not {expected}")]
    InvalidCell {
        sheet: String,
        row: usize,
        column: String,
        expected: &'static str,
    },

    #[error("Sheet {sheet}, row {row}: column {column} is empty")]
    EmptyCell {
        sheet: String,
        row: usize,
        column: String,
    },

    #[error("Sheet {sheet}: row {row} does not fit a question id")]
    RowIdOverflow { sheet: String, row: usize },

    #[error("Too many options for letter labels: {0}")]
    TooManyOptions(usize),

    #[error("No models configured")]
    NoModels,
}
