//! Use cases
//!
//! Application-level operations that orchestrate domain logic, one per
//! pipeline stage plus the end-to-end run.

pub mod build_questions;
pub mod call_models;
pub mod extract_answers;
pub mod run_pipeline;
pub mod score_models;

#[cfg(test)]
pub(crate) mod test_support;
