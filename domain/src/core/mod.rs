//! Core domain concepts shared across all subdomains.
//!
//! - [`model::Model`]: benchmarked models (GPT, Claude, Qwen, etc.)
//! - [`question::QuestionRecord`]: a multiple-choice question
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod model;
pub mod question;
