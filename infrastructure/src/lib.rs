//! Infrastructure layer for mcq-bench
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileApiConfig, FileConfig, FileCorpusConfig,
    FileExecutionConfig, FileModelsConfig, FilePathsConfig,
};
pub use logging::JsonlCallLogger;
pub use providers::OpenAiGateway;
pub use storage::{JsonFileStore, StorePaths};
