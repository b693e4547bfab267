//! Application layer for mcq-bench
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::ExecutionParams;
pub use ports::{
    call_logger::{CallEvent, CallLogger, NoCallLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
    record_store::{RecordStore, StoreError},
};
pub use use_cases::build_questions::{
    BuildQuestionsError, BuildQuestionsInput, BuildQuestionsUseCase,
};
pub use use_cases::call_models::{
    CallModelsError, CallModelsInput, CallModelsUseCase, ModelResponses,
};
pub use use_cases::extract_answers::{ExtractAnswersError, ExtractAnswersUseCase, ModelGrades};
pub use use_cases::run_pipeline::{
    RunPipelineError, RunPipelineInput, RunPipelineOutput, RunPipelineUseCase,
};
pub use use_cases::score_models::{ScoreModelsError, ScoreModelsUseCase};
