//! Execution parameters: fan-out control for the call stage.
//!
//! [`ExecutionParams`] groups the static parameters that bound concurrency
//! in [`CallModelsUseCase`](crate::use_cases::call_models::CallModelsUseCase).
//! These are application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};

/// Concurrency bounds for calling models.
///
/// | Level | Bound |
/// |-------|-------|
/// | Models running at once | `max_concurrent_models` |
/// | Requests in flight per model | `requests_per_model` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Number of model tasks allowed to run at the same time.
    pub max_concurrent_models: usize,
    /// Number of requests one model task keeps in flight.
    pub requests_per_model: usize,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            max_concurrent_models: 8,
            requests_per_model: 1,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    /// Zero is treated as one.
    pub fn with_max_concurrent_models(mut self, max: usize) -> Self {
        self.max_concurrent_models = max.max(1);
        self
    }

    /// Zero is treated as one.
    pub fn with_requests_per_model(mut self, max: usize) -> Self {
        self.requests_per_model = max.max(1);
        self
    }
}
