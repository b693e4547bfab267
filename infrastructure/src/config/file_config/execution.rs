//! Call-stage concurrency from TOML (`[execution]` section)

use mcq_application::ExecutionParams;
use serde::{Deserialize, Serialize};

/// # Example
///
/// ```toml
/// [execution]
/// max_concurrent_models = 4
/// requests_per_model = 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileExecutionConfig {
    pub max_concurrent_models: usize,
    pub requests_per_model: usize,
}

impl Default for FileExecutionConfig {
    fn default() -> Self {
        let params = ExecutionParams::default();
        Self {
            max_concurrent_models: params.max_concurrent_models,
            requests_per_model: params.requests_per_model,
        }
    }
}

impl FileExecutionConfig {
    pub fn to_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_max_concurrent_models(self.max_concurrent_models)
            .with_requests_per_model(self.requests_per_model)
    }
}
