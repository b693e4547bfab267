//! Benchmarked model list from TOML (`[models]` section)

use mcq_domain::Model;
use serde::{Deserialize, Serialize};

/// Models to benchmark
///
/// # Example
///
/// ```toml
/// [models]
/// names = ["gpt-4o", "deepseek-chat", "my-local-model"]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileModelsConfig {
    /// Model ids as sent to the endpoint
    pub names: Vec<String>,
}

impl Default for FileModelsConfig {
    fn default() -> Self {
        Self {
            names: Model::default_models()
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl FileModelsConfig {
    /// Parse the names; unknown ids become `Model::Custom`
    pub fn parse(&self) -> Vec<Model> {
        self.names.iter().map(|s| Model::from(s.trim())).collect()
    }
}
