//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod api;
mod corpus;
mod execution;
mod models;
mod paths;

pub use api::FileApiConfig;
pub use corpus::FileCorpusConfig;
pub use execution::FileExecutionConfig;
pub use models::FileModelsConfig;
pub use paths::FilePathsConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("api.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("execution.{0} cannot be 0")]
    ZeroConcurrency(&'static str),

    #[error("models.names: model name cannot be empty")]
    EmptyModelName,

    #[error("models.names: no models configured")]
    NoModels,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Chat-completions endpoint
    pub api: FileApiConfig,
    /// Models to benchmark
    pub models: FileModelsConfig,
    /// Call-stage concurrency
    pub execution: FileExecutionConfig,
    /// Stage inputs and outputs
    pub paths: FilePathsConfig,
    /// Question building
    pub corpus: FileCorpusConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.api.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.execution.max_concurrent_models == 0 {
            return Err(ConfigValidationError::ZeroConcurrency(
                "max_concurrent_models",
            ));
        }
        if self.execution.requests_per_model == 0 {
            return Err(ConfigValidationError::ZeroConcurrency("requests_per_model"));
        }
        if self.models.names.is_empty() {
            return Err(ConfigValidationError::NoModels);
        }
        if self.models.names.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyModelName);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[api]
base_url = "http://localhost:8000/v1"
api_key_env = "LOCAL_KEY"
timeout_seconds = 30

[models]
names = ["gpt-4o", "qwen2.5-72b-instruct"]

[execution]
max_concurrent_models = 2
requests_per_model = 4

[paths]
sheets = "in/sheets.json"
report_dir = "out/report"
call_log = "out/calls.jsonl"

[corpus]
seed = 2024
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000/v1");
        assert_eq!(config.api.api_key_env, "LOCAL_KEY");
        assert_eq!(config.api.timeout_seconds, 30);
        assert_eq!(config.models.names.len(), 2);
        assert_eq!(config.execution.to_params().requests_per_model, 4);
        assert_eq!(config.paths.sheets, PathBuf::from("in/sheets.json"));
        assert_eq!(config.paths.call_log, Some(PathBuf::from("out/calls.jsonl")));
        assert_eq!(config.corpus.seed, Some(2024));
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[execution]
requests_per_model = 3
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.execution.requests_per_model, 3);
        // Defaults should apply
        assert_eq!(config.execution.max_concurrent_models, 8);
        assert_eq!(config.api.timeout_seconds, 120);
        assert_eq!(config.models, FileModelsConfig::default());
        assert_eq!(config.paths.questions, PathBuf::from("data/questions.json"));
        assert!(config.corpus.seed.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        assert!(FileConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let toml_str = r#"
[api]
timeout_seconds = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_zero_concurrency() {
        let toml_str = r#"
[execution]
max_concurrent_models = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::ZeroConcurrency("max_concurrent_models"))
        );
    }

    #[test]
    fn test_validate_empty_model_name() {
        let toml_str = r#"
[models]
names = ["gpt-4o", "  "]
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyModelName));
    }

    #[test]
    fn test_validate_no_models() {
        let toml_str = r#"
[models]
names = []
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.validate(), Err(ConfigValidationError::NoModels));
    }
}
