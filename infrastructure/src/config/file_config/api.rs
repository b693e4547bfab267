//! Chat-completions endpoint configuration from TOML (`[api]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// OpenAI-compatible endpoint configuration.
///
/// # Example
///
/// ```toml
/// [api]
/// base_url = "https://api.openai.com/v1"
/// api_key_env = "OPENAI_API_KEY"
/// timeout_seconds = 120
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileApiConfig {
    /// Base URL; `/chat/completions` is appended.
    pub base_url: String,
    /// Direct API key (not recommended, use env var instead).
    pub api_key: Option<String>,
    /// File whose trimmed contents are the API key.
    pub api_key_file: Option<PathBuf>,
    /// Environment variable name for the API key (default: "OPENAI_API_KEY").
    pub api_key_env: String,
    /// Per-request timeout.
    pub timeout_seconds: u64,
}

impl Default for FileApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            api_key_file: None,
            api_key_env: "OPENAI_API_KEY".to_string(),
            timeout_seconds: 120,
        }
    }
}

impl FileApiConfig {
    /// Resolve the API key: explicit key, then key file, then environment.
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| {
                self.api_key_file
                    .as_ref()
                    .and_then(|path| std::fs::read_to_string(path).ok())
                    .map(|s| s.trim().to_string())
                    .filter(|k| !k.is_empty())
            })
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|k| !k.trim().is_empty())
            })
    }
}
