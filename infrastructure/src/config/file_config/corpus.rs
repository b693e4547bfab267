//! Question building options from TOML (`[corpus]` section)

use serde::{Deserialize, Serialize};

/// # Example
///
/// ```toml
/// [corpus]
/// seed = 2024
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCorpusConfig {
    /// Option shuffle seed; fresh entropy when absent
    pub seed: Option<u64>,
}
