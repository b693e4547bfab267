//! Pipeline file locations from TOML (`[paths]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where each stage reads and writes
///
/// # Example
///
/// ```toml
/// [paths]
/// sheets = "data/sheets.json"
/// questions = "data/questions.json"
/// responses_dir = "data/responses"
/// extracted_dir = "data/extracted"
/// report_dir = "data/report"
/// call_log = "data/calls.jsonl"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilePathsConfig {
    /// JSON export of the annotated workbook
    pub sheets: PathBuf,
    pub questions: PathBuf,
    pub responses_dir: PathBuf,
    pub extracted_dir: PathBuf,
    pub report_dir: PathBuf,
    /// JSONL call log; disabled when absent
    pub call_log: Option<PathBuf>,
}

impl Default for FilePathsConfig {
    fn default() -> Self {
        let data = PathBuf::from("data");
        Self {
            sheets: data.join("sheets.json"),
            questions: data.join("questions.json"),
            responses_dir: data.join("responses"),
            extracted_dir: data.join("extracted"),
            report_dir: data.join("report"),
            call_log: None,
        }
    }
}
