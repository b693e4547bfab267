//! Pipeline stages
//!
//! ```text
//! Build ──▶ Call ──▶ Extract ──▶ Report
//! sheets    models    answers     scores
//! ```

use serde::{Deserialize, Serialize};

/// Stage of a benchmark run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Spreadsheet rows become question records
    Build,
    /// Every question is sent to every model
    Call,
    /// Answers are extracted from the replies and judged
    Extract,
    /// Scores and timings are aggregated and written out
    Report,
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::Build => "build",
            Stage::Call => "call",
            Stage::Extract => "extract",
            Stage::Report => "report",
        }
    }

    pub fn display_name(&self) -> &str {
        match self {
            Stage::Build => "Build Questions",
            Stage::Call => "Call Models",
            Stage::Extract => "Extract Answers",
            Stage::Report => "Report",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
