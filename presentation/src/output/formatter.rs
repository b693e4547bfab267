//! Output formatter trait

use mcq_domain::{BenchSummary, ExtractedAnswer};

/// Trait for formatting benchmark results
pub trait OutputFormatter {
    /// Format the summary tables
    fn format(&self, summary: &BenchSummary) -> String;

    /// Format as JSON
    fn format_json(&self, summary: &BenchSummary) -> String;

    /// Format one extraction result (the `grade` command)
    fn format_extracted(&self, answer: &ExtractedAnswer) -> String;
}
