//! Console output formatter for benchmark results

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use indexmap::IndexMap;
use mcq_domain::{BenchSummary, Construction, ExtractedAnswer, QuestionKind};

const LABEL_WIDTH: usize = 30;
const CELL_WIDTH: usize = 10;

/// Formats benchmark results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format corpus counts, accuracies and timings as three tables
    pub fn format(summary: &BenchSummary) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Benchmark Results"));
        output.push('\n');

        // Corpus
        output.push_str(&Self::section_header("Questions"));
        let kinds = Self::kind_columns();
        output.push_str(&Self::table_head("group", &kinds));
        for row in &summary.corpus.rows {
            let cells: Vec<String> = kinds
                .iter()
                .map(|k| match k.as_str() {
                    "all" => row.all.to_string(),
                    k => row.by_kind.get(k).copied().unwrap_or(0).to_string(),
                })
                .collect();
            output.push_str(&Self::table_row(&row.group, &cells));
        }

        // Accuracy
        output.push_str(&Self::section_header("Accuracy"));
        let mut score_columns = kinds.clone();
        score_columns.extend(Construction::ALL.iter().map(|c| c.label().to_string()));
        output.push_str(&Self::table_head("model", &score_columns));
        for score in &summary.scores {
            let cells: Vec<String> = score_columns
                .iter()
                .map(|column| {
                    let value = match column.as_str() {
                        "all" => score.all,
                        c => lookup(&score.by_kind, c)
                            .or_else(|| lookup(&score.by_construction, c)),
                    };
                    Self::accuracy_cell(value)
                })
                .collect();
            output.push_str(&Self::table_row(score.model.as_str(), &cells));
        }

        // Timing
        output.push_str(&Self::section_header("Mean latency (s)"));
        output.push_str(&Self::table_head("model", &kinds));
        for timing in &summary.timings {
            let cells: Vec<String> = kinds
                .iter()
                .map(|column| {
                    let value = match column.as_str() {
                        "all" => timing.all,
                        k => lookup(&timing.by_kind, k),
                    };
                    Self::seconds_cell(value)
                })
                .collect();
            output.push_str(&Self::table_row(timing.model.as_str(), &cells));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format as JSON
    pub fn format_json(summary: &BenchSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_else(|_| "{}".to_string())
    }

    /// Letters joined with `;`, or a dimmed marker when nothing was found
    pub fn format_extracted(answer: &ExtractedAnswer) -> String {
        if answer.is_empty() {
            format!("{}", "(no answer found)".dimmed())
        } else {
            format!("{}", answer.joined().green().bold())
        }
    }

    /// `all` followed by the question kinds
    fn kind_columns() -> Vec<String> {
        std::iter::once("all".to_string())
            .chain(QuestionKind::ALL.iter().map(|k| k.as_str().to_string()))
            .collect()
    }

    fn accuracy_cell(value: Option<f64>) -> String {
        match value {
            None => format!("{:>width$}", "-", width = CELL_WIDTH).dimmed().to_string(),
            Some(v) => {
                let text = format!("{:>width$.4}", v, width = CELL_WIDTH);
                if v >= 0.8 {
                    text.green().to_string()
                } else if v >= 0.5 {
                    text.yellow().to_string()
                } else {
                    text.red().to_string()
                }
            }
        }
    }

    fn seconds_cell(value: Option<f64>) -> String {
        match value {
            None => format!("{:>width$}", "-", width = CELL_WIDTH).dimmed().to_string(),
            Some(v) => format!("{:>width$.2}", v, width = CELL_WIDTH),
        }
    }

    fn table_head(label: &str, columns: &[String]) -> String {
        let mut line = pad(label, LABEL_WIDTH);
        for column in columns {
            line.push_str(&format!("{:>width$}", column, width = CELL_WIDTH));
        }
        format!("{}\n", line.bold())
    }

    fn table_row(label: &str, cells: &[String]) -> String {
        format!("{}{}\n", pad(label, LABEL_WIDTH).cyan(), cells.concat())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

fn lookup(map: &IndexMap<String, Option<f64>>, key: &str) -> Option<f64> {
    map.get(key).copied().flatten()
}

/// Left-align to `width` terminal columns; CJK characters take two
fn pad(text: &str, width: usize) -> String {
    let used: usize = text
        .chars()
        .map(|c| if (c as u32) >= 0x2E80 { 2 } else { 1 })
        .sum();
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, summary: &BenchSummary) -> String {
        Self::format(summary)
    }

    fn format_json(&self, summary: &BenchSummary) -> String {
        Self::format_json(summary)
    }

    fn format_extracted(&self, answer: &ExtractedAnswer) -> String {
        Self::format_extracted(answer)
    }
}
