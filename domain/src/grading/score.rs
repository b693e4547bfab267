//! Accuracy and latency aggregation per model

use super::record::GradedRecord;
use crate::core::model::Model;
use crate::core::question::{QuestionKind, QuestionRecord};
use crate::corpus::construction::Construction;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Label of the aggregate column/row covering every question
pub const ALL: &str = "all";

/// Share of correct records, `None` for an empty subset
pub fn accuracy<'a>(records: impl IntoIterator<Item = &'a GradedRecord>) -> Option<f64> {
    let (correct, total) = records
        .into_iter()
        .fold((0usize, 0usize), |(c, t), r| (c + usize::from(r.judge), t + 1));
    (total > 0).then(|| correct as f64 / total as f64)
}

/// Mean call latency in seconds, `None` for an empty subset
pub fn mean_time<'a>(records: impl IntoIterator<Item = &'a GradedRecord>) -> Option<f64> {
    let (sum, total) = records
        .into_iter()
        .fold((0.0, 0usize), |(s, t), r| (s + r.record.time, t + 1));
    (total > 0).then(|| sum / total as f64)
}

/// Accuracy of one model: overall, per kind and per construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelScore {
    pub model: Model,
    pub all: Option<f64>,
    /// Keyed by kind name (`phrase`, `sentence`, `meaning`)
    pub by_kind: IndexMap<String, Option<f64>>,
    /// Keyed by construction label (`VN上来`, ...)
    pub by_construction: IndexMap<String, Option<f64>>,
}

impl ModelScore {
    pub fn compute(model: Model, records: &[GradedRecord]) -> Self {
        let by_kind = QuestionKind::ALL
            .iter()
            .map(|kind| {
                let subset = records.iter().filter(|r| r.question().kind == *kind);
                (kind.as_str().to_string(), accuracy(subset))
            })
            .collect();
        let by_construction = Construction::ALL
            .iter()
            .map(|c| {
                let subset = records
                    .iter()
                    .filter(|r| c.contains_domain(&r.question().domain));
                (c.label().to_string(), accuracy(subset))
            })
            .collect();

        Self {
            model,
            all: accuracy(records),
            by_kind,
            by_construction,
        }
    }
}

/// Mean latency of one model: overall and per kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelTiming {
    pub model: Model,
    pub all: Option<f64>,
    pub by_kind: IndexMap<String, Option<f64>>,
}

impl ModelTiming {
    pub fn compute(model: Model, records: &[GradedRecord]) -> Self {
        let by_kind = QuestionKind::ALL
            .iter()
            .map(|kind| {
                let subset = records.iter().filter(|r| r.question().kind == *kind);
                (kind.as_str().to_string(), mean_time(subset))
            })
            .collect();

        Self {
            model,
            all: mean_time(records),
            by_kind,
        }
    }
}

/// Question counts for one construction (or for the whole corpus)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusCount {
    /// Construction label, or [`ALL`]
    pub group: String,
    pub by_kind: IndexMap<String, usize>,
    pub all: usize,
}

impl CorpusCount {
    fn count<'a>(
        group: impl Into<String>,
        questions: impl Iterator<Item = &'a QuestionRecord> + Clone,
    ) -> Self {
        let by_kind: IndexMap<String, usize> = QuestionKind::ALL
            .iter()
            .map(|kind| {
                let n = questions.clone().filter(|q| q.kind == *kind).count();
                (kind.as_str().to_string(), n)
            })
            .collect();
        let all = by_kind.values().sum();
        Self {
            group: group.into(),
            by_kind,
            all,
        }
    }
}

/// Question counts per construction × kind, with a trailing corpus-wide row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusSummary {
    pub rows: Vec<CorpusCount>,
}

impl CorpusSummary {
    pub fn from_questions(questions: &[QuestionRecord]) -> Self {
        let mut rows: Vec<CorpusCount> = Construction::ALL
            .iter()
            .map(|c| {
                CorpusCount::count(
                    c.label(),
                    questions.iter().filter(|q| c.contains_domain(&q.domain)),
                )
            })
            .collect();
        rows.push(CorpusCount::count(ALL, questions.iter()));
        Self { rows }
    }

    /// Corpus-wide row
    pub fn total(&self) -> Option<&CorpusCount> {
        self.rows.iter().find(|r| r.group == ALL)
    }
}
