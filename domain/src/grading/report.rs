//! Report shapes: the summary tables and the flattened per-record rows

use super::extract::join_letters;
use super::record::GradedRecord;
use super::score::{CorpusSummary, ModelScore, ModelTiming};
use crate::core::model::Model;
use crate::core::question::QuestionRecord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Summary tables of a benchmark run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchSummary {
    pub corpus: CorpusSummary,
    pub scores: Vec<ModelScore>,
    pub timings: Vec<ModelTiming>,
}

impl BenchSummary {
    /// Aggregate the graded runs of every model, in the given model order
    pub fn compute(questions: &[QuestionRecord], runs: &[(Model, Vec<GradedRecord>)]) -> Self {
        Self {
            corpus: CorpusSummary::from_questions(questions),
            scores: runs
                .iter()
                .map(|(model, records)| ModelScore::compute(model.clone(), records))
                .collect(),
            timings: runs
                .iter()
                .map(|(model, records)| ModelTiming::compute(model.clone(), records))
                .collect(),
        }
    }
}

/// One graded record as a flat row
///
/// Column order: domain, id, question, one column per option letter,
/// answer, extracted_answer, judge, time, kind, question info, response.
pub fn report_row(graded: &GradedRecord) -> Map<String, Value> {
    let question = graded.question();
    let mut row = Map::new();
    row.insert("domain".into(), Value::from(question.domain.clone()));
    row.insert("id".into(), Value::from(question.id));
    row.insert("question".into(), Value::from(question.question.clone()));
    for (letter, text) in &question.options {
        row.insert(letter.to_string(), Value::from(text.clone()));
    }
    row.insert("answer".into(), Value::from(join_letters(&question.answer)));
    row.insert(
        "extracted_answer".into(),
        Value::from(graded.extracted_answer.joined()),
    );
    row.insert("judge".into(), Value::from(graded.judge));
    row.insert("time".into(), Value::from(graded.record.time));
    row.insert("kind".into(), Value::from(question.kind.as_str()));
    for (key, value) in &question.question_info {
        row.insert(key.clone(), value.clone());
    }
    row.insert("response".into(), Value::from(graded.record.response.clone()));
    row
}
