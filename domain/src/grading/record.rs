//! Records flowing through the pipeline after the question stage

use super::compare::answers_match;
use super::extract::{AnswerExtractor, ExtractedAnswer};
use crate::core::question::QuestionRecord;
use serde::{Deserialize, Serialize};

/// A question together with one model's raw reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseRecord {
    #[serde(flatten)]
    pub question: QuestionRecord,
    /// Raw reply text; empty when the call failed
    #[serde(default)]
    pub response: String,
    /// Elapsed seconds for the call
    #[serde(default)]
    pub time: f64,
}

impl ResponseRecord {
    pub fn new(question: QuestionRecord, response: impl Into<String>, time: f64) -> Self {
        Self {
            question,
            response: response.into(),
            time: time.max(0.0),
        }
    }

    /// Extract the selected letters and compare them with the ground truth
    pub fn grade(self, extractor: &AnswerExtractor) -> GradedRecord {
        let extracted_answer = extractor.extract(&self.response);
        let judge = answers_match(&self.question.answer, extracted_answer.letters());
        GradedRecord {
            record: self,
            extracted_answer,
            judge,
        }
    }
}

/// A response record with its extracted answer and verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedRecord {
    #[serde(flatten)]
    pub record: ResponseRecord,
    pub extracted_answer: ExtractedAnswer,
    pub judge: bool,
}

impl GradedRecord {
    pub fn question(&self) -> &QuestionRecord {
        &self.record.question
    }

    pub fn is_correct(&self) -> bool {
        self.judge
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::question::QuestionKind;
    use indexmap::IndexMap;

    fn question(answer: Vec<char>) -> QuestionRecord {
        let mut options = IndexMap::new();
        options.insert('A', "拿书上来".to_string());
        options.insert('B', "拿上来书".to_string());
        options.insert('C', "以上选项均不满足题意".to_string());
        QuestionRecord {
            domain: "VN上来-受事N".to_string(),
            id: 4,
            question: "以下选项中语法、语义正确的是_____".to_string(),
            options,
            answer,
            kind: QuestionKind::Sentence,
            question_info: IndexMap::new(),
        }
    }

    #[test]
    fn test_grade_correct() {
        let graded = ResponseRecord::new(question(vec!['A']), "A. 拿书上来", 1.5)
            .grade(&AnswerExtractor::default());
        assert!(graded.is_correct());
        assert_eq!(graded.extracted_answer.letters(), &['A']);
    }

    #[test]
    fn test_grade_failed_call() {
        let graded =
            ResponseRecord::new(question(vec!['A']), "", 0.2).grade(&AnswerExtractor::default());
        assert!(!graded.is_correct());
        assert!(graded.extracted_answer.is_empty());
    }

    #[test]
    fn test_negative_time_is_clamped() {
        let record = ResponseRecord::new(question(vec![]), "", -1.0);
        assert_eq!(record.time, 0.0);
    }

    #[test]
    fn test_graded_json_is_flat() {
        let graded = ResponseRecord::new(question(vec!['A', 'B']), "A和B都正确", 2.0)
            .grade(&AnswerExtractor::default());
        let json = serde_json::to_value(&graded).unwrap();

        assert_eq!(json["domain"], "VN上来-受事N");
        assert_eq!(json["response"], "A和B都正确");
        assert_eq!(json["extracted_answer"], serde_json::json!(["A", "B"]));
        assert_eq!(json["judge"], true);

        let back: GradedRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, graded);
    }
}
