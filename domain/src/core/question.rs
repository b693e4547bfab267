//! Question record value objects

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Question format category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionKind {
    /// Which phrase is grammatical and equivalent to the source phrase
    Phrase,
    /// Which whole sentence is grammatical and meaningful
    Sentence,
    /// Which phrase means the same as the original form
    Meaning,
}

impl QuestionKind {
    /// All kinds in report order
    pub const ALL: [QuestionKind; 3] = [
        QuestionKind::Phrase,
        QuestionKind::Sentence,
        QuestionKind::Meaning,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKind::Phrase => "phrase",
            QuestionKind::Sentence => "sentence",
            QuestionKind::Meaning => "meaning",
        }
    }
}

impl std::fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Letter label for the option at `index` (0 -> 'A'), `None` past 'Z'
pub fn option_letter(index: usize) -> Option<char> {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map(|i| (b'A' + i) as char)
}

/// A multiple-choice question (Value Object)
///
/// `options` keeps presentation order; letters are contiguous from `A` and
/// the last option is always the "none of the above" sentinel. `answer` may
/// be empty only when no option (sentinel included) is correct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionRecord {
    /// Corpus subset the question was generated from (the sheet name)
    pub domain: String,
    /// 1-based, unique within a domain and kind
    pub id: u32,
    pub question: String,
    pub options: IndexMap<char, String>,
    pub answer: Vec<char>,
    pub kind: QuestionKind,
    /// Linguistic metadata, opaque to grading
    #[serde(default)]
    pub question_info: IndexMap<String, Value>,
}

impl QuestionRecord {
    /// Option letters in presentation order
    pub fn letters(&self) -> impl Iterator<Item = char> + '_ {
        self.options.keys().copied()
    }

    /// Whether every answer letter names an existing option
    pub fn answer_is_consistent(&self) -> bool {
        self.answer.iter().all(|l| self.options.contains_key(l))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QuestionRecord {
        let mut options = IndexMap::new();
        options.insert('A', "拿上书来".to_string());
        options.insert('B', "拿书上来".to_string());
        options.insert('C', "以上选项均不满足题意".to_string());
        QuestionRecord {
            domain: "V上N来-受事N".to_string(),
            id: 1,
            question: "以下选项中语法、语义正确的是_____".to_string(),
            options,
            answer: vec!['A', 'B'],
            kind: QuestionKind::Sentence,
            question_info: IndexMap::new(),
        }
    }

    #[test]
    fn test_option_letter() {
        assert_eq!(option_letter(0), Some('A'));
        assert_eq!(option_letter(25), Some('Z'));
        assert_eq!(option_letter(26), None);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&QuestionKind::Meaning).unwrap();
        assert_eq!(json, "\"meaning\"");
    }

    #[test]
    fn test_record_json_shape() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["options"]["A"], "拿上书来");
        assert_eq!(json["answer"], serde_json::json!(["A", "B"]));
        assert_eq!(json["kind"], "sentence");

        let back: QuestionRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_answer_consistency() {
        let mut record = sample();
        assert!(record.answer_is_consistent());
        record.answer.push('D');
        assert!(!record.answer_is_consistent());
    }

    #[test]
    fn test_letters_keep_presentation_order() {
        let letters: Vec<char> = sample().letters().collect();
        assert_eq!(letters, vec!['A', 'B', 'C']);
    }
}
