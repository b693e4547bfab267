//! Answer extraction from free-form model responses.
//!
//! A model answers a multiple-choice question in prose, often after a long
//! reasoning trace. [`AnswerExtractor`] recovers the selected option letters
//! with an ordered table of regular-expression rules:
//!
//! 1. Rules are tried in table order (most confident phrasing first).
//! 2. The first rule with at least one match anywhere in the response wins;
//!    every capture group of every match of that rule is collected.
//! 3. Letters are deduplicated, keeping first-occurrence order.
//! 4. The result is cut at the first letter that sorts before its
//!    predecessor: multi-select answers are stated in ascending order, so a
//!    descent marks a stray match from unrelated later text.
//!
//! All rules run in dot-matches-newline mode, so a multi-line response is
//! searched as one block. Extraction is total: text that matches nothing
//! yields an empty answer.

use indexmap::IndexSet;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Rule table in priority order. Each rule captures one or more `[A-Z]`.
///
/// Order matters: the generic rules near the end would over-match text
/// that the stricter rules above them are meant to capture.
pub const ANSWER_PATTERNS: &[&str] = &[
    // letter and period at the very start of the response
    r"^([A-Z])\.",
    r"\\boxed\{([A-Z])\}",
    r"最终答案.*?([A-Z])",
    r"正确答案.*?([A-Z])",
    r"符合.*?是.*?([A-Z])",
    r"正确.*?是.*?([A-Z])",
    r"恰当.*?是.*?([A-Z])",
    r"符合.*?是.*?([A-Z]).*?和.*?([A-Z])",
    r"最准确的答案应该是.*?([A-Z])",
    r"最贴近原意的是.*?([A-Z])",
    r"最佳选项为.*?([A-Z])",
    r"答案是.*?([A-Z])",
    r"答案选.*?([A-Z])",
    r"答案.*?([A-Z])",
    r"([A-Z])和([A-Z]).*?正确",
    r"([A-Z])、([A-Z])、([A-Z]).*?正确",
    r"正确选项是.*?([A-Z])",
    r"正确的选项是.*?([A-Z])",
    r"正确的句子是.*?([A-Z])",
    r"合适的答案是.*?([A-Z])",
    r"选项\s*([A-Z])\s*.*?相同",
    r"选项\s*([A-Z])\s*.*?正确",
    r"([A-Z])\s*选项.*?正确",
    r"([A-Z])\s*选项.*?恰当",
    r"([A-Z])\s*选项.*?合适",
    r"([A-Z])\s*是正确答案",
];

static DEFAULT_EXTRACTOR: LazyLock<AnswerExtractor> = LazyLock::new(|| {
    AnswerExtractor::from_patterns(ANSWER_PATTERNS).expect("built-in answer patterns are valid")
});

/// Extract the selected letters from a response using the built-in rules
pub fn extract_answer(response: &str) -> ExtractedAnswer {
    DEFAULT_EXTRACTOR.extract(response)
}

/// The option letters a model is judged to have selected (Value Object)
///
/// Deduplicated and immutable once built. Serializes as a plain list of
/// one-letter strings, e.g. `["A", "C"]`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedAnswer(Vec<char>);

impl ExtractedAnswer {
    pub fn letters(&self) -> &[char] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Letters joined with `;` for tabular reports
    pub fn joined(&self) -> String {
        join_letters(&self.0)
    }
}

impl std::fmt::Display for ExtractedAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.joined())
    }
}

/// Join letters with `;` (e.g. `['A', 'C']` -> `"A;C"`)
pub fn join_letters(letters: &[char]) -> String {
    letters
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(";")
}

/// One entry of the rule table
#[derive(Debug, Clone)]
struct AnswerRule {
    regex: Regex,
}

impl AnswerRule {
    /// Every captured letter of every match, in match order
    fn captured_letters(&self, response: &str) -> Vec<char> {
        self.regex
            .captures_iter(response)
            .flat_map(|caps| {
                caps.iter()
                    .skip(1)
                    .flatten()
                    .filter_map(|m| m.as_str().chars().next())
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// Priority-ordered rule table with first-match-wins selection
#[derive(Debug, Clone)]
pub struct AnswerExtractor {
    rules: Vec<AnswerRule>,
}

impl AnswerExtractor {
    /// Compile a rule table; patterns are applied in the given order
    pub fn from_patterns<S: AsRef<str>>(patterns: &[S]) -> Result<Self, regex::Error> {
        let rules = patterns
            .iter()
            .map(|p| {
                Regex::new(&format!("(?s){}", p.as_ref())).map(|regex| AnswerRule { regex })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Number of rules in the table
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Extract the selected letters from one response
    pub fn extract(&self, response: &str) -> ExtractedAnswer {
        let captured = self
            .rules
            .iter()
            .map(|rule| rule.captured_letters(response))
            .find(|letters| !letters.is_empty())
            .unwrap_or_default();

        let unique: IndexSet<char> = captured.into_iter().collect();
        ExtractedAnswer(truncate_at_descent(unique.into_iter().collect()))
    }
}

impl Default for AnswerExtractor {
    fn default() -> Self {
        DEFAULT_EXTRACTOR.clone()
    }
}

/// Keep the prefix up to (not including) the first letter smaller than its
/// predecessor
fn truncate_at_descent(mut letters: Vec<char>) -> Vec<char> {
    if let Some(cut) = letters.windows(2).position(|w| w[1] < w[0]) {
        letters.truncate(cut + 1);
    }
    letters
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters(response: &str) -> Vec<char> {
        extract_answer(response).letters().to_vec()
    }

    // ==================== Selection algorithm ====================

    #[test]
    fn test_empty_response() {
        assert!(extract_answer("").is_empty());
    }

    #[test]
    fn test_no_uppercase_letters() {
        assert!(extract_answer("答案是第二个选项，因为它符合语法。").is_empty());
        assert!(extract_answer("the answer is b").is_empty());
        assert!(extract_answer("1. 2. 3.").is_empty());
    }

    #[test]
    fn test_leading_letter_with_period() {
        assert_eq!(letters("A."), vec!['A']);
        assert_eq!(letters("B. 拿上书来\n这个选项最自然。"), vec!['B']);
    }

    #[test]
    fn test_leading_letter_only_at_start_of_text() {
        // "^" anchors to the start of the whole response, not of each line
        assert_eq!(letters("分析如下：\nC. 拿上来书"), Vec::<char>::new());
    }

    #[test]
    fn test_leading_letter_outranks_later_phrases() {
        assert_eq!(letters("A. 拿书上来\n最终答案是B"), vec!['A']);
    }

    #[test]
    fn test_final_answer_phrase() {
        assert_eq!(letters("最终答案是C"), vec!['C']);
    }

    #[test]
    fn test_correct_answer_phrase_outranks_generic_rules() {
        assert_eq!(letters("经过分析，正确答案是B，因为B选项符合语法"), vec!['B']);
    }

    #[test]
    fn test_two_letter_conjunction() {
        assert_eq!(letters("A和B都正确"), vec!['A', 'B']);
    }

    #[test]
    fn test_three_letter_enumeration() {
        assert_eq!(letters("A、B、C三项都正确"), vec!['A', 'B', 'C']);
    }

    #[test]
    fn test_boxed_letter() {
        assert_eq!(letters("推理过程……\n\\boxed{D}"), vec!['D']);
    }

    #[test]
    fn test_boxed_outranks_answer_phrase() {
        assert_eq!(letters("答案是A吗？不对，应为 \\boxed{C}"), vec!['C']);
    }

    #[test]
    fn test_multiline_response_is_one_block() {
        let response = "我们逐项分析。\n\n选项A不通顺。\n\n所以最终\n答案：\nB";
        assert_eq!(letters(response), vec!['B']);
    }

    #[test]
    fn test_all_matches_of_winning_rule_are_collected() {
        assert_eq!(letters("A 选项正确，C 选项也正确"), vec!['A', 'C']);
    }

    #[test]
    fn test_duplicates_are_removed() {
        assert_eq!(letters("最终答案：A。最终答案：A"), vec!['A']);
    }

    #[test]
    fn test_descending_tail_is_truncated() {
        let extractor = AnswerExtractor::from_patterns(&[r"<([A-Z])>"]).unwrap();
        let answer = extractor.extract("<B> then <D> and much later <A>");
        assert_eq!(answer.letters(), &['B', 'D']);
    }

    #[test]
    fn test_two_letters_descending_keeps_first() {
        assert_eq!(letters("C和A都正确"), vec!['C']);
    }

    #[test]
    fn test_deterministic() {
        let response = "经过分析，A 选项正确，D 选项也正确，B 选项不正确";
        assert_eq!(extract_answer(response), extract_answer(response));
    }

    #[test]
    fn test_lowercase_letters_are_ignored() {
        assert_eq!(letters("答案是 b，也就是 C"), vec!['C']);
    }

    // ==================== Rule table ====================

    #[test]
    fn test_builtin_table_compiles() {
        assert_eq!(AnswerExtractor::default().rule_count(), ANSWER_PATTERNS.len());
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        assert!(AnswerExtractor::from_patterns(&["(["]).is_err());
    }

    #[test]
    fn test_custom_table_order_decides() {
        let extractor = AnswerExtractor::from_patterns(&[r"pick ([A-Z])", r"([A-Z])"]).unwrap();
        assert_eq!(extractor.extract("X... pick B").letters(), &['B']);

        let reversed = AnswerExtractor::from_patterns(&[r"([A-Z])", r"pick ([A-Z])"]).unwrap();
        assert_eq!(reversed.extract("X... pick B").letters(), &['X']);
    }

    // ==================== ExtractedAnswer ====================

    #[test]
    fn test_serializes_as_letter_strings() {
        let answer = extract_answer("A和C都正确");
        assert_eq!(serde_json::to_string(&answer).unwrap(), r#"["A","C"]"#);
        assert_eq!(answer.joined(), "A;C");
        assert_eq!(answer.len(), 2);
    }

    #[test]
    fn test_truncate_at_descent() {
        assert_eq!(truncate_at_descent(vec!['B', 'D', 'A']), vec!['B', 'D']);
        assert_eq!(truncate_at_descent(vec!['A', 'B', 'C']), vec!['A', 'B', 'C']);
        assert_eq!(truncate_at_descent(vec![]), Vec::<char>::new());
    }
}
