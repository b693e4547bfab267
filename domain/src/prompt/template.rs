//! Prompt templates for the model calls

use crate::core::question::QuestionRecord;

/// Templates for generating prompts sent to the benchmarked models
pub struct PromptTemplate;

impl PromptTemplate {
    /// User prompt for a question: the stem, then one `"<letter>. <text>"`
    /// line per option in presentation order
    ///
    /// No system prompt and no answer-format instruction are added; models
    /// answer in their own words and the extractor reads the reply.
    pub fn question_prompt(question: &QuestionRecord) -> String {
        let options = question
            .options
            .iter()
            .map(|(letter, text)| format!("{}. {}", letter, text))
            .collect::<Vec<_>>()
            .join("\n");
        format!("{}\n{}", question.question, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::question::QuestionKind;
    use indexmap::IndexMap;

    #[test]
    fn test_question_prompt() {
        let mut options = IndexMap::new();
        options.insert('A', "拿上书来".to_string());
        options.insert('B', "书拿上来".to_string());
        options.insert('C', "以上选项均不满足题意".to_string());
        let question = QuestionRecord {
            domain: "VN上来-受事N".to_string(),
            id: 1,
            question: "以下选项中符合语法且语义与“拿书上来”相同的是_____".to_string(),
            options,
            answer: vec!['A'],
            kind: QuestionKind::Phrase,
            question_info: IndexMap::new(),
        };

        assert_eq!(
            PromptTemplate::question_prompt(&question),
            "以下选项中符合语法且语义与“拿书上来”相同的是_____\nA. 拿上书来\nB. 书拿上来\nC. 以上选项均不满足题意"
        );
    }
}
