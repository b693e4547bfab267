use crate::corpus::construction::{Construction, SheetSpec};

/// Column headers of the annotated spreadsheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnNames {
    pub origin_form: String,
    pub pre_phrase: String,
    pub middle_phrase: String,
    pub post_phrase: String,
    pub subject_phrase1: String,
    pub subject_phrase2: String,
    pub pre_sentence: String,
    pub middle_sentence: String,
    pub post_sentence: String,
    pub subject_sentence: String,
    /// Appended to an option column to name its correctness column
    pub judge_suffix: String,
    pub verb: String,
    pub verb_type: String,
    pub noun_role: String,
    pub noun_type: String,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            origin_form: "原始格式".to_string(),
            pre_phrase: "VN上来".to_string(),
            middle_phrase: "V上N来".to_string(),
            post_phrase: "V上来N".to_string(),
            subject_phrase1: "NV上来-1".to_string(),
            subject_phrase2: "NV上来-2".to_string(),
            pre_sentence: "VN上来-全句".to_string(),
            middle_sentence: "V上N来-全句".to_string(),
            post_sentence: "V上来N-全句".to_string(),
            subject_sentence: "NV上来-全句".to_string(),
            judge_suffix: "-正误".to_string(),
            verb: "动词".to_string(),
            verb_type: "动词类型".to_string(),
            noun_role: "名词角色".to_string(),
            noun_type: "名词类型".to_string(),
        }
    }
}

/// Question stems and the sentinel option text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionTemplates {
    /// Substituted with the source phrase in `phrase` and `meaning`
    pub placeholder: String,
    pub phrase: String,
    pub sentence: String,
    pub meaning: String,
    pub none_of_the_above: String,
}

impl Default for QuestionTemplates {
    fn default() -> Self {
        Self {
            placeholder: "[replace]".to_string(),
            phrase: "以下选项中符合语法且语义与“[replace]”相同的是_____".to_string(),
            sentence: "以下选项中语法、语义正确的是_____".to_string(),
            meaning: "以下选项中与“[replace]”意思一样的是_____".to_string(),
            none_of_the_above: "以上选项均不满足题意".to_string(),
        }
    }
}

impl QuestionTemplates {
    pub fn phrase_question(&self, source: &str) -> String {
        self.phrase.replace(&self.placeholder, source)
    }

    pub fn meaning_question(&self, origin: &str) -> String {
        self.meaning.replace(&self.placeholder, origin)
    }
}

/// Immutable corpus vocabulary shared by the builder and the scorer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusConfig {
    /// Sheets in build order
    pub sheets: Vec<SheetSpec>,
    pub columns: ColumnNames,
    pub templates: QuestionTemplates,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        use Construction::*;
        let sheets = vec![
            SheetSpec::new("V上N来-地点N", Middle, true),
            SheetSpec::new("V上N来-受事N", Middle, true),
            SheetSpec::new("V上N来-施事N", Middle, false),
            SheetSpec::new("V上来N-受事N", Post, true),
            SheetSpec::new("V上来N-施事N", Post, false),
            SheetSpec::new("VN上来-受事N", Pre, true),
            SheetSpec::new("VN上来-其他N", Pre, true),
            SheetSpec::new("NV上来-施事N", Subject, false),
            SheetSpec::new("NV上来-受事N", Subject, false),
        ];
        Self {
            sheets,
            columns: ColumnNames::default(),
            templates: QuestionTemplates::default(),
        }
    }
}

impl CorpusConfig {
    /// Look up a sheet by its exact name
    pub fn sheet(&self, name: &str) -> Option<&SheetSpec> {
        self.sheets.iter().find(|s| s.name == name)
    }

    /// Name of the correctness column for an option column
    pub fn judge_column(&self, column: &str) -> String {
        format!("{}{}", column, self.columns.judge_suffix)
    }

    /// Column holding the phrase a phrase question is about
    pub fn phrase_source(&self, construction: Construction) -> &str {
        let c = &self.columns;
        match construction {
            Construction::Pre => c.pre_phrase.as_str(),
            Construction::Middle => c.middle_phrase.as_str(),
            Construction::Post => c.post_phrase.as_str(),
            Construction::Subject => c.subject_phrase1.as_str(),
        }
    }

    /// Candidate phrase columns offered as options for a phrase question
    pub fn phrase_options(&self, construction: Construction) -> Vec<&str> {
        let c = &self.columns;
        match construction {
            Construction::Pre => vec![
                c.middle_phrase.as_str(),
                c.post_phrase.as_str(),
                c.subject_phrase2.as_str(),
            ],
            Construction::Middle => vec![
                c.pre_phrase.as_str(),
                c.post_phrase.as_str(),
                c.subject_phrase2.as_str(),
            ],
            Construction::Post => vec![
                c.pre_phrase.as_str(),
                c.middle_phrase.as_str(),
                c.subject_phrase2.as_str(),
            ],
            Construction::Subject => vec![
                c.middle_phrase.as_str(),
                c.post_phrase.as_str(),
                c.pre_phrase.as_str(),
            ],
        }
    }

    /// Whole-sentence columns offered as options for a sentence question
    pub fn sentence_options(&self, construction: Construction) -> Vec<&str> {
        let c = &self.columns;
        match construction {
            Construction::Subject => vec![
                c.subject_sentence.as_str(),
                c.pre_sentence.as_str(),
                c.middle_sentence.as_str(),
                c.post_sentence.as_str(),
            ],
            _ => vec![
                c.pre_sentence.as_str(),
                c.middle_sentence.as_str(),
                c.post_sentence.as_str(),
            ],
        }
    }

    pub fn meaning_options(&self) -> Vec<&str> {
        vec![
            self.columns.subject_phrase1.as_str(),
            self.columns.subject_phrase2.as_str(),
        ]
    }

    /// `(record key, column)` pairs copied into `question_info`
    pub fn info_columns(&self) -> [(&'static str, &str); 4] {
        let c = &self.columns;
        [
            ("verb", c.verb.as_str()),
            ("verb_type", c.verb_type.as_str()),
            ("noun_role", c.noun_role.as_str()),
            ("noun_type", c.noun_type.as_str()),
        ]
    }
}
