//! In-memory doubles shared by the use case tests

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::record_store::{RecordStore, StoreError};
use async_trait::async_trait;
use indexmap::IndexMap;
use mcq_domain::{
    BenchSummary, Construction, CorpusConfig, GradedRecord, Model, QuestionKind, QuestionRecord,
    ResponseRecord, Sheet, SheetRow, SheetSpec,
};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Mutex;

/// Record store keeping everything in memory
#[derive(Default)]
pub struct MemoryStore {
    pub sheets: Mutex<Vec<Sheet>>,
    pub questions: Mutex<Option<Vec<QuestionRecord>>>,
    pub responses: Mutex<HashMap<String, Vec<ResponseRecord>>>,
    pub graded: Mutex<HashMap<String, Vec<GradedRecord>>>,
    pub reports: Mutex<Vec<BenchSummary>>,
}

impl MemoryStore {
    pub fn with_sheets(sheets: Vec<Sheet>) -> Self {
        Self {
            sheets: Mutex::new(sheets),
            ..Self::default()
        }
    }

    pub fn with_questions(questions: Vec<QuestionRecord>) -> Self {
        Self {
            questions: Mutex::new(Some(questions)),
            ..Self::default()
        }
    }
}

impl RecordStore for MemoryStore {
    fn load_sheets(&self) -> Result<Vec<Sheet>, StoreError> {
        Ok(self.sheets.lock().unwrap().clone())
    }

    fn save_questions(&self, questions: &[QuestionRecord]) -> Result<(), StoreError> {
        *self.questions.lock().unwrap() = Some(questions.to_vec());
        Ok(())
    }

    fn load_questions(&self) -> Result<Vec<QuestionRecord>, StoreError> {
        self.questions
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| StoreError::NotFound("questions".to_string()))
    }

    fn save_responses(&self, model: &Model, records: &[ResponseRecord]) -> Result<(), StoreError> {
        self.responses
            .lock()
            .unwrap()
            .insert(model.to_string(), records.to_vec());
        Ok(())
    }

    fn load_responses(&self, model: &Model) -> Result<Vec<ResponseRecord>, StoreError> {
        self.responses
            .lock()
            .unwrap()
            .get(model.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("responses of {}", model)))
    }

    fn save_graded(&self, model: &Model, records: &[GradedRecord]) -> Result<(), StoreError> {
        self.graded
            .lock()
            .unwrap()
            .insert(model.to_string(), records.to_vec());
        Ok(())
    }

    fn load_graded(&self, model: &Model) -> Result<Vec<GradedRecord>, StoreError> {
        self.graded
            .lock()
            .unwrap()
            .get(model.as_str())
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("graded records of {}", model)))
    }

    fn save_report(
        &self,
        summary: &BenchSummary,
        _runs: &[(Model, Vec<GradedRecord>)],
    ) -> Result<(), StoreError> {
        self.reports.lock().unwrap().push(summary.clone());
        Ok(())
    }
}

/// How a scripted model replies
#[derive(Clone)]
pub enum Reply {
    /// Always the same text
    Fixed(String),
    /// Always a transport failure
    Fail,
    /// Never returns
    Hang,
    /// Panics inside the call
    Panic,
}

/// Gateway replying per model from a script
pub struct ScriptedGateway {
    replies: HashMap<String, Reply>,
    pub prompts: Mutex<Vec<(String, String)>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn reply(mut self, model: &str, reply: Reply) -> Self {
        self.replies.insert(model.to_string(), reply);
        self
    }

    pub fn calls_to(&self, model: &str) -> usize {
        self.prompts
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == model)
            .count()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn complete(&self, model: &Model, prompt: &str) -> Result<String, GatewayError> {
        self.prompts
            .lock()
            .unwrap()
            .push((model.to_string(), prompt.to_string()));
        match self.replies.get(model.as_str()) {
            Some(Reply::Fixed(text)) => Ok(text.clone()),
            Some(Reply::Fail) => Err(GatewayError::ConnectionError("refused".to_string())),
            Some(Reply::Hang) => std::future::pending().await,
            Some(Reply::Panic) => panic!("scripted panic for {}", model),
            None => Err(GatewayError::ModelNotAvailable(model.to_string())),
        }
    }
}

pub fn question(domain: &str, id: u32, answer: Vec<char>) -> QuestionRecord {
    let mut options = IndexMap::new();
    options.insert('A', "拿书上来".to_string());
    options.insert('B', "拿上来书".to_string());
    options.insert('C', "以上选项均不满足题意".to_string());
    QuestionRecord {
        domain: domain.to_string(),
        id,
        question: "以下选项中语法、语义正确的是_____".to_string(),
        options,
        answer,
        kind: QuestionKind::Phrase,
        question_info: IndexMap::new(),
    }
}

/// A corpus with the single sheet `V上N来-受事N`
pub fn single_sheet_corpus() -> CorpusConfig {
    CorpusConfig {
        sheets: vec![SheetSpec::new("V上N来-受事N", Construction::Middle, true)],
        ..CorpusConfig::default()
    }
}

pub fn middle_row() -> SheetRow {
    serde_json::from_value(json!({
        "原始格式": "拿书上来",
        "VN上来": "拿书上来",
        "VN上来-正误": true,
        "V上N来": "拿上书来",
        "V上来N": "拿上来书",
        "V上来N-正误": false,
        "NV上来-1": "书拿上来",
        "NV上来-1-正误": true,
        "NV上来-2": "书拿上来了",
        "NV上来-2-正误": false,
        "VN上来-全句": "他拿书上来了。",
        "VN上来-全句-正误": 1,
        "V上N来-全句": "他拿上书来了。",
        "V上N来-全句-正误": 1,
        "V上来N-全句": "他拿上来书了。",
        "V上来N-全句-正误": 0,
        "动词": "拿",
        "动词类型": "趋向",
        "名词角色": "受事",
        "名词类型": "具体",
    }))
    .unwrap()
}
