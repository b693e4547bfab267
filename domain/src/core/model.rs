//! Model value object representing a benchmarked LLM

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Models known to the benchmark (Value Object)
///
/// Every question is dispatched to each configured model; the identifier is
/// what the chat-completions endpoint expects in its `model` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    // OpenAI models
    Gpt4o,
    O1Preview,
    // Anthropic models
    Claude35Sonnet,
    // Google models
    Gemini20FlashExp,
    // Open-weight models
    Qwen25_72bInstruct,
    Llama33_70bInstruct,
    // Chinese providers
    Glm4Plus,
    DeepseekChat,
    DeepseekReasoner,
    // Custom
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt4o => "gpt-4o",
            Model::O1Preview => "o1-preview",
            Model::Claude35Sonnet => "claude-3-5-sonnet-20241022",
            Model::Gemini20FlashExp => "gemini-2.0-flash-exp",
            Model::Qwen25_72bInstruct => "qwen2.5-72b-instruct",
            Model::Llama33_70bInstruct => "llama3.3-70b-instruct",
            Model::Glm4Plus => "glm-4-plus",
            Model::DeepseekChat => "deepseek-chat",
            Model::DeepseekReasoner => "deepseek-reasoner",
            Model::Custom(s) => s,
        }
    }

    /// Get the default set of models for a benchmark run
    pub fn default_models() -> Vec<Model> {
        vec![
            Model::Gpt4o,
            Model::Claude35Sonnet,
            Model::Qwen25_72bInstruct,
            Model::Llama33_70bInstruct,
            Model::DeepseekChat,
        ]
    }

    /// Check if this is a reasoning model (long thinking traces before the answer)
    pub fn is_reasoning(&self) -> bool {
        matches!(self, Model::O1Preview | Model::DeepseekReasoner)
    }

    /// File-system safe form of the identifier, used for per-model record files
    ///
    /// E.g., "org/model:v1" -> "org_model_v1"
    pub fn file_stem(&self) -> String {
        self.as_str()
            .chars()
            .map(|c| match c {
                '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
                c if c.is_whitespace() => '_',
                c => c,
            })
            .collect()
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "gpt-4o" => Model::Gpt4o,
            "o1-preview" => Model::O1Preview,
            "claude-3-5-sonnet-20241022" => Model::Claude35Sonnet,
            "gemini-2.0-flash-exp" => Model::Gemini20FlashExp,
            "qwen2.5-72b-instruct" => Model::Qwen25_72bInstruct,
            "llama3.3-70b-instruct" => Model::Llama33_70bInstruct,
            "glm-4-plus" => Model::Glm4Plus,
            "deepseek-chat" => Model::DeepseekChat,
            "deepseek-reasoner" => Model::DeepseekReasoner,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl From<&str> for Model {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(model) => model,
            Err(never) => match never {},
        }
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Model::from(s.as_str()))
    }
}
