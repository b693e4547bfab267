//! Prompt domain
//!
//! Renders question records into the text sent to a model.

mod template;

pub use template::PromptTemplate;
