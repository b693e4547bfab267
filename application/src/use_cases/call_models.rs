//! Call Models use case
//!
//! Sends every question to every model and records the raw replies.
//!
//! ```text
//!             ┌── model A: q1 → q2 → … (≤ requests_per_model in flight)
//! questions ──┼── model B: q1 → q2 → …
//!             └── model C: …            (≤ max_concurrent_models tasks)
//!                    │
//!                    ▼  fan-in after all tasks complete
//!             [(model, responses)] in input model order
//! ```

use crate::config::ExecutionParams;
use crate::ports::call_logger::{CallEvent, CallLogger, NoCallLogger};
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::record_store::{RecordStore, StoreError};
use futures::{FutureExt, StreamExt};
use mcq_domain::{Model, PromptTemplate, QuestionRecord, ResponseRecord, Stage};
use serde_json::json;
use std::any::Any;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Errors that can occur while calling models
#[derive(Error, Debug)]
pub enum CallModelsError {
    #[error("No models configured")]
    NoModels,

    #[error("No questions to ask")]
    NoQuestions,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Store error: {0}")]
    StoreError(#[from] StoreError),
}

/// Input for the CallModels use case
#[derive(Debug, Clone)]
pub struct CallModelsInput {
    pub models: Vec<Model>,
}

impl CallModelsInput {
    pub fn new(models: Vec<Model>) -> Self {
        Self { models }
    }
}

/// Replies of each model, in input model order
pub type ModelResponses = Vec<(Model, Vec<ResponseRecord>)>;

/// Use case for calling every model on every question
pub struct CallModelsUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    store: Arc<dyn RecordStore>,
    params: ExecutionParams,
    logger: Arc<dyn CallLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static> CallModelsUseCase<G> {
    pub fn new(gateway: Arc<G>, store: Arc<dyn RecordStore>) -> Self {
        Self {
            gateway,
            store,
            params: ExecutionParams::default(),
            logger: Arc::new(NoCallLogger),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    /// Record every call through a structured logger
    pub fn with_call_logger(mut self, logger: Arc<dyn CallLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Set a cancellation token for graceful interruption
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: CallModelsInput) -> Result<ModelResponses, CallModelsError> {
        self.execute_with_progress(input, Arc::new(NoProgress)).await
    }

    /// Load the questions, call every model and save each model's replies
    pub async fn execute_with_progress(
        &self,
        input: CallModelsInput,
        progress: Arc<dyn ProgressNotifier>,
    ) -> Result<ModelResponses, CallModelsError> {
        let questions = self.store.load_questions()?;
        let runs = self.call_all(input.models, questions, progress).await?;
        for (model, records) in &runs {
            self.store.save_responses(model, records)?;
        }
        Ok(runs)
    }

    /// Fan out one task per model and fan the results back in
    pub async fn call_all(
        &self,
        models: Vec<Model>,
        questions: Vec<QuestionRecord>,
        progress: Arc<dyn ProgressNotifier>,
    ) -> Result<ModelResponses, CallModelsError> {
        if models.is_empty() {
            return Err(CallModelsError::NoModels);
        }
        if questions.is_empty() {
            return Err(CallModelsError::NoQuestions);
        }

        info!(
            "Calling {} models on {} questions",
            models.len(),
            questions.len()
        );
        progress.on_stage_start(&Stage::Call, models.len());

        let questions = Arc::new(questions);
        let semaphore = Arc::new(Semaphore::new(self.params.max_concurrent_models.max(1)));
        let cancel = self.cancellation_token.clone().unwrap_or_default();
        let mut join_set = JoinSet::new();
        let mut task_index = HashMap::with_capacity(models.len());

        for (index, model) in models.iter().enumerate() {
            let task = Arc::new(ModelTask {
                gateway: Arc::clone(&self.gateway),
                logger: Arc::clone(&self.logger),
                progress: Arc::clone(&progress),
                questions: Arc::clone(&questions),
                in_flight: self.params.requests_per_model.max(1),
                cancel: cancel.clone(),
                model: model.clone(),
            });
            let semaphore = Arc::clone(&semaphore);

            let handle = join_set.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (index, None);
                };
                (index, task.run().await)
            });
            task_index.insert(handle.id(), index);
        }

        let mut slots: Vec<Option<Vec<ResponseRecord>>> = vec![None; models.len()];
        let mut cancelled = false;

        while let Some(result) = join_set.join_next_with_id().await {
            match result {
                Ok((_, (index, Some(records)))) => {
                    let model = &models[index];
                    let failures = records.iter().filter(|r| r.response.is_empty()).count();
                    info!(
                        "Model {} answered {} questions ({} empty)",
                        model,
                        records.len(),
                        failures
                    );
                    progress.on_task_complete(&Stage::Call, model.as_str(), failures == 0);
                    slots[index] = Some(records);
                }
                Ok((_, (index, None))) => {
                    warn!("Model {} was cancelled", models[index]);
                    progress.on_task_complete(&Stage::Call, models[index].as_str(), false);
                    cancelled = true;
                }
                Err(e) => {
                    let Some(&index) = task_index.get(&e.id()) else {
                        warn!("Task join error: {}", e);
                        continue;
                    };
                    let model = &models[index];
                    warn!("Model {} task failed, recording empty responses: {}", model, e);
                    progress.on_task_complete(&Stage::Call, model.as_str(), false);
                    slots[index] = Some(
                        questions
                            .iter()
                            .map(|q| ResponseRecord::new(q.clone(), String::new(), 0.0))
                            .collect(),
                    );
                }
            }
        }

        progress.on_stage_complete(&Stage::Call);

        if cancelled || cancel.is_cancelled() {
            return Err(CallModelsError::Cancelled);
        }

        Ok(models
            .into_iter()
            .zip(slots)
            .filter_map(|(model, records)| records.map(|r| (model, r)))
            .collect())
    }
}

/// Everything one model's task owns
struct ModelTask<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    logger: Arc<dyn CallLogger>,
    progress: Arc<dyn ProgressNotifier>,
    questions: Arc<Vec<QuestionRecord>>,
    in_flight: usize,
    cancel: CancellationToken,
    model: Model,
}

impl<G: LlmGateway + 'static> ModelTask<G> {
    /// Ask every question in order; `None` when cancelled part-way
    async fn run(self: Arc<Self>) -> Option<Vec<ResponseRecord>> {
        self.progress
            .on_model_start(&self.model, self.questions.len());

        let in_flight = self.in_flight;
        let task = Arc::clone(&self);
        let records: Vec<Option<ResponseRecord>> =
            futures::stream::iter(0..self.questions.len())
                .map(move |index| {
                    let task = Arc::clone(&task);
                    async move { task.ask(index).await }
                })
                .buffered(in_flight)
                .collect()
                .await;

        records.into_iter().collect()
    }

    /// One call; a failed or panicking call yields an empty response with its elapsed time
    async fn ask(&self, index: usize) -> Option<ResponseRecord> {
        if self.cancel.is_cancelled() {
            return None;
        }

        let question = &self.questions[index];
        let prompt = PromptTemplate::question_prompt(question);
        let start = Instant::now();
        let call = AssertUnwindSafe(self.gateway.complete(&self.model, &prompt)).catch_unwind();
        let result = tokio::select! {
            _ = self.cancel.cancelled() => return None,
            result = call => result
                .unwrap_or_else(|panic| Err(GatewayError::Other(panic_message(panic)))),
        };
        let elapsed = start.elapsed().as_secs_f64();

        let response = match result {
            Ok(text) => {
                debug!(
                    "Model {} answered {} #{} in {:.2}s",
                    self.model, question.domain, question.id, elapsed
                );
                self.logger.log(CallEvent::new(
                    "model_response",
                    json!({
                        "model": self.model.as_str(),
                        "domain": question.domain,
                        "id": question.id,
                        "kind": question.kind.as_str(),
                        "time": elapsed,
                        "bytes": text.len(),
                        "text": text,
                    }),
                ));
                self.progress.on_question_complete(&self.model, true);
                text
            }
            Err(e) => {
                warn!(
                    "Model {} failed on {} #{}: {}",
                    self.model, question.domain, question.id, e
                );
                self.logger.log(CallEvent::new(
                    "model_error",
                    json!({
                        "model": self.model.as_str(),
                        "domain": question.domain,
                        "id": question.id,
                        "kind": question.kind.as_str(),
                        "time": elapsed,
                        "error": e.to_string(),
                    }),
                ));
                self.progress.on_question_complete(&self.model, false);
                String::new()
            }
        };

        Some(ResponseRecord::new(question.clone(), response, elapsed))
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("gateway panicked: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("gateway panicked: {}", s)
    } else {
        "gateway panicked".to_string()
    }
}
