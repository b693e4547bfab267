//! Run Pipeline use case
//!
//! Chains the four stages:
//!
//! ```text
//! Build ──▶ Call ──▶ Extract ──▶ Report
//! ```
//!
//! Every stage reads what the previous one saved, so a failed run can be
//! resumed stage by stage.

use super::build_questions::{BuildQuestionsError, BuildQuestionsInput, BuildQuestionsUseCase};
use super::call_models::{CallModelsError, CallModelsInput, CallModelsUseCase};
use super::extract_answers::{ExtractAnswersError, ExtractAnswersUseCase};
use super::score_models::{ScoreModelsError, ScoreModelsUseCase};
use crate::config::ExecutionParams;
use crate::ports::call_logger::{CallLogger, NoCallLogger};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::ports::record_store::RecordStore;
use mcq_domain::{BenchSummary, CorpusConfig, Model};
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Errors that can occur during a full run
#[derive(Error, Debug)]
pub enum RunPipelineError {
    #[error("Build stage failed: {0}")]
    Build(#[from] BuildQuestionsError),

    #[error("Call stage failed: {0}")]
    Call(#[from] CallModelsError),

    #[error("Extract stage failed: {0}")]
    Extract(#[from] ExtractAnswersError),

    #[error("Report stage failed: {0}")]
    Score(#[from] ScoreModelsError),
}

impl RunPipelineError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RunPipelineError::Call(CallModelsError::Cancelled))
    }
}

/// Input for the RunPipeline use case
#[derive(Debug, Clone)]
pub struct RunPipelineInput {
    pub models: Vec<Model>,
    pub seed: Option<u64>,
}

impl RunPipelineInput {
    pub fn new(models: Vec<Model>) -> Self {
        Self { models, seed: None }
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

/// Output of a full run
#[derive(Debug, Clone)]
pub struct RunPipelineOutput {
    pub question_count: usize,
    pub summary: BenchSummary,
    pub elapsed: Duration,
}

/// Use case for running every stage end to end
pub struct RunPipelineUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    store: Arc<dyn RecordStore>,
    corpus: CorpusConfig,
    params: ExecutionParams,
    logger: Arc<dyn CallLogger>,
    cancellation_token: Option<CancellationToken>,
}

impl<G: LlmGateway + 'static> RunPipelineUseCase<G> {
    pub fn new(gateway: Arc<G>, store: Arc<dyn RecordStore>, corpus: CorpusConfig) -> Self {
        Self {
            gateway,
            store,
            corpus,
            params: ExecutionParams::default(),
            logger: Arc::new(NoCallLogger),
            cancellation_token: None,
        }
    }

    pub fn with_params(mut self, params: ExecutionParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_call_logger(mut self, logger: Arc<dyn CallLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub async fn execute(
        &self,
        input: RunPipelineInput,
    ) -> Result<RunPipelineOutput, RunPipelineError> {
        self.execute_with_progress(input, Arc::new(NoProgress)).await
    }

    pub async fn execute_with_progress(
        &self,
        input: RunPipelineInput,
        progress: Arc<dyn ProgressNotifier>,
    ) -> Result<RunPipelineOutput, RunPipelineError> {
        let start = Instant::now();

        let build = BuildQuestionsUseCase::new(Arc::clone(&self.store), self.corpus.clone());
        let build_input = match input.seed {
            Some(seed) => BuildQuestionsInput::new().with_seed(seed),
            None => BuildQuestionsInput::new(),
        };
        let questions = build.execute_with_progress(build_input, progress.as_ref())?;

        let mut call = CallModelsUseCase::new(Arc::clone(&self.gateway), Arc::clone(&self.store))
            .with_params(self.params.clone())
            .with_call_logger(Arc::clone(&self.logger));
        if let Some(token) = &self.cancellation_token {
            call = call.with_cancellation(token.clone());
        }
        call.execute_with_progress(
            CallModelsInput::new(input.models.clone()),
            Arc::clone(&progress),
        )
        .await?;

        ExtractAnswersUseCase::new(Arc::clone(&self.store))
            .execute_with_progress(&input.models, progress.as_ref())?;

        let summary = ScoreModelsUseCase::new(Arc::clone(&self.store))
            .execute_with_progress(&input.models, progress.as_ref())?;

        let elapsed = start.elapsed();
        info!(
            "Run finished: {} questions x {} models in {:.1}s",
            questions.len(),
            input.models.len(),
            elapsed.as_secs_f64()
        );

        Ok(RunPipelineOutput {
            question_count: questions.len(),
            summary,
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{
        MemoryStore, Reply, ScriptedGateway, middle_row, single_sheet_corpus,
    };
    use mcq_domain::Sheet;

    fn store() -> Arc<MemoryStore> {
        Arc::new(MemoryStore::with_sheets(vec![Sheet::new(
            "V上N来-受事N",
            vec![middle_row()],
        )]))
    }

    #[tokio::test]
    async fn test_full_run_writes_every_stage() {
        let gateway = ScriptedGateway::new()
            .reply("a", Reply::Fixed("答案是A".to_string()))
            .reply("b", Reply::Fail);
        let store = store();
        let use_case =
            RunPipelineUseCase::new(Arc::new(gateway), store.clone(), single_sheet_corpus());
        let input =
            RunPipelineInput::new(vec![Model::from("a"), Model::from("b")]).with_seed(Some(3));

        let output = use_case
            .execute(input)
            .await
            .unwrap();

        assert_eq!(output.question_count, 3);
        assert_eq!(output.summary.scores.len(), 2);
        assert_eq!(output.summary.corpus.total().map(|c| c.all), Some(3));
        // a failed call never matches a non-empty ground truth
        assert_eq!(output.summary.scores[1].all, Some(0.0));
        assert_eq!(store.responses.lock().unwrap().len(), 2);
        assert_eq!(store.graded.lock().unwrap().len(), 2);
        assert_eq!(store.reports.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cancelled_run_stops_before_extract() {
        let gateway = ScriptedGateway::new().reply("a", Reply::Hang);
        let store = store();
        let token = CancellationToken::new();
        token.cancel();
        let use_case =
            RunPipelineUseCase::new(Arc::new(gateway), store.clone(), single_sheet_corpus())
                .with_cancellation(token);

        let err = use_case
            .execute(RunPipelineInput::new(vec![Model::from("a")]))
            .await
            .unwrap_err();

        assert!(err.is_cancelled());
        assert!(store.graded.lock().unwrap().is_empty());
    }
}
