//! CLI entrypoint for mcq-bench
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use mcq_application::{
    BuildQuestionsInput, BuildQuestionsUseCase, CallLogger, CallModelsInput, CallModelsUseCase,
    ExtractAnswersUseCase, NoCallLogger, NoProgress, ProgressNotifier, RecordStore,
    RunPipelineInput, RunPipelineUseCase, ScoreModelsUseCase,
};
use mcq_domain::{BenchSummary, CorpusConfig, Model, extract_answer};
use mcq_infrastructure::{
    ConfigLoader, FileConfig, JsonFileStore, JsonlCallLogger, OpenAiGateway, StorePaths,
};
use mcq_presentation::{Cli, Command, ConsoleFormatter, ModelArgs, ProgressReporter};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = init_logging(cli.verbose, cli.log_file.as_deref())?;

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    info!("Starting mcq-bench");

    // === Dependency Injection ===
    let store: Arc<dyn RecordStore> = Arc::new(JsonFileStore::new(store_paths(&config)));
    let corpus = CorpusConfig::default();
    let progress: Arc<dyn ProgressNotifier> = if cli.quiet {
        Arc::new(NoProgress)
    } else {
        Arc::new(ProgressReporter::new())
    };

    match cli.command {
        Command::Build { seed } => {
            let input = match seed.or(config.corpus.seed) {
                Some(seed) => BuildQuestionsInput::new().with_seed(seed),
                None => BuildQuestionsInput::new(),
            };
            let questions = BuildQuestionsUseCase::new(store, corpus)
                .execute_with_progress(input, progress.as_ref())?;
            println!(
                "Built {} questions -> {}",
                questions.len(),
                config.paths.questions.display()
            );
        }

        Command::Call(args) => {
            let models = select_models(&args, &config);
            let use_case = CallModelsUseCase::new(gateway(&config)?, store)
                .with_params(config.execution.to_params())
                .with_call_logger(call_logger(&config))
                .with_cancellation(cancel_on_ctrl_c());
            let runs = use_case
                .execute_with_progress(CallModelsInput::new(models), progress)
                .await?;
            for (model, records) in &runs {
                let empty = records.iter().filter(|r| r.response.is_empty()).count();
                println!("{}: {} replies ({} empty)", model, records.len(), empty);
            }
        }

        Command::Extract(args) => {
            let models = select_models(&args, &config);
            let runs = ExtractAnswersUseCase::new(store)
                .execute_with_progress(&models, progress.as_ref())?;
            for (model, records) in &runs {
                let correct = records.iter().filter(|r| r.judge).count();
                println!("{}: {}/{} correct", model, correct, records.len());
            }
        }

        Command::Report { models, json } => {
            let models = select_models(&models, &config);
            let summary = ScoreModelsUseCase::new(store)
                .execute_with_progress(&models, progress.as_ref())?;
            print_summary(&summary, json);
        }

        Command::Run { models, seed, json } => {
            let models = select_models(&models, &config);
            let use_case = RunPipelineUseCase::new(gateway(&config)?, store, corpus)
                .with_params(config.execution.to_params())
                .with_call_logger(call_logger(&config))
                .with_cancellation(cancel_on_ctrl_c());
            let input = RunPipelineInput::new(models).with_seed(seed.or(config.corpus.seed));

            let output = match use_case.execute_with_progress(input, progress).await {
                Ok(output) => output,
                Err(e) if e.is_cancelled() => bail!("Run cancelled; completed stages were saved"),
                Err(e) => return Err(e.into()),
            };
            print_summary(&output.summary, json);
            println!(
                "{} questions, total time {:.1}s",
                output.question_count,
                output.elapsed.as_secs_f64()
            );
        }

        Command::Grade { text } => {
            println!("{}", ConsoleFormatter::format_extracted(&extract_answer(&text)));
        }
    }

    Ok(())
}

/// Install the tracing subscriber; the returned guard flushes the log file
fn init_logging(verbose: u8, log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Cannot create log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(writer),
                )
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            Ok(None)
        }
    }
}

fn store_paths(config: &FileConfig) -> StorePaths {
    let paths = &config.paths;
    StorePaths {
        sheets: paths.sheets.clone(),
        questions: paths.questions.clone(),
        responses_dir: paths.responses_dir.clone(),
        extracted_dir: paths.extracted_dir.clone(),
        report_dir: paths.report_dir.clone(),
    }
}

fn gateway(config: &FileConfig) -> Result<Arc<OpenAiGateway>> {
    let api_key = config.api.resolve_api_key();
    if api_key.is_none() {
        warn!(
            "No API key found (api.api_key, api.api_key_file or ${}); sending unauthenticated requests",
            config.api.api_key_env
        );
    }
    let gateway = OpenAiGateway::new(Duration::from_secs(config.api.timeout_seconds))?
        .with_base_url(config.api.base_url.clone())
        .with_api_key(api_key);
    info!("Chat completions endpoint: {}", gateway.endpoint());
    Ok(Arc::new(gateway))
}

fn call_logger(config: &FileConfig) -> Arc<dyn CallLogger> {
    match config.paths.call_log.as_ref().and_then(JsonlCallLogger::open) {
        Some(logger) => {
            info!("Call log: {}", logger.path().display());
            Arc::new(logger)
        }
        None => Arc::new(NoCallLogger),
    }
}

/// `-m` flags when given, else the configured list
fn select_models(args: &ModelArgs, config: &FileConfig) -> Vec<Model> {
    if args.models.is_empty() {
        config.models.parse()
    } else {
        args.models.iter().map(|s| Model::from(s.as_str())).collect()
    }
}

/// A token cancelled on the first Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let child = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted; stopping outstanding requests");
            child.cancel();
        }
    });
    token
}

fn print_summary(summary: &BenchSummary, json: bool) {
    if json {
        println!("{}", ConsoleFormatter::format_json(summary));
    } else {
        println!("{}", ConsoleFormatter::format(summary));
    }
}
