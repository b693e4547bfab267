//! CLI command definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for mcq-bench
#[derive(Parser, Debug)]
#[command(name = "mcq-bench")]
#[command(author, version, about = "Multiple-choice grammar benchmark for LLMs")]
#[command(long_about = r#"
mcq-bench turns an annotated workbook of Chinese directional-verb
constructions into multiple-choice questions, asks every configured model,
extracts the letters each model chose and scores the answers.

The pipeline has four stages, each reading what the previous one saved:
1. build:   sheets        -> questions.json
2. call:    questions     -> responses/<model>.json
3. extract: responses     -> extracted/<model>.json
4. report:  graded files  -> report/summary.json + report/<model>.json

Configuration files are loaded from (in priority order):
1. MCQ_BENCH_* environment variables (e.g. MCQ_BENCH_API__BASE_URL)
2. --config <path>     Explicit config file
3. ./mcq-bench.toml    Project-level config
4. ~/.config/mcq-bench/config.toml   Global config

Example:
  mcq-bench run
  mcq-bench call -m gpt-4o -m deepseek-chat
  mcq-bench report --json
  mcq-bench grade "经过分析，正确答案是B"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long, global = true)]
    pub show_config: bool,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Pipeline stages and utilities
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the question set from the sheet export
    Build {
        /// Option shuffle seed (overrides [corpus] seed)
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Send every question to every model
    Call(ModelArgs),

    /// Extract and judge the answers in saved replies
    Extract(ModelArgs),

    /// Score graded replies and write the report
    Report {
        #[command(flatten)]
        models: ModelArgs,

        /// Print the summary as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Run build, call, extract and report in order
    Run {
        #[command(flatten)]
        models: ModelArgs,

        /// Option shuffle seed (overrides [corpus] seed)
        #[arg(long)]
        seed: Option<u64>,

        /// Print the summary as JSON instead of tables
        #[arg(long)]
        json: bool,
    },

    /// Extract the selected letters from one reply text
    Grade {
        /// Reply text
        text: String,
    },
}

/// Model selection shared by the per-model stages
#[derive(Args, Debug, Clone, Default)]
pub struct ModelArgs {
    /// Models to benchmark (can be specified multiple times; default: [models] names)
    #[arg(short, long = "model", value_name = "MODEL")]
    pub models: Vec<String>,
}
