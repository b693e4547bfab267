//! Configuration file loading for mcq-bench
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `MCQ_BENCH_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./mcq-bench.toml` or `./.mcq-bench.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/mcq-bench/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, FileApiConfig, FileConfig, FileCorpusConfig, FileExecutionConfig,
    FileModelsConfig, FilePathsConfig,
};
pub use loader::ConfigLoader;
