//! Logging infrastructure: the structured per-call log.
//!
//! Provides [`JsonlCallLogger`], a JSONL file writer that implements
//! the [`CallLogger`](mcq_application::CallLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlCallLogger;
