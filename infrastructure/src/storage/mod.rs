//! File-backed record storage

mod json_store;

pub use json_store::{JsonFileStore, StorePaths};
