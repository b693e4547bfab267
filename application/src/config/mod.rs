//! Application-level configuration.
//!
//! - [`ExecutionParams`]: concurrency bounds for the call stage

pub mod execution_params;

pub use execution_params::ExecutionParams;
