//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;

// Re-export main command functions
pub use analyze::{execute_analyze, validate_args, AnalyzeArgs, OutputFormat};
