//! Output writers for the metrics report.
//!
//! This module handles the two presentation formats:
//! - Pretty-printed JSON documents (and reading them back)
//! - Multi-section plain-text tables

pub mod json;
pub mod table;

// Re-export main functions
pub use json::{read_report, report_to_string, write_report};
pub use table::format_table;
