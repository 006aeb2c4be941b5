//! Aggregation of log records into the metrics report.
//!
//! This module transforms the loaded record set into:
//! - Visitor identity resolution and per-record classification
//! - A reusable grouping/counting primitive
//! - The final metrics report

pub mod classify;
pub mod metrics;
pub mod tally;

// Re-export main types and functions
pub use classify::{classify_browser, visitor_id, Browser};
pub use metrics::analyze_records;
pub use tally::{tally_by, tally_visitors_by, Tally, TallyEntry};
