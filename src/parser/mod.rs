//! Log line parsing and report schema definitions.
//!
//! This module handles:
//! - Parsing raw tab-separated CloudFront log lines
//! - The fixed 33-field record schema
//! - Defining the report output schema

pub mod record;
pub mod schema;

// Re-export main types
pub use record::{parse_log_line, LogRecord, FIELD_NAMES};
pub use schema::{
    ApiUsage, BrowserCount, DailyStats, DateRange, EdgeCount, ExternalClicks, MetricsReport,
    PageCount, PageViews, Summary, ViewCounts,
};
