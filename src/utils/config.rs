//! Configuration and constants for the CLI.

/// Number of named fields in the CloudFront access log schema
pub const FIELD_COUNT: usize = 33;

/// Minimum tab-separated parts for a line to count as a record.
/// Valid lines always carry far more; this only rejects truncated junk.
pub const MIN_RECORD_FIELDS: usize = 10;

/// Default analysis window in days
pub const DEFAULT_DAY_WINDOW: i64 = 30;

/// Upper bound on --days (roughly ten years of logs)
pub const MAX_DAY_WINDOW: i64 = 3650;

/// Number of entries kept in the top-pages list
pub const TOP_PAGES_LIMIT: usize = 15;

/// Number of entries kept in the top-edge-locations list
pub const TOP_EDGES_LIMIT: usize = 10;

/// Number of trailing days shown in the table renderer's daily section
pub const DAILY_DISPLAY_DAYS: usize = 14;
