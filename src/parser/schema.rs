//! Output JSON schema definitions for the metrics report.
//!
//! This module defines the structure of the report document written to
//! disk (or stdout). The same structs are read back by the `validate`
//! subcommand, so every field round-trips through serde.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level metrics report produced by one analysis run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Overall traffic counts and the covered date range
    pub summary: Summary,

    /// Homepage and event-detail page view counts
    pub page_views: PageViews,

    /// API endpoint usage breakdown
    pub api_usage: ApiUsage,

    /// Outbound referral click tracking
    pub external_clicks: ExternalClicks,

    /// Per-day request/visitor counts, keyed by date ascending
    pub daily_stats: BTreeMap<String, DailyStats>,

    /// Most requested paths, descending by count
    pub top_pages: Vec<PageCount>,

    /// Busiest CDN edge locations, descending by count
    pub top_edge_locations: Vec<EdgeCount>,

    /// Browser mix, descending by count
    pub browsers: Vec<BrowserCount>,
}

/// Overall traffic summary
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    /// Total accepted log records
    pub total_requests: u64,

    /// Distinct visitor identifiers seen
    pub unique_visitors: u64,

    /// Records with a 2xx or 3xx status
    pub successful_requests: u64,

    /// First and last date present in the record set
    pub date_range: DateRange,
}

/// Inclusive date range covered by the analyzed records
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Page view counts for the tracked page categories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageViews {
    /// `/` and `/index.html`
    pub homepage: ViewCounts,

    /// Event detail pages (`/event/<id>` or `/events/<id>`)
    pub event_details: ViewCounts,

    /// Number of distinct event pages that received traffic
    pub unique_events_viewed: u64,
}

/// Total hits and distinct visitors for one page category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewCounts {
    pub total: u64,
    pub unique: u64,
}

/// API endpoint usage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiUsage {
    pub total_api_calls: u64,
    pub calendar_requests: u64,
    pub location_searches: u64,
}

/// Outbound referral clicks (`.../visit`, `.../register`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExternalClicks {
    pub visit_store_clicks: ViewCounts,

    /// Set when no click records exist; the tracking endpoint may not be
    /// deployed yet, which is informational rather than an error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Request and visitor counts for a single day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStats {
    pub requests: u64,
    pub unique_visitors: u64,
}

/// One entry in the top-pages list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageCount {
    pub path: String,
    pub count: u64,
}

/// One entry in the top-edge-locations list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeCount {
    pub location: String,
    pub count: u64,
}

/// One entry in the browser histogram
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserCount {
    pub browser: String,
    pub count: u64,
}
