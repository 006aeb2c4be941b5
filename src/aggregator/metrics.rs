//! Compute the metrics report from the loaded record set.
//!
//! Each metric is an independent computation over the same materialized
//! record sequence; nothing here is streaming or incremental.

use super::classify::{
    classify_browser, is_api_call, is_calendar_request, is_event_detail, is_homepage,
    is_location_search, is_referral_click, is_successful, visitor_id,
};
use super::tally::{tally_by, tally_visitors_by};
use crate::parser::{
    ApiUsage, BrowserCount, DailyStats, DateRange, EdgeCount, ExternalClicks, LogRecord,
    MetricsReport, PageCount, PageViews, Summary, ViewCounts,
};
use crate::utils::config::{TOP_EDGES_LIMIT, TOP_PAGES_LIMIT};
use crate::utils::error::AggregateError;
use log::debug;
use std::collections::{BTreeMap, HashSet};

/// Analyze the full record set and produce the metrics report
///
/// **Public** - main entry point for aggregation
///
/// # Arguments
/// * `records` - every accepted log record, already date-filtered
///
/// # Returns
/// The complete report, or `AggregateError::NoRecords` when there is
/// nothing to report on. The rendering layer turns that into a degenerate
/// report rather than a crash.
pub fn analyze_records(records: &[LogRecord]) -> Result<MetricsReport, AggregateError> {
    if records.is_empty() {
        return Err(AggregateError::NoRecords);
    }

    debug!("Aggregating {} records", records.len());

    Ok(MetricsReport {
        summary: summarize(records),
        page_views: page_views(records),
        api_usage: api_usage(records),
        external_clicks: external_clicks(records),
        daily_stats: daily_stats(records),
        top_pages: top_pages(records),
        top_edge_locations: top_edge_locations(records),
        browsers: browser_histogram(records),
    })
}

/// Total/unique/successful counts and the covered date range
///
/// **Private** - callers get this via the report
fn summarize(records: &[LogRecord]) -> Summary {
    let visitors: HashSet<&str> = records.iter().map(visitor_id).collect();
    let successful = records.iter().filter(|r| is_successful(r)).count() as u64;

    // Dates are YYYY-MM-DD, so lexical min/max is chronological min/max.
    // records is non-empty here, checked by analyze_records.
    let start = records.iter().map(|r| r.date()).min().unwrap_or_default();
    let end = records.iter().map(|r| r.date()).max().unwrap_or_default();

    Summary {
        total_requests: records.len() as u64,
        unique_visitors: visitors.len() as u64,
        // Treats redirects as successes alongside 2xx, matching the
        // historical report
        successful_requests: successful,
        date_range: DateRange {
            start: start.to_string(),
            end: end.to_string(),
        },
    }
}

/// Total hits and distinct visitors over a filtered subset
fn view_counts<'a>(records: impl Iterator<Item = &'a LogRecord>) -> ViewCounts {
    let mut total = 0u64;
    let mut visitors = HashSet::new();
    for record in records {
        total += 1;
        visitors.insert(visitor_id(record));
    }
    ViewCounts {
        total,
        unique: visitors.len() as u64,
    }
}

fn page_views(records: &[LogRecord]) -> PageViews {
    let homepage = view_counts(records.iter().filter(|r| is_homepage(r)));

    let event_details = view_counts(records.iter().filter(|r| is_event_detail(r)));
    let unique_events: HashSet<&str> = records
        .iter()
        .filter(|r| is_event_detail(r))
        .map(|r| r.uri_stem())
        .collect();

    PageViews {
        homepage,
        event_details,
        unique_events_viewed: unique_events.len() as u64,
    }
}

fn api_usage(records: &[LogRecord]) -> ApiUsage {
    let api: Vec<&LogRecord> = records.iter().filter(|r| is_api_call(r)).collect();
    ApiUsage {
        total_api_calls: api.len() as u64,
        calendar_requests: api.iter().filter(|r| is_calendar_request(r)).count() as u64,
        location_searches: api.iter().filter(|r| is_location_search(r)).count() as u64,
    }
}

fn external_clicks(records: &[LogRecord]) -> ExternalClicks {
    let clicks = view_counts(records.iter().filter(|r| is_referral_click(r)));

    // Zero clicks usually means the /visit endpoint is not deployed yet;
    // worth a caveat in the report, not an error
    let note = if clicks.total == 0 {
        Some("Requires /visit tracking endpoint".to_string())
    } else {
        None
    };

    ExternalClicks {
        visit_store_clicks: clicks,
        note,
    }
}

fn daily_stats(records: &[LogRecord]) -> BTreeMap<String, DailyStats> {
    tally_visitors_by(records, |r| r.date(), visitor_id)
        .into_entries()
        .into_iter()
        .map(|entry| {
            let stats = DailyStats {
                requests: entry.count,
                unique_visitors: entry.unique_visitors(),
            };
            (entry.key, stats)
        })
        .collect()
}

fn top_pages(records: &[LogRecord]) -> Vec<PageCount> {
    tally_by(records, |r| r.uri_stem())
        .into_top(TOP_PAGES_LIMIT)
        .into_iter()
        .map(|entry| PageCount {
            path: entry.key,
            count: entry.count,
        })
        .collect()
}

fn top_edge_locations(records: &[LogRecord]) -> Vec<EdgeCount> {
    tally_by(records, |r| r.edge_location())
        .into_top(TOP_EDGES_LIMIT)
        .into_iter()
        .map(|entry| EdgeCount {
            location: entry.key,
            count: entry.count,
        })
        .collect()
}

fn browser_histogram(records: &[LogRecord]) -> Vec<BrowserCount> {
    tally_by(records, |r| classify_browser(r.user_agent()).name())
        .into_sorted_desc()
        .into_iter()
        .map(|entry| BrowserCount {
            browser: entry.key,
            count: entry.count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_log_line;

    fn record(date: &str, ip: &str, path: &str, status: &str, ua: &str, cookie: &str) -> LogRecord {
        let line = format!(
            "{}\t12:00:00\tLAX3\t512\t{}\tGET\thost\t{}\t{}\t-\t{}\t-\t{}",
            date, ip, path, status, ua, cookie
        );
        parse_log_line(&line).unwrap()
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(
            analyze_records(&[]),
            Err(AggregateError::NoRecords)
        ));
    }

    #[test]
    fn test_distinct_ips_without_cookies_count_individually() {
        let records: Vec<LogRecord> = (0..5)
            .map(|i| record("2024-06-15", &format!("10.0.0.{}", i), "/", "200", "-", "-"))
            .collect();

        let report = analyze_records(&records).unwrap();
        assert_eq!(report.summary.unique_visitors, report.summary.total_requests);
    }

    #[test]
    fn test_cookie_collapses_addresses() {
        let records = vec![
            record("2024-06-15", "1.1.1.1", "/", "200", "-", "mid=aa11"),
            record("2024-06-15", "2.2.2.2", "/", "200", "-", "mid=aa11"),
        ];

        let report = analyze_records(&records).unwrap();
        assert_eq!(report.summary.unique_visitors, 1);
    }

    #[test]
    fn test_date_range() {
        let records = vec![
            record("2024-06-14", "1.1.1.1", "/", "200", "-", "-"),
            record("2024-06-10", "1.1.1.1", "/", "200", "-", "-"),
            record("2024-06-12", "1.1.1.1", "/", "200", "-", "-"),
        ];

        let report = analyze_records(&records).unwrap();
        assert_eq!(report.summary.date_range.start, "2024-06-10");
        assert_eq!(report.summary.date_range.end, "2024-06-14");
    }

    #[test]
    fn test_three_line_scenario() {
        let records = vec![
            record("2024-06-15", "5.5.5.5", "/", "200", "-", "mid=u1"),
            record("2024-06-15", "5.5.5.5", "/api/events", "200", "-", "mid=u1"),
            record("2024-06-15", "1.2.3.4", "/events/ab12", "404", "-", "-"),
        ];

        let report = analyze_records(&records).unwrap();

        assert_eq!(report.summary.total_requests, 3);
        assert_eq!(report.summary.unique_visitors, 2);
        assert_eq!(report.summary.successful_requests, 2);
        assert_eq!(report.page_views.homepage.total, 1);
        assert_eq!(report.page_views.event_details.total, 1);
        assert_eq!(report.page_views.unique_events_viewed, 1);
        assert_eq!(report.api_usage.total_api_calls, 1);
        assert_eq!(report.api_usage.calendar_requests, 1);
        assert_eq!(report.api_usage.location_searches, 0);
    }

    #[test]
    fn test_external_clicks_note_when_absent() {
        let records = vec![record("2024-06-15", "1.1.1.1", "/", "200", "-", "-")];
        let report = analyze_records(&records).unwrap();

        assert_eq!(report.external_clicks.visit_store_clicks.total, 0);
        assert!(report.external_clicks.note.is_some());
    }

    #[test]
    fn test_external_clicks_counted_when_present() {
        let records = vec![
            record("2024-06-15", "1.1.1.1", "/events/ab/visit", "302", "-", "-"),
            record("2024-06-15", "1.1.1.1", "/register", "302", "-", "-"),
        ];
        let report = analyze_records(&records).unwrap();

        assert_eq!(report.external_clicks.visit_store_clicks.total, 2);
        assert_eq!(report.external_clicks.visit_store_clicks.unique, 1);
        assert!(report.external_clicks.note.is_none());
    }

    #[test]
    fn test_daily_stats_ascending_with_visitors() {
        let records = vec![
            record("2024-06-15", "1.1.1.1", "/", "200", "-", "-"),
            record("2024-06-14", "1.1.1.1", "/", "200", "-", "-"),
            record("2024-06-14", "2.2.2.2", "/", "200", "-", "-"),
        ];
        let report = analyze_records(&records).unwrap();

        let dates: Vec<_> = report.daily_stats.keys().cloned().collect();
        assert_eq!(dates, ["2024-06-14", "2024-06-15"]);
        assert_eq!(report.daily_stats["2024-06-14"].requests, 2);
        assert_eq!(report.daily_stats["2024-06-14"].unique_visitors, 2);
        assert_eq!(report.daily_stats["2024-06-15"].requests, 1);
    }

    #[test]
    fn test_top_pages_limit_and_order() {
        let mut records = Vec::new();
        for i in 0..20 {
            for _ in 0..(20 - i) {
                records.push(record("2024-06-15", "1.1.1.1", &format!("/p{}", i), "200", "-", "-"));
            }
        }
        let report = analyze_records(&records).unwrap();

        assert_eq!(report.top_pages.len(), 15);
        assert_eq!(report.top_pages[0].path, "/p0");
        assert!(report
            .top_pages
            .windows(2)
            .all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_top_edges_limit() {
        let records: Vec<LogRecord> = (0..3)
            .map(|_| record("2024-06-15", "1.1.1.1", "/", "200", "-", "-"))
            .collect();
        let report = analyze_records(&records).unwrap();

        assert_eq!(report.top_edge_locations.len(), 1);
        assert_eq!(report.top_edge_locations[0].location, "LAX3");
        assert_eq!(report.top_edge_locations[0].count, 3);
    }

    #[test]
    fn test_browser_histogram_descending() {
        let chrome = "Mozilla/5.0 Chrome/125.0 Safari/537.36";
        let firefox = "Mozilla/5.0 Firefox/126.0";
        let records = vec![
            record("2024-06-15", "1.1.1.1", "/", "200", firefox, "-"),
            record("2024-06-15", "1.1.1.1", "/", "200", chrome, "-"),
            record("2024-06-15", "1.1.1.1", "/", "200", chrome, "-"),
        ];
        let report = analyze_records(&records).unwrap();

        assert_eq!(report.browsers[0].browser, "Chrome");
        assert_eq!(report.browsers[0].count, 2);
        assert_eq!(report.browsers[1].browser, "Firefox");
    }
}
