//! Plain-text table renderer for the metrics report.
//!
//! Purely presentational: every number here comes straight from the
//! aggregated report, no new computation beyond percentages.

use crate::parser::MetricsReport;
use crate::utils::config::DAILY_DISPLAY_DAYS;

/// Render a report as a multi-section text table
///
/// **Public** - the default output format
pub fn format_table(report: &MetricsReport) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(50));
    lines.push("EDGE METRICS REPORT".to_string());
    lines.push("=".repeat(50));

    let s = &report.summary;
    lines.push(String::new());
    lines.push(format!(
        "Date range: {} to {}",
        s.date_range.start, s.date_range.end
    ));
    lines.push(String::new());
    lines.push("TRAFFIC OVERVIEW".to_string());
    lines.push("-".repeat(40));
    lines.push(format!("Total requests:      {}", comma(s.total_requests)));
    lines.push(format!("Unique visitors:     {}", comma(s.unique_visitors)));
    lines.push(format!("Successful requests: {}", comma(s.successful_requests)));

    let pv = &report.page_views;
    lines.push(String::new());
    lines.push("PAGE VIEWS".to_string());
    lines.push("-".repeat(40));
    lines.push(format!(
        "Homepage:            {} ({} unique)",
        comma(pv.homepage.total),
        comma(pv.homepage.unique)
    ));
    lines.push(format!(
        "Event details:       {} ({} unique)",
        comma(pv.event_details.total),
        comma(pv.event_details.unique)
    ));
    lines.push(format!(
        "Unique events viewed: {}",
        comma(pv.unique_events_viewed)
    ));

    let api = &report.api_usage;
    lines.push(String::new());
    lines.push("API USAGE".to_string());
    lines.push("-".repeat(40));
    lines.push(format!("Total API calls:     {}", comma(api.total_api_calls)));
    lines.push(format!("Calendar requests:   {}", comma(api.calendar_requests)));
    lines.push(format!("Location searches:   {}", comma(api.location_searches)));

    let ec = &report.external_clicks;
    lines.push(String::new());
    lines.push("EXTERNAL CLICKS".to_string());
    lines.push("-".repeat(40));
    if let Some(note) = &ec.note {
        lines.push(format!("Visit store clicks: {}", note));
    } else {
        lines.push(format!(
            "Visit store clicks: {} ({} unique)",
            comma(ec.visit_store_clicks.total),
            comma(ec.visit_store_clicks.unique)
        ));
    }

    lines.push(String::new());
    lines.push("TOP PAGES".to_string());
    lines.push("-".repeat(40));
    for page in report.top_pages.iter().take(10) {
        lines.push(format!("{:>8}  {}", page.count, page.path));
    }

    lines.push(String::new());
    lines.push("DAILY TRAFFIC".to_string());
    lines.push("-".repeat(40));
    let skip = report.daily_stats.len().saturating_sub(DAILY_DISPLAY_DAYS);
    for (date, stats) in report.daily_stats.iter().skip(skip) {
        lines.push(format!(
            "{}: {:>6} requests, {:>5} unique",
            date, stats.requests, stats.unique_visitors
        ));
    }

    lines.push(String::new());
    lines.push("BROWSERS".to_string());
    lines.push("-".repeat(40));
    for entry in &report.browsers {
        let pct = entry.count as f64 / s.total_requests as f64 * 100.0;
        lines.push(format!(
            "{:>10}: {:>8} ({:.1}%)",
            entry.browser, entry.count, pct
        ));
    }

    lines.join("\n")
}

/// Format a count with thousands separators
///
/// **Private** - presentation only
fn comma(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::analyze_records;
    use crate::parser::parse_log_line;

    fn sample_report() -> MetricsReport {
        let lines = [
            "2024-06-15\t12:00:00\tLAX3\t512\t1.1.1.1\tGET\thost\t/\t200\t-\tChrome\t-\tmid=u1",
            "2024-06-16\t09:00:00\tLHR5\t512\t2.2.2.2\tGET\thost\t/api/events\t200\t-\tFirefox\t-\t-",
        ];
        let records: Vec<_> = lines.iter().filter_map(|l| parse_log_line(l)).collect();
        analyze_records(&records).unwrap()
    }

    #[test]
    fn test_comma_grouping() {
        assert_eq!(comma(0), "0");
        assert_eq!(comma(999), "999");
        assert_eq!(comma(1000), "1,000");
        assert_eq!(comma(1234567), "1,234,567");
    }

    #[test]
    fn test_sections_present() {
        let table = format_table(&sample_report());
        for section in [
            "TRAFFIC OVERVIEW",
            "PAGE VIEWS",
            "API USAGE",
            "EXTERNAL CLICKS",
            "TOP PAGES",
            "DAILY TRAFFIC",
            "BROWSERS",
        ] {
            assert!(table.contains(section), "missing section {}", section);
        }
        assert!(table.contains("Date range: 2024-06-15 to 2024-06-16"));
    }

    #[test]
    fn test_note_rendered_when_no_clicks() {
        let table = format_table(&sample_report());
        assert!(table.contains("Requires /visit tracking endpoint"));
    }

    #[test]
    fn test_clicks_rendered_when_present() {
        let mut report = sample_report();
        report.external_clicks.note = None;
        report.external_clicks.visit_store_clicks.total = 4;
        report.external_clicks.visit_store_clicks.unique = 3;

        let table = format_table(&report);
        assert!(table.contains("Visit store clicks: 4 (3 unique)"));
    }

    #[test]
    fn test_daily_section_limited_to_trailing_days() {
        let mut records = Vec::new();
        for day in 1..=20 {
            let line = format!(
                "2024-06-{:02}\t12:00:00\tLAX3\t512\t1.1.1.1\tGET\thost\t/\t200\t-",
                day
            );
            records.push(parse_log_line(&line).unwrap());
        }
        let table = format_table(&analyze_records(&records).unwrap());

        assert!(!table.contains("2024-06-06:"));
        assert!(table.contains("2024-06-07:"));
        assert!(table.contains("2024-06-20:"));
    }
}
