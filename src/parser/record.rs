//! CloudFront access log line parsing.
//!
//! Each log line is tab-separated with a fixed positional schema of 33
//! named fields. Lines starting with `#` are format headers emitted by
//! CloudFront itself and carry no record.

use crate::utils::config::{FIELD_COUNT, MIN_RECORD_FIELDS};

/// Field names of the CloudFront log schema, in wire order
///
/// **Public** - shared with tests and the `schema` subcommand
pub const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "date",
    "time",
    "edge_location",
    "bytes",
    "client_ip",
    "method",
    "host",
    "uri_stem",
    "status",
    "referer",
    "user_agent",
    "query_string",
    "cookie",
    "edge_result_type",
    "request_id",
    "host_header",
    "protocol",
    "cs_bytes",
    "time_taken",
    "forwarded_for",
    "ssl_protocol",
    "ssl_cipher",
    "edge_response_result_type",
    "protocol_version",
    "fle_status",
    "fle_encrypted_fields",
    "c_port",
    "time_to_first_byte",
    "edge_detailed_result_type",
    "content_type",
    "content_len",
    "range_start",
    "range_end",
];

/// One parsed access log record
///
/// **Public** - the unit of data flowing through the pipeline
///
/// Always holds exactly 33 values in schema order; positions beyond the
/// parts present on the wire default to the empty string. Immutable after
/// construction.
#[derive(Debug, Clone)]
pub struct LogRecord {
    values: Vec<String>,
}

impl LogRecord {
    /// Look up a field value by schema name
    ///
    /// **Public** - generic access; returns None for unknown names
    pub fn get(&self, name: &str) -> Option<&str> {
        FIELD_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| self.values[i].as_str())
    }

    pub fn date(&self) -> &str {
        &self.values[0]
    }

    pub fn edge_location(&self) -> &str {
        &self.values[2]
    }

    pub fn client_ip(&self) -> &str {
        &self.values[4]
    }

    pub fn uri_stem(&self) -> &str {
        &self.values[7]
    }

    pub fn status(&self) -> &str {
        &self.values[8]
    }

    pub fn user_agent(&self) -> &str {
        &self.values[10]
    }

    pub fn cookie(&self) -> &str {
        &self.values[12]
    }
}

/// Parse one raw log line into a record
///
/// **Public** - main entry point for line parsing
///
/// # Arguments
/// * `line` - one line of raw text, trailing newline tolerated
///
/// # Returns
/// `Some(LogRecord)` for a usable record, `None` for header/comment lines
/// and structurally incomplete lines (fewer than 10 tab-separated parts).
/// Malformed lines are never an error; best-effort ingestion is expected.
pub fn parse_log_line(line: &str) -> Option<LogRecord> {
    if line.starts_with('#') {
        return None;
    }

    let parts: Vec<&str> = line.trim().split('\t').collect();
    if parts.len() < MIN_RECORD_FIELDS {
        return None;
    }

    let values = (0..FIELD_COUNT)
        .map(|i| parts.get(i).copied().unwrap_or("").to_string())
        .collect();

    Some(LogRecord { values })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Build a full 33-part line with recognizable values
    fn full_line() -> String {
        (0..FIELD_COUNT)
            .map(|i| format!("v{}", i))
            .collect::<Vec<_>>()
            .join("\t")
    }

    #[test]
    fn test_parse_full_line() {
        let record = parse_log_line(&full_line()).unwrap();
        assert_eq!(record.date(), "v0");
        assert_eq!(record.edge_location(), "v2");
        assert_eq!(record.client_ip(), "v4");
        assert_eq!(record.uri_stem(), "v7");
        assert_eq!(record.status(), "v8");
        assert_eq!(record.user_agent(), "v10");
        assert_eq!(record.cookie(), "v12");
    }

    #[test]
    fn test_all_fields_present_for_short_but_valid_line() {
        // 10 parts is the acceptance threshold; the remaining 23 fields
        // must still resolve, defaulted to empty.
        let line = (0..10).map(|i| format!("p{}", i)).collect::<Vec<_>>().join("\t");
        let record = parse_log_line(&line).unwrap();

        for name in FIELD_NAMES {
            assert!(record.get(name).is_some(), "missing field {}", name);
        }
        assert_eq!(record.get("date"), Some("p0"));
        assert_eq!(record.get("user_agent"), Some(""));
        assert_eq!(record.get("range_end"), Some(""));
    }

    #[test]
    fn test_comment_line_rejected() {
        assert!(parse_log_line("#Version: 1.0").is_none());
        assert!(parse_log_line("#Fields: date time x-edge-location").is_none());
    }

    #[test]
    fn test_too_few_fields_rejected() {
        assert!(parse_log_line("").is_none());
        assert!(parse_log_line("2024-01-01\t00:00:00\tLAX3").is_none());
        let nine = (0..9).map(|i| i.to_string()).collect::<Vec<_>>().join("\t");
        assert!(parse_log_line(&nine).is_none());
    }

    #[test]
    fn test_trailing_newline_tolerated() {
        let line = format!("{}\n", full_line());
        let record = parse_log_line(&line).unwrap();
        assert_eq!(record.get("range_end"), Some("v32"));
    }

    #[test]
    fn test_extra_fields_ignored() {
        let line = format!("{}\textra1\textra2", full_line());
        let record = parse_log_line(&line).unwrap();
        assert_eq!(record.get("range_end"), Some("v32"));
        assert!(record.get("extra1").is_none());
    }

    #[test]
    fn test_unknown_field_name() {
        let record = parse_log_line(&full_line()).unwrap();
        assert!(record.get("no_such_field").is_none());
    }
}
