//! Per-record classification rules.
//!
//! Every rule here is a pure function of a single record's fields, so the
//! aggregator's control flow stays free of pattern details and the rules
//! can be tested (and later replaced) independently.

use crate::parser::LogRecord;
use regex::Regex;
use std::sync::OnceLock;

fn visitor_cookie_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"mid=([a-f0-9-]+)").unwrap())
}

fn event_detail_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^/events?/[a-f0-9-]+$").unwrap())
}

fn referral_click_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"/(visit|register)$").unwrap())
}

/// Resolve the stable visitor identifier for a record
///
/// **Public** - the identity used for all uniqueness counting
///
/// The frontend sets a `mid` cookie with a persistent id so a visitor
/// survives address changes (mobile users switching networks). Falling
/// back to the client address overcounts visitors behind shared addresses,
/// which is accepted as an approximation.
pub fn visitor_id(record: &LogRecord) -> &str {
    visitor_cookie_re()
        .captures(record.cookie())
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
        .unwrap_or_else(|| record.client_ip())
}

/// True for a 2xx or 3xx status code
pub fn is_successful(record: &LogRecord) -> bool {
    record.status().starts_with('2') || record.status().starts_with('3')
}

/// True for the homepage paths
pub fn is_homepage(record: &LogRecord) -> bool {
    matches!(record.uri_stem(), "/" | "/index.html")
}

/// True for event detail pages (`/event/<id>` or `/events/<id>`)
pub fn is_event_detail(record: &LogRecord) -> bool {
    event_detail_re().is_match(record.uri_stem())
}

/// True for any API request
pub fn is_api_call(record: &LogRecord) -> bool {
    record.uri_stem().starts_with("/api/")
}

/// True for the event calendar endpoint
pub fn is_calendar_request(record: &LogRecord) -> bool {
    record.uri_stem() == "/api/events"
}

/// True for the geocoding endpoint
pub fn is_location_search(record: &LogRecord) -> bool {
    record.uri_stem().starts_with("/api/events/geocode")
}

/// True for outbound referral clicks (`.../visit`, `.../register`)
pub fn is_referral_click(record: &LogRecord) -> bool {
    referral_click_re().is_match(record.uri_stem())
}

/// Browser family derived from the user-agent string
///
/// **Public** - used for the browser histogram
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Browser {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Bot,
    Other,
}

impl Browser {
    /// Display name used as the histogram key
    pub fn name(self) -> &'static str {
        match self {
            Browser::Chrome => "Chrome",
            Browser::Firefox => "Firefox",
            Browser::Safari => "Safari",
            Browser::Edge => "Edge",
            Browser::Bot => "Bot",
            Browser::Other => "Other",
        }
    }
}

/// Classify a user-agent string into a browser family
///
/// **Public** - ordered substring precedence
///
/// Chrome is checked before Safari because Chrome user agents also carry
/// a "Safari" token.
pub fn classify_browser(user_agent: &str) -> Browser {
    let lowered = user_agent.to_lowercase();
    if user_agent.contains("Chrome") {
        Browser::Chrome
    } else if user_agent.contains("Firefox") {
        Browser::Firefox
    } else if user_agent.contains("Safari") {
        Browser::Safari
    } else if user_agent.contains("Edge") {
        Browser::Edge
    } else if lowered.contains("bot") || lowered.contains("crawler") {
        Browser::Bot
    } else {
        Browser::Other
    }
}
