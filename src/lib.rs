//! Edge Metrics
//!
//! CDN access log analysis for the Riftfound web property.
//!
//! This crate provides the core implementation for the
//! `edge-metrics` CLI tool: parsing tab-separated CloudFront
//! access logs and aggregating them into a traffic report.
//!
//! ## Getting Started
//!
//! Most users should install and use the CLI:
//!
//! ```bash
//! cargo install edge-metrics
//! edge-metrics analyze --logs ./logs
//! ```

pub mod aggregator;
pub mod commands;
pub mod loader;
pub mod output;
pub mod parser;
pub mod utils;
