//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads log records from the logs directory
//! 2. Aggregates them into the metrics report
//! 3. Renders the report as JSON or a text table
//! 4. Writes the result to a file or stdout

use crate::aggregator::analyze_records;
use crate::loader::load_logs;
use crate::output::{format_table, report_to_string, write_report};
use crate::utils::config::MAX_DAY_WINDOW;
use crate::utils::error::AggregateError;
use anyhow::{Context, Result};
use chrono::Local;
use log::info;
use std::path::PathBuf;
use std::time::Instant;

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// Directory containing the downloaded log files
    pub logs_dir: PathBuf,

    /// Day window; None disables date filtering
    pub days: Option<i64>,

    /// Report output format
    pub format: OutputFormat,

    /// Output file; None writes to stdout
    pub output: Option<PathBuf>,
}

/// Validate analyze arguments
///
/// **Public** - called before execute_analyze for early failure
///
/// The missing-directory case is fatal by design: there is nothing to
/// analyze, so the process should exit non-zero with a clear message.
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    if !args.logs_dir.is_dir() {
        anyhow::bail!(
            "No logs directory found at {}. Download logs there first.",
            args.logs_dir.display()
        );
    }

    if let Some(days) = args.days {
        if days > MAX_DAY_WINDOW {
            anyhow::bail!("--days is too large (max {})", MAX_DAY_WINDOW);
        }
    }

    Ok(())
}

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Arguments
/// * `args` - analyze command arguments
///
/// # Returns
/// Ok if the report was produced. An empty record set is NOT an error:
/// it renders as a degenerate report so scheduled runs on a quiet site
/// still succeed.
pub fn execute_analyze(args: AnalyzeArgs) -> Result<()> {
    let start_time = Instant::now();

    info!("Loading logs from {}...", args.logs_dir.display());

    let today = Local::now().date_naive();
    let records = load_logs(&args.logs_dir, args.days, today)
        .context("Failed to load log files")?;

    info!("Loaded {} records", records.len());

    match analyze_records(&records) {
        Ok(report) => match (&args.output, args.format) {
            (Some(path), OutputFormat::Json) => {
                write_report(&report, path).context("Failed to write report JSON")?;
                info!("Report written to {}", path.display());
            }
            (Some(path), OutputFormat::Table) => {
                std::fs::write(path, format_table(&report))
                    .with_context(|| format!("Failed to write report to {}", path.display()))?;
                info!("Report written to {}", path.display());
            }
            (None, OutputFormat::Json) => println!("{}", report_to_string(&report)?),
            (None, OutputFormat::Table) => println!("{}", format_table(&report)),
        },
        Err(AggregateError::NoRecords) => {
            let rendered = render_empty(args.format);
            match &args.output {
                Some(path) => {
                    std::fs::write(path, rendered).with_context(|| {
                        format!("Failed to write report to {}", path.display())
                    })?;
                    info!("Report written to {}", path.display());
                }
                None => println!("{}", rendered),
            }
        }
    }

    info!("Analysis completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(())
}

/// Render the degenerate no-records report
///
/// **Private** - keeps the error marker shape in one place
fn render_empty(format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(&serde_json::json!({
                "error": "No log records found"
            }))
            // A literal this small cannot fail to serialize
            .unwrap_or_else(|_| String::from("{\"error\": \"No log records found\"}"))
        }
        OutputFormat::Table => "No log records found".to_string(),
    }
}
