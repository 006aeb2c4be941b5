//! Edge Metrics CLI
//!
//! Parses edge-CDN access logs and produces an aggregate traffic
//! and behavior report for a web property.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use edge_metrics::commands::{execute_analyze, validate_args, AnalyzeArgs, OutputFormat};
use edge_metrics::parser::FIELD_NAMES;
use edge_metrics::utils::config::DEFAULT_DAY_WINDOW;

/// Edge Metrics - CDN access log analysis
#[derive(Parser, Debug)]
#[command(name = "edge-metrics")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze the downloaded logs and produce a report
    Analyze {
        /// Directory containing log files (plain or .gz)
        #[arg(short, long, default_value = "logs")]
        logs: PathBuf,

        /// Number of days to analyze (0 disables the window)
        #[arg(short, long, default_value_t = DEFAULT_DAY_WINDOW)]
        days: i64,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display the log field schema
    Schema {
        /// Show full field list
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging; diagnostics go to stderr, report output to stdout
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            logs,
            days,
            format,
            output,
        } => {
            let args = AnalyzeArgs {
                logs_dir: logs,
                days: if days == 0 { None } else { Some(days) },
                format,
                output,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

/// Validate a report JSON file
///
/// **Private** - internal command implementation
fn validate_report_file(file_path: PathBuf) -> Result<()> {
    use edge_metrics::output::read_report;

    println!("Validating report: {}", file_path.display());

    let report = read_report(&file_path)?;

    println!("✓ Valid report JSON");
    println!("  Date range: {} to {}", report.summary.date_range.start, report.summary.date_range.end);
    println!("  Total requests: {}", report.summary.total_requests);
    println!("  Unique visitors: {}", report.summary.unique_visitors);
    println!("  Days covered: {}", report.daily_stats.len());
    println!("  Top pages: {}", report.top_pages.len());

    Ok(())
}

/// Display the log field schema
///
/// **Private** - internal command implementation
fn display_schema(show_details: bool) {
    println!("CloudFront access log schema");
    println!("Tab-separated, {} positional fields", FIELD_NAMES.len());
    println!();

    if show_details {
        for (i, name) in FIELD_NAMES.iter().enumerate() {
            println!("  {:>2}  {}", i, name);
        }
    } else {
        println!("Use --show for the full field list");
    }
}

/// Display version information
///
/// **Private** - internal command implementation
fn display_version() {
    println!("Edge Metrics v{}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("CDN access log analysis for periodic traffic reports.");
}
