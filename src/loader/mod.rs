//! Log file loading.
//!
//! Enumerates a logs directory, reads each plain or gzip-compressed file
//! line by line through the record parser, and applies the day-window
//! cutoff. Per-file read failures are warnings, never fatal: one corrupt
//! download must not cost the rest of the run.

use crate::parser::{parse_log_line, LogRecord};
use crate::utils::error::LoadError;
use chrono::{NaiveDate, TimeDelta};
use flate2::read::GzDecoder;
use log::{debug, info, warn};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Load all log records from a directory
///
/// **Public** - main entry point for log loading
///
/// # Arguments
/// * `logs_dir` - directory containing `.gz` and/or plain log files
/// * `days` - optional day window; records older than `today - days` are
///   excluded. `None` disables filtering.
/// * `today` - reference date for the cutoff, injected so tests can pin it
///
/// # Returns
/// All accepted records, in directory-enumeration order then line order.
/// No cross-file sort is performed; the aggregator re-sorts where order
/// matters.
///
/// # Errors
/// * `LoadError::ReadDir` - the directory itself cannot be enumerated
pub fn load_logs(
    logs_dir: &Path,
    days: Option<i64>,
    today: NaiveDate,
) -> Result<Vec<LogRecord>, LoadError> {
    let cutoff = days.map(|n| (today - TimeDelta::days(n)).format("%Y-%m-%d").to_string());
    if let Some(c) = &cutoff {
        debug!("Excluding records dated before {}", c);
    }

    let entries = std::fs::read_dir(logs_dir)
        .map_err(|e| LoadError::ReadDir(logs_dir.to_path_buf(), e))?;

    let mut records = Vec::new();
    let mut files_read = 0u64;

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!("Could not read directory entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        let name = entry.file_name().to_string_lossy().into_owned();

        let gzipped = name.ends_with(".gz");
        if !gzipped && (name.starts_with('.') || !path.is_file()) {
            // Dotfiles, subdirectories, sockets etc. are not log files
            continue;
        }

        match read_log_file(&path, gzipped, cutoff.as_deref(), &mut records) {
            Ok(accepted) => {
                debug!("{}: {} records", path.display(), accepted);
                files_read += 1;
            }
            Err(e) => warn!("Could not read {}: {}", path.display(), e),
        }
    }

    info!("Loaded {} records from {} files", records.len(), files_read);
    Ok(records)
}

/// Read one log file, appending accepted records to `out`
///
/// **Private** - the file handle is scoped here and closed on return
fn read_log_file(
    path: &Path,
    gzipped: bool,
    cutoff: Option<&str>,
    out: &mut Vec<LogRecord>,
) -> std::io::Result<usize> {
    let file = File::open(path)?;
    if gzipped {
        scan_lines(BufReader::new(GzDecoder::new(file)), cutoff, out)
    } else {
        scan_lines(BufReader::new(file), cutoff, out)
    }
}

/// Scan a reader line by line through the record parser
///
/// **Private** - invalid UTF-8 is replaced rather than aborting the file
fn scan_lines<R: Read>(
    mut reader: BufReader<R>,
    cutoff: Option<&str>,
    out: &mut Vec<LogRecord>,
) -> std::io::Result<usize> {
    let mut buf = Vec::new();
    let mut accepted = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        if let Some(record) = parse_log_line(&line) {
            if let Some(cutoff) = cutoff {
                // Dates are YYYY-MM-DD, so lexical order is date order
                if record.date() < cutoff {
                    continue;
                }
            }
            out.push(record);
            accepted += 1;
        }
    }

    Ok(accepted)
}
