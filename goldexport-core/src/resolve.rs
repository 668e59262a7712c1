//! Argument resolution: turn optional user input into a complete [`ExportRequest`].

use crate::domain::{ExportRequest, Interval};
use chrono::{Duration, NaiveDate};
use std::path::PathBuf;
use thiserror::Error;

/// Output file used when `--output` is not given.
pub const DEFAULT_OUTPUT_FILE: &str = "GOLD_1H.csv";

/// Length of the default download window, in days. Matches how far back the
/// provider serves hourly bars.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 730;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw, possibly partial export arguments as supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct ExportArgs {
    pub start: Option<String>,
    pub end: Option<String>,
    pub output: Option<PathBuf>,
    pub interval: Option<Interval>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("invalid --{flag} date '{value}' (expected YYYY-MM-DD)")]
    InvalidDate { flag: &'static str, value: String },
}

/// Fill in defaults relative to `today`.
///
/// No ordering check is made between start and end; an inverted range is
/// passed to the provider as-is.
pub fn resolve(args: ExportArgs, today: NaiveDate) -> Result<ExportRequest, ResolveError> {
    let start_date = match args.start.as_deref() {
        Some(s) => parse_date("start", s)?,
        None => default_start(today),
    };
    let end_date = match args.end.as_deref() {
        Some(s) => parse_date("end", s)?,
        None => today,
    };

    Ok(ExportRequest {
        start_date,
        end_date,
        output_path: args
            .output
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_FILE)),
        interval: args.interval.unwrap_or_default(),
    })
}

/// `today` minus [`DEFAULT_LOOKBACK_DAYS`].
pub fn default_start(today: NaiveDate) -> NaiveDate {
    today - Duration::days(DEFAULT_LOOKBACK_DAYS)
}

fn parse_date(flag: &'static str, value: &str) -> Result<NaiveDate, ResolveError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| ResolveError::InvalidDate {
        flag,
        value: value.to_string(),
    })
}
