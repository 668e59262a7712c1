//! Gold Export CLI — download Gold futures bars into a backtest-ready CSV.
//!
//! Fetches `GC=F` bars from Yahoo Finance for a date range (default: the last
//! 730 days, hourly), normalizes them to `timestamp,open,high,low,close,volume`
//! and writes the CSV, then prints the command to upload it to the backtest API.

use anyhow::Result;
use clap::{Parser, ValueEnum};
use goldexport_core::{
    resolve, run_export, ExportArgs, ExportConfig, Interval, StdoutProgress, UploadHint,
    YahooProvider,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLES: &str = "\
Examples:
  # Download last 2 years of hourly bars
  goldexport

  # Specify date range
  goldexport --start 2024-01-01 --end 2025-12-31

  # Custom output file
  goldexport --output my_gold_data.csv

  # Daily data instead of hourly
  goldexport --interval daily";

#[derive(Parser, Debug)]
#[command(
    name = "goldexport",
    about = "Download Gold futures (GC=F) bars for backtesting",
    after_help = EXAMPLES
)]
struct Cli {
    /// Start date (YYYY-MM-DD). Defaults to 730 days ago.
    #[arg(long)]
    start: Option<String>,

    /// End date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    end: Option<String>,

    /// Output CSV path.
    #[arg(long, default_value = goldexport_core::resolve::DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Bar interval.
    #[arg(long, value_enum, default_value_t = IntervalArg::Hourly)]
    interval: IntervalArg,
}

/// `--interval` values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum IntervalArg {
    Hourly,
    Daily,
    Weekly,
}

impl From<IntervalArg> for Interval {
    fn from(arg: IntervalArg) -> Self {
        match arg {
            IntervalArg::Hourly => Interval::Hourly,
            IntervalArg::Daily => Interval::Daily,
            IntervalArg::Weekly => Interval::Weekly,
        }
    }
}

impl Cli {
    fn into_args(self) -> ExportArgs {
        ExportArgs {
            start: self.start,
            end: self.end,
            output: Some(self.output),
            interval: Some(self.interval.into()),
        }
    }
}

fn main() {
    // Usage errors exit here, before any network access.
    let cli = Cli::parse();
    init_tracing();

    if let Err(e) = run(cli) {
        eprintln!("❌ ERROR: {e}");
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr; `RUST_LOG` overrides the default `warn` filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config = ExportConfig::from_env();
    let request = resolve(cli.into_args(), chrono::Local::now().date_naive())?;
    tracing::debug!(?request, "resolved export request");

    let provider = YahooProvider::new(&config)?;
    let progress = StdoutProgress::new(UploadHint::from_config(&config));

    run_export(&provider, &request, &progress)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("goldexport").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_when_no_flags() {
        let args = parse(&[]).unwrap().into_args();
        assert_eq!(args.start, None);
        assert_eq!(args.end, None);
        assert_eq!(args.output, Some(PathBuf::from("GOLD_1H.csv")));
        assert_eq!(args.interval, Some(Interval::Hourly));
    }

    #[test]
    fn all_flags_are_passed_through() {
        let args = parse(&[
            "--start",
            "2024-01-01",
            "--end",
            "2025-12-31",
            "--output",
            "gold_daily.csv",
            "--interval",
            "daily",
        ])
        .unwrap()
        .into_args();
        assert_eq!(args.start.as_deref(), Some("2024-01-01"));
        assert_eq!(args.end.as_deref(), Some("2025-12-31"));
        assert_eq!(args.output, Some(PathBuf::from("gold_daily.csv")));
        assert_eq!(args.interval, Some(Interval::Daily));
    }

    #[test]
    fn provider_tokens_are_usage_errors() {
        for token in ["1wk", "1h", "1d"] {
            let err = parse(&["--interval", token]).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidValue, "{token}");
        }
    }

    #[test]
    fn interval_names_are_accepted() {
        for (name, expected) in [
            ("hourly", IntervalArg::Hourly),
            ("daily", IntervalArg::Daily),
            ("weekly", IntervalArg::Weekly),
        ] {
            assert_eq!(parse(&["--interval", name]).unwrap().interval, expected);
        }
    }

    #[test]
    fn unknown_interval_is_a_usage_error() {
        let err = parse(&["--interval", "weird"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = parse(&["--symbol", "SI=F"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnknownArgument);
    }

    #[test]
    fn help_is_not_a_failure() {
        let err = parse(&["--help"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
        assert_eq!(err.exit_code(), 0);
    }

    #[test]
    fn malformed_date_fails_before_network() {
        let cli = parse(&["--start", "2024/01/01"]).unwrap();
        let err = resolve(cli.into_args(), chrono::NaiveDate::from_ymd_opt(2026, 1, 10).unwrap())
            .unwrap_err();
        assert!(err.to_string().contains("--start"));
    }
}
