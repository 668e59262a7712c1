//! CSV export of the canonical bar table.
//!
//! Header `timestamp,open,high,low,close,volume`, then one line per bar in
//! table order. The target file is created or truncated in place; a failure
//! partway through can leave a truncated file behind.

use super::provider::DataError;
use crate::domain::{format_timestamp, Bar, ExportRequest, Interval, CANONICAL_COLUMNS};
use chrono::NaiveDateTime;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can abort an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Fetch(#[from] DataError),

    #[error("no data downloaded for {symbol} ({period}, {interval}); check the date range or try again later")]
    NoData {
        symbol: String,
        period: String,
        interval: Interval,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write CSV to {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// What a finished export produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSummary {
    pub rows: usize,
    /// Earliest and latest timestamp written; `None` for a header-only file.
    pub range: Option<(NaiveDateTime, NaiveDateTime)>,
    pub output_path: PathBuf,
    pub interval: Interval,
}

impl ExportSummary {
    /// Summary for `bars` bound for `request.output_path`.
    ///
    /// The range is the minimum and maximum timestamp, independent of row order.
    pub fn from_bars(bars: &[Bar], request: &ExportRequest) -> Self {
        let first = bars.iter().map(|b| b.timestamp).min();
        let last = bars.iter().map(|b| b.timestamp).max();
        Self {
            rows: bars.len(),
            range: first.zip(last),
            output_path: request.output_path.clone(),
            interval: request.interval,
        }
    }

    /// `first to last` in the canonical timestamp format.
    pub fn range_label(&self) -> String {
        match &self.range {
            Some((first, last)) => {
                format!("{} to {}", format_timestamp(first), format_timestamp(last))
            }
            None => "none (no complete bars)".to_string(),
        }
    }
}

/// Write the header and all bars to any writer.
pub fn write_bars<W: io::Write>(bars: &[Bar], writer: W) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CANONICAL_COLUMNS)?;
    for bar in bars {
        wtr.write_record(bar.to_record())?;
    }
    wtr.flush()?;
    Ok(())
}

/// Create or overwrite `path` with the CSV rendering of `bars`.
pub fn write_csv(bars: &[Bar], path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    write_bars(bars, io::BufWriter::new(file)).map_err(|source| ExportError::Csv {
        path: path.to_path_buf(),
        source,
    })
}
