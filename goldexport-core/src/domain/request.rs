//! ExportRequest — the resolved parameters of one export run.

use super::Interval;
use chrono::NaiveDate;
use std::path::PathBuf;

/// Fully resolved export parameters. Built once per invocation by
/// [`crate::resolve::resolve`] and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub output_path: PathBuf,
    pub interval: Interval,
}

impl ExportRequest {
    /// `start to end` label used in status output.
    pub fn period_label(&self) -> String {
        format!("{} to {}", self.start_date, self.end_date)
    }
}
