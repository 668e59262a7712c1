//! Data provider trait and structured error types.
//!
//! The DataProvider trait is the only seam to the upstream market-data source,
//! so the export pipeline can run against a deterministic fixture in tests.

use crate::domain::Interval;
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

/// One provider-native row, before normalization.
///
/// Any field may be missing: providers leave gaps for halted sessions and
/// often report no volume for futures. `adj_close` is a provider-only column
/// that never reaches the export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBar {
    pub datetime: Option<NaiveDateTime>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<u64>,
    pub adj_close: Option<f64>,
}

/// Structured error types for provider calls.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("provider rejected request: {0}")]
    Rejected(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Source of historical bars.
pub trait DataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch bars for `symbol` from `start` (inclusive) to `end` (exclusive)
    /// at the given interval, in provider order.
    ///
    /// An empty vector means the provider had nothing for the range; deciding
    /// whether that is fatal is up to the caller.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<RawBar>, DataError>;
}
