//! Bar — the canonical row written to the export CSV.

use chrono::NaiveDateTime;

/// Column names of the canonical schema, in output order.
pub const CANONICAL_COLUMNS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// Textual timestamp form: ISO 8601, second precision, literal UTC designator.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Fully populated OHLCV bar for the exported instrument.
///
/// Every field is present by construction; rows with gaps never become a `Bar`
/// (see [`crate::data::normalize::Normalizer`]).
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Timestamp rendered as `YYYY-MM-DDTHH:MM:SSZ`.
    pub fn timestamp_string(&self) -> String {
        format_timestamp(&self.timestamp)
    }

    /// The six canonical fields as CSV text, in [`CANONICAL_COLUMNS`] order.
    pub fn to_record(&self) -> [String; 6] {
        [
            self.timestamp_string(),
            format_price(self.open),
            format_price(self.high),
            format_price(self.low),
            format_price(self.close),
            self.volume.to_string(),
        ]
    }
}

/// Format a datetime with [`TIMESTAMP_FORMAT`]. No timezone conversion is applied.
pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

/// Shortest round-trip decimal text, keeping one fractional digit on whole numbers
/// (`2052.0`, not `2052`).
pub fn format_price(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}
