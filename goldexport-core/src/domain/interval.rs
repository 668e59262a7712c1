//! Bar sampling interval.

use std::fmt;

/// Sampling period of the exported bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Interval {
    #[default]
    Hourly,
    Daily,
    Weekly,
}

impl Interval {
    /// User-facing name (`hourly`, `daily`, `weekly`).
    pub fn as_str(self) -> &'static str {
        match self {
            Interval::Hourly => "hourly",
            Interval::Daily => "daily",
            Interval::Weekly => "weekly",
        }
    }

    /// Token in the market-data provider's interval vocabulary.
    pub fn provider_token(self) -> &'static str {
        match self {
            Interval::Hourly => "1h",
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
        }
    }

    /// Timeframe accepted by the backtest upload endpoint, if any.
    ///
    /// The endpoint takes `1h`, `4h` and `1d`; weekly bars have no counterpart.
    pub fn upload_timeframe(self) -> Option<&'static str> {
        match self {
            Interval::Hourly => Some("1h"),
            Interval::Daily => Some("1d"),
            Interval::Weekly => None,
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
