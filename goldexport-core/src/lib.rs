//! Gold Export Core — fetch Gold futures bars and write them as backtest-ready CSV.
//!
//! The crate is a straight pipeline:
//! - Argument resolution with a trailing 730-day default window
//! - One provider query (Yahoo Finance chart API behind the `DataProvider` trait)
//! - Normalization to the six-column canonical schema, dropping incomplete rows
//! - CSV export plus a human-readable summary and upload hint

pub mod config;
pub mod data;
pub mod domain;
pub mod report;
pub mod resolve;

pub use config::{ExportConfig, GOLD_FUTURES_SYMBOL};
pub use data::{run_export, DataError, DataProvider, ExportError, ExportSummary, YahooProvider};
pub use domain::{Bar, ExportRequest, Interval};
pub use report::{ExportProgress, StdoutProgress, UploadHint};
pub use resolve::{resolve, ExportArgs, ResolveError};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the types handed across the CLI boundary are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Bar>();
        require_sync::<domain::Bar>();
        require_send::<domain::ExportRequest>();
        require_sync::<domain::ExportRequest>();
        require_send::<data::RawBar>();
        require_sync::<data::RawBar>();
        require_send::<data::ExportSummary>();
        require_sync::<data::ExportSummary>();
        require_send::<data::ExportError>();
        require_sync::<data::ExportError>();
        require_send::<data::YahooProvider>();
        require_sync::<data::YahooProvider>();
        require_send::<config::ExportConfig>();
        require_sync::<config::ExportConfig>();
    }

    /// The provider seam takes only what the query needs: symbol, range, interval.
    #[test]
    fn provider_trait_is_object_safe() {
        fn _check_trait_object_builds(
            provider: &dyn DataProvider,
            request: &ExportRequest,
        ) -> Result<Vec<data::RawBar>, DataError> {
            provider.fetch(
                GOLD_FUTURES_SYMBOL,
                request.start_date,
                request.end_date,
                request.interval,
            )
        }
    }
}
