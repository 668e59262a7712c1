//! Export pipeline: fetch → normalize → write.

use super::export::{write_csv, ExportError, ExportSummary};
use super::normalize::{Normalized, Normalizer};
use super::provider::{DataProvider, RawBar};
use crate::config::GOLD_FUTURES_SYMBOL;
use crate::domain::ExportRequest;
use crate::report::ExportProgress;
use tracing::{debug, info, warn};

/// Run one export of [`GOLD_FUTURES_SYMBOL`] for `request`.
///
/// Any failure aborts the run. The output file is only opened after the
/// provider returned rows, so a failed or empty fetch never touches it. If
/// every row is incomplete the file is written with the header only.
pub fn run_export(
    provider: &dyn DataProvider,
    request: &ExportRequest,
    progress: &dyn ExportProgress,
) -> Result<ExportSummary, ExportError> {
    progress.on_fetch_start(GOLD_FUTURES_SYMBOL, request);

    let raw = fetch_bars(provider, GOLD_FUTURES_SYMBOL, request)?;
    let Normalized { bars, dropped } = Normalizer::normalize(&raw);
    if bars.is_empty() {
        warn!(raw_rows = raw.len(), "every row had missing fields; writing header only");
    } else if dropped > 0 {
        debug!(dropped, kept = bars.len(), "dropped incomplete rows");
    }

    let summary = ExportSummary::from_bars(&bars, request);

    write_csv(&bars, &request.output_path)?;
    info!(
        rows = summary.rows,
        path = %request.output_path.display(),
        "export written"
    );

    progress.on_complete(&summary);
    Ok(summary)
}

/// Single provider query; an empty answer is an error.
pub fn fetch_bars(
    provider: &dyn DataProvider,
    symbol: &str,
    request: &ExportRequest,
) -> Result<Vec<RawBar>, ExportError> {
    debug!(
        provider = provider.name(),
        symbol,
        interval = %request.interval,
        "fetching bars"
    );
    let raw = provider.fetch(
        symbol,
        request.start_date,
        request.end_date,
        request.interval,
    )?;

    if raw.is_empty() {
        return Err(ExportError::NoData {
            symbol: symbol.to_string(),
            period: request.period_label(),
            interval: request.interval,
        });
    }
    Ok(raw)
}
