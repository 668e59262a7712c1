//! Yahoo Finance data provider.
//!
//! Fetches OHLCV bars from Yahoo's v8 chart API with a single request per
//! export. There is no retry and no backoff: any failure is returned to the
//! caller, which aborts the run.
//!
//! Yahoo Finance has no official API and is subject to unannounced format changes.

use super::provider::{DataError, DataProvider, RawBar};
use crate::config::ExportConfig;
use crate::domain::Interval;
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use tracing::{debug, warn};

/// Yahoo Finance v8 chart API response.
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    meta: Option<ChartMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    currency: Option<String>,
    exchange_timezone_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
    adjclose: Option<Vec<AdjCloseData>>,
}

/// Yahoo sends `"quote": [{}]` when a range has no bars, hence the defaults.
#[derive(Debug, Default, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<u64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Yahoo Finance data provider.
pub struct YahooProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl YahooProvider {
    /// Build a provider against the configured chart API host. The client's
    /// default timeout applies.
    pub fn new(config: &ExportConfig) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.yahoo_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Build the chart API URL for a symbol, date range and interval.
    ///
    /// Both dates are taken at midnight UTC, so `end` is exclusive.
    fn chart_url(
        base_url: &str,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> String {
        let start_ts = start.and_time(NaiveTime::MIN).and_utc().timestamp();
        let end_ts = end.and_time(NaiveTime::MIN).and_utc().timestamp();
        format!(
            "{base_url}/v8/finance/chart/{symbol}\
             ?period1={start_ts}&period2={end_ts}&interval={}\
             &includePrePost=false",
            interval.provider_token()
        )
    }

    fn chart_error(symbol: &str, err: ChartError) -> DataError {
        match err.code.as_str() {
            "Not Found" => DataError::SymbolNotFound {
                symbol: symbol.to_string(),
            },
            "Unprocessable Entity" | "Bad Request" => DataError::Rejected(err.description),
            _ => DataError::ResponseFormatChanged(format!("{}: {}", err.code, err.description)),
        }
    }

    /// Parse the chart API response into RawBars, one per timestamp.
    ///
    /// Rows with gaps are kept as-is; dropping them is the normalizer's job.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<RawBar>, DataError> {
        if let Some(err) = resp.chart.error {
            return Err(Self::chart_error(symbol, err));
        }

        let data = resp
            .chart
            .result
            .and_then(|r| r.into_iter().next())
            .ok_or_else(|| DataError::ResponseFormatChanged("result array is empty".into()))?;

        if let Some(meta) = &data.meta {
            debug!(
                symbol,
                currency = meta.currency.as_deref().unwrap_or("?"),
                exchange_tz = meta.exchange_timezone_name.as_deref().unwrap_or("?"),
                "chart metadata"
            );
        }

        // No timestamps at all means the range had no sessions.
        let Some(timestamps) = data.timestamp else {
            return Ok(Vec::new());
        };

        let quote = data.indicators.quote.into_iter().next().unwrap_or_default();
        if quote.close.len() != timestamps.len() {
            warn!(
                symbol,
                timestamps = timestamps.len(),
                closes = quote.close.len(),
                "quote arrays shorter than timestamp array"
            );
        }

        let adj_closes = data
            .indicators
            .adjclose
            .and_then(|v| v.into_iter().next())
            .map(|a| a.adjclose);

        timestamps
            .iter()
            .enumerate()
            .map(|(i, &ts)| {
                let datetime = chrono::DateTime::from_timestamp(ts, 0)
                    .map(|dt| dt.naive_utc())
                    .ok_or_else(|| {
                        DataError::ResponseFormatChanged(format!("invalid timestamp: {ts}"))
                    })?;

                Ok(RawBar {
                    datetime: Some(datetime),
                    open: quote.open.get(i).copied().flatten(),
                    high: quote.high.get(i).copied().flatten(),
                    low: quote.low.get(i).copied().flatten(),
                    close: quote.close.get(i).copied().flatten(),
                    volume: quote.volume.get(i).copied().flatten(),
                    adj_close: adj_closes
                        .as_ref()
                        .and_then(|v| v.get(i).copied().flatten()),
                })
            })
            .collect()
    }

    /// Execute the single HTTP request and map status codes to [`DataError`].
    fn request_chart(&self, symbol: &str, url: &str) -> Result<ChartResponse, DataError> {
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|e| DataError::NetworkUnreachable(e.to_string()))?;
        let status = resp.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(DataError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(DataError::AuthenticationRequired(format!(
                "Yahoo Finance answered HTTP {status}"
            )));
        }

        if !status.is_success() {
            // Unknown symbols and bad ranges come back with a chart error body.
            let body = resp.text().unwrap_or_default();
            if let Ok(ChartResponse {
                chart: ChartResult {
                    error: Some(err), ..
                },
            }) = serde_json::from_str::<ChartResponse>(&body)
            {
                return Err(Self::chart_error(symbol, err));
            }
            return Err(DataError::Other(format!("HTTP {status} for {symbol}")));
        }

        resp.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("failed to parse response for {symbol}: {e}"))
        })
    }
}

impl DataProvider for YahooProvider {
    fn name(&self) -> &str {
        "yahoo_finance"
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
        interval: Interval,
    ) -> Result<Vec<RawBar>, DataError> {
        let url = Self::chart_url(&self.base_url, symbol, start, end, interval);
        debug!(%url, "requesting chart");

        let chart = self.request_chart(symbol, &url)?;
        let bars = Self::parse_response(symbol, chart)?;
        debug!(symbol, rows = bars.len(), "chart parsed");
        Ok(bars)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    const GC_1H_FIXTURE: &str = include_str!("../../tests/fixtures/gc_1h_chart.json");

    fn parse(json: &str) -> Result<Vec<RawBar>, DataError> {
        let resp: ChartResponse = serde_json::from_str(json).unwrap();
        YahooProvider::parse_response("GC=F", resp)
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn chart_url_encodes_range_and_interval() {
        let url = YahooProvider::chart_url(
            "https://query2.finance.yahoo.com",
            "GC=F",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            Interval::Hourly,
        );
        assert_eq!(
            url,
            "https://query2.finance.yahoo.com/v8/finance/chart/GC=F\
             ?period1=1704067200&period2=1704153600&interval=1h&includePrePost=false"
        );
    }

    #[test]
    fn chart_url_uses_weekly_token() {
        let url = YahooProvider::chart_url(
            "http://localhost:9",
            "GC=F",
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            Interval::Weekly,
        );
        assert!(url.contains("interval=1wk"));
    }

    #[test]
    fn parses_fixture_rows_in_order() {
        let bars = parse(GC_1H_FIXTURE).unwrap();
        assert_eq!(bars.len(), 3);

        assert_eq!(bars[0].datetime, Some(at("2024-01-02 09:00:00")));
        assert_eq!(bars[0].open, Some(2050.1));
        assert_eq!(bars[0].high, Some(2052.0));
        assert_eq!(bars[0].low, Some(2049.5));
        assert_eq!(bars[0].close, Some(2051.3));
        assert_eq!(bars[0].volume, Some(1200));

        assert_eq!(bars[1].datetime, Some(at("2024-01-02 10:00:00")));
        assert_eq!(bars[2].datetime, Some(at("2024-01-02 11:00:00")));
    }

    #[test]
    fn keeps_gaps_for_the_normalizer() {
        let bars = parse(GC_1H_FIXTURE).unwrap();
        // Second hour has a null volume in the fixture.
        assert_eq!(bars[1].volume, None);
        assert_eq!(bars[1].close, Some(2052.4));
    }

    #[test]
    fn missing_timestamps_mean_no_rows() {
        let json = r#"{"chart":{"result":[{"meta":{"currency":"USD"},"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(parse(json).unwrap().is_empty());
    }

    #[test]
    fn not_found_maps_to_symbol_not_found() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        match parse(json) {
            Err(DataError::SymbolNotFound { symbol }) => assert_eq!(symbol, "GC=F"),
            other => panic!("expected SymbolNotFound, got {other:?}"),
        }
    }

    #[test]
    fn unprocessable_range_maps_to_rejected() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Unprocessable Entity","description":"1h data not available for startTime=1 and endTime=2. The requested range must be within the last 730 days."}}}"#;
        match parse(json) {
            Err(DataError::Rejected(msg)) => assert!(msg.contains("730 days")),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }

    #[test]
    fn empty_result_array_is_a_format_change() {
        let json = r#"{"chart":{"result":[],"error":null}}"#;
        assert!(matches!(
            parse(json),
            Err(DataError::ResponseFormatChanged(_))
        ));
    }

    #[test]
    fn new_trims_trailing_slash() {
        let config = ExportConfig {
            yahoo_base_url: "http://127.0.0.1:1/".into(),
            ..ExportConfig::default()
        };
        let provider = YahooProvider::new(&config).unwrap();
        assert_eq!(provider.base_url, "http://127.0.0.1:1");
        assert_eq!(provider.name(), "yahoo_finance");
    }
}
