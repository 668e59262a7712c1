//! Human-readable run reporting and the follow-up upload hint.

use crate::config::ExportConfig;
use crate::data::export::ExportSummary;
use crate::domain::ExportRequest;

/// Row limit enforced by the backtest API's upload endpoint.
pub const MAX_UPLOAD_ROWS: usize = 100_000;

/// Callbacks for the stages of one export run.
pub trait ExportProgress {
    /// Called before the provider request goes out.
    fn on_fetch_start(&self, symbol: &str, request: &ExportRequest);

    /// Called after the CSV has been written.
    fn on_complete(&self, summary: &ExportSummary);
}

/// Everything needed to print the `curl` command for the upload endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadHint {
    pub url: String,
    pub api_key: String,
    pub symbol: String,
}

impl UploadHint {
    pub fn from_config(config: &ExportConfig) -> Self {
        Self {
            url: config.upload_url.clone(),
            api_key: config.upload_api_key.clone(),
            symbol: config.upload_symbol.clone(),
        }
    }

    /// Multi-line shell command uploading the exported file.
    ///
    /// The `timeframe` field is omitted for intervals the endpoint has no
    /// timeframe for; see [`upload_warnings`].
    pub fn command(&self, summary: &ExportSummary) -> String {
        let mut lines = vec![
            format!("curl -X POST {}", self.url),
            format!("-H \"X-API-Key: {}\"", self.api_key),
            format!("-F \"file=@{}\"", summary.output_path.display()),
            format!("-F \"symbol={}\"", self.symbol),
        ];
        if let Some(tf) = summary.interval.upload_timeframe() {
            lines.push(format!("-F \"timeframe={tf}\""));
        }
        lines.join(" \\\n     ")
    }
}

/// Reasons the upload endpoint would reject this file as written.
pub fn upload_warnings(summary: &ExportSummary) -> Vec<String> {
    let mut warnings = Vec::new();
    if summary.rows > MAX_UPLOAD_ROWS {
        warnings.push(format!(
            "{} bars exceeds the upload limit of {MAX_UPLOAD_ROWS} rows; split the file before uploading",
            summary.rows
        ));
    }
    if summary.interval.upload_timeframe().is_none() {
        warnings.push(format!(
            "the upload endpoint accepts 1h, 4h and 1d timeframes; {} bars will be rejected",
            summary.interval
        ));
    }
    warnings
}

/// Reporter that prints status lines to stdout.
pub struct StdoutProgress {
    hint: UploadHint,
}

impl StdoutProgress {
    pub fn new(hint: UploadHint) -> Self {
        Self { hint }
    }
}

impl ExportProgress for StdoutProgress {
    fn on_fetch_start(&self, symbol: &str, request: &ExportRequest) {
        println!("📊 Downloading Gold ({symbol}) data from Yahoo Finance...");
        println!("   Period: {}", request.period_label());
        println!("   Interval: {}", request.interval);
    }

    fn on_complete(&self, summary: &ExportSummary) {
        println!("✅ Success!");
        println!("   Bars downloaded: {}", summary.rows);
        println!("   Date range: {}", summary.range_label());
        println!("   Output file: {}", summary.output_path.display());
        for warning in upload_warnings(summary) {
            println!("⚠️  {warning}");
        }
        println!("\n📤 Upload to API with:");
        println!("   {}", self.hint.command(summary));
    }
}
