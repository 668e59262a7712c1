//! Runtime configuration: compiled-in defaults with environment overrides.

/// Yahoo Finance ticker for COMEX Gold futures (front month).
pub const GOLD_FUTURES_SYMBOL: &str = "GC=F";

pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";
pub const DEFAULT_UPLOAD_URL: &str = "http://localhost:5000/api/market-data/upload";
pub const DEFAULT_UPLOAD_API_KEY: &str = "dev_key_12345";
pub const DEFAULT_UPLOAD_SYMBOL: &str = "GC";

pub const ENV_YAHOO_URL: &str = "GOLDEXPORT_YAHOO_URL";
pub const ENV_UPLOAD_URL: &str = "GOLDEXPORT_UPLOAD_URL";
pub const ENV_API_KEY: &str = "GOLDEXPORT_API_KEY";

/// Settings that are not exposed as CLI flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportConfig {
    /// Base URL of the chart API (scheme + host, no trailing path).
    pub yahoo_base_url: String,
    pub user_agent: String,
    /// Upload endpoint shown in the follow-up command. Never called.
    pub upload_url: String,
    pub upload_api_key: String,
    /// Symbol the backtest API stores the bars under.
    pub upload_symbol: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            upload_url: DEFAULT_UPLOAD_URL.to_string(),
            upload_api_key: DEFAULT_UPLOAD_API_KEY.to_string(),
            upload_symbol: DEFAULT_UPLOAD_SYMBOL.to_string(),
        }
    }
}

impl ExportConfig {
    /// Defaults overridden by `GOLDEXPORT_*` environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns. Empty values are ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_YAHOO_URL) {
            config.yahoo_base_url = url;
        }
        if let Some(url) = get(ENV_UPLOAD_URL) {
            config.upload_url = url;
        }
        if let Some(key) = get(ENV_API_KEY) {
            config.upload_api_key = key;
        }
        config
    }
}
