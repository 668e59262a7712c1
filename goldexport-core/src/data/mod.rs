//! Provider access, normalization and CSV export

pub mod export;
pub mod normalize;
pub mod pipeline;
pub mod provider;
pub mod yahoo;

pub use export::{write_bars, write_csv, ExportError, ExportSummary};
pub use normalize::{Normalized, Normalizer};
pub use pipeline::{fetch_bars, run_export};
pub use provider::{DataError, DataProvider, RawBar};
pub use yahoo::YahooProvider;
