//! Domain types for the gold exporter

pub mod bar;
pub mod interval;
pub mod request;

pub use bar::{format_price, format_timestamp, Bar, CANONICAL_COLUMNS, TIMESTAMP_FORMAT};
pub use interval::Interval;
pub use request::ExportRequest;
