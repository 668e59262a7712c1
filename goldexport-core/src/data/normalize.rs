//! Normalizer: provider rows → canonical bars.
//!
//! The provider's `Datetime/Open/High/Low/Close/Volume` map onto the canonical
//! `timestamp/open/high/low/close/volume`; every other provider column is
//! dropped. A row missing any canonical field is dropped whole, never imputed.

use super::provider::RawBar;
use crate::domain::Bar;

/// Outcome of a normalization pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Complete bars, in provider order.
    pub bars: Vec<Bar>,
    /// Rows discarded for missing fields.
    pub dropped: usize,
}

/// Normalizer for provider bar data
pub struct Normalizer;

impl Normalizer {
    /// Map every complete row to a [`Bar`], keeping provider order.
    pub fn normalize(raw: &[RawBar]) -> Normalized {
        let bars: Vec<Bar> = raw.iter().filter_map(Self::to_bar).collect();
        Normalized {
            dropped: raw.len() - bars.len(),
            bars,
        }
    }

    /// Canonical bar for one row, or `None` if any field is missing.
    /// NaN and infinite prices count as missing.
    pub fn to_bar(raw: &RawBar) -> Option<Bar> {
        Some(Bar {
            timestamp: raw.datetime?,
            open: finite(raw.open)?,
            high: finite(raw.high)?,
            low: finite(raw.low)?,
            close: finite(raw.close)?,
            volume: raw.volume?,
        })
    }
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}
