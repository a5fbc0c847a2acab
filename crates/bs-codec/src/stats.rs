//! Compression statistics.

use serde::{Deserialize, Serialize};

/// Decimal places for [`CompressionStats::compression_ratio`].
pub const RATIO_PRECISION: u32 = 3;
/// Decimal places for [`CompressionStats::percentage_saved`].
pub const PERCENTAGE_PRECISION: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CompressionStats {
    pub original_length: usize,
    pub encoded_length: usize,
    /// `encoded / original`; smaller is better.
    pub compression_ratio: f64,
    /// Negative when the encoding is longer than the input.
    pub space_saved: i64,
    pub percentage_saved: f64,
}

/// Character-length statistics for an `original` → `encoded` pair.
pub fn compression_stats(original: &str, encoded: &str) -> CompressionStats {
    let original_length = original.chars().count();
    let encoded_length = encoded.chars().count();
    if original_length == 0 {
        return CompressionStats::default();
    }

    let space_saved = original_length as i64 - encoded_length as i64;
    CompressionStats {
        original_length,
        encoded_length,
        compression_ratio: round_to(encoded_length as f64 / original_length as f64, RATIO_PRECISION),
        space_saved,
        percentage_saved: round_to(space_saved as f64 / original_length as f64 * 100.0, PERCENTAGE_PRECISION),
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
