//! Metrics derived from a [`TrialReport`].
//!
//! Every metric is `None` unless all of its inputs are present and non-zero,
//! so no division by zero can reach the display code.

use super::report::TrialReport;

/// Bytes per MiB, the throughput unit.
pub const BYTES_PER_MB: f64 = 1_048_576.0;

/// Figures computed from one report.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DerivedMetrics {
    /// original / compressed.
    pub ratio: Option<f64>,
    /// (1 - compressed / original) × 100.
    pub space_saving_pct: Option<f64>,
    /// MiB/s over the compression phase.
    pub compression_mb_s: Option<f64>,
    /// MiB/s over the decompression phase.
    pub decompression_mb_s: Option<f64>,
}

fn nonzero_u64(v: Option<u64>) -> Option<u64> {
    v.filter(|&n| n > 0)
}

fn positive_f64(v: Option<f64>) -> Option<f64> {
    v.filter(|&x| x > 0.0 && x.is_finite())
}

/// original / compressed.
pub fn compression_ratio(original: Option<u64>, compressed: Option<u64>) -> Option<f64> {
    let (o, c) = (nonzero_u64(original)?, nonzero_u64(compressed)?);
    Some(o as f64 / c as f64)
}

/// (1 - compressed / original) × 100. Negative when the tool expanded the input.
pub fn space_saving_pct(original: Option<u64>, compressed: Option<u64>) -> Option<f64> {
    let (o, c) = (nonzero_u64(original)?, nonzero_u64(compressed)?);
    Some((1.0 - c as f64 / o as f64) * 100.0)
}

/// (original / 1 MiB) / seconds.
pub fn throughput_mb_s(original: Option<u64>, seconds: Option<f64>) -> Option<f64> {
    let (o, t) = (nonzero_u64(original)?, positive_f64(seconds)?);
    Some((o as f64 / BYTES_PER_MB) / t)
}

impl DerivedMetrics {
    pub fn from_report(report: &TrialReport) -> Self {
        DerivedMetrics {
            ratio: compression_ratio(report.original_size, report.compressed_size),
            space_saving_pct: space_saving_pct(report.original_size, report.compressed_size),
            compression_mb_s: throughput_mb_s(
                report.original_size,
                report.compression_time_seconds,
            ),
            decompression_mb_s: throughput_mb_s(
                report.original_size,
                report.decompression_time_seconds,
            ),
        }
    }

    /// Returns `true` when the tool reported a compressed size larger than
    /// the input. Flagged in the output, never a failure.
    pub fn expanded(&self) -> bool {
        self.ratio.is_some_and(|r| r < 1.0)
    }
}
