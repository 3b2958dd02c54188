//! The tool's textual report, as a typed contract.
//!
//! The tool under test prints a handful of `Label: <number> [unit]` lines on
//! stdout. [`parse_report`] maps them onto a closed set of [`ReportField`]s
//! and ignores every other line, so extra diagnostics from the tool never
//! disturb parsing.
//!
//! `Time Taken:` is positional: the first occurrence is the compression
//! phase, the second the decompression phase, any further ones are dropped.
//!
//! A field that is absent or whose value does not parse is simply left
//! unset. Whether that matters is decided by a [`ReportPolicy`], and even a
//! required field that is missing only degrades reporting; it never fails a
//! fixture on its own.

use std::fmt;

/// Prefix of the original-size line.
pub const LABEL_ORIGINAL_SIZE: &str = "Original Size:";
/// Prefix of the compressed-size line.
pub const LABEL_COMPRESSED_SIZE: &str = "Compressed Size:";
/// Prefix of the entropy line.
pub const LABEL_ENTROPY: &str = "Entropy:";
/// Prefix of both timing lines.
pub const LABEL_TIME_TAKEN: &str = "Time Taken:";

/// Every value the report can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportField {
    OriginalSize,
    CompressedSize,
    Entropy,
    /// First `Time Taken:` line.
    CompressionTime,
    /// Second `Time Taken:` line.
    DecompressionTime,
}

impl ReportField {
    pub const ALL: [ReportField; 5] = [
        ReportField::OriginalSize,
        ReportField::CompressedSize,
        ReportField::Entropy,
        ReportField::CompressionTime,
        ReportField::DecompressionTime,
    ];

    /// The line prefix this field is read from.
    pub fn label(self) -> &'static str {
        match self {
            ReportField::OriginalSize => LABEL_ORIGINAL_SIZE,
            ReportField::CompressedSize => LABEL_COMPRESSED_SIZE,
            ReportField::Entropy => LABEL_ENTROPY,
            ReportField::CompressionTime | ReportField::DecompressionTime => LABEL_TIME_TAKEN,
        }
    }
}

impl fmt::Display for ReportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReportField::OriginalSize => "original size",
            ReportField::CompressedSize => "compressed size",
            ReportField::Entropy => "entropy",
            ReportField::CompressionTime => "compression time",
            ReportField::DecompressionTime => "decompression time",
        };
        f.write_str(name)
    }
}

/// A typed report value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReportValue {
    Bytes(u64),
    BitsPerSymbol(f64),
    Seconds(f64),
}

/// Metrics parsed from one invocation of the tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrialReport {
    pub original_size: Option<u64>,
    pub compressed_size: Option<u64>,
    pub entropy_bits_per_symbol: Option<f64>,
    pub compression_time_seconds: Option<f64>,
    pub decompression_time_seconds: Option<f64>,
    /// Process exit code; `None` when the tool never ran or was killed by a signal.
    pub exit_code: Option<i32>,
}

impl TrialReport {
    /// Look up one field.
    pub fn get(&self, field: ReportField) -> Option<ReportValue> {
        match field {
            ReportField::OriginalSize => self.original_size.map(ReportValue::Bytes),
            ReportField::CompressedSize => self.compressed_size.map(ReportValue::Bytes),
            ReportField::Entropy => self.entropy_bits_per_symbol.map(ReportValue::BitsPerSymbol),
            ReportField::CompressionTime => self.compression_time_seconds.map(ReportValue::Seconds),
            ReportField::DecompressionTime => {
                self.decompression_time_seconds.map(ReportValue::Seconds)
            }
        }
    }

    /// Returns `true` if no report field was recognised.
    pub fn is_empty(&self) -> bool {
        ReportField::ALL.iter().all(|&f| self.get(f).is_none())
    }
}

/// Which report fields a run expects the tool to emit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportPolicy {
    required: Vec<ReportField>,
}

impl ReportPolicy {
    /// Every field optional.
    pub fn lenient() -> Self {
        ReportPolicy::default()
    }

    /// Both sizes and both timings required; entropy stays optional.
    pub fn strict() -> Self {
        ReportPolicy {
            required: vec![
                ReportField::OriginalSize,
                ReportField::CompressedSize,
                ReportField::CompressionTime,
                ReportField::DecompressionTime,
            ],
        }
    }

    /// A policy requiring exactly `fields`.
    pub fn requiring(fields: &[ReportField]) -> Self {
        ReportPolicy {
            required: fields.to_vec(),
        }
    }

    pub fn is_required(&self, field: ReportField) -> bool {
        self.required.contains(&field)
    }

    /// Required fields absent from `report`, in policy order.
    pub fn missing(&self, report: &TrialReport) -> Vec<ReportField> {
        self.required
            .iter()
            .copied()
            .filter(|&f| report.get(f).is_none())
            .collect()
    }
}

/// First whitespace-separated token after `label`, if the line starts with it.
fn value_after<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    line.strip_prefix(label)?.split_whitespace().next()
}

/// Parse the tool's stdout into a [`TrialReport`].
///
/// Lines are trimmed before matching. A repeated size or entropy line
/// overwrites the earlier value.
pub fn parse_report(stdout: &str) -> TrialReport {
    let mut report = TrialReport::default();
    let mut times_seen = 0usize;

    for line in stdout.lines().map(str::trim) {
        if let Some(v) = value_after(line, LABEL_ORIGINAL_SIZE) {
            if let Ok(n) = v.parse() {
                report.original_size = Some(n);
            }
        } else if let Some(v) = value_after(line, LABEL_COMPRESSED_SIZE) {
            if let Ok(n) = v.parse() {
                report.compressed_size = Some(n);
            }
        } else if let Some(v) = value_after(line, LABEL_ENTROPY) {
            if let Ok(x) = v.parse() {
                report.entropy_bits_per_symbol = Some(x);
            }
        } else if line.starts_with(LABEL_TIME_TAKEN) {
            // The slot is consumed even when the value is garbage, so a bad
            // compression time never shifts into the decompression slot.
            let value = value_after(line, LABEL_TIME_TAKEN).and_then(|v| v.parse::<f64>().ok());
            match times_seen {
                0 => report.compression_time_seconds = value,
                1 => report.decompression_time_seconds = value,
                _ => {}
            }
            times_seen += 1;
        }
    }
    report
}
