#![no_main]
//! Arbitrary tool stdout must never panic the report parser, and every
//! recognised field must survive into the derived metrics without producing
//! non-finite ratios.

use huffcheck::oracle::{parse_report, DerivedMetrics};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let report = parse_report(&text);
    let metrics = DerivedMetrics::from_report(&report);
    if let Some(ratio) = metrics.ratio {
        assert!(ratio.is_finite() && ratio > 0.0);
    }
    let _ = report.is_empty();
});
