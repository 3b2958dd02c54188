// Integration tests for the report contract: parsing a realistic tool
// transcript, the completeness policy and the derived metrics.

use huffcheck::oracle::metrics::{compression_ratio, space_saving_pct, throughput_mb_s};
use huffcheck::oracle::{parse_report, DerivedMetrics, ReportField, ReportPolicy};

const TRANSCRIPT: &str = "\
Reading tests/text_lorem.txt
Building frequency table...
Original Size: 445000 bytes
Compressed Size: 237000 bytes
Entropy: 4.1732 bits/symbol
Encoding...
Time Taken: 0.004100 seconds
Decoding...
Time Taken: 0.003200 seconds
";

#[test]
fn transcript_with_progress_chatter() {
    let r = parse_report(TRANSCRIPT);
    assert_eq!(r.original_size, Some(445_000));
    assert_eq!(r.compressed_size, Some(237_000));
    assert_eq!(r.entropy_bits_per_symbol, Some(4.1732));
    assert_eq!(r.compression_time_seconds, Some(0.0041));
    assert_eq!(r.decompression_time_seconds, Some(0.0032));
    assert!(ReportPolicy::strict().missing(&r).is_empty());
}

#[test]
fn strict_policy_lists_what_is_missing() {
    let r = parse_report("Original Size: 10 bytes\nTime Taken: 0.1 seconds\n");
    assert_eq!(
        ReportPolicy::strict().missing(&r),
        vec![ReportField::CompressedSize, ReportField::DecompressionTime]
    );
    assert!(ReportPolicy::lenient().missing(&r).is_empty());
}

#[test]
fn custom_policy() {
    let policy = ReportPolicy::requiring(&[ReportField::Entropy]);
    assert!(policy.is_required(ReportField::Entropy));
    assert!(!policy.is_required(ReportField::OriginalSize));
    let r = parse_report("Entropy: nan-ish\n");
    assert_eq!(policy.missing(&r), vec![ReportField::Entropy]);
}

#[test]
fn empty_stdout_is_an_empty_report() {
    let r = parse_report("");
    assert!(r.is_empty());
    assert_eq!(DerivedMetrics::from_report(&r), DerivedMetrics::default());
}

#[test]
fn metrics_from_transcript() {
    let m = DerivedMetrics::from_report(&parse_report(TRANSCRIPT));
    let ratio = m.ratio.unwrap();
    assert!((ratio - 445_000.0 / 237_000.0).abs() < 1e-12);
    let saving = m.space_saving_pct.unwrap();
    assert!((saving - (1.0 - 237_000.0 / 445_000.0) * 100.0).abs() < 1e-9);
    let speed = m.compression_mb_s.unwrap();
    assert!((speed - (445_000.0 / 1_048_576.0) / 0.0041).abs() < 1e-9);
    assert!(!m.expanded());
}

#[test]
fn metrics_guard_against_zero() {
    assert_eq!(compression_ratio(Some(100), Some(0)), None);
    assert_eq!(compression_ratio(Some(0), Some(10)), None);
    assert_eq!(space_saving_pct(None, Some(10)), None);
    assert_eq!(throughput_mb_s(Some(1_048_576), Some(0.0)), None);
    assert_eq!(throughput_mb_s(Some(1_048_576), Some(2.0)), Some(0.5));
}
