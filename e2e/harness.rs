// e2e/harness.rs: end-to-end oracle scenarios
//
// Generates fixtures with the library, runs them through fake shell-script
// tools and checks the per-fixture outcome and the batch summary.

#![cfg(unix)]

#[path = "../tests/support/fake_tool.rs"]
mod fake_tool;

use std::fs;
use std::time::Duration;

use fake_tool::{harness_in, CORRUPTING, FAILING, HANGING, PICKY, ROUND_TRIP, SHRINKING, SILENT};
use huffcheck::config::SINGLE_SYMBOL_LEN;
use huffcheck::corpus::generate_corpus;
use huffcheck::oracle::{collect_fixtures, run_batch, run_fixture, TrialFailure, TrialOutcome};
use huffcheck::CorpusConfig;
use tempfile::TempDir;

fn failure(outcome: &TrialOutcome) -> &TrialFailure {
    match outcome {
        TrialOutcome::Failed(f) => f,
        TrialOutcome::Passed => panic!("expected a failure, got a pass"),
    }
}

// ── Canonical scenarios ───────────────────────────────────────────────────────

#[test]
fn single_symbol_fixture_passes() {
    let root = TempDir::new().unwrap();
    let (config, _tool) = harness_in(root.path(), ROUND_TRIP);
    let fixture = config.fixtures_dir.join("single_char.txt");
    fs::write(&fixture, "A".repeat(1000)).unwrap();
    fs::create_dir_all(&config.outputs_dir).unwrap();

    let result = run_fixture(&config, &fixture);
    assert!(result.outcome.is_passed(), "{:?}", result.outcome);
    assert_eq!(result.report.original_size, Some(SINGLE_SYMBOL_LEN));
    assert_eq!(result.report.compression_time_seconds, Some(0.001));
    assert_eq!(result.report.decompression_time_seconds, Some(0.0005));
    assert!(result.wall_time.is_some());
}

#[test]
fn empty_fixture_passes_with_empty_decoded_file() {
    let root = TempDir::new().unwrap();
    let (config, _tool) = harness_in(root.path(), ROUND_TRIP);
    let fixture = config.fixtures_dir.join("empty.txt");
    fs::write(&fixture, b"").unwrap();
    fs::create_dir_all(&config.outputs_dir).unwrap();

    let result = run_fixture(&config, &fixture);
    assert!(result.outcome.is_passed(), "{:?}", result.outcome);
    assert_eq!(result.report.original_size, Some(0));
    let decoded = config.decoded_path(&fixture);
    assert_eq!(fs::metadata(decoded).unwrap().len(), 0);
    // Zero-length inputs have no defined ratio or throughput.
    assert_eq!(result.metrics.ratio, None);
}

#[test]
fn alternating_pattern_passes_and_shrinks() {
    let root = TempDir::new().unwrap();
    let (config, _tool) = harness_in(root.path(), SHRINKING);
    let fixture = config.fixtures_dir.join("binary_pattern.bin");
    let pattern: Vec<u8> = (0..1_048_576usize)
        .map(|i| if i % 2 == 0 { 0x00 } else { 0xFF })
        .collect();
    fs::write(&fixture, &pattern).unwrap();
    fs::create_dir_all(&config.outputs_dir).unwrap();

    let result = run_fixture(&config, &fixture);
    assert!(result.outcome.is_passed(), "{:?}", result.outcome);
    let original = result.report.original_size.unwrap();
    let compressed = result.report.compressed_size.unwrap();
    assert_eq!(original, 1_048_576);
    assert!(compressed < original);
    assert_eq!(result.metrics.ratio, Some(8.0));
    assert!(!result.metrics.expanded());
}

// ── Failure paths ─────────────────────────────────────────────────────────────

#[test]
fn corrupted_output_is_a_mismatch() {
    let root = TempDir::new().unwrap();
    let (config, _tool) = harness_in(root.path(), CORRUPTING);
    let fixture = config.fixtures_dir.join("f.txt");
    fs::write(&fixture, b"abcdef").unwrap();
    fs::create_dir_all(&config.outputs_dir).unwrap();

    let result = run_fixture(&config, &fixture);
    match failure(&result.outcome) {
        TrialFailure::Mismatch {
            first_difference,
            original,
            decoded,
        } => {
            assert_eq!(*first_difference, 6);
            assert_eq!(original.len, 6);
            assert_eq!(decoded.len, 7);
        }
        other => panic!("unexpected failure: {other}"),
    }
}

#[test]
fn non_zero_exit_fails_with_stderr() {
    let root = TempDir::new().unwrap();
    let (config, _tool) = harness_in(root.path(), FAILING);
    let fixture = config.fixtures_dir.join("f.txt");
    fs::write(&fixture, b"abc").unwrap();
    fs::create_dir_all(&config.outputs_dir).unwrap();

    let result = run_fixture(&config, &fixture);
    let f = failure(&result.outcome);
    assert!(matches!(f, TrialFailure::NonZeroExit { code: Some(2), .. }), "{f}");
    assert_eq!(f.stderr().map(str::trim), Some("huff: cannot build tree"));
    assert_eq!(result.report.exit_code, Some(2));
}

#[test]
fn missing_decoded_file_fails_verification() {
    let root = TempDir::new().unwrap();
    let (config, _tool) = harness_in(root.path(), SILENT);
    let fixture = config.fixtures_dir.join("f.txt");
    fs::write(&fixture, b"abc").unwrap();
    fs::create_dir_all(&config.outputs_dir).unwrap();

    let result = run_fixture(&config, &fixture);
    assert!(matches!(failure(&result.outcome), TrialFailure::Verify(_)));
}

#[test]
fn stale_decoded_file_cannot_satisfy_verification() {
    let root = TempDir::new().unwrap();
    let (config, _tool) = harness_in(root.path(), SILENT);
    let fixture = config.fixtures_dir.join("f.txt");
    fs::write(&fixture, b"abc").unwrap();
    fs::create_dir_all(&config.outputs_dir).unwrap();
    // A perfect decoded copy left over from an earlier run.
    fs::write(config.decoded_path(&fixture), b"abc").unwrap();

    let result = run_fixture(&config, &fixture);
    assert!(!result.outcome.is_passed());
}

#[test]
fn hung_tool_times_out() {
    let root = TempDir::new().unwrap();
    let (mut config, _tool) = harness_in(root.path(), HANGING);
    config.set_timeout(Some(Duration::from_millis(300)));
    let fixture = config.fixtures_dir.join("f.txt");
    fs::write(&fixture, b"abc").unwrap();
    fs::create_dir_all(&config.outputs_dir).unwrap();

    let result = run_fixture(&config, &fixture);
    assert!(matches!(failure(&result.outcome), TrialFailure::Timeout { .. }));
}

// ── Batch ─────────────────────────────────────────────────────────────────────

fn small_corpus(dir: &std::path::Path) {
    let mut cfg = CorpusConfig::default();
    cfg.set_fixtures_dir(dir)
        .set_seed(Some(3))
        .set_chunk_size(4096)
        .set_random_size(8192)
        .set_pattern_size(8192)
        .set_skewed_size(20_000);
    generate_corpus(&cfg).unwrap();
}

#[test]
fn generated_corpus_round_trips_through_batch() {
    let root = TempDir::new().unwrap();
    let (config, _tool) = harness_in(root.path(), ROUND_TRIP);
    small_corpus(&config.fixtures_dir);

    let summary = run_batch(&config).unwrap();
    assert_eq!(summary.total, 7);
    assert_eq!(summary.passed, 7);
    assert_eq!(summary.exit_code(), 0);
    assert!(config.outputs_dir.is_dir());
}

#[test]
fn batch_continues_past_a_failure() {
    let root = TempDir::new().unwrap();
    let (config, _tool) = harness_in(root.path(), PICKY);
    small_corpus(&config.fixtures_dir);

    let summary = run_batch(&config).unwrap();
    assert_eq!(summary.total, 7);
    assert_eq!(summary.passed, 6);
    assert_eq!(summary.exit_code(), 1);
    assert_eq!(summary.failed.len(), 1);
    assert!(summary.failed[0].ends_with("binary_random_1mb.bin"));
}

#[test]
fn residue_and_scripts_are_not_fixtures() {
    let root = TempDir::new().unwrap();
    let (config, _tool) = harness_in(root.path(), ROUND_TRIP);
    let dir = &config.fixtures_dir;
    fs::write(dir.join("b.txt"), b"b").unwrap();
    fs::write(dir.join("a.bin"), b"a").unwrap();
    fs::write(dir.join("generate_tests.py"), b"print()").unwrap();
    fs::write(dir.join("a.bin.huff"), b"").unwrap();
    fs::write(dir.join("a.bin.decoded"), b"a").unwrap();
    fs::create_dir_all(&config.outputs_dir).unwrap();

    let fixtures = collect_fixtures(&config).unwrap();
    let names: Vec<_> = fixtures
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a.bin", "b.txt"]);
}

#[test]
fn missing_fixtures_dir_is_a_batch_error() {
    let root = TempDir::new().unwrap();
    let (mut config, _tool) = harness_in(root.path(), ROUND_TRIP);
    config.set_fixtures_dir(root.path().join("nope"));
    assert!(run_batch(&config).is_err());
}

#[test]
fn dangling_symlink_does_not_stop_the_batch() {
    use std::os::unix::fs::symlink;
    let root = TempDir::new().unwrap();
    let (config, _tool) = harness_in(root.path(), ROUND_TRIP);
    fs::write(config.fixtures_dir.join("a.txt"), b"abc").unwrap();
    symlink("/nonexistent/target", config.fixtures_dir.join("dangling.txt")).unwrap();

    let summary = run_batch(&config).unwrap();
    assert_eq!((summary.passed, summary.total), (1, 1));
}
