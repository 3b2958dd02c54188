//! Per-fixture trial and the sequential batch.
//!
//! Each fixture moves through Invoke → Parse → Verify → Passed/Failed with
//! no retries. A failed invocation skips straight to Failed. Parse never
//! fails. Any read error during Verify counts as a mismatch. Failures are
//! recorded per fixture and the batch always continues; only
//! [`RunSummary::exit_code`] reports overall success.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;

use super::invoke::{invoke_tool, InvokeError};
use super::metrics::DerivedMetrics;
use super::report::{parse_report, ReportField, TrialReport};
use super::verify::{verify_round_trip, Fingerprint, Verification, VerifyError};
use crate::config::HarnessConfig;
use crate::util::{group_thousands, list_fixtures, remove_if_exists};
use crate::{displaylevel, displayout};

/// Why a fixture failed.
#[derive(Debug, Error)]
pub enum TrialFailure {
    #[error(transparent)]
    Invoke(#[from] InvokeError),

    #[error("execution failed with {}", describe_exit(.code))]
    NonZeroExit { code: Option<i32>, stderr: String },

    #[error("timed out after {:.1} s", .after.as_secs_f64())]
    Timeout { after: Duration, stderr: String },

    #[error(
        "content mismatch at byte {first_difference} (original {} bytes xxh64 {:016x}, decoded {} bytes xxh64 {:016x})",
        .original.len, .original.xxh64, .decoded.len, .decoded.xxh64
    )]
    Mismatch {
        first_difference: u64,
        original: Fingerprint,
        decoded: Fingerprint,
    },

    #[error("error verifying files: {0}")]
    Verify(#[from] VerifyError),
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("exit status {c}"),
        None => "termination by signal".to_owned(),
    }
}

impl TrialFailure {
    /// Stderr captured from the tool, if the failure came with any.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            TrialFailure::NonZeroExit { stderr, .. } | TrialFailure::Timeout { stderr, .. } => {
                Some(stderr.as_str())
            }
            _ => None,
        }
    }
}

/// Terminal state of one trial.
#[derive(Debug)]
pub enum TrialOutcome {
    Passed,
    Failed(TrialFailure),
}

impl TrialOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, TrialOutcome::Passed)
    }
}

/// Everything known about one fixture after its trial.
#[derive(Debug)]
pub struct TrialResult {
    pub fixture: PathBuf,
    pub report: TrialReport,
    pub metrics: DerivedMetrics,
    /// Fields the policy requires but the tool did not emit.
    pub missing_fields: Vec<ReportField>,
    /// Harness-measured wall time of the invocation, when it ran.
    pub wall_time: Option<Duration>,
    pub outcome: TrialOutcome,
}

impl TrialResult {
    fn failed(fixture: &Path, report: TrialReport, failure: TrialFailure) -> Self {
        TrialResult {
            fixture: fixture.to_path_buf(),
            metrics: DerivedMetrics::from_report(&report),
            report,
            missing_fields: Vec::new(),
            wall_time: None,
            outcome: TrialOutcome::Failed(failure),
        }
    }
}

/// Run one fixture through the tool and check the round trip.
pub fn run_fixture(config: &HarnessConfig, fixture: &Path) -> TrialResult {
    let compressed = config.compressed_path(fixture);
    let decoded = config.decoded_path(fixture);

    // Residue from an earlier, interrupted run must not be able to satisfy
    // verification for a tool that exits 0 without writing anything.
    for stale in [&compressed, &decoded] {
        if let Err(e) = remove_if_exists(stale) {
            displaylevel!(2, "warning: cannot remove stale {}: {}\n", stale.display(), e);
        }
    }

    // ── Invoke ────────────────────────────────────────────────────────────
    let output = match invoke_tool(
        &config.tool,
        &config.tool_args,
        fixture,
        &compressed,
        &decoded,
        config.timeout,
    ) {
        Ok(out) => out,
        Err(e) => return TrialResult::failed(fixture, TrialReport::default(), e.into()),
    };

    // ── Parse ─────────────────────────────────────────────────────────────
    let mut report = parse_report(&output.stdout);
    report.exit_code = output.exit_code;

    if output.timed_out {
        let failure = TrialFailure::Timeout {
            after: output.elapsed,
            stderr: output.stderr,
        };
        return TrialResult::failed(fixture, report, failure);
    }
    if !output.success {
        let failure = TrialFailure::NonZeroExit {
            code: output.exit_code,
            stderr: output.stderr,
        };
        return TrialResult::failed(fixture, report, failure);
    }

    let missing_fields = config.policy.missing(&report);
    let metrics = DerivedMetrics::from_report(&report);

    // ── Verify ────────────────────────────────────────────────────────────
    let outcome = match verify_round_trip(fixture, &decoded) {
        Ok(Verification::Identical(_)) => TrialOutcome::Passed,
        Ok(Verification::Differs {
            first_difference,
            original,
            decoded,
        }) => TrialOutcome::Failed(TrialFailure::Mismatch {
            first_difference,
            original,
            decoded,
        }),
        Err(e) => TrialOutcome::Failed(e.into()),
    };

    TrialResult {
        fixture: fixture.to_path_buf(),
        report,
        metrics,
        missing_fields,
        wall_time: Some(output.elapsed),
        outcome,
    }
}

/// Aggregate pass/fail counts for a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub passed: usize,
    pub total: usize,
    /// Fixtures that failed, in run order.
    pub failed: Vec<PathBuf>,
}

impl RunSummary {
    pub fn record(&mut self, result: &TrialResult) {
        self.total += 1;
        if result.outcome.is_passed() {
            self.passed += 1;
        } else {
            self.failed.push(result.fixture.clone());
        }
    }

    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }

    /// 0 iff every fixture passed, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

/// Failures that stop the batch before any fixture runs.
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("cannot list fixtures in {}: {source}", .path.display())]
    ListFixtures {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create outputs directory {}: {source}", .path.display())]
    CreateOutputs {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Eligible fixtures in `config.fixtures_dir`, in run order.
pub fn collect_fixtures(config: &HarnessConfig) -> Result<Vec<PathBuf>, BatchError> {
    list_fixtures(&config.fixtures_dir, |name| config.is_excluded(name)).map_err(|source| {
        BatchError::ListFixtures {
            path: config.fixtures_dir.clone(),
            source,
        }
    })
}

/// Run every eligible fixture in order, printing each result and the summary.
pub fn run_batch(config: &HarnessConfig) -> Result<RunSummary, BatchError> {
    fs::create_dir_all(&config.outputs_dir).map_err(|source| BatchError::CreateOutputs {
        path: config.outputs_dir.clone(),
        source,
    })?;
    let fixtures = collect_fixtures(config)?;
    displaylevel!(3, "Found {} fixtures in {}\n", fixtures.len(), config.fixtures_dir.display());

    let mut summary = RunSummary::default();
    for fixture in &fixtures {
        displayout!("Testing {}...\n", fixture.display());
        let result = run_fixture(config, fixture);
        print_trial(&result);
        summary.record(&result);
    }
    print_summary(&summary);
    Ok(summary)
}

// ── Presentation ──────────────────────────────────────────────────────────────

/// Print the PASS/FAIL line and, for a pass, the available statistics.
pub fn print_trial(result: &TrialResult) {
    let name = result.fixture.display();
    let failure = match &result.outcome {
        TrialOutcome::Passed => None,
        TrialOutcome::Failed(f) => Some(f),
    };

    if let Some(failure) = failure {
        displayout!("  [FAIL] {}: {}\n", name, failure);
        if let Some(stderr) = failure.stderr().filter(|s| !s.trim().is_empty()) {
            displaylevel!(1, "{}\n", stderr.trim_end());
        }
        return;
    }

    displayout!("  [PASS] {}\n", name);
    let r = &result.report;
    let m = &result.metrics;
    if let Some(n) = r.original_size {
        displayout!("    Original Size:   {} bytes\n", group_thousands(n));
    }
    if let Some(n) = r.compressed_size {
        displayout!("    Compressed Size: {} bytes\n", group_thousands(n));
    }
    if let Some(e) = r.entropy_bits_per_symbol {
        displayout!("    Entropy:         {:.4} bits/symbol\n", e);
    }
    if let (Some(ratio), Some(saving)) = (m.ratio, m.space_saving_pct) {
        displayout!("    Compression Rate: {:.2}x ({:.2}%)\n", ratio, saving);
    }
    if let (Some(speed), Some(t)) = (m.compression_mb_s, r.compression_time_seconds) {
        displayout!("    Comp Speed:      {:.2} MB/s ({:.6} s)\n", speed, t);
    }
    if let (Some(speed), Some(t)) = (m.decompression_mb_s, r.decompression_time_seconds) {
        displayout!("    Decomp Speed:    {:.2} MB/s ({:.6} s)\n", speed, t);
    }
    if m.expanded() {
        displaylevel!(2, "    warning: output is larger than input\n");
    }
    if !result.missing_fields.is_empty() {
        let names: Vec<String> = result.missing_fields.iter().map(|f| f.to_string()).collect();
        displaylevel!(2, "    warning: report lacks {}\n", names.join(", "));
    }
    if let Some(wall) = result.wall_time {
        displaylevel!(3, "    Wall Time:       {:.6} s\n", wall.as_secs_f64());
    }
}

pub fn print_summary(summary: &RunSummary) {
    displayout!("\nSummary: {}/{} tests passed.\n", summary.passed, summary.total);
    for f in &summary.failed {
        displaylevel!(3, "  failed: {}\n", f.display());
    }
}
