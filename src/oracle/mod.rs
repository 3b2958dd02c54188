//! Oracle harness: certifies that an external tool round-trips every fixture.
//!
//! The tool is a black box. For each fixture the harness:
//!
//! - [`invoke`] : runs `<tool> [args] <input> <compressed> <decoded>` and captures its output;
//! - [`report`] : reads the tool's self-reported sizes, entropy and timings;
//! - [`verify`] : compares the decoded file with the fixture byte for byte;
//! - [`metrics`]: derives ratio, space saving and throughput for display.
//!
//! [`runner`] strings these together per fixture and over a whole directory.

pub mod invoke;
pub mod metrics;
pub mod report;
pub mod runner;
pub mod verify;

pub use metrics::DerivedMetrics;
pub use report::{parse_report, ReportField, ReportPolicy, TrialReport};
pub use runner::{
    collect_fixtures, run_batch, run_fixture, BatchError, RunSummary, TrialFailure, TrialOutcome,
    TrialResult,
};
