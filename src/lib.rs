// huffcheck: synthetic corpus generator and round-trip oracle for entropy coders

pub mod display;
pub mod config;
pub mod util;
pub mod lorem;
pub mod corpus;
pub mod oracle;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const HUFFCHECK_VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the crate version string.
pub fn version_string() -> &'static str {
    HUFFCHECK_VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use config::{CorpusConfig, HarnessConfig};
pub use corpus::{generate_corpus, FixtureKind, FixtureSpec};
pub use oracle::{run_batch, run_fixture, RunSummary, TrialOutcome, TrialReport};
