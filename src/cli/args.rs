//! Argument structs for both binaries.
//!
//! Parsing is done by `clap`; this module only declares the flags and maps
//! them onto the library's configuration types. Options that are not given
//! fall back to environment overrides (run only) and then to the constants
//! in [`crate::config`].

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser};

use crate::config::{
    CorpusConfig, HarnessConfig, DEFAULT_CHUNK_SIZE, DEFAULT_FIXTURES_DIR, OUTPUTS_SUBDIR,
    SKEWED_SIZE,
};
use crate::display::level_from_flags;
use crate::oracle::report::ReportPolicy;

/// Regenerate the synthetic fixture corpus.
#[derive(Parser, Debug)]
#[command(name = "huffcheck-gen")]
#[command(version, about, long_about = None)]
pub struct GenArgs {
    /// Directory to write fixtures into (created if missing)
    #[arg(long, default_value = DEFAULT_FIXTURES_DIR)]
    pub dir: PathBuf,

    /// Seed for the random and skewed fixtures (default: OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Bytes per write for streamed fixtures
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Length of text_skewed.txt
    #[arg(long, default_value_t = SKEWED_SIZE)]
    pub skewed_size: u64,

    /// More output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl GenArgs {
    pub fn display_level(&self) -> u32 {
        level_from_flags(self.verbose, self.quiet)
    }

    pub fn corpus_config(&self) -> CorpusConfig {
        let mut config = CorpusConfig::default();
        config
            .set_fixtures_dir(self.dir.clone())
            .set_seed(self.seed)
            .set_chunk_size(self.chunk_size)
            .set_skewed_size(self.skewed_size);
        config
    }
}

/// Run every fixture through the tool under test and check the round trip.
#[derive(Parser, Debug)]
#[command(name = "huffcheck-run")]
#[command(version, about, long_about = None)]
pub struct RunArgs {
    /// Executable under test (default: $HUFFCHECK_TOOL, then ./build/huff)
    #[arg(long)]
    pub tool: Option<PathBuf>,

    /// Argument passed to the tool before the three paths (repeatable)
    #[arg(long = "tool-arg", action = ArgAction::Append, allow_hyphen_values = true)]
    pub tool_args: Vec<OsString>,

    /// Directory holding the fixtures (default: tests)
    #[arg(long)]
    pub fixtures_dir: Option<PathBuf>,

    /// Directory receiving compressed and decoded artifacts
    /// (default: <fixtures-dir>/outputs, i.e. tests/outputs)
    #[arg(long)]
    pub outputs_dir: Option<PathBuf>,

    /// Kill the tool after this many seconds; 0 waits forever (default: $HUFFCHECK_TIMEOUT)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Warn when the tool omits a size or timing line
    #[arg(long, default_value_t = false)]
    pub strict: bool,

    /// More output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less output (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,
}

impl RunArgs {
    pub fn display_level(&self) -> u32 {
        level_from_flags(self.verbose, self.quiet)
    }

    /// Environment-derived defaults overlaid with explicit flags.
    pub fn harness_config(&self) -> HarnessConfig {
        self.overlay(HarnessConfig::from_env())
    }

    /// Apply the explicit flags on top of `config`.
    pub fn overlay(&self, mut config: HarnessConfig) -> HarnessConfig {
        if let Some(tool) = &self.tool {
            config.set_tool(tool.clone());
        }
        if !self.tool_args.is_empty() {
            config.set_tool_args(self.tool_args.iter().cloned());
        }
        if let Some(dir) = &self.fixtures_dir {
            config.set_fixtures_dir(dir.clone());
        }
        match (&self.outputs_dir, &self.fixtures_dir) {
            (Some(dir), _) => {
                config.set_outputs_dir(dir.clone());
            }
            // Keep artifacts inside the chosen fixtures tree.
            (None, Some(fixtures)) => {
                config.set_outputs_dir(fixtures.join(OUTPUTS_SUBDIR));
            }
            (None, None) => {}
        }
        if let Some(secs) = self.timeout {
            config.set_timeout((secs > 0).then(|| Duration::from_secs(secs)));
        }
        if self.strict {
            config.set_policy(ReportPolicy::strict());
        }
        config
    }
}
