//! Runtime configuration: named defaults for the tool-under-test contract and
//! the corpus catalog, plus the [`CorpusConfig`] / [`HarnessConfig`] structs
//! that carry them.
//!
//! Every path convention shared with the external tool (directories, artifact
//! suffixes, executable location) is a constant here rather than a literal at
//! the call site. Builder-style setters let tests shrink sizes and redirect
//! directories without touching the process environment.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::display::display_level;
use crate::oracle::report::ReportPolicy;

// ── Filesystem layout ─────────────────────────────────────────────────────────

/// Directory holding one file per generated fixture.
pub const DEFAULT_FIXTURES_DIR: &str = "tests";
/// Directory receiving the compressed and decoded artifacts.
pub const DEFAULT_OUTPUTS_DIR: &str = "tests/outputs";
/// Name of the outputs directory when it is placed under a fixtures
/// directory given on the command line.
pub const OUTPUTS_SUBDIR: &str = "outputs";
/// Location of the executable under test, relative to the working directory.
pub const DEFAULT_TOOL_PATH: &str = "./build/huff";
/// Appended to a fixture's file name to form its compressed artifact name.
pub const COMPRESSED_SUFFIX: &str = ".huff";
/// Appended to a fixture's file name to form its decoded artifact name.
pub const DECODED_SUFFIX: &str = ".decoded";
/// Files in the fixtures directory with these endings are never treated as
/// inputs: generator scripts and artifacts left behind by earlier runs.
pub const EXCLUDED_SUFFIXES: &[&str] = &[".py", COMPRESSED_SUFFIX, DECODED_SUFFIX];

// ── Environment overrides ─────────────────────────────────────────────────────

/// Overrides [`DEFAULT_TOOL_PATH`].
pub const ENV_TOOL: &str = "HUFFCHECK_TOOL";
/// Per-fixture wall-clock limit in whole seconds; `0` disables the limit.
pub const ENV_TIMEOUT: &str = "HUFFCHECK_TIMEOUT";

// ── Size multipliers ──────────────────────────────────────────────────────────

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

// ── Generation parameters ─────────────────────────────────────────────────────

/// Write granularity for streamed fixtures. Peak memory of a streamed
/// writer is one chunk (never more than the fixture itself) plus
/// [`FILE_BUFFER_SIZE`], independent of the fixture size.
pub const DEFAULT_CHUNK_SIZE: usize = MB;
/// Largest accepted chunk size.
pub const MAX_CHUNK_SIZE: usize = 64 * MB;
/// Capacity of the buffered writer in front of each fixture file. Chunks at
/// least this large bypass it, so it only coalesces small writes.
pub const FILE_BUFFER_SIZE: usize = 64 * KB;
/// Number of copies of the lorem paragraph in `text_lorem.txt`.
pub const LOREM_REPEAT: usize = 1000;
/// Size of `binary_random_1mb.bin`.
pub const RANDOM_SIZE: u64 = MB as u64;
/// Size of `binary_pattern.bin`.
pub const PATTERN_SIZE: u64 = MB as u64;
/// Size of `text_skewed.txt`, the largest fixture.
pub const SKEWED_SIZE: u64 = 100_000_000;
/// Each Fibonacci count is written this many times over.
pub const FIBONACCI_MULTIPLIER: usize = 100;
/// Length of `single_char.txt`.
pub const SINGLE_SYMBOL_LEN: u64 = 1000;
/// The repeated byte in `single_char.txt`.
pub const SINGLE_SYMBOL: u8 = b'A';

// ── Harness parameters ────────────────────────────────────────────────────────

/// Read granularity when comparing original and decoded files.
pub const VERIFY_CHUNK_SIZE: usize = 64 * KB;
/// How often a time-limited child is polled for exit.
pub const POLL_INTERVAL: Duration = Duration::from_millis(10);

// ── CorpusConfig ──────────────────────────────────────────────────────────────

/// Parameters for one corpus regeneration.
#[derive(Debug, Clone)]
pub struct CorpusConfig {
    /// Destination directory; created if missing.
    pub fixtures_dir: PathBuf,
    /// Bytes per write for streamed fixtures.
    pub chunk_size: usize,
    /// Seed for the randomized fixtures. `None` draws from OS entropy, so
    /// only the statistical profile is reproducible.
    pub seed: Option<u64>,
    pub random_size: u64,
    pub pattern_size: u64,
    pub skewed_size: u64,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        CorpusConfig {
            fixtures_dir: PathBuf::from(DEFAULT_FIXTURES_DIR),
            chunk_size: DEFAULT_CHUNK_SIZE,
            seed: None,
            random_size: RANDOM_SIZE,
            pattern_size: PATTERN_SIZE,
            skewed_size: SKEWED_SIZE,
        }
    }
}

impl CorpusConfig {
    pub fn set_fixtures_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.fixtures_dir = dir.into();
        self
    }

    /// Set the streaming chunk size. Zero and anything above
    /// [`MAX_CHUNK_SIZE`] are rejected at generation time.
    pub fn set_chunk_size(&mut self, chunk_size: usize) -> &mut Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn set_seed(&mut self, seed: Option<u64>) -> &mut Self {
        self.seed = seed;
        self
    }

    pub fn set_random_size(&mut self, size: u64) -> &mut Self {
        self.random_size = size;
        self
    }

    pub fn set_pattern_size(&mut self, size: u64) -> &mut Self {
        self.pattern_size = size;
        self
    }

    pub fn set_skewed_size(&mut self, size: u64) -> &mut Self {
        self.skewed_size = size;
        self
    }
}

// ── HarnessConfig ─────────────────────────────────────────────────────────────

/// Everything the oracle needs to locate fixtures, drive the tool and place
/// its artifacts.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Executable under test.
    pub tool: PathBuf,
    /// Arguments placed before the three paths, for running the tool
    /// through a wrapper (`sh script`, `valgrind huff`, ...).
    pub tool_args: Vec<OsString>,
    pub fixtures_dir: PathBuf,
    pub outputs_dir: PathBuf,
    pub compressed_suffix: String,
    pub decoded_suffix: String,
    /// File-name endings skipped during fixture enumeration.
    pub excluded_suffixes: Vec<String>,
    /// Per-fixture wall-clock limit. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    /// Which report fields must be present.
    pub policy: ReportPolicy,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        HarnessConfig {
            tool: PathBuf::from(DEFAULT_TOOL_PATH),
            tool_args: Vec::new(),
            fixtures_dir: PathBuf::from(DEFAULT_FIXTURES_DIR),
            outputs_dir: PathBuf::from(DEFAULT_OUTPUTS_DIR),
            compressed_suffix: COMPRESSED_SUFFIX.to_owned(),
            decoded_suffix: DECODED_SUFFIX.to_owned(),
            excluded_suffixes: EXCLUDED_SUFFIXES.iter().map(|s| (*s).to_owned()).collect(),
            timeout: None,
            policy: ReportPolicy::default(),
        }
    }
}

impl HarnessConfig {
    /// Defaults with [`ENV_TOOL`] and [`ENV_TIMEOUT`] applied.
    pub fn from_env() -> Self {
        let mut config = HarnessConfig::default();
        config.tool = init_tool_path_from(std::env::var_os(ENV_TOOL));
        config.timeout = init_timeout_from(std::env::var(ENV_TIMEOUT).ok().as_deref());
        config
    }

    pub fn set_tool(&mut self, tool: impl Into<PathBuf>) -> &mut Self {
        self.tool = tool.into();
        self
    }

    pub fn set_tool_args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.tool_args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn set_fixtures_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.fixtures_dir = dir.into();
        self
    }

    pub fn set_outputs_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.outputs_dir = dir.into();
        self
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) -> &mut Self {
        self.timeout = timeout;
        self
    }

    pub fn set_policy(&mut self, policy: ReportPolicy) -> &mut Self {
        self.policy = policy;
        self
    }

    /// Path of the compressed artifact for `fixture`.
    pub fn compressed_path(&self, fixture: &Path) -> PathBuf {
        self.artifact_path(fixture, &self.compressed_suffix)
    }

    /// Path of the decoded artifact for `fixture`.
    pub fn decoded_path(&self, fixture: &Path) -> PathBuf {
        self.artifact_path(fixture, &self.decoded_suffix)
    }

    /// Returns `true` if `name` ends with any excluded suffix.
    pub fn is_excluded(&self, name: &str) -> bool {
        self.excluded_suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }

    // Artifacts are named after the fixture's own file name, so two fixtures
    // never share an output path.
    fn artifact_path(&self, fixture: &Path, suffix: &str) -> PathBuf {
        let mut name: OsString = fixture
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(suffix);
        self.outputs_dir.join(name)
    }
}

// ── Environment parsing ───────────────────────────────────────────────────────

/// Testable core of the [`ENV_TOOL`] lookup: an empty or unset value keeps
/// [`DEFAULT_TOOL_PATH`].
pub fn init_tool_path_from(env_val: Option<OsString>) -> PathBuf {
    match env_val {
        Some(v) if !v.is_empty() => PathBuf::from(v),
        _ => PathBuf::from(DEFAULT_TOOL_PATH),
    }
}

/// Testable core of the [`ENV_TIMEOUT`] lookup.
///
/// A positive integer is a limit in seconds; `0` or unset means no limit.
/// Anything else is ignored with a warning.
pub fn init_timeout_from(env_val: Option<&str>) -> Option<Duration> {
    let env = env_val?;
    match env.trim().parse::<u64>() {
        Ok(0) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
        Err(_) => {
            if display_level() >= 2 {
                eprintln!(
                    "Ignore environment variable setting {}={}: not a valid unsigned value ",
                    ENV_TIMEOUT, env
                );
            }
            None
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
