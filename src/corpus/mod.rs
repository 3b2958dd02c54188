//! Corpus generator: writes the fixed fixture catalog to disk.
//!
//! [`generate_corpus`] is the entry point. It creates the fixtures directory,
//! then writes every [`FixtureSpec`] from [`default_catalog`] in order,
//! truncating any previous content. Any I/O failure aborts generation and is
//! returned to the caller with the offending path.
//!
//! Submodules:
//! - [`kinds`]  : [`FixtureKind`], [`FixtureSpec`], alphabets and weights, the catalog.
//! - [`writers`]: one [`std::io::Write`]-generic writer per kind.

pub mod kinds;
pub mod writers;

pub use kinds::{default_catalog, FixtureKind, FixtureSpec};

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::config::{
    CorpusConfig, FIBONACCI_MULTIPLIER, FILE_BUFFER_SIZE, LOREM_REPEAT, MAX_CHUNK_SIZE,
    SINGLE_SYMBOL,
};
use crate::displaylevel;

/// Fatal corpus-generation failures.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("cannot create fixtures directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write fixture {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("fixture {} has {actual} bytes, expected {expected}", .path.display())]
    LengthMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("invalid corpus configuration: {0}")]
    InvalidConfig(String),
}

/// A fixture that was written successfully.
#[derive(Debug, Clone)]
pub struct GeneratedFixture {
    pub spec: FixtureSpec,
    pub path: PathBuf,
}

/// Write the contents of one fixture to `out`.
///
/// `rng` is consulted only by randomized kinds.
pub fn write_fixture<W, R>(
    out: &mut W,
    spec: &FixtureSpec,
    rng: &mut R,
    chunk_size: usize,
) -> io::Result<u64>
where
    W: Write + ?Sized,
    R: rand::Rng + ?Sized,
{
    match spec.kind {
        FixtureKind::LoremTextRepeat => crate::lorem::write_repeated(out, LOREM_REPEAT),
        FixtureKind::UniformRandom => {
            writers::write_uniform_random(out, rng, spec.byte_length, chunk_size)
        }
        FixtureKind::AlternatingPattern => {
            writers::write_alternating(out, spec.byte_length, chunk_size)
        }
        FixtureKind::GeometricSkewed => {
            writers::write_geometric_skewed(out, rng, spec.byte_length, chunk_size)
        }
        FixtureKind::FibonacciWeighted => writers::write_fibonacci(out, FIBONACCI_MULTIPLIER),
        FixtureKind::Empty => Ok(0),
        FixtureKind::SingleSymbolRepeat => {
            writers::write_single_symbol(out, SINGLE_SYMBOL, spec.byte_length, chunk_size)
        }
    }
}

/// Create (or truncate) `dir/spec.name` and fill it.
pub fn generate_fixture<R>(
    dir: &Path,
    spec: &FixtureSpec,
    rng: &mut R,
    chunk_size: usize,
) -> Result<PathBuf, CorpusError>
where
    R: rand::Rng + ?Sized,
{
    let path = dir.join(spec.name);
    let wrap = |source: io::Error| CorpusError::Write {
        path: path.clone(),
        source,
    };

    let file = File::create(&path).map_err(wrap)?;
    let mut out = BufWriter::with_capacity(FILE_BUFFER_SIZE, file);
    let written = write_fixture(&mut out, spec, rng, chunk_size).map_err(wrap)?;
    out.flush().map_err(wrap)?;

    if written != spec.byte_length {
        return Err(CorpusError::LengthMismatch {
            path,
            expected: spec.byte_length,
            actual: written,
        });
    }
    Ok(path)
}

/// Regenerate the whole catalog under `config.fixtures_dir`.
///
/// With `config.seed` set, the randomized fixtures are reproducible
/// byte-for-byte; otherwise the generator is seeded from OS entropy.
pub fn generate_corpus(config: &CorpusConfig) -> Result<Vec<GeneratedFixture>, CorpusError> {
    if config.chunk_size == 0 {
        return Err(CorpusError::InvalidConfig("chunk size must be non-zero".into()));
    }
    if config.chunk_size > MAX_CHUNK_SIZE {
        return Err(CorpusError::InvalidConfig(format!(
            "chunk size {} exceeds the maximum of {}",
            config.chunk_size, MAX_CHUNK_SIZE
        )));
    }

    fs::create_dir_all(&config.fixtures_dir).map_err(|source| CorpusError::CreateDir {
        path: config.fixtures_dir.clone(),
        source,
    })?;

    let mut rng = match config.seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let catalog = default_catalog(config);
    let mut generated = Vec::with_capacity(catalog.len());
    for spec in catalog {
        displaylevel!(3, "Generating {} ({})...\n", spec.name, spec.kind);
        let path = generate_fixture(&config.fixtures_dir, &spec, &mut rng, config.chunk_size)?;
        displaylevel!(2, "  {:<24} {:>12} bytes  {}\n", spec.name, spec.byte_length, spec.kind);
        generated.push(GeneratedFixture { spec, path });
    }
    Ok(generated)
}
