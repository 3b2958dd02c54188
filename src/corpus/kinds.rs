//! Fixture kinds and the default catalog.
//!
//! A [`FixtureSpec`] pairs a file name with the distribution it is engineered
//! to exhibit and the exact length it must have once written. The catalog is
//! fixed: regenerating always produces the same set of names and lengths.

use std::fmt;

use crate::config::{CorpusConfig, FIBONACCI_MULTIPLIER, LOREM_REPEAT, SINGLE_SYMBOL_LEN};
use crate::lorem;

/// Alphabet of the geometric-skewed stream.
pub const SKEWED_ALPHABET: [u8; 8] = *b"abcdefgh";

/// Relative weights of [`SKEWED_ALPHABET`]: 1000 halved with integer
/// division per symbol (1000, 500, 250, 125, 62, 31, 15, 7).
pub const SKEWED_WEIGHTS: [u32; 8] = skewed_weights();

const fn skewed_weights() -> [u32; 8] {
    let mut w = [0u32; 8];
    let mut cur = 1000u32;
    let mut i = 0;
    while i < 8 {
        w[i] = cur;
        cur /= 2;
        i += 1;
    }
    w
}

/// Alphabet of the Fibonacci-weighted stream.
pub const FIBONACCI_ALPHABET: [u8; 8] = *b"abcdefgh";
/// Per-symbol counts before scaling by [`FIBONACCI_MULTIPLIER`].
pub const FIBONACCI_COUNTS: [usize; 8] = [1, 1, 2, 3, 5, 8, 13, 21];

/// Symbol-frequency profile a fixture is built to stress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FixtureKind {
    /// A fixed natural-language paragraph repeated back to back.
    LoremTextRepeat,
    /// Independent uniform bytes over 0..=255. Expected ratio ≈ 1.0.
    UniformRandom,
    /// 0x00 and 0xFF alternating. Two-symbol alphabet, 1 bit/symbol.
    AlternatingPattern,
    /// Eight symbols with halving weights, sampled per position.
    GeometricSkewed,
    /// Eight symbols with Fibonacci counts, written in contiguous runs.
    FibonacciWeighted,
    /// Zero bytes.
    Empty,
    /// One distinct symbol repeated.
    SingleSymbolRepeat,
}

impl FixtureKind {
    /// Every kind in catalog order.
    pub const ALL: [FixtureKind; 7] = [
        FixtureKind::LoremTextRepeat,
        FixtureKind::UniformRandom,
        FixtureKind::AlternatingPattern,
        FixtureKind::GeometricSkewed,
        FixtureKind::FibonacciWeighted,
        FixtureKind::Empty,
        FixtureKind::SingleSymbolRepeat,
    ];

    /// Short kebab-case label used in progress output.
    pub fn label(self) -> &'static str {
        match self {
            FixtureKind::LoremTextRepeat => "lorem-text-repeat",
            FixtureKind::UniformRandom => "uniform-random",
            FixtureKind::AlternatingPattern => "alternating-pattern",
            FixtureKind::GeometricSkewed => "geometric-skewed-symbols",
            FixtureKind::FibonacciWeighted => "fibonacci-weighted-symbols",
            FixtureKind::Empty => "empty",
            FixtureKind::SingleSymbolRepeat => "single-symbol-repeat",
        }
    }

    /// Whether content depends on the random generator.
    pub fn is_randomized(self) -> bool {
        matches!(self, FixtureKind::UniformRandom | FixtureKind::GeometricSkewed)
    }
}

impl fmt::Display for FixtureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One entry of the corpus catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureSpec {
    /// File name inside the fixtures directory.
    pub name: &'static str,
    pub kind: FixtureKind,
    /// Exact length of the written file.
    pub byte_length: u64,
}

/// Total length of the Fibonacci-weighted fixture.
pub fn fibonacci_len(multiplier: usize) -> u64 {
    FIBONACCI_COUNTS.iter().map(|&c| (c * multiplier) as u64).sum()
}

/// The fixed fixture catalog, sized by `config`.
pub fn default_catalog(config: &CorpusConfig) -> Vec<FixtureSpec> {
    vec![
        FixtureSpec {
            name: "text_lorem.txt",
            kind: FixtureKind::LoremTextRepeat,
            byte_length: lorem::repeated_len(LOREM_REPEAT),
        },
        FixtureSpec {
            name: "binary_random_1mb.bin",
            kind: FixtureKind::UniformRandom,
            byte_length: config.random_size,
        },
        FixtureSpec {
            name: "binary_pattern.bin",
            kind: FixtureKind::AlternatingPattern,
            byte_length: config.pattern_size,
        },
        FixtureSpec {
            name: "text_skewed.txt",
            kind: FixtureKind::GeometricSkewed,
            byte_length: config.skewed_size,
        },
        FixtureSpec {
            name: "text_fibonacci.txt",
            kind: FixtureKind::FibonacciWeighted,
            byte_length: fibonacci_len(FIBONACCI_MULTIPLIER),
        },
        FixtureSpec {
            name: "empty.txt",
            kind: FixtureKind::Empty,
            byte_length: 0,
        },
        FixtureSpec {
            name: "single_char.txt",
            kind: FixtureKind::SingleSymbolRepeat,
            byte_length: SINGLE_SYMBOL_LEN,
        },
    ]
}
