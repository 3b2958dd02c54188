// Integration tests for corpus generation: the catalog on disk.
//
// Every generated file must have exactly the length its FixtureSpec declares,
// regeneration must overwrite rather than append, and the deterministic
// fixtures must have their exact content.

use std::fs;
use std::path::Path;

use huffcheck::config::{FIBONACCI_MULTIPLIER, LOREM_REPEAT};
use huffcheck::corpus::kinds::{default_catalog, FIBONACCI_ALPHABET, FIBONACCI_COUNTS};
use huffcheck::corpus::{generate_corpus, FixtureKind};
use huffcheck::lorem::LOREM_PARAGRAPH;
use huffcheck::CorpusConfig;
use tempfile::TempDir;

fn config(dir: &Path, seed: Option<u64>) -> CorpusConfig {
    let mut cfg = CorpusConfig::default();
    cfg.set_fixtures_dir(dir)
        .set_seed(seed)
        .set_chunk_size(4096)
        .set_skewed_size(100_000);
    cfg
}

#[test]
fn every_fixture_has_its_declared_length() {
    let dir = TempDir::new().unwrap();
    let cfg = config(dir.path(), None);
    let generated = generate_corpus(&cfg).unwrap();
    assert_eq!(generated.len(), 7);
    for g in &generated {
        let len = fs::metadata(&g.path).unwrap().len();
        assert_eq!(len, g.spec.byte_length, "{}", g.spec.name);
    }
}

#[test]
fn regeneration_keeps_lengths_and_does_not_append() {
    let dir = TempDir::new().unwrap();
    let cfg = config(dir.path(), None);
    generate_corpus(&cfg).unwrap();
    generate_corpus(&cfg).unwrap();
    for spec in default_catalog(&cfg) {
        let len = fs::metadata(dir.path().join(spec.name)).unwrap().len();
        assert_eq!(len, spec.byte_length, "{}", spec.name);
    }
}

#[test]
fn seeded_generation_is_reproducible() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    generate_corpus(&config(a.path(), Some(11))).unwrap();
    generate_corpus(&config(b.path(), Some(11))).unwrap();
    for spec in default_catalog(&config(a.path(), None)) {
        let x = fs::read(a.path().join(spec.name)).unwrap();
        let y = fs::read(b.path().join(spec.name)).unwrap();
        assert!(x == y, "{} differs between equal seeds", spec.name);
    }
}

#[test]
fn different_seeds_change_only_randomized_fixtures() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    generate_corpus(&config(a.path(), Some(1))).unwrap();
    generate_corpus(&config(b.path(), Some(2))).unwrap();
    for spec in default_catalog(&config(a.path(), None)) {
        let same = fs::read(a.path().join(spec.name)).unwrap()
            == fs::read(b.path().join(spec.name)).unwrap();
        assert_eq!(same, !spec.kind.is_randomized(), "{}", spec.name);
    }
}

#[test]
fn deterministic_fixture_contents() {
    let dir = TempDir::new().unwrap();
    generate_corpus(&config(dir.path(), Some(5))).unwrap();
    let read = |name: &str| fs::read(dir.path().join(name)).unwrap();

    assert!(read("empty.txt").is_empty());
    assert_eq!(read("single_char.txt"), vec![b'A'; 1000]);

    let lorem = read("text_lorem.txt");
    assert_eq!(lorem, LOREM_PARAGRAPH.repeat(LOREM_REPEAT).into_bytes());

    let pattern = read("binary_pattern.bin");
    assert_eq!(pattern.len(), 1 << 20);
    assert!(pattern.chunks(2).all(|p| p == [0x00, 0xFF]));

    let mut fib = Vec::new();
    for (&sym, &count) in FIBONACCI_ALPHABET.iter().zip(&FIBONACCI_COUNTS) {
        fib.extend(std::iter::repeat(sym).take(count * FIBONACCI_MULTIPLIER));
    }
    assert_eq!(read("text_fibonacci.txt"), fib);
}

#[test]
fn odd_pattern_size_is_honoured() {
    let dir = TempDir::new().unwrap();
    let mut cfg = config(dir.path(), Some(5));
    cfg.set_pattern_size(4097);
    generate_corpus(&cfg).unwrap();
    let pattern = fs::read(dir.path().join("binary_pattern.bin")).unwrap();
    assert_eq!(pattern.len(), 4097);
    assert_eq!(pattern[4096], 0x00);
}

#[test]
fn chunk_size_does_not_change_content() {
    let a = TempDir::new().unwrap();
    let b = TempDir::new().unwrap();
    let mut small = config(a.path(), Some(8));
    small.set_chunk_size(7);
    let mut large = config(b.path(), Some(8));
    large.set_chunk_size(1 << 20);
    generate_corpus(&small).unwrap();
    generate_corpus(&large).unwrap();
    for name in ["binary_pattern.bin", "single_char.txt", "text_lorem.txt"] {
        assert_eq!(
            fs::read(a.path().join(name)).unwrap(),
            fs::read(b.path().join(name)).unwrap(),
            "{name}"
        );
    }
}

#[test]
fn kinds_appear_in_catalog_order() {
    let cfg = CorpusConfig::default();
    let kinds: Vec<FixtureKind> = default_catalog(&cfg).iter().map(|s| s.kind).collect();
    assert_eq!(kinds, FixtureKind::ALL);
}
