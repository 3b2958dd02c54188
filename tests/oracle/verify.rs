// Integration tests for byte-exact verification of files on disk.

use std::fs;

use huffcheck::oracle::verify::{verify_round_trip, Verification};
use tempfile::TempDir;

fn pair(a: &[u8], b: &[u8]) -> (TempDir, Verification) {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("orig");
    let decoded = dir.path().join("orig.decoded");
    fs::write(&original, a).unwrap();
    fs::write(&decoded, b).unwrap();
    let v = verify_round_trip(&original, &decoded).unwrap();
    (dir, v)
}

#[test]
fn identical_multi_chunk_files() {
    // Larger than one verification chunk.
    let data: Vec<u8> = (0..300_000u32).map(|i| (i * 7 % 256) as u8).collect();
    let (_dir, v) = pair(&data, &data);
    match v {
        Verification::Identical(fp) => assert_eq!(fp.len, 300_000),
        other => panic!("expected identical, got {other:?}"),
    }
}

#[test]
fn single_flipped_byte_deep_in_file() {
    let data = vec![b'q'; 200_000];
    let mut bad = data.clone();
    bad[150_001] ^= 1;
    let (_dir, v) = pair(&data, &bad);
    match v {
        Verification::Differs {
            first_difference,
            original,
            decoded,
        } => {
            assert_eq!(first_difference, 150_001);
            assert_eq!(original.len, decoded.len);
            assert_ne!(original.xxh64, decoded.xxh64);
        }
        other => panic!("expected a difference, got {other:?}"),
    }
}

#[test]
fn truncated_decoded_file() {
    let (_dir, v) = pair(b"hello world", b"hello");
    match v {
        Verification::Differs {
            first_difference, ..
        } => assert_eq!(first_difference, 5),
        other => panic!("expected a difference, got {other:?}"),
    }
}

#[test]
fn empty_files_are_identical() {
    let (_dir, v) = pair(b"", b"");
    assert!(v.is_identical());
}

#[test]
fn missing_decoded_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let original = dir.path().join("orig");
    fs::write(&original, b"x").unwrap();
    let err = verify_round_trip(&original, &dir.path().join("absent")).unwrap_err();
    assert!(err.path.ends_with("absent"));
}
