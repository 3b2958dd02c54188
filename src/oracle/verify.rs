//! Byte-exact comparison of a fixture with the tool's decoded output.
//!
//! Both files are streamed in [`VERIFY_CHUNK_SIZE`] pieces, so the 100 MB
//! fixture is checked in constant memory. Both sides are also fingerprinted
//! with xxh64, which makes a mismatch line self-describing: equal lengths with
//! different digests point at corruption, different lengths at truncation.

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use thiserror::Error;
use xxhash_rust::xxh64::Xxh64;

use crate::config::VERIFY_CHUNK_SIZE;

/// A file could not be read during verification.
#[derive(Debug, Error)]
#[error("cannot read {}: {source}", .path.display())]
pub struct VerifyError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Length and xxh64 of one side of the comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fingerprint {
    pub len: u64,
    pub xxh64: u64,
}

/// Outcome of a completed comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    Identical(Fingerprint),
    Differs {
        /// Offset of the first differing byte. When one file is a prefix of
        /// the other this is the shorter length.
        first_difference: u64,
        original: Fingerprint,
        decoded: Fingerprint,
    },
}

impl Verification {
    pub fn is_identical(&self) -> bool {
        matches!(self, Verification::Identical(_))
    }
}

/// Read until `buf` is full or EOF. Returns bytes read.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn open(path: &Path) -> Result<BufReader<File>, VerifyError> {
    File::open(path)
        .map(|f| BufReader::with_capacity(VERIFY_CHUNK_SIZE, f))
        .map_err(|source| VerifyError {
            path: path.to_path_buf(),
            source,
        })
}

/// Compare two readers to the end.
pub fn compare_streams<A: Read, B: Read>(
    original: &mut A,
    decoded: &mut B,
    chunk_size: usize,
) -> io::Result<Verification> {
    let chunk_size = chunk_size.max(1);
    let mut buf_a = vec![0u8; chunk_size];
    let mut buf_b = vec![0u8; chunk_size];
    let mut hash_a = Xxh64::new(0);
    let mut hash_b = Xxh64::new(0);
    let (mut len_a, mut len_b) = (0u64, 0u64);
    let mut first_difference: Option<u64> = None;
    let (mut done_a, mut done_b) = (false, false);

    while !(done_a && done_b) {
        let n_a = if done_a { 0 } else { read_full(original, &mut buf_a)? };
        let n_b = if done_b { 0 } else { read_full(decoded, &mut buf_b)? };
        done_a |= n_a < chunk_size;
        done_b |= n_b < chunk_size;

        if first_difference.is_none() {
            // Both streams are in lockstep until the first difference, so
            // the chunk offsets line up.
            let common = n_a.min(n_b);
            if let Some(i) = (0..common).find(|&i| buf_a[i] != buf_b[i]) {
                first_difference = Some(len_a + i as u64);
            } else if n_a != n_b {
                first_difference = Some(len_a + common as u64);
            }
        }

        hash_a.update(&buf_a[..n_a]);
        hash_b.update(&buf_b[..n_b]);
        len_a += n_a as u64;
        len_b += n_b as u64;
    }

    let original = Fingerprint {
        len: len_a,
        xxh64: hash_a.digest(),
    };
    let decoded = Fingerprint {
        len: len_b,
        xxh64: hash_b.digest(),
    };
    Ok(match first_difference {
        None => Verification::Identical(original),
        Some(first_difference) => Verification::Differs {
            first_difference,
            original,
            decoded,
        },
    })
}

/// Compare the fixture at `original` with the tool's output at `decoded`.
///
/// A missing or unreadable file is an error, which callers treat exactly
/// like a content mismatch.
pub fn verify_round_trip(original: &Path, decoded: &Path) -> Result<Verification, VerifyError> {
    let mut a = open(original)?;
    let mut b = open(decoded)?;
    compare_streams(&mut a, &mut b, VERIFY_CHUNK_SIZE).map_err(|source| VerifyError {
        // Which side failed is not recoverable from io::Error; name the
        // decoded file since it is the one the tool wrote.
        path: decoded.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn cmp(a: &[u8], b: &[u8], chunk: usize) -> Verification {
        compare_streams(&mut Cursor::new(a), &mut Cursor::new(b), chunk).unwrap()
    }

    #[test]
    fn identical_streams() {
        let data: Vec<u8> = (0..10_000u32).map(|i| (i % 251) as u8).collect();
        let v = cmp(&data, &data, 333);
        assert!(v.is_identical());
        match v {
            Verification::Identical(fp) => assert_eq!(fp.len, 10_000),
            _ => unreachable!(),
        }
    }

    #[test]
    fn empty_streams_are_identical() {
        assert!(cmp(b"", b"", 64).is_identical());
    }

    #[test]
    fn reports_first_differing_offset() {
        let a = vec![7u8; 1000];
        let mut b = a.clone();
        b[700] = 8;
        b[900] = 9;
        match cmp(&a, &b, 256) {
            Verification::Differs {
                first_difference,
                original,
                decoded,
            } => {
                assert_eq!(first_difference, 700);
                assert_eq!(original.len, decoded.len);
                assert_ne!(original.xxh64, decoded.xxh64);
            }
            other => panic!("expected difference, got {other:?}"),
        }
    }

    #[test]
    fn truncated_output_differs_at_its_length() {
        let a = vec![1u8; 500];
        match cmp(&a, &a[..300], 128) {
            Verification::Differs {
                first_difference,
                original,
                decoded,
            } => {
                assert_eq!(first_difference, 300);
                assert_eq!(original.len, 500);
                assert_eq!(decoded.len, 300);
            }
            other => panic!("expected difference, got {other:?}"),
        }
    }

    #[test]
    fn trailing_garbage_differs() {
        let a = b"abc".to_vec();
        let b = b"abcd".to_vec();
        assert!(!cmp(&a, &b, 3).is_identical());
        assert!(!cmp(b"", b"x", 3).is_identical());
    }

    #[test]
    fn missing_decoded_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        let orig = dir.path().join("orig");
        std::fs::write(&orig, b"data").unwrap();
        let err = verify_round_trip(&orig, &dir.path().join("nope")).unwrap_err();
        assert!(err.path.ends_with("nope"));
        assert_eq!(err.source.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn verify_round_trip_on_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        std::fs::write(&a, vec![0xAB; 200_000]).unwrap();
        std::fs::write(&b, vec![0xAB; 200_000]).unwrap();
        assert!(verify_round_trip(&a, &b).unwrap().is_identical());
    }
}
