// Integration tests for corpus generation: statistical profiles.
//
// The randomized fixtures are only reproducible in distribution, so these
// checks use generous tolerances over a fixed seed.

use huffcheck::corpus::kinds::{SKEWED_ALPHABET, SKEWED_WEIGHTS};
use huffcheck::corpus::writers::{write_geometric_skewed, write_uniform_random};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn histogram(data: &[u8]) -> [u64; 256] {
    let mut h = [0u64; 256];
    for &b in data {
        h[b as usize] += 1;
    }
    h
}

#[test]
fn skewed_stream_uses_only_its_alphabet() {
    let mut rng = ChaCha8Rng::seed_from_u64(17);
    let mut out = Vec::new();
    write_geometric_skewed(&mut out, &mut rng, 50_000, 4096).unwrap();
    assert_eq!(out.len(), 50_000);
    assert!(out.iter().all(|b| SKEWED_ALPHABET.contains(b)));
}

#[test]
fn skewed_frequencies_follow_weights() {
    let n = 200_000u64;
    let mut rng = ChaCha8Rng::seed_from_u64(23);
    let mut out = Vec::new();
    write_geometric_skewed(&mut out, &mut rng, n, 8192).unwrap();
    let h = histogram(&out);
    let total: u32 = SKEWED_WEIGHTS.iter().sum();
    for (&sym, &w) in SKEWED_ALPHABET.iter().zip(&SKEWED_WEIGHTS) {
        let expected = w as f64 / total as f64;
        let observed = h[sym as usize] as f64 / n as f64;
        assert!(
            (observed - expected).abs() < 0.01,
            "{}: observed {observed:.4}, expected {expected:.4}",
            sym as char
        );
    }
    // The halving weights must show as a strictly decreasing profile for
    // the well-populated head of the alphabet.
    for pair in SKEWED_ALPHABET[..5].windows(2) {
        assert!(h[pair[0] as usize] > h[pair[1] as usize]);
    }
}

#[test]
fn uniform_random_covers_every_byte_value() {
    let n = 1 << 20;
    let mut rng = ChaCha8Rng::seed_from_u64(29);
    let mut out = Vec::new();
    write_uniform_random(&mut out, &mut rng, n, 65536).unwrap();
    assert_eq!(out.len() as u64, n);
    let h = histogram(&out);
    let expected = n as f64 / 256.0;
    for (value, &count) in h.iter().enumerate() {
        let dev = (count as f64 - expected).abs() / expected;
        assert!(dev < 0.2, "byte {value}: count {count}");
    }
}
