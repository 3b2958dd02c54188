//! Criterion benchmarks for the fixture writers.
//!
//! Run with:
//!   cargo bench --bench generate
//!
//! Every writer streams into `io::sink()`, so the numbers reflect generation
//! cost alone. The skewed writer dominates full corpus regeneration.

use std::io;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use huffcheck::corpus::writers::{
    write_alternating, write_geometric_skewed, write_single_symbol, write_uniform_random,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const SIZE: u64 = 4 << 20;

fn bench_writers(c: &mut Criterion) {
    let mut group = c.benchmark_group("writers");
    group.throughput(Throughput::Bytes(SIZE));

    for &chunk in &[64 * 1024usize, 1 << 20] {
        group.bench_with_input(BenchmarkId::new("geometric_skewed", chunk), &chunk, |b, &chunk| {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            b.iter(|| write_geometric_skewed(&mut io::sink(), &mut rng, SIZE, chunk).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("uniform_random", chunk), &chunk, |b, &chunk| {
            let mut rng = ChaCha8Rng::seed_from_u64(1);
            b.iter(|| write_uniform_random(&mut io::sink(), &mut rng, SIZE, chunk).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("alternating", chunk), &chunk, |b, &chunk| {
            b.iter(|| write_alternating(&mut io::sink(), SIZE, chunk).unwrap())
        });

        group.bench_with_input(BenchmarkId::new("single_symbol", chunk), &chunk, |b, &chunk| {
            b.iter(|| write_single_symbol(&mut io::sink(), b'A', SIZE, chunk).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_writers);
criterion_main!(benches);
