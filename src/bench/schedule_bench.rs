//! Criterion benchmarks comparing scheduling policies.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::atomic::{AtomicU64, Ordering};

use workshare::workloads::matmul::matmul_parallel;
use workshare::workloads::zeta::zeta_table_parallel;
use workshare::{run, Policy};

const THREADS: usize = 4;
const CHUNK: usize = 8;

/// Uniform near-zero-cost payload: measures the engine's own overhead.
fn bench_square_fill(c: &mut Criterion) {
    let n = 100_000;
    let out: Vec<AtomicU64> = (0..n).map(|_| AtomicU64::new(0)).collect();

    let mut group = c.benchmark_group("square_fill");
    for policy in Policy::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(policy),
            &policy,
            |b, &policy| {
                b.iter(|| {
                    run(n, THREADS, CHUNK, policy, |i| {
                        out[i].store((i * i) as u64, Ordering::Relaxed);
                        Ok(())
                    })
                    .unwrap();
                });
            },
        );
    }
    group.finish();
}

/// Uniform heavy payload: row-granular matmul.
fn bench_matmul(c: &mut Criterion) {
    let size = 128;
    let a: Vec<f64> = (0..size * size).map(|i| (i % 10) as f64).collect();
    let b: Vec<f64> = (0..size * size).map(|i| (i % 10) as f64).collect();

    let mut group = c.benchmark_group("matmul_128");
    for policy in Policy::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(policy),
            &policy,
            |bench, &policy| {
                let mut out = vec![0.0; size * size];
                bench.iter(|| {
                    matmul_parallel(&a, &b, &mut out, size, size, size, THREADS, CHUNK, policy)
                        .unwrap();
                });
            },
        );
    }
    group.finish();
}

/// Lopsided payload: per-index cost grows with the index, so this is
/// where dynamic should separate from the static policies.
fn bench_zeta(c: &mut Criterion) {
    let n = 256;

    let mut group = c.benchmark_group("zeta_256");
    for policy in Policy::ALL {
        group.bench_with_input(
            BenchmarkId::from_parameter(policy),
            &policy,
            |bench, &policy| {
                let mut out = vec![0.0; n];
                bench.iter(|| {
                    zeta_table_parallel(&mut out, 2.0, THREADS, CHUNK, policy).unwrap();
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_square_fill, bench_matmul, bench_zeta);
criterion_main!(benches);
