//! Benchmark runner for the scheduling policies.
//!
//! Times each payload sequentially and under every policy, cross-checks
//! the parallel outputs against the sequential baseline, and prints
//! comparison tables. Inputs are seeded so runs are reproducible.

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use workshare::matrix::multiply::matmul_naive;
use workshare::workloads::elementwise::{sub_rows, sub_rows_parallel};
use workshare::workloads::knapsack::{knapsack, knapsack_parallel};
use workshare::workloads::matmul::matmul_parallel;
use workshare::workloads::normalize::{normalize, normalize_parallel, Vec4};
use workshare::workloads::zeta::{zeta_table, zeta_table_parallel};
use workshare::Policy;

const SEED: u64 = 42;
const TOLERANCE: f64 = 1e-10;

fn main() {
    let threads = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(8);

    println!("=== Work Distribution Benchmark ===\n");
    println!("Threads: {}\n", threads);

    bench_matmul(threads);
    bench_subtraction(threads);
    bench_normalize(threads);
    bench_knapsack(threads);
    bench_zeta_chunk_table(threads);
}

/// Time one invocation of `f` in seconds, after a warmup call.
fn bench<F: FnMut()>(mut f: F) -> f64 {
    f();
    let start = Instant::now();
    f();
    start.elapsed().as_secs_f64()
}

/// Largest absolute elementwise difference, for the mismatch check.
fn max_abs_diff(expected: &[f64], actual: &[f64]) -> f64 {
    expected
        .iter()
        .zip(actual)
        .map(|(e, a)| (e - a).abs())
        .fold(0.0, f64::max)
}

fn warn_if_mismatch(label: &str, policy: Policy, diff: f64) {
    if diff > TOLERANCE {
        println!(
            "WARNING: {} under {} differs from sequential by {:e}",
            label, policy, diff
        );
    }
}

fn print_row(name: &str, seconds: f64, baseline: f64) {
    println!(
        "{:16} {:9.2} ms  ({:.2}x)",
        name,
        seconds * 1e3,
        baseline / seconds
    );
}

fn bench_matmul(threads: usize) {
    let size = 512;
    let (m, n, k) = (size, size, size);
    println!("Matrix multiply: {}x{}", size, size);
    println!("{}", "-".repeat(50));

    let mut rng = StdRng::seed_from_u64(SEED);
    let a: Vec<f64> = (0..m * k).map(|_| rng.gen_range(0.0..10.0)).collect();
    let b: Vec<f64> = (0..k * n).map(|_| rng.gen_range(0.0..10.0)).collect();

    let mut expected = vec![0.0; m * n];
    let baseline = bench(|| matmul_naive(&a, &b, &mut expected, m, n, k));
    print_row("sequential", baseline, baseline);

    for policy in Policy::ALL {
        let mut c = vec![0.0; m * n];
        let elapsed = bench(|| {
            matmul_parallel(&a, &b, &mut c, m, n, k, threads, 8, policy).unwrap();
        });
        print_row(&policy.to_string(), elapsed, baseline);
        warn_if_mismatch("matmul", policy, max_abs_diff(&expected, &c));
    }
    println!();
}

fn bench_subtraction(threads: usize) {
    let size = 2048;
    println!("Matrix subtraction: {}x{}", size, size);
    println!("{}", "-".repeat(50));

    let a: Vec<f64> = (0..size * size).map(|i| (i / size + i % size) as f64).collect();
    let b: Vec<f64> = (0..size * size)
        .map(|i| (i / size) as f64 - (i % size) as f64)
        .collect();

    let mut expected = vec![0.0; size * size];
    let baseline = bench(|| sub_rows(&a, &b, &mut expected, size, size));
    print_row("sequential", baseline, baseline);

    for policy in Policy::ALL {
        let mut c = vec![0.0; size * size];
        let elapsed = bench(|| {
            sub_rows_parallel(&a, &b, &mut c, size, size, threads, 8, policy).unwrap();
        });
        print_row(&policy.to_string(), elapsed, baseline);
        warn_if_mismatch("subtraction", policy, max_abs_diff(&expected, &c));
    }
    println!();
}

fn bench_normalize(threads: usize) {
    let count = 1 << 22;
    println!("Normalize {} 4D vectors", count);
    println!("{}", "-".repeat(50));

    let mut rng = StdRng::seed_from_u64(SEED);
    let input: Vec<Vec4> = (0..count)
        .map(|_| {
            Vec4::new(
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
                rng.gen_range(-1.0..1.0),
            )
        })
        .collect();

    let mut expected = input.clone();
    let baseline = bench_once(|| normalize(&mut expected));
    print_row("sequential", baseline, baseline);

    for policy in Policy::ALL {
        let mut vecs = input.clone();
        let elapsed = bench_once(|| {
            normalize_parallel(&mut vecs, threads, 1024, policy).unwrap();
        });
        print_row(&policy.to_string(), elapsed, baseline);
        if vecs != expected {
            println!("WARNING: normalize under {} differs from sequential", policy);
        }
    }
    println!();
}

fn bench_knapsack(threads: usize) {
    let items = 1024;
    let capacity = 1024;
    println!("Knapsack: {} items, capacity {}", items, capacity);
    println!("{}", "-".repeat(50));

    let mut rng = StdRng::seed_from_u64(SEED);
    let weights: Vec<usize> = (0..items).map(|_| rng.gen_range(1..=100)).collect();
    let values: Vec<u64> = (0..items).map(|_| rng.gen_range(1..=100)).collect();
    let cells = (items + 1) * (capacity + 1);

    let mut expected = vec![0u64; cells];
    let baseline = bench_once(|| knapsack(&weights, &values, &mut expected, capacity));
    print_row("sequential", baseline, baseline);
    println!(
        "{:16} best value: {}",
        "",
        expected[items * (capacity + 1) + capacity]
    );

    for policy in Policy::ALL {
        let mut table = vec![0u64; cells];
        let elapsed = bench_once(|| {
            knapsack_parallel(&weights, &values, &mut table, capacity, threads, 64, policy)
                .unwrap();
        });
        print_row(&policy.to_string(), elapsed, baseline);
        if table != expected {
            println!("WARNING: knapsack under {} differs from sequential", policy);
        }
    }
    println!();
}

/// Chunk-size comparison on the lopsided payload:
/// per-index cost grows with the index, so static splits are unbalanced
/// and the chunk size decides how well dynamic claims smooth that out.
fn bench_zeta_chunk_table(threads: usize) {
    let n = 512;
    let s = 2.0;
    println!("Zeta table: n = {} (non-uniform per-index cost)", n);
    println!("{}", "-".repeat(59));
    println!("| {:>10} | {:>19} | {:>19} |", "chunk size", "block-cyclic", "dynamic");
    println!("{}", "-".repeat(59));

    let mut expected = vec![0.0; n];
    zeta_table(&mut expected, s);

    for chunk_size in [1, 2, 4, 8] {
        let mut x_static = vec![0.0; n];
        let static_time = bench_once(|| {
            zeta_table_parallel(&mut x_static, s, threads, chunk_size, Policy::BlockCyclic)
                .unwrap();
        });

        let mut x_dynamic = vec![0.0; n];
        let dynamic_time = bench_once(|| {
            zeta_table_parallel(&mut x_dynamic, s, threads, chunk_size, Policy::Dynamic).unwrap();
        });

        println!(
            "| {:>10} | {:>18.4}s | {:>18.4}s |",
            chunk_size, static_time, dynamic_time
        );
        warn_if_mismatch("zeta", Policy::BlockCyclic, max_abs_diff(&expected, &x_static));
        warn_if_mismatch("zeta", Policy::Dynamic, max_abs_diff(&expected, &x_dynamic));
    }
    println!("{}", "-".repeat(59));
}

/// Time a single invocation, no warmup - for payloads that mutate their
/// input in place or are too slow to run twice.
fn bench_once<F: FnOnce()>(f: F) -> f64 {
    let start = Instant::now();
    f();
    start.elapsed().as_secs_f64()
}
