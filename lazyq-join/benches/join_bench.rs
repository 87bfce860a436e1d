//! Benchmarks for hash Join and GroupJoin.
//!
//! Both sides are drawn from a key space a tenth of the row count, so every
//! outer row matches about ten inner rows.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lazyq_join::SequenceJoinExt;
use lazyq_seq::Sequence;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

fn keyed_rows(seed: u64, len: usize) -> Sequence<(u32, u64)> {
    let mut rng = StdRng::seed_from_u64(seed);
    let key_space = (len / 10).max(1) as u32;
    let rows: Vec<(u32, u64)> = (0..len)
        .map(|i| (rng.random_range(0..key_space), i as u64))
        .collect();
    Sequence::from_vec(rows)
}

fn bench_join(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_join");
    for len in [1_000usize, 10_000, 50_000] {
        let outer = keyed_rows(1, len);
        let inner = keyed_rows(2, len);
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("join", len), &len, |b, _| {
            b.iter(|| {
                let joined = outer.join(&inner, |o| o.0, |i| i.0, |o, i| o.1 ^ i.1);
                black_box(joined.to_vec().unwrap().len())
            });
        });
        group.bench_with_input(BenchmarkId::new("group_join", len), &len, |b, _| {
            b.iter(|| {
                let grouped = outer.group_join(&inner, |o| o.0, |i| i.0, |_, m| m.len());
                black_box(grouped.to_vec().unwrap())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_join);
criterion_main!(benches);
