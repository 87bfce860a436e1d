//! Benchmarks for buffered multi-key sorting.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use lazyq_order::SequenceOrderExt;
use lazyq_seq::Sequence;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::hint::black_box;

fn random_pairs(len: usize) -> Vec<(u32, u32)> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..len)
        .map(|_| (rng.random_range(0..1_000), rng.random_range(0..1_000)))
        .collect()
}

fn bench_order_by(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_by");
    for len in [1_000usize, 10_000, 100_000] {
        let source = Sequence::from_vec(random_pairs(len));
        group.throughput(Throughput::Elements(len as u64));

        group.bench_with_input(BenchmarkId::new("single_key", len), &source, |b, seq| {
            b.iter(|| black_box(seq.order_by(|p| p.0).to_vec().unwrap()));
        });
        group.bench_with_input(BenchmarkId::new("then_by", len), &source, |b, seq| {
            b.iter(|| {
                black_box(
                    seq.order_by(|p| p.0)
                        .then_by_descending(|p| p.1)
                        .to_vec()
                        .unwrap(),
                )
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_order_by);
criterion_main!(benches);
