use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use streamsketch::HyperLogLog;

/// Benchmark: add across sketch sizes
fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("hyperloglog_add");

    for buckets in [1024usize, 4096, 16384] {
        group.bench_with_input(BenchmarkId::new("add", buckets), &buckets, |b, &buckets| {
            let mut counter = HyperLogLog::<u64>::new(buckets).unwrap();
            let mut item = 0u64;
            b.iter(|| {
                counter.add(black_box(&item));
                item += 1;
            });
        });
    }

    group.finish();
}

/// Benchmark: estimation at various fills
fn bench_unique_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("hyperloglog_unique_count");

    for (items, buckets) in [(1_000u64, 1024usize), (100_000, 1024), (100_000, 16384)] {
        let mut counter = HyperLogLog::<u64>::new(buckets).unwrap();
        for i in 0..items {
            counter.add(&i);
        }
        group.bench_with_input(
            BenchmarkId::new("unique_count", format!("n={}_b={}", items, buckets)),
            &(),
            |b, _| {
                b.iter(|| black_box(counter.unique_count()));
            },
        );
    }

    group.finish();
}

/// Benchmark: merging two populated sketches
fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("hyperloglog_merge");

    group.bench_function("merge_two_sketches", |b| {
        let mut lhs = HyperLogLog::<u64>::new(4096).unwrap();
        let mut rhs = HyperLogLog::<u64>::new(4096).unwrap();
        for i in 0..50_000u64 {
            lhs.add(&i);
            rhs.add(&(i + 50_000));
        }
        b.iter_batched(
            || lhs.clone(),
            |mut merged| {
                merged.merge_with(&rhs);
                black_box(merged);
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_add, bench_unique_count, bench_merge);
criterion_main!(benches);
