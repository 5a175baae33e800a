use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use streamsketch::membership::{BloomFilter, CuckooFilter};

/// Benchmark: Bloom add and lookup at 1% target rate
fn bench_bloom(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom");

    for capacity in [10_000usize, 1_000_000] {
        group.bench_with_input(
            BenchmarkId::new("add", capacity),
            &capacity,
            |b, &capacity| {
                let mut filter = BloomFilter::<u64>::new(capacity, 0.01).unwrap();
                let mut item = 0u64;
                b.iter(|| {
                    filter.add(black_box(&item));
                    item += 1;
                });
            },
        );

        group.bench_with_input(
            BenchmarkId::new("contains", capacity),
            &capacity,
            |b, &capacity| {
                let mut filter = BloomFilter::<u64>::new(capacity, 0.01).unwrap();
                for i in 0..capacity as u64 {
                    filter.add(&i);
                }
                let mut probe = 0u64;
                b.iter(|| {
                    let hit = filter.contains(black_box(&probe));
                    probe += 1;
                    black_box(hit)
                });
            },
        );
    }

    group.finish();
}

/// Benchmark: cuckoo add, lookup, delete at moderate load
fn bench_cuckoo(c: &mut Criterion) {
    let mut group = c.benchmark_group("cuckoo");
    let capacity = 100_000usize;
    let bit_budget = 16 * capacity;

    group.bench_function("add", |b| {
        b.iter_batched(
            || CuckooFilter::<u64>::new(capacity, bit_budget, 0.01).unwrap(),
            |mut filter| {
                for i in 0..50_000u64 {
                    let _ = filter.add(black_box(&i));
                }
                black_box(filter);
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("contains", |b| {
        let mut filter = CuckooFilter::<u64>::new(capacity, bit_budget, 0.01).unwrap();
        for i in 0..50_000u64 {
            filter.add(&i).unwrap();
        }
        let mut probe = 0u64;
        b.iter(|| {
            let hit = filter.contains(black_box(&probe));
            probe += 1;
            black_box(hit)
        });
    });

    group.bench_function("delete", |b| {
        b.iter_batched(
            || {
                let mut filter = CuckooFilter::<u64>::new(capacity, bit_budget, 0.01).unwrap();
                for i in 0..50_000u64 {
                    filter.add(&i).unwrap();
                }
                filter
            },
            |mut filter| {
                for i in 0..50_000u64 {
                    filter.delete(black_box(&i));
                }
                black_box(filter);
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_bloom, bench_cuckoo);
criterion_main!(benches);
