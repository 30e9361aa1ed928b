use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lrukv::Cache;

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("key:{i}")).collect()
}

fn bench_cached_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hit", |b| {
        let cache = Cache::new(1000);
        let keys = keys(100);
        let value = "x".repeat(1024);

        for key in &keys {
            cache.add(key, &value);
        }

        let mut counter = 0;
        b.iter(|| {
            black_box(cache.get(&keys[counter % 100]));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_get_50_add", |b| {
        let cache = Cache::new(1000);
        let keys = keys(2000);
        let value = "x".repeat(1024);

        for key in &keys[..1000] {
            cache.add(key, &value);
        }

        let mut counter = 0usize;
        b.iter(|| {
            let key = &keys[counter % 2000];
            if counter % 2 == 0 {
                black_box(cache.get(key));
            } else {
                black_box(cache.add(key, &value));
            }
            counter += 1;
        });
    });

    group.finish();
}

fn bench_evicting_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("evicting_add");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("add_over_capacity", |b| {
        let cache = Cache::new(10); // Small cache
        let keys = keys(100);

        let mut counter = 0;
        b.iter(|| {
            // Cycling 100 keys through 10 slots evicts on every add
            black_box(cache.add(&keys[counter % 100], "v"));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_get_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_miss");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_absent", |b| {
        let cache = Cache::new(100);
        for key in keys(100) {
            cache.add(&key, "v");
        }
        let absent = keys(200).split_off(100);

        let mut counter = 0;
        b.iter(|| {
            black_box(cache.get(&absent[counter % 100]));
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_cached_get,
    bench_mixed_50_50,
    bench_evicting_add,
    bench_get_miss
);
criterion_main!(benches);
