use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use bitlens::{annotate, resolve_selection, Dump, LogStore, SweepMode};

fn random_trace(bytes: usize, events: usize, seed: u64) -> (Vec<u8>, LogStore) {
    let mut rng = StdRng::seed_from_u64(seed);
    let data: Vec<u8> = (0..bytes).map(|_| rng.gen()).collect();
    let mut store = LogStore::new();
    for i in 0..events {
        let offset = rng.gen_range(0..bytes * 8);
        store.record(offset, format!("event {i}"));
    }
    (data, store)
}

fn bench_annotate(c: &mut Criterion) {
    let mut group = c.benchmark_group("annotate");

    for events in [10usize, 100, 1000] {
        let (data, store) = random_trace(4096, events, 42);
        let snapshot = store.snapshot();
        group.throughput(Throughput::Elements((data.len() * 8) as u64));
        group.bench_function(format!("4096_bytes_{events}_events"), |b| {
            b.iter(|| {
                black_box(annotate(
                    black_box(data.len()),
                    black_box(&snapshot),
                    SweepMode::Trailing,
                ))
            })
        });
    }
    group.finish();
}

fn bench_dump(c: &mut Criterion) {
    let (data, store) = random_trace(4096, 200, 7);
    let map = annotate(data.len(), &store.snapshot(), SweepMode::Trailing);

    let mut group = c.benchmark_group("dump");
    group.throughput(Throughput::Elements((data.len() * 8) as u64));
    group.bench_function("build_4096_bytes", |b| {
        b.iter(|| black_box(Dump::build(black_box(&data), black_box(&map))))
    });
    group.finish();
}

fn bench_selection(c: &mut Criterion) {
    let (data, store) = random_trace(4096, 200, 99);
    let map = annotate(data.len(), &store.snapshot(), SweepMode::Trailing);
    let dump = Dump::build(&data, &map);
    let group_key = map.annotations()[map.annotations().len() / 2].source;

    let mut group = c.benchmark_group("selection");
    group.bench_function("resolve_4096_bytes", |b| {
        b.iter(|| black_box(resolve_selection(black_box(group_key), black_box(&dump))))
    });
    group.finish();
}

criterion_group!(benches, bench_annotate, bench_dump, bench_selection);
criterion_main!(benches);
