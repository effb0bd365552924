//! Benchmark for dungeon generation.
//!
//! Run with: cargo bench --package dunsim_procedural --bench dungeon_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dunsim_core::{SessionRng, World, WorldConfig};
use dunsim_procedural::{populate, DungeonLayout, RoomTemplate};

fn benchmark_layout(c: &mut Criterion) {
    c.bench_function("room_walk_64", |b| {
        let mut rng = SessionRng::new(42);
        b.iter(|| black_box(DungeonLayout::generate(&mut rng, 64)));
    });
}

fn benchmark_populate(c: &mut Criterion) {
    let template = RoomTemplate::standard();
    let mut group = c.benchmark_group("populate");

    for rooms in [10usize, 100] {
        let layout = DungeonLayout::generate(&mut SessionRng::new(0x13), rooms);
        group.throughput(Throughput::Elements(rooms as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rooms), &layout, |b, layout| {
            b.iter(|| {
                let mut world = World::new(&WorldConfig::default());
                black_box(populate(&mut world, &template, layout).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_layout, benchmark_populate);
criterion_main!(benches);
