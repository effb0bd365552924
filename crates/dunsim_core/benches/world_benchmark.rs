//! Benchmark for chunk lookup and movement.
//!
//! Run with: cargo bench --package dunsim_core --bench world_benchmark

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use dunsim_core::{
    ChunkCoord, Direction, Entropy, EntityFlags, EntityId, EntityKind, SessionRng, World,
    WorldConfig, WorldPos,
};

/// Side of the square of chunks laid out for movement benchmarks.
const GRID_CHUNKS: i32 = 8;

fn populated_world(walkers: i32) -> (World, Vec<EntityId>) {
    let mut world = World::new(&WorldConfig::default());
    for cy in 0..GRID_CHUNKS {
        for cx in 0..GRID_CHUNKS {
            world.insert_chunk(ChunkCoord::new(cx, cy, 0)).unwrap();
        }
    }
    // Rim walls around every chunk.
    for cy in 0..GRID_CHUNKS {
        for cx in 0..GRID_CHUNKS {
            let origin = ChunkCoord::new(cx, cy, 0).origin();
            for i in 0..16 {
                for (x, y) in [(i, 0), (0, i)] {
                    world
                        .create_entity(
                            EntityKind::Wall,
                            1,
                            1,
                            origin.offset(x, y),
                            EntityFlags::ACTIVE | EntityFlags::COLLIDES,
                        )
                        .unwrap();
                }
            }
        }
    }
    let ids = (0..walkers)
        .map(|i| {
            let x = 2 + (i * 5) % (GRID_CHUNKS * 16 - 4);
            let y = 2 + (i * 3) % (GRID_CHUNKS * 16 - 4);
            world
                .create_entity(
                    EntityKind::Creature,
                    1,
                    1,
                    WorldPos::new(x, y, 0),
                    EntityFlags::ACTIVE | EntityFlags::VISIBLE,
                )
                .unwrap()
        })
        .collect();
    (world, ids)
}

fn benchmark_chunk_lookup(c: &mut Criterion) {
    let mut world = World::new(&WorldConfig::default());
    for cy in -16..16 {
        for cx in -16..16 {
            world.insert_chunk(ChunkCoord::new(cx, cy, 0)).unwrap();
        }
    }

    let mut group = c.benchmark_group("chunk_lookup");
    group.throughput(Throughput::Elements(1));
    group.bench_function("hit", |b| {
        let mut i = 0i32;
        b.iter(|| {
            i = i.wrapping_add(7);
            let pos = WorldPos::new(i % 256 - 128, (i / 3) % 256 - 128, 0);
            black_box(world.chunks().query_world(black_box(pos)))
        });
    });
    group.bench_function("miss", |b| {
        let mut i = 0i32;
        b.iter(|| {
            i = i.wrapping_add(1);
            black_box(world.chunks().query(ChunkCoord::new(i % 64, 1000, 3)))
        });
    });
    group.finish();
}

fn benchmark_random_walk(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_walk_tick");

    for walkers in [16, 256, 2048] {
        let (mut world, ids) = populated_world(walkers);
        let mut rng = SessionRng::new(42);

        group.throughput(Throughput::Elements(ids.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(walkers), &walkers, |b, _| {
            b.iter(|| {
                for &id in &ids {
                    let (dx, dy) = Direction::from_index(rng.random_range(0, 4)).delta();
                    black_box(world.move_entity(id, dx, dy).unwrap());
                    world.advance_animation(id, 1.0, 100.0);
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_chunk_lookup, benchmark_random_walk);
criterion_main!(benches);
