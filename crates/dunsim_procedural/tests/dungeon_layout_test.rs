//! # Dungeon Layout Integration Test
//!
//! Generates whole dungeons and walks around in them.

use dunsim_core::{
    ChunkCoord, EntityFlags, EntityKind, SessionRng, World, WorldConfig, WorldPos,
};
use dunsim_procedural::{populate, DungeonLayout, RoomTemplate, Tile};

fn generate(seed: u64, rooms: usize) -> (World, DungeonLayout) {
    let mut rng = SessionRng::new(seed);
    let layout = DungeonLayout::generate(&mut rng, rooms);
    let mut world = World::new(&WorldConfig::default());
    populate(&mut world, &RoomTemplate::standard(), &layout).unwrap();
    (world, layout)
}

/// Test: Same seed, same dungeon.
#[test]
fn test_generation_is_deterministic() {
    let (a_world, a_layout) = generate(0x13, 10);
    let (b_world, b_layout) = generate(0x13, 10);

    assert_eq!(a_layout, b_layout);
    assert_eq!(a_world.entities().len(), b_world.entities().len());
    for ((_, a), (_, b)) in a_world.entities().iter().zip(b_world.entities().iter()) {
        assert_eq!(a, b);
    }
}

/// Test: Consecutive rooms are neighbors or stacked floors.
#[test]
fn test_rooms_form_a_connected_walk() {
    for seed in 0..32 {
        let (_, layout) = generate(seed, 24);
        for pair in layout.rooms().windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let steps = (a.x - b.x).abs() + (a.y - b.y).abs();
            if a.floor == b.floor {
                assert_eq!(steps, 1, "seed {seed}: {a} -> {b}");
            } else {
                assert_eq!(steps, 0, "seed {seed}: {a} -> {b}");
                assert!(matches!((a.floor, b.floor), (0, 1) | (1, 0)));
            }
        }
    }
}

/// Test: Entity counts follow the template.
#[test]
fn test_entity_count_matches_rooms() {
    let template = RoomTemplate::standard();
    let per_room = template.count(Tile::Floor) + template.count(Tile::Wall) + 1;

    let mut rng = SessionRng::new(7);
    let layout = DungeonLayout::generate(&mut rng, 10);
    let mut world = World::new(&WorldConfig::default());
    let stats = populate(&mut world, &template, &layout).unwrap();

    assert_eq!(stats.rooms, 10);
    assert_eq!(stats.entities, per_room * 10);
    assert_eq!(stats.chunks, layout.distinct_chunks());
    assert!(world.membership_consistent());
}

/// Test: The rim walls keep a player inside the room.
#[test]
fn test_rim_walls_hold_the_player() {
    let layout = DungeonLayout::from_rooms(vec![ChunkCoord::new(0, 0, 0)]);
    let mut world = World::new(&WorldConfig::default());
    populate(&mut world, &RoomTemplate::standard(), &layout).unwrap();

    let player = world
        .create_entity(
            EntityKind::Player,
            1,
            1,
            WorldPos::new(2, 7, 0),
            EntityFlags::ACTIVE | EntityFlags::VISIBLE | EntityFlags::COLLIDES,
        )
        .unwrap();

    for _ in 0..12 {
        assert!(world.move_entity(player, 1, 0).unwrap());
        world.advance_animation(player, 1.0, 10.0);
    }
    assert_eq!(world.entity(player).position, WorldPos::new(14, 7, 0));
    assert!(!world.move_entity(player, 1, 0).unwrap());

    // Pillar at (4, 4)..(6, 6).
    world.relocate(player, WorldPos::new(3, 4, 0)).unwrap();
    assert!(!world.move_entity(player, 1, 0).unwrap());
    assert!(world.membership_consistent());
}

/// Test: Stairs lead to the room stacked on the other floor.
#[test]
fn test_stairs_between_stacked_rooms() {
    let layout = DungeonLayout::from_rooms(vec![ChunkCoord::new(0, 0, 0), ChunkCoord::new(0, 0, 1)]);
    let mut world = World::new(&WorldConfig::default());
    populate(&mut world, &RoomTemplate::standard(), &layout).unwrap();

    let player = world
        .create_entity(
            EntityKind::Player,
            1,
            1,
            WorldPos::new(11, 2, 0),
            EntityFlags::ACTIVE | EntityFlags::VISIBLE | EntityFlags::COLLIDES,
        )
        .unwrap();

    assert!(world.move_entity(player, 1, 0).unwrap());
    assert_eq!(world.entity(player).position, WorldPos::new(12, 2, 1));
}
