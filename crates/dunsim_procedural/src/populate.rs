//! # World Population
//!
//! Lays a room template over every chunk of a layout.

use dunsim_core::{EntityFlags, EntityKind, World, WorldPos, WorldResult};
use tracing::info;

use crate::layout::DungeonLayout;
use crate::room::{RoomTemplate, Tile};

/// Side of a stairs block in tiles.
const STAIRS_DIM: i32 = 2;

/// Summary of one generation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Rooms laid, revisits included.
    pub rooms: usize,
    /// Entities created.
    pub entities: usize,
    /// Chunks that did not exist before.
    pub chunks: usize,
}

/// Entity to create for a template cell, if any.
fn entity_for(template: &RoomTemplate, x: usize, y: usize, tile: Tile) -> Option<(EntityKind, i32, EntityFlags)> {
    let scenery = EntityFlags::ACTIVE | EntityFlags::VISIBLE;
    match tile {
        Tile::Empty => None,
        Tile::Floor => Some((EntityKind::Floor, 1, scenery)),
        Tile::Wall => Some((EntityKind::Wall, 1, scenery | EntityFlags::COLLIDES)),
        Tile::Stairs if template.is_stairs_corner(x, y) => {
            Some((EntityKind::Stairs, STAIRS_DIM, scenery))
        }
        Tile::Stairs => None,
    }
}

/// Creates the entities of every room in `layout`.
///
/// Each room's chunk is inserted first, so rooms with no tiles still exist
/// as map regions. A chunk visited twice gets its room laid twice.
///
/// # Errors
///
/// Propagates the capacity errors of [`World::create_entity`]; the world
/// keeps whatever was created before the failure.
pub fn populate(
    world: &mut World,
    template: &RoomTemplate,
    layout: &DungeonLayout,
) -> WorldResult<GenerationStats> {
    let chunks_before = world.chunks().chunk_count();
    let mut stats = GenerationStats::default();

    for &room in layout.rooms() {
        world.insert_chunk(room)?;
        let origin = room.origin();

        for (x, y, tile) in template.cells() {
            let Some((kind, size, flags)) = entity_for(template, x, y, tile) else {
                continue;
            };
            // Cells are bounded by ROOM_DIM.
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let position: WorldPos = origin.offset(x as i32, y as i32);
            world.create_entity(kind, size, size, position, flags)?;
            stats.entities += 1;
        }
        stats.rooms += 1;
    }

    stats.chunks = world.chunks().chunk_count() - chunks_before;
    info!(
        rooms = stats.rooms,
        entities = stats.entities,
        chunks = stats.chunks,
        "dungeon populated"
    );
    Ok(stats)
}
