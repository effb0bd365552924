//! # Presentation View
//!
//! Read-only queries the presentation layer runs against the world each
//! frame. Everything is in world tiles; conversion to pixels happens in the
//! presentation layer.
//!
//! The view covers the camera's chunk and its eight neighbors on the
//! camera's floor:
//!
//! ```text
//!   +-----+-----+-----+
//!   |-1,-1| 0,-1| 1,-1|
//!   +-----+-----+-----+
//!   |-1, 0| cam | 1, 0|
//!   +-----+-----+-----+
//!   |-1, 1| 0, 1| 1, 1|
//!   +-----+-----+-----+
//! ```

use bytemuck::{Pod, Zeroable};
use dunsim_core::{Entity, EntityId, EntityKind, World, WorldPos};

/// One drawable entity.
///
/// Laid out for direct upload into an instance buffer.
///
/// Size: 28 bytes
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct SpriteInstance {
    /// World-space x, slide included.
    pub x: f32,
    /// World-space y, slide included.
    pub y: f32,
    /// Width in tiles.
    pub width: f32,
    /// Height in tiles.
    pub height: f32,
    /// [`EntityKind`] discriminant.
    pub kind: u32,
    /// [`dunsim_core::Direction`] discriminant.
    pub facing: u32,
    /// [`dunsim_core::RenderLayer`] discriminant.
    pub layer: u32,
}

impl SpriteInstance {
    /// Builds the instance for an entity.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_entity(entity: &Entity) -> Self {
        let position = entity.position;
        Self {
            x: position.x as f32 - entity.animation.offset_x,
            y: position.y as f32 - entity.animation.offset_y,
            width: entity.width as f32,
            height: entity.height as f32,
            kind: u32::from(entity.kind as u8),
            facing: u32::from(entity.animation.facing as u8),
            layer: u32::from(entity.kind.capabilities().render_layer as u8),
        }
    }
}

/// A non-scenery entity standing in a chunk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Occupant {
    /// The entity.
    pub id: EntityId,
    /// What it is.
    pub kind: EntityKind,
    /// Where it is.
    pub position: WorldPos,
}

/// Frame queries over a [`World`].
pub struct ViewQuery;

impl ViewQuery {
    /// Visible entities around the camera, background first.
    ///
    /// Entities are listed through chunk membership, so only the nine
    /// chunks around the camera are touched regardless of world size.
    #[must_use]
    pub fn around(world: &World, camera: EntityId) -> Vec<SpriteInstance> {
        let center = world.entity(camera).position;
        let chunks = world.chunks();
        let home = center.chunk();

        let mut sprites = Vec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                let Some(handle) = chunks.query(home.offset(dx, dy)) else {
                    continue;
                };
                sprites.extend(
                    chunks
                        .members(handle)
                        .map(|id| world.entity(id))
                        .filter(|entity| entity.is_visible() && entity.position.floor == center.floor)
                        .map(SpriteInstance::from_entity),
                );
            }
        }
        sprites.sort_by_key(|sprite| sprite.layer);
        sprites
    }

    /// Active non-scenery entities in the chunk containing `position`.
    #[must_use]
    pub fn chunk_occupants(world: &World, position: WorldPos) -> Vec<Occupant> {
        let chunks = world.chunks();
        let Some(handle) = chunks.query_world(position) else {
            return Vec::new();
        };
        chunks
            .members(handle)
            .filter_map(|id| {
                let entity = world.entity(id);
                (entity.is_active() && !entity.kind.capabilities().is_scenery).then_some(Occupant {
                    id,
                    kind: entity.kind,
                    position: entity.position,
                })
            })
            .collect()
    }
}
