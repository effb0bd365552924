//! # Dungeon World
//!
//! The simulation context: the entity table and the chunk map, owned
//! together so that every write keeps them in agreement.
//!
//! Each entity id is listed in exactly one chunk, the one containing its
//! position. [`World::create_entity`], [`World::relocate`] and the movement
//! resolver are the only code paths that change positions, and each of them
//! repairs membership before returning.

use tracing::debug;

use crate::config::WorldConfig;
use crate::entity::{Entity, EntityFlags, EntityId, EntityKind, EntityTable};
use crate::error::{WorldError, WorldResult};
use crate::map::{ChunkCoord, ChunkHandle, ChunkMap, WorldPos};

/// Entities plus the sparse map they live in.
///
/// # Example
///
/// ```rust,ignore
/// let mut world = World::new(&WorldConfig::default());
/// let wall = world.create_entity(
///     EntityKind::Wall,
///     1,
///     1,
///     WorldPos::new(3, 4, 0),
///     EntityFlags::ACTIVE | EntityFlags::VISIBLE | EntityFlags::COLLIDES,
/// )?;
/// assert!(world.entity(wall).has_collision());
/// ```
pub struct World {
    entities: EntityTable,
    chunks: ChunkMap,
}

impl World {
    /// Creates an empty world with the configured capacities.
    ///
    /// # Panics
    ///
    /// Panics if the configuration does not pass [`WorldConfig::validate`].
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        Self {
            entities: EntityTable::new(config.entity_capacity),
            chunks: ChunkMap::new(config),
        }
    }

    /// Read access to the entity table.
    #[inline]
    #[must_use]
    pub const fn entities(&self) -> &EntityTable {
        &self.entities
    }

    /// Read access to the chunk map.
    #[inline]
    #[must_use]
    pub const fn chunks(&self) -> &ChunkMap {
        &self.chunks
    }

    /// Gets an entity by id.
    ///
    /// # Panics
    ///
    /// Panics on the null id or an id that was never created.
    #[inline]
    #[must_use]
    pub fn entity(&self, id: EntityId) -> &Entity {
        self.entities.get(id)
    }

    /// Mutable entity access for the resolver. Positions must not be
    /// written through this outside the membership-aware paths.
    #[inline]
    pub(crate) fn entity_mut(&mut self, id: EntityId) -> &mut Entity {
        self.entities.get_mut(id)
    }

    /// Creates a chunk ahead of any entity, e.g. while laying out rooms.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ChunkTableFull`] when the table cannot take it.
    pub fn insert_chunk(&mut self, chunk: ChunkCoord) -> WorldResult<ChunkHandle> {
        self.chunks.insert(chunk)
    }

    /// Appends an entity and lists it in the chunk containing `position`,
    /// creating that chunk if needed.
    ///
    /// # Errors
    ///
    /// - [`WorldError::EntityTableFull`] when the table is at capacity
    /// - [`WorldError::ChunkTableFull`] when the chunk cannot be created
    /// - [`WorldError::ArenaExhausted`] when membership needs a bucket and
    ///   none is left
    ///
    /// On error no entity is added.
    pub fn create_entity(
        &mut self,
        kind: EntityKind,
        width: i32,
        height: i32,
        position: WorldPos,
        flags: EntityFlags,
    ) -> WorldResult<EntityId> {
        let id = self.entities.next_id()?;
        let chunk = self.chunks.insert_world(position)?;
        self.chunks.update_membership(id, None, chunk)?;
        self.entities
            .push(Entity::new(kind, width, height, position, flags))
    }

    /// Returns the chunk an entity is listed in.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::MissingChunk`] if the chunk containing the
    /// entity's position is not in the map, which cannot happen while the
    /// membership invariant holds.
    pub fn chunk_of(&self, id: EntityId) -> WorldResult<ChunkHandle> {
        let chunk = self.entities.get(id).position.chunk();
        self.chunks
            .query(chunk)
            .ok_or(WorldError::MissingChunk { chunk })
    }

    /// Teleports an entity, creating the destination chunk if needed.
    ///
    /// Slide offsets are left alone.
    ///
    /// # Errors
    ///
    /// Fails with the capacity and corruption errors of
    /// [`ChunkMap::update_membership`] and [`ChunkMap::insert`]. The
    /// position is only written once membership has moved.
    pub fn relocate(&mut self, id: EntityId, position: WorldPos) -> WorldResult<()> {
        let old = self.chunk_of(id)?;
        let new = self.chunks.insert_world(position)?;
        if old != new {
            self.chunks.update_membership(id, Some(old), new)?;
        }
        let entity = self.entities.get_mut(id);
        if entity.position.floor != position.floor {
            debug!(entity = %id, from = entity.position.floor, to = position.floor, "relocated across floors");
        }
        entity.position = position;
        Ok(())
    }

    /// Writes a position the resolver already validated, moving membership
    /// when the chunk changes. Both chunks must exist.
    pub(crate) fn commit_position(&mut self, id: EntityId, position: WorldPos) -> WorldResult<()> {
        let old = self.chunk_of(id)?;
        let chunk = position.chunk();
        let new = self
            .chunks
            .query(chunk)
            .ok_or(WorldError::MissingChunk { chunk })?;
        if old != new {
            self.chunks.update_membership(id, Some(old), new)?;
        }
        self.entities.get_mut(id).position = position;
        Ok(())
    }

    /// Sets an entity's active flag.
    #[inline]
    pub fn activate(&mut self, id: EntityId) {
        self.entities.get_mut(id).activate();
    }

    /// Clears an entity's active flag.
    #[inline]
    pub fn deactivate(&mut self, id: EntityId) {
        self.entities.get_mut(id).deactivate();
    }

    /// Checks that every entity is listed exactly once, in the chunk
    /// containing its position.
    ///
    /// Walks the whole world; meant for tests and debug assertions.
    #[must_use]
    pub fn membership_consistent(&self) -> bool {
        let mut listings = vec![0u32; self.entities.len() + 1];
        for slot in 0..self.chunks.slot_capacity() {
            let Some(handle) = self.chunks.handle_at(slot) else {
                continue;
            };
            let coord = self.chunks.coord(handle);
            for id in self.chunks.members(handle) {
                match self.entities.try_get(id) {
                    Some(entity) if entity.position.chunk() == coord => {
                        listings[id.index() as usize] += 1;
                    }
                    _ => return false,
                }
            }
        }
        listings.iter().skip(1).all(|&count| count == 1)
    }
}
