//! # Entity Table
//!
//! A flat, append-only array of entity records. The index of a record is
//! its [`EntityId`]; slot 0 holds the null entity.

use crate::error::{WorldError, WorldResult};
use crate::map::WorldPos;

use super::animation::{Animation, Direction};
use super::id::EntityId;
use super::kind::{EntityFlags, EntityKind};

/// One placed object in the world.
///
/// The box covers tiles `[x, x + width) x [y, y + height)` on `position.floor`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Entity {
    /// What this entity is.
    pub kind: EntityKind,
    /// Active / visible / collides bits.
    pub flags: EntityFlags,
    /// Box width in tiles.
    pub width: i32,
    /// Box height in tiles.
    pub height: i32,
    /// Top-left tile of the box.
    pub position: WorldPos,
    /// Facing and slide state.
    pub animation: Animation,
}

impl Entity {
    /// Creates a new entity record.
    #[must_use]
    pub const fn new(
        kind: EntityKind,
        width: i32,
        height: i32,
        position: WorldPos,
        flags: EntityFlags,
    ) -> Self {
        Self {
            kind,
            flags,
            width,
            height,
            position,
            animation: Animation {
                facing: Direction::None,
                offset_x: 0.0,
                offset_y: 0.0,
            },
        }
    }

    /// Active and collision-flagged.
    #[inline]
    #[must_use]
    pub const fn has_collision(&self) -> bool {
        self.flags
            .contains(EntityFlags::ACTIVE.union(EntityFlags::COLLIDES))
    }

    /// Active and visible.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.flags
            .contains(EntityFlags::ACTIVE.union(EntityFlags::VISIBLE))
    }

    /// Participates in the simulation.
    #[inline]
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.flags.contains(EntityFlags::ACTIVE)
    }

    /// A slide is still in progress.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_animating()
    }

    /// Sets the active flag.
    #[inline]
    pub fn activate(&mut self) {
        self.flags.insert(EntityFlags::ACTIVE);
    }

    /// Clears the active flag.
    #[inline]
    pub fn deactivate(&mut self) {
        self.flags.remove(EntityFlags::ACTIVE);
    }
}

/// Append-only entity storage with a fixed capacity.
///
/// Records are only ever added through [`crate::World::create_entity`], which
/// also registers them in their chunk, so every record in the table is
/// present in exactly one membership list.
pub struct EntityTable {
    /// All records, slot 0 being the null entity.
    entities: Vec<Entity>,
    /// Maximum number of records, null slot included.
    capacity: usize,
}

impl EntityTable {
    /// Creates a table with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if capacity is below 2 (null slot plus one entity) or exceeds
    /// `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity >= 2, "Capacity must leave room past the null entity");
        assert!(
            capacity <= u32::MAX as usize,
            "Capacity cannot exceed u32::MAX"
        );

        let mut entities = Vec::with_capacity(capacity);
        entities.push(Entity::default());

        Self { entities, capacity }
    }

    /// Returns the maximum capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of live entities (the null slot excluded).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len() - 1
    }

    /// Checks if no entity has been created yet.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the id the next created entity will receive.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityTableFull`] if the table is at capacity.
    pub fn next_id(&self) -> WorldResult<EntityId> {
        if self.entities.len() == self.capacity {
            return Err(WorldError::EntityTableFull {
                capacity: self.capacity,
            });
        }
        // Bounded by the u32 capacity check in `new`.
        #[allow(clippy::cast_possible_truncation)]
        Ok(EntityId::new(self.entities.len() as u32))
    }

    /// Appends a record, returning its id.
    pub(crate) fn push(&mut self, entity: Entity) -> WorldResult<EntityId> {
        let id = self.next_id()?;
        self.entities.push(entity);
        Ok(id)
    }

    /// Checks if `id` names a created entity.
    #[inline]
    #[must_use]
    pub fn contains(&self, id: EntityId) -> bool {
        !id.is_null() && (id.index() as usize) < self.entities.len()
    }

    /// Gets an entity by id.
    ///
    /// # Panics
    ///
    /// Panics on the null id or an id that was never created. Both are
    /// programmer errors.
    #[inline]
    #[must_use]
    pub fn get(&self, id: EntityId) -> &Entity {
        assert!(self.contains(id), "invalid entity id {id}");
        &self.entities[id.index() as usize]
    }

    /// Gets an entity mutably by id.
    ///
    /// # Panics
    ///
    /// Panics on the null id or an id that was never created.
    #[inline]
    pub fn get_mut(&mut self, id: EntityId) -> &mut Entity {
        assert!(self.contains(id), "invalid entity id {id}");
        &mut self.entities[id.index() as usize]
    }

    /// Gets an entity by id, or None for null/unknown ids.
    #[inline]
    #[must_use]
    pub fn try_get(&self, id: EntityId) -> Option<&Entity> {
        if self.contains(id) {
            Some(&self.entities[id.index() as usize])
        } else {
            None
        }
    }

    /// Iterates over all live entity ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> {
        // Bounded by the u32 capacity check in `new`.
        #[allow(clippy::cast_possible_truncation)]
        let end = self.entities.len() as u32;
        (1..end).map(EntityId::new)
    }

    /// Iterates over all live entities with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, &Entity)> {
        self.ids().zip(self.entities[1..].iter())
    }
}
