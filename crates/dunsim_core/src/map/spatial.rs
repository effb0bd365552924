//! # Chunk Hash Map
//!
//! Open addressing with an odd probe step taken from the high hash bits.
//! The step is coprime with the power-of-two slot count, so a probe
//! sequence visits every slot before repeating.

use tracing::debug;

use crate::config::WorldConfig;
use crate::entity::EntityId;
use crate::error::{WorldError, WorldResult};
use crate::memory::{Arena, ArenaHandle};

use super::coord::{ChunkCoord, WorldPos};
use super::hash::hash_chunk;

/// Entity ids held by one bucket node.
pub const BUCKET_CAPACITY: usize = 32;

/// A fixed block of chunk membership, chained to older blocks.
#[derive(Clone, Copy, Debug, Default)]
pub struct BucketNode {
    ids: [EntityId; BUCKET_CAPACITY],
    count: usize,
    next: Option<ArenaHandle<BucketNode>>,
}

impl BucketNode {
    /// Returns the live ids of this node. Order is not meaningful.
    #[inline]
    #[must_use]
    pub fn ids(&self) -> &[EntityId] {
        &self.ids[..self.count]
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.count == BUCKET_CAPACITY
    }

    #[inline]
    fn push(&mut self, id: EntityId) {
        self.ids[self.count] = id;
        self.count += 1;
    }

    /// Removes `id` by moving the last live entry into its place.
    fn swap_remove(&mut self, id: EntityId) -> bool {
        let Some(index) = self.ids().iter().position(|&member| member == id) else {
            return false;
        };
        self.count -= 1;
        self.ids[index] = self.ids[self.count];
        self.ids[self.count] = EntityId::NULL;
        true
    }
}

/// Handle to an existing chunk (its slot in the table).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChunkHandle(u32);

impl ChunkHandle {
    /// Returns the slot index.
    #[inline]
    #[must_use]
    pub const fn slot(self) -> u32 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Slot {
    occupied: bool,
    coord: ChunkCoord,
    head: Option<ArenaHandle<BucketNode>>,
}

enum Probe {
    Found(u32),
    Vacant(u32),
    Exhausted,
}

/// Sparse chunk index with per-chunk entity membership.
///
/// Chunks are only ever added. Once a chunk exists it stays for the session,
/// so "does this chunk exist" answers are stable.
pub struct ChunkMap {
    /// Fixed slot table.
    slots: Box<[Slot]>,
    /// Slot count as a power of two.
    slots_log2: u32,
    /// Probe bound per lookup.
    max_probe_attempts: u32,
    /// Storage for membership buckets.
    buckets: Arena<BucketNode>,
    /// Number of occupied slots.
    chunk_count: usize,
}

impl ChunkMap {
    /// Creates an empty map sized from the world configuration.
    ///
    /// # Panics
    ///
    /// Panics if the configuration does not pass [`WorldConfig::validate`].
    #[must_use]
    pub fn new(config: &WorldConfig) -> Self {
        assert!(config.validate().is_ok(), "invalid world config: {config:?}");

        Self {
            slots: vec![Slot::default(); config.chunk_slots()].into_boxed_slice(),
            slots_log2: config.chunk_slots_log2,
            max_probe_attempts: config.max_probe_attempts,
            buckets: Arena::new(config.bucket_arena_nodes),
            chunk_count: 0,
        }
    }

    /// Returns the number of chunks created so far.
    #[inline]
    #[must_use]
    pub const fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// Returns the number of slots in the table.
    #[inline]
    #[must_use]
    pub fn slot_capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of bucket nodes allocated.
    #[inline]
    #[must_use]
    pub fn bucket_nodes_used(&self) -> usize {
        self.buckets.used()
    }

    #[allow(clippy::cast_possible_truncation)]
    fn probe(&self, chunk: ChunkCoord) -> Probe {
        let hash = hash_chunk(chunk);
        let mask = (1u32 << self.slots_log2) - 1;
        let step = ((hash >> (64 - self.slots_log2)) as u32) | 1;

        let mut index = (hash as u32) & mask;
        for _ in 0..self.max_probe_attempts {
            let slot = &self.slots[index as usize];
            if !slot.occupied {
                return Probe::Vacant(index);
            }
            if slot.coord == chunk {
                return Probe::Found(index);
            }
            index = index.wrapping_add(step) & mask;
        }
        Probe::Exhausted
    }

    /// Finds a chunk, optionally creating it.
    ///
    /// # Returns
    ///
    /// The chunk's handle; `None` if it does not exist and `insert` is false.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ChunkTableFull`] if `insert` is set and the probe
    /// bound runs out before a free slot turns up. A query that runs out of
    /// probes reports the chunk as absent: an insert of that chunk would
    /// have failed the same way, so it cannot be in the table.
    pub fn find_or_insert(
        &mut self,
        chunk: ChunkCoord,
        insert: bool,
    ) -> WorldResult<Option<ChunkHandle>> {
        match self.probe(chunk) {
            Probe::Found(index) => Ok(Some(ChunkHandle(index))),
            Probe::Vacant(index) if insert => {
                let slot = &mut self.slots[index as usize];
                slot.occupied = true;
                slot.coord = chunk;
                slot.head = None;
                self.chunk_count += 1;
                debug!(%chunk, slot = index, "chunk created");
                Ok(Some(ChunkHandle(index)))
            }
            Probe::Vacant(_) => Ok(None),
            Probe::Exhausted if insert => Err(WorldError::ChunkTableFull {
                chunk,
                attempts: self.max_probe_attempts,
            }),
            Probe::Exhausted => Ok(None),
        }
    }

    /// Looks up an existing chunk.
    #[inline]
    #[must_use]
    pub fn query(&self, chunk: ChunkCoord) -> Option<ChunkHandle> {
        match self.probe(chunk) {
            Probe::Found(index) => Some(ChunkHandle(index)),
            Probe::Vacant(_) | Probe::Exhausted => None,
        }
    }

    /// Finds or creates a chunk.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ChunkTableFull`] when the table cannot take it.
    #[inline]
    pub fn insert(&mut self, chunk: ChunkCoord) -> WorldResult<ChunkHandle> {
        self.find_or_insert(chunk, true)?
            .ok_or(WorldError::ChunkTableFull {
                chunk,
                attempts: self.max_probe_attempts,
            })
    }

    /// Looks up the chunk containing a world position.
    #[inline]
    #[must_use]
    pub fn query_world(&self, pos: WorldPos) -> Option<ChunkHandle> {
        self.query(pos.chunk())
    }

    /// Finds or creates the chunk containing a world position.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::ChunkTableFull`] when the table cannot take it.
    #[inline]
    pub fn insert_world(&mut self, pos: WorldPos) -> WorldResult<ChunkHandle> {
        self.insert(pos.chunk())
    }

    /// Returns the handle of the chunk in slot `slot`, if that slot is taken.
    #[must_use]
    pub fn handle_at(&self, slot: usize) -> Option<ChunkHandle> {
        let occupied = self.slots.get(slot)?.occupied;
        // Slot counts are bounded by the 2^24 config limit.
        #[allow(clippy::cast_possible_truncation)]
        occupied.then_some(ChunkHandle(slot as u32))
    }

    /// Returns the coordinate stored in a chunk's slot.
    #[inline]
    #[must_use]
    pub fn coord(&self, handle: ChunkHandle) -> ChunkCoord {
        self.slots[handle.0 as usize].coord
    }

    /// Iterates over the ids in a chunk's membership chain.
    #[must_use]
    pub fn members(&self, handle: ChunkHandle) -> Members<'_> {
        Members {
            buckets: &self.buckets,
            node: self.slots[handle.0 as usize].head,
            index: 0,
        }
    }

    /// Returns the number of ids in a chunk's membership chain.
    #[must_use]
    pub fn member_count(&self, handle: ChunkHandle) -> usize {
        let mut count = 0;
        let mut node = self.slots[handle.0 as usize].head;
        while let Some(current) = node {
            let bucket = self.buckets.get(current);
            count += bucket.count;
            node = bucket.next;
        }
        count
    }

    /// Moves an entity's membership from `old` (if any) to `new`.
    ///
    /// This is the only writer of membership lists.
    ///
    /// # Errors
    ///
    /// - [`WorldError::MembershipCorrupted`] if `old` is given but does not
    ///   list the entity. Nothing is changed in that case.
    /// - [`WorldError::ArenaExhausted`] if `new` needs another bucket and the
    ///   arena is out of nodes.
    pub fn update_membership(
        &mut self,
        entity: EntityId,
        old: Option<ChunkHandle>,
        new: ChunkHandle,
    ) -> WorldResult<()> {
        // Reserve room first so a failed allocation leaves both lists intact.
        let head = self.slots[new.0 as usize].head;
        let needs_bucket = head.map_or(true, |h| self.buckets.get(h).is_full());
        if needs_bucket && self.buckets.remaining() == 0 {
            return Err(WorldError::ArenaExhausted {
                capacity: self.buckets.capacity(),
            });
        }

        if let Some(old) = old {
            self.remove_member(entity, old)?;
        }

        let head = if needs_bucket {
            let node = self.buckets.alloc().ok_or(WorldError::ArenaExhausted {
                capacity: self.buckets.capacity(),
            })?;
            let slot = &mut self.slots[new.0 as usize];
            self.buckets.get_mut(node).next = slot.head;
            slot.head = Some(node);
            debug!(chunk = %slot.coord, node = node.index(), "membership bucket added");
            node
        } else {
            // needs_bucket is false only when a head exists.
            head.ok_or(WorldError::MissingChunk {
                chunk: self.coord(new),
            })?
        };
        self.buckets.get_mut(head).push(entity);
        Ok(())
    }

    fn remove_member(&mut self, entity: EntityId, chunk: ChunkHandle) -> WorldResult<()> {
        let mut node = self.slots[chunk.0 as usize].head;
        while let Some(current) = node {
            let bucket = self.buckets.get_mut(current);
            if bucket.swap_remove(entity) {
                return Ok(());
            }
            node = bucket.next;
        }
        Err(WorldError::MembershipCorrupted {
            entity,
            chunk: self.coord(chunk),
        })
    }

    /// Drops every chunk and bucket. Only for world-reset boundaries.
    pub fn reset(&mut self) {
        self.slots.fill(Slot::default());
        self.buckets.reset();
        self.chunk_count = 0;
    }
}

/// Iterator over the ids in one chunk's membership chain.
pub struct Members<'a> {
    buckets: &'a Arena<BucketNode>,
    node: Option<ArenaHandle<BucketNode>>,
    index: usize,
}

impl Iterator for Members<'_> {
    type Item = EntityId;

    fn next(&mut self) -> Option<EntityId> {
        loop {
            let bucket = self.buckets.get(self.node?);
            if let Some(&id) = bucket.ids().get(self.index) {
                self.index += 1;
                return Some(id);
            }
            self.node = bucket.next;
            self.index = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_map() -> ChunkMap {
        ChunkMap::new(&WorldConfig {
            chunk_slots_log2: 6,
            max_probe_attempts: 64,
            entity_capacity: 1024,
            bucket_arena_nodes: 64,
        })
    }

    #[test]
    fn test_query_before_insert_is_absent() {
        let map = small_map();
        assert!(map.query(ChunkCoord::new(0, 0, 0)).is_none());
        assert_eq!(map.chunk_count(), 0);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut map = small_map();
        let chunk = ChunkCoord::new(-2, 5, 1);
        let a = map.insert(chunk).unwrap();
        let b = map.insert(chunk).unwrap();
        assert_eq!(a, b);
        assert_eq!(map.query(chunk), Some(a));
        assert_eq!(map.coord(a), chunk);
        assert_eq!(map.chunk_count(), 1);
    }

    #[test]
    fn test_find_or_insert_query_mode_does_not_create() {
        let mut map = small_map();
        let chunk = ChunkCoord::new(3, 3, 0);
        assert_eq!(map.find_or_insert(chunk, false).unwrap(), None);
        assert_eq!(map.chunk_count(), 0);
        assert!(map.find_or_insert(chunk, true).unwrap().is_some());
    }

    #[test]
    fn test_world_lookup_uses_chunk_of_tile() {
        let mut map = small_map();
        let handle = map.insert_world(WorldPos::new(-1, 17, 0)).unwrap();
        assert_eq!(map.coord(handle), ChunkCoord::new(-1, 1, 0));
        assert_eq!(map.query_world(WorldPos::new(-16, 31, 0)), Some(handle));
        assert!(map.query_world(WorldPos::new(0, 17, 0)).is_none());
    }

    #[test]
    fn test_full_table_is_an_error() {
        let mut map = ChunkMap::new(&WorldConfig {
            chunk_slots_log2: 2,
            max_probe_attempts: 100,
            entity_capacity: 16,
            bucket_arena_nodes: 4,
        });
        for x in 0..4 {
            map.insert(ChunkCoord::new(x, 0, 0)).unwrap();
        }
        let err = map.insert(ChunkCoord::new(99, 0, 0)).unwrap_err();
        assert!(matches!(err, WorldError::ChunkTableFull { .. }));
        // Queries for missing chunks still answer.
        assert!(map.query(ChunkCoord::new(99, 0, 0)).is_none());
        assert!(map.query(ChunkCoord::new(2, 0, 0)).is_some());
    }

    #[test]
    fn test_membership_grows_past_one_bucket() {
        let mut map = small_map();
        let chunk = map.insert(ChunkCoord::new(0, 0, 0)).unwrap();
        let total = BUCKET_CAPACITY * 2 + 3;
        for index in 1..=total {
            let id = EntityId::new(u32::try_from(index).unwrap());
            map.update_membership(id, None, chunk).unwrap();
        }
        assert_eq!(map.member_count(chunk), total);
        assert_eq!(map.bucket_nodes_used(), 3);

        let mut ids: Vec<u32> = map.members(chunk).map(EntityId::index).collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=u32::try_from(total).unwrap()).collect::<Vec<_>>());
    }

    #[test]
    fn test_move_between_chunks() {
        let mut map = small_map();
        let a = map.insert(ChunkCoord::new(0, 0, 0)).unwrap();
        let b = map.insert(ChunkCoord::new(1, 0, 0)).unwrap();
        for index in 1..=5 {
            map.update_membership(EntityId::new(index), None, a).unwrap();
        }

        map.update_membership(EntityId::new(3), Some(a), b).unwrap();
        assert_eq!(map.member_count(a), 4);
        assert_eq!(map.member_count(b), 1);
        assert!(!map.members(a).any(|id| id == EntityId::new(3)));
        assert_eq!(map.members(b).collect::<Vec<_>>(), [EntityId::new(3)]);
    }

    #[test]
    fn test_missing_member_is_corruption() {
        let mut map = small_map();
        let a = map.insert(ChunkCoord::new(0, 0, 0)).unwrap();
        let b = map.insert(ChunkCoord::new(0, 1, 0)).unwrap();
        map.update_membership(EntityId::new(1), None, a).unwrap();

        let err = map
            .update_membership(EntityId::new(9), Some(a), b)
            .unwrap_err();
        assert_eq!(
            err,
            WorldError::MembershipCorrupted {
                entity: EntityId::new(9),
                chunk: ChunkCoord::new(0, 0, 0),
            }
        );
        assert_eq!(map.member_count(a), 1);
        assert_eq!(map.member_count(b), 0);
    }

    #[test]
    fn test_arena_exhaustion_is_an_error() {
        let mut map = ChunkMap::new(&WorldConfig {
            chunk_slots_log2: 4,
            max_probe_attempts: 16,
            entity_capacity: 128,
            bucket_arena_nodes: 1,
        });
        let chunk = map.insert(ChunkCoord::new(0, 0, 0)).unwrap();
        for index in 1..=BUCKET_CAPACITY {
            let id = EntityId::new(u32::try_from(index).unwrap());
            map.update_membership(id, None, chunk).unwrap();
        }
        let err = map
            .update_membership(EntityId::new(999), None, chunk)
            .unwrap_err();
        assert_eq!(err, WorldError::ArenaExhausted { capacity: 1 });
        assert_eq!(map.member_count(chunk), BUCKET_CAPACITY);
    }

    #[test]
    fn test_reset_forgets_everything() {
        let mut map = small_map();
        let chunk = map.insert(ChunkCoord::new(4, 4, 0)).unwrap();
        map.update_membership(EntityId::new(1), None, chunk).unwrap();
        map.reset();
        assert_eq!(map.chunk_count(), 0);
        assert_eq!(map.bucket_nodes_used(), 0);
        assert!(map.query(ChunkCoord::new(4, 4, 0)).is_none());
    }
}
