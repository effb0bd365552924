//! # Dungeon Layout
//!
//! A walk of rooms, one room per chunk.
//!
//! Each step draws one of the five directions. Up/down/left/right step to
//! the neighboring chunk; "none" takes the stairs to the other floor at the
//! same chunk. The walk never draws the direction leading straight back to
//! the room it came from.

use dunsim_core::{ChunkCoord, Direction, Entropy};

/// Floors a room walk alternates between.
const FLOORS: (i32, i32) = (0, 1);

/// Ordered room placements produced by a room walk.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DungeonLayout {
    rooms: Vec<ChunkCoord>,
}

impl DungeonLayout {
    /// Walks `room_count` rooms starting at chunk `(0, 0, 0)`.
    #[must_use]
    pub fn generate<E: Entropy + ?Sized>(entropy: &mut E, room_count: usize) -> Self {
        Self::generate_from(entropy, room_count, ChunkCoord::new(0, 0, FLOORS.0))
    }

    /// Walks `room_count` rooms starting at `start`.
    ///
    /// A chunk may be visited more than once; each visit is recorded.
    #[must_use]
    pub fn generate_from<E: Entropy + ?Sized>(
        entropy: &mut E,
        room_count: usize,
        start: ChunkCoord,
    ) -> Self {
        let mut rooms = Vec::with_capacity(room_count);
        let mut chunk = start;
        let mut toward_previous = Direction::None;

        for _ in 0..room_count {
            rooms.push(chunk);

            let mut direction = toward_previous;
            while direction == toward_previous {
                direction = Direction::from_index(entropy.random_range(0, 4));
            }

            if direction == Direction::None {
                let floor = if chunk.floor == FLOORS.0 { FLOORS.1 } else { FLOORS.0 };
                chunk = ChunkCoord::new(chunk.x, chunk.y, floor);
            } else {
                let (dx, dy) = direction.delta();
                chunk = chunk.offset(dx, dy);
                toward_previous = direction.opposite();
            }
        }

        Self { rooms }
    }

    /// Builds a layout from explicit placements.
    #[must_use]
    pub fn from_rooms(rooms: Vec<ChunkCoord>) -> Self {
        Self { rooms }
    }

    /// Room placements in walk order.
    #[inline]
    #[must_use]
    pub fn rooms(&self) -> &[ChunkCoord] {
        &self.rooms
    }

    /// Number of rooms, revisits included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Checks if the layout has no rooms.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Number of distinct chunks covered.
    #[must_use]
    pub fn distinct_chunks(&self) -> usize {
        let mut seen: Vec<ChunkCoord> = Vec::with_capacity(self.rooms.len());
        for room in &self.rooms {
            if !seen.contains(room) {
                seen.push(*room);
            }
        }
        seen.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of draws.
    struct Script(Vec<u32>);

    impl Entropy for Script {
        fn random_range(&mut self, min: u32, max: u32) -> u32 {
            let value = self.0.remove(0);
            assert!((min..=max).contains(&value));
            value
        }
    }

    #[test]
    fn test_first_room_at_origin() {
        let mut script = Script(vec![4]);
        let layout = DungeonLayout::generate(&mut script, 1);
        assert_eq!(layout.rooms(), [ChunkCoord::new(0, 0, 0)]);
    }

    #[test]
    fn test_walk_steps_and_floors() {
        // right, none (toggle floor), down, none (toggle back), right
        let mut script = Script(vec![4, 0, 2, 0, 4]);
        let layout = DungeonLayout::generate(&mut script, 5);
        assert_eq!(
            layout.rooms(),
            [
                ChunkCoord::new(0, 0, 0),
                ChunkCoord::new(1, 0, 0),
                ChunkCoord::new(1, 0, 1),
                ChunkCoord::new(1, 1, 1),
                ChunkCoord::new(1, 1, 0),
            ]
        );
    }

    #[test]
    fn test_never_steps_straight_back() {
        // From the start "none" is redrawn. After going left, "right" is
        // redrawn and "up" is taken.
        let mut script = Script(vec![0, 3, 4, 1, 3]);
        let layout = DungeonLayout::generate(&mut script, 3);
        assert_eq!(
            layout.rooms(),
            [
                ChunkCoord::new(0, 0, 0),
                ChunkCoord::new(-1, 0, 0),
                ChunkCoord::new(-1, -1, 0),
            ]
        );
        assert!(script.0.is_empty());
    }

    #[test]
    fn test_floor_change_keeps_back_direction() {
        // up, none, then "down" is still the way back and gets redrawn.
        let mut script = Script(vec![1, 0, 2, 3]);
        let layout = DungeonLayout::generate(&mut script, 3);
        assert_eq!(
            layout.rooms(),
            [
                ChunkCoord::new(0, 0, 0),
                ChunkCoord::new(0, -1, 0),
                ChunkCoord::new(0, -1, 1),
            ]
        );
        // The last placement draws once more (2 rejected, 3 taken).
        assert!(script.0.is_empty());
    }

    #[test]
    fn test_distinct_chunks_counts_revisits_once() {
        let layout = DungeonLayout::from_rooms(vec![
            ChunkCoord::new(0, 0, 0),
            ChunkCoord::new(0, 0, 1),
            ChunkCoord::new(0, 0, 0),
        ]);
        assert_eq!(layout.len(), 3);
        assert_eq!(layout.distinct_chunks(), 2);
    }
}
