//! # Movement & Collision
//!
//! Tile-step movement with axis-aligned box collision.
//!
//! A move is checked against the entities listed in the mover's current
//! chunk and its destination chunk. Colliders block; stairs let the mover
//! through and send it to the other floor. Logical positions change at
//! once, and the slide offset left behind is what presentation animates.
//!
//! ## Diagonal Moves
//!
//! A diagonal request never moves on both axes. It is split into two
//! single-axis tries, ordered by the last facing:
//!
//! ```text
//!   facing Left/Right:  try (0, dy), then (dx, 0)
//!   otherwise:          try (dx, 0), then (0, dy)
//! ```
//!
//! so pushing diagonally into a wall slides along it.

use tracing::debug;

use crate::entity::{Direction, Entity, EntityId};
use crate::error::WorldResult;
use crate::map::WorldPos;
use crate::world::World;

/// Floors joined by stairs.
const STAIRS_FLOORS: (i32, i32) = (0, 1);

/// An axis-aligned box of tiles, `[x, x + width) x [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in tiles.
    pub width: i32,
    /// Height in tiles.
    pub height: i32,
}

impl Rect {
    /// Creates a box.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The box an entity would cover at `position`.
    #[inline]
    #[must_use]
    pub const fn of_entity_at(entity: &Entity, position: WorldPos) -> Self {
        Self::new(position.x, position.y, entity.width, entity.height)
    }

    /// Separating-axis test on half-open extents. Boxes that only share an
    /// edge do not overlap.
    #[inline]
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }
}

/// Outcome of [`World::can_move`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MoveCheck {
    /// The move may go ahead.
    pub accepted: bool,
    /// Where the mover would end up, floor included.
    pub destination: WorldPos,
}

impl MoveCheck {
    /// Checks if the destination is on another floor than `from`.
    #[inline]
    #[must_use]
    pub const fn changes_floor(&self, from: WorldPos) -> bool {
        self.destination.floor != from.floor
    }
}

/// The floor on the other side of a stairs block.
#[inline]
const fn other_floor(floor: i32) -> i32 {
    if floor == STAIRS_FLOORS.0 {
        STAIRS_FLOORS.1
    } else {
        STAIRS_FLOORS.0
    }
}

impl World {
    /// Checks whether an entity may step by `(dx, dy)`.
    ///
    /// The move is rejected if the current or candidate chunk does not
    /// exist, or if the candidate box overlaps another active collider. An
    /// overlapped active stairs block flips the destination floor; if the
    /// matching chunk on that floor does not exist the move is rejected.
    ///
    /// # Panics
    ///
    /// Panics on the null id or an id that was never created.
    #[must_use]
    pub fn can_move(&self, id: EntityId, dx: i32, dy: i32) -> MoveCheck {
        let mover = self.entity(id);
        let candidate = mover.position.offset(dx, dy);
        let rejected = MoveCheck {
            accepted: false,
            destination: candidate,
        };

        let chunks = self.chunks();
        let (Some(old_chunk), Some(new_chunk)) = (
            chunks.query_world(mover.position),
            chunks.query_world(candidate),
        ) else {
            return rejected;
        };

        let bounds = Rect::of_entity_at(mover, candidate);
        let second = (new_chunk != old_chunk).then_some(new_chunk);
        let neighbors = std::iter::once(old_chunk)
            .chain(second)
            .flat_map(|chunk| chunks.members(chunk));

        let mut on_stairs = false;
        for other_id in neighbors {
            if other_id == id {
                continue;
            }
            let other = self.entity(other_id);
            if !other.is_active() {
                continue;
            }
            // Stairs redirect even when flagged as colliders.
            let stairs = other.kind.triggers_floor_change();
            let blocks = other.has_collision() && !stairs;
            if !(blocks || stairs) {
                continue;
            }
            if bounds.overlaps(&Rect::of_entity_at(other, other.position)) {
                if blocks {
                    return rejected;
                }
                on_stairs = true;
            }
        }

        if on_stairs {
            let destination = candidate.on_floor(other_floor(candidate.floor));
            if chunks.query_world(destination).is_none() {
                return MoveCheck {
                    accepted: false,
                    destination,
                };
            }
            return MoveCheck {
                accepted: true,
                destination,
            };
        }

        MoveCheck {
            accepted: true,
            destination: candidate,
        }
    }

    /// Moves an entity by up to `(dx, dy)`, resolving diagonals by sliding.
    ///
    /// The facing is always updated from the delta actually tried, even when
    /// the move is rejected. On acceptance with a non-zero delta the position
    /// changes immediately and a slide of the same size starts.
    ///
    /// # Returns
    ///
    /// Whether some form of the move was accepted.
    ///
    /// # Errors
    ///
    /// Fails only on capacity exhaustion or corrupted membership while the
    /// entity changes chunk.
    ///
    /// # Panics
    ///
    /// Panics on the null id or an id that was never created.
    pub fn move_entity(&mut self, id: EntityId, dx: i32, dy: i32) -> WorldResult<bool> {
        let (dx, dy, check) = if dx != 0 && dy != 0 {
            let (first, second) = if self.entity(id).animation.facing.is_horizontal() {
                ((0, dy), (dx, 0))
            } else {
                ((dx, 0), (0, dy))
            };
            let check = self.can_move(id, first.0, first.1);
            if check.accepted {
                (first.0, first.1, check)
            } else {
                (second.0, second.1, self.can_move(id, second.0, second.1))
            }
        } else {
            (dx, dy, self.can_move(id, dx, dy))
        };

        let entity = self.entity_mut(id);
        entity.animation.facing = Direction::from_delta(dx, dy);

        if check.accepted && (dx != 0 || dy != 0) {
            let from = entity.position;
            entity.animation.start_slide(dx, dy);
            self.commit_position(id, check.destination)?;
            if check.changes_floor(from) {
                debug!(entity = %id, from = from.floor, to = check.destination.floor, "took the stairs");
            }
        }

        Ok(check.accepted)
    }

    /// Decays an entity's slide toward zero at `speed` tiles per second.
    ///
    /// # Panics
    ///
    /// Panics on the null id or an id that was never created.
    #[inline]
    pub fn advance_animation(&mut self, id: EntityId, dt: f32, speed: f32) {
        self.entity_mut(id).animation.advance(dt, speed);
    }

    /// Checks if an entity is still sliding and so ignores movement input.
    #[inline]
    #[must_use]
    pub fn is_animating(&self, id: EntityId) -> bool {
        self.entity(id).is_animating()
    }
}
