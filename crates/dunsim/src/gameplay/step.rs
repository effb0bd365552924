//! Single movement attempts and their outcome.

use dunsim_core::{EntityId, World, WorldPos, WorldResult};

use crate::events::SimEvent;

/// Outcome of one movement attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Still sliding from the previous move; the request was ignored.
    Sliding,
    /// No movement was requested.
    Stayed,
    /// The move, or a reduced form of it, was accepted.
    Moved {
        /// Position before.
        from: WorldPos,
        /// Position after.
        to: WorldPos,
    },
    /// The move was rejected.
    Blocked {
        /// Requested x delta.
        dx: i32,
        /// Requested y delta.
        dy: i32,
    },
}

impl Step {
    /// Checks if the entity changed floor.
    #[inline]
    #[must_use]
    pub fn changed_floor(&self) -> bool {
        matches!(self, Self::Moved { from, to } if from.floor != to.floor)
    }

    /// Events describing this outcome, in emission order.
    #[must_use]
    pub fn events(&self, entity: EntityId) -> Vec<SimEvent> {
        match *self {
            Self::Sliding | Self::Stayed => Vec::new(),
            Self::Moved { from, to } => {
                let mut events = vec![SimEvent::EntityMoved { entity, from, to }];
                if from.floor != to.floor {
                    events.push(SimEvent::FloorChanged {
                        entity,
                        from: from.floor,
                        to: to.floor,
                    });
                }
                events
            }
            Self::Blocked { dx, dy } => vec![SimEvent::MoveRejected { entity, dx, dy }],
        }
    }
}

/// Moves an entity regardless of any slide in progress.
///
/// # Errors
///
/// Propagates the fatal errors of [`World::move_entity`].
pub fn attempt_move(world: &mut World, id: EntityId, dx: i32, dy: i32) -> WorldResult<Step> {
    if dx == 0 && dy == 0 {
        return Ok(Step::Stayed);
    }
    let from = world.entity(id).position;
    if world.move_entity(id, dx, dy)? {
        Ok(Step::Moved {
            from,
            to: world.entity(id).position,
        })
    } else {
        Ok(Step::Blocked { dx, dy })
    }
}

/// Moves an entity only if its previous slide has finished.
///
/// # Errors
///
/// Propagates the fatal errors of [`World::move_entity`].
pub fn step_when_idle(world: &mut World, id: EntityId, dx: i32, dy: i32) -> WorldResult<Step> {
    if world.is_animating(id) {
        return Ok(Step::Sliding);
    }
    attempt_move(world, id, dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dunsim_core::{ChunkCoord, EntityFlags, EntityKind, WorldConfig};

    fn world_with_walker() -> (World, EntityId) {
        let mut world = World::new(&WorldConfig::default());
        world.insert_chunk(ChunkCoord::new(0, 0, 1)).unwrap();
        world
            .create_entity(
                EntityKind::Stairs,
                2,
                2,
                WorldPos::new(4, 0, 0),
                EntityFlags::ACTIVE | EntityFlags::VISIBLE,
            )
            .unwrap();
        let walker = world
            .create_entity(
                EntityKind::Creature,
                1,
                1,
                WorldPos::new(2, 0, 0),
                EntityFlags::ACTIVE | EntityFlags::VISIBLE | EntityFlags::COLLIDES,
            )
            .unwrap();
        (world, walker)
    }

    #[test]
    fn test_sliding_entity_ignores_requests() {
        let (mut world, walker) = world_with_walker();
        assert!(matches!(
            step_when_idle(&mut world, walker, 1, 0).unwrap(),
            Step::Moved { .. }
        ));
        assert_eq!(step_when_idle(&mut world, walker, 1, 0).unwrap(), Step::Sliding);
        assert_eq!(world.entity(walker).position, WorldPos::new(3, 0, 0));
    }

    #[test]
    fn test_zero_delta_stays() {
        let (mut world, walker) = world_with_walker();
        assert_eq!(attempt_move(&mut world, walker, 0, 0).unwrap(), Step::Stayed);
        assert!(Step::Stayed.events(walker).is_empty());
    }

    #[test]
    fn test_floor_change_events() {
        let (mut world, walker) = world_with_walker();
        attempt_move(&mut world, walker, 1, 0).unwrap();
        let step = attempt_move(&mut world, walker, 1, 0).unwrap();
        assert!(step.changed_floor());
        assert_eq!(
            step.events(walker),
            [
                SimEvent::EntityMoved {
                    entity: walker,
                    from: WorldPos::new(3, 0, 0),
                    to: WorldPos::new(4, 0, 1),
                },
                SimEvent::FloorChanged {
                    entity: walker,
                    from: 0,
                    to: 1,
                },
            ]
        );
    }

    #[test]
    fn test_blocked_event() {
        let (mut world, walker) = world_with_walker();
        let step = attempt_move(&mut world, walker, 0, -1).unwrap();
        assert_eq!(step, Step::Blocked { dx: 0, dy: -1 });
        assert_eq!(
            step.events(walker),
            [SimEvent::MoveRejected {
                entity: walker,
                dx: 0,
                dy: -1,
            }]
        );
    }
}
