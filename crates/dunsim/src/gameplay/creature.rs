//! Creature random walk.

use dunsim_core::{Direction, Entropy, EntityId, World, WorldResult};

use super::step::{attempt_move, Step};

/// One random-walk step.
///
/// While the creature is still sliding nothing is drawn. Otherwise one of
/// the five directions is drawn uniformly; "none" or a rejected move
/// leaves it where it is.
///
/// # Errors
///
/// Propagates the fatal errors of [`World::move_entity`].
pub fn wander<E: Entropy + ?Sized>(
    world: &mut World,
    id: EntityId,
    entropy: &mut E,
) -> WorldResult<Step> {
    if world.is_animating(id) {
        return Ok(Step::Sliding);
    }
    let (dx, dy) = Direction::from_index(entropy.random_range(0, 4)).delta();
    attempt_move(world, id, dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dunsim_core::{ChunkCoord, EntityFlags, EntityKind, WorldConfig, WorldPos};

    /// Always draws the same value and counts draws.
    struct Fixed {
        value: u32,
        draws: usize,
    }

    impl Entropy for Fixed {
        fn random_range(&mut self, _min: u32, _max: u32) -> u32 {
            self.draws += 1;
            self.value
        }
    }

    fn creature_world() -> (World, EntityId) {
        let mut world = World::new(&WorldConfig::default());
        world.insert_chunk(ChunkCoord::new(0, 0, 0)).unwrap();
        let id = world
            .create_entity(
                EntityKind::Creature,
                4,
                4,
                WorldPos::new(6, 6, 0),
                EntityFlags::ACTIVE | EntityFlags::VISIBLE | EntityFlags::COLLIDES,
            )
            .unwrap();
        (world, id)
    }

    #[test]
    fn test_none_draw_stays() {
        let (mut world, id) = creature_world();
        let mut entropy = Fixed { value: 0, draws: 0 };
        assert_eq!(wander(&mut world, id, &mut entropy).unwrap(), Step::Stayed);
        assert_eq!(world.entity(id).position, WorldPos::new(6, 6, 0));
        assert_eq!(entropy.draws, 1);
    }

    #[test]
    fn test_walks_then_waits_for_slide() {
        let (mut world, id) = creature_world();
        let mut entropy = Fixed { value: 3, draws: 0 };

        assert!(matches!(
            wander(&mut world, id, &mut entropy).unwrap(),
            Step::Moved { .. }
        ));
        assert_eq!(world.entity(id).position, WorldPos::new(5, 6, 0));
        assert_eq!(world.entity(id).animation.facing, Direction::Left);

        assert_eq!(wander(&mut world, id, &mut entropy).unwrap(), Step::Sliding);
        assert_eq!(entropy.draws, 1);

        world.advance_animation(id, 1.0, 5.0);
        wander(&mut world, id, &mut entropy).unwrap();
        assert_eq!(world.entity(id).position, WorldPos::new(4, 6, 0));
    }

    #[test]
    fn test_blocked_walk_is_not_an_error() {
        let (mut world, id) = creature_world();
        world
            .create_entity(
                EntityKind::Wall,
                1,
                1,
                WorldPos::new(6, 5, 0),
                EntityFlags::ACTIVE | EntityFlags::COLLIDES,
            )
            .unwrap();
        let mut entropy = Fixed { value: 1, draws: 0 };
        assert_eq!(
            wander(&mut world, id, &mut entropy).unwrap(),
            Step::Blocked { dx: 0, dy: -1 }
        );
        assert_eq!(world.entity(id).animation.facing, Direction::Up);
    }
}
