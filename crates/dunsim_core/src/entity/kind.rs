//! Entity kinds, flags and the per-kind capability table.

/// What an entity is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum EntityKind {
    /// Placeholder for the reserved null slot.
    #[default]
    Null = 0,
    /// Walkable floor tile.
    Floor = 1,
    /// Solid wall tile.
    Wall = 2,
    /// Stairs block that moves whatever steps on it to the other floor.
    Stairs = 3,
    /// The viewpoint presentation follows.
    Camera = 4,
    /// A controller-driven player.
    Player = 5,
    /// A wandering creature.
    Creature = 6,
}

/// Which presentation layer an entity draws on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum RenderLayer {
    /// Not drawn.
    Hidden = 0,
    /// Scenery drawn under everything else.
    Background = 1,
    /// Actors drawn over scenery.
    Foreground = 2,
}

/// Behavior attached to an entity kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindCapabilities {
    /// Display name for debug overlays and logs.
    pub name: &'static str,
    /// Overlapping this entity sends the mover to the other floor.
    pub triggers_floor_change: bool,
    /// Scenery is listed as map content rather than as an occupant.
    pub is_scenery: bool,
    /// Presentation layer.
    pub render_layer: RenderLayer,
}

impl EntityKind {
    /// Returns the capabilities of this kind.
    #[must_use]
    pub const fn capabilities(self) -> KindCapabilities {
        match self {
            Self::Null => KindCapabilities {
                name: "Null",
                triggers_floor_change: false,
                is_scenery: true,
                render_layer: RenderLayer::Hidden,
            },
            Self::Floor => KindCapabilities {
                name: "Floor",
                triggers_floor_change: false,
                is_scenery: true,
                render_layer: RenderLayer::Background,
            },
            Self::Wall => KindCapabilities {
                name: "Wall",
                triggers_floor_change: false,
                is_scenery: true,
                render_layer: RenderLayer::Background,
            },
            Self::Stairs => KindCapabilities {
                name: "Stairs",
                triggers_floor_change: true,
                is_scenery: false,
                render_layer: RenderLayer::Background,
            },
            Self::Camera => KindCapabilities {
                name: "Camera",
                triggers_floor_change: false,
                is_scenery: false,
                render_layer: RenderLayer::Hidden,
            },
            Self::Player => KindCapabilities {
                name: "Player",
                triggers_floor_change: false,
                is_scenery: false,
                render_layer: RenderLayer::Foreground,
            },
            Self::Creature => KindCapabilities {
                name: "Creature",
                triggers_floor_change: false,
                is_scenery: false,
                render_layer: RenderLayer::Foreground,
            },
        }
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.capabilities().name
    }

    /// Checks if overlapping this kind changes the mover's floor.
    #[inline]
    #[must_use]
    pub const fn triggers_floor_change(self) -> bool {
        self.capabilities().triggers_floor_change
    }
}

bitflags::bitflags! {
    /// Independent behavior bits of an entity.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EntityFlags: u8 {
        /// Participates in the simulation.
        const ACTIVE = 0x01;
        /// Drawn by presentation.
        const VISIBLE = 0x02;
        /// Blocks other entities' movement.
        const COLLIDES = 0x04;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_stairs_change_floor() {
        let kinds = [
            EntityKind::Null,
            EntityKind::Floor,
            EntityKind::Wall,
            EntityKind::Stairs,
            EntityKind::Camera,
            EntityKind::Player,
            EntityKind::Creature,
        ];
        let changers: Vec<_> = kinds
            .iter()
            .filter(|kind| kind.triggers_floor_change())
            .collect();
        assert_eq!(changers, [&EntityKind::Stairs]);
    }

    #[test]
    fn test_flag_ops() {
        let mut flags = EntityFlags::ACTIVE | EntityFlags::COLLIDES;
        assert!(flags.contains(EntityFlags::ACTIVE));
        assert!(!flags.contains(EntityFlags::VISIBLE));
        assert!(!flags.contains(EntityFlags::ACTIVE | EntityFlags::VISIBLE));

        flags.remove(EntityFlags::ACTIVE);
        assert_eq!(flags, EntityFlags::COLLIDES);

        flags |= EntityFlags::VISIBLE;
        assert_eq!(flags.bits(), 0x06);
    }
}
