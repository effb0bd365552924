//! # Session
//!
//! Owns the world for one play session and advances it one tick at a time.
//!
//! ## Tick Order
//!
//! ```text
//! 1. INPUT     activate/deactivate players, collect player and camera deltas
//! 2. ENTITIES  in id order, for every active entity:
//!              Player   -> move when idle, camera follows floor, slide decays
//!              Camera   -> pan
//!              Creature -> random walk, slide decays
//! 3. EVENTS    one per move, floor change and rejection
//! ```

use dunsim_core::{
    EntityFlags, EntityId, EntityKind, SessionRng, World, WorldPos, WorldResult,
};
use dunsim_procedural::{populate, DungeonLayout, GenerationStats};
use tracing::{info, warn};

use crate::config::SessionConfig;
use crate::error::SessionResult;
use crate::events::{EventBus, EventReceiver, EventSender};
use crate::gameplay::{attempt_move, step_when_idle, wander, Step};
use crate::input::{FrameInput, CONTROLLER_COUNT};

/// Counters for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Moves accepted.
    pub moves_accepted: u32,
    /// Moves rejected.
    pub moves_rejected: u32,
    /// Accepted moves that went through stairs.
    pub floor_changes: u32,
    /// Events dropped because the channel was full.
    pub events_dropped: u32,
}

impl TickSummary {
    fn record(&mut self, step: Step) {
        match step {
            Step::Moved { .. } => {
                self.moves_accepted += 1;
                if step.changed_floor() {
                    self.floor_changes += 1;
                }
            }
            Step::Blocked { .. } => self.moves_rejected += 1,
            Step::Sliding | Step::Stayed => {}
        }
    }
}

/// Deltas gathered from controllers for one tick.
#[derive(Default)]
struct Intents {
    players: [(i32, i32); CONTROLLER_COUNT],
    camera: (i32, i32),
}

/// One play session.
pub struct Session {
    config: SessionConfig,
    world: World,
    rng: SessionRng,
    /// Player entity per controller slot.
    players: Vec<EntityId>,
    camera: EntityId,
    creatures: Vec<EntityId>,
    bus: EventBus,
    events: EventSender,
    generation: GenerationStats,
    tick_count: u64,
}

impl Session {
    /// Builds the world, the registry entities and the dungeon.
    ///
    /// Players are created inactive; a player activates when its
    /// controller connects.
    ///
    /// # Errors
    ///
    /// Fails on an invalid configuration or room legend, or if the dungeon
    /// does not fit the configured capacities.
    pub fn new(config: SessionConfig) -> SessionResult<Self> {
        config.validate()?;
        let template = config.room_template()?;

        let mut world = World::new(&config.world);
        let mut rng = SessionRng::new(config.seed);

        let players = (0..config.player_count)
            .map(|_| {
                world.create_entity(
                    EntityKind::Player,
                    2,
                    2,
                    config.origin,
                    EntityFlags::VISIBLE | EntityFlags::COLLIDES,
                )
            })
            .collect::<WorldResult<Vec<_>>>()?;
        let camera =
            world.create_entity(EntityKind::Camera, 0, 0, config.origin, EntityFlags::ACTIVE)?;
        let creature = world.create_entity(
            EntityKind::Creature,
            4,
            4,
            config.creature_spawn,
            EntityFlags::ACTIVE | EntityFlags::VISIBLE | EntityFlags::COLLIDES,
        )?;

        let layout = DungeonLayout::generate(&mut rng, config.room_count);
        let generation = populate(&mut world, &template, &layout)?;

        let bus = EventBus::new(config.event_capacity);
        let events = bus.sender();

        info!(
            seed = config.seed,
            players = players.len(),
            entities = world.entities().len(),
            chunks = world.chunks().chunk_count(),
            "session started"
        );

        Ok(Self {
            config,
            world,
            rng,
            players,
            camera,
            creatures: vec![creature],
            bus,
            events,
            generation,
            tick_count: 0,
        })
    }

    /// The world, for presentation and inspection.
    #[inline]
    #[must_use]
    pub const fn world(&self) -> &World {
        &self.world
    }

    /// The configuration the session was built from.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Player ids, indexed by controller slot.
    #[inline]
    #[must_use]
    pub fn players(&self) -> &[EntityId] {
        &self.players
    }

    /// The camera id.
    #[inline]
    #[must_use]
    pub const fn camera(&self) -> EntityId {
        self.camera
    }

    /// Creature ids.
    #[inline]
    #[must_use]
    pub fn creatures(&self) -> &[EntityId] {
        &self.creatures
    }

    /// Summary of the dungeon generation pass.
    #[inline]
    #[must_use]
    pub const fn generation(&self) -> GenerationStats {
        self.generation
    }

    /// Ticks completed.
    #[inline]
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// A receiver for this session's events.
    #[must_use]
    pub fn events(&self) -> EventReceiver {
        self.bus.receiver()
    }

    /// Advances the simulation by one tick.
    ///
    /// # Errors
    ///
    /// Fails only on fatal world errors; the session must not be ticked
    /// again afterwards.
    pub fn tick(&mut self, input: &FrameInput) -> SessionResult<TickSummary> {
        let intents = self.read_input(input)?;
        let mut summary = TickSummary::default();

        // Nothing is created during a tick, so the id range is fixed.
        #[allow(clippy::cast_possible_truncation)]
        let last = self.world.entities().len() as u32;
        for id in (1..=last).map(EntityId::new) {
            let entity = self.world.entity(id);
            let (active, kind) = (entity.is_active(), entity.kind);
            if !active {
                continue;
            }
            match kind {
                EntityKind::Player => self.tick_player(id, &intents, input.dt, &mut summary)?,
                EntityKind::Camera => {
                    let (dx, dy) = intents.camera;
                    let step = attempt_move(&mut self.world, id, dx, dy)?;
                    self.publish(id, step, &mut summary);
                }
                EntityKind::Creature => {
                    let step = wander(&mut self.world, id, &mut self.rng)?;
                    self.publish(id, step, &mut summary);
                    self.world
                        .advance_animation(id, input.dt, self.config.creature_slide_speed);
                }
                EntityKind::Null | EntityKind::Floor | EntityKind::Wall | EntityKind::Stairs => {}
            }
        }

        if summary.events_dropped > 0 {
            warn!(
                tick = self.tick_count,
                dropped = summary.events_dropped,
                "event channel full, events dropped"
            );
        }
        self.tick_count += 1;
        Ok(summary)
    }

    fn read_input(&mut self, input: &FrameInput) -> WorldResult<Intents> {
        let mut intents = Intents::default();

        for (slot, &player) in self.players.iter().enumerate() {
            let controller = &input.controllers[slot];
            if !controller.connected {
                self.world.deactivate(player);
                continue;
            }
            self.world.activate(player);

            if controller.pan.is_held() {
                let (dx, dy) = controller.pressed_delta(self.config.camera_pan_step);
                intents.camera.0 += dx;
                intents.camera.1 += dy;
            } else {
                let step = if controller.sprint.is_held() {
                    self.config.sprint_step
                } else {
                    1
                };
                intents.players[slot] = controller.held_delta(step);
            }

            if controller.recenter.was_pressed() {
                let position = self.world.entity(player).position;
                self.world.relocate(self.camera, position)?;
            }
        }
        Ok(intents)
    }

    fn tick_player(
        &mut self,
        id: EntityId,
        intents: &Intents,
        dt: f32,
        summary: &mut TickSummary,
    ) -> WorldResult<()> {
        if let Some(slot) = self.players.iter().position(|&player| player == id) {
            let (dx, dy) = intents.players[slot];
            let step = step_when_idle(&mut self.world, id, dx, dy)?;
            if let Step::Moved { to, .. } = step {
                self.follow_floor(to)?;
            }
            self.publish(id, step, summary);
        }
        self.world
            .advance_animation(id, dt, self.config.player_slide_speed);
        Ok(())
    }

    /// Keeps the camera on the floor the last moving player is on.
    ///
    /// Following never creates chunks: if the camera's spot has no chunk on
    /// the new floor, the camera snaps onto the player instead.
    fn follow_floor(&mut self, player: WorldPos) -> WorldResult<()> {
        let camera = self.world.entity(self.camera).position;
        if camera.floor == player.floor {
            return Ok(());
        }
        let followed = camera.on_floor(player.floor);
        let target = if self.world.chunks().query_world(followed).is_some() {
            followed
        } else {
            player
        };
        self.world.relocate(self.camera, target)
    }

    fn publish(&self, id: EntityId, step: Step, summary: &mut TickSummary) {
        summary.record(step);
        for event in step.events(id) {
            if !self.events.send(event) {
                summary.events_dropped += 1;
            }
        }
    }
}
