//! # Frame Input
//!
//! Controller state sampled once per frame by the platform layer.
//!
//! Buttons record where they ended the frame and how many times they
//! changed during it, so a press shorter than a frame is not lost.

use dunsim_core::{Direction, Entropy, SessionRng};

/// Controller slots, one player each.
pub const CONTROLLER_COUNT: usize = 5;

/// One button over one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Down at the end of the frame.
    pub ended_down: bool,
    /// Up/down changes during the frame.
    pub half_transitions: u8,
}

impl ButtonState {
    /// A button held down since before this frame.
    pub const HELD: Self = Self {
        ended_down: true,
        half_transitions: 0,
    };

    /// A button that went down this frame.
    pub const PRESSED: Self = Self {
        ended_down: true,
        half_transitions: 1,
    };

    /// Next frame's state for a button that ends the frame `down`.
    #[inline]
    #[must_use]
    pub const fn after(self, down: bool) -> Self {
        Self {
            ended_down: down,
            half_transitions: if self.ended_down == down { 0 } else { 1 },
        }
    }

    /// Down at the end of the frame.
    #[inline]
    #[must_use]
    pub const fn is_held(self) -> bool {
        self.ended_down
    }

    /// Went down at least once during the frame.
    #[inline]
    #[must_use]
    pub const fn was_pressed(self) -> bool {
        self.half_transitions > 1 || (self.half_transitions == 1 && self.ended_down)
    }
}

/// One controller over one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ControllerInput {
    /// A device is plugged into this slot.
    pub connected: bool,
    /// Move toward negative y.
    pub move_up: ButtonState,
    /// Move toward positive y.
    pub move_down: ButtonState,
    /// Move toward negative x.
    pub move_left: ButtonState,
    /// Move toward positive x.
    pub move_right: ButtonState,
    /// Longer player steps while held.
    pub sprint: ButtonState,
    /// Direction presses pan the camera while held.
    pub pan: ButtonState,
    /// Snaps the camera onto this controller's player.
    pub recenter: ButtonState,
}

impl ControllerInput {
    /// Delta from the held direction buttons, `step` tiles per axis.
    #[must_use]
    pub const fn held_delta(&self, step: i32) -> (i32, i32) {
        Self::delta(
            [
                self.move_up.is_held(),
                self.move_down.is_held(),
                self.move_left.is_held(),
                self.move_right.is_held(),
            ],
            step,
        )
    }

    /// Delta from the direction buttons pressed this frame.
    #[must_use]
    pub const fn pressed_delta(&self, step: i32) -> (i32, i32) {
        Self::delta(
            [
                self.move_up.was_pressed(),
                self.move_down.was_pressed(),
                self.move_left.was_pressed(),
                self.move_right.was_pressed(),
            ],
            step,
        )
    }

    const fn delta([up, down, left, right]: [bool; 4], step: i32) -> (i32, i32) {
        let mut dx = 0;
        let mut dy = 0;
        if up {
            dy -= step;
        }
        if down {
            dy += step;
        }
        if left {
            dx -= step;
        }
        if right {
            dx += step;
        }
        (dx, dy)
    }
}

/// Everything the session reads in one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Controller slots.
    pub controllers: [ControllerInput; CONTROLLER_COUNT],
    /// Seconds covered by this frame.
    pub dt: f32,
}

impl FrameInput {
    /// A frame with no controller connected.
    #[must_use]
    pub fn idle(dt: f32) -> Self {
        Self {
            controllers: [ControllerInput::default(); CONTROLLER_COUNT],
            dt,
        }
    }
}

/// Drives one controller with seeded random direction holds, for headless
/// runs and soak tests.
pub struct InputScript {
    rng: SessionRng,
    slot: usize,
    hold_ticks: u32,
    remaining: u32,
    direction: Direction,
    sprint: bool,
    last: ControllerInput,
}

impl InputScript {
    /// Creates a script for controller `slot`, changing direction every
    /// `hold_ticks` frames.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is not a controller slot.
    #[must_use]
    pub fn new(seed: u64, slot: usize, hold_ticks: u32) -> Self {
        assert!(slot < CONTROLLER_COUNT, "controller slot {slot} out of range");
        Self {
            rng: SessionRng::new(seed),
            slot,
            hold_ticks: hold_ticks.max(1),
            remaining: 0,
            direction: Direction::None,
            sprint: false,
            last: ControllerInput::default(),
        }
    }

    /// Produces the next frame.
    pub fn next_frame(&mut self, dt: f32) -> FrameInput {
        if self.remaining == 0 {
            self.direction = Direction::from_index(self.rng.random_range(0, 4));
            self.sprint = self.rng.random_range(0, 3) == 0;
            self.remaining = self.hold_ticks;
        }
        self.remaining -= 1;

        let last = self.last;
        let controller = ControllerInput {
            connected: true,
            move_up: last.move_up.after(self.direction == Direction::Up),
            move_down: last.move_down.after(self.direction == Direction::Down),
            move_left: last.move_left.after(self.direction == Direction::Left),
            move_right: last.move_right.after(self.direction == Direction::Right),
            sprint: last.sprint.after(self.sprint),
            pan: last.pan.after(false),
            recenter: last.recenter.after(false),
        };
        self.last = controller;

        let mut frame = FrameInput::idle(dt);
        frame.controllers[self.slot] = controller;
        frame
    }
}
