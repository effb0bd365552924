//! Facing direction and the slide animation overlay.
//!
//! Logical positions change instantly. The slide offset is the visual
//! distance still left to cover, decaying to zero over a few frames; while
//! it is non-zero the entity accepts no new movement.

/// A cardinal direction, or none.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Not facing anywhere.
    #[default]
    None = 0,
    /// Toward negative y.
    Up = 1,
    /// Toward positive y.
    Down = 2,
    /// Toward negative x.
    Left = 3,
    /// Toward positive x.
    Right = 4,
}

impl Direction {
    /// All directions in draw order, for uniform random picks.
    pub const ALL: [Self; 5] = [Self::None, Self::Up, Self::Down, Self::Left, Self::Right];

    /// Returns the direction at `index` in [`Direction::ALL`].
    ///
    /// Out-of-range indices map to [`Direction::None`].
    #[inline]
    #[must_use]
    pub fn from_index(index: u32) -> Self {
        Self::ALL
            .get(index as usize)
            .copied()
            .unwrap_or(Self::None)
    }

    /// Returns the facing implied by a movement delta.
    ///
    /// Horizontal movement wins over vertical.
    #[inline]
    #[must_use]
    pub const fn from_delta(dx: i32, dy: i32) -> Self {
        if dx > 0 {
            Self::Right
        } else if dx < 0 {
            Self::Left
        } else if dy > 0 {
            Self::Down
        } else if dy < 0 {
            Self::Up
        } else {
            Self::None
        }
    }

    /// Returns the unit tile delta of this direction.
    #[inline]
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::None => (0, 0),
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Returns the opposite direction.
    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Checks if this is left or right.
    #[inline]
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }
}

/// Per-entity movement presentation state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Animation {
    /// Direction of the last attempted move.
    pub facing: Direction,
    /// Remaining horizontal slide, in tiles.
    pub offset_x: f32,
    /// Remaining vertical slide, in tiles.
    pub offset_y: f32,
}

impl Animation {
    /// Checks if a slide is still in progress.
    #[inline]
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.offset_x != 0.0 || self.offset_y != 0.0
    }

    /// Starts a slide covering an accepted move of `(dx, dy)` tiles.
    #[inline]
    #[allow(clippy::cast_precision_loss)]
    pub fn start_slide(&mut self, dx: i32, dy: i32) {
        self.offset_x = dx as f32;
        self.offset_y = dy as f32;
    }

    /// Moves both offsets toward zero by `speed * dt` tiles.
    ///
    /// Offsets never cross zero: once within one step they snap to exactly
    /// `0.0`, so repeated calls settle instead of oscillating.
    pub fn advance(&mut self, dt: f32, speed: f32) {
        let step = speed * dt;
        self.offset_x = decay_toward_zero(self.offset_x, step);
        self.offset_y = decay_toward_zero(self.offset_y, step);
    }
}

#[inline]
fn decay_toward_zero(offset: f32, step: f32) -> f32 {
    if offset > 0.0 {
        (offset - step).max(0.0)
    } else if offset < 0.0 {
        (offset + step).min(0.0)
    } else {
        0.0
    }
}
