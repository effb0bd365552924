//! # Entropy
//!
//! The simulation consumes randomness as an opaque stream of uniform
//! integers. Sessions seed a ChaCha stream once at startup so the same seed
//! always produces the same dungeon and the same creature walk.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniform random integers.
pub trait Entropy {
    /// Returns a uniformly distributed value in `min..=max`.
    ///
    /// `min` must not exceed `max`.
    fn random_range(&mut self, min: u32, max: u32) -> u32;
}

/// Deterministic session RNG.
#[derive(Clone, Debug)]
pub struct SessionRng {
    rng: ChaCha8Rng,
}

impl SessionRng {
    /// Creates a generator from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Entropy for SessionRng {
    #[inline]
    fn random_range(&mut self, min: u32, max: u32) -> u32 {
        debug_assert!(min <= max, "empty range {min}..={max}");
        self.rng.gen_range(min..=max)
    }
}

impl<E: Entropy + ?Sized> Entropy for &mut E {
    #[inline]
    fn random_range(&mut self, min: u32, max: u32) -> u32 {
        (**self).random_range(min, max)
    }
}
