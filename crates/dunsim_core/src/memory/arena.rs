//! # Arena Allocator
//!
//! A typed bump allocator handing out index handles instead of pointers.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;

/// Handle to a value allocated from an [`Arena`].
///
/// Handles are plain indices: cheap to copy, never dangling while the arena
/// lives, and invalidated all at once by [`Arena::reset`].
pub struct ArenaHandle<T> {
    index: u32,
    _marker: PhantomData<fn() -> T>,
}

impl<T> ArenaHandle<T> {
    #[inline]
    const fn new(index: u32) -> Self {
        Self {
            index,
            _marker: PhantomData,
        }
    }

    /// Returns the raw slot index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }
}

impl<T> Clone for ArenaHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for ArenaHandle<T> {}

impl<T> PartialEq for ArenaHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl<T> Eq for ArenaHandle<T> {}

impl<T> Hash for ArenaHandle<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.index.hash(state);
    }
}

impl<T> fmt::Debug for ArenaHandle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ArenaHandle({})", self.index)
    }
}

/// A bump-pointer arena of `T` values.
///
/// Allocations are fast (push onto reserved storage) and return a zeroed
/// (`Default`) value. Nothing is freed individually; [`Arena::reset`]
/// discards everything.
///
/// # Example
///
/// ```rust,ignore
/// let mut arena: Arena<BucketNode> = Arena::new(1024);
///
/// let handle = arena.alloc().expect("arena sized for the session");
/// arena.get_mut(handle).push(id);
///
/// arena.reset();
/// ```
pub struct Arena<T> {
    /// Allocated values; capacity reserved up front.
    storage: Vec<T>,
    /// Maximum number of values.
    capacity: usize,
}

impl<T: Default> Arena<T> {
    /// Creates a new arena holding at most `capacity` values.
    ///
    /// # Panics
    ///
    /// Panics if capacity is zero or exceeds `u32::MAX`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "Capacity must be greater than zero");
        assert!(
            capacity <= u32::MAX as usize,
            "Capacity cannot exceed u32::MAX"
        );

        Self {
            storage: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Allocates a zeroed value.
    ///
    /// # Returns
    ///
    /// A handle to the new value, or None if the arena is full.
    pub fn alloc(&mut self) -> Option<ArenaHandle<T>> {
        if self.storage.len() == self.capacity {
            return None;
        }

        // Bounded by the u32 capacity check in `new`.
        #[allow(clippy::cast_possible_truncation)]
        let index = self.storage.len() as u32;
        self.storage.push(T::default());

        Some(ArenaHandle::new(index))
    }
}

impl<T> Arena<T> {
    /// Returns the total capacity in values.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of allocated values.
    #[inline]
    #[must_use]
    pub fn used(&self) -> usize {
        self.storage.len()
    }

    /// Returns the number of values still available.
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.capacity - self.used()
    }

    /// Gets an allocated value.
    ///
    /// # Panics
    ///
    /// Panics if the handle predates the last [`Arena::reset`].
    #[inline]
    #[must_use]
    pub fn get(&self, handle: ArenaHandle<T>) -> &T {
        &self.storage[handle.index as usize]
    }

    /// Gets an allocated value mutably.
    ///
    /// # Panics
    ///
    /// Panics if the handle predates the last [`Arena::reset`].
    #[inline]
    pub fn get_mut(&mut self, handle: ArenaHandle<T>) -> &mut T {
        &mut self.storage[handle.index as usize]
    }

    /// Resets the arena, invalidating all previous handles.
    ///
    /// Reserved storage is kept for the next world.
    #[inline]
    pub fn reset(&mut self) {
        self.storage.clear();
    }
}
