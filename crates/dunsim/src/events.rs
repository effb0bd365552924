//! # Simulation Events
//!
//! What happened during a tick, for presentation, audio and logs.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌──────────────┐
//! │   Session   │─────>│   Event     │─────>│ Presentation │
//! │   (tick)    │      │   Channel   │      │  / logging   │
//! └─────────────┘      └─────────────┘      └──────────────┘
//! ```
//!
//! The channel is bounded. Sending never blocks the tick: when consumers
//! fall behind, new events are dropped and counted.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use dunsim_core::{EntityId, WorldPos};

/// Events emitted by the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SimEvent {
    /// An entity's move was accepted.
    EntityMoved {
        /// The mover.
        entity: EntityId,
        /// Position before the move.
        from: WorldPos,
        /// Position after the move.
        to: WorldPos,
    },

    /// An accepted move went through stairs.
    FloorChanged {
        /// The mover.
        entity: EntityId,
        /// Floor before the move.
        from: i32,
        /// Floor after the move.
        to: i32,
    },

    /// A requested move was rejected.
    MoveRejected {
        /// The would-be mover.
        entity: EntityId,
        /// Requested x delta.
        dx: i32,
        /// Requested y delta.
        dy: i32,
    },
}

impl SimEvent {
    /// The entity the event is about.
    #[must_use]
    pub const fn entity(&self) -> EntityId {
        match *self {
            Self::EntityMoved { entity, .. }
            | Self::FloorChanged { entity, .. }
            | Self::MoveRejected { entity, .. } => entity,
        }
    }
}

/// Bounded channel carrying [`SimEvent`]s.
pub struct EventBus {
    sender: Sender<SimEvent>,
    receiver: Receiver<SimEvent>,
}

impl EventBus {
    /// Creates a bus holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<SimEvent>,
}

impl EventSender {
    /// Sends an event without blocking.
    ///
    /// Returns `false` if the event was dropped because the channel is full.
    #[inline]
    pub fn send(&self, event: SimEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            // The bus owns a receiver, so disconnection cannot happen while
            // the session is alive.
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<SimEvent>,
}

impl EventReceiver {
    /// Takes every pending event.
    pub fn drain(&self) -> Vec<SimEvent> {
        self.receiver.try_iter().collect()
    }

    /// Takes one event, if any is pending.
    #[inline]
    pub fn try_recv(&self) -> Option<SimEvent> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
