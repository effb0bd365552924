//! # Dunsim
//!
//! One play session over the dungeon core: controller input, the player,
//! camera and creature registries, per-tick orchestration, simulation events
//! and the read-only view the presentation layer draws from.
//!
//! ## Architecture Rules
//!
//! 1. **One writer** - only [`Session::tick`] mutates the world after startup
//! 2. **Events never block** - a full event channel drops and counts
//! 3. **Presentation reads** - [`ViewQuery`] borrows the world immutably
//!
//! ## Example
//!
//! ```rust,ignore
//! use dunsim::{FrameInput, Session, SessionConfig};
//!
//! let mut session = Session::new(SessionConfig::default())?;
//! let summary = session.tick(&FrameInput::idle(1.0 / 60.0))?;
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod events;
pub mod game_loop;
pub mod gameplay;
pub mod input;
pub mod session;
pub mod view;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use events::{EventBus, EventReceiver, EventSender, SimEvent};
pub use game_loop::{FrameStats, FrameStatsAccumulator, GameLoop, MAX_FRAME_TIME, TARGET_FRAME_TIME};
pub use gameplay::Step;
pub use input::{ButtonState, ControllerInput, FrameInput, InputScript, CONTROLLER_COUNT};
pub use session::{Session, TickSummary};
pub use view::{Occupant, SpriteInstance, ViewQuery};
