//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - No rendering, audio-device, or input-device dependencies
//!
//! The frontend reads positions, rotations, and sprite selectors out of the
//! state after each tick and draws them; sounds come from the returned events.

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::BoundingBox;
pub use state::{
    Background, Facing, GameEvent, GamePhase, GameState, Missile, MissileState, Player,
    PlayerState, Viewport,
};
pub use tick::{TickInput, tick};
