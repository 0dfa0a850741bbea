//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected, seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::{Deflection, paddle_deflection};
pub use rect::Rect;
pub use state::{AiTracker, Ball, MatchPhase, MatchState, Paddle, Score, Side};
pub use tick::{TickInput, Time, tick};
