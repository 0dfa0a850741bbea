//! Rally Pong - a classic paddle duel against a fair, beatable AI
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, match state)
//! - `scene`: Draw-call composition against an abstract painter
//! - `platform`: Input/clock abstraction for frontends
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod scene;
pub mod sim;
pub mod tuning;

pub use tuning::Tuning;

/// Game loop constants
pub mod consts {
    /// Fixed simulation timestep (120 Hz for smooth physics)
    pub const SIM_DT: f32 = 1.0 / 120.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
}

/// Fold a coordinate into `[min, max]` as if it had bounced elastically
/// between the two bounds any number of times.
///
/// Degenerate ranges (`max <= min`) collapse to `min`.
#[inline]
pub fn reflect_off_bounds(y: f32, min: f32, max: f32) -> f32 {
    let span = max - min;
    if span <= 0.0 {
        return min;
    }
    let t = (y - min).rem_euclid(2.0 * span);
    let t = if t > span { 2.0 * span - t } else { t };
    min + t
}
