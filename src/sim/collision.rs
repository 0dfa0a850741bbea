//! Paddle deflection math
//!
//! Where on the paddle the ball strikes decides the rebound angle: center
//! hits rebound flat, edge hits leave at the configured maximum angle.

/// Result of mapping an impact point to a rebound
#[derive(Debug, Clone, Copy)]
pub struct Deflection {
    /// Vertical offset of the impact relative to the paddle center,
    /// normalized to [-1, 1]
    pub offset: f32,
    /// Outgoing angle off horizontal (radians, sign follows offset)
    pub angle: f32,
}

/// Map a hit's vertical offset from the paddle center to a bounce angle.
///
/// Impacts beyond the paddle's half-height (corner clips) are clamped to
/// the extreme angle.
pub fn paddle_deflection(
    ball_y: f32,
    paddle_y: f32,
    paddle_height: f32,
    max_angle: f32,
) -> Deflection {
    let offset = ((ball_y - paddle_y) / (paddle_height / 2.0)).clamp(-1.0, 1.0);
    Deflection {
        offset,
        angle: offset * max_angle,
    }
}
