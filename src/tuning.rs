//! Data-driven game balance
//!
//! Every gameplay knob lives in one immutable struct so the simulation can
//! run under varied parameters in tests. Defaults are the shipped feel; a
//! JSON overrides file (named by `RALLY_PONG_TUNING`) can patch individual
//! fields.

use serde::{Deserialize, Serialize};

/// Complete set of gameplay parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // Court
    pub screen_width: f32,
    pub screen_height: f32,

    // Paddles
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between a paddle and its side's screen edge
    pub paddle_margin: f32,
    /// Player paddle speed (px/s)
    pub paddle_speed: f32,
    /// AI paddle max tracking speed (px/s)
    pub ai_max_speed: f32,

    // Ball
    pub ball_size: f32,
    /// Base speed at serve (px/s)
    pub ball_speed: f32,
    /// Added after each paddle hit
    pub ball_speed_increment: f32,
    pub ball_speed_max: f32,
    /// Bounce angle at a paddle's edge (radians, ~52 degrees)
    pub max_bounce_angle: f32,
    /// Half-spread of the randomized serve angle (radians off horizontal)
    pub serve_angle: f32,
    /// Delay between a point and the next serve (seconds)
    pub serve_delay: f32,
    /// Vertical velocity jitter added per paddle hit (px/s)
    pub bounce_jitter: f32,

    // Match
    pub score_to_win: u32,

    // AI behavior (fair, beatable)
    /// Random reaction delay range (seconds)
    pub ai_reaction_delay: (f32, f32),
    /// Random vertical error band at full ball speed (px)
    pub ai_aim_error: (f32, f32),
    /// Low-pass filter on target tracking (0..1)
    pub ai_track_damping: f32,
    /// How much to lead when the ball moves toward the AI
    pub ai_lookahead: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,

            paddle_width: 12.0,
            paddle_height: 100.0,
            paddle_margin: 30.0,
            paddle_speed: 420.0,
            ai_max_speed: 390.0,

            ball_size: 14.0,
            ball_speed: 360.0,
            ball_speed_increment: 18.0,
            ball_speed_max: 680.0,
            max_bounce_angle: 0.9,
            serve_angle: 0.35,
            serve_delay: 0.8,
            bounce_jitter: 8.0,

            score_to_win: 10,

            ai_reaction_delay: (0.08, 0.16),
            ai_aim_error: (10.0, 48.0),
            ai_track_damping: 0.22,
            ai_lookahead: 0.55,
        }
    }
}

impl Tuning {
    /// Environment variable naming an optional JSON overrides file
    const ENV_FILE: &'static str = "RALLY_PONG_TUNING";

    /// Clamp a paddle's vertical center to the court
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        let half = self.paddle_height / 2.0;
        y.clamp(half, self.screen_height - half)
    }

    /// Vertical travel band of the ball's center
    pub fn ball_bounds(&self) -> (f32, f32) {
        let half = self.ball_size / 2.0;
        (half, self.screen_height - half)
    }

    /// Center of the court
    pub fn center(&self) -> glam::Vec2 {
        glam::Vec2::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    /// Load tuning, applying overrides from the `RALLY_PONG_TUNING` file
    /// if set. Any problem with the file falls back to defaults.
    pub fn load() -> Self {
        let Ok(path) = std::env::var(Self::ENV_FILE) else {
            log::info!("Using default tuning");
            return Self::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning overrides from {path}");
                    tuning
                }
                Err(err) => {
                    log::warn!("Ignoring malformed tuning file {path}: {err}");
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Cannot read tuning file {path}: {err}");
                Self::default()
            }
        }
    }
}
