//! Fixed timestep simulation tick
//!
//! One tick runs the frame pipeline: player paddle, AI paddle, ball,
//! score handling. Frontends drain ticks from an accumulator at
//! `consts::SIM_DT`.

use rand::Rng;

use super::state::{MatchPhase, MatchState};
use crate::tuning::Tuning;

/// Elapsed/absolute time pair for one tick (seconds)
#[derive(Debug, Clone, Copy)]
pub struct Time {
    /// Elapsed time since the previous tick
    pub dt: f32,
    /// Absolute time since match start
    pub now: f32,
}

/// Input sampled for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move the player's paddle up
    pub up: bool,
    /// Move the player's paddle down
    pub down: bool,
    /// Idle/demo mode - the AI drives the player's paddle too
    pub idle: bool,
}

/// Advance the match by one fixed timestep
pub fn tick(
    state: &mut MatchState,
    input: &TickInput,
    time: Time,
    tuning: &Tuning,
    rng: &mut impl Rng,
) {
    // Terminal display state: nothing moves anymore
    if state.phase == MatchPhase::GameOver {
        return;
    }

    if input.idle {
        state
            .idle_tracker
            .drive(&mut state.player, time.dt, &state.ball, tuning, rng);
    } else {
        state.player.steer(time.dt, input.up, input.down, tuning);
    }

    state
        .tracker
        .drive(&mut state.opponent, time.dt, &state.ball, tuning, rng);

    let scored = state
        .ball
        .update(time.dt, time.now, &state.player, &state.opponent, tuning, rng);

    if let Some(side) = scored {
        state.score.award(side);
        log::info!(
            "Point to {side:?} ({} - {})",
            state.score.left,
            state.score.right
        );
        state.ball.reset(side, time.now, tuning);

        if let Some(winner) = state.score.winner(tuning.score_to_win) {
            log::info!("{winner:?} wins the match");
            state.phase = MatchPhase::GameOver;
            state.ball.halt();
        }
    }
}
