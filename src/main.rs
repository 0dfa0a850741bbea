//! Rally Pong entry point
//!
//! Runs a headless demo match in idle mode (the AI drives both paddles).
//! A graphical frontend supplies real painter/input/clock collaborators
//! through the `platform` and `scene` seams instead.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use rally_pong::Tuning;
use rally_pong::consts::{MAX_SUBSTEPS, SIM_DT};
use rally_pong::platform::{FixedClock, FrameClock, InputSource, NullInput};
use rally_pong::scene::{self, NullPainter};
use rally_pong::sim::{MatchPhase, MatchState, TickInput, Time, tick};

fn main() {
    env_logger::init();
    log::info!("Rally Pong starting...");

    let tuning = Tuning::load();
    let seed: u64 = rand::rng().random();
    let mut rng = Pcg32::seed_from_u64(seed);
    log::info!("Match seeded with {seed}");

    let mut state = MatchState::new(&tuning, &mut rng);
    let mut clock = FixedClock::new(SIM_DT);
    let mut input = NullInput;
    let mut painter = NullPainter;

    // Fixed-timestep loop with an accumulator. The headless clock drains
    // exactly one substep per frame; a vsync'd frontend drains several.
    let mut accumulator = 0.0;
    let mut sim_now = 0.0;
    loop {
        let frame = clock.next_frame();
        let keys = input.poll();
        if keys.quit {
            break;
        }

        let tick_input = TickInput {
            up: keys.up,
            down: keys.down,
            idle: true,
        };

        accumulator += frame.dt.min(0.1);
        let mut substeps = 0;
        while accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            sim_now += SIM_DT;
            let time = Time {
                dt: SIM_DT,
                now: sim_now,
            };
            tick(&mut state, &tick_input, time, &tuning, &mut rng);
            accumulator -= SIM_DT;
            substeps += 1;
        }

        scene::draw(&mut painter, &state, &tuning);

        if state.phase == MatchPhase::GameOver {
            break;
        }
    }

    log::info!(
        "Final score {} - {}",
        state.score.left,
        state.score.right
    );
}
