//! Platform abstraction layer
//!
//! The simulation core never talks to a window system directly. A
//! frontend supplies these collaborators each frame:
//! - input: current key state and the quit signal
//! - clock: elapsed and absolute time
//!
//! Headless implementations live here for tests and demo runs.

use crate::sim::Time;

/// Boolean key state sampled once per rendered frame
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub quit: bool,
}

/// Input collaborator: the core treats these as pure inputs
pub trait InputSource {
    fn poll(&mut self) -> InputState;
}

/// Input source that never presses a key (idle/demo runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullInput;

impl InputSource for NullInput {
    fn poll(&mut self) -> InputState {
        InputState::default()
    }
}

/// Clock collaborator: one `Time` sample per rendered frame
pub trait FrameClock {
    fn next_frame(&mut self) -> Time;
}

/// Clock that advances by a constant step, for headless runs and tests
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    step: f32,
    now: f32,
}

impl FixedClock {
    pub fn new(step: f32) -> Self {
        Self { step, now: 0.0 }
    }
}

impl FrameClock for FixedClock {
    fn next_frame(&mut self) -> Time {
        self.now += self.step;
        Time {
            dt: self.step,
            now: self.now,
        }
    }
}

/// Wall-clock frame timer for real frontends
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: std::time::Instant,
    last: std::time::Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        let start = std::time::Instant::now();
        Self { start, last: start }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock for SystemClock {
    fn next_frame(&mut self) -> Time {
        let frame = std::time::Instant::now();
        let dt = frame.duration_since(self.last).as_secs_f32();
        self.last = frame;
        Time {
            dt,
            now: frame.duration_since(self.start).as_secs_f32(),
        }
    }
}
