//! Scene composition
//!
//! Turns match state into draw calls on an abstract `Painter`. Frontends
//! implement `Painter` however they like (GPU, terminal, test recorder);
//! nothing drawn here feeds back into the simulation.

use glam::Vec2;

use crate::sim::{MatchPhase, MatchState, Rect, Side};
use crate::tuning::Tuning;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(240, 240, 240);
    pub const ACCENT: Color = Color(80, 160, 255);
    pub const DARK: Color = Color(25, 28, 35);
    pub const DIM: Color = Color(60, 64, 72);
}

/// Sink for one frame's draw calls
pub trait Painter {
    fn clear(&mut self, color: Color);
    /// Filled rectangle with rounded corners
    fn rounded_rect(&mut self, rect: Rect, corner_radius: f32, color: Color);
    /// Text centered horizontally on `center_x`, with its top at `y`
    fn text(&mut self, center_x: f32, y: f32, size_px: f32, color: Color, text: &str);
}

/// Painter that discards every call (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPainter;

impl Painter for NullPainter {
    fn clear(&mut self, _color: Color) {}
    fn rounded_rect(&mut self, _rect: Rect, _corner_radius: f32, _color: Color) {}
    fn text(&mut self, _center_x: f32, _y: f32, _size_px: f32, _color: Color, _text: &str) {}
}

/// Hand the current match state off to the painter
pub fn draw(painter: &mut impl Painter, state: &MatchState, tuning: &Tuning) {
    painter.clear(Color::DARK);
    draw_center_net(painter, tuning);
    draw_score(painter, state, tuning);

    painter.text(
        tuning.screen_width / 2.0,
        tuning.screen_height - 32.0,
        20.0,
        Color::DIM,
        "Controls: W/S to move | ESC to quit",
    );

    painter.rounded_rect(state.player.rect(tuning), 6.0, Color::WHITE);
    painter.rounded_rect(state.opponent.rect(tuning), 6.0, Color::WHITE);
    painter.rounded_rect(state.ball.rect(tuning), 4.0, Color::ACCENT);

    if state.phase == MatchPhase::GameOver {
        let winner = if state.score.left > state.score.right {
            "You"
        } else {
            "AI"
        };
        painter.text(
            tuning.screen_width / 2.0,
            tuning.screen_height / 2.0 - 24.0,
            48.0,
            Color::ACCENT,
            &format!("{winner} win! Press ESC to exit."),
        );
    }
}

fn draw_center_net(painter: &mut impl Painter, tuning: &Tuning) {
    let dash_h = 18.0;
    let gap = 12.0;
    let x = tuning.screen_width / 2.0 - 2.0;
    let mut y = 0.0;
    while y < tuning.screen_height {
        let dash = Rect::new(
            Vec2::new(x + 2.0, y + dash_h / 2.0),
            Vec2::new(4.0, dash_h),
        );
        painter.rounded_rect(dash, 2.0, Color::DIM);
        y += dash_h + gap;
    }
}

fn draw_score(painter: &mut impl Painter, state: &MatchState, tuning: &Tuning) {
    painter.text(
        tuning.screen_width * 0.25,
        24.0,
        48.0,
        Color::WHITE,
        &state.score.get(Side::Left).to_string(),
    );
    painter.text(
        tuning.screen_width * 0.75,
        24.0,
        48.0,
        Color::WHITE,
        &state.score.get(Side::Right).to_string(),
    );
}
