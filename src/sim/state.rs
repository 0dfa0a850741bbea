//! Match state and core simulation types
//!
//! Paddles, ball, score and the AI targeting state. Everything here is
//! driven by `tick` and reads its knobs from `Tuning`.

use glam::Vec2;
use rand::Rng;

use super::collision::paddle_deflection;
use super::rect::Rect;
use crate::reflect_off_bounds;
use crate::tuning::Tuning;

/// Which side of the court a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Horizontal direction pointing away from this side's goal line.
    /// A ball leaving this side's paddle travels in this direction.
    #[inline]
    pub fn away(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }

    /// X of this side's paddle center
    pub fn paddle_x(self, tuning: &Tuning) -> f32 {
        match self {
            Side::Left => tuning.paddle_margin + tuning.paddle_width / 2.0,
            Side::Right => tuning.screen_width - tuning.paddle_margin - tuning.paddle_width / 2.0,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Rally in progress (or ball waiting to serve)
    Playing,
    /// One side reached the win threshold; terminal display state
    GameOver,
}

/// Points tally for both sides
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// The side that reached the win threshold, if any
    pub fn winner(&self, target: u32) -> Option<Side> {
        if self.left >= target {
            Some(Side::Left)
        } else if self.right >= target {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// A paddle pinned to one side of the court
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    /// Vertical center, clamped to the court by every update
    pub y: f32,
}

impl Paddle {
    /// Create a paddle centered on its side
    pub fn new(side: Side, tuning: &Tuning) -> Self {
        Self {
            side,
            y: tuning.screen_height / 2.0,
        }
    }

    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(
            Vec2::new(self.side.paddle_x(tuning), self.y),
            Vec2::new(tuning.paddle_width, tuning.paddle_height),
        )
    }

    /// Shared movement primitive: displace and clamp to the court.
    /// Both update strategies go through here.
    pub fn move_by(&mut self, dy: f32, tuning: &Tuning) {
        self.y = tuning.clamp_paddle_y(self.y + dy);
    }

    /// Player-driven update from two independent key states (both held
    /// cancels out)
    pub fn steer(&mut self, dt: f32, up: bool, down: bool, tuning: &Tuning) {
        let mut dy = 0.0;
        if up {
            dy -= tuning.paddle_speed * dt;
        }
        if down {
            dy += tuning.paddle_speed * dt;
        }
        self.move_by(dy, tuning);
    }
}

/// Targeting state for an AI-driven paddle
///
/// Re-aims on a randomized reaction timer instead of every frame, adds a
/// speed-scaled aim error, and tracks its target with damping. The delay,
/// the error and the damping are what keep the AI beatable.
#[derive(Debug, Clone, Copy)]
pub struct AiTracker {
    reaction_timer: f32,
    next_reaction_at: f32,
    target_y: f32,
    aim_error: f32,
}

impl AiTracker {
    pub fn new(tuning: &Tuning, rng: &mut impl Rng) -> Self {
        Self {
            reaction_timer: 0.0,
            next_reaction_at: Self::rand_reaction_delay(tuning, rng),
            target_y: tuning.screen_height / 2.0,
            aim_error: 0.0,
        }
    }

    /// Where the tracker is currently steering its paddle
    pub fn target_y(&self) -> f32 {
        self.target_y
    }

    fn rand_reaction_delay(tuning: &Tuning, rng: &mut impl Rng) -> f32 {
        let (lo, hi) = tuning.ai_reaction_delay;
        rng.random_range(lo..=hi)
    }

    fn rand_aim_error(tuning: &Tuning, rng: &mut impl Rng) -> f32 {
        let (lo, hi) = tuning.ai_aim_error;
        let sign = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        rng.random_range(lo..=hi) * sign
    }

    /// AI-driven update strategy for `paddle`
    pub fn drive(
        &mut self,
        paddle: &mut Paddle,
        dt: f32,
        ball: &Ball,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) {
        self.reaction_timer += dt;
        if self.reaction_timer >= self.next_reaction_at {
            // Re-decide the target periodically to avoid perfect tracking
            self.reaction_timer = 0.0;
            self.next_reaction_at = Self::rand_reaction_delay(tuning, rng);
            self.retarget(paddle, ball, tuning, rng);
        }

        // Smoothly track the target with damping and a speed limit
        let desired = (self.target_y - paddle.y) * tuning.ai_track_damping;
        let max_step = tuning.ai_max_speed * dt;
        paddle.move_by(desired.clamp(-max_step, max_step), tuning);
    }

    fn retarget(&mut self, paddle: &Paddle, ball: &Ball, tuning: &Tuning, rng: &mut impl Rng) {
        let toward = ball.vel.x != 0.0 && ball.vel.x * paddle.side.away() < 0.0;
        if toward {
            // Estimate where the ball will be when it reaches our x
            let paddle_rect = paddle.rect(tuning);
            let ball_rect = ball.rect(tuning);
            let gap = match paddle.side {
                Side::Left => paddle_rect.right() - ball_rect.left(),
                Side::Right => paddle_rect.left() - ball_rect.right(),
            };
            let time_to_reach = gap / ball.vel.x;
            let predicted = ball.pos.y + ball.vel.y * time_to_reach * tuning.ai_lookahead;

            // Fold the prediction off the walls to avoid over-shoot
            let (lo, hi) = tuning.ball_bounds();
            let predicted = reflect_off_bounds(predicted, lo, hi);

            // Faster ball, larger permitted error
            let error_scale = (ball.vel.x.abs() / tuning.ball_speed_max).min(1.0);
            self.aim_error = Self::rand_aim_error(tuning, rng) * error_scale;
            self.target_y = predicted + self.aim_error;
        } else {
            // Ball moving away: drift back toward center with slight randomness
            self.aim_error = Self::rand_aim_error(tuning, rng) * 0.3;
            self.target_y = tuning.screen_height / 2.0 + self.aim_error;
        }
    }
}

/// The ball, a small axis-aligned square
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    /// Velocity in px/s; exactly zero while waiting to serve
    pub vel: Vec2,
    /// Rally speed scalar, ramps up per paddle hit
    pub speed: f32,
    /// Sign of the next serve's horizontal velocity
    serve_dir: f32,
    /// Absolute time of the next serve
    serve_at: f32,
}

impl Ball {
    /// Create the ball centered on the court, waiting for the first serve
    /// in a random direction
    pub fn new(tuning: &Tuning, rng: &mut impl Rng) -> Self {
        Self {
            pos: tuning.center(),
            vel: Vec2::ZERO,
            speed: tuning.ball_speed,
            serve_dir: if rng.random_bool(0.5) { 1.0 } else { -1.0 },
            serve_at: tuning.serve_delay,
        }
    }

    pub fn rect(&self, tuning: &Tuning) -> Rect {
        Rect::new(self.pos, Vec2::splat(tuning.ball_size))
    }

    /// True while the ball sits waiting for its serve timer
    pub fn waiting_to_serve(&self) -> bool {
        self.vel == Vec2::ZERO
    }

    /// Launch a stationary ball once the serve timer has elapsed
    pub fn serve_if_ready(&mut self, now: f32, tuning: &Tuning, rng: &mut impl Rng) {
        if self.vel != Vec2::ZERO || now < self.serve_at {
            return;
        }
        // Slightly off horizontal
        let angle = rng.random_range(-tuning.serve_angle..=tuning.serve_angle);
        self.vel = Vec2::new(
            self.serve_dir * self.speed * angle.cos(),
            self.speed * angle.sin(),
        );
    }

    /// Recenter the ball and schedule a delayed serve. The serve travels
    /// away from the scorer, toward the side that gave up the point.
    pub fn reset(&mut self, scorer: Side, now: f32, tuning: &Tuning) {
        self.pos = tuning.center();
        self.speed = tuning.ball_speed;
        self.vel = Vec2::ZERO;
        self.serve_dir = scorer.away();
        self.serve_at = now + tuning.serve_delay;
    }

    /// Stop the ball in place (match over)
    pub fn halt(&mut self) {
        self.vel = Vec2::ZERO;
    }

    /// Advance one step. Returns the scoring side if the ball left the
    /// court.
    pub fn update(
        &mut self,
        dt: f32,
        now: f32,
        left: &Paddle,
        right: &Paddle,
        tuning: &Tuning,
        rng: &mut impl Rng,
    ) -> Option<Side> {
        self.serve_if_ready(now, tuning, rng);
        if self.waiting_to_serve() {
            return None;
        }

        self.pos += self.vel * dt;

        // Elastic bounce off the top and bottom walls
        let (lo, hi) = tuning.ball_bounds();
        if self.pos.y <= lo {
            self.pos.y = lo;
            self.vel.y = -self.vel.y;
        } else if self.pos.y >= hi {
            self.pos.y = hi;
            self.vel.y = -self.vel.y;
        }

        // Each paddle only deflects a ball moving toward it, so one frame
        // never processes the same hit twice
        if self.vel.x < 0.0 && self.rect(tuning).overlaps(&left.rect(tuning)) {
            self.bounce_off(left, tuning, rng);
        } else if self.vel.x > 0.0 && self.rect(tuning).overlaps(&right.rect(tuning)) {
            self.bounce_off(right, tuning, rng);
        }

        // A ball fully past a goal line scores for the far side
        let half = tuning.ball_size / 2.0;
        if self.pos.x + half < 0.0 {
            return Some(Side::Right);
        }
        if self.pos.x - half > tuning.screen_width {
            return Some(Side::Left);
        }
        None
    }

    fn bounce_off(&mut self, paddle: &Paddle, tuning: &Tuning, rng: &mut impl Rng) {
        let hit = paddle_deflection(self.pos.y, paddle.y, tuning.paddle_height, tuning.max_bounce_angle);

        // Speed ramps up on each hit, capped
        self.speed = (self.speed + tuning.ball_speed_increment).min(tuning.ball_speed_max);
        let dir = paddle.side.away();
        self.vel = Vec2::new(
            dir * self.speed * hit.angle.cos(),
            self.speed * hit.angle.sin(),
        );

        // Reseat flush against the paddle face so the ball can't stick
        let paddle_rect = paddle.rect(tuning);
        let half = tuning.ball_size / 2.0;
        self.pos.x = match paddle.side {
            Side::Left => paddle_rect.right() + half,
            Side::Right => paddle_rect.left() - half,
        };

        // Tiny vertical jitter breaks up perfectly periodic rallies
        if tuning.bounce_jitter > 0.0 {
            self.vel.y += rng.random_range(-tuning.bounce_jitter..=tuning.bounce_jitter);
        }
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub phase: MatchPhase,
    pub score: Score,
    /// Left paddle, human-driven (AI-driven in idle mode)
    pub player: Paddle,
    /// Right paddle, always AI-driven
    pub opponent: Paddle,
    /// Targeting state for the opponent
    pub tracker: AiTracker,
    /// Targeting state for the player's paddle in idle mode
    pub idle_tracker: AiTracker,
    pub ball: Ball,
}

impl MatchState {
    pub fn new(tuning: &Tuning, rng: &mut impl Rng) -> Self {
        Self {
            phase: MatchPhase::Playing,
            score: Score::default(),
            player: Paddle::new(Side::Left, tuning),
            opponent: Paddle::new(Side::Right, tuning),
            tracker: AiTracker::new(tuning, rng),
            idle_tracker: AiTracker::new(tuning, rng),
            ball: Ball::new(tuning, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(7)
    }

    #[test]
    fn test_paddle_steer_clamps_to_court() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(Side::Left, &tuning);

        // Hold "up" far longer than the court is tall
        for _ in 0..10_000 {
            paddle.steer(1.0 / 60.0, true, false, &tuning);
        }
        assert_eq!(paddle.y, tuning.paddle_height / 2.0);

        for _ in 0..10_000 {
            paddle.steer(1.0 / 60.0, false, true, &tuning);
        }
        assert_eq!(paddle.y, tuning.screen_height - tuning.paddle_height / 2.0);
    }

    #[test]
    fn test_paddle_steer_both_keys_cancel() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(Side::Left, &tuning);
        let before = paddle.y;
        paddle.steer(0.1, true, true, &tuning);
        assert_eq!(paddle.y, before);
    }

    #[test]
    fn test_ball_waits_then_serves() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut ball = Ball::new(&tuning, &mut rng);
        assert!(ball.waiting_to_serve());

        // Before the serve deadline nothing happens
        ball.serve_if_ready(tuning.serve_delay / 2.0, &tuning, &mut rng);
        assert!(ball.waiting_to_serve());

        ball.serve_if_ready(tuning.serve_delay, &tuning, &mut rng);
        assert!(!ball.waiting_to_serve());
        // Serve speed is the base speed
        assert!((ball.vel.length() - tuning.ball_speed).abs() < 1e-3);
        // Launch angle stays within the configured spread
        let angle = (ball.vel.y / ball.vel.x.abs()).atan();
        assert!(angle.abs() <= tuning.serve_angle + 1e-3);
    }

    #[test]
    fn test_wall_bounce_flips_vertical_velocity() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut ball = Ball::new(&tuning, &mut rng);
        let (lo, _) = tuning.ball_bounds();

        ball.pos = Vec2::new(400.0, lo + 1.0);
        ball.vel = Vec2::new(120.0, -200.0);
        let left = Paddle::new(Side::Left, &tuning);
        let right = Paddle::new(Side::Right, &tuning);

        let scored = ball.update(0.05, 100.0, &left, &right, &tuning, &mut rng);
        assert_eq!(scored, None);
        assert_eq!(ball.vel.y, 200.0);
        assert_eq!(ball.vel.x, 120.0);
        assert!(ball.pos.y >= lo);
    }

    #[test]
    fn test_paddle_hit_ramps_speed_to_cap() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut ball = Ball::new(&tuning, &mut rng);
        let right = Paddle::new(Side::Right, &tuning);

        let mut previous = ball.speed;
        for _ in 0..40 {
            ball.pos = Vec2::new(right.rect(&tuning).left() - 1.0, right.y);
            ball.vel = Vec2::new(ball.speed, 0.0);
            ball.bounce_off(&right, &tuning, &mut rng);
            assert!(ball.speed >= previous);
            assert!(ball.speed <= tuning.ball_speed_max);
            if previous + tuning.ball_speed_increment <= tuning.ball_speed_max {
                assert_eq!(ball.speed, previous + tuning.ball_speed_increment);
            }
            previous = ball.speed;
        }
        assert_eq!(ball.speed, tuning.ball_speed_max);
    }

    #[test]
    fn test_center_hit_rebounds_horizontally() {
        // Jitter off so the rebound is exactly flat
        let tuning = Tuning {
            bounce_jitter: 0.0,
            ..Tuning::default()
        };
        let mut rng = rng();
        let mut ball = Ball::new(&tuning, &mut rng);
        let left = Paddle::new(Side::Left, &tuning);

        ball.pos = Vec2::new(left.rect(&tuning).right() + 1.0, left.y);
        ball.vel = Vec2::new(-tuning.ball_speed, 0.0);
        ball.bounce_off(&left, &tuning, &mut rng);

        assert_eq!(ball.vel.y, 0.0);
        assert!(ball.vel.x > 0.0);
        // Flush against the paddle face
        assert_eq!(
            ball.pos.x,
            left.rect(&tuning).right() + tuning.ball_size / 2.0
        );
    }

    #[test]
    fn test_ball_past_right_edge_scores_for_left() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut ball = Ball::new(&tuning, &mut rng);
        let left = Paddle::new(Side::Left, &tuning);
        let right = Paddle::new(Side::Right, &tuning);

        ball.pos = Vec2::new(tuning.screen_width + tuning.ball_size / 2.0 + 1.0, 300.0);
        ball.vel = Vec2::new(400.0, 0.0);
        let scored = ball.update(1.0 / 120.0, 100.0, &left, &right, &tuning, &mut rng);
        assert_eq!(scored, Some(Side::Left));
    }

    #[test]
    fn test_ball_past_left_edge_scores_for_right() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut ball = Ball::new(&tuning, &mut rng);
        let left = Paddle::new(Side::Left, &tuning);
        let right = Paddle::new(Side::Right, &tuning);

        ball.pos = Vec2::new(-tuning.ball_size / 2.0 - 1.0, 300.0);
        ball.vel = Vec2::new(-400.0, 0.0);
        let scored = ball.update(1.0 / 120.0, 100.0, &left, &right, &tuning, &mut rng);
        assert_eq!(scored, Some(Side::Right));
    }

    #[test]
    fn test_ai_drifts_to_center_when_ball_moves_away() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut ball = Ball::new(&tuning, &mut rng);
        // Ball heading toward the left side, away from the right paddle
        ball.pos = Vec2::new(400.0, 100.0);
        ball.vel = Vec2::new(-300.0, 0.0);

        let mut paddle = Paddle::new(Side::Right, &tuning);
        paddle.y = 100.0;
        let mut tracker = AiTracker::new(&tuning, &mut rng);

        // Enough frames for several re-aim cycles
        for _ in 0..240 {
            tracker.drive(&mut paddle, 1.0 / 60.0, &ball, &tuning, &mut rng);
        }

        let center = tuning.screen_height / 2.0;
        let max_drift = tuning.ai_aim_error.1 * 0.3;
        assert!(
            (tracker.target_y() - center).abs() <= max_drift + 1e-3,
            "target {} should settle near center {}",
            tracker.target_y(),
            center
        );
        assert!((paddle.y - center).abs() < 60.0);
    }

    #[test]
    fn test_ai_moves_toward_incoming_ball() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut ball = Ball::new(&tuning, &mut rng);
        // Ball heading straight at the right paddle, aimed low
        ball.pos = Vec2::new(300.0, 450.0);
        ball.vel = Vec2::new(350.0, 0.0);

        let mut paddle = Paddle::new(Side::Right, &tuning);
        let start = paddle.y;
        let mut tracker = AiTracker::new(&tuning, &mut rng);

        for _ in 0..60 {
            tracker.drive(&mut paddle, 1.0 / 60.0, &ball, &tuning, &mut rng);
        }
        assert!(paddle.y > start, "paddle should move down toward the ball");
    }

    #[test]
    fn test_reset_schedules_delayed_serve() {
        let tuning = Tuning::default();
        let mut rng = rng();
        let mut ball = Ball::new(&tuning, &mut rng);
        ball.vel = Vec2::new(500.0, 50.0);
        ball.speed = tuning.ball_speed_max;

        ball.reset(Side::Left, 10.0, &tuning);
        assert!(ball.waiting_to_serve());
        assert_eq!(ball.speed, tuning.ball_speed);
        assert_eq!(ball.pos, tuning.center());

        // Not yet: the serve delay has not elapsed
        ball.serve_if_ready(10.0 + tuning.serve_delay / 2.0, &tuning, &mut rng);
        assert!(ball.waiting_to_serve());
        ball.serve_if_ready(10.0 + tuning.serve_delay, &tuning, &mut rng);
        assert!(!ball.waiting_to_serve());
    }

    #[test]
    fn test_score_winner() {
        let mut score = Score::default();
        for _ in 0..9 {
            score.award(Side::Right);
        }
        assert_eq!(score.winner(10), None);
        score.award(Side::Right);
        assert_eq!(score.winner(10), Some(Side::Right));
        assert_eq!(score.get(Side::Right), 10);
        assert_eq!(score.get(Side::Left), 0);
    }
}
