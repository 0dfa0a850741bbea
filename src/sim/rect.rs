//! Axis-aligned rectangle geometry for paddles and the ball
//!
//! Screen coordinates: the origin is the top-left corner and y grows
//! downward, so `top() < bottom()`.

use glam::Vec2;

/// An axis-aligned rectangle stored as center and half-extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub center: Vec2,
    pub half: Vec2,
}

impl Rect {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size / 2.0,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.center.x - self.half.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.center.x + self.half.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.center.y - self.half.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.center.y + self.half.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.half.x * 2.0
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.half.y * 2.0
    }

    /// Check if two rectangles overlap (shared edges count as touching)
    pub fn overlaps(&self, other: &Rect) -> bool {
        (self.center.x - other.center.x).abs() <= self.half.x + other.half.x
            && (self.center.y - other.center.y).abs() <= self.half.y + other.half.y
    }

    /// Check if a point lies inside the rectangle
    pub fn contains(&self, point: Vec2) -> bool {
        (point.x - self.center.x).abs() <= self.half.x
            && (point.y - self.center.y).abs() <= self.half.y
    }
}
