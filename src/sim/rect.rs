//! Axis-aligned rectangles in screen space
//!
//! Screen coordinates: origin at the top-left, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    pub fn from_size(size: Vec2) -> Self {
        Self {
            pos: Vec2::ZERO,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Move so the center lands on `center`
    pub fn set_center(&mut self, center: Vec2) {
        self.pos = center - self.size * 0.5;
    }

    /// Midpoint of the bottom edge
    pub fn mid_bottom(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.bottom())
    }

    pub fn set_mid_bottom(&mut self, point: Vec2) {
        self.pos = Vec2::new(point.x - self.size.x * 0.5, point.y - self.size.y);
    }

    /// Midpoint of the top edge
    pub fn mid_top(&self) -> Vec2 {
        Vec2::new(self.pos.x + self.size.x * 0.5, self.pos.y)
    }

    pub fn set_mid_top(&mut self, point: Vec2) {
        self.pos = Vec2::new(point.x - self.size.x * 0.5, point.y);
    }

    /// Overlap test. Touching edges count as overlap.
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && other.left() <= self.right()
            && self.top() <= other.bottom()
            && other.top() <= self.bottom()
    }

    /// Point containment (half-open on the right/bottom edges)
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.left()
            && point.x < self.right()
            && point.y >= self.top()
            && point.y < self.bottom()
    }
}
