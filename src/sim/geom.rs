//! Axis-aligned rectangles for obstacles and hitboxes
//!
//! World space is screen-like: x grows to the right, y grows downward, so a
//! rectangle's `top` is its smallest y.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left corner + size)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
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

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Penetration depth on each axis
    ///
    /// Either component `<= 0` means the rectangles do not touch.
    pub fn penetration(&self, other: &Rect) -> Vec2 {
        Vec2::new(
            self.right().min(other.right()) - self.left().max(other.left()),
            self.bottom().min(other.bottom()) - self.top().max(other.top()),
        )
    }

    /// Shrink by `fraction` of each dimension, keeping the center fixed
    pub fn shrunk(&self, fraction: f32) -> Rect {
        let inset = self.size * fraction;
        Rect {
            pos: self.pos + inset * 0.5,
            size: self.size - inset,
        }
    }
}
