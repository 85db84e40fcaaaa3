//! Axis-aligned rectangle geometry
//!
//! Integer coordinates, y grows downward. Edges follow the half-open
//! convention: `right = x + width`, so two rectangles that merely touch do
//! not overlap.

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::assets::SpriteSize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle of the sprite's size at the origin
    pub fn of_size(size: SpriteSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    #[inline]
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.center_x(), self.y + self.height / 2)
    }

    /// Move so the center lands on `center`
    pub fn set_center(&mut self, center: IVec2) {
        self.x = center.x - self.width / 2;
        self.y = center.y - self.height / 2;
    }

    /// Move so the middle of the bottom edge lands on `point`
    pub fn set_mid_bottom(&mut self, point: IVec2) {
        self.x = point.x - self.width / 2;
        self.y = point.y - self.height;
    }

    pub fn translate(&mut self, delta: IVec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Strict overlap test (shared edges do not count)
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }
}
