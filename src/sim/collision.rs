//! Axis-aligned rectangle geometry and overlap testing
//!
//! Every collision in the game is a rectangle-vs-rectangle test: ball against
//! paddles and borders, paddles against borders.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle covering the half-open region [x, x+w) x [y, y+h)
///
/// A negative width or height extends the region to the left of / above the
/// origin instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn position(&self) -> IVec2 {
        IVec2::new(self.x, self.y)
    }

    #[inline]
    pub fn size(&self) -> IVec2 {
        IVec2::new(self.w, self.h)
    }

    /// Same region, with non-negative width and height
    pub fn normalized(&self) -> Rect {
        let (x, w) = if self.w < 0 { (self.x + self.w, -self.w) } else { (self.x, self.w) };
        let (y, h) = if self.h < 0 { (self.y + self.h, -self.h) } else { (self.y, self.h) };
        Rect { x, y, w, h }
    }

    /// True if the region covers no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> i32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    /// Centre point (rounded toward the origin corner)
    pub fn center(&self) -> IVec2 {
        IVec2::new(self.x + self.w / 2, self.y + self.h / 2)
    }
}

/// Check whether two rectangles overlap
///
/// Rectangles that only share an edge do not overlap, and an empty rectangle
/// never overlaps anything.
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    let a = a.normalized();
    let b = b.normalized();

    if a.is_empty() || b.is_empty() {
        return false;
    }

    // Separated on either axis means no overlap
    if a.bottom() <= b.top() || a.top() >= b.bottom() {
        return false;
    }
    if a.right() <= b.left() || a.left() >= b.right() {
        return false;
    }

    true
}
