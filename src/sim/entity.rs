//! Moving rectangles: the ball and both paddles

use serde::{Deserialize, Serialize};

use super::collision::Rect;

/// Movement along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    Negative,
    #[default]
    Still,
    Positive,
}

impl Direction {
    pub const LEFT: Direction = Direction::Negative;
    pub const RIGHT: Direction = Direction::Positive;
    pub const UP: Direction = Direction::Negative;
    pub const DOWN: Direction = Direction::Positive;

    /// -1, 0 or +1
    #[inline]
    pub fn sign(self) -> i32 {
        match self {
            Direction::Negative => -1,
            Direction::Still => 0,
            Direction::Positive => 1,
        }
    }
}

/// An axis-aligned rectangle with a speed and a per-axis direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovingEntity {
    pub rect: Rect,
    /// Pixels per tick along each moving axis
    pub speed: i32,
    pub x_dir: Direction,
    pub y_dir: Direction,
}

impl MovingEntity {
    pub fn new(rect: Rect, speed: i32) -> Self {
        Self {
            rect,
            speed,
            x_dir: Direction::Still,
            y_dir: Direction::Still,
        }
    }

    pub fn with_direction(mut self, x_dir: Direction, y_dir: Direction) -> Self {
        self.x_dir = x_dir;
        self.y_dir = y_dir;
        self
    }

    /// Move one tick along the current directions (no bounds checks)
    pub fn advance(&mut self) {
        self.rect.x += self.speed * self.x_dir.sign();
        self.rect.y += self.speed * self.y_dir.sign();
    }

    /// Halt vertical motion
    #[inline]
    pub fn stop_vertical(&mut self) {
        self.y_dir = Direction::Still;
    }
}
