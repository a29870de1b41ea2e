use crate::math::Rect;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A rectangular obstacle the vehicle must avoid and the radar can see.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Obstacle {
    /// The world space extents of the obstacle.
    rect: Rect,
}

impl Obstacle {
    /// Creates an obstacle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            rect: Rect::new(x, y, width, height),
        }
    }

    /// The world space extents of the obstacle.
    pub fn rect(&self) -> &Rect {
        &self.rect
    }
}

impl From<Rect> for Obstacle {
    fn from(rect: Rect) -> Self {
        Self { rect }
    }
}
