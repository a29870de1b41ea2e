use super::Point2d;
use crate::util::Interval;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space, where `top` has the smaller y.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    /// The horizontal extents.
    pub x: Interval<f64>,
    /// The vertical extents.
    pub y: Interval<f64>,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: Interval::new(x, x + width),
            y: Interval::new(y, y + height),
        }
    }

    /// Creates a rectangle centred on `centre`.
    pub fn from_centre(centre: Point2d, width: f64, height: f64) -> Self {
        Self {
            x: Interval::disc(centre.x, 0.5 * width),
            y: Interval::disc(centre.y, 0.5 * height),
        }
    }

    pub fn left(&self) -> f64 {
        self.x.min
    }

    pub fn right(&self) -> f64 {
        self.x.max
    }

    pub fn top(&self) -> f64 {
        self.y.min
    }

    pub fn bottom(&self) -> f64 {
        self.y.max
    }

    pub fn width(&self) -> f64 {
        self.x.length()
    }

    pub fn height(&self) -> f64 {
        self.y.length()
    }

    pub fn centre(&self) -> Point2d {
        Point2d::new(self.x.midpoint(), self.y.midpoint())
    }

    /// The four boundary segments, in the order top, right, bottom, left.
    pub fn edges(&self) -> [[Point2d; 2]; 4] {
        let tl = Point2d::new(self.left(), self.top());
        let tr = Point2d::new(self.right(), self.top());
        let br = Point2d::new(self.right(), self.bottom());
        let bl = Point2d::new(self.left(), self.bottom());
        [[tl, tr], [tr, br], [br, bl], [bl, tl]]
    }

    /// Returns true if the two rectangles overlap. Touching edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x.overlaps(&other.x) && self.y.overlaps(&other.y)
    }

    /// Returns true if the point lies inside or on the boundary of the rectangle.
    pub fn contains(&self, point: Point2d) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }

    /// Moves this rectangle by the smallest amount that places it inside `bounds`.
    pub fn clamp(&self, bounds: &Rect) -> Rect {
        Rect {
            x: self.x.clamp(&bounds.x),
            y: self.y.clamp(&bounds.y),
        }
    }
}
