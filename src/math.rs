//! Mathematical structs and functions.

use cgmath::{Point2, Vector2};
pub use intersect::{rectangle_intersection, segment_intersection, EdgePolicy};
pub use rect::Rect;
pub use util::*;

mod intersect;
mod rect;
mod util;

/// A 2D point
pub type Point2d = Point2<f64>;

/// A 2D vector
pub type Vector2d = Vector2<f64>;
