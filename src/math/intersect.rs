use super::{Point2d, Rect};
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How a ray picks its hit among the four edges of a rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EdgePolicy {
    /// Take the first edge that intersects, testing top, right, bottom, left in turn.
    /// A ray arriving from the left reports the right (far) face of the rectangle.
    #[default]
    FixedOrder,
    /// Take the intersection closest to the ray start.
    /// Equal distances, as at corners, resolve in the fixed edge order.
    Nearest,
}

/// Computes the intersection of the line segments `a1-a2` and `b1-b2`.
///
/// Parallel and collinear segments never intersect, even if they overlap.
/// Both parametric positions are tested inclusively, so touching endpoints count.
pub fn segment_intersection(a1: Point2d, a2: Point2d, b1: Point2d, b2: Point2d) -> Option<Point2d> {
    let denom = (a1.x - a2.x) * (b1.y - b2.y) - (a1.y - a2.y) * (b1.x - b2.x);
    if denom == 0.0 {
        return None;
    }

    let t = ((a1.x - b1.x) * (b1.y - b2.y) - (a1.y - b1.y) * (b1.x - b2.x)) / denom;
    let u = -((a1.x - a2.x) * (a1.y - b1.y) - (a1.y - a2.y) * (a1.x - b1.x)) / denom;

    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(a1 + t * (a2 - a1))
    } else {
        None
    }
}

/// Computes where the ray `start-end` meets the boundary of `rect`.
///
/// # Parameters
/// * `start` - The start of the ray
/// * `end` - The end of the ray
/// * `rect` - The rectangle to test against
/// * `policy` - Which edge wins when the ray crosses more than one
pub fn rectangle_intersection(
    start: Point2d,
    end: Point2d,
    rect: &Rect,
    policy: EdgePolicy,
) -> Option<Point2d> {
    let mut hits = rect
        .edges()
        .into_iter()
        .filter_map(|[e1, e2]| segment_intersection(start, end, e1, e2));

    match policy {
        EdgePolicy::FixedOrder => hits.next(),
        EdgePolicy::Nearest => hits.fold(None, |best: Option<Point2d>, hit| match best {
            Some(best) if start.distance2(best) <= start.distance2(hit) => Some(best),
            _ => Some(hit),
        }),
    }
}
