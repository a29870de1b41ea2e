use super::{Point2d, Vector2d};
use cgmath::{Angle, Deg};

/// The unit vector pointing along `heading`, in screen space.
///
/// Headings are in degrees, counter-clockwise from the positive x-axis.
/// The y-axis points down the screen, so a positive heading decreases y.
pub fn heading_vector(heading: f64) -> Vector2d {
    let (sin, cos) = Deg(heading).sin_cos();
    Vector2d::new(cos, -sin)
}

/// The point `distance` units away from `origin` along `heading`.
pub fn project_along(origin: Point2d, heading: f64, distance: f64) -> Point2d {
    origin + distance * heading_vector(heading)
}

/// Wraps an angle in degrees into the range [0, 360).
pub fn wrap_degrees(angle: f64) -> f64 {
    angle.rem_euclid(360.0)
}
