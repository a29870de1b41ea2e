//! The cone-shaped ranging sensor.

use crate::error::{is_positive, ConfigError};
use crate::math::{project_along, rectangle_intersection, EdgePolicy};
use crate::obstacle::Obstacle;
use crate::vehicle::Pose;
use cgmath::prelude::*;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The angle between neighbouring rays of the fan, in degrees.
pub const DEFAULT_ANGULAR_STEP: f64 = 5.0;

/// Slack used when deciding whether the last ray still lies within the field of view.
const ANGLE_EPSILON: f64 = 1e-9;

/// The attributes of a radar.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RadarAttributes {
    /// The maximum detection distance, in world units.
    pub range: f64,
    /// The angular width of the cone in degrees, centred on the vehicle's heading.
    pub field_of_view: f64,
    /// The angle between neighbouring rays in degrees.
    pub angular_step: f64,
    /// How a ray chooses between the edges of a rectangle it crosses.
    pub edge_policy: EdgePolicy,
}

impl Default for RadarAttributes {
    fn default() -> Self {
        Self {
            range: 200.0,
            field_of_view: 60.0,
            angular_step: DEFAULT_ANGULAR_STEP,
            edge_policy: EdgePolicy::FixedOrder,
        }
    }
}

/// A single ray's hit.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Detection {
    /// The distance from the vehicle to the hit.
    pub distance: f64,
    /// The ray's angle in degrees relative to the vehicle's heading.
    /// Positive angles are counter-clockwise.
    pub relative_angle: f64,
}

/// A radar which casts a fan of rays from the vehicle and reports
/// where they meet obstacles. It holds no state between scans.
#[derive(Clone, Debug)]
pub struct Radar {
    attribs: RadarAttributes,
}

impl Radar {
    /// Creates a new radar.
    pub fn new(attribs: &RadarAttributes) -> Result<Self, ConfigError> {
        if !is_positive(attribs.range) {
            return Err(ConfigError::InvalidRange(attribs.range));
        }
        if !is_positive(attribs.field_of_view) || attribs.field_of_view > 360.0 {
            return Err(ConfigError::InvalidFieldOfView(attribs.field_of_view));
        }
        if !is_positive(attribs.angular_step) {
            return Err(ConfigError::InvalidAngularStep(attribs.angular_step));
        }
        Ok(Self { attribs: *attribs })
    }

    /// The radar's attributes.
    pub fn attributes(&self) -> &RadarAttributes {
        &self.attribs
    }

    /// The maximum detection distance.
    pub fn range(&self) -> f64 {
        self.attribs.range
    }

    /// The angular width of the cone in degrees.
    pub fn field_of_view(&self) -> f64 {
        self.attribs.field_of_view
    }

    /// The number of rays cast per scan, which bounds the number of detections.
    pub fn ray_count(&self) -> usize {
        let steps = self.attribs.field_of_view / self.attribs.angular_step;
        (steps + ANGLE_EPSILON).floor() as usize + 1
    }

    /// Returns the absolute angles of the rays cast from a vehicle with the given heading,
    /// starting at the clockwise edge of the cone and ascending.
    pub fn ray_angles(&self, heading: f64) -> impl Iterator<Item = f64> {
        let start = heading - 0.5 * self.attribs.field_of_view;
        let step = self.attribs.angular_step;
        (0..self.ray_count()).map(move |i| start + step * i as f64)
    }

    /// Scans for obstacles from the given pose.
    ///
    /// Each ray reports at most one detection: its hit on the *first* obstacle in
    /// `obstacles` that it crosses. This is not necessarily the nearest obstacle,
    /// so an obstacle listed earlier hides those behind and in front of it alike.
    /// Detections are returned in ascending ray angle.
    pub fn scan(&self, pose: &Pose, obstacles: &[Obstacle]) -> Vec<Detection> {
        let origin = pose.position;
        let policy = self.attribs.edge_policy;
        self.ray_angles(pose.heading)
            .filter_map(|angle| {
                let end = project_along(origin, angle, self.attribs.range);
                obstacles
                    .iter()
                    .find_map(|obstacle| {
                        rectangle_intersection(origin, end, obstacle.rect(), policy)
                    })
                    .map(|hit| Detection {
                        distance: origin.distance(hit),
                        relative_angle: angle - pose.heading,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};

    fn radar(edge_policy: EdgePolicy) -> Radar {
        Radar::new(&RadarAttributes {
            edge_policy,
            ..Default::default()
        })
        .unwrap()
    }

    fn ahead(detections: &[Detection]) -> Option<Detection> {
        detections
            .iter()
            .copied()
            .find(|det| det.relative_angle.abs() < 1e-9)
    }

    #[test]
    fn ray_fan() {
        let radar = radar(EdgePolicy::FixedOrder);
        assert_eq!(radar.attributes().angular_step, DEFAULT_ANGULAR_STEP);
        assert_eq!(radar.ray_count(), 13);
        let angles = radar.ray_angles(10.0).collect::<Vec<_>>();
        assert_approx_eq!(angles[0], -20.0);
        assert_approx_eq!(angles[6], 10.0);
        assert_approx_eq!(angles[12], 40.0);
    }

    #[test]
    fn obstacle_directly_ahead() {
        let pose = Pose::new(400.0, 300.0, 0.0);
        let obstacles = [Obstacle::new(500.0, 280.0, 30.0, 30.0)];

        // The top edge is parallel to the centre ray, so the right edge is the first hit
        let detections = radar(EdgePolicy::FixedOrder).scan(&pose, &obstacles);
        assert!(!detections.is_empty());
        assert_approx_eq!(ahead(&detections).unwrap().distance, 130.0, 2.0);

        let nearest = radar(EdgePolicy::Nearest);
        assert_eq!(nearest.attributes().edge_policy, EdgePolicy::Nearest);
        let detections = nearest.scan(&pose, &obstacles);
        assert!(detections
            .iter()
            .any(|det| (det.distance - 100.0).abs() <= 2.0 && det.relative_angle.abs() <= 10.0));
        assert_approx_eq!(ahead(&detections).unwrap().distance, 100.0, 1e-6);
    }

    #[test]
    fn obstacle_outside_cone() {
        let pose = Pose::new(400.0, 300.0, 0.0);
        let obstacles = [Obstacle::new(400.0, 600.0, 30.0, 30.0)];
        for policy in [EdgePolicy::FixedOrder, EdgePolicy::Nearest] {
            assert!(radar(policy).scan(&pose, &obstacles).is_empty());
        }
    }

    #[test]
    fn obstacle_beyond_range() {
        let pose = Pose::new(100.0, 300.0, 0.0);
        let obstacles = [Obstacle::new(310.0, 280.0, 30.0, 30.0)];
        assert!(radar(EdgePolicy::FixedOrder).scan(&pose, &obstacles).is_empty());
    }

    #[test]
    fn facing_up_the_screen() {
        let pose = Pose::new(400.0, 300.0, 90.0);
        let obstacles = [Obstacle::new(385.0, 150.0, 30.0, 30.0)];
        let detections = radar(EdgePolicy::FixedOrder).scan(&pose, &obstacles);
        assert_approx_eq!(ahead(&detections).unwrap().distance, 150.0, 1e-6);
    }

    /// The first listed obstacle wins, even when another one is nearer.
    #[test]
    fn first_listed_obstacle_occludes() {
        let pose = Pose::new(100.0, 100.0, 0.0);
        let far = Obstacle::new(300.0, 90.0, 20.0, 20.0);
        let near = Obstacle::new(200.0, 90.0, 20.0, 20.0);
        let radar = Radar::new(&RadarAttributes {
            range: 300.0,
            ..Default::default()
        })
        .unwrap();

        let det = ahead(&radar.scan(&pose, &[far, near])).unwrap();
        assert_approx_eq!(det.distance, 220.0, 1e-6);

        let det = ahead(&radar.scan(&pose, &[near, far])).unwrap();
        assert_approx_eq!(det.distance, 120.0, 1e-6);
    }

    #[test]
    fn scans_are_deterministic_and_bounded() {
        let mut rng = rand::rngs::StdRng::from_seed(*b"Radar sees only what comes first");
        let radar = radar(EdgePolicy::FixedOrder);
        for _ in 0..100 {
            let pose = Pose::new(
                rng.gen_range(0.0..800.0),
                rng.gen_range(0.0..600.0),
                rng.gen_range(0.0..360.0),
            );
            let obstacles = (0..10)
                .map(|_| {
                    let size = rng.gen_range(20.0..60.0);
                    let (x, y) = (rng.gen_range(0.0..800.0), rng.gen_range(0.0..600.0));
                    Obstacle::new(x, y, size, size)
                })
                .collect::<Vec<_>>();

            let detections = radar.scan(&pose, &obstacles);
            assert_eq!(detections, radar.scan(&pose, &obstacles));
            assert!(detections.len() <= radar.ray_count());
            for det in &detections {
                assert!(det.distance >= 0.0 && det.distance <= radar.range() + 1e-9);
                assert!(det.relative_angle.abs() <= 0.5 * radar.field_of_view() + 1e-9);
            }
            assert!(detections
                .iter()
                .tuple_windows()
                .all(|(a, b)| a.relative_angle < b.relative_angle));
        }
    }

    #[test]
    fn rejects_bad_attributes() {
        let attribs = RadarAttributes {
            range: 0.0,
            ..Default::default()
        };
        assert_eq!(Radar::new(&attribs).unwrap_err(), ConfigError::InvalidRange(0.0));

        let attribs = RadarAttributes {
            field_of_view: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(Radar::new(&attribs), Err(ConfigError::InvalidFieldOfView(_))));

        let attribs = RadarAttributes {
            angular_step: -5.0,
            ..Default::default()
        };
        assert_eq!(Radar::new(&attribs).unwrap_err(), ConfigError::InvalidAngularStep(-5.0));
    }
}
