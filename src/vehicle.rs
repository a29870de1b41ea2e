use self::dynamics::{heading_change, next_speed};
use crate::control::ControlIntent;
use crate::error::{is_positive, ConfigError};
use crate::math::{heading_vector, wrap_degrees, Point2d, Rect};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod dynamics;

/// The position and heading of a vehicle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Pose {
    /// The world space coordinates of the centre of the vehicle.
    pub position: Point2d,
    /// The heading in degrees, counter-clockwise from the positive x-axis.
    pub heading: f64,
}

impl Pose {
    /// Creates a new pose.
    pub fn new(x: f64, y: f64, heading: f64) -> Self {
        Self {
            position: Point2d::new(x, y),
            heading,
        }
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// The attributes of a simulated vehicle.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VehicleAttributes {
    /// The length of the vehicle body, along the x-axis.
    pub length: f64,
    /// The width of the vehicle body, along the y-axis.
    pub width: f64,
    /// The top forward speed, in units per frame.
    pub max_speed: f64,
    /// The change in speed per frame when accelerating or braking.
    pub acceleration: f64,
    /// The fraction of speed lost per frame while coasting.
    pub deceleration: f64,
    /// The change in heading per frame when steering, in degrees.
    pub turn_rate: f64,
}

impl Default for VehicleAttributes {
    fn default() -> Self {
        Self {
            length: 40.0,
            width: 20.0,
            max_speed: 5.0,
            acceleration: 0.1,
            deceleration: 0.05,
            turn_rate: 2.0,
        }
    }
}

impl VehicleAttributes {
    /// Checks that the attributes describe a drivable vehicle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("length", self.length),
            ("width", self.width),
            ("max_speed", self.max_speed),
            ("acceleration", self.acceleration),
            ("turn_rate", self.turn_rate),
        ];
        for (name, value) in positive {
            if !is_positive(value) {
                return Err(ConfigError::InvalidVehicle { name, value });
            }
        }
        if !(0.0..1.0).contains(&self.deceleration) {
            return Err(ConfigError::InvalidVehicle {
                name: "deceleration",
                value: self.deceleration,
            });
        }
        Ok(())
    }
}

/// A simulated point-mass vehicle.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// The vehicle's attributes.
    attribs: VehicleAttributes,
    /// The current pose; its heading is kept within [0, 360).
    pose: Pose,
    /// The signed speed in units per frame. Negative when reversing.
    speed: f64,
}

impl Vehicle {
    /// Creates a stationary vehicle.
    pub fn new(attribs: &VehicleAttributes, pose: Pose) -> Result<Self, ConfigError> {
        attribs.validate()?;
        Ok(Self {
            attribs: *attribs,
            pose: Pose {
                heading: wrap_degrees(pose.heading),
                ..pose
            },
            speed: 0.0,
        })
    }

    /// The vehicle's attributes.
    pub fn attributes(&self) -> &VehicleAttributes {
        &self.attribs
    }

    /// The vehicle's current pose.
    pub fn pose(&self) -> Pose {
        self.pose
    }

    /// The coordinates in world space of the centre of the vehicle.
    pub fn position(&self) -> Point2d {
        self.pose.position
    }

    /// The heading in degrees.
    pub fn heading(&self) -> f64 {
        self.pose.heading
    }

    /// The signed speed in units per frame.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// The axis-aligned rectangle occupied by the vehicle body.
    pub fn body(&self) -> Rect {
        Rect::from_centre(self.pose.position, self.attribs.length, self.attribs.width)
    }

    /// Places the vehicle at `pose` and brings it to rest.
    pub fn teleport(&mut self, pose: Pose) {
        self.pose = Pose {
            heading: wrap_degrees(pose.heading),
            ..pose
        };
        self.speed = 0.0;
    }

    /// Advances the vehicle by one frame under the given control intent.
    pub fn apply(&mut self, intent: ControlIntent) {
        self.speed = next_speed(self.speed, intent, &self.attribs);
        self.pose.heading = wrap_degrees(self.pose.heading + heading_change(intent, &self.attribs));
        self.pose.position = self.pose.position + self.speed * heading_vector(self.pose.heading);
    }

    /// Moves the vehicle the shortest distance that keeps its body within `world`.
    pub fn clamp_to(&mut self, world: &Rect) {
        self.pose.position = self.body().clamp(world).centre();
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn vehicle() -> Vehicle {
        Vehicle::new(&VehicleAttributes::default(), Pose::new(400.0, 300.0, 0.0)).unwrap()
    }

    #[test]
    fn accelerates_forward() {
        let mut veh = vehicle();
        veh.apply(ControlIntent::Accelerate);
        assert_approx_eq!(veh.speed(), 0.1);

        let mut x = veh.position().x;
        for _ in 0..10 {
            veh.apply(ControlIntent::Accelerate);
            assert!(veh.position().x > x);
            x = veh.position().x;
        }
        assert_approx_eq!(veh.position().y, 300.0);
    }

    #[test]
    fn speed_limits() {
        let mut veh = vehicle();
        for _ in 0..200 {
            veh.apply(ControlIntent::Accelerate);
        }
        assert_approx_eq!(veh.speed(), veh.attributes().max_speed);

        for _ in 0..200 {
            veh.apply(ControlIntent::Brake);
        }
        assert_approx_eq!(veh.speed(), -0.5 * veh.attributes().max_speed);
    }

    #[test]
    fn coasting_slows_down() {
        let mut veh = vehicle();
        for _ in 0..20 {
            veh.apply(ControlIntent::Accelerate);
        }
        let speed = veh.speed();
        veh.apply(ControlIntent::Coast);
        assert_approx_eq!(veh.speed(), 0.95 * speed);
    }

    #[test]
    fn steering_wraps_heading() {
        let mut veh = vehicle();
        veh.apply(ControlIntent::SteerLeft);
        assert_approx_eq!(veh.heading(), 2.0);
        veh.apply(ControlIntent::SteerRight);
        veh.apply(ControlIntent::SteerRight);
        assert_approx_eq!(veh.heading(), 358.0);
    }

    #[test]
    fn moving_up_the_screen() {
        let pose = Pose::new(400.0, 300.0, 90.0);
        let mut veh = Vehicle::new(&VehicleAttributes::default(), pose).unwrap();
        for _ in 0..10 {
            veh.apply(ControlIntent::Accelerate);
        }
        assert!(veh.position().y < 300.0);
        assert_approx_eq!(veh.position().x, 400.0);
    }

    #[test]
    fn clamped_inside_world() {
        let pose = Pose::new(2.0, 1.0, 0.0);
        let mut veh = Vehicle::new(&VehicleAttributes::default(), pose).unwrap();
        veh.clamp_to(&Rect::new(0.0, 0.0, 800.0, 600.0));
        assert_approx_eq!(veh.position().x, 20.0);
        assert_approx_eq!(veh.position().y, 10.0);
    }

    #[test]
    fn rejects_bad_attributes() {
        let attribs = VehicleAttributes {
            max_speed: 0.0,
            ..Default::default()
        };
        let err = Vehicle::new(&attribs, Pose::default()).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidVehicle {
                name: "max_speed",
                value: 0.0
            }
        );
    }
}
