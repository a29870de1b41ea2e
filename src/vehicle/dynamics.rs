use super::VehicleAttributes;
use crate::control::ControlIntent;

/// Calculates the vehicle's speed for the next frame.
///
/// Accelerating and braking change the speed by `acceleration` per frame;
/// braking can reverse the vehicle down to half its top speed.
/// Any other intent lets the vehicle roll, losing a fraction of its speed.
pub fn next_speed(speed: f64, intent: ControlIntent, attribs: &VehicleAttributes) -> f64 {
    match intent {
        ControlIntent::Accelerate => f64::min(speed + attribs.acceleration, attribs.max_speed),
        ControlIntent::Brake => f64::max(speed - attribs.acceleration, -0.5 * attribs.max_speed),
        _ => speed * (1.0 - attribs.deceleration),
    }
}

/// Calculates the change in heading, in degrees, for the next frame.
pub fn heading_change(intent: ControlIntent, attribs: &VehicleAttributes) -> f64 {
    match intent {
        ControlIntent::SteerLeft => attribs.turn_rate,
        ControlIntent::SteerRight => -attribs.turn_rate,
        _ => 0.0,
    }
}
