pub use cgmath;
pub use control::{ControlIntent, Driver, RandomDriver};
pub use error::ConfigError;
pub use map::{GridAttributes, OccupancyGrid, MAX_CELLS};
pub use obstacle::Obstacle;
pub use radar::{Detection, Radar, RadarAttributes, DEFAULT_ANGULAR_STEP};
pub use simulation::{Simulation, SimulationAttributes, StepOutcome, GOAL_SIZE};
pub use util::Interval;
pub use vehicle::{Pose, Vehicle, VehicleAttributes};

mod control;
mod error;
mod map;
pub mod math;
mod obstacle;
mod radar;
mod simulation;
mod util;
mod vehicle;
