use self::spawn::{spawn_goal, spawn_obstacles};
use crate::control::ControlIntent;
use crate::error::ConfigError;
use crate::map::{GridAttributes, OccupancyGrid};
use crate::math::Rect;
use crate::obstacle::Obstacle;
use crate::radar::{Detection, Radar, RadarAttributes};
use crate::vehicle::{Pose, Vehicle, VehicleAttributes};
use rand::rngs::StdRng;
use rand::SeedableRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod spawn;

pub use spawn::GOAL_SIZE;

/// The attributes of a simulation.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationAttributes {
    /// The width of the world.
    pub world_width: f64,
    /// The height of the world.
    pub world_height: f64,
    /// The number of obstacles spawned per episode.
    pub num_obstacles: usize,
    /// The vehicle's attributes.
    pub vehicle: VehicleAttributes,
    /// The radar's attributes.
    pub radar: RadarAttributes,
    /// The occupancy grid's attributes.
    pub grid: GridAttributes,
}

impl Default for SimulationAttributes {
    fn default() -> Self {
        Self {
            world_width: 800.0,
            world_height: 600.0,
            num_obstacles: 5,
            vehicle: Default::default(),
            radar: Default::default(),
            grid: Default::default(),
        }
    }
}

/// The result of simulating one frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StepOutcome {
    /// The episode continues.
    Running,
    /// The vehicle hit an obstacle and a new episode has begun.
    Collision,
    /// The vehicle reached the goal and a new episode has begun.
    GoalReached,
}

/// A vehicle driving through a field of obstacles towards a goal,
/// mapping what its radar sees as it goes.
pub struct Simulation {
    /// The world bounds.
    world: Rect,
    /// The number of obstacles to spawn per episode.
    num_obstacles: usize,
    /// Whether the obstacles and goal are respawned at the start of each episode.
    random_layout: bool,
    /// The simulated vehicle.
    vehicle: Vehicle,
    /// The vehicle's radar.
    radar: Radar,
    /// The map built from the radar detections during the current episode.
    map: OccupancyGrid,
    /// The obstacles, in the order the radar tests them.
    obstacles: Vec<Obstacle>,
    /// The region the vehicle is trying to reach.
    goal: Rect,
    /// The detections of the most recent frame.
    detections: Vec<Detection>,
    /// The random number generator used for spawning.
    rng: StdRng,
    /// The current frame of simulation.
    frame: usize,
    /// The number of completed episodes.
    episode: usize,
}

impl Simulation {
    /// Creates a simulation with randomly placed obstacles and goal,
    /// which are placed afresh at the start of every episode.
    pub fn new(attribs: &SimulationAttributes, seed: u64) -> Result<Self, ConfigError> {
        let mut sim = Self::build(attribs, vec![], Rect::new(0.0, 0.0, 0.0, 0.0), seed, true)?;
        sim.respawn();
        Ok(sim)
    }

    /// Creates a simulation with a fixed layout, kept across episodes.
    pub fn with_layout(
        attribs: &SimulationAttributes,
        obstacles: Vec<Obstacle>,
        goal: Rect,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        Self::build(attribs, obstacles, goal, seed, false)
    }

    fn build(
        attribs: &SimulationAttributes,
        obstacles: Vec<Obstacle>,
        goal: Rect,
        seed: u64,
        random_layout: bool,
    ) -> Result<Self, ConfigError> {
        let map = OccupancyGrid::new(attribs.world_width, attribs.world_height, &attribs.grid)?;
        let world = Rect::new(0.0, 0.0, attribs.world_width, attribs.world_height);
        let centre = world.centre();
        Ok(Self {
            world,
            num_obstacles: attribs.num_obstacles,
            random_layout,
            vehicle: Vehicle::new(&attribs.vehicle, Pose::new(centre.x, centre.y, 0.0))?,
            radar: Radar::new(&attribs.radar)?,
            map,
            obstacles,
            goal,
            detections: vec![],
            rng: StdRng::seed_from_u64(seed),
            frame: 0,
            episode: 0,
        })
    }

    /// Advances the simulation by one frame.
    ///
    /// The vehicle moves under `intent`, the radar scans from the new pose,
    /// and the detections are added to the map. If the vehicle then touches an
    /// obstacle or the goal, the episode ends: the map is cleared, the vehicle
    /// returns to the start and, for random layouts, a new layout is spawned.
    pub fn step(&mut self, intent: ControlIntent) -> StepOutcome {
        self.vehicle.apply(intent);
        self.vehicle.clamp_to(&self.world);

        let pose = self.vehicle.pose();
        self.detections = self.radar.scan(&pose, &self.obstacles);
        self.map.update(&pose, &self.detections);
        self.frame += 1;

        log::trace!(
            "frame {}: pose ({:.1}, {:.1}) {:.1} deg, {} detections",
            self.frame,
            pose.position.x,
            pose.position.y,
            pose.heading,
            self.detections.len()
        );

        let outcome = self.check_episode_end();
        if outcome != StepOutcome::Running {
            log::info!("episode {} ended at frame {}: {:?}", self.episode, self.frame, outcome);
            self.start_episode();
        }
        outcome
    }

    /// Determines whether the current episode has ended.
    /// A collision takes precedence over reaching the goal.
    fn check_episode_end(&self) -> StepOutcome {
        let body = self.vehicle.body();
        if self.obstacles.iter().any(|obs| body.overlaps(obs.rect())) {
            StepOutcome::Collision
        } else if body.overlaps(&self.goal) {
            StepOutcome::GoalReached
        } else {
            StepOutcome::Running
        }
    }

    /// Clears the map and returns the vehicle to the start for a new episode.
    fn start_episode(&mut self) {
        self.episode += 1;
        self.map.reset();
        self.detections.clear();
        let centre = self.world.centre();
        self.vehicle.teleport(Pose::new(centre.x, centre.y, 0.0));
        if self.random_layout {
            self.respawn();
        }
    }

    /// Spawns a fresh set of obstacles and a goal around the vehicle.
    fn respawn(&mut self) {
        let keep_clear = self.vehicle.body();
        self.obstacles =
            spawn_obstacles(&mut self.rng, &self.world, self.num_obstacles, &keep_clear);
        self.goal = spawn_goal(&mut self.rng, &self.world, &self.obstacles, &keep_clear);
        log::debug!("spawned {} obstacles, goal at {:?}", self.obstacles.len(), self.goal.centre());
    }

    /// Gets the world bounds.
    pub fn world(&self) -> &Rect {
        &self.world
    }

    /// Gets a reference to the vehicle.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// Gets a reference to the radar.
    pub fn radar(&self) -> &Radar {
        &self.radar
    }

    /// Gets the map of the current episode.
    pub fn map(&self) -> &OccupancyGrid {
        &self.map
    }

    /// Gets the obstacles.
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Gets the goal region.
    pub fn goal(&self) -> &Rect {
        &self.goal
    }

    /// Gets the radar detections of the most recent frame.
    /// Empty after a frame which ended an episode.
    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    /// Gets the current simulation frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Gets the number of completed episodes.
    pub fn episode(&self) -> usize {
        self.episode
    }
}
