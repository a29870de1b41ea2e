use std::time::Instant;

use radar_slam::{Driver, RandomDriver, Simulation, SimulationAttributes, StepOutcome};

fn main() -> Result<(), radar_slam::ConfigError> {
    let attribs = SimulationAttributes {
        num_obstacles: 20,
        ..Default::default()
    };
    let mut sim = Simulation::new(&attribs, 1)?;
    let mut driver = RandomDriver::new(2);

    println!("Simulating...");
    const NUM_FRAMES: u32 = 10_000;
    let (mut collisions, mut goals) = (0, 0);
    let start = Instant::now();
    for _ in 0..NUM_FRAMES {
        let intent = driver.decide(&sim.vehicle().pose(), sim.detections());
        match sim.step(intent) {
            StepOutcome::Running => {}
            StepOutcome::Collision => collisions += 1,
            StepOutcome::GoalReached => goals += 1,
        }
    }
    let frame = start.elapsed() / NUM_FRAMES;
    println!(
        "Avg. frame: {:?} over {} frames --> {} episodes ({} collisions, {} goals), {} cells",
        frame,
        sim.frame(),
        sim.episode(),
        collisions,
        goals,
        sim.map().occupied_cells().count(),
    );
    Ok(())
}
