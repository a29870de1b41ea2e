use crate::math::Rect;
use crate::obstacle::Obstacle;
use rand::Rng;

/// The number of placements tried for each obstacle before giving up on it.
const MAX_ATTEMPTS: usize = 1000;

/// The smallest and largest side length of a spawned obstacle.
const OBSTACLE_SIZE: (f64, f64) = (20.0, 60.0);

/// The side length of the goal region.
pub const GOAL_SIZE: f64 = 40.0;

/// Places a square of side `size` uniformly at random inside `world`,
/// retrying until it overlaps none of `avoid`.
fn place(rng: &mut impl Rng, world: &Rect, size: f64, avoid: &[Rect]) -> Option<Rect> {
    if size > world.width() || size > world.height() {
        return None;
    }
    (0..MAX_ATTEMPTS).find_map(|_| {
        let x = rng.gen_range(world.left()..=world.right() - size);
        let y = rng.gen_range(world.top()..=world.bottom() - size);
        let rect = Rect::new(x, y, size, size);
        (!avoid.iter().any(|other| rect.overlaps(other))).then_some(rect)
    })
}

/// Spawns up to `count` square obstacles which overlap neither each other nor `keep_clear`.
pub fn spawn_obstacles(
    rng: &mut impl Rng,
    world: &Rect,
    count: usize,
    keep_clear: &Rect,
) -> Vec<Obstacle> {
    let mut placed = vec![*keep_clear];
    for idx in 0..count {
        let size = rng.gen_range(OBSTACLE_SIZE.0..=OBSTACLE_SIZE.1);
        match place(rng, world, size, &placed) {
            Some(rect) => placed.push(rect),
            None => log::warn!("could not place obstacle {} of {} without overlap", idx + 1, count),
        }
    }
    placed.into_iter().skip(1).map(Obstacle::from).collect()
}

/// Spawns the goal region clear of the obstacles and of `keep_clear`.
/// Falls back to the world corner furthest from `keep_clear` if no free spot is found.
pub fn spawn_goal(
    rng: &mut impl Rng,
    world: &Rect,
    obstacles: &[Obstacle],
    keep_clear: &Rect,
) -> Rect {
    let mut avoid = obstacles.iter().map(|obs| *obs.rect()).collect::<Vec<_>>();
    avoid.push(*keep_clear);
    place(rng, world, GOAL_SIZE, &avoid).unwrap_or_else(|| {
        log::warn!("could not place goal without overlap");
        let centre = keep_clear.centre();
        let x = if centre.x < world.x.midpoint() {
            world.right() - GOAL_SIZE
        } else {
            world.left()
        };
        let y = if centre.y < world.y.midpoint() {
            world.bottom() - GOAL_SIZE
        } else {
            world.top()
        };
        Rect::new(x, y, GOAL_SIZE, GOAL_SIZE)
    })
}
