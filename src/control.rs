//! Control intents and the drivers that produce them.

use crate::radar::Detection;
use crate::vehicle::Pose;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A discrete control input for one simulation frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ControlIntent {
    Accelerate,
    Brake,
    /// Turn counter-clockwise.
    SteerLeft,
    /// Turn clockwise.
    SteerRight,
    /// No input; the vehicle rolls and slows down.
    #[default]
    Coast,
}

impl ControlIntent {
    /// Every intent, in a fixed order usable as a discrete action space.
    pub const ALL: [ControlIntent; 5] = [
        ControlIntent::Accelerate,
        ControlIntent::Brake,
        ControlIntent::SteerLeft,
        ControlIntent::SteerRight,
        ControlIntent::Coast,
    ];

    /// Looks up an intent by its index in [ControlIntent::ALL].
    pub fn from_index(idx: usize) -> Option<Self> {
        Self::ALL.get(idx).copied()
    }
}

/// Anything that decides how the vehicle should be driven,
/// such as a keyboard adapter or a learned policy.
pub trait Driver {
    /// Chooses the intent for the next frame from the vehicle's pose
    /// and the radar detections of the previous frame.
    fn decide(&mut self, pose: &Pose, detections: &[Detection]) -> ControlIntent;
}

/// A driver which picks intents uniformly at random.
pub struct RandomDriver {
    rng: StdRng,
}

impl RandomDriver {
    /// Creates a random driver with a reproducible seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Driver for RandomDriver {
    fn decide(&mut self, _pose: &Pose, _detections: &[Detection]) -> ControlIntent {
        *ControlIntent::ALL
            .choose(&mut self.rng)
            .unwrap_or(&ControlIntent::Coast)
    }
}
