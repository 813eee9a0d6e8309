//! Fundamental geometric and simulation types.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D map position in game distance units.
pub type Point2 = Vec2;

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current game step (increments by 1 each tick).
    pub step: u64,
    /// Elapsed game time in seconds.
    pub elapsed_secs: f32,
}

impl SimTime {
    pub fn new(step: u64, elapsed_secs: f32) -> Self {
        Self { step, elapsed_secs }
    }

    /// Seconds per step at the default step rate.
    pub fn dt(&self) -> f32 {
        crate::constants::DT
    }

    /// Advance by one step.
    pub fn advance(&mut self) {
        self.step += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Point `distance` units from `from` in the direction of `to`.
///
/// Negative distances step away from `to`. When the two points coincide
/// the original point is returned unchanged.
pub fn towards(from: Point2, to: Point2, distance: f32) -> Point2 {
    let delta = to - from;
    let len = delta.length();
    if len < f32::EPSILON {
        return from;
    }
    from + delta / len * distance
}

/// Arithmetic mean of a set of points, `None` for an empty set.
pub fn centroid(points: impl IntoIterator<Item = Point2>) -> Option<Point2> {
    let mut sum = Vec2::ZERO;
    let mut count = 0usize;
    for p in points {
        sum += p;
        count += 1;
    }
    (count > 0).then(|| sum / count as f32)
}
