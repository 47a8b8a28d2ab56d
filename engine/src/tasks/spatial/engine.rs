//! Item schedule for the mental rotation task.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::metrics::SpatialTrial;

/// Rotation angles are multiples of this step.
pub const ANGLE_STEP_DEG: f64 = 45.0;

/// A pair of shapes: the probe is the reference rotated by `angle_deg`, and
/// mirrored when `mirrored` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationItem {
    pub angle_deg: f64,
    pub mirrored: bool,
}

impl RotationItem {
    /// Score an answer of "same shape" (`true`) or "mirror image" (`false`).
    pub fn score(&self, answered_same: bool, reaction_time_ms: f64) -> SpatialTrial {
        SpatialTrial {
            correct: answered_same != self.mirrored,
            reaction_time_ms,
        }
    }
}

/// Largest rotation used at a difficulty: 45° when easy, up to 180°.
pub fn max_angle_deg(difficulty: f64) -> f64 {
    let d = if difficulty.is_nan() { 0.0 } else { difficulty.clamp(0.0, 1.0) };
    ANGLE_STEP_DEG * (1.0 + (3.0 * d).round())
}

pub fn generate<R: Rng + ?Sized>(difficulty: f64, count: usize, rng: &mut R) -> Vec<RotationItem> {
    let steps = (max_angle_deg(difficulty) / ANGLE_STEP_DEG) as u32;
    (0..count)
        .map(|_| RotationItem {
            angle_deg: ANGLE_STEP_DEG * rng.gen_range(0..=steps) as f64,
            mirrored: rng.gen_bool(0.5),
        })
        .collect()
}
