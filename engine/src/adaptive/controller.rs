use tracing::{debug, warn};

use crate::core::config::ControllerConfig;
use crate::tasks::MetricsRecord;

use super::{Adjustment, ControllerKind, DifficultyController, Verdict};

/// Tracking controller: success when `rmse < rmse_scale / (1 + difficulty)`,
/// one step up on success and one step down otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThresholdController {
    config: ControllerConfig,
}

impl ThresholdController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    /// RMSE a trial at `difficulty` must stay under to count as a success.
    pub fn target_rmse(&self, difficulty: f64) -> f64 {
        self.config.rmse_scale / (1.0 + difficulty)
    }
}

impl Default for ThresholdController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl DifficultyController for ThresholdController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Threshold
    }

    fn adjust(&self, current: f64, metrics: &MetricsRecord) -> Adjustment {
        let current = sanitize(current, &self.config);
        let Some(rmse) = metrics.tracking_rmse() else {
            return unsupported(ControllerKind::Threshold, current, metrics);
        };

        let target = self.target_rmse(current);
        let (difficulty, verdict) = if rmse < target {
            (step(current, self.config.step, &self.config), Verdict::Success)
        } else {
            (step(current, -self.config.step, &self.config), Verdict::Struggling)
        };

        debug!(rmse, target, from = current, to = difficulty, ?verdict, "threshold controller");
        Adjustment { difficulty, verdict }
    }
}

/// Accuracy controller with a dead band: above `upper_band` steps up, below
/// `lower_band` steps down, anything in between holds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandController {
    config: ControllerConfig,
}

impl BandController {
    pub fn new(config: ControllerConfig) -> Self {
        Self { config }
    }
}

impl Default for BandController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl DifficultyController for BandController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Band
    }

    fn adjust(&self, current: f64, metrics: &MetricsRecord) -> Adjustment {
        let current = sanitize(current, &self.config);
        let Some(accuracy) = metrics.accuracy() else {
            return unsupported(ControllerKind::Band, current, metrics);
        };

        let (difficulty, verdict) = if accuracy > self.config.upper_band {
            (step(current, self.config.step, &self.config), Verdict::Success)
        } else if accuracy < self.config.lower_band {
            (step(current, -self.config.step, &self.config), Verdict::Struggling)
        } else {
            (current, Verdict::Hold)
        };

        debug!(accuracy, from = current, to = difficulty, ?verdict, "band controller");
        Adjustment { difficulty, verdict }
    }
}

/// Non-finite input falls back to the easiest setting; anything else is
/// pulled into bounds.
fn sanitize(current: f64, config: &ControllerConfig) -> f64 {
    if current.is_finite() {
        current.clamp(config.min, config.max)
    } else {
        config.min
    }
}

#[inline]
fn step(current: f64, delta: f64, config: &ControllerConfig) -> f64 {
    (current + delta).clamp(config.min, config.max)
}

fn unsupported(kind: ControllerKind, current: f64, metrics: &MetricsRecord) -> Adjustment {
    warn!(
        controller = ?kind,
        family = metrics.family(),
        "metrics family has no input for this controller; difficulty unchanged"
    );
    Adjustment {
        difficulty: current,
        verdict: Verdict::Unsupported,
    }
}
