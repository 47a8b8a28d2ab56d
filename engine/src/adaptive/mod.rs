//! Per-trial difficulty adaptation.
//!
//! A controller looks at one finished trial's metrics and the difficulty that
//! trial ran at, and returns the difficulty for the next trial. Decisions are
//! memoryless; [`DifficultyState`] keeps a short outcome history for reporting.

mod controller;
mod state;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::config::ControllerConfig;
use crate::tasks::MetricsRecord;

pub use controller::{BandController, ThresholdController};
pub use state::DifficultyState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerKind {
    /// Steps on tracking RMSE against a difficulty-scaled threshold.
    Threshold,
    /// Steps on accuracy only outside a dead band.
    Band,
}

impl ControllerKind {
    pub fn build(self, config: &ControllerConfig) -> Box<dyn DifficultyController> {
        match self {
            ControllerKind::Threshold => Box::new(ThresholdController::new(*config)),
            ControllerKind::Band => Box::new(BandController::new(*config)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Success,
    Struggling,
    /// Inside the dead band, difficulty kept as is.
    Hold,
    /// The record carries nothing this controller can steer on.
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adjustment {
    pub difficulty: f64,
    pub verdict: Verdict,
}

pub trait DifficultyController: fmt::Debug + Send + Sync {
    fn kind(&self) -> ControllerKind;

    /// Next difficulty after a trial that ran at `current`. The result always
    /// lies within the configured bounds.
    fn adjust(&self, current: f64, metrics: &MetricsRecord) -> Adjustment;
}
