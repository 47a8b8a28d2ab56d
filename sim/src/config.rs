use std::fs;
use std::path::Path;

use anyhow::{ensure, Context};
use engine::core::config::EngineConfig;
use serde::{Deserialize, Serialize};

use crate::participant::ParticipantConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub engine: EngineConfig,
    pub participant: ParticipantConfig,
    /// Frame rate of the simulated display.
    pub tick_hz: f64,
    pub trial_duration_ms: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            participant: ParticipantConfig::default(),
            tick_hz: 60.0,
            trial_duration_ms: 30_000.0,
        }
    }
}

impl SimConfig {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read sim config {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse sim config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.engine.validate().context("invalid engine section")?;
        self.participant.validate()?;
        ensure!(
            self.tick_hz.is_finite() && self.tick_hz > 0.0,
            "tick_hz must be positive, got {}",
            self.tick_hz
        );
        ensure!(
            self.trial_duration_ms.is_finite() && self.trial_duration_ms > 0.0,
            "trial_duration_ms must be positive, got {}",
            self.trial_duration_ms
        );
        Ok(())
    }

    /// Milliseconds between two frames.
    pub fn frame_ms(&self) -> f64 {
        1000.0 / self.tick_hz
    }

    /// Frames in one trial, rounded to the nearest whole frame.
    pub fn frames(&self) -> usize {
        (self.trial_duration_ms * self.tick_hz / 1000.0).round() as usize
    }
}
