//! Engine configuration. Every knob has a default matching the published task
//! protocol; a JSON document only needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub tracking: TrackingConfig,
    pub attention: AttentionConfig,
    pub interference: InterferenceConfig,
    pub interrupt: InterruptConfig,
    pub controller: ControllerConfig,
    pub recorder: RecorderConfig,
}

impl EngineConfig {
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.tracking.validate()?;
        self.attention.validate()?;
        self.interference.validate()?;
        self.interrupt.validate()?;
        self.controller.validate()?;
        Ok(())
    }
}

/// On-target tolerances, in normalized units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub threshold_1d: f64,
    pub threshold_2d: f64,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            threshold_1d: 0.05,
            threshold_2d: 0.1,
        }
    }
}

impl TrackingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("tracking.threshold_1d", self.threshold_1d)?;
        positive("tracking.threshold_2d", self.threshold_2d)
    }
}

/// Rates at exactly 0 or 1 are pulled to these values before the z-transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttentionConfig {
    pub rate_floor: f64,
    pub rate_ceiling: f64,
}

impl Default for AttentionConfig {
    fn default() -> Self {
        Self {
            rate_floor: 0.01,
            rate_ceiling: 0.99,
        }
    }
}

impl AttentionConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.rate_floor > 0.0 && self.rate_floor < self.rate_ceiling && self.rate_ceiling < 1.0)
        {
            return Err(ConfigError::invalid(
                "attention.rate_floor",
                format!(
                    "expected 0 < floor < ceiling < 1, got {} / {}",
                    self.rate_floor, self.rate_ceiling
                ),
            ));
        }
        Ok(())
    }
}

/// Half-width of the window used to look for tracking error spikes around
/// auditory events in the triple task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterferenceConfig {
    pub window_ms: f64,
}

impl Default for InterferenceConfig {
    fn default() -> Self {
        Self { window_ms: 500.0 }
    }
}

impl InterferenceConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("interference.window_ms", self.window_ms)
    }
}

/// How the post-interrupt recovery search measures its rolling window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecoveryWindow {
    /// A fixed number of consecutive samples.
    Samples(usize),
    /// All samples within this many milliseconds of the window start.
    ElapsedMs(f64),
}

impl Default for RecoveryWindow {
    fn default() -> Self {
        RecoveryWindow::Samples(10)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterruptConfig {
    /// Half-width of the window around each interrupt's appearance.
    pub window_ms: f64,
    /// Samples after this point never count towards the baseline.
    pub baseline_duration_ms: f64,
    /// Recovered once window RMSE is within this multiple of baseline RMSE.
    pub recovery_tolerance: f64,
    pub recovery_window: RecoveryWindow,
}

impl Default for InterruptConfig {
    fn default() -> Self {
        Self {
            window_ms: 1000.0,
            baseline_duration_ms: 5000.0,
            recovery_tolerance: 1.2,
            recovery_window: RecoveryWindow::default(),
        }
    }
}

impl InterruptConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("interrupt.window_ms", self.window_ms)?;
        positive("interrupt.baseline_duration_ms", self.baseline_duration_ms)?;
        if !(self.recovery_tolerance >= 1.0) {
            return Err(ConfigError::invalid(
                "interrupt.recovery_tolerance",
                format!("must be at least 1.0, got {}", self.recovery_tolerance),
            ));
        }
        match self.recovery_window {
            RecoveryWindow::Samples(0) => Err(ConfigError::invalid(
                "interrupt.recovery_window",
                "sample window must hold at least one sample",
            )),
            RecoveryWindow::ElapsedMs(ms) => positive("interrupt.recovery_window", ms),
            RecoveryWindow::Samples(_) => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    pub step: f64,
    pub min: f64,
    pub max: f64,
    /// Threshold controller succeeds when `rmse < rmse_scale / (1 + difficulty)`.
    pub rmse_scale: f64,
    pub lower_band: f64,
    pub upper_band: f64,
    pub history_len: usize,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            step: 0.05,
            min: 0.1,
            max: 1.0,
            rmse_scale: 0.3,
            lower_band: 0.70,
            upper_band: 0.85,
            history_len: 10,
        }
    }
}

impl ControllerConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        positive("controller.step", self.step)?;
        positive("controller.rmse_scale", self.rmse_scale)?;
        if !(self.min > 0.0 && self.min < self.max && self.max <= 1.0) {
            return Err(ConfigError::invalid(
                "controller.min",
                format!("expected 0 < min < max <= 1, got {} / {}", self.min, self.max),
            ));
        }
        if !(self.lower_band < self.upper_band) {
            return Err(ConfigError::invalid(
                "controller.lower_band",
                format!(
                    "lower band {} must sit below upper band {}",
                    self.lower_band, self.upper_band
                ),
            ));
        }
        if self.history_len == 0 {
            return Err(ConfigError::invalid(
                "controller.history_len",
                "history window must hold at least one outcome",
            ));
        }
        Ok(())
    }
}

/// Trials with fewer samples than this are flagged in QC (still reduced).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderConfig {
    pub min_samples: usize,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self { min_samples: 30 }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("must be a positive finite number, got {value}"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = EngineConfig::from_json_str(
            r#"{ "controller": { "step": 0.1 }, "interrupt": { "recovery_window": { "elapsed_ms": 160.0 } } }"#,
        )
        .unwrap();
        assert_eq!(config.controller.step, 0.1);
        assert_eq!(config.controller.upper_band, 0.85);
        assert_eq!(
            config.interrupt.recovery_window,
            RecoveryWindow::ElapsedMs(160.0)
        );
        assert_eq!(config.tracking, TrackingConfig::default());
    }

    #[test]
    fn inverted_band_is_rejected() {
        let err = EngineConfig::from_json_str(
            r#"{ "controller": { "lower_band": 0.9, "upper_band": 0.8 } }"#,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "controller.lower_band",
                ..
            }
        ));
    }

    #[test]
    fn malformed_json_is_reported() {
        assert!(matches!(
            EngineConfig::from_json_str("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = EngineConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(err.to_string().contains("not/here.json"));
    }
}
