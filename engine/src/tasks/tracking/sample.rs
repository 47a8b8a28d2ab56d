//! Per-tick tracking samples as recorded by the driving loop.

use serde::{Deserialize, Serialize};

use crate::core::geometry::Vec2;
use crate::core::recorder::Timestamped;

/// One tick of a 1D tracking trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp_ms: f64,
    pub target_position: f64,
    pub cursor_position: f64,
    /// Raw control input (stick deflection, key axis) for the tick.
    pub input_value: f64,
}

impl Sample {
    pub fn new(timestamp_ms: f64, target_position: f64, cursor_position: f64, input_value: f64) -> Self {
        Self {
            timestamp_ms,
            target_position,
            cursor_position,
            input_value,
        }
    }

    /// Signed tracking error, `target - cursor`.
    pub fn error(&self) -> f64 {
        self.target_position - self.cursor_position
    }
}

impl Timestamped for Sample {
    fn timestamp_ms(&self) -> f64 {
        self.timestamp_ms
    }

    fn is_finite(&self) -> bool {
        self.target_position.is_finite()
            && self.cursor_position.is_finite()
            && self.input_value.is_finite()
    }
}

/// One tick of a 2D tracking trial.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample2D {
    pub timestamp_ms: f64,
    pub target_position: Vec2,
    pub cursor_position: Vec2,
    pub input_value: Vec2,
}

impl Sample2D {
    pub fn new(timestamp_ms: f64, target_position: Vec2, cursor_position: Vec2, input_value: Vec2) -> Self {
        Self {
            timestamp_ms,
            target_position,
            cursor_position,
            input_value,
        }
    }

    /// Cursor-to-target vector.
    pub fn error_vector(&self) -> Vec2 {
        self.target_position - self.cursor_position
    }

    /// Unsigned Euclidean tracking error.
    pub fn error(&self) -> f64 {
        self.error_vector().length()
    }
}

impl Timestamped for Sample2D {
    fn timestamp_ms(&self) -> f64 {
        self.timestamp_ms
    }

    fn is_finite(&self) -> bool {
        self.target_position.is_finite()
            && self.cursor_position.is_finite()
            && self.input_value.is_finite()
    }
}
