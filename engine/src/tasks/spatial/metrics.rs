//! Metric definitions for mental rotation runs.

use serde::{Deserialize, Serialize};

use crate::core::stats::{mean, ratio_or_zero};

/// One answered (or timed out) rotation item.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpatialTrial {
    pub correct: bool,
    pub reaction_time_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SpatialMetrics {
    pub trial_count: usize,
    pub correct_count: usize,
    pub accuracy: f64,
    /// Mean reaction time in milliseconds.
    pub reaction_time: f64,
    /// Correct answers per second: `accuracy / (reaction_time / 1000)`.
    pub speed_accuracy_tradeoff: f64,
}

impl SpatialMetrics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_trials(trials: &[SpatialTrial]) -> Self {
        if trials.is_empty() {
            return Self::default();
        }

        let correct_count = trials.iter().filter(|t| t.correct).count();
        let accuracy = correct_count as f64 / trials.len() as f64;
        let rts: Vec<f64> = trials.iter().map(|t| t.reaction_time_ms).collect();
        let reaction_time = mean(&rts);

        Self {
            trial_count: trials.len(),
            correct_count,
            accuracy,
            reaction_time,
            speed_accuracy_tradeoff: ratio_or_zero(accuracy, reaction_time / 1000.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_and_tradeoff() {
        let trials = [
            SpatialTrial {
                correct: true,
                reaction_time_ms: 1500.0,
            },
            SpatialTrial {
                correct: true,
                reaction_time_ms: 2500.0,
            },
            SpatialTrial {
                correct: false,
                reaction_time_ms: 2000.0,
            },
            SpatialTrial {
                correct: true,
                reaction_time_ms: 2000.0,
            },
        ];
        let m = SpatialMetrics::from_trials(&trials);
        assert_eq!(m.correct_count, 3);
        assert_eq!(m.accuracy, 0.75);
        assert_eq!(m.reaction_time, 2000.0);
        assert!((m.speed_accuracy_tradeoff - 0.375).abs() < 1e-12);
    }

    #[test]
    fn zero_reaction_time_gives_zero_tradeoff() {
        let trials = [SpatialTrial {
            correct: true,
            reaction_time_ms: 0.0,
        }];
        let m = SpatialMetrics::from_trials(&trials);
        assert_eq!(m.accuracy, 1.0);
        assert_eq!(m.speed_accuracy_tradeoff, 0.0);
    }

    #[test]
    fn empty_input_gives_zero_record() {
        assert_eq!(SpatialMetrics::from_trials(&[]), SpatialMetrics::empty());
    }
}
