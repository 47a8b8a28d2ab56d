use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::config::ControllerConfig;

use super::{Adjustment, Verdict};

/// Current difficulty of a module run plus a bounded window of recent
/// outcomes (`true` for a success). The window is for reporting only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyState {
    value: f64,
    min: f64,
    max: f64,
    history: VecDeque<bool>,
    history_len: usize,
}

impl DifficultyState {
    pub fn new(initial: f64, config: &ControllerConfig) -> Self {
        let (min, max) = (config.min.min(config.max), config.max.max(config.min));
        Self {
            value: clamp_or_min(initial, min, max),
            min,
            max,
            history: VecDeque::with_capacity(config.history_len),
            history_len: config.history_len.max(1),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn history(&self) -> &VecDeque<bool> {
        &self.history
    }

    /// Apply a controller decision, clamped to the configured range.
    /// Unsupported verdicts leave both the value and the history alone.
    pub fn apply(&mut self, adjustment: &Adjustment) {
        if adjustment.verdict == Verdict::Unsupported {
            return;
        }
        self.value = clamp_or_min(adjustment.difficulty, self.min, self.max);
        if self.history.len() == self.history_len {
            self.history.pop_front();
        }
        self.history.push_back(adjustment.verdict == Verdict::Success);
    }

    /// Share of successes in the history window, 0 when empty.
    pub fn success_rate(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        let wins = self.history.iter().filter(|s| **s).count();
        wins as f64 / self.history.len() as f64
    }
}

fn clamp_or_min(value: f64, min: f64, max: f64) -> f64 {
    if value.is_finite() {
        value.max(min).min(max)
    } else {
        min
    }
}
