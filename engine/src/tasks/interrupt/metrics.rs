//! Tracking interference and response quality for interrupt-handling runs.

use serde::{Deserialize, Serialize};

use crate::core::config::{InterruptConfig, RecoveryWindow};
use crate::core::stats::{mean, ratio_or_zero, relative_cost, rms};
use crate::tasks::tracking::{rmse_2d, Sample2D};

use super::engine::{InterruptOutcome, InterruptResponse};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InterruptMetrics {
    /// RMSE before the first interrupt, outside every interrupt window.
    pub baseline_rmse: f64,
    /// RMSE of samples inside any interrupt window.
    pub interrupt_rmse: f64,
    pub overall_rmse: f64,
    pub interference_cost: f64,
    pub total_interrupts: usize,
    pub correct: u32,
    pub incorrect: u32,
    pub missed: u32,
    pub interrupt_accuracy: f64,
    /// Any key in time, right or wrong.
    pub hit_rate: f64,
    pub miss_rate: f64,
    pub error_rate: f64,
    /// Mean reaction time over correct responses only.
    pub mean_reaction_time: f64,
    /// Milliseconds from each response until tracking error settled again.
    pub recovery_times: Vec<f64>,
    pub mean_recovery_time: f64,
}

impl InterruptMetrics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn compute(samples: &[Sample2D], responses: &[InterruptResponse]) -> Self {
        Self::compute_with(samples, responses, &InterruptConfig::default())
    }

    pub fn compute_with(
        samples: &[Sample2D],
        responses: &[InterruptResponse],
        config: &InterruptConfig,
    ) -> Self {
        if samples.is_empty() && responses.is_empty() {
            return Self::default();
        }

        let appear_times: Vec<f64> = responses.iter().map(|r| r.appeared_at_ms).collect();
        let first_interrupt = appear_times.iter().copied().fold(f64::INFINITY, f64::min);
        let in_window = |t: f64| {
            appear_times
                .iter()
                .any(|at| (t - at).abs() <= config.window_ms)
        };

        let baseline_errors = samples
            .iter()
            .filter(|s| {
                s.timestamp_ms < first_interrupt
                    && s.timestamp_ms < config.baseline_duration_ms
                    && !in_window(s.timestamp_ms)
            })
            .map(Sample2D::error);
        let baseline_rmse = rms(baseline_errors);
        let interrupt_rmse = rms(
            samples
                .iter()
                .filter(|s| in_window(s.timestamp_ms))
                .map(Sample2D::error),
        );

        let mut correct = 0u32;
        let mut incorrect = 0u32;
        let mut missed = 0u32;
        let mut correct_rts = Vec::new();
        for response in responses {
            match response.outcome {
                InterruptOutcome::Correct => {
                    correct = correct.saturating_add(1);
                    correct_rts.extend(response.reaction_time_ms);
                }
                InterruptOutcome::Incorrect => incorrect = incorrect.saturating_add(1),
                InterruptOutcome::Missed => missed = missed.saturating_add(1),
            }
        }
        let total = responses.len() as f64;

        let threshold = config.recovery_tolerance * baseline_rmse;
        let recovery_times: Vec<f64> = responses
            .iter()
            .filter(|r| r.responded())
            .filter_map(|r| {
                let start = r.appeared_at_ms + r.reaction_time_ms.unwrap_or(0.0);
                recovery_time(samples, start, threshold, config.recovery_window)
            })
            .collect();

        Self {
            baseline_rmse,
            interrupt_rmse,
            overall_rmse: rmse_2d(samples),
            interference_cost: relative_cost(interrupt_rmse, baseline_rmse),
            total_interrupts: responses.len(),
            correct,
            incorrect,
            missed,
            interrupt_accuracy: ratio_or_zero(correct as f64, total),
            hit_rate: ratio_or_zero((correct + incorrect) as f64, total),
            miss_rate: ratio_or_zero(missed as f64, total),
            error_rate: ratio_or_zero(incorrect as f64, total),
            mean_reaction_time: mean(&correct_rts),
            mean_recovery_time: mean(&recovery_times),
            recovery_times,
        }
    }
}

/// Offset from `start` to the first rolling window whose RMSE is within
/// `threshold`. `None` when the data ends before any window qualifies.
fn recovery_time(samples: &[Sample2D], start: f64, threshold: f64, window: RecoveryWindow) -> Option<f64> {
    let first = samples.partition_point(|s| s.timestamp_ms < start);
    let after = &samples[first..];

    (0..after.len()).find_map(|i| {
        let span = match window {
            RecoveryWindow::Samples(n) => after.get(i..).and_then(|rest| rest.get(..n))?,
            RecoveryWindow::ElapsedMs(ms) => {
                let end_at = after[i].timestamp_ms + ms;
                // The window must be fully covered by recorded data.
                if after.last()?.timestamp_ms < end_at {
                    return None;
                }
                let len = after[i..].partition_point(|s| s.timestamp_ms < end_at);
                &after[i..i + len]
            }
        };
        (rmse_2d(span) <= threshold).then(|| after[i].timestamp_ms - start)
    })
}
