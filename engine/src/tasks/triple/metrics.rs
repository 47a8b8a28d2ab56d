//! Costs of the triple task against single-task baselines, plus tracking
//! error spikes around auditory events.

use serde::{Deserialize, Serialize};

use crate::core::config::{AttentionConfig, InterferenceConfig};
use crate::core::stats::{mean, ratio_or_zero, relative_cost};
use crate::tasks::auditory::AttentionMetrics;
use crate::tasks::events::Response;
use crate::tasks::tracking::{rmse_1d, rmse_2d, Sample, Sample2D};

/// Single-task reference values measured before the triple task.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TripleBaseline {
    pub rmse_1d: f64,
    pub rmse_2d: f64,
    pub d_prime: f64,
}

/// Everything recorded during one finished triple-task trial.
#[derive(Debug, Clone, Copy)]
pub struct TripleTaskTrial<'a> {
    pub samples_1d: &'a [Sample],
    pub samples_2d: &'a [Sample2D],
    /// One scored response per auditory stimulus.
    pub responses: &'a [Response],
}

impl TripleTaskTrial<'_> {
    fn is_empty(&self) -> bool {
        self.samples_1d.is_empty() && self.samples_2d.is_empty() && self.responses.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TripleTaskMetrics {
    pub baseline_rmse_1d: f64,
    pub baseline_rmse_2d: f64,
    pub triple_rmse_1d: f64,
    pub triple_rmse_2d: f64,
    /// Mean of the 1D and 2D RMSE under triple-task load.
    pub triple_rmse: f64,
    pub baseline_d_prime: f64,
    pub triple_d_prime: f64,
    /// Relative increase of mean tracking RMSE over the mean baseline.
    pub dual_motor_cost: f64,
    /// `(triple d' - baseline d') / |baseline d'|`, 0 for a zero baseline.
    pub auditory_cost: f64,
    /// Reported alongside `dual_motor_cost` and always equal to it.
    pub motor_interference_cost: f64,
    /// Combined tracking RMSE around each key press.
    pub error_spikes_around_responses: Vec<f64>,
    /// Combined tracking RMSE around each tone onset.
    pub error_spikes_around_stimuli: Vec<f64>,
    pub mean_spike_around_responses: f64,
    pub mean_spike_around_stimuli: f64,
}

impl TripleTaskMetrics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn compute(trial: &TripleTaskTrial<'_>, baseline: &TripleBaseline) -> Self {
        Self::compute_with(
            trial,
            baseline,
            &AttentionConfig::default(),
            &InterferenceConfig::default(),
        )
    }

    pub fn compute_with(
        trial: &TripleTaskTrial<'_>,
        baseline: &TripleBaseline,
        attention: &AttentionConfig,
        interference: &InterferenceConfig,
    ) -> Self {
        if trial.is_empty() {
            return Self::default();
        }

        let triple_rmse_1d = rmse_1d(trial.samples_1d);
        let triple_rmse_2d = rmse_2d(trial.samples_2d);
        let triple_rmse = (triple_rmse_1d + triple_rmse_2d) / 2.0;
        let baseline_rmse = (baseline.rmse_1d + baseline.rmse_2d) / 2.0;
        let dual_motor_cost = relative_cost(triple_rmse, baseline_rmse);

        let triple_d_prime = AttentionMetrics::from_responses_with(trial.responses, attention).d_prime;
        let auditory_cost = ratio_or_zero(
            triple_d_prime - baseline.d_prime,
            baseline.d_prime.abs(),
        );

        let press_times: Vec<f64> = trial
            .responses
            .iter()
            .filter_map(|r| r.response_timestamp_ms)
            .collect();
        let onset_times: Vec<f64> = trial
            .responses
            .iter()
            .map(|r| r.stimulus_timestamp_ms)
            .collect();

        let error_spikes_around_responses = error_spikes(trial, &press_times, interference.window_ms);
        let error_spikes_around_stimuli = error_spikes(trial, &onset_times, interference.window_ms);

        Self {
            baseline_rmse_1d: baseline.rmse_1d,
            baseline_rmse_2d: baseline.rmse_2d,
            triple_rmse_1d,
            triple_rmse_2d,
            triple_rmse,
            baseline_d_prime: baseline.d_prime,
            triple_d_prime,
            dual_motor_cost,
            auditory_cost,
            motor_interference_cost: dual_motor_cost,
            mean_spike_around_responses: mean(&error_spikes_around_responses),
            mean_spike_around_stimuli: mean(&error_spikes_around_stimuli),
            error_spikes_around_responses,
            error_spikes_around_stimuli,
        }
    }
}

/// Combined RMSE within `±window_ms` of each event. Events with no samples
/// on either tracking task are left out.
fn error_spikes(trial: &TripleTaskTrial<'_>, event_times: &[f64], window_ms: f64) -> Vec<f64> {
    event_times
        .iter()
        .filter_map(|&at| {
            let lo = at - window_ms;
            let hi = at + window_ms;
            let near_1d = within(trial.samples_1d, lo, hi, |s| s.timestamp_ms);
            let near_2d = within(trial.samples_2d, lo, hi, |s| s.timestamp_ms);
            if near_1d.is_empty() && near_2d.is_empty() {
                return None;
            }
            Some((rmse_1d(near_1d) + rmse_2d(near_2d)) / 2.0)
        })
        .collect()
}

/// Sub-slice of time-ordered samples with `lo <= t <= hi`.
fn within<S>(samples: &[S], lo: f64, hi: f64, time: impl Fn(&S) -> f64) -> &[S] {
    let start = samples.partition_point(|s| time(s) < lo);
    let end = samples.partition_point(|s| time(s) <= hi);
    &samples[start..end.max(start)]
}
