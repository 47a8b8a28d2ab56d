//! Signal-detection metrics for go/no-go runs.

use serde::{Deserialize, Serialize};

use crate::core::config::AttentionConfig;
use crate::core::stats::{inverse_normal_cdf, mean, median, ratio_or_zero, std_dev};
use crate::tasks::events::{Response, SignalOutcome};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AttentionMetrics {
    pub total_trials: usize,
    pub target_trials: usize,
    pub non_target_trials: usize,
    pub hits: u32,
    pub misses: u32,
    pub false_alarms: u32,
    pub correct_rejections: u32,
    pub hit_rate: f64,
    pub miss_rate: f64,
    pub false_alarm_rate: f64,
    /// Hits plus correct rejections over all trials.
    pub accuracy: f64,
    pub d_prime: f64,
    /// Response bias `c = -(z(H) + z(FA)) / 2`.
    pub criterion: f64,
    pub mean_rt: f64,
    pub median_rt: f64,
    pub sd_rt: f64,
    pub reaction_times: Vec<f64>,
}

impl AttentionMetrics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_responses(responses: &[Response]) -> Self {
        Self::from_responses_with(responses, &AttentionConfig::default())
    }

    pub fn from_responses_with(responses: &[Response], config: &AttentionConfig) -> Self {
        let total_trials = responses.len();
        if total_trials == 0 {
            return Self::default();
        }

        let mut target_trials = 0usize;
        let mut non_target_trials = 0usize;
        let mut hits = 0u32;
        let mut misses = 0u32;
        let mut false_alarms = 0u32;
        let mut correct_rejections = 0u32;
        let mut reaction_times = Vec::new();

        for response in responses {
            if response.is_target {
                target_trials += 1;
            } else {
                non_target_trials += 1;
            }

            match response.outcome() {
                SignalOutcome::Hit => hits = hits.saturating_add(1),
                SignalOutcome::Miss => misses = misses.saturating_add(1),
                SignalOutcome::FalseAlarm => false_alarms = false_alarms.saturating_add(1),
                SignalOutcome::CorrectRejection => {
                    correct_rejections = correct_rejections.saturating_add(1)
                }
            }

            if let Some(rt) = response.reaction_time_ms.filter(|rt| rt.is_finite()) {
                reaction_times.push(rt);
            }
        }

        let hit_rate = ratio_or_zero(hits as f64, target_trials as f64);
        let miss_rate = ratio_or_zero(misses as f64, target_trials as f64);
        let false_alarm_rate = ratio_or_zero(false_alarms as f64, non_target_trials as f64);

        let (d_prime, criterion) = signal_detection_indices(hit_rate, false_alarm_rate, config);

        let mean_rt = mean(&reaction_times);

        Self {
            total_trials,
            target_trials,
            non_target_trials,
            hits,
            misses,
            false_alarms,
            correct_rejections,
            hit_rate,
            miss_rate,
            false_alarm_rate,
            accuracy: (hits + correct_rejections) as f64 / total_trials as f64,
            d_prime,
            criterion,
            mean_rt,
            median_rt: median(&reaction_times),
            sd_rt: std_dev(&reaction_times, mean_rt),
            reaction_times,
        }
    }
}

/// Pull a rate of exactly 0 or 1 to the configured floor or ceiling.
///
/// Without this a perfect run yields an infinite z-score.
pub fn correct_rate(rate: f64, config: &AttentionConfig) -> f64 {
    if rate <= 0.0 {
        config.rate_floor
    } else if rate >= 1.0 {
        config.rate_ceiling
    } else {
        rate
    }
}

/// `(d', c)` from raw hit and false-alarm rates.
pub fn signal_detection_indices(hit_rate: f64, false_alarm_rate: f64, config: &AttentionConfig) -> (f64, f64) {
    let z_hit = inverse_normal_cdf(correct_rate(hit_rate, config));
    let z_fa = inverse_normal_cdf(correct_rate(false_alarm_rate, config));
    (z_hit - z_fa, -0.5 * (z_hit + z_fa))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_gives_zero_record() {
        let m = AttentionMetrics::from_responses(&[]);
        assert_eq!(m, AttentionMetrics::empty());
        assert_eq!(m.d_prime, 0.0);
        assert!(m.reaction_times.is_empty());
    }

    #[test]
    fn counts_hits_misses_and_false_alarms() {
        let responses = [
            Response::withheld(0.0, false),
            Response::responded(1000.0, 1420.0, false),
            Response::responded(2000.0, 2480.0, true),
            Response::withheld(3000.0, true),
        ];
        let m = AttentionMetrics::from_responses(&responses);
        assert_eq!(m.total_trials, 4);
        assert_eq!(m.hits, 1);
        assert_eq!(m.misses, 1);
        assert_eq!(m.false_alarms, 1);
        assert_eq!(m.correct_rejections, 1);
        assert_eq!(m.hit_rate, 0.5);
        assert_eq!(m.miss_rate, 0.5);
        assert_eq!(m.false_alarm_rate, 0.5);
        assert_eq!(m.accuracy, 0.5);
        assert!(m.d_prime.abs() < 1e-9);
        assert_eq!(m.reaction_times, vec![420.0, 480.0]);
        assert_eq!(m.mean_rt, 450.0);
        assert_eq!(m.median_rt, 450.0);
    }

    #[test]
    fn corrected_extremes_give_known_d_prime() {
        // Rates of 0.99 and 0.01 are left untouched by the correction.
        let (d, c) = signal_detection_indices(0.99, 0.01, &AttentionConfig::default());
        assert!((d - 4.6527).abs() < 0.01, "d' = {d}");
        assert!(c.abs() < 1e-9);
    }

    #[test]
    fn perfect_run_is_finite_after_correction() {
        let responses = [
            Response::responded(0.0, 300.0, true),
            Response::responded(1000.0, 1300.0, true),
            Response::withheld(2000.0, false),
        ];
        let m = AttentionMetrics::from_responses(&responses);
        assert_eq!(m.hit_rate, 1.0);
        assert_eq!(m.false_alarm_rate, 0.0);
        // Approximation by design: 1 -> 0.99 and 0 -> 0.01.
        assert!((m.d_prime - 4.6527).abs() < 0.01);
        assert!(m.d_prime.is_finite());
    }

    #[test]
    fn no_non_targets_means_zero_false_alarm_rate() {
        let responses = [Response::responded(0.0, 250.0, true)];
        let m = AttentionMetrics::from_responses(&responses);
        assert_eq!(m.non_target_trials, 0);
        assert_eq!(m.false_alarm_rate, 0.0);
    }

    #[test]
    fn median_uses_even_split() {
        let responses = [
            Response::responded(0.0, 300.0, true),
            Response::responded(1000.0, 1500.0, true),
            Response::responded(2000.0, 2400.0, true),
            Response::responded(3000.0, 3200.0, true),
        ];
        let m = AttentionMetrics::from_responses(&responses);
        assert_eq!(m.median_rt, 350.0);
    }
}
