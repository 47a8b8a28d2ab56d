//! Metric definitions and aggregation helpers for tracking trials.

use serde::{Deserialize, Serialize};

use crate::core::stats::{mean, rms};

use super::sample::{Sample, Sample2D};

/// Default on-target tolerance for 1D tracking, in normalized units.
pub const THRESHOLD_1D: f64 = 0.05;
/// Default on-target tolerance for 2D tracking, in normalized units.
pub const THRESHOLD_2D: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TrackingMetrics {
    pub mae: f64,
    pub rmse: f64,
    /// Percentage of samples within the on-target tolerance.
    pub time_on_target: f64,
    pub overshoot_count: u32,
    pub overshoot_magnitude: f64,
    /// Mean absolute sample-to-sample change of the raw input.
    ///
    /// A total-variation measure. Jerk-based smoothness scores blow up on
    /// noisy frame timing, so the second derivative is never used here.
    pub smoothness: f64,
}

impl TrackingMetrics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_samples(samples: &[Sample]) -> Self {
        Self::from_samples_with(samples, THRESHOLD_1D)
    }

    pub fn from_samples_with(samples: &[Sample], threshold: f64) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let errors: Vec<f64> = samples.iter().map(Sample::error).collect();
        let abs_errors: Vec<f64> = errors.iter().map(|e| e.abs()).collect();

        let mut overshoot_count = 0u32;
        let mut overshoot_sizes = Vec::new();
        for pair in errors.windows(2) {
            let (before, after) = (pair[0], pair[1]);
            if before * after < 0.0 && after.abs() > threshold {
                overshoot_count = overshoot_count.saturating_add(1);
                overshoot_sizes.push(after.abs());
            }
        }

        let input_steps: Vec<f64> = samples
            .windows(2)
            .map(|pair| (pair[1].input_value - pair[0].input_value).abs())
            .collect();

        Self {
            mae: mean(&abs_errors),
            rmse: rms(errors.iter().copied()),
            time_on_target: on_target_pct(&abs_errors, threshold),
            overshoot_count,
            overshoot_magnitude: mean(&overshoot_sizes),
            smoothness: mean(&input_steps),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Tracking2DMetrics {
    #[serde(flatten)]
    pub tracking: TrackingMetrics,
    /// Milliseconds from each loss of the target to the next reacquisition.
    pub reacquisition_times: Vec<f64>,
    pub mean_reacquisition_time: f64,
}

impl Tracking2DMetrics {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_samples(samples: &[Sample2D]) -> Self {
        Self::from_samples_with(samples, THRESHOLD_2D)
    }

    pub fn from_samples_with(samples: &[Sample2D], threshold: f64) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let errors: Vec<f64> = samples.iter().map(Sample2D::error).collect();

        // Compare error vectors two ticks apart; single-frame jitter around the
        // target would otherwise register as an overshoot.
        let mut overshoot_count = 0u32;
        let mut overshoot_sizes = Vec::new();
        for i in 2..samples.len() {
            let earlier = samples[i - 2].error_vector();
            let current = samples[i].error_vector();
            if earlier.length() > threshold
                && current.length() > threshold
                && earlier.dot(current) < 0.0
            {
                overshoot_count = overshoot_count.saturating_add(1);
                overshoot_sizes.push(current.length());
            }
        }

        let input_steps: Vec<f64> = samples
            .windows(2)
            .map(|pair| (pair[1].input_value - pair[0].input_value).length())
            .collect();

        let reacquisition_times = reacquisition_times(samples, threshold);

        Self {
            tracking: TrackingMetrics {
                mae: mean(&errors),
                rmse: rms(errors.iter().copied()),
                time_on_target: on_target_pct(&errors, threshold),
                overshoot_count,
                overshoot_magnitude: mean(&overshoot_sizes),
                smoothness: mean(&input_steps),
            },
            mean_reacquisition_time: mean(&reacquisition_times),
            reacquisition_times,
        }
    }
}

/// Combined RMSE over the Euclidean error of 2D samples.
pub fn rmse_2d(samples: &[Sample2D]) -> f64 {
    rms(samples.iter().map(Sample2D::error))
}

/// RMSE over the signed error of 1D samples.
pub fn rmse_1d(samples: &[Sample]) -> f64 {
    rms(samples.iter().map(Sample::error))
}

fn on_target_pct(abs_errors: &[f64], threshold: f64) -> f64 {
    if abs_errors.is_empty() {
        return 0.0;
    }
    let on_target = abs_errors.iter().filter(|e| **e <= threshold).count();
    100.0 * on_target as f64 / abs_errors.len() as f64
}

fn reacquisition_times(samples: &[Sample2D], threshold: f64) -> Vec<f64> {
    let mut times = Vec::new();
    let mut lost_at: Option<f64> = None;

    for sample in samples {
        let on_target = sample.error() <= threshold;
        match (lost_at, on_target) {
            (None, false) => lost_at = Some(sample.timestamp_ms),
            (Some(since), true) => {
                times.push(sample.timestamp_ms - since);
                lost_at = None;
            }
            _ => {}
        }
    }

    times
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Vec2;

    fn s(t: f64, target: f64, cursor: f64) -> Sample {
        Sample::new(t, target, cursor, 0.0)
    }

    fn s2(t: f64, target: (f64, f64), cursor: (f64, f64)) -> Sample2D {
        Sample2D::new(
            t,
            Vec2::new(target.0, target.1),
            Vec2::new(cursor.0, cursor.1),
            Vec2::ZERO,
        )
    }

    #[test]
    fn empty_input_gives_zero_record() {
        assert_eq!(
            TrackingMetrics::from_samples(&[]),
            TrackingMetrics {
                mae: 0.0,
                rmse: 0.0,
                time_on_target: 0.0,
                overshoot_count: 0,
                overshoot_magnitude: 0.0,
                smoothness: 0.0,
            }
        );
        let planar = Tracking2DMetrics::from_samples(&[]);
        assert_eq!(planar, Tracking2DMetrics::empty());
        assert!(planar.reacquisition_times.is_empty());
    }

    #[test]
    fn three_sample_scenario() {
        let samples = [s(0.0, 0.0, 0.0), s(1.0, 1.0, 0.0), s(2.0, 1.0, 1.0)];
        let m = TrackingMetrics::from_samples(&samples);
        assert!((m.mae - 1.0 / 3.0).abs() < 1e-12);
        assert!((m.rmse - (1.0f64 / 3.0).sqrt()).abs() < 1e-12);
        assert!((m.time_on_target - 200.0 / 3.0).abs() < 1e-9);
        assert_eq!(m.overshoot_count, 0);
        assert_eq!(m.smoothness, 0.0);
    }

    #[test]
    fn sign_reversals_beyond_threshold_are_overshoots() {
        // errors: 0.3, -0.2, -0.01, 0.02, 0.4
        let samples = [
            s(0.0, 0.3, 0.0),
            s(16.0, 0.0, 0.2),
            s(32.0, 0.0, 0.01),
            s(48.0, 0.02, 0.0),
            s(64.0, 0.4, 0.0),
        ];
        let m = TrackingMetrics::from_samples(&samples);
        // -0.2 after 0.3 counts; 0.02 after -0.01 is inside the tolerance.
        assert_eq!(m.overshoot_count, 1);
        assert!((m.overshoot_magnitude - 0.2).abs() < 1e-12);
    }

    #[test]
    fn smoothness_is_total_variation_of_input() {
        let samples = [
            Sample::new(0.0, 0.0, 0.0, 0.0),
            Sample::new(16.0, 0.0, 0.0, 0.5),
            Sample::new(32.0, 0.0, 0.0, -0.5),
            Sample::new(48.0, 0.0, 0.0, -0.5),
        ];
        let m = TrackingMetrics::from_samples(&samples);
        assert!((m.smoothness - 0.5).abs() < 1e-12);
    }

    #[test]
    fn planar_errors_are_euclidean() {
        let samples = [s2(0.0, (0.3, 0.4), (0.0, 0.0)), s2(16.0, (0.0, 0.0), (0.0, 0.0))];
        let m = Tracking2DMetrics::from_samples(&samples);
        assert!((m.tracking.mae - 0.25).abs() < 1e-12);
        assert!((m.tracking.rmse - (0.125f64).sqrt()).abs() < 1e-12);
        assert!((m.tracking.time_on_target - 50.0).abs() < 1e-12);
    }

    #[test]
    fn planar_overshoot_uses_two_step_lookback() {
        let samples = [
            s2(0.0, (0.5, 0.0), (0.0, 0.0)),   // error +x
            s2(16.0, (0.5, 0.0), (0.45, 0.0)), // on target
            s2(32.0, (0.5, 0.0), (0.8, 0.0)),  // error -x, reversed vs sample 0
            s2(48.0, (0.5, 0.0), (0.85, 0.0)), // error -x, sample 1 below threshold
        ];
        let m = Tracking2DMetrics::from_samples(&samples);
        assert_eq!(m.tracking.overshoot_count, 1);
        assert!((m.tracking.overshoot_magnitude - 0.3).abs() < 1e-12);
    }

    #[test]
    fn reacquisition_times_measure_each_loss() {
        let samples = [
            s2(0.0, (0.0, 0.0), (0.0, 0.0)),
            s2(100.0, (0.5, 0.0), (0.0, 0.0)),
            s2(200.0, (0.5, 0.0), (0.2, 0.0)),
            s2(350.0, (0.5, 0.0), (0.45, 0.0)),
            s2(400.0, (0.0, 0.5), (0.0, 0.0)),
            s2(450.0, (0.0, 0.5), (0.0, 0.5)),
            s2(500.0, (0.0, 0.9), (0.0, 0.0)),
        ];
        let m = Tracking2DMetrics::from_samples(&samples);
        assert_eq!(m.reacquisition_times, vec![250.0, 50.0]);
        assert!((m.mean_reacquisition_time - 150.0).abs() < 1e-12);
    }

    #[test]
    fn reducer_is_idempotent() {
        let samples: Vec<Sample> = (0..50)
            .map(|i| {
                let t = i as f64 * 16.0;
                Sample::new(t, (t / 100.0).sin(), (t / 110.0).sin(), (t / 90.0).cos())
            })
            .collect();
        let a = TrackingMetrics::from_samples(&samples);
        let b = TrackingMetrics::from_samples(&samples);
        assert_eq!(a, b);
        assert_eq!(a.rmse.to_bits(), b.rmse.to_bits());
    }
}
