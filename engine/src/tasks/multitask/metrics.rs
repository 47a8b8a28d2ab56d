//! Dual-task cost for simultaneous 1D and 2D tracking.

use serde::{Deserialize, Serialize};

use crate::core::stats::relative_cost;
use crate::tasks::tracking::{Tracking2DMetrics, TrackingMetrics};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MultitaskMetrics {
    /// Relative RMSE increase of the 1D task under dual-task load.
    pub cost_1d: f64,
    pub cost_2d: f64,
    /// Mean of the two per-task costs.
    pub dual_task_cost: f64,
    /// Mean of the two baseline RMSEs.
    pub baseline_rmse: f64,
    /// Mean of the two dual-task RMSEs.
    pub dual_rmse: f64,
}

impl MultitaskMetrics {
    pub fn empty() -> Self {
        Self::default()
    }

    /// `baseline` and `dual` are `[rmse_1d, rmse_2d]`.
    pub fn from_rmse(baseline: [f64; 2], dual: [f64; 2]) -> Self {
        let cost_1d = relative_cost(dual[0], baseline[0]);
        let cost_2d = relative_cost(dual[1], baseline[1]);

        Self {
            cost_1d,
            cost_2d,
            dual_task_cost: (cost_1d + cost_2d) / 2.0,
            baseline_rmse: (baseline[0] + baseline[1]) / 2.0,
            dual_rmse: (dual[0] + dual[1]) / 2.0,
        }
    }

    pub fn from_tracking(
        baseline_1d: &TrackingMetrics,
        baseline_2d: &Tracking2DMetrics,
        dual_1d: &TrackingMetrics,
        dual_2d: &Tracking2DMetrics,
    ) -> Self {
        Self::from_rmse(
            [baseline_1d.rmse, baseline_2d.tracking.rmse],
            [dual_1d.rmse, dual_2d.tracking.rmse],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn thirty_percent_degradation() {
        let m = MultitaskMetrics::from_rmse([0.10, 0.20], [0.15, 0.22]);
        assert!(close(m.cost_1d, 0.5));
        assert!(close(m.cost_2d, 0.10));
        assert!(close(m.dual_task_cost, 0.30));
        assert!(close(m.baseline_rmse, 0.15));
        assert!(close(m.dual_rmse, 0.185));
    }

    #[test]
    fn zero_baseline_costs_nothing() {
        let m = MultitaskMetrics::from_rmse([0.0, 0.2], [0.3, 0.2]);
        assert_eq!(m.cost_1d, 0.0);
        assert_eq!(m.cost_2d, 0.0);
        assert_eq!(m.dual_task_cost, 0.0);
    }

    #[test]
    fn reads_rmse_from_tracking_records() {
        let one = |rmse| TrackingMetrics {
            rmse,
            ..TrackingMetrics::default()
        };
        let two = |rmse| Tracking2DMetrics {
            tracking: one(rmse),
            ..Tracking2DMetrics::default()
        };
        let m = MultitaskMetrics::from_tracking(&one(0.10), &two(0.20), &one(0.15), &two(0.22));
        assert!(close(m.dual_task_cost, 0.30));
    }

    #[test]
    fn empty_record_is_zero() {
        let m = MultitaskMetrics::empty();
        assert_eq!(m.dual_task_cost, 0.0);
        assert_eq!(m.dual_rmse, 0.0);
    }
}
