//! Task modules. Each task keeps its stimulus or target engine next to the
//! reducer that folds a finished trial into metrics.

pub mod auditory;
pub mod events;
pub mod interrupt;
pub mod multitask;
pub mod spatial;
pub mod tracking;
pub mod triple;

use serde::{Deserialize, Serialize};

use crate::adaptive::ControllerKind;
use crate::core::format::{format_cost, format_ms, format_pct};

pub use auditory::AttentionMetrics;
pub use interrupt::InterruptMetrics;
pub use multitask::MultitaskMetrics;
pub use spatial::SpatialMetrics;
pub use tracking::{Tracking2DMetrics, TrackingMetrics};
pub use triple::TripleTaskMetrics;

/// The seven training modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskModule {
    #[serde(rename = "tracking_1d")]
    Tracking1D,
    #[serde(rename = "tracking_2d")]
    Tracking2D,
    AuditoryGoNoGo,
    MentalRotation,
    DualTask,
    TripleTask,
    InterruptHandling,
}

impl TaskModule {
    pub const ALL: [TaskModule; 7] = [
        TaskModule::Tracking1D,
        TaskModule::Tracking2D,
        TaskModule::AuditoryGoNoGo,
        TaskModule::MentalRotation,
        TaskModule::DualTask,
        TaskModule::TripleTask,
        TaskModule::InterruptHandling,
    ];

    /// Stable identifier used in stored summaries.
    pub fn id(&self) -> &'static str {
        match self {
            TaskModule::Tracking1D => "tracking_1d",
            TaskModule::Tracking2D => "tracking_2d",
            TaskModule::AuditoryGoNoGo => "auditory_go_no_go",
            TaskModule::MentalRotation => "mental_rotation",
            TaskModule::DualTask => "dual_task",
            TaskModule::TripleTask => "triple_task",
            TaskModule::InterruptHandling => "interrupt_handling",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskModule::Tracking1D => "Continuous tracking (1D)",
            TaskModule::Tracking2D => "Continuous tracking (2D)",
            TaskModule::AuditoryGoNoGo => "Auditory go/no-go",
            TaskModule::MentalRotation => "Mental rotation",
            TaskModule::DualTask => "Dual tracking",
            TaskModule::TripleTask => "Triple task",
            TaskModule::InterruptHandling => "Interrupt handling",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|module| module.id() == id)
    }

    /// Tracking-driven modules adapt on RMSE, the rest on accuracy.
    pub fn default_controller(&self) -> ControllerKind {
        match self {
            TaskModule::Tracking1D
            | TaskModule::Tracking2D
            | TaskModule::DualTask
            | TaskModule::TripleTask => ControllerKind::Threshold,
            TaskModule::AuditoryGoNoGo
            | TaskModule::MentalRotation
            | TaskModule::InterruptHandling => ControllerKind::Band,
        }
    }
}

/// One trial's metrics. Exactly one family is populated per trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum MetricsRecord {
    Tracking(TrackingMetrics),
    #[serde(rename = "tracking_2d")]
    Tracking2D(Tracking2DMetrics),
    Attention(AttentionMetrics),
    Spatial(SpatialMetrics),
    Multitask(MultitaskMetrics),
    TripleTask(TripleTaskMetrics),
    Interrupt(InterruptMetrics),
}

impl MetricsRecord {
    pub fn family(&self) -> &'static str {
        match self {
            MetricsRecord::Tracking(_) => "tracking",
            MetricsRecord::Tracking2D(_) => "tracking_2d",
            MetricsRecord::Attention(_) => "attention",
            MetricsRecord::Spatial(_) => "spatial",
            MetricsRecord::Multitask(_) => "multitask",
            MetricsRecord::TripleTask(_) => "triple_task",
            MetricsRecord::Interrupt(_) => "interrupt",
        }
    }

    /// Tracking error the threshold controller steers on, when the family has one.
    pub fn tracking_rmse(&self) -> Option<f64> {
        match self {
            MetricsRecord::Tracking(m) => Some(m.rmse),
            MetricsRecord::Tracking2D(m) => Some(m.tracking.rmse),
            MetricsRecord::Multitask(m) => Some(m.dual_rmse),
            MetricsRecord::TripleTask(m) => Some(m.triple_rmse),
            MetricsRecord::Interrupt(m) => Some(m.overall_rmse),
            MetricsRecord::Attention(_) | MetricsRecord::Spatial(_) => None,
        }
    }

    /// Proportion correct the band controller steers on, when the family has one.
    pub fn accuracy(&self) -> Option<f64> {
        match self {
            MetricsRecord::Attention(m) => Some(m.accuracy),
            MetricsRecord::Spatial(m) => Some(m.accuracy),
            MetricsRecord::Interrupt(m) => Some(m.interrupt_accuracy),
            _ => None,
        }
    }

    /// One-line readout of the family's main figures.
    pub fn headline(&self) -> String {
        match self {
            MetricsRecord::Tracking(m) => {
                format!("rmse {:.3}, on target {}", m.rmse, format_pct(m.time_on_target / 100.0))
            }
            MetricsRecord::Tracking2D(m) => format!(
                "rmse {:.3}, reacquisition {}",
                m.tracking.rmse,
                format_ms(m.mean_reacquisition_time)
            ),
            MetricsRecord::Attention(m) => format!(
                "d' {:.2}, accuracy {}, rt {}",
                m.d_prime,
                format_pct(m.accuracy),
                format_ms(m.mean_rt)
            ),
            MetricsRecord::Spatial(m) => {
                format!("accuracy {}, rt {}", format_pct(m.accuracy), format_ms(m.reaction_time))
            }
            MetricsRecord::Multitask(m) => format!("dual-task cost {}", format_cost(m.dual_task_cost)),
            MetricsRecord::TripleTask(m) => format!(
                "motor cost {}, auditory cost {}",
                format_cost(m.dual_motor_cost),
                format_cost(m.auditory_cost)
            ),
            MetricsRecord::Interrupt(m) => format!(
                "accuracy {}, interference {}, recovery {}",
                format_pct(m.interrupt_accuracy),
                format_cost(m.interference_cost),
                format_ms(m.mean_recovery_time)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_ids_round_trip() {
        for module in TaskModule::ALL {
            assert_eq!(TaskModule::from_id(module.id()), Some(module));
        }
        assert_eq!(TaskModule::from_id("pong"), None);
    }

    #[test]
    fn headline_formats_family_figures() {
        let spatial = MetricsRecord::Spatial(SpatialMetrics {
            accuracy: 0.75,
            reaction_time: 1840.4,
            ..SpatialMetrics::default()
        });
        assert_eq!(spatial.headline(), "accuracy 75.0%, rt 1840 ms");

        let multitask = MetricsRecord::Multitask(MultitaskMetrics {
            dual_task_cost: 0.3,
            ..MultitaskMetrics::default()
        });
        assert_eq!(multitask.headline(), "dual-task cost +30.0%");

        let interrupt = MetricsRecord::Interrupt(InterruptMetrics {
            interrupt_accuracy: 0.5,
            interference_cost: -0.125,
            mean_recovery_time: 48.0,
            ..InterruptMetrics::default()
        });
        assert_eq!(interrupt.headline(), "accuracy 50.0%, interference -12.5%, recovery 48 ms");
    }

    #[test]
    fn serde_names_match_ids() {
        for module in TaskModule::ALL {
            let json = serde_json::to_value(module).unwrap();
            assert_eq!(json, module.id());
        }
        let record = MetricsRecord::Tracking2D(Tracking2DMetrics::default());
        assert_eq!(serde_json::to_value(&record).unwrap()["family"], record.family());
    }

    #[test]
    fn record_serializes_with_family_tag() {
        let record = MetricsRecord::Spatial(SpatialMetrics::default());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["family"], "spatial");
        let back: MetricsRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn controller_inputs_per_family() {
        let spatial = MetricsRecord::Spatial(SpatialMetrics {
            accuracy: 0.9,
            ..SpatialMetrics::default()
        });
        assert_eq!(spatial.accuracy(), Some(0.9));
        assert_eq!(spatial.tracking_rmse(), None);

        let tracking = MetricsRecord::Tracking(TrackingMetrics {
            rmse: 0.2,
            ..TrackingMetrics::default()
        });
        assert_eq!(tracking.tracking_rmse(), Some(0.2));
        assert_eq!(tracking.accuracy(), None);
    }
}
