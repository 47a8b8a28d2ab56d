//! Continuous tracking: moving target generators and error statistics.

pub mod curvilinear;
pub mod engine;
pub mod jerk;
pub mod metrics;
pub mod momentum;
pub mod ornstein;
pub mod sample;
pub mod sines;

pub use engine::{
    Generator1D, Generator2D, GeneratorConfig, GeneratorConfig1D, GeneratorConfig2D,
    GeneratorKind1D, GeneratorKind2D, Process1D, Process2D,
};
pub use metrics::{rmse_1d, rmse_2d, Tracking2DMetrics, TrackingMetrics};
pub use sample::{Sample, Sample2D};
