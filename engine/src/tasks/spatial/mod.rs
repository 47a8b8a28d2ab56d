//! Mental rotation: item schedule plus accuracy and speed summaries.

pub mod engine;
pub mod metrics;

pub use engine::{generate, max_angle_deg, RotationItem};
pub use metrics::{SpatialMetrics, SpatialTrial};
