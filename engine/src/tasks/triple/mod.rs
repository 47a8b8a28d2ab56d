//! Triple task: 1D and 2D tracking with an auditory go/no-go task on top.

pub mod metrics;

pub use metrics::{TripleBaseline, TripleTaskMetrics, TripleTaskTrial};
