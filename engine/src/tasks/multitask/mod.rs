//! Dual tracking: two tracking tasks at once, scored against their baselines.

pub mod metrics;

pub use metrics::MultitaskMetrics;
