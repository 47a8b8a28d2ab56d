//! Auditory go/no-go: jittered tone schedule and signal-detection metrics.

pub mod engine;
pub mod metrics;

pub use engine::{
    generate, score_responses, AuditoryConfig, ResponseWindow, TargetSet, Tone, ToneEvent,
};
pub use metrics::{correct_rate, signal_detection_indices, AttentionMetrics};
