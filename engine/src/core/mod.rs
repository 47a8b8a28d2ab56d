//! Cross-task building blocks: configuration, errors, numeric helpers and the
//! per-trial recording plumbing.

pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod qc;
pub mod random;
pub mod recorder;
pub mod stats;
pub mod storage;

pub use config::EngineConfig;
pub use error::{ConfigError, RecordError};
pub use geometry::{Bounds, Bounds2D, Vec2};
pub use qc::QualityFlags;
pub use recorder::{FinishedTrial, Timestamped, TrialRecorder};
pub use storage::TrialSummary;
