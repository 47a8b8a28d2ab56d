//! Error types for the few fallible paths in the engine. Reducers and
//! controllers never fail; configuration loading and sample recording can.

use std::path::PathBuf;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("target set must be a non-empty proper subset of the tones (got {count} of 3)")]
    TargetSet { count: usize },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Errors raised when a sample cannot be appended to a trial buffer.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("sample at {timestamp_ms} ms precedes the previous sample at {previous_ms} ms")]
    OutOfOrder { timestamp_ms: f64, previous_ms: f64 },
    #[error("sample timestamp {0} is negative or not finite")]
    InvalidTimestamp(f64),
    #[error("sample at {timestamp_ms} ms carries a non-finite value")]
    NonFinite { timestamp_ms: f64 },
}
