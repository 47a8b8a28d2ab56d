//! Per-trial sample buffer.
//!
//! The driving loop appends one sample per tick, then hands the buffer over
//! exactly once via [`TrialRecorder::finalize`] (or [`TrialRecorder::abort`]
//! for a cancelled trial). Both consume the recorder, so a reducer can never
//! observe a sequence that is still being appended to.

use tracing::{trace, warn};

use super::error::RecordError;
use super::qc::QualityFlags;

/// Anything recorded against the trial clock.
pub trait Timestamped {
    /// Milliseconds since trial start.
    fn timestamp_ms(&self) -> f64;

    /// Whether every numeric payload is finite.
    fn is_finite(&self) -> bool {
        true
    }
}

#[derive(Debug, Clone)]
pub struct TrialRecorder<S> {
    samples: Vec<S>,
    qc: QualityFlags,
    min_samples: usize,
}

impl<S: Timestamped> TrialRecorder<S> {
    pub fn new(min_samples: usize) -> Self {
        Self {
            samples: Vec::new(),
            qc: QualityFlags::pristine(),
            min_samples,
        }
    }

    pub fn with_capacity(min_samples: usize, capacity: usize) -> Self {
        Self {
            samples: Vec::with_capacity(capacity),
            qc: QualityFlags::pristine(),
            min_samples,
        }
    }

    /// Append a sample. Rejected samples are counted in QC and never stored.
    pub fn push(&mut self, sample: S) -> Result<(), RecordError> {
        let ts = sample.timestamp_ms();
        if !ts.is_finite() || ts < 0.0 {
            self.qc.log_rejected_sample();
            warn!(timestamp_ms = ts, "rejecting sample with invalid timestamp");
            return Err(RecordError::InvalidTimestamp(ts));
        }
        if let Some(previous_ms) = self.last_timestamp_ms() {
            if ts < previous_ms {
                self.qc.log_rejected_sample();
                warn!(timestamp_ms = ts, previous_ms, "rejecting out-of-order sample");
                return Err(RecordError::OutOfOrder {
                    timestamp_ms: ts,
                    previous_ms,
                });
            }
        }
        if !sample.is_finite() {
            self.qc.log_rejected_sample();
            warn!(timestamp_ms = ts, "rejecting non-finite sample");
            return Err(RecordError::NonFinite { timestamp_ms: ts });
        }
        self.samples.push(sample);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn last_timestamp_ms(&self) -> Option<f64> {
        self.samples.last().map(Timestamped::timestamp_ms)
    }

    /// Close the buffer after a full-length trial.
    pub fn finalize(self) -> FinishedTrial<S> {
        self.close(false)
    }

    /// Close the buffer after the driver cancelled the trial early.
    pub fn abort(self) -> FinishedTrial<S> {
        self.close(true)
    }

    fn close(mut self, truncated: bool) -> FinishedTrial<S> {
        if truncated {
            self.qc.mark_truncated();
        }
        self.qc.mark_sample_count(self.samples.len(), self.min_samples);
        trace!(
            samples = self.samples.len(),
            truncated,
            clean = self.qc.is_clean(),
            "trial buffer finalized"
        );
        FinishedTrial {
            samples: self.samples,
            qc: self.qc,
        }
    }
}

/// A closed, read-only trial buffer.
#[derive(Debug, Clone)]
pub struct FinishedTrial<S> {
    samples: Vec<S>,
    qc: QualityFlags,
}

impl<S> FinishedTrial<S> {
    pub fn samples(&self) -> &[S] {
        &self.samples
    }

    pub fn qc(&self) -> &QualityFlags {
        &self.qc
    }

    pub fn into_parts(self) -> (Vec<S>, QualityFlags) {
        (self.samples, self.qc)
    }
}
