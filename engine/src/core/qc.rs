//! Quality control markers for recorded trials. These flags capture context that helps interpret
//! a metrics record without changing how it was computed.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QualityFlags {
    pub sample_count: usize,
    pub min_samples_met: bool,
    /// The driver aborted the trial before its planned end.
    pub truncated: bool,
    /// Samples the recorder refused (out of order or non-finite).
    pub rejected_samples: u32,
}

impl QualityFlags {
    pub fn pristine() -> Self {
        Self {
            sample_count: 0,
            min_samples_met: true,
            truncated: false,
            rejected_samples: 0,
        }
    }

    pub fn log_rejected_sample(&mut self) {
        self.rejected_samples = self.rejected_samples.saturating_add(1);
    }

    pub fn mark_truncated(&mut self) {
        self.truncated = true;
    }

    pub fn mark_sample_count(&mut self, count: usize, min_samples: usize) {
        self.sample_count = count;
        self.min_samples_met = count >= min_samples;
    }

    pub fn is_clean(&self) -> bool {
        self.min_samples_met && !self.truncated && self.rejected_samples == 0
    }

    /// Short human summary, e.g. `QC: clean run` or `QC: truncated, 2 rejected samples`.
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.truncated {
            parts.push("truncated".to_string());
        }
        if self.rejected_samples > 0 {
            parts.push(format!("{} rejected samples", self.rejected_samples));
        }
        if !self.min_samples_met {
            parts.push(format!("only {} samples", self.sample_count));
        }

        if parts.is_empty() {
            "QC: clean run".to_string()
        } else {
            format!("QC: {}", parts.join(", "))
        }
    }
}

impl Default for QualityFlags {
    fn default() -> Self {
        Self::pristine()
    }
}
