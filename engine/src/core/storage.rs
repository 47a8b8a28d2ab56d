//! Records handed to an external persistence layer. The engine builds them
//! but never writes them anywhere.

use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

use crate::adaptive::Verdict;
use crate::core::qc::QualityFlags;
use crate::tasks::{MetricsRecord, TaskModule};

/// One completed trial, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialSummary {
    pub id: String,
    /// Groups the trials of one module run.
    pub run_id: String,
    pub module: TaskModule,
    /// RFC 3339, UTC.
    pub created_at: String,
    /// Difficulty the trial ran at.
    pub difficulty: f64,
    /// Difficulty chosen for the following trial.
    pub next_difficulty: f64,
    pub verdict: Verdict,
    pub metrics: MetricsRecord,
    pub qc: QualityFlags,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TrialSummary {
    pub fn new(
        run_id: &str,
        module: TaskModule,
        difficulty: f64,
        next_difficulty: f64,
        verdict: Verdict,
        metrics: MetricsRecord,
        qc: QualityFlags,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            run_id: run_id.to_string(),
            module,
            created_at: now_rfc3339(),
            difficulty,
            next_difficulty,
            verdict,
            metrics,
            qc,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn created_at(&self) -> Option<OffsetDateTime> {
        OffsetDateTime::parse(&self.created_at, &Rfc3339).ok()
    }
}

pub fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".into())
}
