//! Discrete stimulus events and the responses scored against them.

use serde::{Deserialize, Serialize};

/// A scheduled stimulus, timestamped relative to trial start.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StimulusEvent<K> {
    pub timestamp_ms: f64,
    pub kind: K,
    pub is_target: bool,
}

impl<K> StimulusEvent<K> {
    pub fn new(timestamp_ms: f64, kind: K, is_target: bool) -> Self {
        Self {
            timestamp_ms,
            kind,
            is_target,
        }
    }
}

/// The participant's reaction (or lack of one) to a single stimulus.
///
/// Construct through [`Response::responded`] or [`Response::withheld`]; a
/// withheld response never carries a timestamp or reaction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub stimulus_timestamp_ms: f64,
    pub response_timestamp_ms: Option<f64>,
    pub is_target: bool,
    pub responded: bool,
    pub reaction_time_ms: Option<f64>,
}

impl Response {
    pub fn responded(stimulus_timestamp_ms: f64, response_timestamp_ms: f64, is_target: bool) -> Self {
        Self {
            stimulus_timestamp_ms,
            response_timestamp_ms: Some(response_timestamp_ms),
            is_target,
            responded: true,
            reaction_time_ms: Some(response_timestamp_ms - stimulus_timestamp_ms),
        }
    }

    pub fn withheld(stimulus_timestamp_ms: f64, is_target: bool) -> Self {
        Self {
            stimulus_timestamp_ms,
            response_timestamp_ms: None,
            is_target,
            responded: false,
            reaction_time_ms: None,
        }
    }

    pub fn outcome(&self) -> SignalOutcome {
        match (self.is_target, self.responded) {
            (true, true) => SignalOutcome::Hit,
            (true, false) => SignalOutcome::Miss,
            (false, true) => SignalOutcome::FalseAlarm,
            (false, false) => SignalOutcome::CorrectRejection,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalOutcome {
    Hit,
    Miss,
    FalseAlarm,
    CorrectRejection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn withheld_responses_carry_no_timing() {
        let r = Response::withheld(500.0, true);
        assert!(!r.responded);
        assert_eq!(r.response_timestamp_ms, None);
        assert_eq!(r.reaction_time_ms, None);
        assert_eq!(r.outcome(), SignalOutcome::Miss);
    }

    #[test]
    fn reaction_time_is_relative_to_stimulus() {
        let r = Response::responded(500.0, 820.0, false);
        assert_eq!(r.reaction_time_ms, Some(320.0));
        assert_eq!(r.outcome(), SignalOutcome::FalseAlarm);
    }
}
