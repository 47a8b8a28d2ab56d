//! Tone schedule and response scoring for the auditory go/no-go task.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::error::ConfigError;
use crate::core::random::uniform;
use crate::tasks::events::{Response, StimulusEvent};

/// First tone plays this far into the trial.
pub const LEAD_IN_MS: f64 = 500.0;
/// Inter-stimulus jitter, ± this many milliseconds.
pub const JITTER_MS: f64 = 150.0;
pub const TARGET_PROBABILITY: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Low,
    Medium,
    High,
}

impl Tone {
    pub const ALL: [Tone; 3] = [Tone::Low, Tone::Medium, Tone::High];
}

pub type ToneEvent = StimulusEvent<Tone>;

/// Tones that demand a response. Always a non-empty proper subset, so both
/// targets and non-targets can be drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Tone>", into = "Vec<Tone>")]
pub struct TargetSet {
    targets: Vec<Tone>,
    distractors: Vec<Tone>,
}

impl TargetSet {
    pub fn new(tones: &[Tone]) -> Result<Self, ConfigError> {
        let targets: Vec<Tone> = Tone::ALL.into_iter().filter(|t| tones.contains(t)).collect();
        if targets.is_empty() || targets.len() == Tone::ALL.len() {
            return Err(ConfigError::TargetSet {
                count: targets.len(),
            });
        }
        let distractors = Tone::ALL
            .into_iter()
            .filter(|t| !targets.contains(t))
            .collect();
        Ok(Self {
            targets,
            distractors,
        })
    }

    pub fn targets(&self) -> &[Tone] {
        &self.targets
    }

    pub fn distractors(&self) -> &[Tone] {
        &self.distractors
    }

    pub fn contains(&self, tone: Tone) -> bool {
        self.targets.contains(&tone)
    }
}

impl Default for TargetSet {
    fn default() -> Self {
        Self {
            targets: vec![Tone::High],
            distractors: vec![Tone::Low, Tone::Medium],
        }
    }
}

impl TryFrom<Vec<Tone>> for TargetSet {
    type Error = ConfigError;

    fn try_from(tones: Vec<Tone>) -> Result<Self, Self::Error> {
        Self::new(&tones)
    }
}

impl From<TargetSet> for Vec<Tone> {
    fn from(set: TargetSet) -> Self {
        set.targets
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuditoryConfig {
    pub difficulty: f64,
    #[serde(default)]
    pub targets: TargetSet,
}

impl AuditoryConfig {
    pub fn new(difficulty: f64, targets: TargetSet) -> Self {
        Self {
            difficulty,
            targets,
        }
    }

    fn clamped_difficulty(&self) -> f64 {
        if self.difficulty.is_nan() {
            0.0
        } else {
            self.difficulty.clamp(0.0, 1.0)
        }
    }

    /// Nominal gap between tones before jitter.
    pub fn base_interval_ms(&self) -> f64 {
        1500.0 - 800.0 * self.clamped_difficulty()
    }

    pub fn response_window(&self) -> ResponseWindow {
        ResponseWindow {
            min_ms: 100.0,
            max_ms: 1200.0 - 600.0 * self.clamped_difficulty(),
        }
    }
}

/// Latency range in which a key press counts as a response.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResponseWindow {
    pub min_ms: f64,
    pub max_ms: f64,
}

impl ResponseWindow {
    pub fn contains(&self, latency_ms: f64) -> bool {
        latency_ms >= self.min_ms && latency_ms <= self.max_ms
    }
}

/// Build the full tone schedule for a trial of `total_duration_ms`.
pub fn generate<R: Rng + ?Sized>(
    config: &AuditoryConfig,
    total_duration_ms: f64,
    rng: &mut R,
) -> Vec<ToneEvent> {
    if !total_duration_ms.is_finite() {
        return Vec::new();
    }
    let base = config.base_interval_ms();
    let mut events = Vec::new();
    let mut t = LEAD_IN_MS;

    while t < total_duration_ms {
        let is_target = rng.gen_bool(TARGET_PROBABILITY);
        let pool = if is_target {
            config.targets.targets()
        } else {
            config.targets.distractors()
        };
        let tone = pool[rng.gen_range(0..pool.len())];
        events.push(StimulusEvent::new(t, tone, is_target));
        t += base + uniform(rng, -JITTER_MS, JITTER_MS);
    }

    debug!(
        events = events.len(),
        targets = events.iter().filter(|e| e.is_target).count(),
        total_duration_ms,
        "auditory schedule generated"
    );
    events
}

/// Score key presses against the schedule, producing exactly one response per
/// event.
///
/// A press belongs to the event whose span `[event, next event)` contains it.
/// The first press in that span whose latency lies inside `window` is the
/// response; presses that are too early or too late are disregarded.
pub fn score_responses<K>(
    events: &[StimulusEvent<K>],
    presses_ms: &[f64],
    window: ResponseWindow,
) -> Vec<Response> {
    let mut presses: Vec<f64> = presses_ms.iter().copied().filter(|p| p.is_finite()).collect();
    presses.sort_by(|a, b| a.total_cmp(b));

    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let span_end = events
                .get(i + 1)
                .map(|next| next.timestamp_ms)
                .unwrap_or(f64::INFINITY);
            presses
                .iter()
                .copied()
                .filter(|p| *p >= event.timestamp_ms && *p < span_end)
                .find(|p| window.contains(p - event.timestamp_ms))
                .map(|p| Response::responded(event.timestamp_ms, p, event.is_target))
                .unwrap_or_else(|| Response::withheld(event.timestamp_ms, event.is_target))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::seeded;

    #[test]
    fn target_set_must_be_proper_subset() {
        assert!(TargetSet::new(&[]).is_err());
        assert!(TargetSet::new(&Tone::ALL).is_err());
        let set = TargetSet::new(&[Tone::Low, Tone::Low]).unwrap();
        assert_eq!(set.targets(), &[Tone::Low]);
        assert_eq!(set.distractors(), &[Tone::Medium, Tone::High]);
    }

    #[test]
    fn target_set_deserializes_through_validation() {
        let ok: TargetSet = serde_json::from_str(r#"["medium"]"#).unwrap();
        assert!(ok.contains(Tone::Medium));
        assert!(serde_json::from_str::<TargetSet>(r#"["low","medium","high"]"#).is_err());
    }

    #[test]
    fn schedule_timing_and_labels() {
        let config = AuditoryConfig::new(0.5, TargetSet::default());
        let mut rng = seeded(31);
        let events = generate(&config, 60_000.0, &mut rng);

        assert!(!events.is_empty());
        assert_eq!(events[0].timestamp_ms, LEAD_IN_MS);
        for pair in events.windows(2) {
            let gap = pair[1].timestamp_ms - pair[0].timestamp_ms;
            assert!(gap >= 1100.0 - JITTER_MS && gap <= 1100.0 + JITTER_MS);
        }
        assert!(events.iter().all(|e| e.timestamp_ms < 60_000.0));
        for event in &events {
            assert_eq!(event.is_target, config.targets.contains(event.kind));
        }
        let share = events.iter().filter(|e| e.is_target).count() as f64 / events.len() as f64;
        assert!(share > 0.15 && share < 0.55, "target share {share}");
    }

    #[test]
    fn short_trial_has_no_events() {
        let config = AuditoryConfig::default();
        assert!(generate(&config, 400.0, &mut seeded(1)).is_empty());
    }

    #[test]
    fn unbounded_duration_has_no_events() {
        let config = AuditoryConfig::default();
        assert!(generate(&config, f64::INFINITY, &mut seeded(1)).is_empty());
        assert!(generate(&config, f64::NAN, &mut seeded(1)).is_empty());
    }

    #[test]
    fn response_window_shrinks_with_difficulty() {
        assert_eq!(AuditoryConfig::new(0.0, TargetSet::default()).response_window().max_ms, 1200.0);
        assert_eq!(AuditoryConfig::new(1.0, TargetSet::default()).response_window().max_ms, 600.0);
    }

    #[test]
    fn presses_outside_window_are_disregarded() {
        let events = vec![
            StimulusEvent::new(500.0, Tone::High, true),
            StimulusEvent::new(2000.0, Tone::Low, false),
            StimulusEvent::new(3500.0, Tone::High, true),
        ];
        let window = ResponseWindow {
            min_ms: 100.0,
            max_ms: 900.0,
        };
        // 550 is too early for event 0, 800 is valid; 3000 is too late for event 1.
        let presses = [550.0, 800.0, 3000.0, 3700.0];
        let responses = score_responses(&events, &presses, window);

        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0].reaction_time_ms, Some(300.0));
        assert!(!responses[1].responded);
        assert_eq!(responses[1].reaction_time_ms, None);
        assert_eq!(responses[2].response_timestamp_ms, Some(3700.0));
    }
}
