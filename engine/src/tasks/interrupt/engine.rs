//! Interrupt schedule and per-interrupt response classification.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::random::uniform;
use crate::tasks::events::StimulusEvent;

/// No interrupt appears within this long of the end of the trial.
pub const TAIL_GUARD_MS: f64 = 2000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Circle,
    Square,
    Triangle,
    Star,
}

impl Shape {
    pub const ALL: [Shape; 4] = [Shape::Circle, Shape::Square, Shape::Triangle, Shape::Star];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Red,
    Green,
    Blue,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Red, Color::Green, Color::Blue, Color::Yellow];

    /// The only correct key for an interrupt of this colour. Shape is a
    /// distractor.
    pub fn response_key(self) -> ResponseKey {
        match self {
            Color::Red => ResponseKey::R,
            Color::Green => ResponseKey::G,
            Color::Blue => ResponseKey::B,
            Color::Yellow => ResponseKey::Y,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseKey {
    R,
    G,
    B,
    Y,
}

impl ResponseKey {
    pub const ALL: [ResponseKey; 4] = [ResponseKey::R, ResponseKey::G, ResponseKey::B, ResponseKey::Y];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterruptStimulus {
    pub shape: Shape,
    pub color: Color,
}

/// Every interrupt demands a response, so `is_target` is always set.
pub type InterruptEvent = StimulusEvent<InterruptStimulus>;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InterruptTaskConfig {
    pub difficulty: f64,
}

impl InterruptTaskConfig {
    pub fn new(difficulty: f64) -> Self {
        Self { difficulty }
    }

    /// `1 - difficulty`, clamped. Gaps and windows scale with this.
    fn ease(&self) -> f64 {
        if self.difficulty.is_nan() {
            1.0
        } else {
            1.0 - self.difficulty.clamp(0.0, 1.0)
        }
    }

    /// Range the gap to the next interrupt is drawn from.
    pub fn gap_range_ms(&self) -> (f64, f64) {
        let ease = self.ease();
        (2000.0 + 3000.0 * ease, 3000.0 + 4000.0 * ease)
    }

    pub fn response_window_ms(&self) -> f64 {
        800.0 + 700.0 * self.ease()
    }
}

/// Build the interrupt schedule for a trial of `total_duration_ms`.
pub fn generate<R: Rng + ?Sized>(
    config: &InterruptTaskConfig,
    total_duration_ms: f64,
    rng: &mut R,
) -> Vec<InterruptEvent> {
    if !total_duration_ms.is_finite() {
        return Vec::new();
    }
    let last_allowed = total_duration_ms - TAIL_GUARD_MS;
    let (gap_lo, gap_hi) = config.gap_range_ms();
    let mut events = Vec::new();
    let mut t = uniform(rng, 5000.0, 8000.0);

    while t <= last_allowed {
        let stimulus = InterruptStimulus {
            shape: Shape::ALL[rng.gen_range(0..Shape::ALL.len())],
            color: Color::ALL[rng.gen_range(0..Color::ALL.len())],
        };
        events.push(StimulusEvent::new(t, stimulus, true));
        t += uniform(rng, gap_lo, gap_hi);
    }

    debug!(
        events = events.len(),
        total_duration_ms,
        window_ms = config.response_window_ms(),
        "interrupt schedule generated"
    );
    events
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct KeyPress {
    pub timestamp_ms: f64,
    pub key: ResponseKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterruptOutcome {
    Correct,
    Incorrect,
    Missed,
}

/// Classified reaction to one interrupt. A missed interrupt carries neither
/// key nor reaction time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterruptResponse {
    pub appeared_at_ms: f64,
    pub stimulus: InterruptStimulus,
    pub key: Option<ResponseKey>,
    pub reaction_time_ms: Option<f64>,
    pub outcome: InterruptOutcome,
}

impl InterruptResponse {
    pub fn responded(&self) -> bool {
        self.outcome != InterruptOutcome::Missed
    }
}

/// Classify the press attributed to `event`. A press before the interrupt or
/// after the response window counts as no press at all.
pub fn classify(event: &InterruptEvent, press: Option<KeyPress>, window_ms: f64) -> InterruptResponse {
    let in_time = press.filter(|p| {
        let latency = p.timestamp_ms - event.timestamp_ms;
        latency >= 0.0 && latency <= window_ms
    });

    match in_time {
        Some(press) => InterruptResponse {
            appeared_at_ms: event.timestamp_ms,
            stimulus: event.kind,
            key: Some(press.key),
            reaction_time_ms: Some(press.timestamp_ms - event.timestamp_ms),
            outcome: if press.key == event.kind.color.response_key() {
                InterruptOutcome::Correct
            } else {
                InterruptOutcome::Incorrect
            },
        },
        None => InterruptResponse {
            appeared_at_ms: event.timestamp_ms,
            stimulus: event.kind,
            key: None,
            reaction_time_ms: None,
            outcome: InterruptOutcome::Missed,
        },
    }
}

/// One classified response per interrupt. Each interrupt takes the first
/// in-window press between its appearance and the next interrupt.
pub fn score_presses(events: &[InterruptEvent], presses: &[KeyPress], window_ms: f64) -> Vec<InterruptResponse> {
    let mut presses: Vec<KeyPress> = presses
        .iter()
        .copied()
        .filter(|p| p.timestamp_ms.is_finite())
        .collect();
    presses.sort_by(|a, b| a.timestamp_ms.total_cmp(&b.timestamp_ms));

    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let span_end = events
                .get(i + 1)
                .map(|next| next.timestamp_ms)
                .unwrap_or(f64::INFINITY);
            let press = presses.iter().copied().find(|p| {
                p.timestamp_ms >= event.timestamp_ms
                    && p.timestamp_ms < span_end
                    && p.timestamp_ms - event.timestamp_ms <= window_ms
            });
            classify(event, press, window_ms)
        })
        .collect()
}
