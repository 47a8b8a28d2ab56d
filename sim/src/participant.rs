//! A synthetic participant: a lagging, noisy tracker with probabilistic key
//! presses. Everything it does is drawn from its own seeded RNG.

use anyhow::ensure;
use engine::core::random::{signed_unit, uniform};
use engine::core::Vec2;
use engine::tasks::auditory::{ResponseWindow, ToneEvent};
use engine::tasks::interrupt::{InterruptEvent, KeyPress, ResponseKey};
use engine::tasks::spatial::RotationItem;
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParticipantConfig {
    /// Time constant of the cursor's first-order lag, in seconds.
    pub lag_s: f64,
    /// Peak motor noise added to each input step.
    pub noise: f64,
    pub hit_probability: f64,
    pub false_alarm_probability: f64,
    pub rotation_accuracy: f64,
    /// Chance of answering an interrupt at all.
    pub interrupt_response_probability: f64,
    /// Chance that an answered interrupt gets the right key.
    pub key_accuracy: f64,
    pub reaction_time_ms: f64,
}

impl Default for ParticipantConfig {
    fn default() -> Self {
        Self {
            lag_s: 0.12,
            noise: 0.01,
            hit_probability: 0.85,
            false_alarm_probability: 0.1,
            rotation_accuracy: 0.8,
            interrupt_response_probability: 0.9,
            key_accuracy: 0.9,
            reaction_time_ms: 450.0,
        }
    }
}

impl ParticipantConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.lag_s >= 0.0 && self.lag_s.is_finite(), "participant.lag_s must be >= 0");
        ensure!(self.noise >= 0.0 && self.noise.is_finite(), "participant.noise must be >= 0");
        ensure!(
            self.reaction_time_ms > 0.0 && self.reaction_time_ms.is_finite(),
            "participant.reaction_time_ms must be positive"
        );
        for (name, p) in [
            ("hit_probability", self.hit_probability),
            ("false_alarm_probability", self.false_alarm_probability),
            ("rotation_accuracy", self.rotation_accuracy),
            ("interrupt_response_probability", self.interrupt_response_probability),
            ("key_accuracy", self.key_accuracy),
        ] {
            ensure!((0.0..=1.0).contains(&p), "participant.{name} must lie in [0, 1], got {p}");
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Participant {
    config: ParticipantConfig,
    rng: StdRng,
}

impl Participant {
    pub fn new(config: ParticipantConfig, rng: StdRng) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &ParticipantConfig {
        &self.config
    }

    /// Share of the remaining error closed in one frame. `load` is the number
    /// of tasks competing for attention; each extra task slows the response.
    fn pursuit_gain(&self, dt_s: f64, load: f64) -> f64 {
        let lag = self.config.lag_s * load.max(1.0);
        if lag <= 0.0 {
            1.0
        } else {
            dt_s / (lag + dt_s)
        }
    }

    /// Input step moving a 1D cursor towards `target`.
    pub fn follow_1d(&mut self, cursor: f64, target: f64, dt_s: f64, load: f64) -> f64 {
        let gain = self.pursuit_gain(dt_s, load);
        gain * (target - cursor) + self.config.noise * load.max(1.0) * signed_unit(&mut self.rng)
    }

    pub fn follow_2d(&mut self, cursor: Vec2, target: Vec2, dt_s: f64, load: f64) -> Vec2 {
        let gain = self.pursuit_gain(dt_s, load);
        let jitter = Vec2::new(signed_unit(&mut self.rng), signed_unit(&mut self.rng));
        (target - cursor) * gain + jitter * (self.config.noise * load.max(1.0))
    }

    fn reaction_time(&mut self, load: f64) -> f64 {
        let base = self.config.reaction_time_ms * (1.0 + 0.15 * (load.max(1.0) - 1.0));
        uniform(&mut self.rng, 0.7 * base, 1.3 * base)
    }

    /// Key press time for a tone, if the participant presses at all.
    pub fn react_to_tone(&mut self, event: &ToneEvent, window: ResponseWindow, load: f64) -> Option<f64> {
        let p = if event.is_target {
            self.config.hit_probability
        } else {
            self.config.false_alarm_probability
        };
        if !self.rng.gen_bool(p) {
            return None;
        }
        let rt = self.reaction_time(load).min(window.max_ms);
        Some(event.timestamp_ms + rt)
    }

    /// `(answered_same, reaction_time_ms)` for a rotation item. Larger
    /// rotations take longer.
    pub fn answer_rotation(&mut self, item: &RotationItem) -> (bool, f64) {
        let correct = self.rng.gen_bool(self.config.rotation_accuracy);
        let answered_same = if correct { !item.mirrored } else { item.mirrored };
        let rt = 2.0 * self.reaction_time(1.0) + 6.0 * item.angle_deg;
        (answered_same, rt)
    }

    pub fn react_to_interrupt(&mut self, event: &InterruptEvent, window_ms: f64) -> Option<KeyPress> {
        if !self.rng.gen_bool(self.config.interrupt_response_probability) {
            return None;
        }
        let right = event.kind.color.response_key();
        let key = if self.rng.gen_bool(self.config.key_accuracy) {
            right
        } else {
            let wrong: Vec<ResponseKey> = ResponseKey::ALL.into_iter().filter(|k| *k != right).collect();
            wrong[self.rng.gen_range(0..wrong.len())]
        };
        let rt = self.reaction_time(1.0).min(window_ms);
        Some(KeyPress {
            timestamp_ms: event.timestamp_ms + rt,
            key,
        })
    }
}
