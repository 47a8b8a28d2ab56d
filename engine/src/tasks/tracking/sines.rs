//! Sum of three incommensurate sinusoids.

use std::f64::consts::TAU;

use rand::Rng;

use crate::core::geometry::Bounds;
use crate::core::random::angle;

/// Frequency multipliers relative to the base frequency.
const RATIOS: [f64; 3] = [1.0, 1.618, 0.5];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineMixture {
    bounds: Bounds,
    base_hz: f64,
    amplitude: f64,
    phases: [f64; 3],
    /// Seconds since construction or reset.
    t: f64,
}

impl SineMixture {
    pub fn new<R: Rng + ?Sized>(bounds: Bounds, difficulty: f64, rng: &mut R) -> Self {
        Self {
            bounds,
            base_hz: 0.3 + 0.7 * difficulty,
            amplitude: 0.4 * bounds.range(),
            phases: [angle(rng), angle(rng), angle(rng)],
            t: 0.0,
        }
    }

    /// Advances time only; the mixture has no stochastic step.
    pub fn step(&self, dt: f64) -> (Self, f64) {
        let next = Self {
            t: self.t + dt,
            ..*self
        };
        (next, next.position())
    }

    /// Recomputed from the stored phases and time, never advances state.
    pub fn position(&self) -> f64 {
        let mut weighted = 0.0;
        let mut weight_sum = 0.0;
        for (i, (ratio, phase)) in RATIOS.iter().zip(self.phases.iter()).enumerate() {
            let weight = 1.0 / (i as f64 + 1.0);
            weighted += weight * (TAU * self.base_hz * ratio * self.t + phase).sin();
            weight_sum += weight;
        }
        self.bounds
            .clamp(self.bounds.midpoint() + self.amplitude * weighted / weight_sum)
    }

    pub fn frequencies(&self) -> [f64; 3] {
        RATIOS.map(|ratio| self.base_hz * ratio)
    }

    pub fn phases(&self) -> [f64; 3] {
        self.phases
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::seeded;

    #[test]
    fn frequencies_follow_golden_ratio_layout() {
        let mut rng = seeded(3);
        let mix = SineMixture::new(Bounds::UNIT, 1.0, &mut rng);
        let [f0, f1, f2] = mix.frequencies();
        assert!((f0 - 1.0).abs() < 1e-12);
        assert!((f1 - 1.618).abs() < 1e-12);
        assert!((f2 - 0.5).abs() < 1e-12);
    }

    #[test]
    fn position_is_read_only() {
        let mut rng = seeded(3);
        let (mix, _) = SineMixture::new(Bounds::UNIT, 0.5, &mut rng).step(1.25);
        let a = mix.position();
        let b = mix.position();
        assert_eq!(a, b);
        assert_eq!(mix.step(0.0).1, a);
    }

    #[test]
    fn amplitude_keeps_inside_forty_percent_band() {
        let mut rng = seeded(9);
        let mut mix = SineMixture::new(Bounds::UNIT, 1.0, &mut rng);
        for _ in 0..10_000 {
            let (next, x) = mix.step(0.016);
            assert!(x.abs() <= 0.8 + 1e-12);
            mix = next;
        }
    }
}
