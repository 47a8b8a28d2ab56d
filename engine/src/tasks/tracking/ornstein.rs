//! Mean-reverting Ornstein–Uhlenbeck drift.

use rand::Rng;

use crate::core::geometry::Bounds;
use crate::core::random::signed_unit;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrnsteinUhlenbeck {
    bounds: Bounds,
    /// Reversion rate θ.
    theta: f64,
    /// Noise scale σ.
    sigma: f64,
    mean: f64,
    x: f64,
}

impl OrnsteinUhlenbeck {
    pub fn new(bounds: Bounds, difficulty: f64) -> Self {
        let mean = bounds.midpoint();
        Self {
            bounds,
            theta: 0.5 + 1.5 * difficulty,
            sigma: 0.3 + 0.7 * difficulty,
            mean,
            x: mean,
        }
    }

    /// `x += θ(μ − x)·dt + σ·√dt·U(−1, 1)`, hard-clamped to bounds.
    pub fn step<R: Rng + ?Sized>(&self, dt: f64, rng: &mut R) -> (Self, f64) {
        let drift = self.theta * (self.mean - self.x) * dt;
        let shock = self.sigma * dt.sqrt() * signed_unit(rng);
        let x = self.bounds.clamp(self.x + drift + shock);
        (Self { x, ..*self }, x)
    }

    pub fn position(&self) -> f64 {
        self.x
    }

    pub fn theta(&self) -> f64 {
        self.theta
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::seeded;

    #[test]
    fn parameters_scale_with_difficulty() {
        let easy = OrnsteinUhlenbeck::new(Bounds::UNIT, 0.0);
        let hard = OrnsteinUhlenbeck::new(Bounds::UNIT, 1.0);
        assert_eq!(easy.theta(), 0.5);
        assert_eq!(hard.theta(), 2.0);
        assert_eq!(easy.sigma(), 0.3);
        assert_eq!(hard.sigma(), 1.0);
    }

    #[test]
    fn starts_at_midpoint_and_stays_bounded() {
        let bounds = Bounds::new(0.0, 0.2);
        let mut process = OrnsteinUhlenbeck::new(bounds, 1.0);
        assert!((process.position() - 0.1).abs() < 1e-12);

        let mut rng = seeded(11);
        for _ in 0..5_000 {
            let (next, x) = process.step(0.5, &mut rng);
            assert!(bounds.contains(x));
            process = next;
        }
    }
}
