//! Constant-speed 2D motion along curving paths.

use std::f64::consts::PI;

use rand::Rng;

use crate::core::geometry::{Bounds2D, Vec2};
use crate::core::random::{angle, signed_unit};

/// Angular velocity is multiplied by this on every wall hit.
const TURN_DAMPING: f64 = -0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curvilinear {
    bounds: Bounds2D,
    speed: f64,
    max_turn_rate: f64,
    switch_interval: f64,
    position: Vec2,
    heading: f64,
    turn_rate: f64,
    since_switch: f64,
}

impl Curvilinear {
    pub fn new<R: Rng + ?Sized>(bounds: Bounds2D, difficulty: f64, rng: &mut R) -> Self {
        let max_turn_rate = 1.0 + 2.0 * difficulty;
        Self {
            bounds,
            speed: 0.3 + 0.5 * difficulty,
            max_turn_rate,
            switch_interval: 0.5 / (1.0 + difficulty),
            position: bounds.center(),
            heading: angle(rng),
            turn_rate: signed_unit(rng) * max_turn_rate,
            since_switch: 0.0,
        }
    }

    pub fn step<R: Rng + ?Sized>(&self, dt: f64, rng: &mut R) -> (Self, Vec2) {
        let mut next = *self;

        next.since_switch += dt;
        if next.since_switch >= next.switch_interval {
            next.since_switch %= next.switch_interval;
            next.turn_rate = signed_unit(rng) * next.max_turn_rate;
        }

        next.heading += next.turn_rate * dt;
        let raw = next.position + Vec2::from_angle(next.heading) * (next.speed * dt);

        if !next.bounds.x.contains(raw.x) {
            // Mirror about the vertical wall: the x component of travel flips.
            next.heading = PI - next.heading;
            next.turn_rate *= TURN_DAMPING;
        }
        if !next.bounds.y.contains(raw.y) {
            next.heading = -next.heading;
            next.turn_rate *= TURN_DAMPING;
        }
        next.heading = next.heading.rem_euclid(std::f64::consts::TAU);
        next.position = next.bounds.clamp(raw);

        (next, next.position)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn heading(&self) -> f64 {
        self.heading
    }

    pub fn turn_rate(&self) -> f64 {
        self.turn_rate
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::random::seeded;

    #[test]
    fn moves_at_constant_speed_away_from_walls() {
        let mut rng = seeded(4);
        let path = Curvilinear::new(Bounds2D::UNIT, 0.5, &mut rng);
        let (next, pos) = path.step(0.01, &mut rng);
        let travelled = pos.distance(path.position());
        assert!((travelled - next.speed() * 0.01).abs() < 1e-12);
    }

    #[test]
    fn turn_rate_stays_within_limit_and_damps_on_walls() {
        let mut rng = seeded(12);
        let mut path = Curvilinear::new(Bounds2D::UNIT, 1.0, &mut rng);
        for _ in 0..20_000 {
            let (next, pos) = path.step(0.05, &mut rng);
            assert!(next.turn_rate().abs() <= 3.0 + 1e-12);
            assert!(Bounds2D::UNIT.contains(pos));
            path = next;
        }
    }
}
