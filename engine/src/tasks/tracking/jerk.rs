//! Piecewise-constant target acceleration reached through bounded jerk.

use rand::Rng;

use crate::core::geometry::Bounds;
use crate::core::random::signed_unit;

const RESTITUTION: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PiecewiseJerk {
    bounds: Bounds,
    switch_interval: f64,
    max_jerk: f64,
    max_accel: f64,
    x: f64,
    velocity: f64,
    accel: f64,
    target_accel: f64,
    since_switch: f64,
}

impl PiecewiseJerk {
    pub fn new<R: Rng + ?Sized>(bounds: Bounds, difficulty: f64, rng: &mut R) -> Self {
        let max_accel = 0.5 + 1.5 * difficulty;
        Self {
            bounds,
            switch_interval: 0.5 / (1.0 + difficulty),
            max_jerk: 2.0 + 4.0 * difficulty,
            max_accel,
            x: bounds.midpoint(),
            velocity: 0.0,
            accel: 0.0,
            target_accel: signed_unit(rng) * max_accel,
            since_switch: 0.0,
        }
    }

    pub fn step<R: Rng + ?Sized>(&self, dt: f64, rng: &mut R) -> (Self, f64) {
        let mut next = *self;

        next.since_switch += dt;
        if next.since_switch >= next.switch_interval {
            next.since_switch %= next.switch_interval;
            next.target_accel = signed_unit(rng) * next.max_accel;
        }

        let max_delta = next.max_jerk * dt;
        let delta = (next.target_accel - next.accel).clamp(-max_delta, max_delta);
        next.accel = (next.accel + delta).clamp(-next.max_accel, next.max_accel);

        next.velocity += next.accel * dt;
        next.x += next.velocity * dt;

        if next.x > next.bounds.max {
            next.x = next.bounds.max;
            next.velocity = -next.velocity.abs() * RESTITUTION;
        } else if next.x < next.bounds.min {
            next.x = next.bounds.min;
            next.velocity = next.velocity.abs() * RESTITUTION;
        }

        (next, next.x)
    }

    pub fn position(&self) -> f64 {
        self.x
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn acceleration(&self) -> f64 {
        self.accel
    }

    pub fn switch_interval(&self) -> f64 {
        self.switch_interval
    }
}
