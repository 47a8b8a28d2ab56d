//! 2D random walk with momentum, damping and a speed cap.

use rand::Rng;

use crate::core::geometry::{Bounds, Bounds2D, Vec2};
use crate::core::random::{angle, uniform};

const DAMPING: f64 = 0.95;
const RESTITUTION: f64 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MomentumWalk {
    bounds: Bounds2D,
    max_accel: f64,
    max_speed: f64,
    position: Vec2,
    velocity: Vec2,
}

impl MomentumWalk {
    pub fn new(bounds: Bounds2D, difficulty: f64) -> Self {
        Self {
            bounds,
            max_accel: 0.5 + 1.5 * difficulty,
            max_speed: 0.3 + 0.7 * difficulty,
            position: bounds.center(),
            velocity: Vec2::ZERO,
        }
    }

    pub fn step<R: Rng + ?Sized>(&self, dt: f64, rng: &mut R) -> (Self, Vec2) {
        let accel = Vec2::from_angle(angle(rng)) * uniform(rng, 0.0, self.max_accel);

        let mut velocity = (self.velocity + accel * dt) * DAMPING;
        let speed = velocity.length();
        if speed > self.max_speed {
            velocity = velocity * (self.max_speed / speed);
        }

        let raw = self.position + velocity * dt;
        let (x, vx) = bounce(self.bounds.x, raw.x, velocity.x);
        let (y, vy) = bounce(self.bounds.y, raw.y, velocity.y);

        let next = Self {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
            ..*self
        };
        (next, next.position)
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn max_speed(&self) -> f64 {
        self.max_speed
    }
}

fn bounce(bounds: Bounds, position: f64, velocity: f64) -> (f64, f64) {
    if position > bounds.max {
        (bounds.max, -velocity.abs() * RESTITUTION)
    } else if position < bounds.min {
        (bounds.min, velocity.abs() * RESTITUTION)
    } else {
        (position, velocity)
    }
}
