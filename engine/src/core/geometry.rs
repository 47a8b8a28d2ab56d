//! Normalized coordinate helpers shared by the 1D and 2D tasks.

use std::ops::{Add, Mul, Sub};

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_angle(radians: f64) -> Self {
        Self {
            x: radians.cos(),
            y: radians.sin(),
        }
    }

    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Vec2) -> f64 {
        (self - other).length()
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Add for Vec2 {
    type Output = Vec2;

    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;

    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vec2 {
    type Output = Vec2;

    fn mul(self, rhs: f64) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// Closed interval a generator must stay inside.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    /// The normalized `[-1, 1]` range every task uses by default.
    pub const UNIT: Bounds = Bounds { min: -1.0, max: 1.0 };

    pub fn new(min: f64, max: f64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Like [`Bounds::new`], but rejects non-finite limits.
    pub fn try_new(min: f64, max: f64) -> Result<Self, ConfigError> {
        if !(min.is_finite() && max.is_finite()) {
            return Err(ConfigError::invalid(
                "bounds",
                format!("limits must be finite, got [{min}, {max}]"),
            ));
        }
        Ok(Self::new(min, max))
    }

    pub fn midpoint(&self) -> f64 {
        (self.min + self.max) * 0.5
    }

    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Never panics, even for hand-built reversed limits.
    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Deserialize)]
struct RawBounds {
    min: f64,
    max: f64,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = ConfigError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Self::try_new(raw.min, raw.max)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::UNIT
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds2D {
    pub x: Bounds,
    pub y: Bounds,
}

impl Bounds2D {
    pub const UNIT: Bounds2D = Bounds2D {
        x: Bounds::UNIT,
        y: Bounds::UNIT,
    };

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x.midpoint(), self.y.midpoint())
    }

    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(self.x.clamp(point.x), self.y.clamp(point.y))
    }

    pub fn contains(&self, point: Vec2) -> bool {
        self.x.contains(point.x) && self.y.contains(point.y)
    }
}
