//! Target generators for the tracking tasks.
//!
//! Each algorithm is an immutable state value with a pure transition
//! `step(dt, rng) -> (next_state, position)`. [`Generator1D`] and
//! [`Generator2D`] bundle that state with its configuration and an owned RNG
//! so a driving loop can simply call `update(dt)` once per frame.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::geometry::{Bounds, Bounds2D, Vec2};

use super::curvilinear::Curvilinear;
use super::jerk::PiecewiseJerk;
use super::momentum::MomentumWalk;
use super::ornstein::OrnsteinUhlenbeck;
use super::sines::SineMixture;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind1D {
    OrnsteinUhlenbeck,
    SumOfSines,
    PiecewiseJerk,
}

impl GeneratorKind1D {
    pub const ALL: [GeneratorKind1D; 3] = [
        GeneratorKind1D::OrnsteinUhlenbeck,
        GeneratorKind1D::SumOfSines,
        GeneratorKind1D::PiecewiseJerk,
    ];

    /// Uniform pick, used when a trial does not pin its algorithm.
    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeneratorKind2D {
    MomentumWalk,
    Curvilinear,
}

impl GeneratorKind2D {
    pub const ALL: [GeneratorKind2D; 2] = [GeneratorKind2D::MomentumWalk, GeneratorKind2D::Curvilinear];

    pub fn choose<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Plain configuration record handed to a generator at creation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig<K, B> {
    pub kind: K,
    pub bounds: B,
    /// Clamped into `[0, 1]` on use.
    pub difficulty: f64,
}

pub type GeneratorConfig1D = GeneratorConfig<GeneratorKind1D, Bounds>;
pub type GeneratorConfig2D = GeneratorConfig<GeneratorKind2D, Bounds2D>;

impl<K, B> GeneratorConfig<K, B> {
    pub fn new(kind: K, bounds: B, difficulty: f64) -> Self {
        Self {
            kind,
            bounds,
            difficulty,
        }
    }

    pub fn clamped_difficulty(&self) -> f64 {
        if self.difficulty.is_nan() {
            0.0
        } else {
            self.difficulty.clamp(0.0, 1.0)
        }
    }
}

impl GeneratorConfig1D {
    /// Unit bounds with a randomly chosen algorithm.
    pub fn random<R: Rng + ?Sized>(difficulty: f64, rng: &mut R) -> Self {
        Self::new(GeneratorKind1D::choose(rng), Bounds::UNIT, difficulty)
    }
}

impl GeneratorConfig2D {
    pub fn random<R: Rng + ?Sized>(difficulty: f64, rng: &mut R) -> Self {
        Self::new(GeneratorKind2D::choose(rng), Bounds2D::UNIT, difficulty)
    }
}

/// State of any 1D algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Process1D {
    OrnsteinUhlenbeck(OrnsteinUhlenbeck),
    SumOfSines(SineMixture),
    PiecewiseJerk(PiecewiseJerk),
}

impl Process1D {
    pub fn init<R: Rng + ?Sized>(config: &GeneratorConfig1D, rng: &mut R) -> Self {
        let d = config.clamped_difficulty();
        match config.kind {
            GeneratorKind1D::OrnsteinUhlenbeck => {
                Process1D::OrnsteinUhlenbeck(OrnsteinUhlenbeck::new(config.bounds, d))
            }
            GeneratorKind1D::SumOfSines => {
                Process1D::SumOfSines(SineMixture::new(config.bounds, d, rng))
            }
            GeneratorKind1D::PiecewiseJerk => {
                Process1D::PiecewiseJerk(PiecewiseJerk::new(config.bounds, d, rng))
            }
        }
    }

    pub fn step<R: Rng + ?Sized>(&self, dt: f64, rng: &mut R) -> (Self, f64) {
        match self {
            Process1D::OrnsteinUhlenbeck(p) => {
                let (next, x) = p.step(dt, rng);
                (Process1D::OrnsteinUhlenbeck(next), x)
            }
            Process1D::SumOfSines(p) => {
                let (next, x) = p.step(dt);
                (Process1D::SumOfSines(next), x)
            }
            Process1D::PiecewiseJerk(p) => {
                let (next, x) = p.step(dt, rng);
                (Process1D::PiecewiseJerk(next), x)
            }
        }
    }

    pub fn position(&self) -> f64 {
        match self {
            Process1D::OrnsteinUhlenbeck(p) => p.position(),
            Process1D::SumOfSines(p) => p.position(),
            Process1D::PiecewiseJerk(p) => p.position(),
        }
    }
}

/// State of any 2D algorithm.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Process2D {
    MomentumWalk(MomentumWalk),
    Curvilinear(Curvilinear),
}

impl Process2D {
    pub fn init<R: Rng + ?Sized>(config: &GeneratorConfig2D, rng: &mut R) -> Self {
        let d = config.clamped_difficulty();
        match config.kind {
            GeneratorKind2D::MomentumWalk => Process2D::MomentumWalk(MomentumWalk::new(config.bounds, d)),
            GeneratorKind2D::Curvilinear => {
                Process2D::Curvilinear(Curvilinear::new(config.bounds, d, rng))
            }
        }
    }

    pub fn step<R: Rng + ?Sized>(&self, dt: f64, rng: &mut R) -> (Self, Vec2) {
        match self {
            Process2D::MomentumWalk(p) => {
                let (next, pos) = p.step(dt, rng);
                (Process2D::MomentumWalk(next), pos)
            }
            Process2D::Curvilinear(p) => {
                let (next, pos) = p.step(dt, rng);
                (Process2D::Curvilinear(next), pos)
            }
        }
    }

    pub fn position(&self) -> Vec2 {
        match self {
            Process2D::MomentumWalk(p) => p.position(),
            Process2D::Curvilinear(p) => p.position(),
        }
    }
}

/// A 1D target generator owning its state and its random source.
#[derive(Debug, Clone)]
pub struct Generator1D<R> {
    config: GeneratorConfig1D,
    state: Process1D,
    rng: R,
}

impl<R: Rng> Generator1D<R> {
    pub fn create(config: GeneratorConfig1D, mut rng: R) -> Self {
        let state = Process1D::init(&config, &mut rng);
        debug!(kind = ?config.kind, difficulty = config.clamped_difficulty(), "1d generator created");
        Self { config, state, rng }
    }

    /// Advance by `dt_seconds` and return the new position. Non-positive or
    /// non-finite steps leave the state untouched.
    pub fn update(&mut self, dt_seconds: f64) -> f64 {
        if !(dt_seconds > 0.0 && dt_seconds.is_finite()) {
            return self.position();
        }
        let (next, x) = self.state.step(dt_seconds, &mut self.rng);
        debug_assert!(
            self.config.bounds.contains(x),
            "generator left its bounds: {x}"
        );
        self.state = next;
        x
    }

    /// Restart from the initial configuration, redrawing any random phases.
    pub fn reset(&mut self) {
        self.state = Process1D::init(&self.config, &mut self.rng);
    }

    pub fn position(&self) -> f64 {
        self.state.position()
    }

    pub fn config(&self) -> &GeneratorConfig1D {
        &self.config
    }

    pub fn state(&self) -> &Process1D {
        &self.state
    }
}

/// A 2D target generator owning its state and its random source.
#[derive(Debug, Clone)]
pub struct Generator2D<R> {
    config: GeneratorConfig2D,
    state: Process2D,
    rng: R,
}

impl<R: Rng> Generator2D<R> {
    pub fn create(config: GeneratorConfig2D, mut rng: R) -> Self {
        let state = Process2D::init(&config, &mut rng);
        debug!(kind = ?config.kind, difficulty = config.clamped_difficulty(), "2d generator created");
        Self { config, state, rng }
    }

    pub fn update(&mut self, dt_seconds: f64) -> Vec2 {
        if !(dt_seconds > 0.0 && dt_seconds.is_finite()) {
            return self.position();
        }
        let (next, pos) = self.state.step(dt_seconds, &mut self.rng);
        debug_assert!(
            self.config.bounds.contains(pos),
            "generator left its bounds: {pos:?}"
        );
        self.state = next;
        pos
    }

    pub fn reset(&mut self) {
        self.state = Process2D::init(&self.config, &mut self.rng);
    }

    pub fn position(&self) -> Vec2 {
        self.state.position()
    }

    pub fn config(&self) -> &GeneratorConfig2D {
        &self.config
    }

    pub fn state(&self) -> &Process2D {
        &self.state
    }
}
