//! Randomness helpers. Every generator and sequencer receives its own RNG;
//! nothing in the engine reaches for a global source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Deterministic RNG for a given seed.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Derive an independent child RNG so parallel trials never share state.
pub fn fork<R: Rng + ?Sized>(rng: &mut R) -> StdRng {
    StdRng::seed_from_u64(rng.gen())
}

/// Uniform draw in `[-1, 1)`.
#[inline]
pub fn signed_unit<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(-1.0..1.0)
}

/// Uniform draw in `[lo, hi)`; returns `lo` for an empty range.
#[inline]
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, lo: f64, hi: f64) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Uniform angle in `[0, 2π)`.
#[inline]
pub fn angle<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..std::f64::consts::TAU)
}
