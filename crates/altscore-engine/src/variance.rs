//! [`VarianceSource`] implementations.
//!
//! [`RngVariance`] draws uniformly from `[-bound, bound]`. Use
//! [`RngVariance::seeded`] for reproducible runs and
//! [`RngVariance::thread_local`] for independent draws per thread.
//! [`NoVariance`] and [`FixedVariance`] make the ensemble deterministic.

use altscore_core::traits::VarianceSource;
use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Always zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVariance;

impl VarianceSource for NoVariance {
    fn sample(&mut self, _bound: f64) -> f64 {
        0.0
    }
}

/// A constant perturbation, clamped into the requested bound.
#[derive(Debug, Clone, Copy)]
pub struct FixedVariance(pub f64);

impl VarianceSource for FixedVariance {
    fn sample(&mut self, bound: f64) -> f64 {
        self.0.clamp(-bound, bound)
    }
}

/// Uniform perturbation drawn from a [`rand::Rng`].
#[derive(Debug, Clone)]
pub struct RngVariance<R> {
    rng: R,
}

impl<R: Rng> RngVariance<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngVariance<StdRng> {
    /// Deterministic source: the same seed yields the same sequence.
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl RngVariance<ThreadRng> {
    /// Source backed by the calling thread's generator.
    pub fn thread_local() -> Self {
        Self::new(rand::thread_rng())
    }
}

impl<R: Rng> VarianceSource for RngVariance<R> {
    fn sample(&mut self, bound: f64) -> f64 {
        if bound > 0.0 {
            self.rng.gen_range(-bound..=bound)
        } else {
            0.0
        }
    }
}
