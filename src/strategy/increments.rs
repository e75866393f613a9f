//! Gaussian Increment Generator
//!
//! Euler-Maruyama increments of a drifted Brownian motion:
//!
//! ```text
//! dW = sigma * sqrt(dt) * Z + mu * dt,   Z ~ N(0, 1)
//! ```
//!
//! Each generator owns a seeded `StdRng`, so two generators built from the
//! same seed produce the same sequence and runs never share randomness.

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use statrs::distribution::Normal;

use crate::domain::SimulationError;
use crate::ports::IncrementSource;

/// Seeded source of scaled Gaussian increments
#[derive(Debug, Clone)]
pub struct GaussianIncrements {
    rng: StdRng,
    standard_normal: Normal,
    seed: u64,
    draws: usize,
}

impl GaussianIncrements {
    pub fn new(seed: u64) -> Result<Self, SimulationError> {
        let standard_normal = Normal::new(0.0, 1.0).map_err(|e| {
            SimulationError::configuration(format!("standard normal unavailable: {}", e))
        })?;

        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            standard_normal,
            seed,
            draws: 0,
        })
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of increments drawn so far
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl IncrementSource for GaussianIncrements {
    fn next_increment(
        &mut self,
        step_size: f64,
        volatility: f64,
        drift: f64,
    ) -> Result<f64, SimulationError> {
        let z = self.standard_normal.sample(&mut self.rng);
        self.draws += 1;

        let increment = volatility * step_size.sqrt() * z + drift * step_size;
        if !increment.is_finite() {
            return Err(SimulationError::numeric(
                self.draws,
                format!(
                    "non-finite increment {} (dt={}, sigma={}, mu={})",
                    increment, step_size, volatility, drift
                ),
            ));
        }
        Ok(increment)
    }
}
