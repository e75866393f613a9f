//! Simulation Parameters
//!
//! Horizon, discretisation and noise settings for one run.
//! Defaults reproduce a unit-time standard Brownian motion over 1000 steps.

use serde::{Deserialize, Serialize};

use crate::domain::SimulationError;

/// Run configuration for the controlled process
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParams {
    /// Number of steps N (length of every output sequence)
    pub steps: usize,
    /// Total horizon time T
    pub horizon: f64,
    /// Volatility sigma
    pub volatility: f64,
    /// Drift mu
    pub drift: f64,
    /// Seed for the increment generator
    pub seed: u64,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            steps: 1000,
            horizon: 1.0,
            volatility: 1.0,
            drift: 0.0,
            seed: 42,
        }
    }
}

impl SimulationParams {
    /// Step size dt = T / N
    pub fn step_size(&self) -> f64 {
        self.horizon / self.steps as f64
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_horizon(mut self, horizon: f64) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_volatility(mut self, volatility: f64) -> Self {
        self.volatility = volatility;
        self
    }

    pub fn with_drift(mut self, drift: f64) -> Self {
        self.drift = drift;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.steps == 0 {
            return Err(SimulationError::configuration("steps must be > 0"));
        }
        if !self.horizon.is_finite() || self.horizon <= 0.0 {
            return Err(SimulationError::configuration(format!(
                "horizon must be finite and > 0, got {}",
                self.horizon
            )));
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(SimulationError::configuration(format!(
                "volatility must be finite and >= 0, got {}",
                self.volatility
            )));
        }
        if !self.drift.is_finite() {
            return Err(SimulationError::configuration(format!(
                "drift must be finite, got {}",
                self.drift
            )));
        }
        Ok(())
    }
}
