//! Simulation Errors
//!
//! Both error kinds are fatal to the run in progress. A run either yields
//! full-length sequences or fails with one of these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// Invalid policy or run parameters. Raised before any step executes.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A non-finite increment, value or cost appeared at the given step.
    #[error("Numeric error at step {step}: {reason}")]
    Numeric { step: usize, reason: String },
}

impl SimulationError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        SimulationError::Configuration(msg.into())
    }

    pub fn numeric(step: usize, reason: impl Into<String>) -> Self {
        SimulationError::Numeric {
            step,
            reason: reason.into(),
        }
    }

    /// Returns true for errors raised at construction time
    pub fn is_configuration(&self) -> bool {
        matches!(self, SimulationError::Configuration(_))
    }
}
