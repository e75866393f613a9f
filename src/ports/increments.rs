//! Increment source port
//!
//! One scaled increment per simulator step. Implementations must be
//! reproducible from their seed and must not share state across runs.

use crate::domain::SimulationError;

#[cfg_attr(test, mockall::automock)]
pub trait IncrementSource {
    /// Draw the next increment, distributed as
    /// `volatility * N(0, sqrt(step_size)) + drift * step_size`.
    fn next_increment(
        &mut self,
        step_size: f64,
        volatility: f64,
        drift: f64,
    ) -> Result<f64, SimulationError>;
}

impl<S: IncrementSource + ?Sized> IncrementSource for &mut S {
    fn next_increment(
        &mut self,
        step_size: f64,
        volatility: f64,
        drift: f64,
    ) -> Result<f64, SimulationError> {
        (**self).next_increment(step_size, volatility, drift)
    }
}

impl<S: IncrementSource + ?Sized> IncrementSource for Box<S> {
    fn next_increment(
        &mut self,
        step_size: f64,
        volatility: f64,
        drift: f64,
    ) -> Result<f64, SimulationError> {
        (**self).next_increment(step_size, volatility, drift)
    }
}
