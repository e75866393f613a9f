//! Strategy Layer - Banded impulse control of a Brownian motion
//!
//! - `GaussianIncrements`: seeded Euler-Maruyama increments (sigma, mu, dt)
//! - `Simulator`: the controlled process step function and cost bookkeeping
//! - `SimulationPath`: aligned value / adjustment cost / holding cost sequences
//! - `SimulationParams`: horizon N, T and noise settings

pub mod increments;
pub mod params;
pub mod path;
pub mod simulator;

pub use increments::GaussianIncrements;
pub use params::SimulationParams;
pub use path::{time_grid, PathSummary, SimulationPath};
pub use simulator::{ControlledPath, Simulator};
