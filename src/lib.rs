//! band-control - Banded impulse control of a Brownian motion
//!
//! Simulates a (drifted) Wiener process that is reset to an inner target
//! whenever it reaches an outer barrier, and tracks the cumulative
//! adjustment and holding costs of the policy.
//!
//! # Modules
//!
//! - `domain`: Control policy, per-step state and cost ledger, errors
//! - `ports`: Trait abstractions (IncrementSource, FrameSink)
//! - `strategy`: Increment generator, simulator, path assembly
//! - `adapters`: Terminal renderer, summary output, CLI
//! - `config`: Configuration loading and validation
//! - `application`: Frame-clock animation player

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod strategy;

pub use domain::{
    Adjustment, AdjustmentCosts, ControlPolicy, CostLedger, HoldingCost, ProcessState,
    SimulationError, StepRecord, Thresholds,
};
pub use strategy::{GaussianIncrements, PathSummary, SimulationParams, SimulationPath, Simulator};
