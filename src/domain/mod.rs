//! Domain Layer - Core types of the banded impulse control model
//!
//! Pure value types with no I/O:
//! - `policy`: Thresholds, adjustment costs and holding cost (ControlPolicy)
//! - `state`: Per-step process state and cost ledger
//! - `error`: Configuration and numeric failures

pub mod error;
pub mod policy;
pub mod state;

pub use error::SimulationError;
pub use policy::{AdjustmentCosts, ControlPolicy, HoldingCost, Thresholds};
pub use state::{Adjustment, CostLedger, ProcessState, StepRecord};
