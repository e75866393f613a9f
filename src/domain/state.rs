//! Process State and Cost Ledger
//!
//! Per-step records produced in lockstep by the simulator.

use serde::{Deserialize, Serialize};

/// Impulse applied on a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Adjustment {
    /// Process stayed inside the band
    #[default]
    None,
    /// Upper barrier hit, process reset down to the upper target
    Down,
    /// Lower barrier hit, process reset up to the lower target
    Up,
}

impl Adjustment {
    pub fn is_jump(&self) -> bool {
        !matches!(self, Adjustment::None)
    }
}

/// Controlled value at a step index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProcessState {
    pub step_index: usize,
    pub controlled_value: f64,
}

impl ProcessState {
    /// Explicit seed for step 0
    pub fn initial() -> Self {
        Self {
            step_index: 0,
            controlled_value: 0.0,
        }
    }
}

/// Running adjustment and holding cost totals
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CostLedger {
    pub cumulative_adjustment_cost: f64,
    pub cumulative_holding_cost: f64,
}

impl CostLedger {
    pub fn new(cumulative_adjustment_cost: f64, cumulative_holding_cost: f64) -> Self {
        Self {
            cumulative_adjustment_cost,
            cumulative_holding_cost,
        }
    }

    pub fn total(&self) -> f64 {
        self.cumulative_adjustment_cost + self.cumulative_holding_cost
    }
}

/// Output of one simulator step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub state: ProcessState,
    pub ledger: CostLedger,
    pub adjustment: Adjustment,
}

impl StepRecord {
    /// Record for step 0: value, adjustment and holding cost all zero
    pub fn initial() -> Self {
        Self {
            state: ProcessState::initial(),
            ledger: CostLedger::default(),
            adjustment: Adjustment::None,
        }
    }

    pub fn value(&self) -> f64 {
        self.state.controlled_value
    }

    pub fn adjustment_cost(&self) -> f64 {
        self.ledger.cumulative_adjustment_cost
    }

    pub fn holding_cost(&self) -> f64 {
        self.ledger.cumulative_holding_cost
    }
}
