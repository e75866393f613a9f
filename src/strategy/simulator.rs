//! Controlled Process Simulator
//!
//! Applies a banded impulse control policy to a discretised Brownian motion:
//!
//! ```text
//! v'  = v_{i-1} + dW
//! v_i = U        if v' >= u   (A_i = A_{i-1} + L + (u - U) * l)
//!     = D        if v' <= d   (A_i = A_{i-1} + K + (u - U) * k)
//!     = v'       otherwise    (A_i = A_{i-1})
//! H_i = H_{i-1} + h(v_i)
//! ```
//!
//! The upper barrier is checked before the lower one and at most one
//! adjustment happens per step. Index 0 is seeded with `(0, 0, 0)`; every
//! later index consumes exactly one increment.

use tracing::{debug, info};

use crate::domain::{ControlPolicy, CostLedger, ProcessState, SimulationError, StepRecord};
use crate::ports::IncrementSource;

use super::increments::GaussianIncrements;
use super::params::SimulationParams;
use super::path::SimulationPath;

/// Runs a control policy over a fixed horizon
#[derive(Debug, Clone)]
pub struct Simulator {
    policy: ControlPolicy,
    params: SimulationParams,
}

impl Simulator {
    /// Create a simulator, rejecting invalid run parameters up front
    pub fn new(policy: ControlPolicy, params: SimulationParams) -> Result<Self, SimulationError> {
        params.validate()?;
        Ok(Self { policy, params })
    }

    pub fn policy(&self) -> &ControlPolicy {
        &self.policy
    }

    pub fn params(&self) -> &SimulationParams {
        &self.params
    }

    /// Advance one step from `previous` using `increment`
    pub fn step(
        policy: &ControlPolicy,
        previous: &StepRecord,
        increment: f64,
    ) -> Result<StepRecord, SimulationError> {
        let index = previous.state.step_index + 1;

        if !increment.is_finite() {
            return Err(SimulationError::numeric(
                index,
                format!("increment is {}", increment),
            ));
        }

        let tentative = previous.value() + increment;
        if !tentative.is_finite() {
            return Err(SimulationError::numeric(
                index,
                format!("tentative value is {}", tentative),
            ));
        }

        let adjustment = policy.classify(tentative);
        let value = policy.reset_level(adjustment).unwrap_or(tentative);
        let adjustment_cost = previous.adjustment_cost() + policy.adjustment_cost(adjustment);

        let holding = policy.holding_cost().evaluate(value);
        if !holding.is_finite() || holding < 0.0 {
            return Err(SimulationError::numeric(
                index,
                format!("holding cost h({}) = {} is not a finite non-negative number", value, holding),
            ));
        }
        let holding_cost = previous.holding_cost() + holding;

        if !adjustment_cost.is_finite() || !holding_cost.is_finite() {
            return Err(SimulationError::numeric(index, "cost ledger overflowed"));
        }

        if adjustment.is_jump() {
            debug!(
                step = index,
                tentative,
                reset_to = value,
                ?adjustment,
                adjustment_cost,
                "Barrier hit"
            );
        }

        Ok(StepRecord {
            state: ProcessState {
                step_index: index,
                controlled_value: value,
            },
            ledger: CostLedger::new(adjustment_cost, holding_cost),
            adjustment,
        })
    }

    /// Pull-based iterator over the run, one record per index
    pub fn steps<S: IncrementSource>(&self, source: S) -> ControlledPath<'_, S> {
        ControlledPath {
            simulator: self,
            source,
            previous: None,
            failed: false,
        }
    }

    /// Run the full horizon with a generator seeded from the run parameters
    pub fn run(&self) -> Result<SimulationPath, SimulationError> {
        let source = GaussianIncrements::new(self.params.seed)?;
        self.run_with(source)
    }

    /// Run the full horizon drawing increments from `source`
    pub fn run_with<S: IncrementSource>(&self, source: S) -> Result<SimulationPath, SimulationError> {
        info!(
            steps = self.params.steps,
            horizon = self.params.horizon,
            sigma = self.params.volatility,
            mu = self.params.drift,
            "Starting controlled process simulation"
        );

        let mut path = SimulationPath::with_capacity(self.params.steps);
        for record in self.steps(source) {
            path.push(&record?);
        }

        if let Some(last) = path.last() {
            info!(
                adjustments = path.adjustments.iter().filter(|a| a.is_jump()).count(),
                adjustment_cost = last.adjustment_cost(),
                holding_cost = last.holding_cost(),
                "Simulation complete"
            );
        }
        Ok(path)
    }
}

/// Lazily simulated path. Stops after N records or at the first error.
pub struct ControlledPath<'a, S> {
    simulator: &'a Simulator,
    source: S,
    previous: Option<StepRecord>,
    failed: bool,
}

impl<S: IncrementSource> ControlledPath<'_, S> {
    fn advance(&mut self, previous: &StepRecord) -> Result<StepRecord, SimulationError> {
        let params = &self.simulator.params;
        let increment = self
            .source
            .next_increment(params.step_size(), params.volatility, params.drift)?;
        Simulator::step(&self.simulator.policy, previous, increment)
    }
}

impl<S: IncrementSource> Iterator for ControlledPath<'_, S> {
    type Item = Result<StepRecord, SimulationError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let record = match self.previous {
            None => Ok(StepRecord::initial()),
            Some(previous) => {
                if previous.state.step_index + 1 >= self.simulator.params.steps {
                    return None;
                }
                self.advance(&previous)
            }
        };

        match record {
            Ok(record) => {
                self.previous = Some(record);
                Some(Ok(record))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
