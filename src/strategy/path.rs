//! Simulated path and summary statistics
//!
//! Three aligned sequences (value, cumulative adjustment cost, cumulative
//! holding cost) plus the adjustment taken at each index.

use serde::{Deserialize, Serialize};

use crate::domain::{Adjustment, CostLedger, ProcessState, StepRecord};
use crate::ports::Frame;

/// Full output of one run, every sequence of length N
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationPath {
    pub values: Vec<f64>,
    pub adjustment_costs: Vec<f64>,
    pub holding_costs: Vec<f64>,
    pub adjustments: Vec<Adjustment>,
}

/// Aggregate view of a finished path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSummary {
    pub steps: usize,
    pub horizon: f64,
    /// Resets from the upper barrier down to U
    pub down_adjustments: usize,
    /// Resets from the lower barrier up to D
    pub up_adjustments: usize,
    pub adjustment_cost: f64,
    pub holding_cost: f64,
    pub total_cost: f64,
    /// `(adjustment_cost + holding_cost) / horizon`
    pub average_cost_per_time: f64,
    pub min_value: f64,
    pub max_value: f64,
}

impl SimulationPath {
    pub fn with_capacity(steps: usize) -> Self {
        Self {
            values: Vec::with_capacity(steps),
            adjustment_costs: Vec::with_capacity(steps),
            holding_costs: Vec::with_capacity(steps),
            adjustments: Vec::with_capacity(steps),
        }
    }

    pub fn push(&mut self, record: &StepRecord) {
        self.values.push(record.value());
        self.adjustment_costs.push(record.adjustment_cost());
        self.holding_costs.push(record.holding_cost());
        self.adjustments.push(record.adjustment);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Rebuild the step record at `index`
    pub fn record(&self, index: usize) -> Option<StepRecord> {
        Some(StepRecord {
            state: ProcessState {
                step_index: index,
                controlled_value: *self.values.get(index)?,
            },
            ledger: CostLedger::new(
                *self.adjustment_costs.get(index)?,
                *self.holding_costs.get(index)?,
            ),
            adjustment: *self.adjustments.get(index)?,
        })
    }

    pub fn last(&self) -> Option<StepRecord> {
        self.len().checked_sub(1).and_then(|i| self.record(i))
    }

    /// Evenly spaced time grid over `[0, horizon]`, one point per index,
    /// endpoints included
    pub fn times(&self, horizon: f64) -> Vec<f64> {
        time_grid(self.len(), horizon)
    }

    /// Read-only view of the prefix `[0..=index]`
    pub fn frame(&self, index: usize, time: f64) -> Option<Frame<'_>> {
        let record = self.record(index)?;
        Some(Frame {
            index,
            time,
            values: &self.values[..=index],
            adjustment_cost: record.adjustment_cost(),
            holding_cost: record.holding_cost(),
        })
    }

    pub fn count_adjustments(&self, kind: Adjustment) -> usize {
        self.adjustments.iter().filter(|a| **a == kind).count()
    }

    pub fn summary(&self, horizon: f64) -> PathSummary {
        let ledger = self.last().map(|r| r.ledger).unwrap_or_default();
        let total_cost = ledger.total();
        let average_cost_per_time = if horizon > 0.0 {
            total_cost / horizon
        } else {
            0.0
        };

        let min_value = self.values.iter().copied().fold(f64::INFINITY, f64::min);
        let max_value = self.values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        PathSummary {
            steps: self.len(),
            horizon,
            down_adjustments: self.count_adjustments(Adjustment::Down),
            up_adjustments: self.count_adjustments(Adjustment::Up),
            adjustment_cost: ledger.cumulative_adjustment_cost,
            holding_cost: ledger.cumulative_holding_cost,
            total_cost,
            average_cost_per_time,
            min_value: if self.is_empty() { 0.0 } else { min_value },
            max_value: if self.is_empty() { 0.0 } else { max_value },
        }
    }
}

/// `n` evenly spaced points from 0 to `horizon` inclusive
pub fn time_grid(n: usize, horizon: f64) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let intervals = (n - 1) as f64;
            (0..n).map(|i| i as f64 * horizon / intervals).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn record(index: usize, value: f64, adj: f64, hold: f64, adjustment: Adjustment) -> StepRecord {
        StepRecord {
            state: ProcessState {
                step_index: index,
                controlled_value: value,
            },
            ledger: CostLedger::new(adj, hold),
            adjustment,
        }
    }

    fn sample_path() -> SimulationPath {
        let mut path = SimulationPath::with_capacity(4);
        path.push(&StepRecord::initial());
        path.push(&record(1, 0.2, 1.03, 0.04, Adjustment::Down));
        path.push(&record(2, 0.1, 1.03, 0.05, Adjustment::None));
        path.push(&record(3, -0.2, 2.06, 0.09, Adjustment::Up));
        path
    }

    #[test]
    fn test_sequences_stay_aligned() {
        let path = sample_path();
        assert_eq!(path.len(), 4);
        assert_eq!(path.adjustment_costs.len(), 4);
        assert_eq!(path.holding_costs.len(), 4);
        assert_eq!(path.adjustments.len(), 4);

        let r = path.record(1).unwrap();
        assert_eq!(r.state.step_index, 1);
        assert_eq!(r.value(), 0.2);
        assert_eq!(r.adjustment, Adjustment::Down);
        assert!(path.record(4).is_none());
    }

    #[test]
    fn test_time_grid_includes_endpoints() {
        let grid = time_grid(5, 1.0);
        assert_eq!(grid, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(time_grid(1, 1.0), vec![0.0]);
        assert!(time_grid(0, 1.0).is_empty());
    }

    #[test]
    fn test_frame_is_prefix() {
        let path = sample_path();
        let frame = path.frame(2, 0.5).unwrap();
        assert_eq!(frame.values, &[0.0, 0.2, 0.1]);
        assert_eq!(frame.current_value(), Some(0.1));
        assert_relative_eq!(frame.holding_cost, 0.05, epsilon = 1e-12);
        assert!(path.frame(9, 0.0).is_none());
    }

    #[test]
    fn test_summary() {
        let summary = sample_path().summary(2.0);
        assert_eq!(summary.steps, 4);
        assert_eq!(summary.down_adjustments, 1);
        assert_eq!(summary.up_adjustments, 1);
        assert_relative_eq!(summary.adjustment_cost, 2.06, epsilon = 1e-12);
        assert_relative_eq!(summary.holding_cost, 0.09, epsilon = 1e-12);
        assert_relative_eq!(summary.total_cost, 2.15, epsilon = 1e-12);
        assert_relative_eq!(summary.average_cost_per_time, 1.075, epsilon = 1e-12);
        assert_eq!(summary.min_value, -0.2);
        assert_eq!(summary.max_value, 0.2);
    }

    #[test]
    fn test_empty_summary() {
        let summary = SimulationPath::default().summary(1.0);
        assert_eq!(summary.steps, 0);
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.min_value, 0.0);
    }
}
