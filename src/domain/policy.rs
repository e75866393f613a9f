//! Banded Control Policy
//!
//! Immutable (s,S)-style impulse control policy made of four thresholds,
//! four adjustment cost coefficients and a convex holding cost.
//!
//! ```text
//!   u  ─────────── upper barrier: crossing resets the process down to U
//!   U  - - - - - - upper target
//!   D  - - - - - - lower target
//!   d  ─────────── lower barrier: crossing resets the process up to D
//! ```
//!
//! Validated once at construction; a `ControlPolicy` that exists always
//! satisfies `d < D <= U < u` with non-negative finite cost coefficients.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::SimulationError;
use super::state::Adjustment;

/// Barrier and target levels of the policy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Upper barrier (u)
    pub upper_barrier: f64,
    /// Upper target (U), reset level after hitting u
    pub upper_target: f64,
    /// Lower target (D), reset level after hitting d
    pub lower_target: f64,
    /// Lower barrier (d)
    pub lower_barrier: f64,
}

impl Thresholds {
    pub fn new(upper_barrier: f64, upper_target: f64, lower_target: f64, lower_barrier: f64) -> Self {
        Self {
            upper_barrier,
            upper_target,
            lower_target,
            lower_barrier,
        }
    }

    /// Gap between the upper barrier and upper target, `u - U`
    pub fn upper_gap(&self) -> f64 {
        self.upper_barrier - self.upper_target
    }

    /// Check `d < D <= U < u` with all levels finite
    pub fn validate(&self) -> Result<(), SimulationError> {
        let levels = [
            ("u", self.upper_barrier),
            ("U", self.upper_target),
            ("D", self.lower_target),
            ("d", self.lower_barrier),
        ];
        for (name, level) in levels {
            if !level.is_finite() {
                return Err(SimulationError::configuration(format!(
                    "threshold {} must be finite, got {}",
                    name, level
                )));
            }
        }

        if self.lower_barrier >= self.lower_target {
            return Err(SimulationError::configuration(format!(
                "lower barrier d={} must be strictly below lower target D={}",
                self.lower_barrier, self.lower_target
            )));
        }
        if self.lower_target > self.upper_target {
            return Err(SimulationError::configuration(format!(
                "lower target D={} must not exceed upper target U={}",
                self.lower_target, self.upper_target
            )));
        }
        if self.upper_target >= self.upper_barrier {
            return Err(SimulationError::configuration(format!(
                "upper target U={} must be strictly below upper barrier u={}",
                self.upper_target, self.upper_barrier
            )));
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self::new(0.5, 0.2, -0.2, -0.5)
    }
}

/// Fixed and proportional adjustment cost coefficients.
///
/// The `up_*` pair is charged on a reset at the upper barrier, the `down_*`
/// pair on a reset at the lower barrier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdjustmentCosts {
    pub up_proportional: f64,
    pub up_fixed: f64,
    pub down_proportional: f64,
    pub down_fixed: f64,
}

impl AdjustmentCosts {
    pub fn new(up_proportional: f64, up_fixed: f64, down_proportional: f64, down_fixed: f64) -> Self {
        Self {
            up_proportional,
            up_fixed,
            down_proportional,
            down_fixed,
        }
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        let coefficients = [
            ("up_proportional", self.up_proportional),
            ("up_fixed", self.up_fixed),
            ("down_proportional", self.down_proportional),
            ("down_fixed", self.down_fixed),
        ];
        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::configuration(format!(
                    "cost coefficient {} must be finite and >= 0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

impl Default for AdjustmentCosts {
    fn default() -> Self {
        Self::new(0.1, 1.0, 0.1, 1.0)
    }
}

/// Convex, non-negative running cost of holding the process at a value
#[derive(Clone)]
pub enum HoldingCost {
    /// `scale * x^2`
    Quadratic { scale: f64 },
    /// `scale * |x|`
    Absolute { scale: f64 },
    /// Caller-supplied function. Convexity is the caller's responsibility.
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl HoldingCost {
    pub fn quadratic() -> Self {
        HoldingCost::Quadratic { scale: 1.0 }
    }

    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        HoldingCost::Custom(Arc::new(f))
    }

    pub fn evaluate(&self, value: f64) -> f64 {
        match self {
            HoldingCost::Quadratic { scale } => scale * value * value,
            HoldingCost::Absolute { scale } => scale * value.abs(),
            HoldingCost::Custom(f) => f(value),
        }
    }

    fn validate(&self) -> Result<(), SimulationError> {
        match self {
            HoldingCost::Quadratic { scale } | HoldingCost::Absolute { scale } => {
                if !scale.is_finite() || *scale < 0.0 {
                    return Err(SimulationError::configuration(format!(
                        "holding cost scale must be finite and >= 0, got {}",
                        scale
                    )));
                }
                Ok(())
            }
            HoldingCost::Custom(_) => Ok(()),
        }
    }
}

impl Default for HoldingCost {
    fn default() -> Self {
        Self::quadratic()
    }
}

impl fmt::Debug for HoldingCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoldingCost::Quadratic { scale } => write!(f, "Quadratic({})", scale),
            HoldingCost::Absolute { scale } => write!(f, "Absolute({})", scale),
            HoldingCost::Custom(_) => write!(f, "Custom(<fn>)"),
        }
    }
}

/// Validated banded impulse control policy
#[derive(Debug, Clone)]
pub struct ControlPolicy {
    thresholds: Thresholds,
    costs: AdjustmentCosts,
    holding_cost: HoldingCost,
}

impl ControlPolicy {
    /// Build a policy, failing fast on any ordering or cost violation
    pub fn new(
        thresholds: Thresholds,
        costs: AdjustmentCosts,
        holding_cost: HoldingCost,
    ) -> Result<Self, SimulationError> {
        thresholds.validate()?;
        costs.validate()?;
        holding_cost.validate()?;

        Ok(Self {
            thresholds,
            costs,
            holding_cost,
        })
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn costs(&self) -> &AdjustmentCosts {
        &self.costs
    }

    pub fn holding_cost(&self) -> &HoldingCost {
        &self.holding_cost
    }

    pub fn upper_barrier(&self) -> f64 {
        self.thresholds.upper_barrier
    }

    pub fn upper_target(&self) -> f64 {
        self.thresholds.upper_target
    }

    pub fn lower_target(&self) -> f64 {
        self.thresholds.lower_target
    }

    pub fn lower_barrier(&self) -> f64 {
        self.thresholds.lower_barrier
    }

    /// Cost charged for one adjustment.
    ///
    /// Both directions scale the proportional coefficient by `u - U`,
    /// regardless of the jump actually taken.
    pub fn adjustment_cost(&self, adjustment: Adjustment) -> f64 {
        let gap = self.thresholds.upper_gap();
        match adjustment {
            Adjustment::None => 0.0,
            Adjustment::Down => self.costs.up_fixed + gap * self.costs.up_proportional,
            Adjustment::Up => self.costs.down_fixed + gap * self.costs.down_proportional,
        }
    }

    /// Level the process is reset to, if the adjustment moves it
    pub fn reset_level(&self, adjustment: Adjustment) -> Option<f64> {
        match adjustment {
            Adjustment::None => None,
            Adjustment::Down => Some(self.thresholds.upper_target),
            Adjustment::Up => Some(self.thresholds.lower_target),
        }
    }

    /// Classify a tentative value. The upper barrier is checked first.
    pub fn classify(&self, tentative: f64) -> Adjustment {
        if tentative >= self.thresholds.upper_barrier {
            Adjustment::Down
        } else if tentative <= self.thresholds.lower_barrier {
            Adjustment::Up
        } else {
            Adjustment::None
        }
    }
}

impl Default for ControlPolicy {
    fn default() -> Self {
        Self {
            thresholds: Thresholds::default(),
            costs: AdjustmentCosts::default(),
            holding_cost: HoldingCost::default(),
        }
    }
}
