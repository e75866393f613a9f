//! Configuration Loader
//!
//! Loads and validates simulation settings from TOML. Every section is
//! optional and falls back to the reference run (N=1000, T=1, sigma=1, mu=0,
//! u/U/D/d = 0.5/0.2/-0.2/-0.5, k=l=0.1, K=L=1, h(x)=x^2).

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::domain::{AdjustmentCosts, ControlPolicy, HoldingCost, SimulationError, Thresholds};
use crate::strategy::SimulationParams;

/// Environment variable that replaces `[process] seed`
pub const SEED_ENV_VAR: &str = "BAND_CONTROL_SEED";

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub process: ProcessSection,
    #[serde(default)]
    pub policy: PolicySection,
    #[serde(default)]
    pub costs: CostsSection,
    #[serde(default)]
    pub holding: HoldingSection,
    #[serde(default)]
    pub render: RenderSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Underlying Brownian motion and horizon
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProcessSection {
    /// Number of steps N
    pub steps: usize,
    /// Total time T (dt = T / N)
    pub horizon: f64,
    /// Volatility
    pub sigma: f64,
    /// Drift
    pub mu: f64,
    /// Generator seed
    pub seed: u64,
}

impl Default for ProcessSection {
    fn default() -> Self {
        let params = SimulationParams::default();
        Self {
            steps: params.steps,
            horizon: params.horizon,
            sigma: params.volatility,
            mu: params.drift,
            seed: params.seed,
        }
    }
}

impl ProcessSection {
    /// Get seed with environment variable override.
    /// Checks BAND_CONTROL_SEED first, falls back to config value.
    pub fn get_seed(&self) -> u64 {
        seed_override(std::env::var(SEED_ENV_VAR).ok().as_deref(), self.seed)
    }
}

fn seed_override(raw: Option<&str>, fallback: u64) -> u64 {
    match raw.map(str::trim) {
        Some(value) if !value.is_empty() => value.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring non-numeric {}={:?}", SEED_ENV_VAR, value);
            fallback
        }),
        _ => fallback,
    }
}

/// Barrier and target levels
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PolicySection {
    #[serde(rename = "u")]
    pub upper_barrier: f64,
    #[serde(rename = "U")]
    pub upper_target: f64,
    #[serde(rename = "D")]
    pub lower_target: f64,
    #[serde(rename = "d")]
    pub lower_barrier: f64,
}

impl Default for PolicySection {
    fn default() -> Self {
        let t = Thresholds::default();
        Self {
            upper_barrier: t.upper_barrier,
            upper_target: t.upper_target,
            lower_target: t.lower_target,
            lower_barrier: t.lower_barrier,
        }
    }
}

/// Adjustment cost coefficients.
///
/// `k`/`K` are charged on a reset at the lower barrier, `l`/`L` on a reset
/// at the upper barrier.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CostsSection {
    /// Proportional cost, lower barrier
    pub k: f64,
    /// Fixed cost, lower barrier
    #[serde(rename = "K")]
    pub k_fixed: f64,
    /// Proportional cost, upper barrier
    pub l: f64,
    /// Fixed cost, upper barrier
    #[serde(rename = "L")]
    pub l_fixed: f64,
}

impl Default for CostsSection {
    fn default() -> Self {
        Self {
            k: 0.1,
            k_fixed: 1.0,
            l: 0.1,
            l_fixed: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HoldingKind {
    #[default]
    Quadratic,
    Absolute,
}

/// Holding cost function
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HoldingSection {
    pub kind: HoldingKind,
    pub scale: f64,
}

impl Default for HoldingSection {
    fn default() -> Self {
        Self {
            kind: HoldingKind::Quadratic,
            scale: 1.0,
        }
    }
}

/// Terminal animation settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderSection {
    /// Delay between frames
    pub frame_interval_ms: u64,
    /// Pause before replaying when looping
    pub repeat_delay_ms: u64,
    /// Gauge width in characters
    pub width: usize,
    /// Margin drawn beyond the barriers
    pub padding: f64,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            frame_interval_ms: 20,
            repeat_delay_ms: 2000,
            width: 72,
            padding: 0.2,
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl From<SimulationError> for ConfigError {
    fn from(err: SimulationError) -> Self {
        ConfigError::ValidationError(err.to_string())
    }
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Config::from_toml_str(&content)
}

impl Config {
    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.to_policy()?;
        self.to_params()?;

        if self.render.frame_interval_ms == 0 {
            return Err(ConfigError::ValidationError(
                "frame_interval_ms must be > 0".to_string(),
            ));
        }

        if self.render.width < 10 {
            return Err(ConfigError::ValidationError(format!(
                "render width must be >= 10, got {}",
                self.render.width
            )));
        }

        if !self.render.padding.is_finite() || self.render.padding < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "render padding must be finite and >= 0, got {}",
                self.render.padding
            )));
        }

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "logging level must be one of {:?}, got {:?}",
                LOG_LEVELS, self.logging.level
            )));
        }

        Ok(())
    }

    /// Build the validated control policy
    pub fn to_policy(&self) -> Result<ControlPolicy, SimulationError> {
        let thresholds = Thresholds::new(
            self.policy.upper_barrier,
            self.policy.upper_target,
            self.policy.lower_target,
            self.policy.lower_barrier,
        );
        let costs = AdjustmentCosts::new(
            self.costs.l,
            self.costs.l_fixed,
            self.costs.k,
            self.costs.k_fixed,
        );
        let holding = match self.holding.kind {
            HoldingKind::Quadratic => HoldingCost::Quadratic {
                scale: self.holding.scale,
            },
            HoldingKind::Absolute => HoldingCost::Absolute {
                scale: self.holding.scale,
            },
        };
        ControlPolicy::new(thresholds, costs, holding)
    }

    /// Build the validated run parameters, applying the seed override
    pub fn to_params(&self) -> Result<SimulationParams, SimulationError> {
        let params = SimulationParams {
            steps: self.process.steps,
            horizon: self.process.horizon,
            volatility: self.process.sigma,
            drift: self.process.mu,
            seed: self.process.get_seed(),
        };
        params.validate()?;
        Ok(params)
    }
}
