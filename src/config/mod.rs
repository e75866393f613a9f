//! Configuration Module
//!
//! Loads and validates simulation settings from TOML files.

pub mod loader;

pub use loader::{
    load_config, Config, ConfigError, CostsSection, HoldingKind, HoldingSection, LoggingSection,
    PolicySection, ProcessSection, RenderSection, SEED_ENV_VAR,
};
