//! Adapters Layer - External System Implementations
//!
//! This module contains implementations of the port traits:
//! - Render: terminal strip chart and run summaries
//! - CLI: Command-line interface definitions

pub mod cli;
pub mod render;

pub use cli::CliApp;
pub use render::{write_summary, GaugeLayout, OutputFormat, TerminalRenderer};
