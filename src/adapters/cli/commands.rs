//! CLI Command Definitions
//!
//! Argument parsing for the band-control binary.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::adapters::render::OutputFormat;

/// band-control - Banded impulse control of a Brownian motion
#[derive(Parser, Debug)]
#[command(
    name = "band-control",
    version = env!("CARGO_PKG_VERSION"),
    about = "Simulate a Brownian motion under a banded impulse control policy",
    long_about = "Simulates a drifted Brownian motion that is reset to an inner target \
                  whenever it reaches an outer barrier, tracking the cumulative \
                  adjustment and holding costs of the policy."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run one simulation and print a cost summary
    Simulate(SimulateCmd),

    /// Run one simulation and animate it in the terminal
    Animate(AnimateCmd),
}

/// Run and summarise
#[derive(Parser, Debug)]
pub struct SimulateCmd {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the generator seed
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Override the number of steps
    #[arg(short = 'n', long, value_name = "STEPS")]
    pub steps: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

/// Run and animate
#[derive(Parser, Debug)]
pub struct AnimateCmd {
    /// Path to configuration file (defaults apply when omitted)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the generator seed
    #[arg(short, long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Override the frame interval in milliseconds
    #[arg(long, value_name = "MS")]
    pub interval_ms: Option<u64>,

    /// Replay the animation until interrupted
    #[arg(short, long)]
    pub repeat: bool,
}
