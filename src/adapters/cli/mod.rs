//! CLI Adapter
//!
//! Command-line interface for the band-control simulator.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{AnimateCmd, CliApp, Command, SimulateCmd};

/// Initialize the CLI application
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}
