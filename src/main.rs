//! band-control - Banded impulse control of a Brownian motion
//!
//! Runs a controlled-process simulation and prints or animates the result.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use band_control::adapters::cli::{self, AnimateCmd, Command, SimulateCmd};
use band_control::adapters::{write_summary, GaugeLayout, OutputFormat, TerminalRenderer};
use band_control::application::AnimationPlayer;
use band_control::config::{load_config, Config};
use band_control::Simulator;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (BAND_CONTROL_SEED, RUST_LOG)
    dotenvy::dotenv().ok();

    let app = cli::init();

    match app.command {
        Command::Simulate(cmd) => {
            let config = resolve_config(cmd.config.as_deref())?;
            init_logging(app.verbose, app.debug, &config.logging.level)?;
            simulate_command(cmd, &config)
        }
        Command::Animate(cmd) => {
            let config = resolve_config(cmd.config.as_deref())?;
            init_logging(app.verbose, app.debug, &config.logging.level)?;
            animate_command(cmd, &config).await
        }
    }
}

fn init_logging(verbose: bool, debug: bool, config_level: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config_level))
    };

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    Ok(())
}

/// Load the config file if given (expanding `~`), else use the defaults
fn resolve_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => {
            let expanded = shellexpand::tilde(&path.to_string_lossy()).to_string();
            load_config(&expanded)
                .with_context(|| format!("Failed to load configuration from '{}'", expanded))
        }
        None => {
            let config = Config::default();
            config.validate().context("Default configuration is invalid")?;
            Ok(config)
        }
    }
}

fn build_simulator(config: &Config, seed: Option<u64>, steps: Option<usize>) -> Result<Simulator> {
    let policy = config.to_policy().context("Invalid control policy")?;

    let mut params = config.to_params().context("Invalid simulation parameters")?;
    if let Some(seed) = seed {
        params = params.with_seed(seed);
    }
    if let Some(steps) = steps {
        params = params.with_steps(steps);
    }

    Simulator::new(policy, params).context("Failed to create simulator")
}

fn simulate_command(cmd: SimulateCmd, config: &Config) -> Result<()> {
    let simulator = build_simulator(config, cmd.seed, cmd.steps)?;
    let path = simulator.run().context("Simulation failed")?;
    let summary = path.summary(simulator.params().horizon);

    let mut out = std::io::stdout().lock();
    write_summary(&mut out, &summary, cmd.format).context("Failed to write summary")?;
    out.flush()?;
    Ok(())
}

async fn animate_command(cmd: AnimateCmd, config: &Config) -> Result<()> {
    let simulator = build_simulator(config, cmd.seed, None)?;
    let path = simulator.run().context("Simulation failed")?;
    let horizon = simulator.params().horizon;
    let thresholds = *simulator.policy().thresholds();

    let interval_ms = cmd.interval_ms.unwrap_or(config.render.frame_interval_ms);
    let mut player = AnimationPlayer::new(Duration::from_millis(interval_ms))
        .context("Invalid frame interval")?;
    if cmd.repeat {
        player = player.with_repeat(Duration::from_millis(config.render.repeat_delay_ms));
    }

    // Setup Ctrl+C handler
    let stopper = player.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        tracing::info!("Shutdown signal received");
        stopper.stop().await;
    });

    let layout = GaugeLayout {
        width: config.render.width,
        padding: config.render.padding,
    };
    let mut renderer = TerminalRenderer::new(std::io::stdout(), thresholds, layout);
    let stats = player
        .play(&path, &thresholds, horizon, &mut renderer)
        .await
        .context("Playback failed")?;
    tracing::info!("Rendered {} frames over {} passes", stats.frames_rendered, stats.passes);

    let mut out = std::io::stdout().lock();
    writeln!(out)?;
    write_summary(&mut out, &path.summary(horizon), OutputFormat::Text)
        .context("Failed to write summary")?;
    Ok(())
}
