//! Animation Player
//!
//! Drives a `FrameSink` from a precomputed path on a fixed frame clock,
//! pulling one new index per tick. The path is complete before playback
//! starts, so a slow sink only delays the animation, never the simulation.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::RwLock;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::domain::Thresholds;
use crate::ports::{FrameSink, RenderError};
use crate::strategy::SimulationPath;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
    #[error("Nothing to play: path is empty")]
    EmptyPath,
    #[error("Invalid frame interval: must be > 0")]
    InvalidInterval,
}

/// Counters reported after playback ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackStats {
    pub frames_rendered: usize,
    pub passes: u32,
    pub interrupted: bool,
}

/// Frame-clock driver for path playback
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    frame_interval: Duration,
    repeat_delay: Option<Duration>,
    is_running: Arc<RwLock<bool>>,
}

impl AnimationPlayer {
    pub fn new(frame_interval: Duration) -> Result<Self, PlayerError> {
        if frame_interval.is_zero() {
            return Err(PlayerError::InvalidInterval);
        }
        Ok(Self {
            frame_interval,
            repeat_delay: None,
            is_running: Arc::new(RwLock::new(false)),
        })
    }

    /// Replay from the start after `delay`, until stopped
    pub fn with_repeat(mut self, delay: Duration) -> Self {
        self.repeat_delay = Some(delay);
        self
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    /// Request playback to end at the next tick
    pub async fn stop(&self) {
        *self.is_running.write().await = false;
    }

    /// Play `path` into `sink`, one index per tick
    pub async fn play<S: FrameSink>(
        &self,
        path: &SimulationPath,
        thresholds: &Thresholds,
        horizon: f64,
        sink: &mut S,
    ) -> Result<PlaybackStats, PlayerError> {
        if path.is_empty() {
            return Err(PlayerError::EmptyPath);
        }

        *self.is_running.write().await = true;
        let times = path.times(horizon);
        let mut stats = PlaybackStats::default();

        info!(
            frames = path.len(),
            interval_ms = self.frame_interval.as_millis() as u64,
            repeat = self.repeat_delay.is_some(),
            "Starting playback"
        );

        'passes: loop {
            sink.begin(thresholds)?;
            stats.passes += 1;

            let mut clock = tokio::time::interval(self.frame_interval);
            clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

            for (index, time) in times.iter().enumerate() {
                clock.tick().await;
                if !self.is_running().await {
                    stats.interrupted = true;
                    sink.finish()?;
                    break 'passes;
                }
                if let Some(frame) = path.frame(index, *time) {
                    sink.render_frame(&frame)?;
                    stats.frames_rendered += 1;
                }
            }
            sink.finish()?;

            let Some(delay) = self.repeat_delay else {
                break 'passes;
            };
            debug!(pass = stats.passes, "Pass complete, replaying");
            tokio::time::sleep(delay).await;
            if !self.is_running().await {
                stats.interrupted = true;
                break 'passes;
            }
        }

        *self.is_running.write().await = false;

        info!(
            frames = stats.frames_rendered,
            passes = stats.passes,
            interrupted = stats.interrupted,
            "Playback finished"
        );
        Ok(stats)
    }
}
