//! Renderer port
//!
//! A renderer is a read-only consumer of a completed path. It is handed one
//! frame per clock tick and never sees anything past the current index.

use serde::Serialize;
use thiserror::Error;

use crate::domain::Thresholds;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to write frame: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize output: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Snapshot of the path prefix `[0..=index]`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Frame<'a> {
    pub index: usize,
    /// Time coordinate of `index` on the run's time grid
    pub time: f64,
    /// Controlled values up to and including `index`
    pub values: &'a [f64],
    pub adjustment_cost: f64,
    pub holding_cost: f64,
}

impl Frame<'_> {
    pub fn current_value(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

pub trait FrameSink {
    /// Called once before the first frame of each pass with the policy bands
    fn begin(&mut self, thresholds: &Thresholds) -> Result<(), RenderError> {
        let _ = thresholds;
        Ok(())
    }

    fn render_frame(&mut self, frame: &Frame<'_>) -> Result<(), RenderError>;

    /// Called after the last frame of each pass
    fn finish(&mut self) -> Result<(), RenderError> {
        Ok(())
    }
}
