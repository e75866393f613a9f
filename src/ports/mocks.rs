use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::{SimulationError, Thresholds};

use super::increments::IncrementSource;
use super::renderer::{Frame, FrameSink, RenderError};

/// Increment source that replays a fixed script and records each call
#[derive(Debug, Default, Clone)]
pub struct ScriptedIncrements {
    script: VecDeque<f64>,
    calls: Arc<Mutex<Vec<(f64, f64, f64)>>>,
}

impl ScriptedIncrements {
    pub fn new<I: IntoIterator<Item = f64>>(increments: I) -> Self {
        Self {
            script: increments.into_iter().collect(),
            calls: Arc::default(),
        }
    }

    /// Builder method to append one more increment
    pub fn with_increment(mut self, increment: f64) -> Self {
        self.script.push_back(increment);
        self
    }

    /// `(step_size, volatility, drift)` of every draw so far
    pub fn get_calls(&self) -> Vec<(f64, f64, f64)> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl IncrementSource for ScriptedIncrements {
    fn next_increment(
        &mut self,
        step_size: f64,
        volatility: f64,
        drift: f64,
    ) -> Result<f64, SimulationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push((step_size, volatility, drift));
        }
        self.script.pop_front().ok_or_else(|| {
            SimulationError::configuration("increment script exhausted")
        })
    }
}

/// What a `RecordingFrameSink` saw for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedFrame {
    pub index: usize,
    pub time: f64,
    pub prefix_len: usize,
    pub value: Option<f64>,
    pub adjustment_cost: f64,
    pub holding_cost: f64,
}

/// Frame sink that records frames instead of drawing them
#[derive(Debug, Default, Clone)]
pub struct RecordingFrameSink {
    frames: Arc<Mutex<Vec<RecordedFrame>>>,
    passes: Arc<Mutex<u32>>,
}

impl RecordingFrameSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> Vec<RecordedFrame> {
        self.frames.lock().map(|f| f.clone()).unwrap_or_default()
    }

    /// Number of `begin` calls received
    pub fn passes(&self) -> u32 {
        self.passes.lock().map(|p| *p).unwrap_or_default()
    }
}

impl FrameSink for RecordingFrameSink {
    fn begin(&mut self, _thresholds: &Thresholds) -> Result<(), RenderError> {
        if let Ok(mut passes) = self.passes.lock() {
            *passes += 1;
        }
        Ok(())
    }

    fn render_frame(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        if let Ok(mut frames) = self.frames.lock() {
            frames.push(RecordedFrame {
                index: frame.index,
                time: frame.time,
                prefix_len: frame.values.len(),
                value: frame.current_value(),
                adjustment_cost: frame.adjustment_cost,
                holding_cost: frame.holding_cost,
            });
        }
        Ok(())
    }
}
