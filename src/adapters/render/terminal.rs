//! Terminal strip-chart renderer
//!
//! Draws one row per frame: a horizontal gauge over `[d - padding, u + padding]`
//! with the barriers (`|`), the targets (`:`) and the current value (`*`),
//! followed by the running cost overlay.

use std::io::Write;

use crate::domain::Thresholds;
use crate::ports::{Frame, FrameSink, RenderError};

const BARRIER_MARK: char = '|';
const TARGET_MARK: char = ':';
const VALUE_MARK: char = '*';
const EMPTY: char = ' ';

/// Gauge geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeLayout {
    pub width: usize,
    pub padding: f64,
}

impl Default for GaugeLayout {
    fn default() -> Self {
        Self {
            width: 72,
            padding: 0.2,
        }
    }
}

pub struct TerminalRenderer<W: Write> {
    writer: W,
    layout: GaugeLayout,
    thresholds: Thresholds,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(writer: W, thresholds: Thresholds, layout: GaugeLayout) -> Self {
        Self {
            writer,
            layout,
            thresholds,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn bounds(&self) -> (f64, f64) {
        (
            self.thresholds.lower_barrier - self.layout.padding,
            self.thresholds.upper_barrier + self.layout.padding,
        )
    }

    /// Column of `x` on the gauge, clamped to its edges
    fn column(&self, x: f64) -> usize {
        let (lo, hi) = self.bounds();
        let last = self.layout.width.saturating_sub(1);
        if hi <= lo || !x.is_finite() {
            return 0;
        }
        let position = ((x - lo) / (hi - lo) * last as f64).round();
        position.clamp(0.0, last as f64) as usize
    }

    /// Gauge row for a single value
    pub fn gauge(&self, value: Option<f64>) -> String {
        let mut row = vec![EMPTY; self.layout.width];
        let t = &self.thresholds;

        for target in [t.upper_target, t.lower_target] {
            row[self.column(target)] = TARGET_MARK;
        }
        for barrier in [t.upper_barrier, t.lower_barrier] {
            row[self.column(barrier)] = BARRIER_MARK;
        }
        if let Some(v) = value {
            row[self.column(v)] = VALUE_MARK;
        }
        row.into_iter().collect()
    }
}

impl<W: Write> FrameSink for TerminalRenderer<W> {
    fn begin(&mut self, thresholds: &Thresholds) -> Result<(), RenderError> {
        self.thresholds = *thresholds;
        writeln!(
            self.writer,
            "bands: u={:.2} U={:.2} D={:.2} d={:.2}",
            thresholds.upper_barrier,
            thresholds.upper_target,
            thresholds.lower_target,
            thresholds.lower_barrier
        )?;
        Ok(())
    }

    fn render_frame(&mut self, frame: &Frame<'_>) -> Result<(), RenderError> {
        let row = self.gauge(frame.current_value());
        writeln!(
            self.writer,
            "{:>7.3} [{}] Adjustment Cost: {:.2}  Holding Cost: {:.2}",
            frame.time, row, frame.adjustment_cost, frame.holding_cost
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), RenderError> {
        self.writer.flush()?;
        Ok(())
    }
}
