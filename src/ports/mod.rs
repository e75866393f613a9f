//! Ports Layer - Trait definitions for external collaborators
//!
//! The simulator core only talks to the outside through these traits:
//! - Increment sources (seeded Gaussian draws, scripted replays)
//! - Frame sinks that render a completed path frame by frame

pub mod increments;
pub mod mocks;
pub mod renderer;

pub use increments::IncrementSource;
pub use mocks::{RecordedFrame, RecordingFrameSink, ScriptedIncrements};
pub use renderer::{Frame, FrameSink, RenderError};
