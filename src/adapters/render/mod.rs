//! Render Adapters
//!
//! Read-only consumers of a finished simulation path:
//! - `TerminalRenderer`: frame-by-frame strip chart with cost overlay
//! - `write_summary`: aggregate run statistics as text or JSON

mod summary;
mod terminal;

pub use summary::{write_summary, OutputFormat};
pub use terminal::{GaugeLayout, TerminalRenderer};
