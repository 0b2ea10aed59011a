//! Countdown engine
//!
//! Turns the configured event target and the current instant into the
//! frame the display should show, and lays frames out into display cells.

pub mod engine;
pub mod render;
pub mod target;

pub use engine::{compute_frame, DisplayFrame, OVERFLOW_SECONDS};
pub use render::{
    right_justified, CellText, Rendering, CONNECTED_TEXT, DISPLAY_CELLS, ERROR_TEXT, OVERFLOW_TEXT,
};
pub use target::{EventTarget, TargetError, NAME_CELLS};
