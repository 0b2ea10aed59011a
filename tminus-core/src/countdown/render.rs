//! Cell layout for the 12-cell alphanumeric display
//!
//! Steady frames are laid out as fixed text:
//! ```text
//! ┌──────┬─────────┬─────────┐
//! │ name │ days  D │ hours H │
//! │ 4    │ 3 + 1   │ 3 + 1   │
//! └──────┴─────────┴─────────┘
//! ```
//! Minutes and seconds are computed by the engine but not shown.

use core::fmt::Write;

use heapless::String;

use super::engine::DisplayFrame;
use crate::text::Text;

/// Character cells on the display (three chained 4-cell backpacks)
pub const DISPLAY_CELLS: usize = 12;

/// Text for one fixed frame; sized for multi-byte characters in the name
pub type CellText = String<{ DISPLAY_CELLS * 4 }>;

/// Shown when a failure sends the device into its error hold
pub const ERROR_TEXT: &str = "Error :(";

/// Shown once association with the network and time service succeeds
pub const CONNECTED_TEXT: &str = "CONNECTED";

/// Shown in place of the countdown when the event is too far away
pub const OVERFLOW_TEXT: &str = "FUTURE";

/// How a frame reaches the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendering<'a> {
    /// One fixed frame
    Fixed(CellText),
    /// Continuous marquee of the message
    Marquee(Text<'a>),
}

impl<'a> DisplayFrame<'a> {
    /// Lay this frame out behind the (already truncated) event name
    pub fn render(&self, name: &str) -> Rendering<'a> {
        let mut text = CellText::new();
        // Capacity covers the widest layout, so writes cannot fail
        match *self {
            DisplayFrame::Future { days, hours, .. } => {
                let _ = write!(text, "{:>4}{:>3}D{:>3}H", name, days, hours);
            }
            DisplayFrame::Overflow => {
                let _ = write!(text, "{:>4}{:>8}", name, OVERFLOW_TEXT);
            }
            DisplayFrame::EventDay(message) => return Rendering::Marquee(message),
        }
        Rendering::Fixed(text)
    }
}

/// Right-justify `text` across every cell
pub fn right_justified(text: &str) -> CellText {
    let mut out = CellText::new();
    let _ = write!(out, "{:>width$}", text, width = DISPLAY_CELLS);
    out
}
