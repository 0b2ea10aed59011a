//! Alphanumeric display trait

use crate::config::Percent;
use crate::text::Text;

/// Errors writing to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// A backpack did not acknowledge its address (unplugged or unpowered)
    Disconnected,
    /// Any other bus failure
    Bus,
}

/// A row of character cells that can show fixed or scrolling text
///
/// This trait abstracts the chained segment backpacks. Text is written
/// starting at the leftmost cell; characters beyond the last cell are
/// dropped and unused cells are blank.
#[allow(async_fn_in_trait)]
pub trait SegmentDisplay {
    /// Number of character cells
    fn cells(&self) -> usize;

    /// Set the brightness (applied once at start-up)
    async fn set_brightness(&mut self, brightness: Percent) -> Result<(), DisplayError>;

    /// Blank every cell
    async fn clear(&mut self) -> Result<(), DisplayError>;

    /// Show `text` as one frame
    async fn write_fixed(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Scroll `text` in from the right, one character per `step_delay_ms`
    ///
    /// With `looping` the pass repeats until a write fails; without it the
    /// call returns after one pass. What is on screen when a pass ends is
    /// kept, so consecutive calls continue one seamless marquee.
    async fn write_scrolling(
        &mut self,
        text: Text<'_>,
        step_delay_ms: u32,
        looping: bool,
    ) -> Result<(), DisplayError>;
}
