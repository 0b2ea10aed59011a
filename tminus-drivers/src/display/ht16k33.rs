//! HT16K33 quad alphanumeric backpacks
//!
//! Each backpack is an HT16K33 LED controller driving four 14-segment
//! cells. Backpacks are chained on one I2C bus at consecutive addresses
//! and treated as one row of cells, left to right in address order.
//!
//! # Display RAM
//!
//! Each cell takes two bytes of display RAM, low byte first:
//! ```text
//! ┌──────┬──────────┬──────────┬─────┬──────────┐
//! │ 0x00 │ cell0 lo │ cell0 hi │ ... │ cell3 hi │
//! └──────┴──────────┴──────────┴─────┴──────────┘
//! ```
//!
//! The driver keeps its own copy of every cell. Marquee steps shift that
//! copy left and flush it, so consecutive scroll calls continue from
//! whatever is on screen.

use embedded_hal_async::delay::DelayNs;
use embedded_hal_async::i2c::{Error, ErrorKind, I2c};
use heapless::Vec;

use tminus_core::config::Percent;
use tminus_core::traits::{DisplayError, SegmentDisplay};
use tminus_core::Text;

use super::font::{glyph, DECIMAL_POINT};

/// HT16K33 commands
pub mod cmd {
    /// System setup: oscillator on
    pub const OSCILLATOR_ON: u8 = 0x21;
    /// Display setup: display on, blink off
    pub const DISPLAY_ON: u8 = 0x81;
    /// Dimming set; low nibble is the level
    pub const BRIGHTNESS: u8 = 0xE0;
    /// Display RAM start address
    pub const RAM: u8 = 0x00;
}

/// Highest dimming level
pub const MAX_BRIGHTNESS_LEVEL: u32 = 15;

/// Cells on one backpack
pub const CELLS_PER_BOARD: usize = 4;

/// Most backpacks one driver addresses (the HT16K33 has 8 addresses)
pub const MAX_BOARDS: usize = 8;

const MAX_CELLS: usize = MAX_BOARDS * CELLS_PER_BOARD;

/// Three backpacks with A0 and A1 jumpers set for 0x70, 0x71, 0x72
pub const DEFAULT_ADDRESSES: [u8; 3] = [0x70, 0x71, 0x72];

/// Map a bus error to a display error
fn bus_error<E: Error>(e: E) -> DisplayError {
    match e.kind() {
        ErrorKind::NoAcknowledge(_) => DisplayError::Disconnected,
        _ => DisplayError::Bus,
    }
}

/// Lay `text` out left-aligned across `cells`
///
/// A `.` lights the decimal point of the cell before it; a leading or
/// repeated `.` takes a blank cell of its own. Characters past the last
/// cell are dropped.
pub fn layout(text: &str, cells: usize) -> [u16; MAX_CELLS] {
    let cells = cells.min(MAX_CELLS);
    let mut out = [0u16; MAX_CELLS];
    let mut pos = 0;

    for ch in text.chars() {
        if ch == '.' && pos > 0 && out[pos - 1] & DECIMAL_POINT == 0 {
            out[pos - 1] |= DECIMAL_POINT;
            continue;
        }
        if pos == cells {
            break;
        }
        out[pos] = glyph(ch);
        pos += 1;
    }

    out
}

/// Chained HT16K33 backpacks
pub struct Ht16k33<I2C, W> {
    i2c: I2C,
    delay: W,
    addresses: Vec<u8, MAX_BOARDS>,
    cells: [u16; MAX_CELLS],
}

impl<I2C, W> Ht16k33<I2C, W>
where
    I2C: I2c,
    W: DelayNs,
{
    /// Create a driver for the backpacks at `addresses`
    ///
    /// Addresses past [`MAX_BOARDS`] are ignored. Call [`Ht16k33::init`]
    /// before writing.
    pub fn new(i2c: I2C, delay: W, addresses: &[u8]) -> Self {
        let mut boards = Vec::new();
        for &address in addresses.iter().take(MAX_BOARDS) {
            let _ = boards.push(address);
        }

        Self {
            i2c,
            delay,
            addresses: boards,
            cells: [0; MAX_CELLS],
        }
    }

    /// Start the oscillators, switch the displays on and blank them
    pub async fn init(&mut self) -> Result<(), DisplayError> {
        self.command(cmd::OSCILLATOR_ON).await?;
        self.command(cmd::DISPLAY_ON).await?;
        self.clear().await
    }

    /// Cell contents as last flushed
    pub fn segments(&self) -> &[u16] {
        &self.cells[..self.cell_count()]
    }

    /// Release the bus and delay
    pub fn release(self) -> (I2C, W) {
        (self.i2c, self.delay)
    }

    fn cell_count(&self) -> usize {
        self.addresses.len() * CELLS_PER_BOARD
    }

    /// Send a one-byte command to every backpack
    async fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        for &address in self.addresses.iter() {
            self.i2c.write(address, &[command]).await.map_err(bus_error)?;
        }
        Ok(())
    }

    /// Write the cell copy to display RAM
    async fn flush(&mut self) -> Result<(), DisplayError> {
        for (board, &address) in self.addresses.iter().enumerate() {
            let mut frame = [0u8; 1 + CELLS_PER_BOARD * 2];
            frame[0] = cmd::RAM;
            let cells = &self.cells[board * CELLS_PER_BOARD..(board + 1) * CELLS_PER_BOARD];
            for (i, segments) in cells.iter().enumerate() {
                frame[1 + i * 2..3 + i * 2].copy_from_slice(&segments.to_le_bytes());
            }
            self.i2c.write(address, &frame).await.map_err(bus_error)?;
        }
        Ok(())
    }

    /// Shift every cell one place left and put `segments` in the last one
    fn shift_in(&mut self, segments: u16) {
        let count = self.cell_count();
        if count == 0 {
            return;
        }
        self.cells.copy_within(1..count, 0);
        self.cells[count - 1] = segments;
    }

    /// One marquee pass over `text`
    async fn scroll_pass(
        &mut self,
        text: Text<'_>,
        step_delay_ms: u32,
    ) -> Result<(), DisplayError> {
        let mut chars = text.chars().peekable();
        while let Some(ch) = chars.next() {
            let mut segments = glyph(ch);
            if ch != '.' && chars.peek() == Some(&'.') {
                chars.next();
                segments |= DECIMAL_POINT;
            }
            self.shift_in(segments);
            self.flush().await?;
            self.delay.delay_ms(step_delay_ms).await;
        }
        Ok(())
    }
}

impl<I2C, W> SegmentDisplay for Ht16k33<I2C, W>
where
    I2C: I2c,
    W: DelayNs,
{
    fn cells(&self) -> usize {
        self.cell_count()
    }

    async fn set_brightness(&mut self, brightness: Percent) -> Result<(), DisplayError> {
        let level = brightness.scale(MAX_BRIGHTNESS_LEVEL) as u8;
        self.command(cmd::BRIGHTNESS | level).await
    }

    async fn clear(&mut self) -> Result<(), DisplayError> {
        self.cells = [0; MAX_CELLS];
        self.flush().await
    }

    async fn write_fixed(&mut self, text: &str) -> Result<(), DisplayError> {
        self.cells = layout(text, self.cell_count());
        self.flush().await
    }

    async fn write_scrolling(
        &mut self,
        text: Text<'_>,
        step_delay_ms: u32,
        looping: bool,
    ) -> Result<(), DisplayError> {
        if !looping {
            return self.scroll_pass(text, step_delay_ms).await;
        }
        // An empty message would spin without yielding
        if text.is_empty() {
            return Ok(());
        }
        loop {
            self.scroll_pass(text, step_delay_ms).await?;
        }
    }
}
