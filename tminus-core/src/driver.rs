//! Render loop driver
//!
//! Each cycle fetches the time, computes a frame, steps the render mode
//! and pushes the result to the display:
//!
//! - `Steady`: one fixed frame, then wait [`STEADY_REFRESH_MS`]
//! - `Scrolling`: one marquee pass of the event message (paced by the
//!   scroll step delay), then back to the top of the loop so the time is
//!   still polled between passes
//! - any failure: the error indicator stays up for the swap delay and the
//!   caller restarts the device

use embedded_hal_async::delay::DelayNs;

use crate::config::CountdownConfig;
use crate::countdown::{compute_frame, right_justified, Rendering, CONNECTED_TEXT, ERROR_TEXT};
use crate::error::Fault;
use crate::state::{Event, RenderMode};
use crate::traits::{DisplayError, SegmentDisplay, TimeSource};

/// Wait between steady countdown refreshes
pub const STEADY_REFRESH_MS: u32 = 1000;

/// Drives one display from one time source
pub struct Driver<'a, T, D, W> {
    config: CountdownConfig<'a>,
    time: T,
    display: D,
    delay: W,
    mode: RenderMode,
    fault: Option<Fault>,
}

impl<'a, T, D, W> Driver<'a, T, D, W>
where
    T: TimeSource,
    D: SegmentDisplay,
    W: DelayNs,
{
    /// Create a driver in `Steady` mode
    pub fn new(config: CountdownConfig<'a>, time: T, display: D, delay: W) -> Self {
        Self {
            config,
            time,
            display,
            delay,
            mode: RenderMode::default(),
            fault: None,
        }
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Release the collaborators
    pub fn into_parts(self) -> (T, D, W) {
        (self.time, self.display, self.delay)
    }

    /// Show the connected banner after association succeeds
    pub async fn announce(&mut self) -> Result<(), Fault> {
        let banner = right_justified(CONNECTED_TEXT);
        let result = self.display.write_fixed(&banner).await;
        self.check(result)
    }

    /// Run one cycle and return the mode it ran in
    ///
    /// On failure the mode moves to `ErrorHold` and the fault is returned
    /// without touching the display; call [`Driver::hold`] next.
    pub async fn cycle(&mut self) -> Result<RenderMode, Fault> {
        // The hold is terminal; keep reporting the fault that caused it
        if let Some(fault) = self.fault {
            return Err(fault);
        }

        let now = match self.time.now().await {
            Ok(now) => now,
            Err(e) => return Err(self.fail(e.into())),
        };

        let frame = compute_frame(&self.config.target, &now);
        let previous = self.mode;
        self.mode = self.mode.transition(Event::from(&frame));

        let result = match frame.render(self.config.target.name()) {
            Rendering::Fixed(text) if self.mode.shows_countdown() => {
                let written = self.display.write_fixed(&text).await;
                if written.is_ok() {
                    self.delay.delay_ms(STEADY_REFRESH_MS).await;
                }
                written
            }
            // Event day, or any frame once scrolling has latched
            _ => self.scroll_pass(previous != RenderMode::Scrolling).await,
        };

        self.check(result)?;
        Ok(self.mode)
    }

    /// One marquee pass, blanking the display first on entry
    async fn scroll_pass(&mut self, entered: bool) -> Result<(), DisplayError> {
        if entered {
            self.display.clear().await?;
        }
        self.display
            .write_scrolling(
                self.config.target.message(),
                self.config.scroll_step_ms(),
                false,
            )
            .await
    }

    /// Cycle until something fails, hold the error indicator, and return
    /// the fault so the caller can restart
    pub async fn run(&mut self) -> Fault {
        loop {
            if let Err(fault) = self.cycle().await {
                self.hold(&fault).await;
                return fault;
            }
        }
    }

    /// Show the error indicator for the configured swap delay
    pub async fn hold(&mut self, fault: &Fault) {
        self.fail(*fault);
        error_hold(&mut self.display, &mut self.delay, self.config.swap_delay_s).await;
    }

    fn check(&mut self, result: Result<(), DisplayError>) -> Result<(), Fault> {
        result.map_err(|e| self.fail(e.into()))
    }

    fn fail(&mut self, fault: Fault) -> Fault {
        self.mode = self.mode.transition(Event::Failure(fault.kind()));
        if self.fault.is_none() {
            self.fault = Some(fault);
        }
        fault
    }
}

/// Show the error indicator and wait `hold_s` seconds
///
/// Also used before a configuration exists, with
/// [`DEFAULT_SWAP_DELAY_S`](crate::config::DEFAULT_SWAP_DELAY_S). A failed
/// display write does not shorten the hold.
pub async fn error_hold<D, W>(display: &mut D, delay: &mut W, hold_s: u32)
where
    D: SegmentDisplay,
    W: DelayNs,
{
    let banner = right_justified(ERROR_TEXT);
    let _ = display.write_fixed(&banner).await;
    delay.delay_ms(hold_s.saturating_mul(1000)).await;
}
