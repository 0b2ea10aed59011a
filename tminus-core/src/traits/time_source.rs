//! Wall-clock time source

use tminus_protocol::{FrameError, TimeFault};

use crate::time::{CalendarError, Instant};

/// Errors fetching the current time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeSourceError {
    /// No answer within the fetch timeout
    Timeout,
    /// Time service could not answer
    Unavailable(TimeFault),
    /// Link to the time provider carried a bad frame
    Link(FrameError),
    /// Link to the time provider failed to read or write
    Io,
    /// Provider answered with a date that does not exist
    InvalidTime(CalendarError),
}

impl From<TimeFault> for TimeSourceError {
    fn from(fault: TimeFault) -> Self {
        TimeSourceError::Unavailable(fault)
    }
}

impl From<FrameError> for TimeSourceError {
    fn from(e: FrameError) -> Self {
        TimeSourceError::Link(e)
    }
}

impl From<CalendarError> for TimeSourceError {
    fn from(e: CalendarError) -> Self {
        TimeSourceError::InvalidTime(e)
    }
}

/// Supplies the current calendar time
///
/// Implementations report local calendar fields with no timezone
/// conversion and drop any sub-second part.
#[allow(async_fn_in_trait)]
pub trait TimeSource {
    /// Fetch the current time
    async fn now(&mut self) -> Result<Instant, TimeSourceError>;
}
