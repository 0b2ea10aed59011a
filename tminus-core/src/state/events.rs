//! Events that drive render mode transitions

use super::machine::ErrorKind;
use crate::countdown::DisplayFrame;

/// Inputs to [`RenderMode::transition`](super::RenderMode::transition)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Engine produced a countdown frame (`Future` or `Overflow`)
    Countdown,
    /// Engine produced an `EventDay` frame
    EventReached,
    /// A collaborator failed, or start-up could not complete
    Failure(ErrorKind),
}

impl From<&DisplayFrame<'_>> for Event {
    fn from(frame: &DisplayFrame<'_>) -> Self {
        if frame.is_event_day() {
            Event::EventReached
        } else {
            Event::Countdown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_from_frame() {
        assert_eq!(Event::from(&DisplayFrame::Overflow), Event::Countdown);
        assert_eq!(
            Event::from(&DisplayFrame::EventDay("party".into())),
            Event::EventReached
        );
        let future = DisplayFrame::Future {
            days: 0,
            hours: 1,
            minutes: 2,
            seconds: 3,
        };
        assert_eq!(Event::from(&future), Event::Countdown);
    }
}
