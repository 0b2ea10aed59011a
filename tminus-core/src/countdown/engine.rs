//! Frame computation
//!
//! `compute_frame` is pure and total: every (target, now) pair yields a
//! frame, and the same pair always yields the same frame.

use super::target::EventTarget;
use crate::text::Text;
use crate::time::Instant;

/// Remaining durations at or above this (1000 days) cannot be shown
pub const OVERFLOW_SECONDS: i64 = 86_400_000;

/// What the display should show for one cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayFrame<'a> {
    /// Event still ahead and within display range
    Future {
        days: u16,
        hours: u8,
        minutes: u8,
        seconds: u8,
    },
    /// Event 1000 days or more away
    Overflow,
    /// Event instant has passed; carries the message to scroll
    EventDay(Text<'a>),
}

impl<'a> DisplayFrame<'a> {
    /// Frame for a signed duration (`target - now`, whole seconds)
    pub fn from_duration(duration: i64, message: impl Into<Text<'a>>) -> Self {
        if duration < 0 {
            return DisplayFrame::EventDay(message.into());
        }
        if duration >= OVERFLOW_SECONDS {
            return DisplayFrame::Overflow;
        }

        // Floor-divide seconds first, then minutes, then hours
        let mut rest = duration;
        let seconds = (rest % 60) as u8;
        rest /= 60;
        let minutes = (rest % 60) as u8;
        rest /= 60;
        let hours = (rest % 24) as u8;
        rest /= 24;

        DisplayFrame::Future {
            days: rest as u16,
            hours,
            minutes,
            seconds,
        }
    }

    /// Whether the event has been reached
    pub fn is_event_day(&self) -> bool {
        matches!(self, DisplayFrame::EventDay(_))
    }
}

/// Compute the frame for `now` against `target`
pub fn compute_frame<'a>(target: &EventTarget<'a>, now: &Instant) -> DisplayFrame<'a> {
    DisplayFrame::from_duration(now.seconds_until(target.at()), target.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> EventTarget<'static> {
        EventTarget::new(
            Instant::at_minute(2026, 5, 26, 8, 0).unwrap(),
            "EVENT NAME",
            "HAPPY EVENT NAME * ",
        )
        .unwrap()
    }

    #[test]
    fn test_two_days_minus_thirty_seconds() {
        let target = target();
        let now = Instant::new(2026, 5, 24, 8, 0, 30).unwrap();
        assert_eq!(
            compute_frame(&target, &now),
            DisplayFrame::Future {
                days: 1,
                hours: 23,
                minutes: 59,
                seconds: 30
            }
        );
    }

    #[test]
    fn test_zero_is_still_future() {
        let target = target();
        let now = *target.at();
        assert_eq!(
            compute_frame(&target, &now),
            DisplayFrame::Future {
                days: 0,
                hours: 0,
                minutes: 0,
                seconds: 0
            }
        );
    }

    #[test]
    fn test_one_second_late_is_event_day() {
        let target = target();
        let now = Instant::new(2026, 5, 26, 8, 0, 1).unwrap();
        let frame = compute_frame(&target, &now);
        assert_eq!(frame, DisplayFrame::EventDay("HAPPY EVENT NAME * ".into()));
        assert!(frame.is_event_day());
    }

    #[test]
    fn test_overflow_boundary() {
        assert_eq!(
            DisplayFrame::from_duration(OVERFLOW_SECONDS - 1, "m"),
            DisplayFrame::Future {
                days: 999,
                hours: 23,
                minutes: 59,
                seconds: 59
            }
        );
        assert_eq!(
            DisplayFrame::from_duration(OVERFLOW_SECONDS, "m"),
            DisplayFrame::Overflow
        );
    }

    #[test]
    fn test_far_future_target() {
        let target = EventTarget::new(
            Instant::at_minute(2040, 1, 1, 0, 0).unwrap(),
            "2040",
            "NEW DECADE",
        )
        .unwrap();
        let now = Instant::new(2026, 5, 24, 8, 0, 0).unwrap();
        assert_eq!(compute_frame(&target, &now), DisplayFrame::Overflow);
    }

    #[test]
    fn test_same_inputs_same_frame() {
        let target = target();
        let now = Instant::new(2026, 1, 2, 3, 4, 5).unwrap();
        assert_eq!(compute_frame(&target, &now), compute_frame(&target, &now));
    }
}
