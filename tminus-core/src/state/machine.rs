//! Render mode definition
//!
//! What the display shows is a function of the current mode and the
//! latest event.

use super::events::Event;

/// How the display is being driven
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RenderMode {
    /// Fixed countdown text, refreshed every cycle
    #[default]
    Steady,
    /// Event message scrolling as a marquee; latched until restart
    Scrolling,
    /// Error indicator shown; the device restarts when the hold ends
    ErrorHold(ErrorKind),
}

/// Failure classes that end in the error hold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ErrorKind {
    /// Time fetch failed or timed out
    TimeSource,
    /// Display write failed
    Display,
    /// Settings missing or malformed (start-up only)
    Config,
    /// Network or time service join failed (start-up only)
    Association,
}

impl RenderMode {
    /// Check if this mode shows the fixed countdown
    pub fn shows_countdown(&self) -> bool {
        matches!(self, RenderMode::Steady)
    }

    /// Check if no further event can leave this mode before a restart
    pub fn is_terminal(&self) -> bool {
        matches!(self, RenderMode::Scrolling | RenderMode::ErrorHold(_))
    }

    /// Process an event and return the next mode
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use RenderMode::*;

        match (self, event) {
            // The hold ends only by restarting
            (ErrorHold(kind), _) => ErrorHold(kind),

            (_, Failure(kind)) => ErrorHold(kind),

            (Steady, Countdown) => Steady,
            (Steady, EventReached) => Scrolling,

            // Scrolling stays latched even if the clock steps backwards
            (Scrolling, Countdown | EventReached) => Scrolling,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_mode_is_steady() {
        assert_eq!(RenderMode::default(), RenderMode::Steady);
    }

    #[test]
    fn test_countdown_keeps_steady() {
        assert_eq!(
            RenderMode::Steady.transition(Event::Countdown),
            RenderMode::Steady
        );
    }

    #[test]
    fn test_event_day_starts_scrolling() {
        assert_eq!(
            RenderMode::Steady.transition(Event::EventReached),
            RenderMode::Scrolling
        );
    }

    #[test]
    fn test_scrolling_is_latched() {
        let mode = RenderMode::Scrolling;
        assert_eq!(mode.transition(Event::Countdown), RenderMode::Scrolling);
        assert_eq!(mode.transition(Event::EventReached), RenderMode::Scrolling);
    }

    #[test]
    fn test_failure_from_any_mode() {
        for mode in [RenderMode::Steady, RenderMode::Scrolling] {
            let next = mode.transition(Event::Failure(ErrorKind::TimeSource));
            assert_eq!(next, RenderMode::ErrorHold(ErrorKind::TimeSource));
        }
    }

    #[test]
    fn test_error_hold_is_terminal() {
        let hold = RenderMode::ErrorHold(ErrorKind::Display);
        assert_eq!(hold.transition(Event::Countdown), hold);
        assert_eq!(hold.transition(Event::EventReached), hold);
        // First failure wins
        assert_eq!(hold.transition(Event::Failure(ErrorKind::Config)), hold);
        assert!(hold.is_terminal());
        assert!(!hold.shows_countdown());
    }

    #[test]
    fn test_mode_queries() {
        assert!(RenderMode::Steady.shows_countdown());
        assert!(!RenderMode::Steady.is_terminal());
        assert!(!RenderMode::Scrolling.shows_countdown());
        assert!(RenderMode::Scrolling.is_terminal());
    }
}
